use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NotepadSummary;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S, game: &str) -> Result<CmdResult> {
    let summaries: Vec<NotepadSummary> = store
        .list_notepads(game)?
        .iter()
        .map(|n| n.summary())
        .collect();

    log::debug!("Listed {} notepads for game '{}'", summaries.len(), game);

    let text = if summaries.is_empty() {
        format!("No notepads found for game '{}'", game)
    } else {
        let mut lines = vec![format!(
            "Found {} notepads for game '{}'",
            summaries.len(),
            game
        )];
        lines.extend(
            summaries
                .iter()
                .map(|s| format!("- {}: {} entries", s.title, s.entry_count)),
        );
        lines.join("\n")
    };

    let mut result = CmdResult::default().with_game(game);
    result.add_message(CmdMessage::info(text));
    Ok(result.with_summaries(summaries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::store_with;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn empty_game_lists_nothing() {
        let store = InMemoryStore::new();
        let result = run(&store, "Nowhere").unwrap();
        assert!(result.summaries.is_empty());
        assert_eq!(result.messages[0].content, "No notepads found for game 'Nowhere'");
    }

    #[test]
    fn lists_only_requested_game() {
        let store = store_with(&[
            ("Zelda", "Shrines", &["a", "b"]),
            ("Zelda", "Koroks", &["c"]),
            ("Elden Ring", "Bosses", &["d"]),
        ]);
        let result = run(&store, "Zelda").unwrap();
        let rows: Vec<_> = result
            .summaries
            .iter()
            .map(|s| (s.title.as_str(), s.entry_count))
            .collect();
        assert_eq!(rows, vec![("Koroks", 1), ("Shrines", 2)]);
    }

    #[test]
    fn order_is_stable_across_calls() {
        let store = store_with(&[
            ("General", "b", &["1"]),
            ("General", "B", &["1"]),
            ("General", "a", &["1"]),
        ]);
        let first: Vec<_> = run(&store, "General")
            .unwrap()
            .summaries
            .into_iter()
            .map(|s| s.title)
            .collect();
        let second: Vec<_> = run(&store, "General")
            .unwrap()
            .summaries
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(first, vec!["a", "B", "b"]);
        assert_eq!(first, second);
    }
}

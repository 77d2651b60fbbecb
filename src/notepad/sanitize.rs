//! Mapping of user supplied titles and game names onto path segments.
//!
//! Every notepad lives at `<root>/<segment(game)>/<segment(title)>.json`, so the
//! mapping must be deterministic: the same title always resolves to the same
//! file. It is also idempotent, which lets the store accept either a raw game
//! name or a directory key it handed out earlier.
//!
//! Titles differing only in characters that get replaced (for example `a/b` and
//! `a_b`) share a file. The same holds for the `_` written in front of
//! reserved device names and in place of a leading dot: `CON` shares a file
//! with `_CON`, and `.hidden` with `_hidden`; a literal leading `_` is kept
//! as is so that segments stay idempotent. Case is preserved, so on case-sensitive
//! file systems `Missions` and `missions` are distinct notepads.

/// Upper bound on a segment, in characters.
pub const MAX_SEGMENT_LEN: usize = 100;

const ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

pub fn sanitize_segment(name: &str) -> String {
    let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut out: String = collapsed
        .chars()
        .map(|c| {
            if ILLEGAL_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if out.starts_with('.') {
        out.replace_range(..1, "_");
    }

    if is_reserved(&out) {
        out.insert(0, '_');
    }

    let truncated: String = out.chars().take(MAX_SEGMENT_LEN).collect();
    let trimmed = truncated.trim_end_matches(['.', ' ']);

    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}

/// File name of the JSON record backing a notepad title.
pub fn notepad_file_name(title: &str) -> String {
    format!("{}.json", sanitize_segment(title))
}

fn is_reserved(segment: &str) -> bool {
    let stem = segment.split('.').next().unwrap_or(segment);
    RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(stem.trim_end()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_ordinary_names() {
        assert_eq!(sanitize_segment("Cyberpunk 2077"), "Cyberpunk 2077");
        assert_eq!(sanitize_segment("Missions"), "Missions");
    }

    #[test]
    fn replaces_illegal_characters() {
        assert_eq!(sanitize_segment("foo/bar"), "foo_bar");
        assert_eq!(sanitize_segment("baz\\qux"), "baz_qux");
        assert_eq!(sanitize_segment("a<b>c:d\"e|f?g*h"), "a_b_c_d_e_f_g_h");
        assert_eq!(sanitize_segment("bell\u{7}"), "bell_");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(sanitize_segment("  Side \t\n Quests  "), "Side Quests");
    }

    #[test]
    fn truncates_long_names_on_char_boundary() {
        let long = "é".repeat(250);
        let out = sanitize_segment(&long);
        assert_eq!(out.chars().count(), MAX_SEGMENT_LEN);
    }

    #[test]
    fn strips_trailing_dots_and_leading_dot() {
        assert_eq!(sanitize_segment("notes..."), "notes");
        assert_eq!(sanitize_segment(".recycle_bin"), "_recycle_bin");
        assert_eq!(sanitize_segment(".."), "_");
        assert_eq!(sanitize_segment("..."), "_");
    }

    #[test]
    fn guards_reserved_device_names() {
        assert_eq!(sanitize_segment("CON"), "_CON");
        assert_eq!(sanitize_segment("nul.txt"), "_nul.txt");
        assert_eq!(sanitize_segment("Console"), "Console");
    }

    #[test]
    fn empty_input_maps_to_placeholder() {
        assert_eq!(sanitize_segment(""), "_");
        assert_eq!(sanitize_segment("   "), "_");
    }

    #[test]
    fn is_deterministic_and_idempotent() {
        let inputs = [
            "Cyberpunk 2077",
            "a/b\\c",
            ".hidden",
            "CON.",
            "  spaced   out  ",
            "trailing. . .",
            &"x".repeat(300),
            &format!("{}. tail", "y".repeat(99)),
        ];
        for input in inputs {
            let once = sanitize_segment(input);
            assert_eq!(once, sanitize_segment(input));
            assert_eq!(once, sanitize_segment(&once), "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn file_name_appends_json() {
        assert_eq!(notepad_file_name("Missions"), "Missions.json");
        assert_eq!(notepad_file_name("a/b"), "a_b.json");
    }

    #[test]
    fn inserted_underscore_collides_with_literal_one() {
        assert_eq!(sanitize_segment("CON"), sanitize_segment("_CON"));
        assert_eq!(sanitize_segment(".hidden"), sanitize_segment("_hidden"));
        assert_eq!(sanitize_segment(&sanitize_segment("_CON")), "_CON");
    }
}

//! Filesystem-safe download names.

const NAME_MAX: usize = 255;

/// Bytes kept free for what the sink adds around a name: the `.` + `.part`
/// temp wrapper, or a ` (n)` counter (up to ` (4294967295)`).
const SINK_RESERVE: usize = 13;

/// Longest name handed to a sink.
pub const SAVE_NAME_MAX: usize = NAME_MAX - SINK_RESERVE;

fn clean(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c == '\0' || c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

fn floor_boundary(s: &str, mut at: usize) -> usize {
    while at > 0 && !s.is_char_boundary(at) {
        at -= 1;
    }
    at
}

/// Joins `head` and `tail` within `SAVE_NAME_MAX` bytes, shortening `head`
/// first. A tail that alone is too long keeps its last bytes.
pub fn fit_filename(head: &str, tail: &str) -> String {
    let head = clean(head);
    let tail = clean(tail);
    if head.len() + tail.len() <= SAVE_NAME_MAX {
        return head + &tail;
    }
    if tail.len() >= SAVE_NAME_MAX {
        let mut from = tail.len() - SAVE_NAME_MAX;
        while !tail.is_char_boundary(from) {
            from += 1;
        }
        return tail[from..].to_string();
    }
    let keep = floor_boundary(&head, SAVE_NAME_MAX - tail.len());
    let mut out = head[..keep].to_string();
    out.push_str(&tail);
    out
}

/// Replaces NUL, `/`, `\` and control characters with `_` and caps the
/// length at `SAVE_NAME_MAX` bytes, trimming the stem so the extension stays.
/// Spaces and punctuation are kept.
pub fn sanitize_filename(name: &str) -> String {
    match name.rfind('.') {
        Some(i) if i > 0 => fit_filename(&name[..i], &name[i..]),
        _ => fit_filename(name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_spaces_brackets_and_dashes() {
        let name = "[bsky] alice\u{2014}2024.11.18\u{2014}abc\u{2014}x.jpg";
        assert_eq!(sanitize_filename(name), name);
    }

    #[test]
    fn replaces_separators_and_controls() {
        assert_eq!(sanitize_filename("a/b\\c\0d\ne.jpg"), "a_b_c_d_e.jpg");
    }

    #[test]
    fn caps_length_on_char_boundary() {
        let long = "\u{2014}".repeat(100);
        let out = sanitize_filename(&long);
        assert!(out.len() <= SAVE_NAME_MAX);
        assert_eq!(out.len() % 3, 0);
    }

    #[test]
    fn long_stem_keeps_extension() {
        let name = format!("{}.jpg", "a".repeat(400));
        let out = sanitize_filename(&name);
        assert_eq!(out.len(), SAVE_NAME_MAX);
        assert!(out.ends_with("a.jpg"));
    }

    #[test]
    fn fit_shortens_head_only() {
        let out = fit_filename(&"h".repeat(300), "\u{2014}post\u{2014}x.jpg");
        assert!(out.len() <= SAVE_NAME_MAX);
        assert!(out.starts_with("hhh"));
        assert!(out.ends_with("\u{2014}post\u{2014}x.jpg"));
    }

    #[test]
    fn oversized_tail_keeps_its_end() {
        let tail = format!("{}.png", "\u{2014}".repeat(100));
        let out = fit_filename("head", &tail);
        assert!(out.len() <= SAVE_NAME_MAX);
        assert!(out.ends_with(".png"));
        assert!(!out.contains("head"));
    }

    #[test]
    fn room_left_for_part_and_counter() {
        assert!(SAVE_NAME_MAX + ".".len() + ".part".len() <= NAME_MAX);
        assert!(SAVE_NAME_MAX + " (4294967295)".len() <= NAME_MAX);
    }
}

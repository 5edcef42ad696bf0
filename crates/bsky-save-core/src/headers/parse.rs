//! Parse a raw HTTP response header block into `ResponseHeaders`.

use super::ResponseHeaders;

/// Parses newline-delimited `name: value` lines.
///
/// Each line is split at its first colon; the name is trimmed and lower-cased,
/// the value trimmed (it may contain further colons, e.g. dates). Blank lines
/// and lines without a colon are ignored.
pub fn parse_headers(block: &str) -> ResponseHeaders {
    let mut headers = ResponseHeaders::new();
    for line in block.trim().lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            headers.insert(name, value.trim());
        }
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_headers_case_insensitive_lookup() {
        let block = "Content-Type: image/jpeg\r\nContent-Length: 12345\r\nX-Custom:  spaced  \r\n";
        let h = parse_headers(block);
        assert_eq!(h.len(), 3);
        assert_eq!(h.get("content-type"), Some("image/jpeg"));
        assert_eq!(h.get("CONTENT-TYPE"), Some("image/jpeg"));
        assert_eq!(h.get("Content-Length"), Some("12345"));
        assert_eq!(h.get("x-custom"), Some("spaced"));
        assert_eq!(h.content_length(), Some(12345));
    }

    #[test]
    fn parse_headers_value_keeps_colons() {
        let h = parse_headers("last-modified: Fri, 21 May 2021 14:46:56 GMT");
        assert_eq!(h.get("Last-Modified"), Some("Fri, 21 May 2021 14:46:56 GMT"));
    }

    #[test]
    fn parse_headers_every_key_found() {
        let names = ["Age", "ETag", "Cache-Control", "Via", "Server"];
        let block: String = names
            .iter()
            .enumerate()
            .map(|(i, n)| format!("{}: value-{}\n", n, i))
            .collect();
        let h = parse_headers(&block);
        for (i, n) in names.iter().enumerate() {
            assert_eq!(h.get(&n.to_uppercase()), Some(format!("value-{}", i).as_str()));
        }
    }

    #[test]
    fn parse_headers_skips_blank_and_malformed() {
        let h = parse_headers("\n\nno colon here\n: empty name\nvia: 1.1 cdn\n\n");
        assert_eq!(h.len(), 1);
        assert_eq!(h.get("via"), Some("1.1 cdn"));
        assert!(!h.contains("no colon here"));
    }

    #[test]
    fn parse_headers_empty_block() {
        assert!(parse_headers("").is_empty());
    }
}

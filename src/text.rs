//! Text normalization and byte decoding helpers.
//!
//! Every string that crosses a boundary (user prompt, flat text file, link)
//! passes through [`trim`] before it is sent or persisted.

/// Characters stripped from both ends by [`trim`].
const PADDING: [char; 3] = [' ', '\n', '\r'];

/// Remove leading and trailing spaces, `\n` and `\r`.
///
/// Interior characters are left untouched, and tabs are not padding.
///
/// ```
/// use ollama_remote::text::trim;
///
/// assert_eq!(trim("  Home Wifi \r\n"), "Home Wifi");
/// assert_eq!(trim("\n\r  "), "");
/// ```
pub fn trim(s: &str) -> &str {
    s.trim_matches(PADDING.as_slice())
}

/// Decode raw link or file bytes into text, one byte per character.
///
/// The bridge board is not guaranteed to emit valid UTF-8, so bytes map
/// straight onto U+0000..=U+00FF instead of going through a multi-byte decoder.
pub fn decode_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Decode stored file contents: UTF-8 when valid, otherwise byte-per-char.
pub fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => decode_bytes(e.as_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_trim_strips_padding_only_at_edges() {
        assert_eq!(trim(" \r\nMy Net  work\n"), "My Net  work");
        assert_eq!(trim("pass word"), "pass word");
    }

    #[test]
    fn test_trim_keeps_tabs() {
        assert_eq!(trim("\tkey\t"), "\tkey\t");
    }

    #[test]
    fn test_trim_all_padding_is_empty() {
        assert_eq!(trim(""), "");
        assert_eq!(trim("   \r\n\n "), "");
    }

    #[test]
    fn test_decode_bytes_is_single_byte_per_char() {
        assert_eq!(decode_bytes(b"ok"), "ok");
        let decoded = decode_bytes(&[0x48, 0xE9, 0xFF]);
        assert_eq!(decoded.chars().count(), 3);
        assert_eq!(decoded, "H\u{e9}\u{ff}");
    }

    #[test]
    fn test_decode_bytes_survives_invalid_utf8() {
        // A lone continuation byte would be replaced by a lossy UTF-8 decoder.
        assert_eq!(decode_bytes(&[0x80]), "\u{80}");
    }

    #[test]
    fn test_decode_text_prefers_utf8() {
        assert_eq!(decode_text("Caf\u{e9}".as_bytes().to_vec()), "Caf\u{e9}");
        assert_eq!(decode_text(vec![b'C', 0xE9]), "C\u{e9}");
    }

    proptest! {
        #[test]
        fn trim_is_idempotent(s in "[ \\r\\na-zA-Z0-9/\\t]{0,40}") {
            prop_assert_eq!(trim(trim(&s)), trim(&s));
        }

        #[test]
        fn trim_never_lengthens(s in "\\PC{0,40}") {
            prop_assert!(trim(&s).len() <= s.len());
        }

        #[test]
        fn trim_result_has_no_padding_at_edges(s in "[ \\r\\nab]{0,20}") {
            let t = trim(&s);
            prop_assert!(!t.starts_with(PADDING.as_slice()));
            prop_assert!(!t.ends_with(PADDING.as_slice()));
        }
    }
}

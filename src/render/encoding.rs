//! Text encoding for PDF string literals.
//!
//! The standard fonts are declared with `/WinAnsiEncoding`, so each
//! character is written as a single byte. Typographic punctuation is folded
//! to ASCII first; whatever still falls outside Latin-1 becomes `?`.

use unicode_normalization::UnicodeNormalization;

/// Byte written for characters that have no single-byte representation.
pub const REPLACEMENT: u8 = b'?';

/// ASCII or Latin-1 stand-in for common typographic characters.
fn substitute(c: char) -> Option<&'static str> {
    let replacement = match c {
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => "'",
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => "\"",
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}'
        | '\u{2212}' => "-",
        '\u{2026}' => "...",
        '\u{2022}' | '\u{2023}' | '\u{2043}' => "\u{B7}",
        '\u{2039}' => "<",
        '\u{203A}' => ">",
        '\u{FB00}' => "ff",
        '\u{FB01}' => "fi",
        '\u{FB02}' => "fl",
        '\u{FB03}' => "ffi",
        '\u{FB04}' => "ffl",
        '\u{2002}' | '\u{2003}' | '\u{2009}' | '\u{200A}' | '\u{202F}' => " ",
        '\u{200B}' | '\u{FEFF}' => "",
        _ => return None,
    };
    Some(replacement)
}

/// Fold typographic characters to their plain equivalents.
pub fn fold_typography(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfc() {
        match substitute(c) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(c),
        }
    }
    out
}

/// Encode text as the body of a PDF literal string (without parentheses).
pub fn encode_text(text: &str) -> Vec<u8> {
    let folded = fold_typography(text);
    let mut bytes = Vec::with_capacity(folded.len());

    for c in folded.chars() {
        match c {
            '\\' => bytes.extend_from_slice(b"\\\\"),
            '(' => bytes.extend_from_slice(b"\\("),
            ')' => bytes.extend_from_slice(b"\\)"),
            '\t' => bytes.push(b' '),
            c if c.is_control() => bytes.push(REPLACEMENT),
            c if (c as u32) <= 0xFF => bytes.push(c as u32 as u8),
            _ => bytes.push(REPLACEMENT),
        }
    }

    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_delimiters() {
        assert_eq!(encode_text("a(b)c\\d"), b"a\\(b\\)c\\\\d".to_vec());
    }

    #[test]
    fn test_typography_folded() {
        assert_eq!(
            encode_text("\u{201C}It\u{2019}s\u{201D} \u{2014} done\u{2026}"),
            b"\"It's\" - done...".to_vec()
        );
        assert_eq!(encode_text("\u{FB01}ne \u{FB02}ow"), b"fine flow".to_vec());
        assert_eq!(encode_text("\u{2022} item"), vec![0xB7, b' ', b'i', b't', b'e', b'm']);
    }

    #[test]
    fn test_latin1_kept_as_single_bytes() {
        assert_eq!(encode_text("café"), vec![b'c', b'a', b'f', 0xE9]);
        // Decomposed input is composed first
        assert_eq!(encode_text("cafe\u{301}"), vec![b'c', b'a', b'f', 0xE9]);
    }

    #[test]
    fn test_unrepresentable_becomes_question_mark() {
        assert_eq!(encode_text("日本"), b"??".to_vec());
        assert_eq!(encode_text("a\u{1F600}b"), b"a?b".to_vec());
        // C1 controls
        assert_eq!(encode_text("\u{85}\u{9F}"), b"??".to_vec());
        assert_eq!(encode_text("\u{7}"), b"?".to_vec());
    }

    #[test]
    fn test_tab_becomes_space() {
        assert_eq!(encode_text("a\tb"), b"a b".to_vec());
    }
}

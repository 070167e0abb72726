//! ISO-8859-15 encoding utilities for European thermal printers
//!
//! The receipt text is German: umlauts, ß and the euro sign must survive the
//! trip to the printer. ISO-8859-15 ("Latin-9") covers all of them in one
//! byte per character. This module provides:
//! - Padding/truncating strings to column widths
//! - Converting UTF-8 to ISO-8859-15 while preserving ESC/POS commands

use tracing::instrument;

/// ESC t n — character code table for ISO8859-15 on Epson-compatible models
const CODE_TABLE_LATIN9: u8 = 40;

/// Column width of a string on the printer (one cell per character)
pub fn latin_width(s: &str) -> usize {
    s.chars().count()
}

/// Truncate a string to fit within a column width
pub fn truncate_latin(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Pad a string to a specific column width
///
/// If the string is longer than the width, it will be truncated.
pub fn pad_latin(s: &str, width: usize, align_right: bool) -> String {
    let current = latin_width(s);
    if current >= width {
        return truncate_latin(s, width);
    }
    let spaces = width - current;
    if align_right {
        format!("{}{}", " ".repeat(spaces), s)
    } else {
        format!("{}{}", s, " ".repeat(spaces))
    }
}

/// Convert mixed UTF-8 content (with ESC/POS commands) to ISO-8859-15
///
/// ASCII bytes (0x00-0x7F) pass through exactly as is, which protects
/// ESC/POS commands from being corrupted. Only bytes >= 0x80 are treated as
/// UTF-8 sequences and re-encoded.
///
/// Also re-selects the Latin-9 code table after any embedded INIT command
/// (ESC @), since INIT resets the printer to its default table.
#[instrument(skip(bytes))]
pub fn convert_to_latin9(bytes: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(bytes.len() + 8);

    // Select the Latin-9 code table at the start
    result.extend_from_slice(&[0x1B, 0x74, CODE_TABLE_LATIN9]);

    let mut buffer = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        // INIT command (ESC @ = 0x1B 0x40) resets the code table
        if b == 0x1B && i + 1 < bytes.len() && bytes[i + 1] == 0x40 {
            flush_buffer(&mut buffer, &mut result);

            result.push(0x1B);
            result.push(0x40);
            result.extend_from_slice(&[0x1B, 0x74, CODE_TABLE_LATIN9]);

            i += 2;
            continue;
        }

        if b < 128 {
            // ASCII byte (command or ASCII text)
            flush_buffer(&mut buffer, &mut result);
            result.push(b);
        } else {
            // Part of a UTF-8 sequence
            buffer.push(b);
        }
        i += 1;
    }

    flush_buffer(&mut buffer, &mut result);

    result
}

/// Flush the non-ASCII buffer, converting UTF-8 to ISO-8859-15
fn flush_buffer(buffer: &mut Vec<u8>, result: &mut Vec<u8>) {
    if buffer.is_empty() {
        return;
    }

    let s = String::from_utf8_lossy(buffer);
    let (encoded, _, _) = encoding_rs::ISO_8859_15.encode(&s);
    result.extend_from_slice(&encoded);
    buffer.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_width() {
        assert_eq!(latin_width("hello"), 5);
        assert_eq!(latin_width("Heißgetränke"), 12);
    }

    #[test]
    fn test_truncate_latin() {
        assert_eq!(truncate_latin("hello world", 5), "hello");
        assert_eq!(truncate_latin("Käse", 2), "Kä");
    }

    #[test]
    fn test_pad_latin() {
        assert_eq!(pad_latin("3x", 5, false), "3x   ");
        assert_eq!(pad_latin("3x", 5, true), "   3x");
        assert_eq!(pad_latin("hello world", 5, false), "hello");
    }

    #[test]
    fn test_umlaut_and_euro_bytes() {
        let out = convert_to_latin9("ä€".as_bytes());
        // Skip the leading ESC t 40
        assert_eq!(&out[..3], &[0x1B, 0x74, 40]);
        assert_eq!(&out[3..], &[0xE4, 0xA4]);
    }

    #[test]
    fn test_commands_preserved() {
        // Bold-on around an umlaut
        let mut input = vec![0x1B, 0x45, 0x01];
        input.extend_from_slice("Müsli".as_bytes());
        let out = convert_to_latin9(&input);
        assert_eq!(&out[3..6], &[0x1B, 0x45, 0x01]);
        assert!(out.contains(&0xFC)); // ü
    }

    #[test]
    fn test_init_reselects_code_table() {
        let input = vec![0x1B, 0x40, b'A'];
        let out = convert_to_latin9(&input);
        // ESC t 40, ESC @, ESC t 40, 'A'
        assert_eq!(out, vec![0x1B, 0x74, 40, 0x1B, 0x40, 0x1B, 0x74, 40, b'A']);
    }
}

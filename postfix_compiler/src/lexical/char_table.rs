//! Byte classification for the scanner

use std::sync::OnceLock;

/// Byte the scanner sees once the source is exhausted. A DEL byte in the
/// input classifies the same way and ends scanning early.
pub const EOF_CHAR: u8 = 0x7F;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharCode {
    Letter,
    Digit,
    Special,
    EndOfInput,
}

/// One entry per byte value
pub struct CharTable([CharCode; 256]);

impl CharTable {
    fn build() -> Self {
        let mut codes = [CharCode::Special; 256];

        for byte in b'a'..=b'z' {
            codes[byte as usize] = CharCode::Letter;
        }
        for byte in b'A'..=b'Z' {
            codes[byte as usize] = CharCode::Letter;
        }
        for byte in b'0'..=b'9' {
            codes[byte as usize] = CharCode::Digit;
        }
        codes[EOF_CHAR as usize] = CharCode::EndOfInput;

        Self(codes)
    }

    pub fn classify(&self, byte: u8) -> CharCode {
        self.0[byte as usize]
    }

    pub fn is_word_char(&self, byte: u8) -> bool {
        matches!(self.classify(byte), CharCode::Letter | CharCode::Digit)
    }
}

static CHAR_TABLE: OnceLock<CharTable> = OnceLock::new();

/// Shared table, built on first use
pub fn char_table() -> &'static CharTable {
    CHAR_TABLE.get_or_init(CharTable::build)
}

/// Map every whitespace byte to a plain space
pub fn normalize(byte: u8) -> u8 {
    match byte {
        b'\n' | b'\r' | b'\t' | 0x0B | 0x0C => b' ',
        other => other,
    }
}

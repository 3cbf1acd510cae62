//! Precomputed ASCII character classes used by the lexer.

/// A set of ASCII characters stored as a 128-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharClass(u128);

impl CharClass {
    const fn from_bytes(bytes: &[u8]) -> Self {
        let mut mask = 0u128;
        let mut i = 0;
        while i < bytes.len() {
            mask |= 1u128 << bytes[i];
            i += 1;
        }
        Self(mask)
    }

    const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Remove a single character from the class.
    pub const fn without(self, ch: char) -> Self {
        if (ch as u32) < 128 {
            Self(self.0 & !(1u128 << ch as u32))
        } else {
            self
        }
    }

    pub const fn contains(self, ch: char) -> bool {
        (ch as u32) < 128 && self.0 & (1u128 << ch as u32) != 0
    }
}

const LETTERS: CharClass =
    CharClass::from_bytes(b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ");
const DIGITS: CharClass = CharClass::from_bytes(b"0123456789");
const PUNCT: CharClass = CharClass::from_bytes(br#"~!@#$%^&*_+=-|\]['":/?.>,<"#);

/// Characters of a directive name.
pub const ALPHA: CharClass = LETTERS;

/// Characters of a command part or dependency name.
pub const PART: CharClass = LETTERS.union(DIGITS).union(PUNCT);

/// Whitespace skipped in every mode. Newlines are handled separately.
pub fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r')
}

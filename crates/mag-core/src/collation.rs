//! Title collation used to break ties between editions published at the same
//! moment.
//!
//! Comparison is at "base letter" strength: case and diacritics are ignored
//! (`ä` ≡ `a`, `Z` ≡ `z`), and runs of ASCII digits compare by numeric value
//! (`Part 2` < `Part 10`). Within a position, whitespace sorts before
//! punctuation, punctuation before digits, and digits before letters.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Compare two titles case-, diacritic-insensitively with numeric digit runs.
///
/// Returns `Ordering::Equal` for titles that differ only in case or accents,
/// so a stable sort keeps their original relative order.
#[must_use]
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    let (a, b) = (fold(a), fold(b));
    let left = tokenize(&a);
    let right = tokenize(&b);

    for (l, r) in left.iter().zip(right.iter()) {
        match l.cmp(r) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    left.len().cmp(&right.len())
}

/// Strip diacritics, expand a few letters that have no decomposition, and
/// lowercase.
fn fold(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.nfd().filter(|c| !is_combining_mark(*c)) {
        match c {
            'ß' => out.push_str("ss"),
            'æ' | 'Æ' => out.push_str("ae"),
            'œ' | 'Œ' => out.push_str("oe"),
            'þ' | 'Þ' => out.push_str("th"),
            'ø' | 'Ø' => out.push('o'),
            'đ' | 'Đ' => out.push('d'),
            'ł' | 'Ł' => out.push('l'),
            'ı' => out.push('i'),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Space,
    Punct(char),
    /// Digit run with leading zeros removed.
    Number(&'a str),
    Letter(char),
}

impl Token<'_> {
    const fn rank(&self) -> u8 {
        match self {
            Self::Space => 0,
            Self::Punct(_) => 1,
            Self::Number(_) => 2,
            Self::Letter(_) => 3,
        }
    }
}

impl Ord for Token<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Punct(a), Self::Punct(b)) | (Self::Letter(a), Self::Letter(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Token<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn tokenize(folded: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = folded.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c.is_ascii_digit() {
            let mut end = start + c.len_utf8();
            while let Some(&(i, next)) = chars.peek() {
                if !next.is_ascii_digit() {
                    break;
                }
                end = i + next.len_utf8();
                chars.next();
            }
            let digits = folded[start..end].trim_start_matches('0');
            tokens.push(Token::Number(digits));
        } else if c.is_whitespace() {
            tokens.push(Token::Space);
        } else if c.is_alphanumeric() {
            tokens.push(Token::Letter(c));
        } else {
            tokens.push(Token::Punct(c));
        }
    }
    tokens
}

use crate::crypto::key_square::{normalize_letter, KeySquare, Position, SIZE};
use std::fmt;

/// Letter inserted between doubled letters and used to pad odd input.
pub const FILLER: char = 'X';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl Direction {
    /// Step applied along a row or column: one forward to encrypt, one back
    /// (four forward, modulo 5) to decrypt.
    fn shift(self) -> usize {
        match self {
            Direction::Encrypt => 1,
            Direction::Decrypt => SIZE - 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigraphRule {
    SameRow,
    SameColumn,
    Rectangle,
}

impl DigraphRule {
    pub fn name(self) -> &'static str {
        match self {
            DigraphRule::SameRow => "Same Row",
            DigraphRule::SameColumn => "Same Col",
            DigraphRule::Rectangle => "Rectangle",
        }
    }
}

impl fmt::Display for DigraphRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of running one letter pair through the square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Substitution {
    pub input: (char, char),
    pub positions: (Position, Position),
    pub rule: DigraphRule,
    pub output: (char, char),
}

/// Applies the Playfair rule to one pair. Returns `None` when either letter
/// is not in the square.
pub fn substitute(square: &KeySquare, a: char, b: char, direction: Direction) -> Option<Substitution> {
    let p1 = square.position(a)?;
    let p2 = square.position(b)?;
    let shift = direction.shift();

    let (rule, o1, o2) = if p1.row == p2.row {
        (
            DigraphRule::SameRow,
            Position { row: p1.row, col: (p1.col + shift) % SIZE },
            Position { row: p2.row, col: (p2.col + shift) % SIZE },
        )
    } else if p1.col == p2.col {
        (
            DigraphRule::SameColumn,
            Position { row: (p1.row + shift) % SIZE, col: p1.col },
            Position { row: (p2.row + shift) % SIZE, col: p2.col },
        )
    } else {
        (
            DigraphRule::Rectangle,
            Position { row: p1.row, col: p2.col },
            Position { row: p2.row, col: p1.col },
        )
    };

    Some(Substitution {
        input: (a, b),
        positions: (p1, p2),
        rule,
        output: (square.at(o1), square.at(o2)),
    })
}

/// Turns free text into an even-length run of square letters.
///
/// Uppercases, folds `J` into `I` and drops everything that is not an ASCII
/// letter. A pair made of two identical letters is split by an `X`, with the
/// second letter starting the next pair; an odd tail is padded with `X`.
/// The fillers stay in the text: decryption gives back this prepared form.
pub fn prepare_text(text: &str) -> String {
    let letters: Vec<char> = text
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(normalize_letter)
        .collect();

    let mut prepared = String::with_capacity(letters.len() + letters.len() / 2 + 1);
    let mut i = 0;
    while i < letters.len() {
        prepared.push(letters[i]);
        match letters.get(i + 1) {
            Some(&next) if next == letters[i] => {
                prepared.push(FILLER);
                i += 1;
            }
            Some(&next) => {
                prepared.push(next);
                i += 2;
            }
            None => i += 1,
        }
    }

    if prepared.len() % 2 != 0 {
        prepared.push(FILLER);
    }
    prepared
}

/// Normalizes ciphertext typed by a user: spaces removed, uppercased, `J`
/// folded into `I`.
pub fn normalize_ciphertext(text: &str) -> String {
    text.chars()
        .filter(|&c| c != ' ')
        .map(normalize_letter)
        .collect()
}

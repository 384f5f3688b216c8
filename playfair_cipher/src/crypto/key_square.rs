use std::fmt;

/// The 25-letter alphabet used by the square: `A`-`Z` without `J`.
pub const ALPHABET: &str = "ABCDEFGHIKLMNOPQRSTUVWXYZ";

pub const SIZE: usize = 5;

/// Row/column of a letter inside the square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Uppercases a letter and folds `J` into `I`.
pub fn normalize_letter(c: char) -> char {
    match c.to_ascii_uppercase() {
        'J' => 'I',
        other => other,
    }
}

/// Uppercases the key and replaces every `J` with `I`.
pub fn normalize_key(key: &str) -> String {
    key.chars().map(normalize_letter).collect()
}

/// 5x5 letter grid derived from a key.
///
/// Always holds each letter of [`ALPHABET`] exactly once: the key's letters
/// come first in order of first appearance, the rest of the alphabet fills the
/// remaining cells row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySquare {
    cells: [[char; SIZE]; SIZE],
}

impl KeySquare {
    pub fn from_key(key: &str) -> Self {
        let mut seen = [false; 26];
        let mut order = Vec::with_capacity(SIZE * SIZE);

        for c in normalize_key(key).chars().chain(ALPHABET.chars()) {
            if !c.is_ascii_uppercase() {
                continue;
            }
            let idx = (c as u8 - b'A') as usize;
            if !seen[idx] {
                seen[idx] = true;
                order.push(c);
            }
        }

        let mut cells = [['A'; SIZE]; SIZE];
        for (i, c) in order.into_iter().enumerate() {
            cells[i / SIZE][i % SIZE] = c;
        }
        Self { cells }
    }

    /// Finds a letter (after `J` -> `I` folding). `None` means the input was
    /// not a square letter at all and should be treated as corrupt.
    pub fn position(&self, c: char) -> Option<Position> {
        let c = normalize_letter(c);
        self.cells.iter().enumerate().find_map(|(row, cells)| {
            cells
                .iter()
                .position(|&cell| cell == c)
                .map(|col| Position { row, col })
        })
    }

    pub fn at(&self, pos: Position) -> char {
        self.cells[pos.row % SIZE][pos.col % SIZE]
    }

    pub fn rows(&self) -> &[[char; SIZE]; SIZE] {
        &self.cells
    }
}

impl fmt::Display for KeySquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: Vec<String> = row.iter().map(char::to_string).collect();
            writeln!(f, "{}", line.join("  "))?;
        }
        Ok(())
    }
}

//! Playfair digraph substitution over a key-derived 5x5 square.

pub mod digraph;
pub mod file_codec;
pub mod key_square;
pub mod playfair;

pub use self::key_square::KeySquare;
pub use self::playfair::PlayfairCipher;

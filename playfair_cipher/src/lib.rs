pub mod crypto;
pub use crypto::digraph::{prepare_text, DigraphRule, Direction};
pub use crypto::file_codec::{is_encrypted_file, FILE_HEADER_PREFIX};
pub use crypto::key_square::{KeySquare, Position, ALPHABET};
pub use crypto::playfair::PlayfairCipher;

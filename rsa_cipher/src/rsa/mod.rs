pub mod file_codec;
pub mod key_file;
pub mod keygen;
pub mod rsa;

pub use keygen::{RsaKeyGenerator, RsaKeyPair};
pub use rsa::RsaCipher;

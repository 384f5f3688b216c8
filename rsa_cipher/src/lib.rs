pub mod number_theory;
pub mod primality;
pub mod rsa;

pub use rsa::file_codec::{is_encrypted_file, FILE_HEADER};
pub use rsa::key_file::{export_keys, import_private_key, import_public_key};
pub use rsa::keygen::{RsaKeyGenerator, RsaKeyPair, DEFAULT_BIT_LENGTH, DEFAULT_PUBLIC_EXPONENT};
pub use rsa::rsa::RsaCipher;

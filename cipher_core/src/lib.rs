//! Shared plumbing for the classical cipher engines: error type, trace
//! records, progress reporting and byte/file I/O adapters.

pub mod cipher_io;
pub mod display;
pub mod error;
pub mod progress;
pub mod trace;

pub use cipher_io::{read_all, read_text, write_all, CipherInput, CipherOutput};
pub use display::ellipsize;
pub use error::{CipherError, ErrorKind, Result};
pub use progress::{NoProgress, ProgressReporter, ProgressSink};
pub use trace::TraceRecord;

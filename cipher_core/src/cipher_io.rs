use crate::error::{CipherError, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

/// Where a whole-file operation takes its input from.
#[derive(Debug, Clone)]
pub enum CipherInput {
    Bytes(Vec<u8>),
    File(PathBuf),
}

/// Where a whole-file operation writes its result.
#[derive(Debug)]
pub enum CipherOutput {
    Buffer(Vec<u8>),
    File(PathBuf),
}

impl CipherOutput {
    /// The written bytes, when the output is an in-memory buffer.
    pub fn as_buffer(&self) -> Option<&[u8]> {
        match self {
            CipherOutput::Buffer(buffer) => Some(buffer),
            CipherOutput::File(_) => None,
        }
    }
}

pub fn read_all(input: &CipherInput) -> Result<Vec<u8>> {
    match input {
        CipherInput::Bytes(data) => Ok(data.clone()),
        CipherInput::File(path) => {
            let file = File::open(path)
                .map_err(|e| CipherError::io(format!("failed to open {}", path.display()), e))?;
            let mut reader = BufReader::new(file);
            let mut buffer = Vec::new();
            reader
                .read_to_end(&mut buffer)
                .map_err(|e| CipherError::io(format!("failed to read {}", path.display()), e))?;
            log::debug!("read {} bytes from {}", buffer.len(), path.display());
            Ok(buffer)
        }
    }
}

/// Reads the input as UTF-8 text; encrypted containers are plain text.
pub fn read_text(input: &CipherInput) -> Result<String> {
    let bytes = read_all(input)?;
    String::from_utf8(bytes)
        .map_err(|_| CipherError::corrupt_data("encrypted input is not valid UTF-8 text"))
}

pub fn write_all(output: &mut CipherOutput, data: &[u8]) -> Result<()> {
    match output {
        CipherOutput::Buffer(buffer) => {
            buffer.clear();
            buffer.extend_from_slice(data);
            Ok(())
        }
        CipherOutput::File(path) => {
            let file = File::create(&*path)
                .map_err(|e| CipherError::io(format!("failed to create {}", path.display()), e))?;
            let mut writer = BufWriter::new(file);
            writer
                .write_all(data)
                .and_then(|_| writer.flush())
                .map_err(|e| CipherError::io(format!("failed to write {}", path.display()), e))?;
            log::debug!("wrote {} bytes to {}", data.len(), path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::NamedTempFile;

    #[test]
    fn buffer_roundtrip() {
        let mut out = CipherOutput::Buffer(vec![9, 9, 9, 9]);
        write_all(&mut out, b"abc").unwrap();
        assert_eq!(out.as_buffer(), Some(&b"abc"[..]));
        assert_eq!(read_all(&CipherInput::Bytes(b"abc".to_vec())).unwrap(), b"abc");
    }

    #[test]
    fn file_roundtrip() {
        let file = NamedTempFile::new().unwrap();
        let mut out = CipherOutput::File(file.path().to_path_buf());
        write_all(&mut out, b"exampledata").unwrap();
        let back = read_all(&CipherInput::File(file.path().to_path_buf())).unwrap();
        assert_eq!(back, b"exampledata");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_all(&CipherInput::File(dir.path().join("missing.bin"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn binary_input_is_not_text() {
        let err = read_text(&CipherInput::Bytes(vec![0xff, 0xfe])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptData);
    }
}

//! Opens the input for line-oriented reading. The reader sniffs byte order
//! marks, so UTF-16 files arrive as UTF-8 and a UTF-8 BOM never reaches the
//! first record.

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::Path;

use encoding_rs_io::{DecodeReaderBytes, DecodeReaderBytesBuilder};

use crate::error::DetectError;

pub(crate) type InputReader = BufReader<DecodeReaderBytes<File, Vec<u8>>>;

/// Opens `path` for reading, distinguishing a missing file from one that
/// exists but can't be opened.
pub(crate) fn open(path: &Path) -> Result<InputReader, DetectError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => DetectError::NotFound { path: path.to_owned() },
        _ => DetectError::Open { path: path.to_owned(), source },
    })?;
    Ok(BufReader::with_capacity(
        32 * 1024,
        DecodeReaderBytesBuilder::new()
            .bom_sniffing(true) // Look at the BOM to detect UTF-16 files and convert to UTF-8
            .strip_bom(true) // Remove the BOM before sending data to us
            .utf8_passthru(true) // Don't enforce UTF-8 (BOM or no BOM)
            .build(file),
    ))
}

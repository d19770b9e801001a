//! OPC packaging: write document parts into a ZIP container in memory.

use std::io::{Cursor, Write};

use indexmap::IndexMap;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::Result;

/// Package parts keyed by their exact, case-sensitive part path.
///
/// Insertion order is the entry order in the archive.
pub type Parts = IndexMap<String, Vec<u8>>;

/// Zip every part into a single Deflate-compressed archive.
///
/// Only file entries are written; folders are implied by the part paths.
pub fn pack(parts: &Parts) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .compression_level(Some(6));

        for (path, content) in parts {
            zip.start_file(path.as_str(), options)?;
            zip.write_all(content)?;
        }

        zip.finish()?;
    }

    log::debug!(
        "Packed {} parts into {} bytes",
        parts.len(),
        buffer.len()
    );
    Ok(buffer)
}

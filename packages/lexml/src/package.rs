//! # Package I/O
//!
//! A `.tosc` file is the lexml XML compressed with zlib. [`serialize`] and
//! [`deserialize`] are exact inverses of each other; raw XML is not accepted
//! on the way in.

use crate::ast::Document;
use crate::error::{ParseError, ParseResult, PersistError};
use crate::parser::from_xml;
use crate::serializer::to_xml;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Compress the document into package bytes
pub fn serialize(doc: &Document) -> io::Result<Vec<u8>> {
    let xml = to_xml(doc);

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(xml.as_bytes())?;
    let bytes = encoder.finish()?;

    tracing::debug!("packed {} bytes of xml into {} bytes", xml.len(), bytes.len());
    Ok(bytes)
}

/// Decompress and parse package bytes
pub fn deserialize(bytes: &[u8]) -> ParseResult<Document> {
    let mut xml = String::new();
    ZlibDecoder::new(bytes)
        .read_to_string(&mut xml)
        .map_err(|e| ParseError::Package(e.to_string()))?;

    from_xml(&xml)
}

/// Write the document to `path`.
///
/// The package goes to a sibling temp file first and is renamed over the
/// target, so a failed write leaves an existing file as it was.
pub fn save(doc: &Document, path: &Path) -> Result<(), PersistError> {
    let io_err = |source: io::Error| PersistError::Io {
        path: path.to_path_buf(),
        source,
    };

    let bytes = serialize(doc).map_err(io_err)?;
    let staging = staging_path(path);

    if let Err(source) = fs::write(&staging, &bytes) {
        let _ = fs::remove_file(&staging);
        return Err(io_err(source));
    }

    if let Err(source) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(io_err(source));
    }

    tracing::info!("saved {} controls to {}", doc.len(), path.display());
    Ok(())
}

/// Read a document from `path`
pub fn open(path: &Path) -> Result<Document, PersistError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(PersistError::NotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(PersistError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    deserialize(&bytes).map_err(|source| PersistError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

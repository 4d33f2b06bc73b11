//! Binary container for trained artifacts.
//!
//! ## Format Layout
//!
//! ```text
//! +------------------+
//! | Header (8 bytes) |
//! +------------------+
//! | Payload          |
//! | (bincode)        |
//! +------------------+
//! ```
//!
//! ### Header (8 bytes)
//! - Magic number (4 bytes): "SSFT"
//! - Version (2 bytes, little-endian)
//! - Artifact kind (2 bytes, little-endian)
//!
//! The payload is the bincode encoding of the concrete parameter struct
//! named by the kind. JSON artifacts carry the kind as a `"kind"` tag instead.

use crate::error::{Result, SpamSiftError};
use std::fmt;
use std::path::Path;

/// Magic number for spamsift artifact files.
pub const MAGIC: &[u8; 4] = b"SSFT";

/// Current format version.
pub const VERSION: u16 = 1;

/// Header size in bytes.
pub const HEADER_SIZE: usize = 8;

/// Concrete artifact type stored in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ArtifactKind {
    /// Count vectorizer parameters.
    Count = 1,
    /// Support-mask feature selector.
    Support = 2,
    /// Multinomial naive Bayes classifier.
    MultinomialNb = 3,
    /// Linear classifier.
    Linear = 4,
}

impl ArtifactKind {
    /// Name used as the JSON `"kind"` tag.
    pub fn name(self) -> &'static str {
        match self {
            ArtifactKind::Count => "count",
            ArtifactKind::Support => "support",
            ArtifactKind::MultinomialNb => "multinomial_nb",
            ArtifactKind::Linear => "linear",
        }
    }
}

impl TryFrom<u16> for ArtifactKind {
    type Error = SpamSiftError;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            1 => Ok(ArtifactKind::Count),
            2 => Ok(ArtifactKind::Support),
            3 => Ok(ArtifactKind::MultinomialNb),
            4 => Ok(ArtifactKind::Linear),
            other => Err(SpamSiftError::InvalidArtifact(format!(
                "unknown artifact kind {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Artifact file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactHeader {
    /// Format version.
    pub version: u16,
    /// Stored artifact type.
    pub kind: ArtifactKind,
}

impl ArtifactHeader {
    /// Creates a header for the current format version.
    pub fn new(kind: ArtifactKind) -> Self {
        Self {
            version: VERSION,
            kind,
        }
    }

    /// Writes the header to bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(MAGIC);
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6..8].copy_from_slice(&(self.kind as u16).to_le_bytes());
        bytes
    }

    /// Reads a header from the start of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(SpamSiftError::InvalidArtifact("header too short".to_string()));
        }
        if &bytes[0..4] != MAGIC {
            return Err(SpamSiftError::InvalidArtifact("invalid magic number".to_string()));
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version == 0 || version > VERSION {
            return Err(SpamSiftError::InvalidArtifact(format!(
                "unsupported format version {}",
                version
            )));
        }
        let kind = ArtifactKind::try_from(u16::from_le_bytes([bytes[6], bytes[7]]))?;

        Ok(Self { version, kind })
    }
}

/// On-disk encoding of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Tagged JSON.
    Json,
    /// Header plus bincode payload.
    Binary,
}

impl Encoding {
    /// `.json` files are JSON; everything else is the binary container.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Encoding::Json,
            _ => Encoding::Binary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_bytes() {
        let header = ArtifactHeader::new(ArtifactKind::MultinomialNb);
        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..4], b"SSFT");
        assert_eq!(ArtifactHeader::from_bytes(&bytes).unwrap(), header);
    }

    #[test]
    fn test_header_rejects_bad_magic() {
        let mut bytes = ArtifactHeader::new(ArtifactKind::Count).to_bytes();
        bytes[0] = b'X';
        assert!(ArtifactHeader::from_bytes(&bytes).is_err());
        assert!(ArtifactHeader::from_bytes(&bytes[..4]).is_err());
    }

    #[test]
    fn test_header_rejects_unknown_kind_and_version() {
        let mut bytes = ArtifactHeader::new(ArtifactKind::Count).to_bytes();
        bytes[6] = 9;
        assert!(ArtifactHeader::from_bytes(&bytes).is_err());

        let mut bytes = ArtifactHeader::new(ArtifactKind::Count).to_bytes();
        bytes[4] = 7;
        assert!(ArtifactHeader::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_encoding_for_path() {
        assert_eq!(Encoding::for_path(Path::new("cv.json")), Encoding::Json);
        assert_eq!(Encoding::for_path(Path::new("cv.JSON")), Encoding::Json);
        assert_eq!(Encoding::for_path(Path::new("cv.bin")), Encoding::Binary);
        assert_eq!(Encoding::for_path(Path::new("cv")), Encoding::Binary);
    }
}

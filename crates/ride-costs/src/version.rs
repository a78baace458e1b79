//! Script library versions

use thiserror::Error;

/// Version selection errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Library version outside the supported range
    #[error("unsupported library version: {0}")]
    Unsupported(u8),
}

/// Script library version, selecting the cost table and function set in force
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LibVersion {
    /// Initial library
    V1 = 1,
    /// Same cost table as V1
    V2 = 2,
    /// Extended natives, reduced user-function costs
    V3 = 3,
    /// Entry-type constructors and limited crypto variants
    V4 = 4,
}

impl LibVersion {
    /// Numeric protocol value
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for LibVersion {
    type Error = VersionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            2 => Ok(Self::V2),
            3 => Ok(Self::V3),
            4 => Ok(Self::V4),
            other => Err(VersionError::Unsupported(other)),
        }
    }
}

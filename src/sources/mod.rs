//! Library export decoders
//!
//! Each source decodes one export format into a lazy stream of raw
//! [`SongRecord`]s. The comparator depends only on the [`SongSource`] trait,
//! so tests can substitute an in-memory source.

mod apple_music;
mod yt_music;

pub use apple_music::AppleMusicSource;
pub use yt_music::YtMusicSource;

use thiserror::Error;

use crate::models::SongRecord;

/// Failure while decoding a library export
///
/// All variants are fatal for the comparison: no retry, no partial result.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML parse error: {0}")]
    Xml(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("unrecognized plist element <{0}> in track entry")]
    UnrecognizedElement(String),
    #[error("decoded record is missing required field '{0}'")]
    MissingField(&'static str),
}

/// Lazy record stream produced by a source
pub type RecordIter<'a> = Box<dyn Iterator<Item = Result<SongRecord, DecodeError>> + 'a>;

/// One library export, decodable into a stream of song records
pub trait SongSource {
    /// Open the export and return its record stream.
    ///
    /// Opening may fail outright (missing or unreadable file); individual
    /// records may fail mid-stream (malformed entry, missing field). A
    /// missing field is an error, never a silent substitution.
    fn read(&self) -> Result<RecordIter<'_>, DecodeError>;
}

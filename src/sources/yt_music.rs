//! YouTube Music library export decoder
//!
//! The takeout export is a four-column CSV: video id, song title, album
//! title, artist name. Only the title and artist columns matter here.

use std::fs::File;
use std::path::PathBuf;

use super::{DecodeError, RecordIter, SongSource};
use crate::models::SongRecord;

const TITLE_COLUMN: usize = 1;
const ARTIST_COLUMN: usize = 3;

/// Decoder for the YouTube Music CSV export
pub struct YtMusicSource {
    path: PathBuf,
}

impl YtMusicSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SongSource for YtMusicSource {
    fn read(&self) -> Result<RecordIter<'_>, DecodeError> {
        // open explicitly so a missing file surfaces as an IO error, like
        // the XML source; the header row is consumed by the reader, not
        // yielded as a record
        let file = File::open(&self.path)?;
        let reader = csv::Reader::from_reader(file);

        Ok(Box::new(reader.into_records().map(
            |row| -> Result<SongRecord, DecodeError> {
                let row = row?;
                let title = row
                    .get(TITLE_COLUMN)
                    .ok_or(DecodeError::MissingField("song title"))?;
                let author = row
                    .get(ARTIST_COLUMN)
                    .ok_or(DecodeError::MissingField("artist name"))?;

                Ok(SongRecord {
                    author: author.to_string(),
                    title: title.to_string(),
                })
            },
        )))
    }
}

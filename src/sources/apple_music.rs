//! Apple Music library export decoder
//!
//! The export is a property-list XML file: a top-level `<dict>` whose
//! `Tracks` entry is itself a `<dict>` holding one `<dict>` per track.
//! Inside a track dict, `<key>` elements alternate with value elements
//! (`<string>`, `<integer>`, `<date>`, `<true/>`, `<false/>`); pairing them
//! up in order yields the track's fields.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use super::{DecodeError, RecordIter, SongSource};
use crate::models::SongRecord;

// plist -> library dict -> Tracks dict -> one dict per track
const TRACK_DICT_DEPTH: usize = 3;

/// Decoder for the Apple Music property-list XML export
pub struct AppleMusicSource {
    path: PathBuf,
}

impl AppleMusicSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SongSource for AppleMusicSource {
    fn read(&self) -> Result<RecordIter<'_>, DecodeError> {
        let file = File::open(&self.path)?;
        let mut reader = Reader::from_reader(BufReader::new(file));
        reader.config_mut().trim_text(true);

        Ok(Box::new(TrackIter {
            reader,
            buf: Vec::new(),
            dict_depth: 0,
            capture: None,
            text: String::new(),
            keys: Vec::new(),
            values: Vec::new(),
            done: false,
        }))
    }
}

/// Which element the iterator is currently capturing text for
enum Capture {
    Key,
    Value,
}

/// Streaming iterator over the track entries of one export file
///
/// Advances the underlying XML reader just far enough to assemble the next
/// complete track dict. The file handle is dropped with the iterator, on
/// every exit path.
struct TrackIter<B: BufRead> {
    reader: Reader<B>,
    buf: Vec<u8>,
    dict_depth: usize,
    capture: Option<Capture>,
    text: String,
    keys: Vec<String>,
    values: Vec<String>,
    done: bool,
}

impl<B: BufRead> TrackIter<B> {
    /// Pair up the collected keys and values and pull out the two fields
    /// that make a song record.
    fn finish_track(&mut self) -> Result<SongRecord, DecodeError> {
        let mut fields: HashMap<String, String> = self
            .keys
            .drain(..)
            .zip(self.values.drain(..))
            .collect();

        let author = fields
            .remove("Artist")
            .ok_or(DecodeError::MissingField("Artist"))?;
        let title = fields
            .remove("Name")
            .ok_or(DecodeError::MissingField("Name"))?;

        Ok(SongRecord { author, title })
    }
}

impl<B: BufRead> Iterator for TrackIter<B> {
    type Item = Result<SongRecord, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(e) => {
                    self.done = true;
                    return Some(Err(DecodeError::Xml(e.to_string())));
                }
            };

            match event {
                Event::Start(e) => match e.name().as_ref() {
                    b"dict" => {
                        self.dict_depth += 1;
                        if self.dict_depth == TRACK_DICT_DEPTH {
                            self.keys.clear();
                            self.values.clear();
                        } else if self.dict_depth > TRACK_DICT_DEPTH {
                            // a dict nested inside a track entry is not a
                            // field value we know how to pair up
                            self.done = true;
                            return Some(Err(DecodeError::UnrecognizedElement(
                                "dict".to_string(),
                            )));
                        }
                    }
                    b"key" if self.dict_depth == TRACK_DICT_DEPTH => {
                        self.text.clear();
                        self.capture = Some(Capture::Key);
                    }
                    b"string" | b"integer" | b"date"
                        if self.dict_depth == TRACK_DICT_DEPTH =>
                    {
                        self.text.clear();
                        self.capture = Some(Capture::Value);
                    }
                    // library metadata outside the track entries
                    b"plist" | b"key" | b"string" | b"integer" | b"date" => {}
                    other => {
                        if self.dict_depth == TRACK_DICT_DEPTH {
                            self.done = true;
                            return Some(Err(DecodeError::UnrecognizedElement(
                                String::from_utf8_lossy(other).into_owned(),
                            )));
                        }
                        // skip subtrees the track walk does not visit
                        // (the Playlists array, artwork data, ...)
                        let mut skip = Vec::new();
                        if let Err(e) = self.reader.read_to_end_into(e.name(), &mut skip) {
                            self.done = true;
                            return Some(Err(DecodeError::Xml(e.to_string())));
                        }
                    }
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"true" | b"false" if self.dict_depth == TRACK_DICT_DEPTH => {
                        self.values
                            .push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                    }
                    other => {
                        if self.dict_depth == TRACK_DICT_DEPTH {
                            self.done = true;
                            return Some(Err(DecodeError::UnrecognizedElement(
                                String::from_utf8_lossy(other).into_owned(),
                            )));
                        }
                    }
                },
                Event::Text(t) => {
                    if self.capture.is_some() {
                        match t.unescape() {
                            Ok(text) => self.text.push_str(&text),
                            Err(e) => {
                                self.done = true;
                                return Some(Err(DecodeError::Xml(e.to_string())));
                            }
                        }
                    }
                }
                Event::End(e) => match e.name().as_ref() {
                    b"dict" => {
                        let closing_track = self.dict_depth == TRACK_DICT_DEPTH;
                        self.dict_depth = self.dict_depth.saturating_sub(1);
                        if closing_track {
                            let record = self.finish_track();
                            if record.is_err() {
                                self.done = true;
                            }
                            return Some(record);
                        }
                    }
                    b"key" => {
                        if matches!(self.capture, Some(Capture::Key)) {
                            self.keys.push(std::mem::take(&mut self.text));
                            self.capture = None;
                        }
                    }
                    b"string" | b"integer" | b"date" => {
                        if matches!(self.capture, Some(Capture::Value)) {
                            self.values.push(std::mem::take(&mut self.text));
                            self.capture = None;
                        }
                    }
                    _ => {}
                },
                Event::Eof => {
                    self.done = true;
                    return None;
                }
                _ => {}
            }
        }
    }
}

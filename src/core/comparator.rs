//! Set comparison across two library exports
//!
//! Builds one snapshot (a set of normalized song identities) per source and
//! computes the asymmetric difference. Pure pipeline: no caching, no state
//! between calls beyond the two decoders held here.

use std::collections::HashSet;
use tracing::debug;

use crate::models::SongIdentity;
use crate::sources::{DecodeError, SongSource};

/// Which of the two configured sources to draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSide {
    Reference,
    Candidate,
}

/// Compares a candidate library against a reference library
///
/// `compare` is asymmetric: it reports what the candidate has that the
/// reference lacks, never the other way around.
pub struct SongsComparator<R, C> {
    reference: R,
    candidate: C,
}

impl<R: SongSource, C: SongSource> SongsComparator<R, C> {
    pub fn new(reference: R, candidate: C) -> Self {
        Self {
            reference,
            candidate,
        }
    }

    /// Identities present in the candidate library but absent from the
    /// reference library.
    ///
    /// Snapshots are rebuilt from the decoders on every call; any decode
    /// failure aborts with no partial result.
    pub fn compare(&self) -> Result<HashSet<SongIdentity>, DecodeError> {
        let reference = snapshot(&self.reference)?;
        let candidate = snapshot(&self.candidate)?;

        debug!(
            "reference snapshot: {} songs, candidate snapshot: {} songs",
            reference.len(),
            candidate.len()
        );

        Ok(candidate.difference(&reference).cloned().collect())
    }

    /// Distinct normalized artists across one source's full snapshot
    pub fn distinct_artists(&self, side: SourceSide) -> Result<HashSet<String>, DecodeError> {
        let songs = match side {
            SourceSide::Reference => snapshot(&self.reference)?,
            SourceSide::Candidate => snapshot(&self.candidate)?,
        };

        Ok(songs
            .into_iter()
            .map(|song| song.author().to_string())
            .collect())
    }
}

/// Materialize one source into a set of song identities.
///
/// Duplicate songs collapse silently; a decoder error aborts the whole
/// snapshot.
fn snapshot(source: &dyn SongSource) -> Result<HashSet<SongIdentity>, DecodeError> {
    let mut songs = HashSet::new();
    for record in source.read()? {
        songs.insert(SongIdentity::from(record?));
    }
    Ok(songs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SongRecord;
    use crate::sources::RecordIter;

    /// In-memory stand-in for a decoded export
    struct FakeSource(Vec<(&'static str, &'static str)>);

    impl SongSource for FakeSource {
        fn read(&self) -> Result<RecordIter<'_>, DecodeError> {
            Ok(Box::new(self.0.iter().map(
                |(author, title)| -> Result<SongRecord, DecodeError> {
                    Ok(SongRecord {
                        author: author.to_string(),
                        title: title.to_string(),
                    })
                },
            )))
        }
    }

    /// Source whose stream fails on the second record
    struct BrokenSource;

    impl SongSource for BrokenSource {
        fn read(&self) -> Result<RecordIter<'_>, DecodeError> {
            Ok(Box::new(
                vec![
                    Ok(SongRecord {
                        author: "A".to_string(),
                        title: "B".to_string(),
                    }),
                    Err(DecodeError::MissingField("Artist")),
                ]
                .into_iter(),
            ))
        }
    }

    #[test]
    fn test_identical_sources_yield_empty_difference() {
        let songs = vec![("Johnny Cash", "Hurt"), ("Nina Simone", "Sinnerman")];
        let comparator = SongsComparator::new(FakeSource(songs.clone()), FakeSource(songs));
        assert!(comparator.compare().unwrap().is_empty());
    }

    #[test]
    fn test_difference_is_asymmetric() {
        let reference = FakeSource(vec![("Johnny Cash", "Hurt")]);
        let candidate = FakeSource(vec![("Johnny Cash", "Hurt"), ("Nina Simone", "Sinnerman")]);
        let comparator = SongsComparator::new(reference, candidate);

        let difference = comparator.compare().unwrap();
        assert_eq!(difference.len(), 1);
        assert!(difference.contains(&SongIdentity::new("Nina Simone", "Sinnerman")));
    }

    #[test]
    fn test_cosmetic_variants_do_not_differ() {
        let reference = FakeSource(vec![("Johnny Cash", "Ghost Riders in the Sky")]);
        let candidate = FakeSource(vec![("johnny cash", "Ghost Riders in the Sky (Live)  ")]);
        let comparator = SongsComparator::new(reference, candidate);

        assert!(comparator.compare().unwrap().is_empty());
    }

    #[test]
    fn test_empty_reference_reports_whole_candidate() {
        let comparator = SongsComparator::new(FakeSource(vec![]), FakeSource(vec![("A", "B")]));

        let difference = comparator.compare().unwrap();
        assert_eq!(difference.len(), 1);
        let song = difference.iter().next().unwrap();
        assert_eq!(song.to_string(), "a - b");
    }

    #[test]
    fn test_duplicate_records_collapse() {
        let candidate = FakeSource(vec![
            ("Johnny Cash", "Hurt"),
            ("JOHNNY CASH", "Hurt (Live)"),
        ]);
        let comparator = SongsComparator::new(FakeSource(vec![]), candidate);

        assert_eq!(comparator.compare().unwrap().len(), 1);
    }

    #[test]
    fn test_distinct_artists_collapse_by_author() {
        let candidate = FakeSource(vec![
            ("Johnny Cash", "Hurt"),
            ("Johnny  Cash", "Ghost Riders in the Sky"),
        ]);
        let comparator = SongsComparator::new(FakeSource(vec![]), candidate);

        let artists = comparator
            .distinct_artists(SourceSide::Candidate)
            .unwrap();
        assert_eq!(artists.len(), 1);
        assert!(artists.contains("johnny cash"));
    }

    #[test]
    fn test_decode_failure_propagates_with_no_partial_result() {
        let comparator = SongsComparator::new(FakeSource(vec![]), BrokenSource);
        assert!(matches!(
            comparator.compare(),
            Err(DecodeError::MissingField("Artist"))
        ));
    }
}

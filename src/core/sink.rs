//! Difference output
//!
//! Renders the comparison result to a file, either one song per line or as
//! a JSON array. Ordering is whatever the set iteration yields.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::models::SongIdentity;

/// Output format for the difference file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Write the difference set to `path`
pub fn save_difference(
    difference: &HashSet<SongIdentity>,
    path: &Path,
    format: OutputFormat,
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Text => {
            for song in difference {
                writeln!(writer, "{}", song)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        }
        OutputFormat::Json => {
            let songs: Vec<&SongIdentity> = difference.iter().collect();
            serde_json::to_writer_pretty(&mut writer, &songs)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            writeln!(writer)?;
        }
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_difference() -> HashSet<SongIdentity> {
        let mut songs = HashSet::new();
        songs.insert(SongIdentity::new("Johnny Cash", "Hurt"));
        songs.insert(SongIdentity::new("Nina Simone", "Sinnerman"));
        songs
    }

    #[test]
    fn test_text_output_one_song_per_line() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("difference.txt");

        save_difference(&sample_difference(), &path, OutputFormat::Text).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines: Vec<&str> = content.lines().collect();
        lines.sort_unstable();
        assert_eq!(lines, vec!["johnny cash - hurt", "nina simone - sinnerman"]);
    }

    #[test]
    fn test_json_output_is_an_array_of_objects() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("difference.json");

        save_difference(&sample_difference(), &path, OutputFormat::Json).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        let songs = parsed.as_array().unwrap();
        assert_eq!(songs.len(), 2);
        assert!(songs.iter().all(|s| s.get("author").is_some() && s.get("title").is_some()));
    }

    #[test]
    fn test_empty_difference_writes_empty_file() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("difference.txt");

        save_difference(&HashSet::new(), &path, OutputFormat::Text).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}

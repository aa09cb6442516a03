//! High score persistence - a single plaintext integer on disk.

use bevy::prelude::*;
use std::fs;
use std::io;
use std::path::Path;

pub const HIGH_SCORE_FILE: &str = "highscore.txt";

/// Plugin that loads the persisted high score at startup.
pub struct HighScorePlugin;

impl Plugin for HighScorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HighScore>()
            .add_systems(Startup, load_high_score);
    }
}

/// The best score seen across runs.
#[derive(Resource, Debug, Default)]
pub struct HighScore {
    pub value: u32,
}

pub(crate) fn read_score(path: &Path) -> io::Result<u32> {
    let text = fs::read_to_string(path)?;
    text.trim()
        .parse::<u32>()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

pub(crate) fn write_score(path: &Path, value: u32) -> io::Result<()> {
    fs::write(path, format!("{value}\n"))
}

/// Startup system: a missing file means a fresh start, anything else
/// unreadable is logged and ignored.
fn load_high_score(mut high: ResMut<HighScore>) {
    match read_score(Path::new(HIGH_SCORE_FILE)) {
        Ok(value) => {
            high.value = value;
            info!("loaded high score {value}");
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("no high score file yet, starting at 0");
        }
        Err(e) => {
            warn!("could not read {HIGH_SCORE_FILE}: {e}");
        }
    }
}

/// Write the current high score to disk, creating the file if needed.
/// Failures are logged, not propagated.
pub fn persist(high: &HighScore) {
    if let Err(e) = write_score(Path::new(HIGH_SCORE_FILE), high.value) {
        warn!("could not write {HIGH_SCORE_FILE}: {e}");
    } else {
        info!("high score {} saved", high.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("invaders_{}_{name}", std::process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn score_round_trips_through_the_file() {
        let path = scratch_file("roundtrip");
        write_score(&path, 1230).unwrap();
        assert_eq!(read_score(&path).unwrap(), 1230);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn file_contains_a_single_plaintext_integer() {
        let path = scratch_file("format");
        write_score(&path, 990).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "990\n");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let path = scratch_file("whitespace");
        fs::write(&path, "  420 \n").unwrap();
        assert_eq!(read_score(&path).unwrap(), 420);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_reads_as_not_found() {
        let path = scratch_file("missing");
        let err = read_score(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn garbage_content_reads_as_invalid_data() {
        let path = scratch_file("garbage");
        fs::write(&path, "not a number").unwrap();
        let err = read_score(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn clearing_writes_zero_back() {
        let path = scratch_file("clear");
        write_score(&path, 5000).unwrap();
        write_score(&path, 0).unwrap();
        assert_eq!(read_score(&path).unwrap(), 0);
        let _ = fs::remove_file(&path);
    }
}

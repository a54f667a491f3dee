//! Match scores and their persistence
//!
//! Scores survive round resets. Where they are stored is up to the caller,
//! which injects a [`ScoreStore`] into the director.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::sim::PlayerId;

/// Points per player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    points: [u32; 2],
}

impl ScoreBoard {
    pub fn new(one: u32, two: u32) -> Self {
        Self { points: [one, two] }
    }

    pub fn get(&self, id: PlayerId) -> u32 {
        self.points[id.index()]
    }

    /// Add a point and return the new score
    pub fn award(&mut self, id: PlayerId) -> u32 {
        let score = &mut self.points[id.index()];
        *score = score.saturating_add(1);
        *score
    }

    pub fn clear(&mut self) {
        self.points = [0; 2];
    }

    /// Match winner, if any: a score above `threshold` with a lead of at
    /// least two points
    pub fn winner(&self, threshold: u32) -> Option<PlayerId> {
        PlayerId::ALL.into_iter().find(|&id| {
            let mine = self.get(id);
            let theirs = self.get(id.opponent());
            mine > threshold && mine >= theirs.saturating_add(2)
        })
    }
}

/// Storage backend for the score board
pub trait ScoreStore {
    fn load_scores(&mut self) -> Result<ScoreBoard, StoreError>;
    fn save_scores(&mut self, scores: &ScoreBoard) -> Result<(), StoreError>;
}

/// In-process store; forgets everything on exit
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    scores: ScoreBoard,
    /// Number of saves, for callers checking checkpoints
    pub saves: usize,
}

impl MemoryScoreStore {
    pub fn new(scores: ScoreBoard) -> Self {
        Self { scores, saves: 0 }
    }

    pub fn scores(&self) -> ScoreBoard {
        self.scores
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load_scores(&mut self) -> Result<ScoreBoard, StoreError> {
        Ok(self.scores)
    }

    fn save_scores(&mut self, scores: &ScoreBoard) -> Result<(), StoreError> {
        self.scores = *scores;
        self.saves += 1;
        Ok(())
    }
}

/// Scores kept in a JSON file
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ScoreStore for JsonScoreStore {
    fn load_scores(&mut self) -> Result<ScoreBoard, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => {
                let scores: ScoreBoard = serde_json::from_str(&json)?;
                log::info!(
                    "Loaded scores {}-{} from {}",
                    scores.get(PlayerId::One),
                    scores.get(PlayerId::Two),
                    self.path.display()
                );
                Ok(scores)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No scores at {}, starting fresh", self.path.display());
                Ok(ScoreBoard::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save_scores(&mut self, scores: &ScoreBoard) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(scores)?;
        fs::write(&self.path, json)?;
        log::debug!("Scores saved to {}", self.path.display());
        Ok(())
    }
}

// Named chapters of the page and where each begins on the scroll axis.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chapter {
    Hero,
    About,
    Projects,
    CloudTransition,
    Descent,
    Monastery,
    Carousel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChapterStart {
    pub chapter: Chapter,
    pub start: f32,
}

/// Ordered chapter start thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterMap {
    starts: Vec<ChapterStart>,
}

impl ChapterMap {
    pub fn new(starts: Vec<ChapterStart>) -> Result<Self, EngineError> {
        let map = ChapterMap { starts };
        map.validate()?;
        Ok(map)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let first = self
            .starts
            .first()
            .ok_or_else(|| EngineError::InvalidChapters("no chapters".to_string()))?;
        if first.start != 0.0 {
            return Err(EngineError::InvalidChapters(format!(
                "first chapter {:?} must start at 0, not {}",
                first.chapter, first.start
            )));
        }
        for pair in self.starts.windows(2) {
            if !(pair[1].start > pair[0].start && pair[1].start <= 1.0) {
                return Err(EngineError::InvalidChapters(format!(
                    "{:?} at {} does not follow {:?} at {}",
                    pair[1].chapter, pair[1].start, pair[0].chapter, pair[0].start
                )));
            }
        }
        Ok(())
    }

    /// Last chapter whose start is at or before `progress`.
    pub fn chapter_at(&self, progress: f32) -> Chapter {
        let idx = self.starts.partition_point(|c| c.start <= progress);
        self.starts[idx.saturating_sub(1)].chapter
    }

    pub fn starts(&self) -> &[ChapterStart] {
        &self.starts
    }
}

impl Default for ChapterMap {
    fn default() -> Self {
        let starts = [
            (Chapter::Hero, 0.0),
            (Chapter::About, 0.15),
            (Chapter::Projects, 0.28),
            (Chapter::CloudTransition, 0.40),
            (Chapter::Descent, 0.60),
            (Chapter::Monastery, 0.75),
            (Chapter::Carousel, 0.82),
        ];
        ChapterMap {
            starts: starts
                .iter()
                .map(|&(chapter, start)| ChapterStart { chapter, start })
                .collect(),
        }
    }
}

use serde::{Deserialize, Serialize};

use super::errors::StudentError;
use super::value_objects::{LetterGrade, Score};

// ============================================================================
// Student Entity
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    name: String,
    score: Score,
}

impl Student {
    pub fn new(name: impl Into<String>, score: i32) -> Result<Self, StudentError> {
        Ok(Self {
            name: name.into(),
            score: Score::new(score)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u8 {
        self.score.value()
    }

    pub fn letter_grade(&self) -> LetterGrade {
        self.score.letter_grade()
    }
}

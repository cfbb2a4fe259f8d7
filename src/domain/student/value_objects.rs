use std::fmt;
use serde::{Deserialize, Serialize};

use super::errors::StudentError;

// ============================================================================
// Student Value Objects
// ============================================================================

pub const MAX_SCORE: i32 = 100;

/// Numeric score, always within 0..=MAX_SCORE
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Score(u8);

impl Score {
    pub fn new(value: i32) -> Result<Self, StudentError> {
        match u8::try_from(value) {
            Ok(score) if value <= MAX_SCORE => Ok(Self(score)),
            _ => Err(StudentError::ScoreOutOfRange(value)),
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn letter_grade(&self) -> LetterGrade {
        match self.0 {
            90.. => LetterGrade::A,
            80..=89 => LetterGrade::B,
            70..=79 => LetterGrade::C,
            60..=69 => LetterGrade::D,
            _ => LetterGrade::F,
        }
    }
}

impl TryFrom<i32> for Score {
    type Error = StudentError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for i32 {
    fn from(score: Score) -> Self {
        i32::from(score.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

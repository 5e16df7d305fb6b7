// src/learn/status.rs
//
// Mastery status is never stored independently of the streak: it is always
// recomputed from (streak, threshold). The persisted integer code exists only
// so the records file stays readable by hand.

use std::fmt;

use crate::config::Weights;
use crate::error::LearnError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    NotLearned,
    Learning,
    Mastered,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::NotLearned, Status::Learning, Status::Mastered];

    /// Code used in the records file.
    pub fn code(self) -> i64 {
        match self {
            Status::NotLearned => -1,
            Status::Learning => 0,
            Status::Mastered => 1,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, LearnError> {
        match code {
            -1 => Ok(Status::NotLearned),
            0 => Ok(Status::Learning),
            1 => Ok(Status::Mastered),
            other => Err(LearnError::InvalidStatus(other)),
        }
    }

    pub fn is_mastered(self) -> bool {
        self == Status::Mastered
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::NotLearned => "not learned",
            Status::Learning => "learning",
            Status::Mastered => "mastered",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Streak → status. The mastery boundary is inclusive (`>=`).
pub fn classify(streak: u32, threshold: u32) -> Status {
    if streak == 0 {
        Status::NotLearned
    } else if streak >= threshold {
        Status::Mastered
    } else {
        Status::Learning
    }
}

/// Relative draw weight: not-learned items come up most, mastered least.
pub fn weight(status: Status, weights: &Weights) -> f64 {
    match status {
        Status::NotLearned => weights.bad,
        Status::Learning => weights.neutral,
        Status::Mastered => weights.good,
    }
}

/// Weight for a raw status code as read from disk.
pub fn weight_of_code(code: i64, weights: &Weights) -> Result<f64, LearnError> {
    Ok(weight(Status::from_code(code)?, weights))
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::SchedulerError;

/// The quality of a single review, as reported by the user
///
/// Qualities form an ordered scale with ordinal values 0-3. Ratings below
/// `Good` are lapses: they reset a card's repetition streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReviewQuality {
    /// The card was not recalled at all (ordinal 0)
    Again,

    /// The card was recalled with serious difficulty (ordinal 1)
    Hard,

    /// The card was recalled correctly (ordinal 2)
    Good,

    /// The card was recalled effortlessly (ordinal 3)
    Easy,
}

impl ReviewQuality {
    /// All qualities in ordinal order, for iterating the rating scale
    pub const ALL: [ReviewQuality; 4] = [
        ReviewQuality::Again,
        ReviewQuality::Hard,
        ReviewQuality::Good,
        ReviewQuality::Easy,
    ];

    /// Gets the quality's ordinal value
    ///
    /// ### Returns
    ///
    /// The ordinal (0 for `Again` through 3 for `Easy`)
    pub fn ordinal(self) -> i32 {
        match self {
            ReviewQuality::Again => 0,
            ReviewQuality::Hard => 1,
            ReviewQuality::Good => 2,
            ReviewQuality::Easy => 3,
        }
    }

    /// Gets the quality's display label
    ///
    /// ### Returns
    ///
    /// The label shown to users and stored on cards for audit
    pub fn label(self) -> &'static str {
        match self {
            ReviewQuality::Again => "Again",
            ReviewQuality::Hard => "Hard",
            ReviewQuality::Good => "Good",
            ReviewQuality::Easy => "Easy",
        }
    }

    /// Whether this quality counts as a successful review
    ///
    /// Successful reviews (`Good` and above) extend a card's repetition
    /// streak; anything below is a lapse.
    pub fn is_successful(self) -> bool {
        self >= ReviewQuality::Good
    }
}

impl fmt::Display for ReviewQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl TryFrom<i32> for ReviewQuality {
    type Error = SchedulerError;

    /// Converts a raw rating value into a quality
    ///
    /// This is the validation boundary for caller-supplied ratings: values
    /// outside 0-3 are rejected before any scheduling arithmetic runs.
    ///
    /// ### Errors
    ///
    /// Returns `SchedulerError::InvalidRating` if the value is not in 0-3
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ReviewQuality::Again),
            1 => Ok(ReviewQuality::Hard),
            2 => Ok(ReviewQuality::Good),
            3 => Ok(ReviewQuality::Easy),
            _ => Err(SchedulerError::InvalidRating(value)),
        }
    }
}

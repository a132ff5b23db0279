use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SpectrumError;

pub const SCALE_MIN: f64 = -5.0;
pub const SCALE_MAX: f64 = 5.0;
/// Number of selectable values on the scale, -5.0 through 5.0 in half steps.
pub const SCORE_STEPS: usize = 21;

const MAX_HALVES: i8 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Polarity {
    Feminine,
    Neutral,
    Masculine,
}

impl Polarity {
    pub fn of(value: f64) -> Self {
        if value < 0.0 {
            Self::Feminine
        } else if value > 0.0 {
            Self::Masculine
        } else {
            Self::Neutral
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Feminine => "F",
            Self::Neutral => "",
            Self::Masculine => "M",
        }
    }
}

/// A position on the spectrum, held as a count of half steps so that two
/// scores compare exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Score(i8);

impl Score {
    pub const NEUTRAL: Score = Score(0);
    pub const MIN: Score = Score(-MAX_HALVES);
    pub const MAX: Score = Score(MAX_HALVES);

    pub fn new(value: f64) -> Result<Self, SpectrumError> {
        if !value.is_finite() {
            return Err(SpectrumError::InvalidScore(value.to_string()));
        }
        if !(SCALE_MIN..=SCALE_MAX).contains(&value) {
            return Err(SpectrumError::ScoreOutOfRange(value));
        }
        let halves = value * 2.0;
        if halves.fract() != 0.0 {
            return Err(SpectrumError::ScoreOffStep(value));
        }
        Ok(Self(halves as i8))
    }

    pub fn from_halves(halves: i8) -> Result<Self, SpectrumError> {
        if (-MAX_HALVES..=MAX_HALVES).contains(&halves) {
            Ok(Self(halves))
        } else {
            Err(SpectrumError::ScoreOutOfRange(f64::from(halves) / 2.0))
        }
    }

    /// All 21 scores in ascending order.
    pub fn all() -> impl Iterator<Item = Score> {
        (-MAX_HALVES..=MAX_HALVES).map(Score)
    }

    pub fn halves(self) -> i8 {
        self.0
    }

    pub fn value(self) -> f64 {
        f64::from(self.0) / 2.0
    }

    pub fn polarity(self) -> Polarity {
        Polarity::of(self.value())
    }

    /// Moves by `delta` half steps, stopping at either end of the scale.
    pub fn step(self, delta: i32) -> Self {
        let next = (i32::from(self.0) + delta).clamp(-i32::from(MAX_HALVES), i32::from(MAX_HALVES));
        Self(next as i8)
    }

    /// Slider-style label: magnitude with one decimal plus the polarity letter,
    /// e.g. `4.5F`, `0.0`, `3.0M`.
    pub fn label(self) -> String {
        format!("{:.1}{}", self.value().abs(), self.polarity().suffix())
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl TryFrom<f64> for Score {
    type Error = SpectrumError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Score::new(value)
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> Self {
        score.value()
    }
}

/// Accepts plain numbers (`-4.5`, `3`) and polarity labels (`4.5F`, `3M`).
impl FromStr for Score {
    type Err = SpectrumError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let invalid = || SpectrumError::InvalidScore(raw.to_string());

        let (magnitude, sign) = match trimmed.chars().last() {
            Some('F' | 'f') => (&trimmed[..trimmed.len() - 1], -1.0),
            Some('M' | 'm') => (&trimmed[..trimmed.len() - 1], 1.0),
            _ => {
                let value: f64 = trimmed.parse().map_err(|_| invalid())?;
                return Score::new(value);
            }
        };

        let magnitude: f64 = magnitude.trim().parse().map_err(|_| invalid())?;
        if magnitude.is_sign_negative() {
            return Err(invalid());
        }
        Score::new(sign * magnitude)
    }
}

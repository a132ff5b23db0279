#[derive(Clone, Debug, PartialEq)]
pub enum SpectrumError {
    ScoreOutOfRange(f64),
    ScoreOffStep(f64),
    InvalidScore(String),
    EmptyLabel,
    UnknownPreset(String),
    RowOutOfRange { index: usize, len: usize },
    InvalidRowCount(usize),
    UnsupportedForPolicy(&'static str),
    Export(String),
}

impl std::fmt::Display for SpectrumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ScoreOutOfRange(v) => write!(f, "score {v} is outside the -5..=5 scale"),
            Self::ScoreOffStep(v) => write!(f, "score {v} is not a multiple of 0.5"),
            Self::InvalidScore(raw) => write!(f, "cannot parse score from {raw:?}"),
            Self::EmptyLabel => write!(f, "trait label must not be blank"),
            Self::UnknownPreset(name) => write!(f, "unknown preset {name:?}"),
            Self::RowOutOfRange { index, len } => {
                write!(f, "row {index} out of range (have {len} rows)")
            }
            Self::InvalidRowCount(n) => write!(f, "row count {n} must be between 1 and 20"),
            Self::UnsupportedForPolicy(op) => write!(f, "{op} is not available for this row policy"),
            Self::Export(reason) => write!(f, "chart export failed: {reason}"),
        }
    }
}

impl std::error::Error for SpectrumError {}

use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// FuzzyError
// ─────────────────────────────────────────────────────────────────────────────
//
// 建構期錯誤（InvalidRange / InvalidShape / Unknown* / Duplicate* / RuleParse）
// 屬於設定錯誤，應在 setup 階段直接視為 fatal。
// 呼叫期錯誤（MissingInput / NonFiniteInput / NoActivation / UniverseMismatch）
// 由呼叫方自行決定如何處理。

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuzzyError {
    #[error("invalid universe range: start={start}, stop={stop}, step={step}")]
    InvalidRangeError { start: f64, stop: f64, step: f64 },

    #[error("invalid universe samples: {0}")]
    InvalidSamplesError(String),

    #[error("invalid membership shape: {0}")]
    InvalidShapeError(String),

    #[error("curves are defined over different universes")]
    UniverseMismatchError,

    #[error("missing crisp input for variable '{0}'")]
    MissingInputError(String),

    #[error("crisp input for variable '{0}' is not finite")]
    NonFiniteInput(String),

    #[error("aggregated set has zero total activation")]
    NoActivationError,

    #[error("nothing to aggregate")]
    EmptyAggregation,

    #[error("unknown linguistic variable '{0}'")]
    UnknownVariable(String),

    #[error("unknown term '{term}' for variable '{variable}'")]
    UnknownTerm { variable: String, term: String },

    #[error("duplicate linguistic variable '{0}'")]
    DuplicateVariable(String),

    #[error("duplicate term '{term}' for variable '{variable}'")]
    DuplicateTerm { variable: String, term: String },

    #[error("rule parse error at token {position}: {message}")]
    RuleParseError { position: usize, message: String },
}

impl FuzzyError {
    pub fn invalid_shape(points: &[f64]) -> FuzzyError {
        FuzzyError::InvalidShapeError(format!(
            "control points {:?} must be finite and non-decreasing",
            points
        ))
    }

    pub fn rule_parse(position: usize, message: impl Into<String>) -> FuzzyError {
        FuzzyError::RuleParseError { position, message: message.into() }
    }
}

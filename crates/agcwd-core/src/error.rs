#[derive(Debug, thiserror::Error)]
pub enum AgcwdError {
    #[error("image has no pixels")]
    EmptyImage,
    #[error("shape mismatch: expected {expected}, got {actual}")]
    InvalidShape { expected: String, actual: String },
    #[error("weight {0} is outside (0, 1]")]
    InvalidWeight(f32),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub(crate) fn shape_error(expected: impl ToString, actual: impl ToString) -> AgcwdError {
    AgcwdError::InvalidShape {
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}

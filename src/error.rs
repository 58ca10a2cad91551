use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum AssignError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("palette generation failed: {message}")]
    PaletteGeneration {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("assignment failed during {stage}: {message}")]
    Internal { stage: &'static str, message: String },
}

impl AssignError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::PaletteGeneration {
            message: message.into(),
            source: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AssignError>;

impl From<AssignError> for napi::Error {
    fn from(err: AssignError) -> Self {
        let status = match err {
            AssignError::InvalidInput(_) => napi::Status::InvalidArg,
            _ => napi::Status::GenericFailure,
        };
        napi::Error::new(status, err.to_string())
    }
}

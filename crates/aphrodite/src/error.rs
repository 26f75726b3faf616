use thiserror::Error;

/// Errors reported by a [`PositionProvider`](crate::ephemeris::PositionProvider).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Unknown body: {0}")]
    UnknownBody(String),
    #[error("Julian day {jd} is outside the range covered for {body}")]
    OutOfRange { body: String, jd: f64 },
    #[error("Failed to calculate position for {body} at JD {jd}: {message}")]
    Failed {
        body: String,
        jd: f64,
        message: String,
    },
}

/// Errors that can occur during aspect, pattern and timing calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Body {body} cannot form an aspect with itself")]
    SelfPair { body: String },
    #[error("Position lookup failed: {0}")]
    Provider(#[from] ProviderError),
    #[error("Aspect type {kind} is not usable: {reason}")]
    Configuration { kind: String, reason: String },
    #[error("No position sample succeeded for {body} between JD {start_jd} and JD {end_jd}")]
    NoSamples {
        body: String,
        start_jd: f64,
        end_jd: f64,
    },
    #[error("Julian day {0} is outside the supported calendar range")]
    DateOutOfRange(f64),
}

use thiserror::Error;

/// Errors raised when building, updating, or reading an EIH engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("no providers were given for body `{0}`")]
    UnknownBody(String),

    #[error("providers for body `{0}` were given more than once")]
    DuplicateBody(String),

    #[error("body `{0}` appears more than once in the same body list")]
    DuplicateListEntry(String),

    #[error("gravitational parameter of `{body}` is not finite: {value}")]
    InvalidGravitationalParameter { body: String, value: f64 },

    #[error("state of `{0}` has non-finite components")]
    NonFiniteState(String),

    #[error("PPN parameter {parameter} is not finite: {value}")]
    InvalidPpnParameter { parameter: &'static str, value: f64 },

    #[error("bodies `{first}` and `{second}` coincide")]
    CoincidentBodies { first: String, second: String },

    #[error("EIH engine was read before its first update")]
    NotUpdated,

    #[error("body index {index} is out of range for {count} bodies")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("body {0} cannot be paired with itself")]
    SelfPair(usize),

    #[error("pair ({first}, {second}) has no accelerating body and is not evaluated")]
    UnevaluatedPair { first: usize, second: usize },

    #[error("`{0}` is not an accelerated body")]
    NotAccelerated(String),

    #[error("`{0}` is not an accelerating body")]
    NotAccelerating(String),

    #[error("shared EIH engine is unavailable because its lock was poisoned")]
    EngineUnavailable,
}

use std::{
    error::Error,
    fmt::{self, Display},
};

use rand_distr::uniform::Error as UniformError;

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum MlErr {
    /// A shape invariant was violated (e.g. a feature width that doesn't match a layer).
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// A label doesn't index any of the model's output classes.
    LabelOutOfRange { label: usize, classes: usize },
    /// An operation that needs at least one element received none.
    EmptyInput(&'static str),
    /// A parameter generator couldn't be built from the given distribution arguments.
    InvalidParam(String),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch for {what}, got {got} and expected {expected}"
            ),
            MlErr::LabelOutOfRange { label, classes } => write!(
                f,
                "Label {label} is out of range for a model with {classes} classes"
            ),
            MlErr::EmptyInput(what) => write!(f, "Expected a non empty {what}"),
            MlErr::InvalidParam(msg) => write!(f, "Invalid parameter generator: {msg}"),
        }
    }
}

impl Error for MlErr {}

impl From<UniformError> for MlErr {
    fn from(value: UniformError) -> Self {
        Self::InvalidParam(value.to_string())
    }
}

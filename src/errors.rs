use thiserror::Error;

/// Integer division or modulo with a zero divisor
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("Divide by zero")]
pub struct DivideByZero;

/// Sequence index outside of `-len..len`
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("Index {index} out of range for sequence of length {len}")]
pub struct IndexError {
    pub index: isize,
    pub len: usize,
}

/// Argument of the right type but an unusable value
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct ValueError(pub String);

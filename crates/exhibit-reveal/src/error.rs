//! Reveal error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RevealError {
    #[error("Reveal threshold must be within (0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("Invalid bounds for element {element}: {reason}")]
    InvalidBounds { element: usize, reason: String },
}

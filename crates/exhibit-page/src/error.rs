//! Page error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! Panel error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Unknown tab: {0}")]
    UnknownTab(String),

    #[error("Panel requires a Tokio runtime: {0}")]
    NoRuntime(String),
}

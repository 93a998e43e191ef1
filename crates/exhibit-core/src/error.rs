//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] exhibit_content::FetchError),

    #[error("Page error: {0}")]
    Page(#[from] exhibit_page::PageError),

    #[error("Panel error: {0}")]
    Panel(#[from] exhibit_panel::PanelError),

    #[error("Reveal error: {0}")]
    Reveal(#[from] exhibit_reveal::RevealError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

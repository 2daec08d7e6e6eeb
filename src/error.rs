use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvupError {
    #[error("Update search failed: {0}")]
    Search(String),

    #[error("Update download failed: {0}")]
    Download(String),

    #[error("Update installation failed: {0}")]
    Install(String),

    #[error("Reboot failed: {0}")]
    Reboot(String),

    #[error("Event log write failed: {0}")]
    Notification(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Diagnostics installer failed: {0}")]
    Diagnostics(String),

    #[error("PowerShell execution failed: {0}")]
    PowerShell(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProvupError>;

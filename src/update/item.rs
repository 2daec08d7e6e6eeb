use serde::Deserialize;
use std::fmt;

/// A single pending update as reported by the update service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItem {
    pub id: String,
    pub title: String,
    pub is_downloaded: bool,
    pub is_installed: bool,
}

impl UpdateItem {
    /// Needs a download before it can be installed
    pub fn needs_download(&self) -> bool {
        !self.is_downloaded
    }

    /// Downloaded and waiting for installation
    pub fn ready_to_install(&self) -> bool {
        self.is_downloaded && !self.is_installed
    }
}

#[cfg(test)]
impl UpdateItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            is_downloaded: false,
            is_installed: false,
        }
    }

    pub fn downloaded(mut self, value: bool) -> Self {
        self.is_downloaded = value;
        self
    }

    pub fn installed(mut self, value: bool) -> Self {
        self.is_installed = value;
        self
    }
}

/// Outcome classification returned by the install subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    NotStarted,
    InProgress,
    Succeeded,
    SucceededWithErrors,
    Failed,
    Aborted,
    Unknown,
}

impl ResultCode {
    /// Map the raw integer code; anything outside 0..=5 is `Unknown`.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => ResultCode::NotStarted,
            1 => ResultCode::InProgress,
            2 => ResultCode::Succeeded,
            3 => ResultCode::SucceededWithErrors,
            4 => ResultCode::Failed,
            5 => ResultCode::Aborted,
            _ => ResultCode::Unknown,
        }
    }
}

impl From<i64> for ResultCode {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResultCode::NotStarted => "Not Started",
            ResultCode::InProgress => "In Progress",
            ResultCode::Succeeded => "Succeeded",
            ResultCode::SucceededWithErrors => "Succeeded With Errors",
            ResultCode::Failed => "Failed",
            ResultCode::Aborted => "Aborted",
            ResultCode::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

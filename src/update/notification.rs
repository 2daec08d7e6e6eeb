use crate::update::item::ResultCode;
use regex::Regex;
use std::sync::LazyLock;

/// Maximum number of characters written into one event entry
pub const MAX_EVENT_BODY_CHARS: usize = 2048;

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*(?:[\r\n]+[ \t]*)+").expect("valid line break pattern"));

/// Event ids written to the notification sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventId {
    DownloadQueued,
    InstallSucceeded,
    InstallSucceededWithErrors,
    InstallFailed,
    InstallAborted,
    InstallOther,
    SummaryCleanSuccess,
    Summary,
}

impl EventId {
    pub fn id(self) -> u32 {
        match self {
            EventId::DownloadQueued => 100,
            EventId::InstallSucceeded => 200,
            EventId::InstallSucceededWithErrors => 201,
            EventId::InstallFailed => 202,
            EventId::InstallAborted => 203,
            EventId::InstallOther => 204,
            EventId::SummaryCleanSuccess => 300,
            EventId::Summary => 301,
        }
    }

    pub fn for_install(code: ResultCode) -> Self {
        match code {
            ResultCode::Succeeded => EventId::InstallSucceeded,
            ResultCode::SucceededWithErrors => EventId::InstallSucceededWithErrors,
            ResultCode::Failed => EventId::InstallFailed,
            ResultCode::Aborted => EventId::InstallAborted,
            _ => EventId::InstallOther,
        }
    }

    pub fn for_summary(clean_success: bool) -> Self {
        if clean_success {
            EventId::SummaryCleanSuccess
        } else {
            EventId::Summary
        }
    }
}

/// Collapse line breaks into single spaces and cap the length.
pub fn single_line(body: &str) -> String {
    let collapsed = LINE_BREAKS.replace_all(body.trim(), " ");
    collapsed.chars().take(MAX_EVENT_BODY_CHARS).collect()
}

use crate::error::{ProvupError, Result};
use crate::update::NotificationSink;
use crate::utils::process;

/// Highest id `eventcreate` accepts
const MAX_EVENT_ID: u32 = 1000;

/// Writes INFORMATION entries to the Windows event log through `eventcreate`.
pub struct EventLogSink {
    log_name: String,
    source: String,
}

impl EventLogSink {
    pub fn new(log_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            log_name: log_name.into(),
            source: source.into(),
        }
    }

    fn arguments<'a>(&'a self, id: &'a str, message: &'a str) -> Vec<&'a str> {
        vec![
            "/L",
            self.log_name.as_str(),
            "/T",
            "INFORMATION",
            "/SO",
            self.source.as_str(),
            "/ID",
            id,
            "/D",
            message,
        ]
    }
}

impl NotificationSink for EventLogSink {
    fn notify(&self, event_id: u32, message: &str) -> Result<()> {
        if event_id == 0 || event_id > MAX_EVENT_ID {
            return Err(ProvupError::Notification(format!(
                "event id {event_id} outside 1..={MAX_EVENT_ID}"
            )));
        }

        let id = event_id.to_string();
        let output = process::run("eventcreate", &self.arguments(&id, message))
            .map_err(|e| ProvupError::Notification(format!("Failed to run eventcreate: {e}")))?;

        if !output.status.success() {
            return Err(ProvupError::Notification(format!(
                "eventcreate failed: {}",
                process::failure_detail(&output)
            )));
        }
        Ok(())
    }
}

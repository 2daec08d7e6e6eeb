use crate::error::Result;
use crate::update::item::UpdateItem;
use crate::update::outcome::InstallResult;

/// Search filter understood by the update service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFilter {
    NotInstalled,
}

impl SearchFilter {
    pub fn criteria(self) -> &'static str {
        match self {
            SearchFilter::NotInstalled => "IsInstalled=0",
        }
    }
}

pub trait UpdateSearcher {
    fn search(&self, filter: SearchFilter) -> Result<Vec<UpdateItem>>;
}

/// Downloads a batch in one blocking call, marking items as downloaded.
pub trait UpdateDownloader {
    fn download(&self, items: &mut [&mut UpdateItem]) -> Result<()>;
}

/// Installs a batch in one blocking call.
///
/// The returned per-item results must follow the order of `items`.
pub trait UpdateInstaller {
    fn install(&self, items: &mut [&mut UpdateItem]) -> Result<InstallResult>;
}

/// Append-only plain-text run log
pub trait RunLog {
    fn write(&self, message: &str);
}

/// OS-level event log used for user-visible status entries
pub trait NotificationSink {
    fn notify(&self, event_id: u32, message: &str) -> Result<()>;
}

pub trait RebootTrigger {
    fn reboot(&self) -> Result<()>;
}

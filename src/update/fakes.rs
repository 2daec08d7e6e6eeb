// In-memory stand-ins for the update service and the sinks. Every call is
// recorded so tests can assert exact sequences.

use std::cell::RefCell;

use crate::error::{ProvupError, Result};
use crate::update::collaborators::{
    NotificationSink, RebootTrigger, RunLog, SearchFilter, UpdateDownloader, UpdateInstaller,
    UpdateSearcher,
};
use crate::update::item::{ResultCode, UpdateItem};
use crate::update::outcome::InstallResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search,
    Download(Vec<String>),
    Install(Vec<String>),
}

pub struct FakeUpdateService {
    items: Vec<UpdateItem>,
    install_result: Option<InstallResult>,
    search_error: Option<String>,
    download_error: Option<String>,
    install_error: Option<String>,
    calls: RefCell<Vec<Call>>,
}

impl FakeUpdateService {
    pub fn new(items: Vec<UpdateItem>) -> Self {
        Self {
            items,
            install_result: None,
            search_error: None,
            download_error: None,
            install_error: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_install_result(mut self, result: InstallResult) -> Self {
        self.install_result = Some(result);
        self
    }

    pub fn failing_search(mut self, message: &str) -> Self {
        self.search_error = Some(message.to_string());
        self
    }

    pub fn failing_download(mut self, message: &str) -> Self {
        self.download_error = Some(message.to_string());
        self
    }

    pub fn failing_install(mut self, message: &str) -> Self {
        self.install_error = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn ids(items: &[&mut UpdateItem]) -> Vec<String> {
        items.iter().map(|item| item.id.clone()).collect()
    }
}

impl UpdateSearcher for FakeUpdateService {
    fn search(&self, filter: SearchFilter) -> Result<Vec<UpdateItem>> {
        assert_eq!(filter, SearchFilter::NotInstalled);
        self.calls.borrow_mut().push(Call::Search);
        if let Some(message) = &self.search_error {
            return Err(ProvupError::Search(message.clone()));
        }
        Ok(self.items.clone())
    }
}

impl UpdateDownloader for FakeUpdateService {
    fn download(&self, items: &mut [&mut UpdateItem]) -> Result<()> {
        self.calls.borrow_mut().push(Call::Download(Self::ids(items)));
        if let Some(message) = &self.download_error {
            return Err(ProvupError::Download(message.clone()));
        }
        for item in items.iter_mut() {
            item.is_downloaded = true;
        }
        Ok(())
    }
}

impl UpdateInstaller for FakeUpdateService {
    fn install(&self, items: &mut [&mut UpdateItem]) -> Result<InstallResult> {
        self.calls.borrow_mut().push(Call::Install(Self::ids(items)));
        if let Some(message) = &self.install_error {
            return Err(ProvupError::Install(message.clone()));
        }
        let result = self.install_result.clone().ok_or_else(|| {
            ProvupError::Install("no install result configured".to_string())
        })?;
        for (item, item_result) in items.iter_mut().zip(&result.item_results) {
            item.is_installed = matches!(
                item_result.result_code,
                ResultCode::Succeeded | ResultCode::SucceededWithErrors
            );
        }
        Ok(result)
    }
}

/// One side effect observed by the sinks, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Log(String),
    Event(u32, String),
    Reboot,
}

/// Captures run log lines, notification entries and reboot requests in a
/// single journal.
#[derive(Default)]
pub struct Recorder {
    journal: RefCell<Vec<Entry>>,
    fail_events: bool,
}

impl Recorder {
    pub fn failing_events(mut self) -> Self {
        self.fail_events = true;
        self
    }

    pub fn journal(&self) -> Vec<Entry> {
        self.journal.borrow().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.journal
            .borrow()
            .iter()
            .filter_map(|entry| match entry {
                Entry::Log(line) => Some(line.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn events(&self) -> Vec<(u32, String)> {
        self.journal
            .borrow()
            .iter()
            .filter_map(|entry| match entry {
                Entry::Event(id, body) => Some((*id, body.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn reboots(&self) -> usize {
        self.journal
            .borrow()
            .iter()
            .filter(|entry| matches!(entry, Entry::Reboot))
            .count()
    }
}

impl RunLog for Recorder {
    fn write(&self, message: &str) {
        self.journal
            .borrow_mut()
            .push(Entry::Log(message.to_string()));
    }
}

impl NotificationSink for Recorder {
    fn notify(&self, event_id: u32, message: &str) -> Result<()> {
        if self.fail_events {
            return Err(ProvupError::Notification("event source missing".to_string()));
        }
        self.journal
            .borrow_mut()
            .push(Entry::Event(event_id, message.to_string()));
        Ok(())
    }
}

impl RebootTrigger for Recorder {
    fn reboot(&self) -> Result<()> {
        self.journal.borrow_mut().push(Entry::Reboot);
        Ok(())
    }
}

use crate::config::RebootPolicy;
use crate::error::Result;
use crate::update::collaborators::{
    NotificationSink, RebootTrigger, RunLog, SearchFilter, UpdateDownloader, UpdateInstaller,
    UpdateSearcher,
};
use crate::update::item::{ResultCode, UpdateItem};
use crate::update::notification::{EventId, single_line};
use crate::update::outcome::{BatchOutcome, ItemOutcome, pair_results};

/// How a run that did not fail came to an end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The search returned nothing
    NoUpdates,
    /// Updates were found but none ended up downloaded and uninstalled
    NothingToInstall,
    Installed { batch: BatchOutcome, rebooted: bool },
}

/// Items that still need downloading, in discovery order.
pub fn download_set(items: &mut [UpdateItem]) -> Vec<&mut UpdateItem> {
    items.iter_mut().filter(|item| item.needs_download()).collect()
}

/// Items downloaded but not installed, in discovery order.
pub fn install_set(items: &mut [UpdateItem]) -> Vec<&mut UpdateItem> {
    items
        .iter_mut()
        .filter(|item| item.ready_to_install())
        .collect()
}

/// Drives one search, download and install pass against the update service.
pub struct UpdateOrchestrator<'a> {
    searcher: &'a dyn UpdateSearcher,
    downloader: &'a dyn UpdateDownloader,
    installer: &'a dyn UpdateInstaller,
    log: &'a dyn RunLog,
    events: &'a dyn NotificationSink,
    reboot: &'a dyn RebootTrigger,
    reboot_policy: RebootPolicy,
}

impl<'a> UpdateOrchestrator<'a> {
    pub fn new(
        searcher: &'a dyn UpdateSearcher,
        downloader: &'a dyn UpdateDownloader,
        installer: &'a dyn UpdateInstaller,
        log: &'a dyn RunLog,
        events: &'a dyn NotificationSink,
        reboot: &'a dyn RebootTrigger,
    ) -> Self {
        Self {
            searcher,
            downloader,
            installer,
            log,
            events,
            reboot,
            reboot_policy: RebootPolicy::default(),
        }
    }

    pub fn with_reboot_policy(mut self, policy: RebootPolicy) -> Self {
        self.reboot_policy = policy;
        self
    }

    /// Run the whole pass. Any error aborts immediately; the caller reports it.
    pub fn run(&self) -> Result<RunOutcome> {
        let mut items = self.searcher.search(SearchFilter::NotInstalled)?;
        if items.is_empty() {
            self.log.write("No missing updates found");
            return Ok(RunOutcome::NoUpdates);
        }
        self.log
            .write(&format!("Found {} missing update(s)", items.len()));

        self.download_pending(&mut items)?;

        let mut to_install = install_set(&mut items);
        if to_install.is_empty() {
            self.log.write("No updates ready to install");
            return Ok(RunOutcome::NothingToInstall);
        }

        self.log
            .write(&format!("Installing {} update(s)", to_install.len()));
        let result = self.installer.install(&mut to_install)?;
        let submitted: Vec<UpdateItem> = to_install.iter().map(|item| (**item).clone()).collect();

        let mut outcomes = Vec::with_capacity(submitted.len());
        for (item, item_result) in pair_results(&submitted, &result)? {
            self.report_item(item, item_result.result_code);
            outcomes.push(ItemOutcome {
                item: item.clone(),
                result_code: item_result.result_code,
                reboot_required: item_result.reboot_required,
            });
        }

        let batch = BatchOutcome {
            result_code: result.result_code,
            reboot_required: result.reboot_required,
            items: outcomes,
        };
        self.report_batch(&batch);

        let rebooted = self.apply_reboot_policy(&batch)?;
        Ok(RunOutcome::Installed { batch, rebooted })
    }

    fn download_pending(&self, items: &mut [UpdateItem]) -> Result<()> {
        let mut to_download = download_set(items);
        for item in &to_download {
            let message = format!("Queued for download: {}", item.title);
            self.log.write(&message);
            self.notify(EventId::DownloadQueued, &message);
        }

        if to_download.is_empty() {
            return Ok(());
        }

        self.log
            .write(&format!("Downloading {} update(s)", to_download.len()));
        self.downloader.download(&mut to_download)?;
        self.log.write("Download complete");
        Ok(())
    }

    fn report_item(&self, item: &UpdateItem, code: ResultCode) {
        let message = format!("{}: {}", item.title, code);
        self.log.write(&message);
        if code == ResultCode::SucceededWithErrors && is_defender_update(item) {
            self.log.write(&format!(
                "{}: SucceededWithErrors is expected for Defender updates",
                item.title
            ));
        }
        self.notify(EventId::for_install(code), &message);
    }

    fn report_batch(&self, batch: &BatchOutcome) {
        let message = format!(
            "Installation result: {}, reboot required: {}",
            batch.result_code, batch.reboot_required
        );
        self.log.write(&message);
        self.notify(EventId::for_summary(batch.is_clean_success()), &message);
    }

    fn apply_reboot_policy(&self, batch: &BatchOutcome) -> Result<bool> {
        if !batch.reboot_required {
            return Ok(false);
        }

        match self.reboot_policy {
            RebootPolicy::Immediate => {
                self.log.write("Reboot required; restarting now");
                self.reboot.reboot()?;
                Ok(true)
            }
            RebootPolicy::Suppress => {
                self.log
                    .write("Reboot required; reboot suppressed by configuration");
                Ok(false)
            }
        }
    }

    fn notify(&self, event: EventId, message: &str) {
        let body = single_line(message);
        if let Err(e) = self.events.notify(event.id(), &body) {
            self.log
                .write(&format!("Failed to write event {}: {e}", event.id()));
        }
    }
}

fn is_defender_update(item: &UpdateItem) -> bool {
    item.title.to_lowercase().contains("defender")
}

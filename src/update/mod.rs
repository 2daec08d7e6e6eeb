// Update batch orchestration: discover pending updates, download what is
// missing, install what is staged, and report every outcome.
//
// - item: UpdateItem and ResultCode
// - outcome: install results, per-item and batch outcomes, positional pairing
// - collaborators: seams to the update service and the log/event/reboot sinks
// - notification: event ids and single-line event bodies
// - orchestrator: the run itself
pub mod collaborators;
pub mod item;
pub mod notification;
pub mod orchestrator;
pub mod outcome;

#[cfg(test)]
pub(crate) mod fakes;

pub use collaborators::{
    NotificationSink, RebootTrigger, RunLog, SearchFilter, UpdateDownloader, UpdateInstaller,
    UpdateSearcher,
};
pub use item::{ResultCode, UpdateItem};
pub use orchestrator::{RunOutcome, UpdateOrchestrator};
pub use outcome::{InstallResult, ItemResult};

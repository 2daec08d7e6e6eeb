pub mod event_log;
pub mod reboot;
pub mod run_log;

pub use event_log::EventLogSink;
pub use reboot::ShutdownReboot;
pub use run_log::FileRunLog;

use crate::error::Result;
use crate::update::RunLog;
use jiff::Zoned;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Plain-text run log: one timestamped line per message, echoed to stdout.
pub struct FileRunLog {
    path: PathBuf,
}

impl FileRunLog {
    /// Open the log, creating its directory if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn format_line(message: &str) -> String {
        let timestamp = Zoned::now().strftime("%Y-%m-%d %H:%M:%S");
        format!("[{timestamp}] {message}")
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }
}

impl RunLog for FileRunLog {
    fn write(&self, message: &str) {
        let line = Self::format_line(message);
        println!("{line}");
        if let Err(e) = self.append(&line) {
            tracing::warn!(path = %self.path.display(), "failed to append to run log: {e}");
        }
    }
}

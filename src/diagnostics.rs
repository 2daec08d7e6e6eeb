use crate::error::{ProvupError, Result};
use crate::utils::process;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use reqwest::tls;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Downloads a vendor installer over HTTPS and runs it silently.
pub struct DiagnosticsInstaller {
    client: Client,
    args: Vec<String>,
    download_dir: PathBuf,
}

impl DiagnosticsInstaller {
    pub fn new(args: Vec<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .user_agent("provup")
            .https_only(true)
            .min_tls_version(tls::Version::TLS_1_2)
            .build()
            .map_err(|e| ProvupError::Io(std::io::Error::other(e)))?;

        Ok(Self {
            client,
            args,
            download_dir: std::env::temp_dir(),
        })
    }

    /// Download, install, and always remove the downloaded package.
    pub fn install(&self, raw_url: &str) -> Result<()> {
        let url = validate_url(raw_url)?;
        let path = self.download_dir.join(installer_file_name(&url)?);

        let result = self
            .download(&url, &path)
            .and_then(|()| self.execute(&path));

        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                tracing::warn!(path = %path.display(), "failed to remove installer: {e}");
            }
        }

        result
    }

    fn download(&self, url: &Url, path: &Path) -> Result<()> {
        tracing::debug!(%url, path = %path.display(), "downloading installer");

        let mut response = self
            .client
            .get(url.as_str())
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| ProvupError::Diagnostics(format!("Download of {url} failed: {e}")))?;

        let pb = match response.content_length() {
            Some(len) => {
                let pb = ProgressBar::new(len);
                pb.set_style(
                    ProgressStyle::with_template(
                        "  [{bar:40}] {bytes}/{total_bytes} ({bytes_per_sec})",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-"),
                );
                pb
            }
            None => ProgressBar::new_spinner(),
        };

        let mut file = File::create(path)?;
        std::io::copy(&mut response, &mut pb.wrap_write(&mut file))?;
        pb.finish_and_clear();
        Ok(())
    }

    fn execute(&self, path: &Path) -> Result<()> {
        let (program, args) = silent_command(path, &self.args);
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

        let output = process::run(&program, &arg_refs)
            .map_err(|e| ProvupError::Diagnostics(format!("Failed to start installer: {e}")))?;
        if !output.status.success() {
            return Err(ProvupError::Diagnostics(format!(
                "installer failed with {}",
                process::failure_detail(&output)
            )));
        }
        Ok(())
    }
}

fn validate_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| ProvupError::Config(format!("Invalid installer URL '{raw}': {e}")))?;
    if url.scheme() != "https" {
        return Err(ProvupError::Config(format!(
            "Installer URL must use https, got '{}'",
            url.scheme()
        )));
    }
    Ok(url)
}

/// Local file name for the package, taken from the last URL segment.
fn installer_file_name(url: &Url) -> Result<String> {
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();

    let name: String = segment
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => c,
            _ => '_',
        })
        .collect();

    if name.trim_matches(['.', '_']).is_empty() {
        return Err(ProvupError::Config(format!(
            "Installer URL '{url}' does not name a file"
        )));
    }
    Ok(name)
}

/// `.msi` packages go through msiexec; anything else runs directly.
fn silent_command(path: &Path, args: &[String]) -> (String, Vec<String>) {
    let is_msi = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("msi"));
    let path = path.to_string_lossy().into_owned();

    if is_msi {
        (
            "msiexec".to_string(),
            vec![
                "/i".to_string(),
                path,
                "/qn".to_string(),
                "/norestart".to_string(),
            ],
        )
    } else {
        (path, args.to_vec())
    }
}

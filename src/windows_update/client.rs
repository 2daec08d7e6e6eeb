use crate::error::{ProvupError, Result};
use crate::update::{
    InstallResult, ItemResult, ResultCode, SearchFilter, UpdateDownloader, UpdateInstaller,
    UpdateItem, UpdateSearcher,
};
use crate::windows_update::powershell::PowerShell;
use crate::windows_update::scripts;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static UPDATE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12}$")
        .expect("valid update id pattern")
});

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemState {
    id: String,
    is_downloaded: bool,
    is_installed: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstallReport {
    result_code: i64,
    reboot_required: bool,
    items: Vec<ItemReport>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemReport {
    id: String,
    result_code: i64,
    reboot_required: bool,
    is_installed: bool,
}

/// Windows Update Agent client, driven through PowerShell.
#[derive(Default)]
pub struct WindowsUpdateClient {
    shell: PowerShell,
}

impl WindowsUpdateClient {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UpdateSearcher for WindowsUpdateClient {
    fn search(&self, filter: SearchFilter) -> Result<Vec<UpdateItem>> {
        let script = scripts::SEARCH.replace(scripts::CRITERIA_PLACEHOLDER, filter.criteria());
        self.shell
            .run_json(&script)
            .map_err(|e| ProvupError::Search(e.to_string()))
    }
}

impl UpdateDownloader for WindowsUpdateClient {
    fn download(&self, items: &mut [&mut UpdateItem]) -> Result<()> {
        let script = scripts::download().replace(scripts::IDS_PLACEHOLDER, &ids_literal(items)?);
        let states: Vec<ItemState> = self
            .shell
            .run_json(&script)
            .map_err(|e| ProvupError::Download(e.to_string()))?;

        apply_states(items, &states).map_err(ProvupError::Download)
    }
}

impl UpdateInstaller for WindowsUpdateClient {
    fn install(&self, items: &mut [&mut UpdateItem]) -> Result<InstallResult> {
        let script = scripts::install().replace(scripts::IDS_PLACEHOLDER, &ids_literal(items)?);
        let report: InstallReport = self
            .shell
            .run_json(&script)
            .map_err(|e| ProvupError::Install(e.to_string()))?;

        apply_install_report(items, report).map_err(ProvupError::Install)
    }
}

/// Render validated update ids as a PowerShell array body: `'a','b'`.
fn ids_literal(items: &[&mut UpdateItem]) -> Result<String> {
    let mut quoted = Vec::with_capacity(items.len());
    for item in items {
        if !UPDATE_ID.is_match(&item.id) {
            return Err(ProvupError::PowerShell(format!(
                "Refusing malformed update id '{}'",
                item.id
            )));
        }
        quoted.push(format!("'{}'", item.id));
    }
    Ok(quoted.join(","))
}

fn check_alignment(
    submitted: &str,
    reported: &str,
    index: usize,
) -> std::result::Result<(), String> {
    if submitted.eq_ignore_ascii_case(reported) {
        Ok(())
    } else {
        Err(format!(
            "result {index} is for update {reported}, expected {submitted}"
        ))
    }
}

fn apply_states(
    items: &mut [&mut UpdateItem],
    states: &[ItemState],
) -> std::result::Result<(), String> {
    if items.len() != states.len() {
        return Err(format!(
            "service reported {} states for {} updates",
            states.len(),
            items.len()
        ));
    }

    for (index, (item, state)) in items.iter_mut().zip(states).enumerate() {
        check_alignment(&item.id, &state.id, index)?;
        item.is_downloaded = state.is_downloaded;
        item.is_installed = state.is_installed;
    }
    Ok(())
}

fn apply_install_report(
    items: &mut [&mut UpdateItem],
    report: InstallReport,
) -> std::result::Result<InstallResult, String> {
    if items.len() != report.items.len() {
        return Err(format!(
            "service reported {} results for {} updates",
            report.items.len(),
            items.len()
        ));
    }

    let mut item_results = Vec::with_capacity(report.items.len());
    for (index, (item, entry)) in items.iter_mut().zip(&report.items).enumerate() {
        check_alignment(&item.id, &entry.id, index)?;
        item.is_installed = entry.is_installed;
        item_results.push(ItemResult {
            result_code: ResultCode::from_code(entry.result_code),
            reboot_required: entry.reboot_required,
        });
    }

    Ok(InstallResult {
        result_code: ResultCode::from_code(report.result_code),
        reboot_required: report.reboot_required,
        item_results,
    })
}

use crate::error::{ProvupError, Result};
use crate::update::item::{ResultCode, UpdateItem};

/// Result for one entry of an install call, addressed by submission index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemResult {
    pub result_code: ResultCode,
    pub reboot_required: bool,
}

/// What a single install call reports back.
///
/// `item_results[i]` belongs to the i-th item of the submitted install set.
/// The overall code and reboot flag come from the call itself and are not
/// derived from the per-item entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallResult {
    pub result_code: ResultCode,
    pub reboot_required: bool,
    pub item_results: Vec<ItemResult>,
}

impl InstallResult {
    pub fn item_result(&self, index: usize) -> Option<&ItemResult> {
        self.item_results.get(index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    pub item: UpdateItem,
    pub result_code: ResultCode,
    pub reboot_required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub result_code: ResultCode,
    pub reboot_required: bool,
    pub items: Vec<ItemOutcome>,
}

impl BatchOutcome {
    /// Fully succeeded with no restart pending
    pub fn is_clean_success(&self) -> bool {
        self.result_code == ResultCode::Succeeded && !self.reboot_required
    }
}

/// Pair each submitted item with the install result at the same index.
pub fn pair_results<'a>(
    submitted: &'a [UpdateItem],
    result: &'a InstallResult,
) -> Result<Vec<(&'a UpdateItem, &'a ItemResult)>> {
    if submitted.len() != result.item_results.len() {
        return Err(ProvupError::Install(format!(
            "installer returned {} results for {} submitted updates",
            result.item_results.len(),
            submitted.len()
        )));
    }

    submitted
        .iter()
        .enumerate()
        .map(|(index, item)| {
            result
                .item_result(index)
                .map(|item_result| (item, item_result))
                .ok_or_else(|| ProvupError::Install(format!("missing result for index {index}")))
        })
        .collect()
}

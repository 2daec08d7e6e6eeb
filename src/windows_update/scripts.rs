// PowerShell bodies driving the Microsoft.Update.Session COM API.
// Placeholders are substituted by the client before execution.

pub const CRITERIA_PLACEHOLDER: &str = "__CRITERIA__";
pub const IDS_PLACEHOLDER: &str = "__IDS__";

pub const SEARCH: &str = r#"
$ErrorActionPreference = 'Stop'
[Console]::OutputEncoding = [System.Text.Encoding]::UTF8
$session = New-Object -ComObject Microsoft.Update.Session
$result = $session.CreateUpdateSearcher().Search('__CRITERIA__')
$items = @(foreach ($update in $result.Updates) {
    [pscustomobject]@{
        id = $update.Identity.UpdateID
        title = $update.Title
        isDownloaded = [bool]$update.IsDownloaded
        isInstalled = [bool]$update.IsInstalled
    }
})
ConvertTo-Json -InputObject $items -Compress -Depth 3
"#;

/// Resolves `__IDS__` into `$collection`, keeping the given order.
const COLLECT: &str = r#"
$ErrorActionPreference = 'Stop'
[Console]::OutputEncoding = [System.Text.Encoding]::UTF8
$ids = @(__IDS__)
$session = New-Object -ComObject Microsoft.Update.Session
$found = @{}
foreach ($update in $session.CreateUpdateSearcher().Search('IsInstalled=0').Updates) {
    $found[$update.Identity.UpdateID] = $update
}
$collection = New-Object -ComObject Microsoft.Update.UpdateColl
foreach ($id in $ids) {
    if (-not $found.ContainsKey($id)) { throw "Update $id is no longer pending" }
    $update = $found[$id]
    if (-not $update.EulaAccepted) { $update.AcceptEula() }
    [void]$collection.Add($update)
}
"#;

const DOWNLOAD_BODY: &str = r#"
$downloader = $session.CreateUpdateDownloader()
$downloader.Updates = $collection
[void]$downloader.Download()
$states = @(for ($i = 0; $i -lt $collection.Count; $i++) {
    $update = $collection.Item($i)
    [pscustomobject]@{
        id = $update.Identity.UpdateID
        isDownloaded = [bool]$update.IsDownloaded
        isInstalled = [bool]$update.IsInstalled
    }
})
ConvertTo-Json -InputObject $states -Compress -Depth 3
"#;

const INSTALL_BODY: &str = r#"
$installer = $session.CreateUpdateInstaller()
$installer.Updates = $collection
$result = $installer.Install()
$items = @(for ($i = 0; $i -lt $collection.Count; $i++) {
    $itemResult = $result.GetUpdateResult($i)
    [pscustomobject]@{
        id = $collection.Item($i).Identity.UpdateID
        resultCode = [int]$itemResult.ResultCode
        rebootRequired = [bool]$itemResult.RebootRequired
        isInstalled = [bool]$collection.Item($i).IsInstalled
    }
})
$report = [pscustomobject]@{
    resultCode = [int]$result.ResultCode
    rebootRequired = [bool]$result.RebootRequired
    items = $items
}
ConvertTo-Json -InputObject $report -Compress -Depth 4
"#;

pub fn download() -> String {
    format!("{COLLECT}{DOWNLOAD_BODY}")
}

pub fn install() -> String {
    format!("{COLLECT}{INSTALL_BODY}")
}

//! Events the session components report to the application

use std::path::PathBuf;

use crate::adb::{DeviceSnapshot, RemoteEntry};
use crate::preview::PreviewCategory;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A device check completed
    DeviceStatusChanged(DeviceSnapshot),
    /// The device check itself failed (adb missing, server error)
    DeviceCheckFailed(String),
    /// Some devices are attached but all of them are offline
    DevicesOffline,
    /// A listing was applied; `entries` includes the ".." entry if any
    DirectoryLoaded { path: String, entries: Vec<RemoteEntry> },
    DirectoryLoadFailed { path: String, error: String },
    /// Navigation hit a file; the preview dispatcher takes over
    PreviewRequested { remote: String },
    PreviewReady { remote: String, local: PathBuf, category: PreviewCategory },
    PreviewFailed { remote: String, error: String },
    /// Remote contents changed, reload the current directory
    RefreshRequested,
    /// Free-form status text for the console
    Log(String),
}

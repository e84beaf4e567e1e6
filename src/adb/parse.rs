//! Parsers for `adb devices` and `adb shell ls -p` output

/// Header line printed by `adb devices` before the device table
const DEVICES_HEADER: &str = "List of devices attached";

/// Devices reported by `adb devices`, split by state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceSnapshot {
    pub connected: Vec<String>,
    pub offline: Vec<String>,
}

impl DeviceSnapshot {
    pub fn is_empty(&self) -> bool {
        self.connected.is_empty() && self.offline.is_empty()
    }

    /// One-line status text for the header
    pub fn describe(&self) -> String {
        if !self.connected.is_empty() {
            format!("Connected: {}", self.connected.join(", "))
        } else if !self.offline.is_empty() {
            format!("Offline: {}", self.offline.join(", "))
        } else {
            "No devices connected".to_string()
        }
    }
}

/// One line of a remote directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub name: String,
    pub is_dir: bool,
}

impl RemoteEntry {
    /// Name of the synthetic entry that leads to the parent directory
    pub const PARENT: &'static str = "../";

    pub fn new(name: impl Into<String>, is_dir: bool) -> Self {
        Self { name: name.into(), is_dir }
    }

    /// Synthetic ".." entry prepended to every non-root listing
    pub fn parent() -> Self {
        Self::new(Self::PARENT, true)
    }

    pub fn is_parent(&self) -> bool {
        self.name == Self::PARENT
    }

    /// Name as shown in the listing (directories get a trailing slash)
    pub fn display_name(&self) -> String {
        if self.is_dir && !self.is_parent() {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Parse `adb devices` output.
///
/// Lines that do not split into exactly `<serial> <state>` are skipped, as are
/// states other than `device` and `offline` (e.g. `unauthorized`).
pub fn parse_device_list(text: &str) -> DeviceSnapshot {
    let mut snapshot = DeviceSnapshot::default();

    for line in text.lines() {
        if line.trim().is_empty() || line.starts_with(DEVICES_HEADER) {
            continue;
        }

        let mut parts = line.split_whitespace();
        let (Some(serial), Some(state), None) = (parts.next(), parts.next(), parts.next()) else {
            continue;
        };

        match state {
            "device" => snapshot.connected.push(serial.to_string()),
            "offline" => snapshot.offline.push(serial.to_string()),
            _ => {}
        }
    }

    snapshot
}

/// Parse `ls -p` output into entries, keeping the order of the input
pub fn parse_directory_listing(text: &str) -> Vec<RemoteEntry> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.strip_suffix('/') {
            Some(name) => RemoteEntry::new(name, true),
            None => RemoteEntry::new(line, false),
        })
        .collect()
}

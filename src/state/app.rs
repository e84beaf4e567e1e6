//! Application state

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adb::{CommandRunner, DeviceSnapshot, RemoteEntry, path};
use crate::config::Config;
use crate::preview::{self, PreviewCategory};
use crate::ui::Theme;

use super::devices::{DeviceMonitor, DeviceTag};
use super::events::SessionEvent;
use super::listing::ListingCursor;
use super::mode::{Mode, PromptKind};
use super::navigator::{NavTag, Navigator};
use super::pane::PreviewPane;
use super::preview::{PreviewDispatcher, PreviewTag};
use super::transfers::{TransferTag, Transfers, parse_dropped_paths};
use super::{Console, UiState};

/// Advice shown when every attached device is offline
const OFFLINE_ADVICE: &[&str] = &[
    "The device is attached but adb reports it as offline.",
    "",
    "Try the following:",
    "  1. Unlock the device screen",
    "  2. Revoke USB debugging authorizations in Developer options",
    "  3. Disconnect and reconnect the USB cable",
    "  4. Restart the adb server (R)",
];

/// What the header knows about attached devices
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceStatus {
    Unknown,
    Known(DeviceSnapshot),
    /// `adb devices` itself failed
    Unavailable(String),
}

impl DeviceStatus {
    pub fn describe(&self) -> String {
        match self {
            DeviceStatus::Unknown => "Checking devices...".to_string(),
            DeviceStatus::Known(snapshot) => snapshot.describe(),
            DeviceStatus::Unavailable(error) => match error.lines().next() {
                Some(first) if !first.trim().is_empty() => format!("adb unavailable: {}", first.trim()),
                _ => "adb unavailable".to_string(),
            },
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, DeviceStatus::Known(snapshot) if !snapshot.connected.is_empty())
    }
}

/// Main application state
pub struct App {
    // === Session components ===
    pub navigator: Navigator<CommandRunner<NavTag>>,
    pub preview: PreviewDispatcher<CommandRunner<PreviewTag>>,
    pub devices: DeviceMonitor<CommandRunner<DeviceTag>>,
    pub transfers: Transfers<CommandRunner<TransferTag>>,

    // === View state ===
    pub listing: ListingCursor,
    pub pane: PreviewPane,
    pub device_status: DeviceStatus,
    pub console: Console,

    // === Mode and control ===
    pub mode: Mode,
    pub should_quit: bool,
    pub ui: UiState,
    pub spinner_frame: usize,

    // === Configuration ===
    pub config: Config,
    pub theme: Theme,

    // === Listing on screen ===
    pub path: String,
    pub entries: Vec<RemoteEntry>,
    /// Entry under the cursor before the latest poll
    shown_selection: Option<String>,
}

// ============================================================================
// CORE / CONSTRUCTION
// ============================================================================

impl App {
    pub fn new(config: Config) -> Self {
        let adb = PathBuf::from(&config.general.adb_path);
        let start_path = config.initial_path();
        let restart_delay = Duration::from_millis(config.general.restart_check_delay_ms);

        Self {
            navigator: Navigator::new(CommandRunner::new(&adb), &start_path),
            preview: PreviewDispatcher::new(
                CommandRunner::new(&adb),
                config.preview_dir(),
                config.preview.sniff_limit,
            ),
            devices: DeviceMonitor::new(CommandRunner::new(&adb), &adb, restart_delay),
            transfers: Transfers::new(CommandRunner::new(&adb)),
            listing: ListingCursor::default(),
            pane: PreviewPane::Empty,
            device_status: DeviceStatus::Unknown,
            console: Console::default(),
            mode: Mode::Normal,
            should_quit: false,
            ui: UiState::from_config(config.display.console_height),
            spinner_frame: 0,
            theme: Theme::from_config(&config.display),
            config,
            path: start_path,
            entries: Vec::new(),
            shown_selection: None,
        }
    }

    /// Kick off the initial device check and directory load
    pub fn start(&mut self) {
        self.devices.check();
        self.navigator.refresh();
    }

    /// Save current state to config (call before exit)
    pub fn save_state(&mut self) {
        let current = self.navigator.current_path().to_string();
        self.config.save_last_path(&current);
    }

    /// Stop every subprocess and delete pulled preview files
    pub fn teardown(&mut self) {
        self.transfers.cancel_all();
        self.preview.teardown();
    }

    pub fn is_busy(&self) -> bool {
        self.navigator.is_busy() || self.preview.is_busy() || self.devices.is_busy() || self.transfers.is_busy()
    }

    /// Short description of the work in flight, for the status bar
    pub fn busy_label(&self) -> Option<String> {
        if let Some(remote) = self.preview.pending_remote() {
            Some(format!("Pulling {}", path::basename(remote)))
        } else if self.navigator.is_busy() {
            Some(match self.navigator.pending_path() {
                Some(p) => format!("Loading {}", p),
                None => "Checking entry".to_string(),
            })
        } else if self.transfers.is_busy() {
            Some(match self.transfers.queued() {
                0 => "Transferring".to_string(),
                n => format!("Transferring ({} queued)", n),
            })
        } else if self.devices.is_busy() {
            Some("Checking devices".to_string())
        } else {
            None
        }
    }

    /// Advance the spinner animation frame
    pub fn tick_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    pub fn log(&mut self, line: impl Into<String>) {
        self.console.push(line);
    }

    pub fn selected_entry(&self) -> Option<&RemoteEntry> {
        self.listing.selected(&self.entries)
    }

    /// Full remote path of the entry under the cursor (None for "../")
    pub fn selected_remote_path(&self) -> Option<String> {
        self.selected_entry()
            .filter(|e| !e.is_parent())
            .map(|e| path::join(&self.path, &e.name))
    }
}

// ============================================================================
// SESSION EVENTS
// ============================================================================

impl App {
    /// Drain every component and apply what happened
    pub fn poll(&mut self) {
        self.shown_selection = self.selected_entry().map(|e| e.name.clone());

        let mut events = self.navigator.poll();
        events.extend(self.devices.poll());
        events.extend(self.transfers.poll());
        events.extend(self.preview.poll());

        for event in events {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Log(line) => self.log(line),
            SessionEvent::DeviceStatusChanged(snapshot) => {
                self.device_status = DeviceStatus::Known(snapshot);
            }
            SessionEvent::DeviceCheckFailed(error) => {
                self.device_status = DeviceStatus::Unavailable(error);
            }
            SessionEvent::DevicesOffline => {
                self.mode = Mode::Notice {
                    title: " Device offline ".to_string(),
                    lines: OFFLINE_ADVICE.iter().map(|l| l.to_string()).collect(),
                };
            }
            SessionEvent::DirectoryLoaded { path, entries } => {
                self.log(format!("Loaded directory: {}", path));
                match self.focus_after_load(&path) {
                    Some(name) => self.listing.reset_on(&entries, &name),
                    None => self.listing.reset(entries.len()),
                }
                self.path = path;
                self.entries = entries;
            }
            SessionEvent::DirectoryLoadFailed { path, error } => {
                self.log(format!("Failed to list directory: {}", path));
                self.log(format!("Error: {}", error));
            }
            SessionEvent::PreviewRequested { remote } => self.start_preview(&remote),
            SessionEvent::PreviewReady { remote, local, category } => self.show_preview(remote, &local, category),
            SessionEvent::PreviewFailed { remote, error } => {
                log::warn!("preview of {} failed: {}", remote, error);
                self.pane = PreviewPane::Failed { remote, error };
            }
            SessionEvent::RefreshRequested => self.navigator.request_refresh(),
        }
    }

    /// Entry to put the cursor on after `new_path` was loaded: the same
    /// entry on refresh, the directory we came from when going up.
    fn focus_after_load(&self, new_path: &str) -> Option<String> {
        if new_path == self.path {
            self.shown_selection.clone()
        } else if self.path != "/" && path::parent_path(&self.path) == new_path {
            Some(path::basename(&self.path).to_string())
        } else {
            None
        }
    }

    fn start_preview(&mut self, remote: &str) {
        self.pane = PreviewPane::Loading { remote: remote.to_string() };
        self.preview.prepare_preview(remote);
    }

    fn show_preview(&mut self, remote: String, local: &Path, category: PreviewCategory) {
        self.pane = match category {
            PreviewCategory::Text => match preview::read_text_preview(local, self.config.preview.text_limit) {
                Ok(text) => PreviewPane::Text { remote, text },
                Err(e) => PreviewPane::Failed { remote, error: e.to_string() },
            },
            PreviewCategory::Unsupported => PreviewPane::Unsupported { remote },
            _ => {
                let name = path::basename(&remote);
                match self.config.find_handler(name, local) {
                    Some(command) => match preview::spawn_viewer(&command) {
                        Ok(child) => {
                            self.preview.set_viewer(child);
                            PreviewPane::External { remote, category, command }
                        }
                        Err(e) => PreviewPane::Failed { remote, error: e.to_string() },
                    },
                    None => PreviewPane::NoViewer { remote, category },
                }
            }
        };
    }
}

// ============================================================================
// USER ACTIONS
// ============================================================================

impl App {
    /// Enter: open a directory or preview a file
    pub fn open_selected(&mut self) {
        if let Some(entry) = self.selected_entry().cloned() {
            self.navigator.navigate_into(&entry);
        }
    }

    pub fn go_up(&mut self) {
        self.navigator.go_up();
    }

    pub fn refresh(&mut self) {
        self.navigator.refresh();
    }

    /// Pull the selected file for preview without probing it first
    pub fn preview_selected(&mut self) {
        match self.selected_entry() {
            Some(entry) if !entry.is_dir && !entry.is_parent() => {
                if let Some(remote) = self.selected_remote_path() {
                    self.start_preview(&remote);
                }
            }
            Some(_) => self.log("Please select a file to preview (not a directory)"),
            None => {}
        }
    }

    /// F3: full-screen view of the text preview
    pub fn view_preview(&mut self) {
        match &self.pane {
            PreviewPane::Text { remote, text } => self.mode = Mode::viewing(remote, text),
            _ => self.log("Nothing to view: preview a text file first"),
        }
    }

    pub fn show_goto_dialog(&mut self) {
        let current = self.navigator.current_path().to_string();
        self.open_prompt(PromptKind::GoTo, vec![current], None);
    }

    pub fn show_download_dialog(&mut self) {
        let remote = match self.selected_entry() {
            Some(entry) if !entry.is_dir && !entry.is_parent() => self.selected_remote_path(),
            _ => None,
        };
        let Some(remote) = remote else {
            self.log("Please select a file to download (not a directory)");
            return;
        };

        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let save_path = cwd.join(path::basename(&remote)).to_string_lossy().to_string();
        self.open_prompt(PromptKind::Download, vec![save_path], Some(remote));
    }

    pub fn show_pull_dialog(&mut self) {
        let remote = self.selected_remote_path().unwrap_or_default();
        self.open_prompt(PromptKind::Pull, vec![remote], None);
    }

    pub fn show_push_dialog(&mut self) {
        let remote = self.path.clone();
        self.open_prompt(PromptKind::Push, vec![String::new(), remote], None);
    }

    /// Open a prompt with the first field's prefill selected
    fn open_prompt(&mut self, kind: PromptKind, initial: Vec<String>, target: Option<String>) {
        self.ui.input_selected = initial.first().is_some_and(|f| !f.is_empty());
        self.mode = Mode::prompt(kind, initial, target);
    }

    /// OK in a prompt dialog
    pub fn submit_prompt(&mut self, kind: PromptKind, fields: &[String], target: Option<&str>) {
        let field = |i: usize| fields.get(i).map(String::as_str).unwrap_or("");
        match kind {
            PromptKind::GoTo => {
                if !field(0).trim().is_empty() {
                    self.navigator.go_to(field(0).trim());
                }
            }
            PromptKind::Download => {
                let save_path = field(0).trim();
                match target {
                    Some(remote) if !save_path.is_empty() => self.transfers.download(remote, save_path),
                    _ => self.log("Download cancelled: no save path given"),
                }
            }
            PromptKind::Pull => self.transfers.pull(field(0), field(1)),
            PromptKind::Push => self.transfers.push(field(0), field(1)),
        }
    }

    pub fn check_devices(&mut self) {
        self.log("Checking devices...");
        self.devices.check();
    }

    pub fn restart_server(&mut self) {
        self.device_status = DeviceStatus::Unknown;
        self.devices.restart_server();
    }

    /// Bracketed paste in normal mode: push the pasted local paths into
    /// the current remote directory
    pub fn paste_paths(&mut self, text: &str) {
        let (found, missing): (Vec<String>, Vec<String>) =
            parse_dropped_paths(text).into_iter().partition(|p| Path::new(p).exists());

        for p in &missing {
            self.log(format!("Not a local file: {}", p));
        }
        if found.is_empty() {
            return;
        }
        let remote_dir = self.path.clone();
        self.transfers.push_dropped(&found, &remote_dir);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn test_app() -> App {
        let mut config = Config::default();
        config.general.adb_path = "/nonexistent/adb-for-tests".to_string();
        config.handlers.clear();
        App::new(config)
    }

    fn load(app: &mut App, path: &str, names: &[(&str, bool)]) {
        let mut entries = Vec::new();
        if path != "/" {
            entries.push(RemoteEntry::parent());
        }
        entries.extend(names.iter().map(|(n, d)| RemoteEntry::new(*n, *d)));
        app.handle_event(SessionEvent::DirectoryLoaded { path: path.to_string(), entries });
    }

    #[test]
    fn test_offline_devices_show_notice() {
        let mut app = test_app();
        app.handle_event(SessionEvent::DevicesOffline);
        let Mode::Notice { lines, .. } = &app.mode else {
            panic!("expected notice");
        };
        assert!(lines.iter().any(|l| l.contains("Revoke USB debugging")));
    }

    #[test]
    fn test_device_status_header() {
        let mut app = test_app();
        assert_eq!(app.device_status.describe(), "Checking devices...");
        app.handle_event(SessionEvent::DeviceCheckFailed("No such file".to_string()));
        assert_eq!(app.device_status.describe(), "adb unavailable: No such file");
        assert!(!app.device_status.is_connected());

        let snapshot = DeviceSnapshot { connected: vec!["emulator-5554".to_string()], offline: vec![] };
        app.handle_event(SessionEvent::DeviceStatusChanged(snapshot));
        assert!(app.device_status.is_connected());
    }

    #[test]
    fn test_load_failure_is_logged() {
        let mut app = test_app();
        app.handle_event(SessionEvent::DirectoryLoadFailed {
            path: "/data".to_string(),
            error: "Permission denied".to_string(),
        });
        let lines = app.console.lines();
        assert_eq!(lines[lines.len() - 2], "Failed to list directory: /data");
        assert_eq!(lines[lines.len() - 1], "Error: Permission denied");
    }

    #[test]
    fn test_going_up_focuses_previous_directory() {
        let mut app = test_app();
        load(&mut app, "/sdcard/DCIM", &[("Camera", true)]);
        load(&mut app, "/sdcard", &[("Alarms", true), ("DCIM", true), ("Music", true)]);
        assert_eq!(app.selected_entry().map(|e| e.name.as_str()), Some("DCIM"));

        load(&mut app, "/", &[("sdcard", true), ("system", true)]);
        assert_eq!(app.selected_entry().map(|e| e.name.as_str()), Some("sdcard"));

        load(&mut app, "/system", &[("bin", true)]);
        assert_eq!(app.listing.cursor, 0);
    }

    #[test]
    fn test_download_requires_a_file() {
        let mut app = test_app();
        load(&mut app, "/sdcard", &[("DCIM", true), ("notes.txt", false)]);

        app.show_download_dialog();
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.console.last(), Some("Please select a file to download (not a directory)"));

        app.listing.move_down();
        app.show_download_dialog();
        assert_eq!(app.console.last(), Some("Please select a file to download (not a directory)"));

        app.listing.move_down();
        app.show_download_dialog();
        let Mode::Prompt { kind, fields, target, .. } = &app.mode else {
            panic!("expected prompt");
        };
        assert_eq!(*kind, PromptKind::Download);
        assert!(fields[0].ends_with("notes.txt"));
        assert_eq!(target.as_deref(), Some("/sdcard/notes.txt"));
    }

    #[test]
    fn test_text_preview_fills_pane() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("build.prop");
        fs::write(&local, "ro.build.type=user\n").unwrap();

        let mut app = test_app();
        app.handle_event(SessionEvent::PreviewReady {
            remote: "/system/build.prop".to_string(),
            local,
            category: PreviewCategory::Text,
        });
        assert_eq!(app.pane, PreviewPane::Text {
            remote: "/system/build.prop".to_string(),
            text: "ro.build.type=user\n".to_string(),
        });

        app.view_preview();
        assert!(matches!(&app.mode, Mode::Viewing { path, lines, .. }
            if path == "/system/build.prop" && lines == &vec!["ro.build.type=user".to_string()]));
    }

    #[test]
    fn test_media_without_handler() {
        let mut app = test_app();
        app.handle_event(SessionEvent::PreviewReady {
            remote: "/sdcard/clip.mp4".to_string(),
            local: PathBuf::from("/tmp/clip.mp4"),
            category: PreviewCategory::Video,
        });
        assert_eq!(app.pane, PreviewPane::NoViewer {
            remote: "/sdcard/clip.mp4".to_string(),
            category: PreviewCategory::Video,
        });
    }

    #[test]
    fn test_preview_failure_differs_from_unsupported() {
        let mut app = test_app();
        app.handle_event(SessionEvent::PreviewFailed {
            remote: "/data/x".to_string(),
            error: "Permission denied".to_string(),
        });
        assert!(matches!(app.pane, PreviewPane::Failed { .. }));
        app.handle_event(SessionEvent::PreviewReady {
            remote: "/data/y".to_string(),
            local: PathBuf::from("/tmp/y"),
            category: PreviewCategory::Unsupported,
        });
        assert!(matches!(app.pane, PreviewPane::Unsupported { .. }));
    }

    #[test]
    fn test_paste_ignores_missing_local_paths() {
        let mut app = test_app();
        app.paste_paths("/definitely/not/here.txt");
        assert_eq!(app.console.last(), Some("Not a local file: /definitely/not/here.txt"));
        assert!(!app.transfers.is_busy());
    }

    #[test]
    fn test_view_without_text_preview() {
        let mut app = test_app();
        app.view_preview();
        assert!(matches!(app.mode, Mode::Normal));
    }
}

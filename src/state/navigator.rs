//! Remote directory navigation.
//!
//! The navigator owns the current remote path and its listing. Both change
//! together, and only when the most recently issued request completes; any
//! older completion is dropped.

use crate::adb::parse::parse_directory_listing;
use crate::adb::{self, Bridge, RemoteEntry, RemoteKind, RunEvent, RunResult, commands, path};
use super::events::SessionEvent;

/// Correlation tag for navigation runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTag {
    Load { seq: u64, path: String },
    Probe { seq: u64, path: String },
}

impl NavTag {
    fn seq(&self) -> u64 {
        match self {
            NavTag::Load { seq, .. } | NavTag::Probe { seq, .. } => *seq,
        }
    }
}

pub struct Navigator<B> {
    bridge: B,
    current_path: String,
    /// Sequence number of the newest request; only its completion is applied
    latest: u64,
    /// Path being loaded right now, if any
    pending: Option<String>,
    /// The newest request is a directory probe
    probing: bool,
    /// A background refresh arrived while probing
    refresh_after_probe: bool,
    outbox: Vec<SessionEvent>,
}

impl<B: Bridge<NavTag>> Navigator<B> {
    pub fn new(bridge: B, start_path: &str) -> Self {
        Self {
            bridge,
            current_path: start_path.to_string(),
            latest: 0,
            pending: None,
            probing: false,
            refresh_after_probe: false,
            outbox: Vec::new(),
        }
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Path of the listing in flight
    pub fn pending_path(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.bridge.is_running()
    }

    fn next_seq(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// List `path` and make it current once the listing succeeds
    pub fn load(&mut self, path: &str) {
        let seq = self.next_seq();
        self.pending = Some(path.to_string());
        self.probing = false;
        self.refresh_after_probe = false;
        self.outbox.push(SessionEvent::Log(format!("Loading remote directory: {}", path)));
        self.bridge.start(commands::list_dir(path), NavTag::Load { seq, path: path.to_string() });
    }

    /// Reload the listing. A load still in flight is re-issued instead,
    /// so the user's navigation is not lost.
    pub fn refresh(&mut self) {
        let path = self.pending.clone().unwrap_or_else(|| self.current_path.clone());
        self.load(&path);
    }

    /// Refresh asked for by finished transfers. An entry probe in flight
    /// is left alone and the refresh happens once it completes.
    pub fn request_refresh(&mut self) {
        if self.probing {
            self.refresh_after_probe = true;
        } else {
            self.refresh();
        }
    }

    /// Load the parent directory (nothing to do at the root)
    pub fn go_up(&mut self) {
        if self.current_path == "/" {
            return;
        }
        let parent = path::parent_path(&self.current_path);
        self.load(&parent);
    }

    /// Load a path typed by the user, absolute or relative to the current one
    pub fn go_to(&mut self, input: &str) {
        let target = path::resolve(&self.current_path, input);
        self.load(&target);
    }

    /// Open an entry of the current listing. Directories are loaded; anything
    /// else is probed first, since `ls -p` does not mark symlinked directories.
    pub fn navigate_into(&mut self, entry: &RemoteEntry) {
        if entry.is_parent() {
            let parent = path::parent_path(&self.current_path);
            self.load(&parent);
            return;
        }

        let resolved = path::join(&self.current_path, &entry.name);
        if entry.is_dir {
            self.load(&resolved);
        } else {
            let seq = self.next_seq();
            self.pending = None;
            self.probing = true;
            adb::check_is_remote_directory(&mut self.bridge, &resolved, NavTag::Probe { seq, path: resolved.clone() });
        }
    }

    /// Apply finished runs and hand back everything that happened since the last poll
    pub fn poll(&mut self) -> Vec<SessionEvent> {
        for event in self.bridge.poll() {
            if let RunEvent::Finished { tag, result } = event {
                self.complete(tag, result);
            }
        }
        std::mem::take(&mut self.outbox)
    }

    fn complete(&mut self, tag: NavTag, result: RunResult) {
        if tag.seq() != self.latest {
            log::debug!("discarding stale navigation result {:?}", tag);
            return;
        }

        match tag {
            NavTag::Load { path, .. } => {
                self.pending = None;
                if !result.success() {
                    self.outbox.push(SessionEvent::DirectoryLoadFailed { path, error: result.error_text() });
                    return;
                }

                let mut entries = Vec::new();
                if path != "/" {
                    entries.push(RemoteEntry::parent());
                }
                entries.extend(parse_directory_listing(&result.stdout));

                self.current_path = path.clone();
                self.outbox.push(SessionEvent::DirectoryLoaded { path, entries });
            }
            NavTag::Probe { path, .. } => {
                self.probing = false;
                match adb::probe_kind(&result) {
                    RemoteKind::Dir => self.load(&path),
                    RemoteKind::File => {
                        self.outbox.push(SessionEvent::PreviewRequested { remote: path });
                        if std::mem::take(&mut self.refresh_after_probe) {
                            self.refresh();
                        }
                    }
                }
            }
        }
    }
}

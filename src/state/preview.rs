//! Preview dispatcher: pull a remote file into the temp directory, then
//! classify it for the preview pane.

use std::path::PathBuf;
use std::process::Child;
use std::thread;

use crate::adb::{Bridge, RunEvent, RunResult, commands, path};
use crate::preview::{self, TempFiles};
use super::events::SessionEvent;

/// Correlation tag for preview pulls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTag {
    pub remote: String,
    pub local: PathBuf,
}

pub struct PreviewDispatcher<B> {
    bridge: B,
    temp_dir: PathBuf,
    sniff_limit: usize,
    temp_files: TempFiles,
    /// External viewer showing the current preview
    viewer: Option<Child>,
    pending: Option<String>,
    outbox: Vec<SessionEvent>,
}

impl<B: Bridge<PreviewTag>> PreviewDispatcher<B> {
    pub fn new(bridge: B, temp_dir: PathBuf, sniff_limit: usize) -> Self {
        Self {
            bridge,
            temp_dir,
            sniff_limit,
            temp_files: TempFiles::new(),
            viewer: None,
            pending: None,
            outbox: Vec::new(),
        }
    }

    /// Local file a remote file is pulled to
    pub fn local_path_for(&self, remote: &str) -> PathBuf {
        self.temp_dir.join(path::basename(remote))
    }

    /// Remote file being pulled right now
    pub fn pending_remote(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.bridge.is_running()
    }

    #[cfg(test)]
    pub fn has_viewer(&self) -> bool {
        self.viewer.is_some()
    }

    /// Start pulling `remote` for preview; the result arrives from `poll`
    pub fn prepare_preview(&mut self, remote: &str) {
        self.release_viewer();

        let local = self.local_path_for(remote);
        // Tracked before the pull so partial downloads are removed too
        self.temp_files.track(&local);
        self.pending = Some(remote.to_string());
        self.outbox.push(SessionEvent::Log(format!("Previewing file: {}", remote)));

        let args = commands::pull(remote, &local.to_string_lossy());
        self.bridge.start(args, PreviewTag { remote: remote.to_string(), local });
    }

    pub fn poll(&mut self) -> Vec<SessionEvent> {
        for event in self.bridge.poll() {
            if let RunEvent::Finished { tag, result } = event {
                self.complete(tag, result);
            }
        }
        std::mem::take(&mut self.outbox)
    }

    fn complete(&mut self, tag: PreviewTag, result: RunResult) {
        self.pending = None;
        let PreviewTag { remote, local } = tag;

        if result.success() {
            let category = preview::classify(&local, self.sniff_limit);
            log::debug!("{} classified as {:?}", local.display(), category);
            self.outbox.push(SessionEvent::PreviewReady { remote, local, category });
        } else {
            self.outbox.push(SessionEvent::PreviewFailed { remote, error: result.error_text() });
        }
    }

    /// Take ownership of the viewer process showing the current preview
    pub fn set_viewer(&mut self, child: Child) {
        self.release_viewer();
        self.viewer = Some(child);
    }

    /// Stop the external viewer, if one is running
    pub fn release_viewer(&mut self) {
        if let Some(mut child) = self.viewer.take() {
            log::debug!("stopping viewer pid {}", child.id());
            let _ = child.kill();
            thread::spawn(move || {
                let _ = child.wait();
            });
        }
    }

    /// End of session: stop everything and delete every pulled file
    pub fn teardown(&mut self) {
        self.bridge.cancel();
        self.pending = None;
        self.release_viewer();
        self.temp_files.cleanup();
    }
}

//! File transfers between the host and the device.
//!
//! Transfers are queued and run one at a time, so a new transfer never
//! cancels one that is still copying.

use std::collections::VecDeque;

use crate::adb::{Bridge, RunEvent, RunResult, commands};
use super::events::SessionEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    /// Selected remote file saved to a chosen local path
    Download,
    /// Manual pull from the transfer dialog
    Pull,
    /// Manual push from the transfer dialog
    Push,
    /// Local file dropped (pasted) onto the listing
    Drop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferTag {
    pub kind: TransferKind,
    pub source: String,
    pub target: String,
}

impl TransferTag {
    fn args(&self) -> Vec<String> {
        match self.kind {
            TransferKind::Download | TransferKind::Pull => commands::pull(&self.source, &self.target),
            TransferKind::Push | TransferKind::Drop => commands::push(&self.source, &self.target),
        }
    }

    fn start_message(&self) -> String {
        match self.kind {
            TransferKind::Download => format!("Downloading {} to {}...", self.source, self.target),
            TransferKind::Pull => format!("Running adb pull {} {}...", self.source, self.target),
            TransferKind::Push => format!("Running adb push {} {}...", self.source, self.target),
            TransferKind::Drop => format!("Pushing {} to {}...", self.source, self.target),
        }
    }
}

/// Progress of the current group of dropped files
#[derive(Debug, Default)]
struct DropBatch {
    remaining: usize,
    succeeded: usize,
}

pub struct Transfers<B> {
    bridge: B,
    queue: VecDeque<TransferTag>,
    drop_batch: Option<DropBatch>,
    outbox: Vec<SessionEvent>,
}

impl<B: Bridge<TransferTag>> Transfers<B> {
    pub fn new(bridge: B) -> Self {
        Self { bridge, queue: VecDeque::new(), drop_batch: None, outbox: Vec::new() }
    }

    pub fn is_busy(&self) -> bool {
        self.bridge.is_running() || !self.queue.is_empty()
    }

    /// Transfers waiting behind the running one
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn download(&mut self, remote: &str, save_path: &str) {
        self.enqueue(TransferKind::Download, remote, save_path);
    }

    pub fn pull(&mut self, remote: &str, local: &str) {
        let (remote, local) = (remote.trim(), local.trim());
        if remote.is_empty() || local.is_empty() {
            self.log("Please specify both remote and local paths for pull.");
            return;
        }
        self.enqueue(TransferKind::Pull, remote, local);
    }

    pub fn push(&mut self, local: &str, remote: &str) {
        let (local, remote) = (local.trim(), remote.trim());
        if local.is_empty() || remote.is_empty() {
            self.log("Please specify both local and remote paths for push.");
            return;
        }
        self.enqueue(TransferKind::Push, local, remote);
    }

    /// Push every dropped local path into `remote_dir`. The listing is
    /// refreshed once the whole batch is done, if anything made it.
    pub fn push_dropped(&mut self, paths: &[String], remote_dir: &str) {
        if paths.is_empty() {
            return;
        }
        self.drop_batch.get_or_insert_with(DropBatch::default).remaining += paths.len();
        for local in paths {
            self.enqueue(TransferKind::Drop, local, remote_dir);
        }
    }

    /// Drop queued work and stop the running transfer
    pub fn cancel_all(&mut self) {
        self.queue.clear();
        self.drop_batch = None;
        self.bridge.cancel();
    }

    pub fn poll(&mut self) -> Vec<SessionEvent> {
        for event in self.bridge.poll() {
            match event {
                RunEvent::Output { stdout, stderr, .. } => {
                    for line in stdout.lines().chain(stderr.lines()).filter(|l| !l.trim().is_empty()) {
                        log::debug!("transfer: {}", line.trim());
                    }
                }
                RunEvent::Finished { tag, result } => self.complete(tag, result),
            }
        }
        self.start_next();
        std::mem::take(&mut self.outbox)
    }

    fn log(&mut self, line: impl Into<String>) {
        self.outbox.push(SessionEvent::Log(line.into()));
    }

    fn enqueue(&mut self, kind: TransferKind, source: &str, target: &str) {
        self.queue.push_back(TransferTag { kind, source: source.to_string(), target: target.to_string() });
        self.start_next();
    }

    fn start_next(&mut self) {
        if self.bridge.is_running() {
            return;
        }
        if let Some(tag) = self.queue.pop_front() {
            self.log(tag.start_message());
            let args = tag.args();
            self.bridge.start(args, tag);
        }
    }

    fn complete(&mut self, tag: TransferTag, result: RunResult) {
        let ok = result.success();
        match tag.kind {
            TransferKind::Download if ok => self.log("Download successful."),
            TransferKind::Download => self.log(format!("Download failed: {}", result.error_text())),
            TransferKind::Pull if ok => self.log("Pull completed successfully."),
            TransferKind::Pull => self.log(format!("Pull failed: {}", result.error_text())),
            TransferKind::Push if ok => {
                self.log("Push completed successfully.");
                self.outbox.push(SessionEvent::RefreshRequested);
            }
            TransferKind::Push => self.log(format!("Push failed: {}", result.error_text())),
            TransferKind::Drop => {
                if ok {
                    self.log(format!("Pushed {} successfully.", tag.source));
                } else {
                    self.log(format!("Failed to push {}: {}", tag.source, result.error_text()));
                }
                self.drop_finished(ok);
            }
        }
    }

    fn drop_finished(&mut self, ok: bool) {
        let Some(batch) = self.drop_batch.as_mut() else {
            return;
        };
        batch.remaining = batch.remaining.saturating_sub(1);
        if ok {
            batch.succeeded += 1;
        }
        if batch.remaining == 0 {
            let succeeded = batch.succeeded;
            self.drop_batch = None;
            if succeeded > 0 {
                self.outbox.push(SessionEvent::RefreshRequested);
            }
        }
    }
}

/// Split pasted text into local paths. Understands shell quoting and
/// backslash escapes (what terminals emit for dropped files) and
/// `file://` URIs (what file managers put on the clipboard).
pub fn parse_dropped_paths(text: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    in_token = true;
                }
                // Only escapes that a terminal would emit; keeps C:\Users intact
                '\\' => {
                    match chars.peek() {
                        Some(&next) if next.is_whitespace() || matches!(next, '\\' | '\'' | '"') => {
                            current.push(next);
                            chars.next();
                        }
                        _ => current.push('\\'),
                    }
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        paths.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }
    if in_token {
        paths.push(current);
    }

    paths
        .into_iter()
        .map(|p| match p.strip_prefix("file://") {
            Some(rest) => percent_decode(rest),
            None => p,
        })
        .filter(|p| !p.is_empty())
        .collect()
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2]))
        {
            out.push(hi * 16 + lo);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

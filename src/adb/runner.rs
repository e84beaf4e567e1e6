//! Asynchronous runner for adb invocations.
//!
//! Each `start` spawns one process with piped stdout/stderr. Reader threads
//! decode the streams and send chunks over a channel; the owner drains them
//! with `poll()` from its own thread, so nothing here ever blocks the UI.
//! Starting a new run kills the previous one and discards its remaining output.

use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;
use std::time::{Duration, Instant};

use crate::errors::{AppError, AppResult};

/// Read size for the stream reader threads
const READ_CHUNK: usize = 4096;

/// How long output may keep arriving after the process exited. A forked
/// daemon (`adb start-server`) can hold the pipes open indefinitely.
const EXIT_GRACE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Message from a reader thread, tagged with the run it belongs to
enum Message {
    Chunk { run: u64, stream: Stream, text: String },
    Closed { run: u64 },
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Process exited with a code
    Exited(i32),
    /// Process was terminated without an exit code (signal number on unix)
    Signaled(Option<i32>),
    /// Process could not be started at all
    LaunchFailed(String),
}

impl RunStatus {
    pub fn success(&self) -> bool {
        matches!(self, RunStatus::Exited(0))
    }
}

impl From<ExitStatus> for RunStatus {
    fn from(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => RunStatus::Exited(code),
            None => RunStatus::Signaled(exit_signal(&status)),
        }
    }
}

#[cfg(unix)]
fn exit_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn exit_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

/// Final state of a finished run with everything it printed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub status: RunStatus,
    pub stdout: String,
    pub stderr: String,
}

impl RunResult {
    pub fn launch_failed(message: String) -> Self {
        Self { status: RunStatus::LaunchFailed(message), stdout: String::new(), stderr: String::new() }
    }

    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Raw error text for a failed run: stderr, else stdout, else the status
    pub fn error_text(&self) -> String {
        if let RunStatus::LaunchFailed(message) = &self.status {
            return message.clone();
        }
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        match &self.status {
            RunStatus::Exited(code) => format!("exit code {}", code),
            RunStatus::Signaled(Some(signal)) => format!("terminated by signal {}", signal),
            RunStatus::Signaled(None) => "terminated abnormally".to_string(),
            RunStatus::LaunchFailed(message) => message.clone(),
        }
    }
}

/// Event delivered by `Bridge::poll`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent<T> {
    /// Newly arrived output; one of the two strings is empty
    Output { tag: T, stdout: String, stderr: String },
    /// Always the last event of a run
    Finished { tag: T, result: RunResult },
}

/// Something that runs adb invocations and reports back through `poll`.
///
/// At most one run is live per bridge: `start` replaces the active run, and
/// the replaced run never produces further events.
pub trait Bridge<T> {
    fn start(&mut self, args: Vec<String>, tag: T);
    fn poll(&mut self) -> Vec<RunEvent<T>>;
    fn is_running(&self) -> bool;
    fn cancel(&mut self);
}

struct ActiveRun<T> {
    id: u64,
    tag: T,
    child: Child,
    open_streams: u8,
    /// Exit status and when it was first seen
    exited: Option<(RunStatus, Instant)>,
}

/// Process-backed `Bridge`
pub struct CommandRunner<T> {
    program: PathBuf,
    tx: Sender<Message>,
    rx: Receiver<Message>,
    next_id: u64,
    active: Option<ActiveRun<T>>,
    /// Launch failure waiting to be reported by the next poll
    failed_launch: Option<(T, String)>,
    stdout: String,
    stderr: String,
}

impl<T> CommandRunner<T> {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let (tx, rx) = channel();
        Self {
            program: program.into(),
            tx,
            rx,
            next_id: 0,
            active: None,
            failed_launch: None,
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    fn kill_active(&mut self) {
        self.failed_launch = None;
        if let Some(run) = self.active.take() {
            log::debug!("run #{}: replaced, killing pid {}", run.id, run.child.id());
            let mut child = run.child;
            let _ = child.kill();
            // Reap off-thread so a stuck process never blocks the caller
            thread::spawn(move || {
                let _ = child.wait();
            });
        }
    }

    fn finish(&mut self, status: RunStatus) -> Option<RunEvent<T>> {
        let run = self.active.take()?;
        log::debug!("run #{}: finished with {:?}", run.id, status);
        Some(RunEvent::Finished {
            tag: run.tag,
            result: RunResult { status, stdout: self.stdout.clone(), stderr: self.stderr.clone() },
        })
    }
}

impl<T: Clone> Bridge<T> for CommandRunner<T> {
    fn start(&mut self, args: Vec<String>, tag: T) {
        self.kill_active();
        self.stdout.clear();
        self.stderr.clear();
        self.next_id += 1;
        let id = self.next_id;

        log::debug!("run #{}: {} {}", id, self.program.display(), args.join(" "));

        let spawned = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        match spawned {
            Ok(mut child) => {
                let mut open_streams = 0;
                if let Some(out) = child.stdout.take() {
                    spawn_reader(id, Stream::Stdout, out, self.tx.clone());
                    open_streams += 1;
                }
                if let Some(err) = child.stderr.take() {
                    spawn_reader(id, Stream::Stderr, err, self.tx.clone());
                    open_streams += 1;
                }
                self.active = Some(ActiveRun { id, tag, child, open_streams, exited: None });
            }
            Err(source) => {
                let err = AppError::Launch { program: self.program.display().to_string(), source };
                log::warn!("run #{}: {}", id, err);
                self.failed_launch = Some((tag, err.to_string()));
            }
        }
    }

    fn poll(&mut self) -> Vec<RunEvent<T>> {
        let mut events = Vec::new();

        if let Some((tag, message)) = self.failed_launch.take() {
            events.push(RunEvent::Finished { tag, result: RunResult::launch_failed(message) });
            return events;
        }

        while let Ok(message) = self.rx.try_recv() {
            // Output of replaced runs is dropped here
            let Some(run) = self.active.as_mut() else {
                continue;
            };
            match message {
                Message::Chunk { run: id, stream, text } if id == run.id => {
                    let (stdout, stderr) = match stream {
                        Stream::Stdout => {
                            self.stdout.push_str(&text);
                            (text, String::new())
                        }
                        Stream::Stderr => {
                            self.stderr.push_str(&text);
                            (String::new(), text)
                        }
                    };
                    events.push(RunEvent::Output { tag: run.tag.clone(), stdout, stderr });
                }
                Message::Closed { run: id } if id == run.id => {
                    run.open_streams = run.open_streams.saturating_sub(1);
                }
                _ => {}
            }
        }

        // Finished once the process exited and its pipes closed, or once the
        // grace period ran out. Readers still blocked on an inherited pipe are
        // abandoned; their late chunks carry a stale run id.
        let status = match self.active.as_mut() {
            Some(run) => {
                if run.exited.is_none() {
                    match run.child.try_wait() {
                        Ok(Some(status)) => run.exited = Some((RunStatus::from(status), Instant::now())),
                        Ok(None) => {}
                        Err(e) => {
                            log::warn!("run #{}: wait failed: {}", run.id, e);
                            run.exited = Some((RunStatus::Signaled(None), Instant::now()));
                        }
                    }
                }
                match &run.exited {
                    Some((status, at)) if run.open_streams == 0 || at.elapsed() >= EXIT_GRACE => {
                        if run.open_streams > 0 {
                            log::debug!("run #{}: exited with pipes still open, not waiting", run.id);
                        }
                        Some(status.clone())
                    }
                    _ => None,
                }
            }
            None => None,
        };
        if let Some(status) = status
            && let Some(event) = self.finish(status)
        {
            events.push(event);
        }

        events
    }

    fn is_running(&self) -> bool {
        self.active.is_some() || self.failed_launch.is_some()
    }

    fn cancel(&mut self) {
        self.kill_active();
    }
}

impl<T> Drop for CommandRunner<T> {
    fn drop(&mut self) {
        self.kill_active();
    }
}

/// Start a process and forget about it (output discarded, reaped off-thread)
pub fn spawn_detached(program: &Path, args: &[String]) -> AppResult<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| AppError::Launch { program: program.display().to_string(), source })?;
    thread::spawn(move || {
        let _ = child.wait();
    });
    Ok(())
}

fn spawn_reader<R: Read + Send + 'static>(run: u64, stream: Stream, mut source: R, tx: Sender<Message>) {
    thread::spawn(move || {
        let mut decoder = Utf8Decoder::default();
        let mut buf = [0u8; READ_CHUNK];
        loop {
            match source.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    let text = decoder.decode(&buf[..n]);
                    if !text.is_empty() && tx.send(Message::Chunk { run, stream, text }).is_err() {
                        return;
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
        let tail = decoder.finish();
        if !tail.is_empty() {
            let _ = tx.send(Message::Chunk { run, stream, text: tail });
        }
        let _ = tx.send(Message::Closed { run });
    });
}

/// Lossy UTF-8 decoder that carries incomplete sequences over to the next read
#[derive(Default)]
struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    fn decode(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let mut out = String::new();
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    out.push_str(text);
                    self.pending.clear();
                    break;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + len);
                        }
                        None => {
                            // Truncated sequence at the end, wait for more bytes
                            self.pending.drain(..valid);
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    fn finish(&mut self) -> String {
        let tail = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        tail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    /// Poll until a Finished event arrives, returning every event seen
    fn run_to_end<T: Clone>(runner: &mut CommandRunner<T>) -> Vec<RunEvent<T>> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut events = Vec::new();
        while Instant::now() < deadline {
            let batch = runner.poll();
            let done = batch.iter().any(|e| matches!(e, RunEvent::Finished { .. }));
            events.extend(batch);
            if done {
                return events;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("run did not finish in time");
    }

    fn finished<T: Clone>(events: &[RunEvent<T>]) -> (T, RunResult) {
        match events.last() {
            Some(RunEvent::Finished { tag, result }) => (tag.clone(), result.clone()),
            _ => panic!("last event is not Finished"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_runner_collects_output_and_exit_code() {
        let mut runner = CommandRunner::new("sh");
        runner.start(sh("printf hello; printf oops >&2; exit 3"), 7u32);
        let events = run_to_end(&mut runner);
        let (tag, result) = finished(&events);

        assert_eq!(tag, 7);
        assert_eq!(result.status, RunStatus::Exited(3));
        assert_eq!(result.stdout, "hello");
        assert_eq!(result.stderr, "oops");
        assert_eq!(result.error_text(), "oops");
        assert!(!runner.is_running());

        let streamed: String = events.iter().filter_map(|e| match e {
            RunEvent::Output { stdout, .. } => Some(stdout.as_str()),
            _ => None,
        }).collect();
        assert_eq!(streamed, "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_runner_chunks_arrive_in_order() {
        let mut runner = CommandRunner::new("sh");
        runner.start(sh("for i in 1 2 3 4 5; do echo line$i; sleep 0.02; done"), ());
        let events = run_to_end(&mut runner);
        let (_, result) = finished(&events);
        assert!(result.success());
        assert_eq!(result.stdout, "line1\nline2\nline3\nline4\nline5\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_runner_finishes_when_process_exits() {
        // The background sleep inherits stdout and keeps the pipe open
        let mut runner = CommandRunner::new("sh");
        let started = Instant::now();
        runner.start(sh("echo hi; sleep 3 &"), ());
        let events = run_to_end(&mut runner);
        let (_, result) = finished(&events);

        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(result.success());
        assert_eq!(result.stdout, "hi\n");
        assert!(!runner.is_running());
    }

    #[cfg(unix)]
    #[test]
    fn test_runner_replace_on_start() {
        let mut runner = CommandRunner::new("sh");
        runner.start(sh("echo first; sleep 5; echo late"), 1u32);
        thread::sleep(Duration::from_millis(50));
        let started = Instant::now();
        runner.start(sh("echo second"), 2u32);
        let events = run_to_end(&mut runner);

        assert!(started.elapsed() < Duration::from_secs(4));
        assert!(events.iter().all(|e| match e {
            RunEvent::Output { tag, .. } | RunEvent::Finished { tag, .. } => *tag == 2,
        }));
        let (_, result) = finished(&events);
        assert_eq!(result.stdout, "second\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_runner_cancel_produces_no_events() {
        let mut runner = CommandRunner::new("sh");
        runner.start(sh("sleep 5"), ());
        runner.cancel();
        assert!(!runner.is_running());
        thread::sleep(Duration::from_millis(50));
        assert!(runner.poll().is_empty());
    }

    #[test]
    fn test_runner_launch_failure() {
        let mut runner = CommandRunner::new("/nonexistent/adb-for-tests");
        runner.start(vec!["devices".to_string()], "probe");
        let events = runner.poll();
        let (tag, result) = finished(&events);
        assert_eq!(tag, "probe");
        assert!(matches!(result.status, RunStatus::LaunchFailed(_)));
        assert!(!result.success());
        assert!(!runner.is_running());
        assert!(runner.poll().is_empty());
    }

    #[test]
    fn test_utf8_decoder_split_sequence() {
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.decode(&[b'a', 0xC3]), "a");
        assert_eq!(decoder.decode(&[0xA9, b'b']), "\u{e9}b");
        assert_eq!(decoder.finish(), "");
    }

    #[test]
    fn test_utf8_decoder_invalid_bytes() {
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.decode(&[b'a', 0xFF, b'b']), "a\u{FFFD}b");
        assert_eq!(decoder.decode(&[0xE2, 0x82]), "");
        assert_eq!(decoder.finish(), "\u{FFFD}");
    }

    #[test]
    fn test_error_text_fallbacks() {
        let result = RunResult { status: RunStatus::Exited(1), stdout: "ls: /x: No such file\n".into(), stderr: String::new() };
        assert_eq!(result.error_text(), "ls: /x: No such file");
        let result = RunResult { status: RunStatus::Exited(2), stdout: String::new(), stderr: String::new() };
        assert_eq!(result.error_text(), "exit code 2");
        let result = RunResult { status: RunStatus::Signaled(Some(9)), stdout: String::new(), stderr: " \n".into() };
        assert_eq!(result.error_text(), "terminated by signal 9");
    }
}

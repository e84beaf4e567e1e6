//! Scripted `Bridge` for state machine tests

use std::collections::VecDeque;

use super::runner::{Bridge, RunEvent, RunResult, RunStatus};

/// Records every `start` and delivers completions only when told to,
/// in whatever order the test chooses.
pub struct FakeBridge<T> {
    pub started: Vec<(Vec<String>, T)>,
    pub cancelled: usize,
    queued: VecDeque<RunEvent<T>>,
    running: bool,
}

impl<T: Clone> FakeBridge<T> {
    pub fn new() -> Self {
        Self { started: Vec::new(), cancelled: 0, queued: VecDeque::new(), running: false }
    }

    pub fn last_args(&self) -> Vec<String> {
        self.started.last().map(|(args, _)| args.clone()).unwrap_or_default()
    }

    pub fn finish(&mut self, index: usize, status: RunStatus, stdout: &str, stderr: &str) {
        let tag = self.started[index].1.clone();
        self.queued.push_back(RunEvent::Finished {
            tag,
            result: RunResult { status, stdout: stdout.to_string(), stderr: stderr.to_string() },
        });
    }

    pub fn succeed(&mut self, index: usize, stdout: &str) {
        self.finish(index, RunStatus::Exited(0), stdout, "");
    }

    pub fn fail(&mut self, index: usize, stderr: &str) {
        self.finish(index, RunStatus::Exited(1), "", stderr);
    }

    /// Complete the most recent invocation successfully
    pub fn succeed_last(&mut self, stdout: &str) {
        self.succeed(self.started.len() - 1, stdout);
    }

    /// Fail the most recent invocation with exit code 1
    pub fn fail_last(&mut self, stderr: &str) {
        self.fail(self.started.len() - 1, stderr);
    }
}

impl<T: Clone> Bridge<T> for FakeBridge<T> {
    fn start(&mut self, args: Vec<String>, tag: T) {
        self.started.push((args, tag));
        self.running = true;
    }

    fn poll(&mut self) -> Vec<RunEvent<T>> {
        let events: Vec<_> = self.queued.drain(..).collect();
        if events.iter().any(|e| matches!(e, RunEvent::Finished { .. })) {
            self.running = false;
        }
        events
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn cancel(&mut self) {
        self.cancelled += 1;
        self.running = false;
    }
}

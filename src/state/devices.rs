//! Device status checks and adb server restarts

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::adb::parse::parse_device_list;
use crate::adb::runner::spawn_detached;
use crate::adb::{Bridge, RunEvent, RunResult, commands};
use super::events::SessionEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceTag {
    Check,
    KillServer,
}

pub struct DeviceMonitor<B> {
    bridge: B,
    adb_path: PathBuf,
    restart_delay: Duration,
    /// When the post-restart device check is due
    check_at: Option<Instant>,
    outbox: Vec<SessionEvent>,
}

impl<B: Bridge<DeviceTag>> DeviceMonitor<B> {
    pub fn new(bridge: B, adb_path: impl Into<PathBuf>, restart_delay: Duration) -> Self {
        Self {
            bridge,
            adb_path: adb_path.into(),
            restart_delay,
            check_at: None,
            outbox: Vec::new(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.bridge.is_running() || self.check_at.is_some()
    }

    /// Run `adb devices`
    pub fn check(&mut self) {
        self.bridge.start(commands::devices(), DeviceTag::Check);
    }

    /// Kill the adb server, start it again detached, and re-check devices
    /// once the new server had time to come up.
    pub fn restart_server(&mut self) {
        self.check_at = None;
        self.outbox.push(SessionEvent::Log("Restarting adb server...".to_string()));
        self.bridge.start(commands::kill_server(), DeviceTag::KillServer);
    }

    pub fn poll(&mut self) -> Vec<SessionEvent> {
        self.poll_at(Instant::now())
    }

    fn poll_at(&mut self, now: Instant) -> Vec<SessionEvent> {
        for event in self.bridge.poll() {
            if let RunEvent::Finished { tag, result } = event {
                match tag {
                    DeviceTag::Check => self.check_finished(result),
                    DeviceTag::KillServer => self.kill_finished(result, now),
                }
            }
        }

        if let Some(due) = self.check_at
            && now >= due
        {
            self.check_at = None;
            self.check();
        }

        std::mem::take(&mut self.outbox)
    }

    fn check_finished(&mut self, result: RunResult) {
        if !result.success() {
            let error = result.error_text();
            self.outbox.push(SessionEvent::Log(format!("Device check failed: {}", error)));
            self.outbox.push(SessionEvent::DeviceCheckFailed(error));
            return;
        }

        let snapshot = parse_device_list(&result.stdout);
        if snapshot.is_empty() {
            self.outbox.push(SessionEvent::Log(
                "No devices connected. Connect device and enable USB debugging.".to_string(),
            ));
        } else if !snapshot.connected.is_empty() {
            self.outbox.push(SessionEvent::Log(format!("Device(s) connected: {}", snapshot.connected.join(", "))));
        } else {
            self.outbox.push(SessionEvent::Log(format!("Device(s) offline: {}", snapshot.offline.join(", "))));
            self.outbox.push(SessionEvent::DevicesOffline);
        }
        self.outbox.push(SessionEvent::DeviceStatusChanged(snapshot));
    }

    fn kill_finished(&mut self, result: RunResult, now: Instant) {
        if !result.success() {
            // Usually just "no server running"
            log::debug!("kill-server: {}", result.error_text());
        }

        if let Err(e) = spawn_detached(&self.adb_path, &commands::start_server()) {
            self.outbox.push(SessionEvent::Log(format!("Could not start adb server: {}", e)));
        }
        self.check_at = Some(now + self.restart_delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adb::DeviceSnapshot;
    use crate::adb::fake::FakeBridge;

    fn monitor() -> DeviceMonitor<FakeBridge<DeviceTag>> {
        DeviceMonitor::new(FakeBridge::new(), "/nonexistent/adb-for-tests", Duration::from_millis(500))
    }

    #[test]
    fn test_check_reports_connected_devices() {
        let mut devices = monitor();
        devices.check();
        assert_eq!(devices.bridge.last_args(), vec!["devices"]);
        devices.bridge.succeed_last("List of devices attached\nemulator-5554\tdevice\n");

        let events = devices.poll();
        assert!(events.contains(&SessionEvent::Log("Device(s) connected: emulator-5554".to_string())));
        assert!(events.contains(&SessionEvent::DeviceStatusChanged(DeviceSnapshot {
            connected: vec!["emulator-5554".to_string()],
            offline: vec![],
        })));
        assert!(!events.contains(&SessionEvent::DevicesOffline));
    }

    #[test]
    fn test_check_warns_when_only_offline() {
        let mut devices = monitor();
        devices.check();
        devices.bridge.succeed_last("List of devices attached\n0123ABC\toffline\n");
        let events = devices.poll();
        assert!(events.contains(&SessionEvent::DevicesOffline));
        assert!(events.contains(&SessionEvent::Log("Device(s) offline: 0123ABC".to_string())));
    }

    #[test]
    fn test_check_without_devices() {
        let mut devices = monitor();
        devices.check();
        devices.bridge.succeed_last("List of devices attached\n\n");
        let events = devices.poll();
        assert!(events.contains(&SessionEvent::DeviceStatusChanged(DeviceSnapshot::default())));
    }

    #[test]
    fn test_check_failure() {
        let mut devices = monitor();
        devices.check();
        devices.bridge.fail_last("cannot connect to daemon");
        let events = devices.poll();
        assert!(events.contains(&SessionEvent::DeviceCheckFailed("cannot connect to daemon".to_string())));
    }

    #[test]
    fn test_restart_schedules_delayed_check() {
        let mut devices = monitor();
        devices.restart_server();
        assert_eq!(devices.bridge.last_args(), vec!["kill-server"]);

        let start = Instant::now();
        devices.bridge.succeed_last("");
        let events = devices.poll_at(start);
        // The test adb path does not exist, so the detached start is reported
        assert!(events.iter().any(|e| matches!(e, SessionEvent::Log(line) if line.starts_with("Could not start adb server"))));
        assert!(devices.is_busy());
        assert_eq!(devices.bridge.started.len(), 1);

        devices.poll_at(start + Duration::from_millis(100));
        assert_eq!(devices.bridge.started.len(), 1);

        devices.poll_at(start + Duration::from_millis(500));
        assert_eq!(devices.bridge.last_args(), vec!["devices"]);
    }
}

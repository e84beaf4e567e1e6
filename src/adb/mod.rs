//! Everything that talks to the adb executable

pub mod commands;
pub mod parse;
pub mod path;
pub mod runner;

#[cfg(test)]
pub mod fake;

pub use parse::{DeviceSnapshot, RemoteEntry};
pub use runner::{Bridge, CommandRunner, RunEvent, RunResult, RunStatus};

/// Answer of the remote directory test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteKind {
    Dir,
    File,
}

/// Ask the device whether `path` is a directory.
///
/// The answer arrives as the `Finished` event for `tag`; feed its result to
/// [`probe_kind`].
pub fn check_is_remote_directory<T, B: Bridge<T>>(bridge: &mut B, path: &str, tag: T) {
    bridge.start(commands::dir_test(path), tag);
}

/// Interpret a finished directory test. Anything other than a clean `dir`
/// answer counts as a file, which the caller then tries to preview.
pub fn probe_kind(result: &RunResult) -> RemoteKind {
    if result.success() && result.stdout.trim() == "dir" {
        RemoteKind::Dir
    } else {
        RemoteKind::File
    }
}

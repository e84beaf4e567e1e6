//! Argument lists for every adb invocation the browser makes

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// Single-quote a path for the device shell, which re-splits `adb shell` arguments
fn remote_quote(path: &str) -> String {
    format!("'{}'", path.replace('\'', "'\\''"))
}

pub fn devices() -> Vec<String> {
    args(&["devices"])
}

pub fn kill_server() -> Vec<String> {
    args(&["kill-server"])
}

pub fn start_server() -> Vec<String> {
    args(&["start-server"])
}

/// `shell ls -p <path>`: directories come back with a trailing slash
pub fn list_dir(path: &str) -> Vec<String> {
    vec!["shell".to_string(), format!("ls -p {}", remote_quote(path))]
}

/// Shell test that prints `dir` or `file` for a remote path
pub fn dir_test(path: &str) -> Vec<String> {
    vec![
        "shell".to_string(),
        format!("if [ -d {} ]; then echo dir; else echo file; fi", remote_quote(path)),
    ]
}

pub fn pull(remote: &str, local: &str) -> Vec<String> {
    args(&["pull", remote, local])
}

pub fn push(local: &str, remote: &str) -> Vec<String> {
    args(&["push", local, remote])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_test_command() {
        assert_eq!(
            dir_test("/sdcard/My Files"),
            vec!["shell", "if [ -d '/sdcard/My Files' ]; then echo dir; else echo file; fi"]
        );
    }

    #[test]
    fn test_list_dir_command() {
        assert_eq!(list_dir("/sdcard"), vec!["shell", "ls -p '/sdcard'"]);
    }

    #[test]
    fn test_remote_paths_are_quoted() {
        assert_eq!(list_dir("/sdcard/My Files"), vec!["shell", "ls -p '/sdcard/My Files'"]);
        assert_eq!(list_dir("/sdcard/it's $HOME"), vec!["shell", "ls -p '/sdcard/it'\\''s $HOME'"]);
        assert_eq!(
            dir_test("/sdcard/a;b"),
            vec!["shell", "if [ -d '/sdcard/a;b' ]; then echo dir; else echo file; fi"]
        );
    }
}

//! POSIX path helpers for paths on the device.
//!
//! Remote paths are plain strings; `std::path` would apply host rules on Windows.

/// Parent of a remote path: strip trailing slashes, take the directory part,
/// and fall back to "/" when nothing is left.
pub fn parent_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => trimmed[..idx].to_string(),
    }
}

/// Join a name onto a remote directory
pub fn join(dir: &str, name: &str) -> String {
    let name = name.trim_end_matches('/');
    if name.starts_with('/') {
        return name.to_string();
    }
    if dir.ends_with('/') {
        format!("{}{}", dir, name)
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Last component of a remote path
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Resolve user input against the current directory
pub fn resolve(current: &str, input: &str) -> String {
    let input = input.trim();
    if input.is_empty() {
        return current.to_string();
    }
    if input.starts_with('/') {
        let trimmed = input.trim_end_matches('/');
        if trimmed.is_empty() { "/".to_string() } else { trimmed.to_string() }
    } else {
        join(current, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("/sdcard/DCIM"), "/sdcard");
        assert_eq!(parent_path("/sdcard/DCIM/"), "/sdcard");
        assert_eq!(parent_path("/sdcard"), "/");
        assert_eq!(parent_path("/"), "/");
        assert_eq!(parent_path(""), "/");
    }

    #[test]
    fn test_join() {
        assert_eq!(join("/", "sdcard"), "/sdcard");
        assert_eq!(join("/sdcard", "DCIM/"), "/sdcard/DCIM");
        assert_eq!(join("/sdcard/", "a.txt"), "/sdcard/a.txt");
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("/sdcard/a.txt"), "a.txt");
        assert_eq!(basename("/sdcard/DCIM/"), "DCIM");
        assert_eq!(basename("a.txt"), "a.txt");
    }

    #[test]
    fn test_resolve() {
        assert_eq!(resolve("/sdcard", "Download"), "/sdcard/Download");
        assert_eq!(resolve("/sdcard", "/data/local/tmp/"), "/data/local/tmp");
        assert_eq!(resolve("/sdcard", "/"), "/");
        assert_eq!(resolve("/sdcard", "  "), "/sdcard");
    }
}

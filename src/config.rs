//! Configuration management

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{AppError, AppResult};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Preview settings
    pub preview: PreviewConfig,
    /// Display settings
    pub display: DisplayConfig,
    /// Log file settings
    pub logging: LoggingConfig,
    /// External viewers for non-text previews (pattern -> command)
    #[serde(default = "default_handlers")]
    pub handlers: Vec<FileHandler>,
}

/// File handler rule: maps a regex pattern to a command
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileHandler {
    /// Regex pattern to match against filename (e.g., "\\.mp4$", "\\.pdf$")
    pub pattern: String,
    /// Command to run. Use {} as placeholder for the file path.
    /// Example: "vlc {}" or "xdg-open {}"
    pub command: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// adb executable (name on PATH or full path)
    pub adb_path: String,
    /// Remote directory opened on startup
    pub start_path: String,
    /// Save the remote path on exit and reopen it next time
    pub remember_path: bool,
    /// Last remote path (auto-saved)
    pub last_path: Option<String>,
    /// Delay between `start-server` and the device re-check
    pub restart_check_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Characters shown by the text preview
    pub text_limit: usize,
    /// Bytes read when guessing whether an unknown file is text
    pub sniff_limit: usize,
    /// Where pulled previews are stored (empty = system temp dir)
    pub temp_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Color preset: "dark", "classic" or "light"
    pub theme: String,
    /// Lines of log shown under the listing
    pub console_height: u16,
    /// Per-color overrides on top of the preset (name -> color)
    pub colors: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log filter (RUST_LOG overrides it)
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            preview: PreviewConfig::default(),
            display: DisplayConfig::default(),
            logging: LoggingConfig::default(),
            handlers: default_handlers(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            adb_path: "adb".to_string(),
            start_path: "/".to_string(),
            remember_path: false,
            last_path: None,
            restart_check_delay_ms: 500,
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            text_limit: 16_000,
            sniff_limit: 32_000,
            temp_dir: String::new(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            console_height: 6,
            colors: HashMap::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

/// Returns the platform-appropriate default open command
fn default_open_command() -> &'static str {
    #[cfg(target_os = "linux")]
    { "setsid xdg-open {}" }
    #[cfg(target_os = "macos")]
    { "open {}" }
    #[cfg(target_os = "windows")]
    { "explorer {}" }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    { "setsid xdg-open {}" }
}

/// Default viewers, one per non-text preview category
pub fn default_handlers() -> Vec<FileHandler> {
    let cmd = default_open_command().to_string();
    [
        r"(?i)\.(png|jpe?g|bmp|gif)$",
        r"(?i)\.(mp4|mov|avi|mkv|webm)$",
        r"(?i)\.(mp3|m4a|aac|wav|flac|ogg)$",
        r"(?i)\.pdf$",
    ]
    .into_iter()
    .map(|pattern| FileHandler { pattern: pattern.to_string(), command: cmd.clone() })
    .collect()
}

/// Get the config directory path for the current platform
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        // Linux: ~/.config/adbrowse
        dirs_next().map(|p| p.join("adbrowse"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config/adbrowse"))
    }

    #[cfg(target_os = "windows")]
    {
        // Windows: %APPDATA%\adbrowse
        std::env::var("APPDATA")
            .ok()
            .map(|p| PathBuf::from(p).join("adbrowse"))
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        std::env::var("HOME").ok().map(|p| PathBuf::from(p).join(".config/adbrowse"))
    }
}

#[cfg(target_os = "linux")]
fn dirs_next() -> Option<PathBuf> {
    // Check XDG_CONFIG_HOME first, then fall back to ~/.config
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("HOME").ok().map(|p| PathBuf::from(p).join(".config")))
}

/// Get the config file path
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Get the log file path
pub fn log_file() -> Option<PathBuf> {
    config_dir().map(|p| p.join("adbrowse.log"))
}

/// Default config file content with comments
fn default_config() -> String {
    let open_cmd = default_open_command();
    format!(r##"# adbrowse configuration
# This file is auto-generated. Edit as needed.

[general]
# adb executable: a name found on PATH or a full path
adb_path = "adb"

# Remote directory opened on startup
start_path = "/"

# Save the remote path on exit and reopen it next time
remember_path = false

# Milliseconds to wait after restarting the adb server before checking devices again
restart_check_delay_ms = 500

[preview]
# Number of characters shown in the text preview
text_limit = 16000

# Bytes read to decide whether a file with an unknown extension is text
sniff_limit = 32000

# Directory for pulled preview files (empty = system temp directory)
# Files are removed when adbrowse exits.
temp_dir = ""

[display]
# Color preset: "dark", "classic" or "light"
theme = "dark"

# Lines of log output shown below the file list
console_height = 6

# Override single colors of the preset. Values are names ("yellow",
# "light_cyan"), hex ("#005f5f") or "rgb(0,95,95)".
# [display.colors]
# cursor_bg = "#005f5f"
# file_directory = "light_blue"

[logging]
# Log level written to adbrowse.log in this directory
# (error, warn, info, debug, trace). RUST_LOG overrides it.
level = "info"

# External viewers for images, video, audio and PDF.
# Text files are shown in the built-in preview.
# The first handler whose pattern matches the file name is used.
# {{}} is replaced with the path of the pulled file.

[[handlers]]
pattern = '(?i)\.(png|jpe?g|bmp|gif)$'
command = "{open_cmd}"

[[handlers]]
pattern = '(?i)\.(mp4|mov|avi|mkv|webm)$'
command = "{open_cmd}"

[[handlers]]
pattern = '(?i)\.(mp3|m4a|aac|wav|flac|ogg)$'
command = "{open_cmd}"

[[handlers]]
pattern = '(?i)\.pdf$'
command = "{open_cmd}"
"##, open_cmd = open_cmd)
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist.
    /// Problems come back as warnings since logging is configured from the result.
    pub fn load() -> (Self, Vec<String>) {
        match config_file() {
            Some(config_path) => Self::load_from(&config_path),
            None => (Config::default(), vec!["Could not determine config directory".to_string()]),
        }
    }

    fn load_from(config_path: &Path) -> (Self, Vec<String>) {
        let fallback = |warning: String| (Config::default(), vec![warning]);

        // Create config directory if it doesn't exist
        if let Some(config_dir) = config_path.parent()
            && !config_dir.exists()
            && let Err(e) = fs::create_dir_all(config_dir)
        {
            return fallback(format!("Could not create config directory: {}", e));
        }

        // Create default config if it doesn't exist
        if !config_path.exists()
            && let Err(e) = fs::write(config_path, default_config())
        {
            return fallback(format!("Could not create config file: {}", e));
        }

        match fs::read_to_string(config_path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => (config, Vec::new()),
                Err(e) => fallback(format!("{}; using default configuration", e)),
            },
            Err(e) => fallback(format!("Could not read config file: {}", e)),
        }
    }

    /// Parse configuration text
    pub fn parse(content: &str) -> AppResult<Self> {
        toml_edit::de::from_str(content)
            .map_err(|e| AppError::Config(format!("Could not parse config file: {}", e)))
    }

    /// Save configuration to file (preserving comments)
    pub fn save(&self) -> AppResult<()> {
        let config_path = config_file()
            .ok_or_else(|| AppError::Config("Could not determine config path".to_string()))?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir)?;
        }

        let existing = fs::read_to_string(&config_path).unwrap_or_else(|_| default_config());
        let content = self.update_toml_preserving_comments(&existing)?;
        fs::write(&config_path, content)?;

        Ok(())
    }

    /// Update TOML content while preserving comments and formatting
    fn update_toml_preserving_comments(&self, existing: &str) -> AppResult<String> {
        use toml_edit::{DocumentMut, Item, Table, value};

        let mut doc: DocumentMut = existing
            .parse()
            .map_err(|e| AppError::Config(format!("Could not parse config file: {}", e)))?;

        if !doc.contains_table("general") {
            doc["general"] = Item::Table(Table::new());
        }
        if let Some(general) = doc.get_mut("general").and_then(|v| v.as_table_mut()) {
            general["adb_path"] = value(&self.general.adb_path);
            general["start_path"] = value(&self.general.start_path);
            general["remember_path"] = value(self.general.remember_path);
            general["restart_check_delay_ms"] = value(self.general.restart_check_delay_ms as i64);
            if let Some(ref path) = self.general.last_path {
                general["last_path"] = value(path.as_str());
            }
        }

        Ok(doc.to_string())
    }

    /// Remember the current remote path when `remember_path` is on
    pub fn save_last_path(&mut self, path: &str) {
        if !self.general.remember_path {
            return;
        }
        self.general.last_path = Some(path.to_string());
        if let Err(e) = self.save() {
            log::warn!("Could not save last path: {}", e);
        }
    }

    /// Remote directory to open on startup
    pub fn initial_path(&self) -> String {
        let path = match (&self.general.last_path, self.general.remember_path) {
            (Some(last), true) => last.as_str(),
            _ => self.general.start_path.as_str(),
        };
        if path.starts_with('/') { path.to_string() } else { "/".to_string() }
    }

    /// Directory that receives pulled preview files
    pub fn preview_dir(&self) -> PathBuf {
        if self.preview.temp_dir.trim().is_empty() {
            std::env::temp_dir()
        } else {
            PathBuf::from(self.preview.temp_dir.trim())
        }
    }

    /// Find a handler command for the given filename
    /// Returns the command with {} replaced by the quoted file path
    pub fn find_handler(&self, filename: &str, file_path: &std::path::Path) -> Option<String> {
        for handler in &self.handlers {
            match regex::Regex::new(&handler.pattern) {
                Ok(re) if re.is_match(filename) => {
                    // Quote the path for shell safety
                    let quoted_path = shell_quote(&file_path.to_string_lossy());
                    return Some(handler.command.replace("{}", &quoted_path));
                }
                Ok(_) => {}
                Err(e) => log::warn!("Invalid handler pattern {:?}: {}", handler.pattern, e),
            }
        }
        None
    }
}

/// Quote a string for shell use
#[cfg(unix)]
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace("'", "'\\''"))
}

/// Quote a string for cmd.exe use (double quotes, escape internal double quotes)
#[cfg(windows)]
fn shell_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\\\""))
}

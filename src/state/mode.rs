//! Input modes and the dialogs they carry

/// Which text prompt is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Jump to a remote path
    GoTo,
    /// Save the selected remote file locally
    Download,
    /// Manual `adb pull`
    Pull,
    /// Manual `adb push`
    Push,
}

impl PromptKind {
    pub fn title(self) -> &'static str {
        match self {
            PromptKind::GoTo => " Go to ",
            PromptKind::Download => " Download ",
            PromptKind::Pull => " Pull from device ",
            PromptKind::Push => " Push to device ",
        }
    }

    /// Labels of the text fields, in focus order
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            PromptKind::GoTo => &["Remote path:"],
            PromptKind::Download => &["Save as:"],
            PromptKind::Pull => &["Remote path:", "Local path:"],
            PromptKind::Push => &["Local path:", "Remote path:"],
        }
    }

    pub fn ok_label(self) -> &'static str {
        match self {
            PromptKind::GoTo => "Go",
            PromptKind::Download => "Save",
            PromptKind::Pull => "Pull",
            PromptKind::Push => "Push",
        }
    }
}

/// Application mode
#[derive(Debug, Clone)]
pub enum Mode {
    /// Browsing the remote listing
    Normal,
    /// Full-screen view of the text preview (F3)
    Viewing {
        /// Remote file being shown
        path: String,
        lines: Vec<String>,
        scroll: usize,
    },
    /// Text prompt dialog
    Prompt {
        kind: PromptKind,
        /// One input per label of `kind`
        fields: Vec<String>,
        /// Char cursor per field
        cursors: Vec<usize>,
        /// Focused element: fields first, then OK, then Cancel
        focus: usize,
        /// Remote file a download refers to
        target: Option<String>,
    },
    /// Message box dismissed with Enter or Esc
    Notice {
        title: String,
        lines: Vec<String>,
    },
}

impl Mode {
    /// Open a prompt with its fields pre-filled
    pub fn prompt(kind: PromptKind, initial: Vec<String>, target: Option<String>) -> Self {
        let mut fields = initial;
        fields.resize(kind.labels().len(), String::new());
        let cursors = fields.iter().map(|f| f.chars().count()).collect();
        Mode::Prompt { kind, fields, cursors, focus: 0, target }
    }

    /// Full-screen viewer over a text preview
    pub fn viewing(path: &str, text: &str) -> Self {
        Mode::Viewing {
            path: path.to_string(),
            lines: text.lines().map(|l| l.replace('\t', "    ")).collect(),
            scroll: 0,
        }
    }
}

//! What the preview pane currently shows

use crate::preview::PreviewCategory;

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewPane {
    /// Nothing selected for preview yet
    Empty,
    /// Pull in progress
    Loading { remote: String },
    Text { remote: String, text: String },
    /// Handed off to an external viewer
    External { remote: String, category: PreviewCategory, command: String },
    /// Non-text file with no matching `[[handlers]]` rule
    NoViewer { remote: String, category: PreviewCategory },
    Unsupported { remote: String },
    Failed { remote: String, error: String },
}

impl PreviewPane {
    /// Remote file the pane refers to
    pub fn remote(&self) -> Option<&str> {
        match self {
            PreviewPane::Empty => None,
            PreviewPane::Loading { remote }
            | PreviewPane::Text { remote, .. }
            | PreviewPane::External { remote, .. }
            | PreviewPane::NoViewer { remote, .. }
            | PreviewPane::Unsupported { remote }
            | PreviewPane::Failed { remote, .. } => Some(remote),
        }
    }

    /// Lines to draw in the pane body (text previews are drawn separately)
    pub fn message(&self) -> Vec<String> {
        match self {
            PreviewPane::Empty => vec!["Select a file and press Enter or p to preview it.".to_string()],
            PreviewPane::Loading { remote } => vec![format!("Pulling {}...", remote)],
            PreviewPane::Text { text, .. } => text.lines().map(str::to_string).collect(),
            PreviewPane::External { category, command, .. } => vec![
                format!("Opened {} preview in an external viewer:", category.label()),
                String::new(),
                command.clone(),
            ],
            PreviewPane::NoViewer { category, .. } => vec![
                format!("No viewer configured for this {} file.", category.label()),
                String::new(),
                "Add a [[handlers]] rule to the config file.".to_string(),
            ],
            PreviewPane::Unsupported { .. } => vec!["Preview not supported for this file type.".to_string()],
            PreviewPane::Failed { error, .. } => vec!["Failed to load preview.".to_string(), String::new(), error.clone()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_and_unsupported_read_differently() {
        let failed = PreviewPane::Failed { remote: "/a".to_string(), error: "Permission denied".to_string() };
        let unsupported = PreviewPane::Unsupported { remote: "/a".to_string() };
        assert_ne!(failed.message(), unsupported.message());
        assert!(failed.message().iter().any(|l| l.contains("Permission denied")));
        assert_eq!(failed.remote(), Some("/a"));
        assert_eq!(PreviewPane::Empty.remote(), None);
    }
}

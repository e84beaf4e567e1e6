//! Status console shown under the listing

/// Lines kept in memory; older ones scroll away
const MAX_LINES: usize = 1000;

/// Log of status messages, most recent last.
///
/// Every line is mirrored to the log file at info level.
#[derive(Debug, Clone, Default)]
pub struct Console {
    lines: Vec<String>,
}

impl Console {
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::info!("{}", line);
        self.lines.push(line);
        if self.lines.len() > MAX_LINES {
            self.lines.remove(0);
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_caps_history() {
        let mut console = Console::default();
        for i in 0..MAX_LINES + 5 {
            console.push(format!("line {}", i));
        }
        assert_eq!(console.lines().len(), MAX_LINES);
        assert_eq!(console.lines()[0], "line 5");
        assert_eq!(console.last(), Some(format!("line {}", MAX_LINES + 4).as_str()));
    }
}

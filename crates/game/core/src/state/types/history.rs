//! Player-facing transcript.
//!
//! Game text is not logging: every line the player should read is written
//! here, grouped by the command that produced it.

use strum::{AsRefStr, Display};

/// Presentation hint for a transcript line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case")]
pub enum Style {
    #[default]
    Normal,
    Success,
    Warning,
    Danger,
    Special,
    /// Joined to the previous line without spacing.
    NoSpace,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    pub text: String,
    pub style: Style,
}

/// Output of one command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryEntry {
    pub command: String,
    pub lines: Vec<Line>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the entry that subsequent writes go to.
    pub fn push(&mut self, command: impl Into<String>) {
        self.entries.push(HistoryEntry {
            command: command.into(),
            lines: Vec::new(),
        });
    }

    pub fn write(&mut self, text: impl Into<String>, style: Style) {
        if self.entries.is_empty() {
            self.push("");
        }
        if let Some(entry) = self.entries.last_mut() {
            entry.lines.push(Line {
                text: text.into(),
                style,
            });
        }
    }

    pub fn say(&mut self, text: impl Into<String>) {
        self.write(text, Style::Normal);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn last_entry(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Every line written so far, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.entries.iter().flat_map(|entry| entry.lines.iter())
    }

    /// Most recent line.
    pub fn last_line(&self) -> Option<&Line> {
        self.entries.iter().rev().find_map(|entry| entry.lines.last())
    }

    /// True if any line contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.lines().any(|line| line.text.contains(needle))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_group_under_their_command() {
        let mut history = History::new();
        history.push("look");
        history.say("You see a hall.");
        history.push("n");
        history.write("You can't go that way!", Style::Warning);

        assert_eq!(history.entries().len(), 2);
        assert_eq!(history.entries()[0].lines.len(), 1);
        let last = history.last_line().map(|line| line.style);
        assert_eq!(last, Some(Style::Warning));
        assert!(history.mentions("hall"));
    }

    #[test]
    fn writing_without_an_entry_opens_one() {
        let mut history = History::new();
        history.say("Welcome.");
        assert_eq!(history.entries().len(), 1);
        assert_eq!(history.entries()[0].command, "");
    }
}

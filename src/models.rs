//! Domain model shared by the item list, the overview table and the edit
//! dialog. Records stay plain data holders; the list they live in decides
//! their identity (a record is "the song at row N"), so there is no id here.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// A single song entry in the library.
pub struct Item {
    /// Title displayed in the first table column and the details panel.
    pub name: String,
    /// Duration as typed by the user (for example `3:21`). The text is shown
    /// as-is and never parsed.
    pub time: String,
}

impl Item {
    pub fn new(name: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time: time.into(),
        }
    }

    /// True for the freshly constructed record handed to the "new song"
    /// dialog.
    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.time.is_empty()
    }
}

impl fmt::Display for Item {
    /// `Name (time)`, or just the name when no duration was entered.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.time.trim().is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.time)
        }
    }
}

/// A handful of songs used to populate an otherwise empty library on startup.
pub fn demo_library() -> Vec<Item> {
    vec![
        Item::new("Bohemian Rhapsody", "5:55"),
        Item::new("Hotel California", "6:30"),
        Item::new("Stairway to Heaven", "8:02"),
        Item::new("Imagine", "3:03"),
        Item::new("Smells Like Teen Spirit", "5:01"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_omits_empty_time() {
        assert_eq!(Item::new("Song A", "3:21").to_string(), "Song A (3:21)");
        assert_eq!(Item::new("Song A", "  ").to_string(), "Song A");
    }

    #[test]
    fn default_item_is_blank() {
        assert!(Item::default().is_blank());
        assert!(!Item::new("", "1:00").is_blank());
    }
}

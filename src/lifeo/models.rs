//! Data structures representing a decoded diary.
//!
//! Everything here is a passive, write-once parse result: a decode pass
//! constructs the `Diary` and nothing mutates it afterwards. Entries and
//! chapters refer to themes, tags and chapter categories by zero-based
//! position into the owning `Diary` collections, resolved at parse time.

use serde::{Deserialize, Serialize};

/// Root aggregate of all diary content and metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Diary {
    pub tag_categories: Vec<TagCategory>,
    pub tags: Vec<Tag>,
    pub chapter_categories: Vec<ChapterCategory>,
    pub chapters: Vec<Chapter>,
    pub themes: Vec<Theme>,
    /// Index into `themes` of the diary-wide default theme, if one is flagged.
    pub default_theme: Option<usize>,
    /// Last-used identifier counter, as recorded in the database.
    pub last_id: Option<u64>,
    pub language: Option<String>,
    pub startup_action: Option<u64>,
    /// Last-focused UI element, as recorded by the diary application.
    pub last_element: Option<u64>,
    pub entries: Vec<Entry>,
}

/// A collapsible grouping of tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagCategory {
    pub expanded: bool,
    pub name: String,
}

/// A tag. Names are not required to be unique; by-name lookups resolve to
/// the first match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
}

/// A grouping of chapters by topic or time period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterCategory {
    pub name: String,
}

/// A chapter. "Open" chapters live at the root (`category` is `None`);
/// owned chapters point at their category in `Diary::chapter_categories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub expanded: bool,
    /// Epoch seconds; 0 when the database carries no timestamp.
    pub timestamp: u64,
    pub name: String,
    pub category: Option<usize>,
}

/// A named visual style, populated incrementally by theme-config lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub font: Option<String>,
    pub color_base: Option<String>,
    pub color_text: Option<String>,
    pub color_heading: Option<String>,
    pub color_subheading: Option<String>,
    pub color_highlight: Option<String>,
}

/// One diary record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub trashed: bool,
    pub favorite: bool,
    /// Creation timestamp from the entry-start line, epoch seconds.
    pub timestamp: u64,
    pub date_created: Option<u64>,
    pub date_changed: Option<u64>,
    pub date_status: Option<u64>,
    /// First char of the optional entry-start marker. Captured but not yet
    /// given behavior; the diary application records a filter default here.
    pub filter_default: Option<char>,
    /// Second char of the optional entry-start marker (to-do status).
    pub todo_status: Option<char>,
    /// Indices into `Diary::themes`, in declaration order.
    pub themes: Vec<usize>,
    /// Indices into `Diary::tags`, in declaration order.
    pub tags: Vec<usize>,
    /// Raw paragraph texts, one per diary line. May contain empty strings.
    pub paragraphs: Vec<String>,
    pub language: Option<String>,
}

//! Common types used throughout lifelog-query
//!
//! This module contains the record model returned by the lifelog store,
//! the page/cursor types used by pagination, and small shared enums.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

// ============================================================================
// Lifelog Record
// ============================================================================

/// One recorded session entry with timing bounds and optional content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifelogRecord {
    /// Unique identifier assigned by the store
    pub id: String,
    /// Session title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Markdown body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    /// Start timestamp (ISO-8601)
    pub start_time: String,
    /// End timestamp (ISO-8601)
    pub end_time: String,
    /// Transcript/heading tree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<Vec<ContentNode>>,
}

impl LifelogRecord {
    /// Title for display, falling back to a placeholder
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(untitled)")
    }
}

// ============================================================================
// Content Tree
// ============================================================================

/// Role tag attached to a speaker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakerRole {
    /// The owner of the recording device
    User,
}

/// Speaker attribution for a content node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Speaker {
    /// Display name of the speaker
    pub name: Option<String>,
    /// Role, when the store identifies one
    pub role: Option<SpeakerRole>,
}

/// Timing bounds for a content node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeTiming {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub start_offset_ms: Option<i64>,
    pub end_offset_ms: Option<i64>,
}

/// A node in a lifelog's transcript/heading tree.
///
/// Nodes with children are containers (usually headings); everything else
/// is a leaf. The tree is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawContentNode", into = "RawContentNode")]
pub enum ContentNode {
    /// A node without children
    Leaf {
        /// The store's `type` tag (e.g. "heading1", "blockquote")
        kind: String,
        text: Option<String>,
        timing: NodeTiming,
        speaker: Speaker,
    },
    /// A node with nested children
    Container {
        kind: String,
        text: Option<String>,
        timing: NodeTiming,
        speaker: Speaker,
        children: Vec<ContentNode>,
    },
}

impl ContentNode {
    /// The node's type tag
    pub fn kind(&self) -> &str {
        match self {
            Self::Leaf { kind, .. } | Self::Container { kind, .. } => kind,
        }
    }

    /// The node's text, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Leaf { text, .. } | Self::Container { text, .. } => text.as_deref(),
        }
    }

    /// Speaker attribution
    pub fn speaker(&self) -> &Speaker {
        match self {
            Self::Leaf { speaker, .. } | Self::Container { speaker, .. } => speaker,
        }
    }

    /// Child nodes (empty for leaves)
    pub fn children(&self) -> &[ContentNode] {
        match self {
            Self::Leaf { .. } => &[],
            Self::Container { children, .. } => children,
        }
    }
}

/// Wire shape of a content node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContentNode {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_offset_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_offset_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<RawContentNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    speaker_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    speaker_identifier: Option<String>,
}

impl From<RawContentNode> for ContentNode {
    fn from(raw: RawContentNode) -> Self {
        let timing = NodeTiming {
            start_time: raw.start_time,
            end_time: raw.end_time,
            start_offset_ms: raw.start_offset_ms,
            end_offset_ms: raw.end_offset_ms,
        };
        let speaker = Speaker {
            name: raw.speaker_name,
            role: match raw.speaker_identifier.as_deref() {
                Some("user") => Some(SpeakerRole::User),
                _ => None,
            },
        };

        match raw.children {
            Some(children) if !children.is_empty() => Self::Container {
                kind: raw.kind,
                text: raw.content,
                timing,
                speaker,
                children: children.into_iter().map(Into::into).collect(),
            },
            _ => Self::Leaf {
                kind: raw.kind,
                text: raw.content,
                timing,
                speaker,
            },
        }
    }
}

impl From<ContentNode> for RawContentNode {
    fn from(node: ContentNode) -> Self {
        let (kind, text, timing, speaker, children) = match node {
            ContentNode::Leaf {
                kind,
                text,
                timing,
                speaker,
            } => (kind, text, timing, speaker, None),
            ContentNode::Container {
                kind,
                text,
                timing,
                speaker,
                children,
            } => (
                kind,
                text,
                timing,
                speaker,
                Some(children.into_iter().map(Into::into).collect()),
            ),
        };

        let speaker_identifier = speaker.role.map(|SpeakerRole::User| "user".to_string());

        Self {
            kind,
            content: text,
            start_time: timing.start_time,
            end_time: timing.end_time,
            start_offset_ms: timing.start_offset_ms,
            end_offset_ms: timing.end_offset_ms,
            children,
            speaker_name: speaker.name,
            speaker_identifier,
        }
    }
}

// ============================================================================
// Sort Direction
// ============================================================================

/// Sort direction for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Oldest first
    Asc,
    /// Newest first
    Desc,
}

impl Direction {
    /// Query parameter value
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Content Inclusion
// ============================================================================

/// Which optional content sections the store should include
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentFlags {
    /// Include the markdown body
    pub include_markdown: bool,
    /// Include heading nodes in `contents`
    pub include_headings: bool,
}

impl Default for ContentFlags {
    fn default() -> Self {
        Self {
            include_markdown: true,
            include_headings: true,
        }
    }
}

impl ContentFlags {
    /// Apply defaults to optional caller-supplied flags
    pub fn resolve(include_markdown: Option<bool>, include_headings: Option<bool>) -> Self {
        let defaults = Self::default();
        Self {
            include_markdown: include_markdown.unwrap_or(defaults.include_markdown),
            include_headings: include_headings.unwrap_or(defaults.include_headings),
        }
    }
}

// ============================================================================
// Pages
// ============================================================================

/// Opaque continuation token handed out by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor(String);

impl PageCursor {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, as sent back to the store
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One bounded unit of records returned by a single remote call
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Records in store order
    pub records: Vec<LifelogRecord>,
    /// Cursor for the following page, if the store has more
    pub next_cursor: Option<PageCursor>,
    /// Record count reported by the store
    pub count: usize,
}

impl Page {
    /// Check whether the store indicated further pages
    pub fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle blank strings
pub trait OptionStringExt {
    /// Returns None if the string is empty or only whitespace, trimmed otherwise
    fn none_if_blank(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_blank(self) -> Option<String> {
        self.and_then(|s| s.none_if_blank())
    }
}

impl OptionStringExt for String {
    fn none_if_blank(self) -> Option<String> {
        let trimmed = self.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == self.len() {
            Some(self)
        } else {
            Some(trimmed.to_string())
        }
    }
}

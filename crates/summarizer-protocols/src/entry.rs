//! Entry and feed value types.
//!
//! The entry store is owned by the host application. These types are the
//! slice of it the pipeline reads and mutates: the source link, the tag set
//! and an open-ended attribute store used for enrichment markers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Attribute keys written by the pipeline.
pub mod attributes {
    /// Presence marks the entry as enriched.
    pub const PROCESSED: &str = "ai-processed";
    /// Model-generated summary.
    pub const SUMMARY: &str = "ai-summary";
    /// Normalized tags added by the most recent enrichment run.
    pub const TAGS: &str = "ai-tags";
    /// Raw markup captured from the source page.
    pub const HTML: &str = "ollama-summarizer-html";
    /// Fetched text and model output, only written when debugging is enabled.
    pub const DEBUG: &str = "ai-debug";
}

/// A value in the entry attribute store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    String(String),
    List(Vec<String>),
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(value: Vec<String>) -> Self {
        AttributeValue::List(value)
    }
}

/// The feed an entry belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub id: i64,

    #[serde(default)]
    pub url: String,

    /// CSS selector naming the element that holds the article body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_entries: Option<String>,
}

impl Feed {
    pub fn new(id: i64, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            path_entries: None,
        }
    }

    pub fn with_path_entries(mut self, selector: impl Into<String>) -> Self {
        self.path_entries = Some(selector.into());
        self
    }

    /// Selector override, ignoring blank values.
    pub fn selector(&self) -> Option<&str> {
        self.path_entries
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// One syndicated content item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub guid: String,

    #[serde(default)]
    pub link: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub content: String,

    /// Ordered tag set, case-sensitive as stored.
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed: Option<Feed>,

    /// Set by the host when an already-stored entry is delivered again.
    #[serde(default)]
    pub is_updated: bool,
}

impl Entry {
    pub fn new(guid: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            link: link.into(),
            ..Default::default()
        }
    }

    pub fn with_feed(mut self, feed: Feed) -> Self {
        self.feed = Some(feed);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// String view of an attribute. Missing or non-string values read as empty.
    pub fn attribute_string(&self, key: &str) -> String {
        match self.attributes.get(key) {
            Some(AttributeValue::String(s)) => s.clone(),
            Some(AttributeValue::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    /// List view of an attribute. A scalar string reads as a one-element list.
    pub fn attribute_array(&self, key: &str) -> Vec<String> {
        match self.attributes.get(key) {
            Some(AttributeValue::List(items)) => items.clone(),
            Some(AttributeValue::String(s)) => vec![s.clone()],
            _ => Vec::new(),
        }
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<AttributeValue> {
        self.attributes.remove(key)
    }
}

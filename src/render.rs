//! Link rendering for bot messages.
//!
//! The engine stores raw text. Shells call into this module at render time
//! to show every `http(s)://` URL as a link with a fixed anchor text.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("URL pattern is valid"));

/// A piece of rendered bot text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    Text { text: String },
    Link { url: String, anchor: String },
}

/// Renders URLs in bot text as anchors.
#[derive(Debug, Clone)]
pub struct LinkRenderer {
    anchor_text: String,
}

impl LinkRenderer {
    pub fn new(anchor_text: impl Into<String>) -> Self {
        Self {
            anchor_text: anchor_text.into(),
        }
    }

    /// Split `text` into plain and link segments, in order.
    pub fn segments(&self, text: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut last = 0;

        for m in URL_PATTERN.find_iter(text) {
            if m.start() > last {
                segments.push(Segment::Text {
                    text: text[last..m.start()].to_string(),
                });
            }
            segments.push(Segment::Link {
                url: m.as_str().to_string(),
                anchor: self.anchor_text.clone(),
            });
            last = m.end();
        }

        if last < text.len() {
            segments.push(Segment::Text {
                text: text[last..].to_string(),
            });
        }

        segments
    }

    /// URLs found in `text`, for shells that list links separately.
    pub fn links<'a>(&self, text: &'a str) -> Vec<&'a str> {
        URL_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
    }

    /// Terminal rendering: each URL becomes `anchor <url>`.
    pub fn plain(&self, text: &str) -> String {
        self.segments(text)
            .into_iter()
            .map(|segment| match segment {
                Segment::Text { text } => text,
                Segment::Link { url, anchor } => format!("{anchor} <{url}>"),
            })
            .collect()
    }
}

//! Typed block content and per-type validation rules.
//!
//! Block content is persisted as JSONB, but it is never accepted as a
//! free-form blob: the API boundary deserializes payloads into
//! [`BlockContent`], a tagged union with one strict variant per block type.
//! Validation is advisory — [`BlockContent::validate`] returns a list of
//! field-keyed errors and never rejects a draft by itself; callers decide
//! whether a non-empty list blocks publishing.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The seven supported block types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Text,
    Richtext,
    Image,
    Cta,
    List,
    Faq,
    Banner,
}

impl BlockType {
    /// All block types, in display order.
    pub const ALL: &'static [BlockType] = &[
        BlockType::Text,
        BlockType::Richtext,
        BlockType::Image,
        BlockType::Cta,
        BlockType::List,
        BlockType::Faq,
        BlockType::Banner,
    ];

    /// The stable machine name stored in the `block_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Text => "text",
            BlockType::Richtext => "richtext",
            BlockType::Image => "image",
            BlockType::Cta => "cta",
            BlockType::List => "list",
            BlockType::Faq => "faq",
            BlockType::Banner => "banner",
        }
    }

    /// Parse a stored machine name back into a block type.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        BlockType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == value)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid block type '{value}'. Must be one of: {}",
                    BlockType::ALL
                        .iter()
                        .map(|t| t.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One question/answer pair inside a FAQ block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// Structured content of a block, discriminated by the `type` tag.
///
/// The tag values match [`BlockType::as_str`], so the column value and the
/// JSON payload can never disagree for content that round-trips through this
/// type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockContent {
    Text {
        value: String,
    },
    Richtext {
        html: String,
    },
    Image {
        url: String,
        alt: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    Cta {
        text: String,
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<String>,
    },
    List {
        items: Vec<String>,
    },
    Faq {
        items: Vec<FaqItem>,
    },
    Banner {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cta_text: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cta_url: Option<String>,
    },
}

/// A single field-level validation finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl BlockContent {
    /// The block type this content variant belongs to.
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockContent::Text { .. } => BlockType::Text,
            BlockContent::Richtext { .. } => BlockType::Richtext,
            BlockContent::Image { .. } => BlockType::Image,
            BlockContent::Cta { .. } => BlockType::Cta,
            BlockContent::List { .. } => BlockType::List,
            BlockContent::Faq { .. } => BlockType::Faq,
            BlockContent::Banner { .. } => BlockType::Banner,
        }
    }

    /// Check the per-type content rules.
    ///
    /// Returns an empty list when the content is publishable. Required
    /// sub-fields must be non-empty; link fields must be an absolute
    /// http(s) URL or an internal path starting with `/`.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        match self {
            BlockContent::Text { value } => {
                require_nonempty(&mut errors, "value", value);
            }
            BlockContent::Richtext { html } => {
                require_nonempty(&mut errors, "html", html);
            }
            BlockContent::Image { url, alt, .. } => {
                require_link(&mut errors, "url", url);
                require_nonempty(&mut errors, "alt", alt);
            }
            BlockContent::Cta { text, url, .. } => {
                require_nonempty(&mut errors, "text", text);
                require_link(&mut errors, "url", url);
            }
            BlockContent::List { items } => {
                if items.is_empty() {
                    errors.push(FieldError::new("items", "List must have at least one item"));
                }
                for (i, item) in items.iter().enumerate() {
                    if item.trim().is_empty() {
                        errors.push(FieldError::new(
                            format!("items[{i}]"),
                            "Item must not be empty",
                        ));
                    }
                }
            }
            BlockContent::Faq { items } => {
                if items.is_empty() {
                    errors.push(FieldError::new("items", "FAQ must have at least one item"));
                }
                for (i, item) in items.iter().enumerate() {
                    if item.question.trim().is_empty() {
                        errors.push(FieldError::new(
                            format!("items[{i}].question"),
                            "Question must not be empty",
                        ));
                    }
                    if item.answer.trim().is_empty() {
                        errors.push(FieldError::new(
                            format!("items[{i}].answer"),
                            "Answer must not be empty",
                        ));
                    }
                }
            }
            BlockContent::Banner {
                title,
                image_url,
                cta_text,
                cta_url,
                ..
            } => {
                require_nonempty(&mut errors, "title", title);
                if let Some(url) = image_url {
                    require_link(&mut errors, "image_url", url);
                }
                // A banner call-to-action needs both halves or neither.
                match (cta_text, cta_url) {
                    (Some(text), Some(url)) => {
                        if text.trim().is_empty() {
                            errors.push(FieldError::new("cta_text", "Text must not be empty"));
                        }
                        require_link(&mut errors, "cta_url", url);
                    }
                    (Some(_), None) => {
                        errors.push(FieldError::new("cta_url", "cta_text requires a cta_url"));
                    }
                    (None, Some(_)) => {
                        errors.push(FieldError::new("cta_text", "cta_url requires a cta_text"));
                    }
                    (None, None) => {}
                }
            }
        }

        errors
    }
}

/// Returns `true` for an absolute http(s) URL or an internal path (`/...`).
///
/// Protocol-relative URLs (`//host`) are rejected: they inherit whatever
/// scheme the embedding page uses and are a common validation escape hatch.
pub fn is_valid_link(url: &str) -> bool {
    if let Some(rest) = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
    {
        return !rest.is_empty();
    }
    url.starts_with('/') && !url.starts_with("//")
}

fn require_nonempty(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(
            field,
            format!("{field} must not be empty"),
        ));
    }
}

fn require_link(errors: &mut Vec<FieldError>, field: &str, url: &str) {
    if url.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{field} must not be empty")));
    } else if !is_valid_link(url) {
        errors.push(FieldError::new(
            field,
            format!("{field} must be an absolute http(s) URL or a path starting with /"),
        ));
    }
}

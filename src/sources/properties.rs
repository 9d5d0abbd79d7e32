use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

pub const PROP_TITLE: &str = "Name";
pub const PROP_SLUG: &str = "Slug";
pub const PROP_DESCRIPTION: &str = "Description";
pub const PROP_STATUS: &str = "Status";
pub const PROP_TAGS: &str = "Tags";
pub const PROP_PUBLICATION_DATE: &str = "Publication Date";
pub const PROP_SCHEDULED_DATE: &str = "Scheduled Date";
pub const PROP_SHELVED: &str = "Shelved";

pub const STATUS_PUBLISHED: &str = "Published";
pub const STATUS_SCHEDULED: &str = "Scheduled";

/// One page returned by the remote collection query.
#[derive(Debug, Clone, Deserialize)]
pub struct RemotePage {
    pub id: Uuid,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RichTextFragment {
    #[serde(default)]
    pub plain_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateValue {
    pub start: String,
}

/// Typed view over the remote API's loosely-typed property bag. Accessors
/// return empty defaults for absent or mismatched kinds instead of failing,
/// so one oddly-typed property never takes down a whole page.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title { title: Vec<RichTextFragment> },
    RichText { rich_text: Vec<RichTextFragment> },
    Select { select: Option<SelectOption> },
    MultiSelect { multi_select: Vec<SelectOption> },
    Date { date: Option<DateValue> },
    Checkbox { checkbox: bool },
    #[serde(other)]
    Unsupported,
}

impl PropertyValue {
    pub fn as_plain_title(&self) -> String {
        match self {
            PropertyValue::Title { title } => join_fragments(title),
            _ => String::new(),
        }
    }

    pub fn as_rich_text(&self) -> String {
        match self {
            PropertyValue::RichText { rich_text } => join_fragments(rich_text),
            _ => String::new(),
        }
    }

    pub fn as_select(&self) -> Option<&str> {
        match self {
            PropertyValue::Select { select } => select.as_ref().map(|s| s.name.as_str()),
            _ => None,
        }
    }

    pub fn as_multi_select(&self) -> Vec<String> {
        match self {
            PropertyValue::MultiSelect { multi_select } => {
                multi_select.iter().map(|s| s.name.clone()).collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn as_date(&self) -> Option<&str> {
        match self {
            PropertyValue::Date { date } => date.as_ref().map(|d| d.start.as_str()),
            _ => None,
        }
    }

    pub fn as_checkbox(&self) -> bool {
        match self {
            PropertyValue::Checkbox { checkbox } => *checkbox,
            _ => false,
        }
    }
}

fn join_fragments(fragments: &[RichTextFragment]) -> String {
    fragments.iter().map(|f| f.plain_text.as_str()).collect()
}

/// The typed properties of one remote page.
#[derive(Debug, Clone)]
pub struct PageProperties {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub status: String,
    pub tags: Vec<String>,
    pub publication_date: Option<String>,
    pub scheduled_date: Option<String>,
    pub shelved: bool,
}

impl PageProperties {
    /// Returns `None` when the page lacks a usable title or slug.
    pub fn extract(page: &RemotePage) -> Option<Self> {
        let props = &page.properties;

        let title = props
            .get(PROP_TITLE)
            .map(|p| p.as_plain_title())
            .unwrap_or_default();
        let slug = props
            .get(PROP_SLUG)
            .map(|p| p.as_rich_text())
            .unwrap_or_default();
        if title.is_empty() || slug.is_empty() {
            return None;
        }

        Some(Self {
            id: page.id,
            title,
            slug,
            description: props
                .get(PROP_DESCRIPTION)
                .map(|p| p.as_rich_text())
                .unwrap_or_default(),
            status: props
                .get(PROP_STATUS)
                .and_then(|p| p.as_select().map(str::to_string))
                .unwrap_or_default(),
            tags: props
                .get(PROP_TAGS)
                .map(|p| p.as_multi_select())
                .unwrap_or_default(),
            publication_date: props
                .get(PROP_PUBLICATION_DATE)
                .and_then(|p| p.as_date().map(str::to_string)),
            scheduled_date: props
                .get(PROP_SCHEDULED_DATE)
                .and_then(|p| p.as_date().map(str::to_string)),
            shelved: props
                .get(PROP_SHELVED)
                .map(|p| p.as_checkbox())
                .unwrap_or(false),
        })
    }
}

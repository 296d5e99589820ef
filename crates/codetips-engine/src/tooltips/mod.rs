//! # Tooltip records
//!
//! The side-car format the hover UI consumes, and the single constructor
//! every record goes through: [`create_ad_hoc_tooltip`].
//!
//! ```json
//! {
//!   "id": "tok-1f3a9c2e5b7d0488",
//!   "trigger": ["Promise"],
//!   "content": { "title": "class Promise<T>", "description": "…", "color": { … } },
//!   "appearance": { "theme": "light", "position": "bottom", "offset": 8 },
//!   "portal": { "strategy": "fixed" }
//! }
//! ```

pub mod assembler;
pub mod global;

use serde::{Deserialize, Serialize};

use crate::parsing::TokenType;
use crate::registry::Color;

pub use assembler::{AssembledTooltips, PageContext, Rejected, TooltipAssembler};
pub use global::{GlobalTrigger, GlobalTriggerRegistry};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Appearance {
    pub theme: Theme,
    pub position: Position,
    /// Distance from the trigger, in pixels.
    pub offset: u32,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            position: Position::Bottom,
            offset: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortalStrategy {
    #[default]
    Fixed,
    Absolute,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Portal {
    pub strategy: PortalStrategy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipContent {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl TooltipContent {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color: None,
            severity: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// What produced a record. Feeds the per-term metrics; not serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TooltipKind {
    Token(TokenType),
    Parser,
    Global,
}

impl TooltipKind {
    pub fn type_name(self) -> &'static str {
        match self {
            TooltipKind::Token(token_type) => token_type.as_str(),
            TooltipKind::Parser => "parser",
            TooltipKind::Global => "global",
        }
    }

    pub fn is_error(self) -> bool {
        self == TooltipKind::Token(TokenType::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipRecord {
    pub id: String,
    /// Never empty; no entry is empty.
    pub trigger: Vec<String>,
    pub content: TooltipContent,
    pub appearance: Appearance,
    pub portal: Portal,
    #[serde(skip)]
    pub kind: TooltipKind,
}

impl TooltipRecord {
    /// The term metrics are keyed by.
    pub fn term(&self) -> &str {
        self.trigger.first().map(String::as_str).unwrap_or(&self.id)
    }
}

/// A trigger as written by callers: one phrase or several.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Trigger {
    One(String),
    Many(Vec<String>),
}

impl Trigger {
    fn into_vec(self) -> Vec<String> {
        match self {
            Trigger::One(one) => vec![one],
            Trigger::Many(many) => many,
        }
    }
}

impl From<&str> for Trigger {
    fn from(value: &str) -> Self {
        Trigger::One(value.to_string())
    }
}

impl From<Vec<String>> for Trigger {
    fn from(value: Vec<String>) -> Self {
        Trigger::Many(value)
    }
}

/// Input to [`create_ad_hoc_tooltip`]. Everything optional is validated
/// there rather than by the type.
#[derive(Debug, Clone)]
pub struct AdHocTooltip {
    pub id: Option<String>,
    pub trigger: Option<Trigger>,
    pub content: Option<TooltipContent>,
    pub appearance: Option<Appearance>,
    pub portal: Option<Portal>,
    pub kind: TooltipKind,
}

impl AdHocTooltip {
    pub fn new(
        id: impl Into<String>,
        trigger: impl Into<Trigger>,
        content: TooltipContent,
    ) -> Self {
        Self {
            id: Some(id.into()),
            trigger: Some(trigger.into()),
            content: Some(content),
            appearance: None,
            portal: None,
            kind: TooltipKind::Global,
        }
    }

    pub fn kind(mut self, kind: TooltipKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.appearance = Some(Appearance {
            theme,
            ..self.appearance.unwrap_or_default()
        });
        self
    }
}

/// A record was rejected by [`create_ad_hoc_tooltip`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssemblyError {
    #[error("tooltip has no id")]
    MissingId,
    #[error("tooltip `{0}` has no content")]
    MissingContent(String),
    #[error("tooltip `{0}` has no trigger")]
    MissingTrigger(String),
    #[error("tooltip `{0}` has an empty trigger")]
    EmptyTrigger(String),
    #[error("global trigger phrase `{0}` is not usable")]
    InvalidPhrase(String),
}

/// An invariant of the tooltip output was broken. The only error that
/// leaves the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("duplicate tooltip id `{id}` on page {page}")]
    DuplicateTooltipId { page: String, id: String },
}

/// Validates `request` and fills in presentation defaults.
pub fn create_ad_hoc_tooltip(request: AdHocTooltip) -> Result<TooltipRecord, AssemblyError> {
    let id = request
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or(AssemblyError::MissingId)?;
    let content = request
        .content
        .ok_or_else(|| AssemblyError::MissingContent(id.clone()))?;
    let trigger = request
        .trigger
        .ok_or_else(|| AssemblyError::MissingTrigger(id.clone()))?
        .into_vec();
    if trigger.is_empty() || trigger.iter().any(|t| t.is_empty()) {
        return Err(AssemblyError::EmptyTrigger(id));
    }

    Ok(TooltipRecord {
        id,
        trigger,
        content,
        appearance: request.appearance.unwrap_or_default(),
        portal: request.portal.unwrap_or_default(),
        kind: request.kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request() -> AdHocTooltip {
        AdHocTooltip::new("tip", "hover", TooltipContent::new("Title", "Body"))
    }

    #[test]
    fn fills_defaults_and_normalizes_trigger() {
        let record = create_ad_hoc_tooltip(request()).unwrap();

        assert_eq!(record.trigger, vec!["hover".to_string()]);
        assert_eq!(
            record.appearance,
            Appearance {
                theme: Theme::Light,
                position: Position::Bottom,
                offset: 8
            }
        );
        assert_eq!(record.portal.strategy, PortalStrategy::Fixed);
    }

    #[test]
    fn rejects_missing_fields() {
        let mut no_id = request();
        no_id.id = Some("  ".into());
        assert_eq!(create_ad_hoc_tooltip(no_id), Err(AssemblyError::MissingId));

        let mut no_content = request();
        no_content.content = None;
        assert_eq!(
            create_ad_hoc_tooltip(no_content),
            Err(AssemblyError::MissingContent("tip".into()))
        );

        let mut no_trigger = request();
        no_trigger.trigger = None;
        assert_eq!(
            create_ad_hoc_tooltip(no_trigger),
            Err(AssemblyError::MissingTrigger("tip".into()))
        );
    }

    #[test]
    fn rejects_empty_triggers() {
        let mut empty = request();
        empty.trigger = Some(Trigger::Many(vec![]));
        assert_eq!(
            create_ad_hoc_tooltip(empty),
            Err(AssemblyError::EmptyTrigger("tip".into()))
        );

        let mut blank = request();
        blank.trigger = Some(Trigger::Many(vec!["DD".into(), String::new()]));
        assert!(create_ad_hoc_tooltip(blank).is_err());
    }

    #[test]
    fn trigger_accepts_string_or_list() {
        let one: Trigger = serde_json::from_str("\"DD\"").unwrap();
        let many: Trigger = serde_json::from_str("[\"DD\", \"Deep Dive\"]").unwrap();
        assert_eq!(one.into_vec(), vec!["DD".to_string()]);
        assert_eq!(many.into_vec(), vec!["DD".to_string(), "Deep Dive".to_string()]);
    }

    #[test]
    fn serialized_shape() {
        let record = create_ad_hoc_tooltip(request().theme(Theme::Dark)).unwrap();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": "tip",
                "trigger": ["hover"],
                "content": { "title": "Title", "description": "Body" },
                "appearance": { "theme": "dark", "position": "bottom", "offset": 8 },
                "portal": { "strategy": "fixed" }
            })
        );
    }
}

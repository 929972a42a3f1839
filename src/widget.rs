//! Dashboard row types.
//!
//! These are the rows the shell persists through the hosted backend: widgets
//! placed on a grid, the named tabs that hold them, and the content rows of
//! the simple widgets (to-dos, notes, quick links). Layout mechanics and CRUD
//! live in the shell; this module owns shapes and validation.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{BoardError, BoardResult, non_empty};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Todo,
    Notes,
    Calendar,
    Timer,
    Links,
}

/// Grid placement in cell units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Default for GridPosition {
    /// Default placement for a freshly added widget.
    fn default() -> Self {
        GridPosition { x: 0, y: 0, w: 4, h: 3 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: Uuid,
    pub kind: WidgetKind,
    pub title: String,
    pub position: GridPosition,
    /// Widget-specific payload, opaque to this crate.
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Widget {
    pub fn validate(&self) -> BoardResult<()> {
        non_empty(&self.title, "widget.title")?;
        if self.position.w == 0 || self.position.h == 0 {
            return Err(BoardError::Validation(
                "widget.position must have non-zero extent".to_string(),
            ));
        }
        Ok(())
    }

    /// Typed view of the opaque payload.
    pub fn data_as<T: DeserializeOwned>(&self) -> BoardResult<T> {
        Ok(serde_json::from_value(self.data.clone())?)
    }

    /// Record a new placement after a drag or resize is committed.
    pub fn move_to(&mut self, position: GridPosition, now: DateTime<Utc>) {
        self.position = position;
        self.updated_at = now;
    }
}

/// A named dashboard tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    /// Slug identifier, referenced by widget payloads.
    pub id: String,
    pub label: String,
    pub emoji: Option<String>,
    pub position: u32,
    pub is_default: bool,
}

impl Tab {
    pub fn validate(&self) -> BoardResult<()> {
        non_empty(&self.id, "tab.id")?;
        non_empty(&self.label, "tab.label")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: Uuid,
    pub widget_id: Uuid,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    pub fn validate(&self) -> BoardResult<()> {
        non_empty(&self.text, "todo.text")
    }
}

/// Free-form note content; empty notes are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub widget_id: Uuid,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickLink {
    pub id: Uuid,
    pub widget_id: Uuid,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl QuickLink {
    pub fn validate(&self) -> BoardResult<()> {
        non_empty(&self.title, "link.title")?;
        non_empty(&self.url, "link.url")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn make_widget() -> Widget {
        Widget {
            id: Uuid::new_v4(),
            kind: WidgetKind::Timer,
            title: "Focus timer".to_string(),
            position: GridPosition::default(),
            data: serde_json::json!({ "tab": "work", "is_global": false }),
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn widget_validate_rejects_blank_title_and_zero_extent() {
        let mut widget = make_widget();
        widget.title = " ".to_string();
        assert!(widget.validate().is_err());

        let mut widget = make_widget();
        widget.position.w = 0;
        assert!(widget.validate().is_err());

        assert!(make_widget().validate().is_ok());
    }

    #[test]
    fn data_as_gives_typed_access_to_the_payload() {
        #[derive(Deserialize)]
        struct CalendarPayload {
            tab: String,
            is_global: bool,
        }

        let widget = make_widget();
        let payload: CalendarPayload = widget.data_as().unwrap();
        assert_eq!(payload.tab, "work");
        assert!(!payload.is_global);

        // Mismatched shape surfaces as a serialization error.
        #[derive(Deserialize)]
        struct Wrong {
            #[allow(dead_code)]
            tab: u64,
        }
        assert!(widget.data_as::<Wrong>().is_err());
    }

    #[test]
    fn move_to_updates_position_and_timestamp() {
        let mut widget = make_widget();
        let later = now() + chrono::Duration::minutes(5);
        widget.move_to(GridPosition { x: 2, y: 1, w: 6, h: 4 }, later);

        assert_eq!(widget.position.x, 2);
        assert_eq!(widget.updated_at, later);
    }

    #[test]
    fn tab_and_link_validation() {
        let tab = Tab {
            id: "work".to_string(),
            label: "Work".to_string(),
            emoji: Some("💼".to_string()),
            position: 0,
            is_default: true,
        };
        assert!(tab.validate().is_ok());

        let mut blank = tab.clone();
        blank.label = String::new();
        assert!(blank.validate().is_err());

        let link = QuickLink {
            id: Uuid::new_v4(),
            widget_id: Uuid::new_v4(),
            title: "Docs".to_string(),
            url: String::new(),
            created_at: now(),
        };
        assert!(link.validate().is_err());
    }

    #[test]
    fn todo_validate_rejects_blank_text() {
        let item = TodoItem {
            id: Uuid::new_v4(),
            widget_id: Uuid::new_v4(),
            text: "".to_string(),
            completed: false,
            created_at: now(),
        };
        assert!(item.validate().is_err());
    }
}

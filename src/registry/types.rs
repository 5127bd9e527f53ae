//! Contribution types stored by the registry
//!
//! Icons, panel bodies and status content are opaque [`ViewHandle`]s: the
//! rendering layer resolves them, the registry only stores and orders them.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Opaque reference to something the shell knows how to render
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewHandle(String);

impl ViewHandle {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn key(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ViewHandle {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ViewHandle {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Entry in the activity sidebar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarContribution {
    pub id: String,
    pub icon: ViewHandle,
    pub title: String,
    pub view: ViewHandle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl SidebarContribution {
    pub fn new(
        id: impl Into<String>,
        icon: impl Into<ViewHandle>,
        title: impl Into<String>,
        view: impl Into<ViewHandle>,
    ) -> Self {
        Self {
            id: id.into(),
            icon: icon.into(),
            title: title.into(),
            view: view.into(),
            order: None,
        }
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelPosition {
    Bottom,
    Side,
}

/// Bottom or side panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelContribution {
    pub id: String,
    pub title: String,
    pub view: ViewHandle,
    pub position: PanelPosition,
}

impl PanelContribution {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        view: impl Into<ViewHandle>,
        position: PanelPosition,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            view: view.into(),
            position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBarAlignment {
    Left,
    Center,
    Right,
}

/// Item shown in the status bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBarContribution {
    pub id: String,
    pub content: ViewHandle,
    pub position: StatusBarAlignment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl StatusBarContribution {
    pub fn new(
        id: impl Into<String>,
        content: impl Into<ViewHandle>,
        position: StatusBarAlignment,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            position,
            order: None,
        }
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }
}

pub type CommandHandler = Arc<dyn Fn() + Send + Sync>;

/// Named action, optionally bound to a key chord
#[derive(Clone)]
pub struct Command {
    pub id: String,
    pub title: String,
    pub handler: CommandHandler,
    pub keybinding: Option<String>,
}

impl Command {
    pub fn new<F>(id: impl Into<String>, title: impl Into<String>, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            title: title.into(),
            handler: Arc::new(handler),
            keybinding: None,
        }
    }

    pub fn with_keybinding(mut self, key: impl Into<String>) -> Self {
        self.keybinding = Some(key.into());
        self
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("keybinding", &self.keybinding)
            .finish_non_exhaustive()
    }
}

/// Maps file extensions to a language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageAssociation {
    pub id: String,
    pub extensions: Vec<String>,
    pub name: String,
}

impl LanguageAssociation {
    pub fn new<I, S>(id: impl Into<String>, extensions: I, name: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            extensions: extensions.into_iter().map(Into::into).collect(),
            name: name.into(),
        }
    }
}

/// The file that currently owns editor focus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub path: String,
    pub name: String,
    pub is_directory: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<u64>,
}

impl FileInfo {
    /// Describe a regular file, taking the name from the last path segment
    pub fn file(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(path.as_str())
            .to_string();
        Self {
            path,
            name,
            is_directory: false,
            size: None,
            modified: None,
        }
    }
}

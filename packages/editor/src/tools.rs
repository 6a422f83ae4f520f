//! # Tool Surface
//!
//! The session operations as a flat set of tools that always answer with a
//! status line. Callers match on the prefix:
//!
//! - `Successfully ...` when the operation went through
//! - `Error: ...` when it did not (the session is then unchanged)
//!
//! File paths handed to the tools are resolved against a project root, and
//! the resolved path is what status lines report.

use crate::{EditorError, Session};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use tosc_lexml::{Frame, DEFAULT_COLOR};

/// Name the tool set is published under
pub const SERVER_NAME: &str = "touchosc_editor";

/// Tool names, in registration order
pub const TOOL_NAMES: [&str; 6] = [
    "create_new_file",
    "load_file",
    "write_file",
    "add_label",
    "add_button",
    "embed_script",
];

/// A tool invocation as it arrives over the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", content = "arguments", rename_all = "snake_case")]
pub enum ToolCall {
    #[serde(alias = "create_new_tosc_file")]
    CreateNewFile { file_path: String },

    #[serde(alias = "load_tosc_file")]
    LoadFile { file_path: String },

    #[serde(alias = "write_tosc_file")]
    WriteFile {
        #[serde(default)]
        file_path: Option<String>,
    },

    AddLabel {
        name: String,
        text: String,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        #[serde(default)]
        color: Option<String>,
    },

    AddButton {
        name: String,
        button_type: String,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        #[serde(default)]
        color: Option<String>,
    },

    #[serde(alias = "embed_lua_script")]
    EmbedScript { control_name: String, script: String },
}

/// Reply to a [`ToolCall`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub ok: bool,
    pub status: String,
}

impl ToolResponse {
    pub fn from_status(status: String) -> Self {
        Self {
            ok: status.starts_with("Successfully "),
            status,
        }
    }

    pub fn error(message: impl std::fmt::Display) -> Self {
        Self::from_status(format!("Error: {}", message))
    }
}

/// Session plus the path and default-color policy of the tool layer
#[derive(Debug)]
pub struct ToolSurface {
    session: Session,
    project_root: PathBuf,
    default_color: String,
}

impl ToolSurface {
    /// `.` components are dropped from the root so status lines stay clean
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root: PathBuf = project_root.into();
        let project_root: PathBuf = project_root
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();

        Self {
            session: Session::new(),
            project_root,
            default_color: DEFAULT_COLOR.to_string(),
        }
    }

    pub fn with_default_color(mut self, color: impl Into<String>) -> Self {
        self.default_color = color.into();
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Relative paths land under the project root; absolute ones are kept
    pub fn resolve(&self, file_path: &str) -> PathBuf {
        self.project_root.join(file_path)
    }

    pub fn create_new_file(&mut self, file_path: &str) -> String {
        let path = self.resolve(file_path);
        let result = self.session.create(&path);
        status(result, |_| {
            format!("Successfully created '{}' and loaded it for editing.", path.display())
        })
    }

    pub fn load_file(&mut self, file_path: &str) -> String {
        let path = self.resolve(file_path);
        let result = self.session.load(&path);
        status(result, |_| format!("Successfully loaded '{}' for editing.", path.display()))
    }

    /// An empty `file_path` counts as omitted
    pub fn write_file(&mut self, file_path: Option<&str>) -> String {
        let path = file_path.filter(|p| !p.is_empty()).map(|p| self.resolve(p));
        let result = self.session.write(path.as_deref());
        status(result, |written| {
            format!("Successfully wrote project to '{}'.", written.display())
        })
    }

    pub fn add_label(&mut self, name: &str, text: &str, frame: Frame, color: Option<&str>) -> String {
        let color = color.unwrap_or(&self.default_color);
        let result = self.session.add_label(name, text, frame, color);
        status(result, |_| format!("Successfully added label '{}'.", name))
    }

    pub fn add_button(&mut self, name: &str, button_type: &str, frame: Frame, color: Option<&str>) -> String {
        let color = color.unwrap_or(&self.default_color);
        let result = self.session.add_button(name, button_type, frame, color);
        status(result, |kind| format!("Successfully added {} button '{}'.", kind, name))
    }

    pub fn embed_script(&mut self, control_name: &str, script: &str) -> String {
        let result = self.session.embed_script(control_name, script);
        status(result, |_| {
            format!("Successfully embedded script into control '{}'.", control_name)
        })
    }

    /// Route a wire-level call to its tool
    pub fn dispatch(&mut self, call: ToolCall) -> String {
        tracing::debug!("dispatching {:?}", call);

        match call {
            ToolCall::CreateNewFile { file_path } => self.create_new_file(&file_path),
            ToolCall::LoadFile { file_path } => self.load_file(&file_path),
            ToolCall::WriteFile { file_path } => self.write_file(file_path.as_deref()),
            ToolCall::AddLabel { name, text, x, y, w, h, color } => {
                self.add_label(&name, &text, Frame::new(x, y, w, h), color.as_deref())
            }
            ToolCall::AddButton { name, button_type, x, y, w, h, color } => {
                self.add_button(&name, &button_type, Frame::new(x, y, w, h), color.as_deref())
            }
            ToolCall::EmbedScript { control_name, script } => self.embed_script(&control_name, &script),
        }
    }
}

fn status<T>(result: Result<T, EditorError>, success: impl FnOnce(T) -> String) -> String {
    match result {
        Ok(value) => success(value),
        Err(err) => {
            tracing::warn!("{}", err);
            format!("Error: {}", err)
        }
    }
}

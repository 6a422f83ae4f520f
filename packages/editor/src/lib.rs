//! # TouchOSC Editor
//!
//! Stateful editing of a single `.tosc` layout.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ tools: ToolCall → status string             │
//! │  - resolve paths against the project root   │
//! │  - "Successfully ..." / "Error: ..."         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ session: Empty → Loaded state machine       │
//! │  - create / load / write                    │
//! │  - add label / add button / embed script    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ lexml: document model + .tosc package       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tosc_editor::ToolSurface;
//! use tosc_lexml::Frame;
//!
//! let mut tools = ToolSurface::new("/path/to/project");
//! tools.create_new_file("live.tosc");
//! tools.add_button("play", "toggle", Frame::new(0, 0, 80, 40), None);
//! tools.embed_script("play", "function onValueChanged(key) end");
//! let status = tools.write_file(None);
//! assert!(status.starts_with("Successfully "));
//! ```

mod errors;
mod session;
mod tools;

pub use errors::EditorError;
pub use session::Session;
pub use tools::{ToolCall, ToolResponse, ToolSurface, SERVER_NAME, TOOL_NAMES};

// Re-export the document types callers need alongside a session
pub use tosc_lexml::{Document, Frame};

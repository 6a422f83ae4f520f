//! # TouchOSC lexml
//!
//! Document model and on-disk codec for `.tosc` layout files.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ controls / script: build + attach        │
//! └──────────────────────────────────────────┘
//!                     ↓
//! ┌──────────────────────────────────────────┐
//! │ ast: Document → Control → Property/Script│
//! └──────────────────────────────────────────┘
//!                     ↓
//! ┌──────────────────────────────────────────┐
//! │ serializer / parser: Document ⇄ XML      │
//! │ package: XML ⇄ zlib bytes ⇄ file         │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tosc_lexml::{make_button, attach_script, Document, Frame};
//!
//! let mut doc = Document::new();
//! let button = make_button("play", "toggle", Frame::new(0, 0, 80, 40), "green")?;
//! doc.insert_control(button)?;
//! attach_script(&mut doc, "play", "function onValueChanged(key) end")?;
//!
//! tosc_lexml::save(&doc, "layout.tosc".as_ref())?;
//! ```

pub mod ast;
pub mod controls;
pub mod error;
pub mod package;
pub mod parser;
pub mod script;
pub mod serializer;

pub use ast::{Control, ControlKind, Document, Frame, Properties, Property, Script, FORMAT_VERSION, ROOT_TAG};
pub use controls::{make_button, make_label, make_typed_button, ButtonType, DEFAULT_COLOR};
pub use error::{ModelError, ParseError, ParseResult, PersistError};
pub use package::{deserialize, open, save, serialize};
pub use parser::{from_xml, Parser};
pub use script::attach_script;
pub use serializer::{to_pretty_xml, to_xml, Serializer};

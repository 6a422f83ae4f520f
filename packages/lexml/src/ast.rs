//! # Document Model
//!
//! In-memory tree for a `.tosc` layout:
//!
//! ```text
//! Document (lexml, version 18)
//!  └─ Control*  name / type / x y w h
//!      ├─ Property*  name → string value
//!      └─ Script?    opaque text
//! ```
//!
//! The document owns its controls outright and control names are unique
//! across the whole document. Uniqueness is checked on insertion, so
//! [`Document::insert_control`] is the only way in.

use crate::error::{ModelError, ParseError};
use std::fmt;
use std::str::FromStr;

/// Tag of the root element
pub const ROOT_TAG: &str = "lexml";

/// Format version written into every new document
pub const FORMAT_VERSION: u32 = 18;

/// Root document node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    version: u32,
    controls: Vec<Control>,
}

impl Document {
    /// Empty document carrying the canonical format marker
    pub fn new() -> Self {
        Self::with_version(FORMAT_VERSION)
    }

    pub(crate) fn with_version(version: u32) -> Self {
        Self {
            version,
            controls: Vec::new(),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Exact, case-sensitive lookup by control name
    pub fn find_control(&self, name: &str) -> Option<&Control> {
        self.controls.iter().find(|control| control.name == name)
    }

    pub fn find_control_mut(&mut self, name: &str) -> Option<&mut Control> {
        self.controls.iter_mut().find(|control| control.name == name)
    }

    /// Append a control at top level.
    ///
    /// Fails with [`ModelError::DuplicateName`] when a control with the same
    /// name already exists; the document is left untouched in that case.
    pub fn insert_control(&mut self, control: Control) -> Result<(), ModelError> {
        if self.find_control(&control.name).is_some() {
            tracing::debug!("rejecting duplicate control name {:?}", control.name);
            return Err(ModelError::DuplicateName(control.name));
        }

        self.controls.push(control);
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Closed set of control kinds the editor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Label,
    Button,
}

impl ControlKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlKind::Label => "label",
            ControlKind::Button => "button",
        }
    }

    /// Property names the factory gives this kind, in serialization order
    pub fn canonical_properties(&self) -> &'static [&'static str] {
        match self {
            ControlKind::Label => &["text", "color"],
            ControlKind::Button => &["type", "color"],
        }
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "label" => Ok(ControlKind::Label),
            "button" => Ok(ControlKind::Button),
            other => Err(ParseError::UnknownControlType(other.to_string())),
        }
    }
}

/// Control geometry. No range validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Frame {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Frame {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// One UI element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    name: String,
    pub kind: ControlKind,
    pub frame: Frame,
    pub properties: Properties,
    pub script: Option<Script>,
}

impl Control {
    pub fn new(name: impl Into<String>, kind: ControlKind, frame: Frame) -> Self {
        Self {
            name: name.into(),
            kind,
            frame,
            properties: Properties::default(),
            script: None,
        }
    }

    /// The name is fixed once constructed; renaming could break uniqueness.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name)
    }

    pub fn script_text(&self) -> Option<&str> {
        self.script.as_ref().map(Script::text)
    }
}

/// Named string value on a control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub value: String,
}

/// Insertion-ordered property list with unique names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties(Vec<Property>);

impl Properties {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set a value, replacing in place if the name exists.
    /// Returns the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();

        match self.0.iter_mut().find(|p| p.name == name) {
            Some(existing) => Some(std::mem::replace(&mut existing.value, value)),
            None => {
                self.0.push(Property { name, value });
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Opaque script payload, stored and written verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script(String);

impl Script {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control(name: &str) -> Control {
        Control::new(name, ControlKind::Label, Frame::new(0, 0, 10, 10))
    }

    #[test]
    fn test_new_document_is_empty_with_canonical_version() {
        let doc = Document::new();
        assert_eq!(doc.version(), 18);
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
    }

    #[test]
    fn test_insert_and_find() {
        let mut doc = Document::new();
        doc.insert_control(control("a")).unwrap();
        doc.insert_control(control("b")).unwrap();

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.find_control("b").unwrap().name(), "b");
        assert!(doc.find_control("c").is_none());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut doc = Document::new();
        doc.insert_control(control("Fader")).unwrap();

        assert!(doc.find_control("fader").is_none());
        assert!(doc.insert_control(control("fader")).is_ok());
    }

    #[test]
    fn test_duplicate_insert_leaves_document_unchanged() {
        let mut doc = Document::new();
        doc.insert_control(control("a")).unwrap();
        let before = doc.clone();

        let mut dup = Control::new("a", ControlKind::Button, Frame::new(5, 5, 5, 5));
        dup.properties.set("type", "push");

        let err = doc.insert_control(dup).unwrap_err();
        assert_eq!(err, ModelError::DuplicateName("a".to_string()));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_properties_set_replaces_in_place() {
        let mut props = Properties::default();
        assert_eq!(props.set("text", "one"), None);
        props.set("color", "red");
        assert_eq!(props.set("text", "two"), Some("one".to_string()));

        let names: Vec<_> = props.names().collect();
        assert_eq!(names, vec!["text", "color"]);
        assert_eq!(props.get("text"), Some("two"));
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn test_control_kind_parsing() {
        assert_eq!("label".parse::<ControlKind>().unwrap(), ControlKind::Label);
        assert_eq!("button".parse::<ControlKind>().unwrap(), ControlKind::Button);
        assert!(matches!(
            "LABEL".parse::<ControlKind>(),
            Err(ParseError::UnknownControlType(t)) if t == "LABEL"
        ));
    }
}

//! # Edit Session
//!
//! Holds the one document currently open for editing and the path it was
//! last read from or written to.
//!
//! ```text
//!            create / load
//!   Empty ───────────────────→ Loaded ⟲ add / embed / write / create / load
//! ```
//!
//! Every operation either succeeds completely or leaves the session exactly
//! as it was. Sessions are plain values owned by the caller; nothing here is
//! global, so independent sessions can live side by side.

use crate::EditorError;
use std::path::{Path, PathBuf};
use tosc_lexml::{attach_script, make_label, make_typed_button, package, ButtonType, Document, Frame};

/// Single-document edit session
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
}

#[derive(Debug, Default)]
enum SessionState {
    #[default]
    Empty,
    Loaded {
        document: Document,
        path: Option<PathBuf>,
    },
}

impl Session {
    /// Session with no document loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Session holding an in-memory document that has never been saved
    pub fn from_document(document: Document) -> Self {
        Self {
            state: SessionState::Loaded { document, path: None },
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, SessionState::Loaded { .. })
    }

    pub fn document(&self) -> Option<&Document> {
        match &self.state {
            SessionState::Loaded { document, .. } => Some(document),
            SessionState::Empty => None,
        }
    }

    /// Last path the document was loaded from or written to
    pub fn path(&self) -> Option<&Path> {
        match &self.state {
            SessionState::Loaded { path, .. } => path.as_deref(),
            SessionState::Empty => None,
        }
    }

    /// Start a fresh document, save it to `path` and keep editing it
    pub fn create(&mut self, path: &Path) -> Result<(), EditorError> {
        let document = Document::new();
        package::save(&document, path)?;

        tracing::info!("created {}", path.display());
        self.state = SessionState::Loaded {
            document,
            path: Some(path.to_path_buf()),
        };
        Ok(())
    }

    /// Replace the held document with the one stored at `path`
    pub fn load(&mut self, path: &Path) -> Result<(), EditorError> {
        let document = package::open(path)?;

        tracing::info!("loaded {} ({} controls)", path.display(), document.len());
        self.state = SessionState::Loaded {
            document,
            path: Some(path.to_path_buf()),
        };
        Ok(())
    }

    /// Save the held document, to `path` or else to the last-used path.
    ///
    /// Returns the path written, which becomes the new last-used path.
    pub fn write(&mut self, path: Option<&Path>) -> Result<PathBuf, EditorError> {
        let SessionState::Loaded { document, path: last } = &mut self.state else {
            return Err(EditorError::NoDocumentLoaded);
        };

        let target = match path.or(last.as_deref()) {
            Some(target) => target.to_path_buf(),
            None => return Err(EditorError::NoOutputPath),
        };

        package::save(document, &target)?;
        *last = Some(target.clone());
        Ok(target)
    }

    pub fn add_label(&mut self, name: &str, text: &str, frame: Frame, color: &str) -> Result<(), EditorError> {
        let document = self.document_mut()?;
        document.insert_control(make_label(name, text, frame, color))?;

        tracing::debug!("added label {:?}", name);
        Ok(())
    }

    /// Add a button; the type is validated before the name is checked.
    pub fn add_button(
        &mut self,
        name: &str,
        button_type: &str,
        frame: Frame,
        color: &str,
    ) -> Result<ButtonType, EditorError> {
        let document = self.document_mut()?;
        let kind: ButtonType = button_type.parse()?;
        document.insert_control(make_typed_button(name, kind, frame, color))?;

        tracing::debug!("added {} button {:?}", kind, name);
        Ok(kind)
    }

    pub fn embed_script(&mut self, control_name: &str, script: &str) -> Result<(), EditorError> {
        let document = self.document_mut()?;
        attach_script(document, control_name, script)?;

        tracing::debug!("embedded {} byte script into {:?}", script.len(), control_name);
        Ok(())
    }

    fn document_mut(&mut self) -> Result<&mut Document, EditorError> {
        match &mut self.state {
            SessionState::Loaded { document, .. } => Ok(document),
            SessionState::Empty => Err(EditorError::NoDocumentLoaded),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tosc_lexml::{ControlKind, ModelError, DEFAULT_COLOR};

    fn frame() -> Frame {
        Frame::new(10, 10, 50, 50)
    }

    #[test]
    fn test_session_starts_empty() {
        let session = Session::new();
        assert!(!session.is_loaded());
        assert!(session.document().is_none());
        assert!(session.path().is_none());
    }

    #[test]
    fn test_mutations_need_a_document() {
        let mut session = Session::new();

        assert!(matches!(
            session.add_label("l", "t", frame(), DEFAULT_COLOR),
            Err(EditorError::NoDocumentLoaded)
        ));
        assert!(matches!(
            session.add_button("b", "push", frame(), DEFAULT_COLOR),
            Err(EditorError::NoDocumentLoaded)
        ));
        assert!(matches!(session.embed_script("b", "x"), Err(EditorError::NoDocumentLoaded)));
        assert!(matches!(session.write(None), Err(EditorError::NoDocumentLoaded)));
        assert!(!session.is_loaded());
    }

    #[test]
    fn test_add_button_then_find() {
        let mut session = Session::from_document(Document::new());
        let kind = session.add_button("my_button", "push", frame(), "blue").unwrap();
        assert_eq!(kind, ButtonType::Push);

        let control = session.document().unwrap().find_control("my_button").unwrap();
        assert_eq!(control.kind, ControlKind::Button);
        assert_eq!(control.frame, frame());
        assert_eq!(control.properties.len(), 2);
        assert_eq!(control.property("type"), Some("push"));
        assert_eq!(control.property("color"), Some("blue"));
    }

    #[test]
    fn test_duplicate_name_keeps_document() {
        let mut session = Session::from_document(Document::new());
        session.add_button("my_button", "push", frame(), DEFAULT_COLOR).unwrap();
        let before = session.document().unwrap().clone();

        let err = session
            .add_label("my_button", "text", Frame::new(20, 20, 50, 50), DEFAULT_COLOR)
            .unwrap_err();
        assert!(matches!(err, EditorError::Model(ModelError::DuplicateName(ref n)) if n == "my_button"));
        assert_eq!(session.document().unwrap(), &before);
    }

    #[test]
    fn test_invalid_button_type_checked_before_duplicate() {
        let mut session = Session::from_document(Document::new());
        session.add_label("taken", "t", frame(), DEFAULT_COLOR).unwrap();

        let err = session.add_button("taken", "slider", frame(), DEFAULT_COLOR).unwrap_err();
        assert!(matches!(err, EditorError::Model(ModelError::InvalidButtonType(_))));
        assert_eq!(session.document().unwrap().len(), 1);
    }

    #[test]
    fn test_embed_script_twice() {
        let mut session = Session::from_document(Document::new());
        let kind = session.add_button("script_button", "toggle", frame(), DEFAULT_COLOR).unwrap();
        assert_eq!(kind, ButtonType::Toggle);

        session.embed_script("script_button", "print(1)").unwrap();
        session.embed_script("script_button", "print(2)").unwrap();

        let control = session.document().unwrap().find_control("script_button").unwrap();
        assert_eq!(control.script_text(), Some("print(2)"));
    }

    #[test]
    fn test_write_without_any_path() {
        let mut session = Session::from_document(Document::new());
        assert!(matches!(session.write(None), Err(EditorError::NoOutputPath)));
        assert!(session.path().is_none());
    }
}

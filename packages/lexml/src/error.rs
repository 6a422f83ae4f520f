use std::path::PathBuf;
use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Rejections raised while mutating an in-memory document.
///
/// The display strings are user-facing: the tool surface prefixes them with
/// `Error: ` and hands them back to the caller verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("A control with the name '{0}' already exists.")]
    DuplicateName(String),

    #[error("button_type must be either 'push' or 'toggle'.")]
    InvalidButtonType(String),

    #[error("Control '{0}' not found in the project.")]
    ControlNotFound(String),
}

/// Malformed package or XML payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed XML at byte {pos}: {message}")]
    Xml { pos: usize, message: String },

    #[error("Invalid package: {0}")]
    Package(String),

    #[error("Expected root element <lexml>, found <{found}>")]
    UnexpectedRoot { found: String },

    #[error("Document has no <lexml> root element")]
    MissingRoot,

    #[error("Unexpected <{element}> inside <{parent}> at byte {pos}")]
    UnexpectedElement {
        pos: usize,
        element: String,
        parent: String,
    },

    #[error("Unexpected end of input inside <{element}>")]
    UnexpectedEof { element: String },

    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    #[error("Attribute '{attribute}' has non-integer value '{value}'")]
    InvalidNumber { attribute: String, value: String },

    #[error("Unknown control type '{0}'")]
    UnknownControlType(String),

    #[error("Duplicate control name '{0}'")]
    DuplicateControl(String),

    #[error("Control '{control}' defines property '{property}' more than once")]
    DuplicateProperty { control: String, property: String },

    #[error("Control '{control}' has more than one <script>")]
    DuplicateScript { control: String },
}

impl ParseError {
    pub fn xml(pos: usize, message: impl Into<String>) -> Self {
        Self::Xml {
            pos,
            message: message.into(),
        }
    }

    pub fn unexpected_element(pos: usize, element: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::UnexpectedElement {
            pos,
            element: element.into(),
            parent: parent.into(),
        }
    }

    pub fn unexpected_eof(element: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            element: element.into(),
        }
    }

    pub fn missing_attribute(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    pub fn invalid_number(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            attribute: attribute.into(),
            value: value.into(),
        }
    }
}

/// Failures reading or writing a package on disk.
///
/// Every variant names the path involved so the message stands on its own.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("File not found at '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to parse '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}


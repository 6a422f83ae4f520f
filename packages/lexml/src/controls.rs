//! # Control Factory
//!
//! One constructor per [`ControlKind`], each producing the kind's canonical
//! property set. Construction is pure: inserting the result into a document
//! (and the duplicate-name check that comes with it) is the caller's job, so
//! invalid input is rejected before the document is ever touched.

use crate::ast::{Control, ControlKind, Frame};
use crate::error::ModelError;
use std::fmt;
use std::str::FromStr;

/// Color used when the caller does not pick one
pub const DEFAULT_COLOR: &str = "red";

/// Button behavior, stored as the button's `type` property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonType {
    Push,
    Toggle,
}

impl ButtonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonType::Push => "push",
            ButtonType::Toggle => "toggle",
        }
    }
}

impl fmt::Display for ButtonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ButtonType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "push" => Ok(ButtonType::Push),
            "toggle" => Ok(ButtonType::Toggle),
            other => Err(ModelError::InvalidButtonType(other.to_string())),
        }
    }
}

/// Build a `label` control with properties `text` and `color`
pub fn make_label(name: impl Into<String>, text: impl Into<String>, frame: Frame, color: impl Into<String>) -> Control {
    let mut control = Control::new(name, ControlKind::Label, frame);
    control.properties.set("text", text);
    control.properties.set("color", color);
    control
}

/// Build a `button` control with properties `type` and `color`.
///
/// `button_type` must be `push` or `toggle`.
pub fn make_button(
    name: impl Into<String>,
    button_type: &str,
    frame: Frame,
    color: impl Into<String>,
) -> Result<Control, ModelError> {
    Ok(make_typed_button(name, button_type.parse()?, frame, color))
}

/// [`make_button`] for an already validated [`ButtonType`]
pub fn make_typed_button(
    name: impl Into<String>,
    button_type: ButtonType,
    frame: Frame,
    color: impl Into<String>,
) -> Control {
    let mut control = Control::new(name, ControlKind::Button, frame);
    // Not the control's own type attribute; both end up in the output.
    control.properties.set("type", button_type.as_str());
    control.properties.set("color", color);
    control
}

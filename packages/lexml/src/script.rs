//! Script attachment. Scripts are stored, never executed.

use crate::ast::{Document, Script};
use crate::error::ModelError;

/// Give `control_name` exactly one script holding `script_text`.
///
/// An existing script is overwritten, never duplicated or merged.
pub fn attach_script(
    doc: &mut Document,
    control_name: &str,
    script_text: impl Into<String>,
) -> Result<(), ModelError> {
    let control = doc
        .find_control_mut(control_name)
        .ok_or_else(|| ModelError::ControlNotFound(control_name.to_string()))?;

    if control.script.replace(Script::new(script_text)).is_some() {
        tracing::debug!("replaced existing script on {:?}", control_name);
    }

    Ok(())
}

//! Integration tests for the editor crate

use std::fs;
use tempfile::TempDir;
use tosc_editor::{Frame, Session, ToolCall, ToolSurface, TOOL_NAMES};
use tosc_lexml::{open, save, to_xml, ControlKind, Document};

fn surface() -> (TempDir, ToolSurface) {
    let dir = TempDir::new().unwrap();
    let tools = ToolSurface::new(dir.path());
    (dir, tools)
}

#[test]
fn test_create_new_file() {
    let (dir, mut tools) = surface();
    let path = dir.path().join("test1.tosc");

    let result = tools.create_new_file("test1.tosc");
    assert_eq!(
        result,
        format!("Successfully created '{}' and loaded it for editing.", path.display())
    );
    assert!(path.exists());
    assert!(tools.session().is_loaded());
    assert_eq!(tools.session().path(), Some(path.as_path()));
}

#[test]
fn test_created_file_is_empty_lexml() {
    let (dir, mut tools) = surface();
    tools.create_new_file("empty.tosc");

    let doc = open(&dir.path().join("empty.tosc")).unwrap();
    assert!(doc.is_empty());
    assert!(to_xml(&doc).contains(r#"<lexml version="18">"#));
}

#[test]
fn test_load_non_existent_file() {
    let (dir, mut tools) = surface();

    let result = tools.load_file("non_existent_file.tosc");
    assert_eq!(
        result,
        format!("Error: File not found at '{}'", dir.path().join("non_existent_file.tosc").display())
    );
    assert!(!tools.session().is_loaded());
}

#[test]
fn test_failed_load_keeps_current_document() {
    let (dir, mut tools) = surface();
    tools.create_new_file("keep.tosc");
    tools.add_label("kept", "still here", Frame::new(0, 0, 10, 10), None);

    fs::write(dir.path().join("broken.tosc"), b"not a package").unwrap();
    let result = tools.load_file("broken.tosc");
    assert!(result.starts_with("Error: Failed to parse '"), "{}", result);

    let session = tools.session();
    assert!(session.document().unwrap().find_control("kept").is_some());
    assert_eq!(session.path(), Some(dir.path().join("keep.tosc").as_path()));
}

#[test]
fn test_load_and_write_file() {
    let (dir, mut tools) = surface();
    save(&Document::new(), &dir.path().join("test1.tosc")).unwrap();

    let loaded = tools.load_file("test1.tosc");
    assert!(loaded.starts_with("Successfully loaded"), "{}", loaded);

    let written = tools.write_file(Some("test2.tosc"));
    let target = dir.path().join("test2.tosc");
    assert_eq!(written, format!("Successfully wrote project to '{}'.", target.display()));
    assert!(target.exists());
    assert_eq!(tools.session().path(), Some(target.as_path()));
}

#[test]
fn test_write_defaults_to_last_path() {
    let (dir, mut tools) = surface();
    tools.create_new_file("set.tosc");
    tools.add_label("my_label", "hello", Frame::new(0, 0, 100, 50), None);

    let written = tools.write_file(None);
    assert!(written.starts_with("Successfully wrote"), "{}", written);

    let doc = open(&dir.path().join("set.tosc")).unwrap();
    let label = doc.find_control("my_label").unwrap();
    assert_eq!(label.kind, ControlKind::Label);
    assert_eq!(label.property("text"), Some("hello"));
    assert_eq!(label.property("color"), Some("red"));
}

#[test]
fn test_empty_write_path_means_last_path() {
    let (dir, mut tools) = surface();
    tools.create_new_file("set.tosc");
    tools.add_label("my_label", "hello", Frame::new(0, 0, 100, 50), None);

    let path = dir.path().join("set.tosc");
    assert_eq!(
        tools.write_file(Some("")),
        format!("Successfully wrote project to '{}'.", path.display())
    );
    assert!(open(&path).unwrap().find_control("my_label").is_some());

    let siblings: Vec<_> = fs::read_dir(dir.path().parent().unwrap())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    let staged = format!("{}.tmp", dir.path().file_name().unwrap().to_string_lossy());
    assert!(!siblings.iter().any(|name| name.to_string_lossy() == staged));
}

#[test]
fn test_write_without_document_touches_nothing() {
    let (dir, mut tools) = surface();

    assert_eq!(tools.write_file(Some("out.tosc")), "Error: No .tosc file is currently loaded.");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_add_button() {
    let (_dir, mut tools) = surface();
    tools.create_new_file("test1.tosc");

    let result = tools.add_button("my_button", "push", Frame::new(10, 10, 50, 50), None);
    assert_eq!(result, "Successfully added push button 'my_button'.");
    assert!(tools.session().document().unwrap().find_control("my_button").is_some());

    let duplicate = tools.add_button("my_button", "push", Frame::new(20, 20, 50, 50), None);
    assert_eq!(duplicate, "Error: A control with the name 'my_button' already exists.");
    assert_eq!(tools.session().document().unwrap().len(), 1);
}

#[test]
fn test_add_button_rejects_bad_type() {
    let (_dir, mut tools) = surface();
    tools.create_new_file("test1.tosc");

    let result = tools.add_button("b", "momentary", Frame::default(), None);
    assert_eq!(result, "Error: button_type must be either 'push' or 'toggle'.");
    assert!(tools.session().document().unwrap().is_empty());
}

#[test]
fn test_default_color_policy() {
    let dir = TempDir::new().unwrap();
    let mut tools = ToolSurface::new(dir.path()).with_default_color("blue");
    tools.create_new_file("c.tosc");

    tools.add_label("implicit", "x", Frame::default(), None);
    tools.add_label("explicit", "x", Frame::default(), Some("yellow"));

    let doc = tools.session().document().unwrap();
    assert_eq!(doc.find_control("implicit").unwrap().property("color"), Some("blue"));
    assert_eq!(doc.find_control("explicit").unwrap().property("color"), Some("yellow"));
}

#[test]
fn test_embed_lua_script() {
    let (dir, mut tools) = surface();
    tools.create_new_file("test1.tosc");
    tools.add_button("script_button", "toggle", Frame::new(0, 0, 50, 50), None);

    let script_content = "function onValue(v) print(v) end";
    let result = tools.embed_script("script_button", script_content);
    assert_eq!(result, "Successfully embedded script into control 'script_button'.");

    let control = tools.session().document().unwrap().find_control("script_button").unwrap();
    assert_eq!(control.script_text(), Some(script_content));

    tools.write_file(None);
    let reopened = open(&dir.path().join("test1.tosc")).unwrap();
    assert_eq!(
        reopened.find_control("script_button").unwrap().script_text(),
        Some(script_content)
    );
}

#[test]
fn test_embed_into_missing_control() {
    let (_dir, mut tools) = surface();
    tools.create_new_file("test1.tosc");
    let before = tools.session().document().unwrap().clone();

    let result = tools.embed_script("missing_ctrl", "print('x')");
    assert_eq!(result, "Error: Control 'missing_ctrl' not found in the project.");
    assert_eq!(tools.session().document().unwrap(), &before);
}

#[test]
fn test_never_saved_session_needs_path() {
    let mut session = Session::from_document(Document::new());
    let err = session.write(None).unwrap_err();
    assert_eq!(err.to_string(), "No output path specified. Please provide a 'file_path'.");
}

#[test]
fn test_independent_sessions() {
    let (dir, mut first) = surface();
    let mut second = ToolSurface::new(dir.path());

    first.create_new_file("a.tosc");
    second.create_new_file("b.tosc");
    first.add_label("only_in_a", "x", Frame::default(), None);

    assert!(second.session().document().unwrap().find_control("only_in_a").is_none());
}

#[test]
fn test_dispatch_full_flow() {
    let (dir, mut tools) = surface();

    let calls = [
        r#"{"tool": "create_new_file", "arguments": {"file_path": "flow.tosc"}}"#,
        r#"{"tool": "add_label", "arguments": {"name": "title", "text": "Mixer", "x": 0, "y": 0, "w": 200, "h": 40}}"#,
        r#"{"tool": "add_button", "arguments": {"name": "mute", "button_type": "toggle", "x": 0, "y": 50, "w": 60, "h": 60, "color": "orange"}}"#,
        r#"{"tool": "embed_script", "arguments": {"control_name": "mute", "script": "if x < 1 then end"}}"#,
        r#"{"tool": "write_file", "arguments": {}}"#,
    ];

    for raw in calls {
        let call: ToolCall = serde_json::from_str(raw).unwrap();
        let status = tools.dispatch(call);
        assert!(status.starts_with("Successfully "), "{} -> {}", raw, status);
    }

    let doc = open(&dir.path().join("flow.tosc")).unwrap();
    assert_eq!(doc.len(), 2);
    let mute = doc.find_control("mute").unwrap();
    assert_eq!(mute.property("color"), Some("orange"));
    assert_eq!(mute.script_text(), Some("if x < 1 then end"));
}

#[test]
fn test_tool_names_are_stable() {
    assert_eq!(
        TOOL_NAMES,
        ["create_new_file", "load_file", "write_file", "add_label", "add_button", "embed_script"]
    );
}

use crate::ast::*;
use quick_xml::escape::escape;

/// Serializer converts the document tree to lexml XML.
///
/// Layout of one control:
///
/// ```xml
/// <control name="btn" type="button" x="0" y="0" w="50" h="50">
///   <properties>
///     <property name="type"><string>push</string></property>
///     <property name="color"><string>red</string></property>
///     <script><![CDATA[function onValue(v) end]]></script>
///   </properties>
/// </control>
/// ```
///
/// Property values are escaped text. Scripts go out as CDATA so they stay
/// literal; a `]]>` inside a script is split across two CDATA sections.
pub struct Serializer {
    indent_level: usize,
    indent_string: Option<String>,
}

impl Serializer {
    /// Compact output, no whitespace between elements
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            indent_string: None,
        }
    }

    /// One element per line, indented with `indent`
    pub fn with_indent(indent: &str) -> Self {
        Self {
            indent_level: 0,
            indent_string: Some(indent.to_string()),
        }
    }

    pub fn serialize(&mut self, doc: &Document) -> String {
        let mut output = String::new();

        output.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        self.newline(&mut output);

        output.push_str(&format!(r#"<{} version="{}">"#, ROOT_TAG, doc.version()));
        self.indent_level += 1;

        for control in doc.controls() {
            self.serialize_control(control, &mut output);
        }

        self.indent_level -= 1;
        self.open_line(&mut output);
        output.push_str(&format!("</{}>", ROOT_TAG));
        self.newline(&mut output);

        output
    }

    fn serialize_control(&mut self, control: &Control, output: &mut String) {
        let Frame { x, y, w, h } = control.frame;

        self.open_line(output);
        output.push_str(&format!(
            r#"<control name="{}" type="{}" x="{}" y="{}" w="{}" h="{}">"#,
            escape(control.name()),
            control.kind.as_str(),
            x,
            y,
            w,
            h
        ));
        self.indent_level += 1;

        self.open_line(output);
        output.push_str("<properties>");
        self.indent_level += 1;

        for property in &control.properties {
            self.open_line(output);
            output.push_str(&format!(
                r#"<property name="{}"><string>{}</string></property>"#,
                escape(&property.name),
                escape_text(&property.value)
            ));
        }

        if let Some(script) = &control.script {
            self.open_line(output);
            output.push_str("<script>");
            output.push_str(&cdata(script.text()));
            output.push_str("</script>");
        }

        self.indent_level -= 1;
        self.open_line(output);
        output.push_str("</properties>");

        self.indent_level -= 1;
        self.open_line(output);
        output.push_str("</control>");
    }

    fn newline(&self, output: &mut String) {
        if self.indent_string.is_some() {
            output.push('\n');
        }
    }

    /// Start a new line at the current depth (pretty mode only)
    fn open_line(&self, output: &mut String) {
        if let Some(indent) = &self.indent_string {
            output.push('\n');
            for _ in 0..self.indent_level {
                output.push_str(indent);
            }
        }
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a document to compact lexml XML
pub fn to_xml(doc: &Document) -> String {
    Serializer::new().serialize(doc)
}

/// Serialize a document to indented lexml XML, for display
pub fn to_pretty_xml(doc: &Document) -> String {
    Serializer::with_indent("  ").serialize(doc)
}

// Carriage returns are written as character references so readers that
// normalize line endings still give back the exact value.
fn escape_text(value: &str) -> String {
    escape(value).replace('\r', "&#13;")
}

fn cdata(text: &str) -> String {
    format!("<![CDATA[{}]]>", text.replace("]]>", "]]]]><![CDATA[>"))
}

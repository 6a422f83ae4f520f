//! Parser for lexml XML, built on quick-xml's pull reader.
//!
//! The reader is driven by hand, one element kind per method, mirroring the
//! shape the [`Serializer`](crate::serializer::Serializer) writes. Whitespace
//! between structural elements is ignored; text inside `<string>` and
//! `<script>` is taken exactly as written.

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

pub struct Parser<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> Parser<'a> {
    pub fn new(xml: &'a str) -> Self {
        Self {
            reader: Reader::from_str(xml),
        }
    }

    pub fn parse_document(&mut self) -> ParseResult<Document> {
        loop {
            match self.next_event()? {
                Event::Start(e) => {
                    let mut doc = self.parse_root(&e)?;
                    self.parse_controls(&mut doc)?;
                    self.parse_trailer()?;
                    return Ok(doc);
                }
                Event::Empty(e) => {
                    let doc = self.parse_root(&e)?;
                    self.parse_trailer()?;
                    return Ok(doc);
                }
                Event::Eof => return Err(ParseError::MissingRoot),
                Event::Text(t) if is_blank(&t) => {}
                Event::Text(_) | Event::CData(_) => {
                    return Err(ParseError::xml(self.position(), "text outside the root element"));
                }
                // Declaration, comments, processing instructions, doctype
                _ => {}
            }
        }
    }

    /// Only whitespace, comments and processing instructions may follow the root
    fn parse_trailer(&mut self) -> ParseResult<()> {
        loop {
            match self.next_event()? {
                Event::Eof => return Ok(()),
                Event::Text(t) if is_blank(&t) => {}
                Event::Comment(_) | Event::PI(_) => {}
                Event::Start(e) | Event::Empty(e) => {
                    return Err(ParseError::xml(
                        self.position(),
                        format!("<{}> after the root element", element_name(&e)),
                    ));
                }
                _ => return Err(ParseError::xml(self.position(), "content after the root element")),
            }
        }
    }

    fn parse_root(&self, start: &BytesStart) -> ParseResult<Document> {
        let tag = element_name(start);
        if tag != ROOT_TAG {
            return Err(ParseError::UnexpectedRoot { found: tag });
        }

        let version = required_attr(start, ROOT_TAG, "version")?;
        let version = version
            .parse::<u32>()
            .map_err(|_| ParseError::invalid_number("version", version.as_str()))?;

        Ok(Document::with_version(version))
    }

    fn parse_controls(&mut self, doc: &mut Document) -> ParseResult<()> {
        loop {
            match self.next_event()? {
                Event::Start(e) if e.name().as_ref() == b"control" => {
                    let mut control = control_header(&e)?;
                    self.parse_control_body(&mut control)?;
                    self.insert(doc, control)?;
                }
                Event::Empty(e) if e.name().as_ref() == b"control" => {
                    let control = control_header(&e)?;
                    self.insert(doc, control)?;
                }
                Event::Start(e) | Event::Empty(e) => {
                    return Err(ParseError::unexpected_element(self.position(), element_name(&e), ROOT_TAG));
                }
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(ParseError::unexpected_eof(ROOT_TAG)),
                _ => {}
            }
        }
    }

    fn insert(&self, doc: &mut Document, control: Control) -> ParseResult<()> {
        let name = control.name().to_string();
        doc.insert_control(control)
            .map_err(|_| ParseError::DuplicateControl(name))
    }

    fn parse_control_body(&mut self, control: &mut Control) -> ParseResult<()> {
        loop {
            match self.next_event()? {
                Event::Start(e) if e.name().as_ref() == b"properties" => {
                    self.parse_properties(control)?;
                }
                Event::Empty(e) if e.name().as_ref() == b"properties" => {}
                Event::Start(e) | Event::Empty(e) => {
                    return Err(ParseError::unexpected_element(self.position(), element_name(&e), "control"));
                }
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(ParseError::unexpected_eof("control")),
                _ => {}
            }
        }
    }

    fn parse_properties(&mut self, control: &mut Control) -> ParseResult<()> {
        loop {
            match self.next_event()? {
                Event::Start(e) if e.name().as_ref() == b"property" => {
                    let name = required_attr(&e, "property", "name")?;
                    let value = self.parse_property_value()?;
                    self.set_property(control, name, value)?;
                }
                Event::Empty(e) if e.name().as_ref() == b"property" => {
                    let name = required_attr(&e, "property", "name")?;
                    self.set_property(control, name, String::new())?;
                }
                Event::Start(e) if e.name().as_ref() == b"script" => {
                    let text = self.read_text("script")?;
                    self.set_script(control, text)?;
                }
                Event::Empty(e) if e.name().as_ref() == b"script" => {
                    self.set_script(control, String::new())?;
                }
                Event::Start(e) | Event::Empty(e) => {
                    return Err(ParseError::unexpected_element(self.position(), element_name(&e), "properties"));
                }
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(ParseError::unexpected_eof("properties")),
                _ => {}
            }
        }
    }

    fn set_property(&self, control: &mut Control, name: String, value: String) -> ParseResult<()> {
        if control.properties.contains(&name) {
            return Err(ParseError::DuplicateProperty {
                control: control.name().to_string(),
                property: name,
            });
        }

        if !control.kind.canonical_properties().contains(&name.as_str()) {
            tracing::debug!("{} '{}' carries extra property {:?}", control.kind, control.name(), name);
        }

        control.properties.set(name, value);
        Ok(())
    }

    fn set_script(&self, control: &mut Control, text: String) -> ParseResult<()> {
        if control.script.is_some() {
            return Err(ParseError::DuplicateScript {
                control: control.name().to_string(),
            });
        }

        control.script = Some(Script::new(text));
        Ok(())
    }

    /// Body of `<property>`: a single `<string>` child
    fn parse_property_value(&mut self) -> ParseResult<String> {
        let mut value = None;

        loop {
            match self.next_event()? {
                Event::Start(e) if e.name().as_ref() == b"string" && value.is_none() => {
                    value = Some(self.read_text("string")?);
                }
                Event::Empty(e) if e.name().as_ref() == b"string" && value.is_none() => {
                    value = Some(String::new());
                }
                Event::Start(e) | Event::Empty(e) => {
                    return Err(ParseError::unexpected_element(self.position(), element_name(&e), "property"));
                }
                Event::End(_) => {
                    return value.ok_or_else(|| ParseError::xml(self.position(), "<property> has no <string> value"));
                }
                Event::Eof => return Err(ParseError::unexpected_eof("property")),
                _ => {}
            }
        }
    }

    /// Concatenated text and CDATA up to the closing tag of `element`
    fn read_text(&mut self, element: &str) -> ParseResult<String> {
        let mut text = String::new();

        loop {
            match self.next_event()? {
                Event::Text(t) => {
                    let unescaped = t
                        .unescape()
                        .map_err(|e| ParseError::xml(self.position(), e.to_string()))?;
                    text.push_str(&unescaped);
                }
                Event::CData(c) => {
                    let raw = std::str::from_utf8(&c)
                        .map_err(|e| ParseError::xml(self.position(), e.to_string()))?;
                    text.push_str(raw);
                }
                Event::Start(e) | Event::Empty(e) => {
                    return Err(ParseError::unexpected_element(self.position(), element_name(&e), element));
                }
                Event::End(_) => return Ok(text),
                Event::Eof => return Err(ParseError::unexpected_eof(element)),
                _ => {}
            }
        }
    }

    fn next_event(&mut self) -> ParseResult<Event<'a>> {
        self.reader
            .read_event()
            .map_err(|e| ParseError::xml(self.reader.buffer_position(), e.to_string()))
    }

    fn position(&self) -> usize {
        self.reader.buffer_position()
    }
}

/// Parse lexml XML into a document
pub fn from_xml(xml: &str) -> ParseResult<Document> {
    let doc = Parser::new(xml).parse_document()?;
    tracing::debug!("parsed lexml v{} with {} controls", doc.version(), doc.len());
    Ok(doc)
}

fn control_header(start: &BytesStart) -> ParseResult<Control> {
    let name = required_attr(start, "control", "name")?;
    let kind: ControlKind = required_attr(start, "control", "type")?.parse()?;

    let frame = Frame::new(
        int_attr(start, "x")?,
        int_attr(start, "y")?,
        int_attr(start, "w")?,
        int_attr(start, "h")?,
    );

    Ok(Control::new(name, kind, frame))
}

fn int_attr(start: &BytesStart, attribute: &str) -> ParseResult<i32> {
    let raw = required_attr(start, "control", attribute)?;
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ParseError::invalid_number(attribute, raw.as_str()))
}

fn required_attr(start: &BytesStart, element: &str, attribute: &str) -> ParseResult<String> {
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ParseError::xml(0, format!("attribute error: {}", e)))?;
        if attr.key.as_ref() == attribute.as_bytes() {
            return attr
                .unescape_value()
                .map(|value| value.into_owned())
                .map_err(|e| ParseError::xml(0, e.to_string()));
        }
    }

    Err(ParseError::missing_attribute(element, attribute))
}

fn element_name(start: &BytesStart) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn is_blank(text: &[u8]) -> bool {
    text.iter().all(u8::is_ascii_whitespace)
}

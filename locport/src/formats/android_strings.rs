//! Support for Android `strings.xml` resources.
//!
//! Only `<string>` children of the `<resources>` root are read; `<plurals>` and
//! `<string-array>` are skipped. Values are stored unescaped: XML entities are
//! resolved by the reader and Android backslash escapes by [`unescape`].

use std::io::{BufRead, Write};

use quick_xml::{
    Reader, Writer,
    escape::partial_escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use tracing::{debug, warn};

use crate::{
    error::Error,
    traits::Parser,
    types::{Decoded, Diagnostic, LocalizationTable},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    pub strings: Vec<StringResource>,
    /// Non-fatal findings, such as a document without `<resources>`.
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringResource {
    pub name: String,
    pub value: String,
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut strings = Vec::new();
        let mut depth = 0usize;
        let mut saw_resources = false;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    let name = e.name();
                    if depth == 1 && saw_resources && name.as_ref() == b"string" {
                        let name = string_name(e)?;
                        let value = read_string_value(&mut xml_reader)?;
                        strings.push(StringResource { name, value });
                    } else {
                        if depth == 0 && name.as_ref() == b"resources" {
                            saw_resources = true;
                        } else if depth == 1 {
                            debug!(
                                element = %String::from_utf8_lossy(name.as_ref()),
                                "ignoring non-string resource"
                            );
                        }
                        depth += 1;
                    }
                }
                Event::Empty(ref e) if depth == 1 && saw_resources && e.name().as_ref() == b"string" => {
                    strings.push(StringResource {
                        name: string_name(e)?,
                        value: String::new(),
                    });
                }
                Event::Empty(ref e) if depth == 0 && e.name().as_ref() == b"resources" => {
                    saw_resources = true;
                }
                Event::End(_) => depth = depth.saturating_sub(1),
                Event::Eof if depth > 0 => {
                    return Err(Error::InvalidResource("unexpected end of document".to_string()));
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        let mut diagnostics = Vec::new();
        if !saw_resources {
            diagnostics.push(Diagnostic::new("no <resources> root element found"));
        } else if strings.is_empty() {
            diagnostics.push(Diagnostic::new("no <string> elements found in <resources>"));
        }
        for diagnostic in &diagnostics {
            warn!("{}", diagnostic);
        }

        Ok(Format {
            strings,
            diagnostics,
        })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new_with_indent(&mut writer, b' ', 4);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        xml_writer.write_event(Event::Start(BytesStart::new("resources")))?;

        for sr in &self.strings {
            let mut elem = BytesStart::new("string");
            elem.push_attribute(("name", sr.name.as_str()));

            let escaped = escape(&sr.value);
            xml_writer.write_event(Event::Start(elem))?;
            xml_writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(
                escaped.as_str(),
            ))))?;
            xml_writer.write_event(Event::End(BytesEnd::new("string")))?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new("resources")))?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

impl From<Format> for Decoded {
    fn from(value: Format) -> Self {
        Decoded {
            table: value
                .strings
                .into_iter()
                .map(|sr| (sr.name, sr.value))
                .collect(),
            diagnostics: value.diagnostics,
        }
    }
}

impl From<&LocalizationTable> for Format {
    fn from(table: &LocalizationTable) -> Self {
        Format {
            strings: table
                .iter()
                .map(|(name, value)| StringResource {
                    name: name.to_string(),
                    value: value.to_string(),
                })
                .collect(),
            diagnostics: Vec::new(),
        }
    }
}

fn string_name(e: &BytesStart) -> Result<String, Error> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"name" {
            return Ok(attr.unescape_value()?.to_string());
        }
    }
    Err(Error::InvalidResource("string tag missing 'name'".to_string()))
}

/// Reads the content of a `<string>` up to its closing tag.
///
/// Nested markup such as `<b>` or `<xliff:g>` is kept as literal text.
fn read_string_value<R: BufRead>(xml_reader: &mut Reader<R>) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut raw = String::new();
    let mut nested = 0usize;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Text(e) => raw.push_str(&e.unescape()?),
            Event::CData(e) => raw.push_str(&String::from_utf8_lossy(&e)),
            Event::Start(e) => {
                nested += 1;
                raw.push('<');
                raw.push_str(&String::from_utf8_lossy(&e));
                raw.push('>');
            }
            Event::Empty(e) => {
                raw.push('<');
                raw.push_str(&String::from_utf8_lossy(&e));
                raw.push_str("/>");
            }
            Event::End(_) if nested == 0 => break,
            Event::End(e) => {
                nested -= 1;
                raw.push_str("</");
                raw.push_str(&String::from_utf8_lossy(e.name().as_ref()));
                raw.push('>');
            }
            Event::Eof => {
                return Err(Error::InvalidResource(
                    "unexpected end of document inside <string>".to_string(),
                ));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(unescape(&raw))
}

/// Applies Android string-resource escaping to plain text.
///
/// The result still needs XML escaping of `&`, `<` and `>`, which the writer
/// performs. Apostrophes are always escaped, whatever the target language.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 8);
    for (i, c) in raw.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '@' | '?' if i == 0 => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// Resolves Android backslash escapes in a single pass.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => {
                        out.push(decoded);
                        for _ in 0..4 {
                            chars.next();
                        }
                    }
                    _ => out.push('u'),
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

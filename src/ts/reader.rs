// SPDX-License-Identifier: PMPL-1.0-or-later

//! Event-driven `.ts` reader built on quick-xml.

use crate::error::ParseError;
use crate::types::{Catalog, Context, Location, Message, Translation, TranslationStatus};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt::Display;

/// Parse a whole `.ts` document.
///
/// Either the full catalog is returned or an error is; there is no partial
/// result on failure.
pub fn read_catalog(input: &str) -> Result<Catalog, ParseError> {
    TsReader::new(input).read_document()
}

struct TsReader<'a> {
    input: &'a str,
    reader: Reader<&'a [u8]>,
}

impl<'a> TsReader<'a> {
    fn new(input: &'a str) -> Self {
        let mut reader = Reader::from_str(input);
        // Whitespace inside <source>/<translation> is significant.
        reader.config_mut().trim_text(false);
        Self { input, reader }
    }

    fn read_document(mut self) -> Result<Catalog, ParseError> {
        loop {
            let at = self.offset();
            match self.next()? {
                Event::Start(start) => {
                    self.expect_root(&start)?;
                    let catalog = self.read_ts(&start, at)?;
                    self.drain_trailing()?;
                    return Ok(catalog);
                }
                Event::Empty(start) => {
                    self.expect_root(&start)?;
                    let catalog = self.read_header(&start)?;
                    self.drain_trailing()?;
                    return Ok(catalog);
                }
                Event::Eof => {
                    return Err(ParseError::UnexpectedRoot {
                        found: "end of document".to_string(),
                    })
                }
                Event::Text(text) if !is_blank(&text) => {
                    return Err(self.error_here("text outside of the <TS> element"));
                }
                _ => {}
            }
        }
    }

    fn expect_root(&self, start: &BytesStart<'_>) -> Result<(), ParseError> {
        if start.name().as_ref() == b"TS" {
            Ok(())
        } else {
            Err(ParseError::UnexpectedRoot {
                found: element_name(start),
            })
        }
    }

    /// Consume whatever follows `</TS>` so trailing garbage is still reported.
    fn drain_trailing(&mut self) -> Result<(), ParseError> {
        loop {
            match self.next()? {
                Event::Eof => return Ok(()),
                Event::Start(_) | Event::Empty(_) => {
                    return Err(self.error_here("content after the closing </TS>"));
                }
                Event::Text(text) if !is_blank(&text) => {
                    return Err(self.error_here("text after the closing </TS>"));
                }
                _ => {}
            }
        }
    }

    fn read_header(&self, start: &BytesStart<'_>) -> Result<Catalog, ParseError> {
        Ok(Catalog {
            version: self.attribute(start, "version")?,
            language: self.attribute(start, "language")?,
            source_language: self.attribute(start, "sourcelanguage")?,
            default_codec: None,
            contexts: Vec::new(),
        })
    }

    fn read_ts(&mut self, start: &BytesStart<'_>, opened: usize) -> Result<Catalog, ParseError> {
        let mut catalog = self.read_header(start)?;
        loop {
            let at = self.offset();
            match self.next()? {
                Event::Start(child) => match child.name().as_ref() {
                    b"defaultcodec" => catalog.default_codec = Some(self.read_text("defaultcodec", at)?),
                    b"context" => catalog.contexts.push(self.read_context(at)?),
                    b"message" => return Err(self.error_at("<message> outside of a <context>", at)),
                    _ => self.skip(&child, at)?,
                },
                Event::Empty(child) => match child.name().as_ref() {
                    b"context" => return Err(self.missing("context", "name")),
                    b"message" => return Err(self.error_at("<message> outside of a <context>", at)),
                    _ => {}
                },
                Event::End(_) => return Ok(catalog),
                Event::Eof => return Err(self.unclosed("TS", opened)),
                _ => {}
            }
        }
    }

    fn read_context(&mut self, opened: usize) -> Result<Context, ParseError> {
        let mut name = None;
        let mut comment = None;
        let mut messages = Vec::new();
        loop {
            let at = self.offset();
            match self.next()? {
                Event::Start(child) => match child.name().as_ref() {
                    b"name" => name = Some(self.read_text("name", at)?),
                    b"comment" => comment = Some(self.read_text("comment", at)?),
                    b"message" => messages.push(self.read_message(&child, at)?),
                    _ => self.skip(&child, at)?,
                },
                Event::Empty(child) => match child.name().as_ref() {
                    b"name" => name = Some(String::new()),
                    b"comment" => comment = Some(String::new()),
                    b"message" => return Err(self.missing("message", "source")),
                    _ => {}
                },
                Event::End(_) => {
                    let name = name.ok_or_else(|| self.missing("context", "name"))?;
                    return Ok(Context {
                        name,
                        comment,
                        messages,
                    });
                }
                Event::Eof => return Err(self.unclosed("context", opened)),
                _ => {}
            }
        }
    }

    fn read_message(&mut self, start: &BytesStart<'_>, opened: usize) -> Result<Message, ParseError> {
        let id = self.attribute(start, "id")?;
        let numerus = self.attribute(start, "numerus")?.as_deref() == Some("yes");

        let mut source = None;
        let mut translation = None;
        let mut status = TranslationStatus::Unfinished;
        let mut comment = None;
        let mut old_source = None;
        let mut old_comment = None;
        let mut extra_comment = None;
        let mut translator_comment = None;
        let mut locations = Vec::new();

        loop {
            let at = self.offset();
            match self.next()? {
                Event::Start(child) => match child.name().as_ref() {
                    b"source" => source = Some(self.read_text("source", at)?),
                    b"comment" => comment = Some(self.read_text("comment", at)?),
                    b"oldsource" => old_source = Some(self.read_text("oldsource", at)?),
                    b"oldcomment" => old_comment = Some(self.read_text("oldcomment", at)?),
                    b"extracomment" => extra_comment = Some(self.read_text("extracomment", at)?),
                    b"translatorcomment" => {
                        translator_comment = Some(self.read_text("translatorcomment", at)?)
                    }
                    b"translation" => {
                        status = TranslationStatus::from_type_attr(
                            self.attribute(&child, "type")?.as_deref(),
                        );
                        translation = Some(self.read_translation(numerus, at)?);
                    }
                    b"location" => {
                        locations.push(self.read_location(&child)?);
                        self.skip(&child, at)?;
                    }
                    _ => self.skip(&child, at)?,
                },
                Event::Empty(child) => match child.name().as_ref() {
                    b"source" => source = Some(String::new()),
                    b"comment" => comment = Some(String::new()),
                    b"translation" => {
                        status = TranslationStatus::from_type_attr(
                            self.attribute(&child, "type")?.as_deref(),
                        );
                        translation = Some(if numerus {
                            Translation::Plural(Vec::new())
                        } else {
                            Translation::default()
                        });
                    }
                    b"location" => locations.push(self.read_location(&child)?),
                    _ => {}
                },
                Event::End(_) => {
                    let source = source.ok_or_else(|| self.missing("message", "source"))?;
                    let translation = translation.unwrap_or_else(|| {
                        if numerus {
                            Translation::Plural(Vec::new())
                        } else {
                            Translation::default()
                        }
                    });
                    return Ok(Message {
                        source,
                        translation,
                        status,
                        comment,
                        id,
                        old_source,
                        old_comment,
                        extra_comment,
                        translator_comment,
                        locations,
                    });
                }
                Event::Eof => return Err(self.unclosed("message", opened)),
                _ => {}
            }
        }
    }

    /// Body of `<translation>`: plain text, or `<numerusform>` children for
    /// plural messages.
    fn read_translation(&mut self, numerus: bool, opened: usize) -> Result<Translation, ParseError> {
        let mut text = String::new();
        let mut forms = Vec::new();
        loop {
            let at = self.offset();
            match self.next()? {
                Event::Text(chunk) => text.push_str(&chunk.unescape().map_err(|e| self.error_at(e, at))?),
                Event::CData(chunk) => text.push_str(&String::from_utf8_lossy(&chunk)),
                Event::Start(child) if child.name().as_ref() == b"numerusform" => {
                    forms.push(self.read_text("numerusform", at)?)
                }
                Event::Empty(child) => match child.name().as_ref() {
                    b"numerusform" => forms.push(String::new()),
                    b"byte" => text.push(self.read_byte(&child)?),
                    _ => return Err(self.unexpected(&child, "translation", at)),
                },
                Event::Start(child) => return Err(self.unexpected(&child, "translation", at)),
                Event::End(_) => {
                    return Ok(if numerus {
                        Translation::Plural(forms)
                    } else {
                        Translation::Text(text)
                    });
                }
                Event::Eof => return Err(self.unclosed("translation", opened)),
                _ => {}
            }
        }
    }

    fn read_location(&self, start: &BytesStart<'_>) -> Result<Location, ParseError> {
        let filename = self.attribute(start, "filename")?.unwrap_or_default();
        let line = self
            .attribute(start, "line")?
            .and_then(|value| value.trim().parse().ok());
        Ok(Location { filename, line })
    }

    /// Text content of a leaf element, including `<byte value="x9"/>`
    /// escapes Linguist uses for control characters.
    fn read_text(&mut self, element: &'static str, opened: usize) -> Result<String, ParseError> {
        let mut text = String::new();
        loop {
            let at = self.offset();
            match self.next()? {
                Event::Text(chunk) => text.push_str(&chunk.unescape().map_err(|e| self.error_at(e, at))?),
                Event::CData(chunk) => text.push_str(&String::from_utf8_lossy(&chunk)),
                Event::Empty(child) if child.name().as_ref() == b"byte" => {
                    text.push(self.read_byte(&child)?)
                }
                Event::Start(child) | Event::Empty(child) => {
                    return Err(self.unexpected(&child, element, at));
                }
                Event::End(_) => return Ok(text),
                Event::Eof => return Err(self.unclosed(element, opened)),
                _ => {}
            }
        }
    }

    fn read_byte(&self, start: &BytesStart<'_>) -> Result<char, ParseError> {
        let value = self.attribute(start, "value")?.unwrap_or_default();
        let code = match value.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => value.parse().ok(),
        };
        code.and_then(char::from_u32)
            .ok_or_else(|| self.error_here(format!("invalid <byte value=\"{}\"/>", value)))
    }

    /// Skip an element we do not model, including all of its children.
    fn skip(&mut self, start: &BytesStart<'_>, opened: usize) -> Result<(), ParseError> {
        let mut depth = 0usize;
        loop {
            match self.next()? {
                Event::Start(_) => depth += 1,
                Event::End(_) if depth == 0 => return Ok(()),
                Event::End(_) => depth -= 1,
                Event::Eof => {
                    let (line, column) = self.line_col(opened);
                    return Err(ParseError::Unclosed {
                        element: element_name(start),
                        line,
                        column,
                    });
                }
                _ => {}
            }
        }
    }

    fn attribute(&self, start: &BytesStart<'_>, name: &str) -> Result<Option<String>, ParseError> {
        let attribute = start
            .try_get_attribute(name)
            .map_err(|e| self.error_here(e))?;
        match attribute {
            Some(attribute) => attribute
                .unescape_value()
                .map(|value| Some(value.into_owned()))
                .map_err(|e| self.error_here(e)),
            None => Ok(None),
        }
    }

    fn next(&mut self) -> Result<Event<'a>, ParseError> {
        match self.reader.read_event() {
            Ok(event) => Ok(event),
            Err(e) => {
                let at = self.reader.error_position() as usize;
                Err(self.error_at(e, at))
            }
        }
    }

    fn offset(&self) -> usize {
        self.reader.buffer_position() as usize
    }

    fn line_col(&self, offset: usize) -> (usize, usize) {
        let bytes = self.input.as_bytes();
        let upto = &bytes[..offset.min(bytes.len())];
        let line = upto.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = upto
            .iter()
            .rposition(|&b| b == b'\n')
            .map(|pos| pos + 1)
            .unwrap_or(0);
        let column = String::from_utf8_lossy(&upto[line_start..]).chars().count() + 1;
        (line, column)
    }

    fn error_at(&self, message: impl Display, offset: usize) -> ParseError {
        let (line, column) = self.line_col(offset);
        ParseError::Xml {
            message: message.to_string(),
            line,
            column,
        }
    }

    fn error_here(&self, message: impl Display) -> ParseError {
        self.error_at(message, self.offset())
    }

    fn missing(&self, element: &'static str, field: &'static str) -> ParseError {
        let (line, column) = self.line_col(self.offset());
        ParseError::MissingField {
            element,
            field,
            line,
            column,
        }
    }

    /// Markup inside a text-only element would silently change the text.
    fn unexpected(&self, child: &BytesStart<'_>, parent: &str, at: usize) -> ParseError {
        self.error_at(
            format!("unexpected <{}> inside <{}>", element_name(child), parent),
            at,
        )
    }

    fn unclosed(&self, element: &str, opened: usize) -> ParseError {
        let (line, column) = self.line_col(opened);
        ParseError::Unclosed {
            element: element.to_string(),
            line,
            column,
        }
    }
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn is_blank(text: &[u8]) -> bool {
    text.iter().all(u8::is_ascii_whitespace)
}

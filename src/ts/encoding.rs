// SPDX-License-Identifier: PMPL-1.0-or-later

//! Byte decoding for catalog assets.
//!
//! A byte-order mark wins; otherwise the `encoding` pseudo-attribute of the
//! XML declaration is honoured; otherwise the bytes are UTF-8.

use crate::error::ParseError;
use encoding_rs::{Encoding, UTF_8};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::borrow::Cow;

/// How far into the asset the XML declaration may reach.
const DECLARATION_WINDOW: usize = 256;

/// Decode raw asset bytes into text.
///
/// Malformed sequences are an error rather than being replaced, since a
/// silently mangled translation is worse than a refused catalog.
pub fn decode(bytes: &[u8]) -> Result<Cow<'_, str>, ParseError> {
    let encoding = match Encoding::for_bom(bytes) {
        Some((encoding, _)) => encoding,
        None => declared_encoding(bytes).unwrap_or(UTF_8),
    };
    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(ParseError::Encoding {
            encoding: actual.name(),
        });
    }
    Ok(text)
}

/// The `encoding` of a leading `<?xml ...?>` declaration, if it names one
/// `encoding_rs` knows.
fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(DECLARATION_WINDOW)];
    let mut reader = Reader::from_reader(head);
    match reader.read_event() {
        Ok(Event::Decl(decl)) => {
            let label = decl.encoding()?.ok()?;
            Encoding::for_label(&label)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_utf8_passes_through() {
        let text = decode("<TS>Versão</TS>".as_bytes()).unwrap();
        assert_eq!(text, "<TS>Versão</TS>");
    }

    #[test]
    fn declared_latin1_is_decoded() {
        let mut bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><TS>Vers".to_vec();
        bytes.push(0xE3);
        bytes.extend_from_slice(b"o</TS>");
        let text = decode(&bytes).unwrap();
        assert!(text.ends_with("<TS>Versão</TS>"));
    }

    #[test]
    fn bom_overrides_declaration() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("<?xml version='1.0' encoding='latin1'?><TS>é</TS>".as_bytes());
        let text = decode(&bytes).unwrap();
        assert!(text.ends_with("<TS>é</TS>"));
        assert!(!text.starts_with('\u{feff}'));
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let err = decode(&[b'<', b'T', b'S', b'>', 0xFF, 0xFE, 0x00]).unwrap_err();
        assert!(matches!(err, ParseError::Encoding { encoding: "UTF-8" }));
    }

    #[test]
    fn declaration_label_is_read() {
        let single = b"<?xml version='1.0' encoding='windows-1252'?><TS/>";
        assert_eq!(declared_encoding(single), Encoding::for_label(b"windows-1252"));
        assert_eq!(declared_encoding(b"<?xml version=\"1.0\"?><TS/>"), None);
        assert_eq!(declared_encoding(b"<TS encoding=\"latin1\"/>"), None);
    }

    #[test]
    fn unknown_label_falls_back_to_utf8() {
        let bytes = "<?xml version=\"1.0\" encoding=\"klingon\"?><TS/>".as_bytes();
        assert!(decode(bytes).is_ok());
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later

//! `.ts` writer reproducing `lupdate`'s layout.

use crate::types::{Catalog, Context, Message, Translation};
use quick_xml::escape::escape;
use std::fmt::Write;

const INDENT: &str = "    ";

/// Serialize a catalog as a `.ts` document.
pub fn write_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str("<!DOCTYPE TS>\n");

    out.push_str("<TS");
    push_attribute(&mut out, "version", catalog.version.as_deref());
    push_attribute(&mut out, "language", catalog.language.as_deref());
    push_attribute(&mut out, "sourcelanguage", catalog.source_language.as_deref());
    out.push_str(">\n");

    if let Some(codec) = &catalog.default_codec {
        push_element(&mut out, 0, "defaultcodec", codec);
    }
    for context in &catalog.contexts {
        write_context(&mut out, context);
    }
    out.push_str("</TS>\n");
    out
}

fn write_context(out: &mut String, context: &Context) {
    out.push_str("<context>\n");
    push_element(out, 1, "name", &context.name);
    if let Some(comment) = &context.comment {
        push_element(out, 1, "comment", comment);
    }
    for message in &context.messages {
        write_message(out, message);
    }
    out.push_str("</context>\n");
}

fn write_message(out: &mut String, message: &Message) {
    out.push_str(INDENT);
    out.push_str("<message");
    push_attribute(out, "id", message.id.as_deref());
    if message.is_numerus() {
        push_attribute(out, "numerus", Some("yes"));
    }
    out.push_str(">\n");

    for location in &message.locations {
        out.push_str(&INDENT.repeat(2));
        out.push_str("<location");
        push_attribute(out, "filename", Some(location.filename.as_str()));
        if let Some(line) = location.line {
            let _ = write!(out, " line=\"{}\"", line);
        }
        out.push_str("/>\n");
    }

    push_element(out, 2, "source", &message.source);
    let optional = [
        ("oldsource", &message.old_source),
        ("comment", &message.comment),
        ("oldcomment", &message.old_comment),
        ("extracomment", &message.extra_comment),
        ("translatorcomment", &message.translator_comment),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            push_element(out, 2, name, value);
        }
    }

    out.push_str(&INDENT.repeat(2));
    out.push_str("<translation");
    push_attribute(out, "type", message.status.type_attr());
    out.push('>');
    match &message.translation {
        Translation::Text(text) => out.push_str(&escape_text(text)),
        Translation::Plural(forms) => {
            out.push('\n');
            for form in forms {
                push_element(out, 3, "numerusform", form);
            }
            out.push_str(&INDENT.repeat(2));
        }
    }
    out.push_str("</translation>\n");

    out.push_str(INDENT);
    out.push_str("</message>\n");
}

fn push_element(out: &mut String, depth: usize, name: &str, text: &str) {
    out.push_str(&INDENT.repeat(depth));
    let _ = writeln!(out, "<{name}>{}</{name}>", escape_text(text));
}

fn push_attribute(out: &mut String, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        let _ = write!(out, " {}=\"{}\"", name, escape(value));
    }
}

/// Escape element text; control characters XML cannot carry become
/// `<byte value="xN"/>` like Linguist writes them.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut plain_start = 0;
    for (index, ch) in text.char_indices() {
        if ch < ' ' && !matches!(ch, '\n' | '\r' | '\t') {
            out.push_str(&escape(&text[plain_start..index]));
            let _ = write!(out, "<byte value=\"x{:x}\"/>", ch as u32);
            plain_start = index + ch.len_utf8();
        }
    }
    out.push_str(&escape(&text[plain_start..]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, TranslationStatus};

    #[test]
    fn writes_lupdate_layout() {
        let catalog = Catalog {
            default_codec: Some("UTF-8".into()),
            ..Catalog::new("pt_PT")
        }
        .with_context(
            Context::new("AboutView")
                .with_message(Message::new("There's life outside the browser!", "Existe vida"))
                .with_message(Message::unfinished("Continue")),
        );
        let expected = "<?xml version=\"1.0\" encoding=\"utf-8\"?>
<!DOCTYPE TS>
<TS version=\"2.0\" language=\"pt_PT\">
<defaultcodec>UTF-8</defaultcodec>
<context>
    <name>AboutView</name>
    <message>
        <source>There&apos;s life outside the browser!</source>
        <translation>Existe vida</translation>
    </message>
    <message>
        <source>Continue</source>
        <translation type=\"unfinished\"></translation>
    </message>
</context>
</TS>
";
        assert_eq!(write_catalog(&catalog), expected);
    }

    #[test]
    fn numerus_and_locations() {
        let mut msg = Message::new("%n video(s)", "");
        msg.translation = Translation::Plural(vec!["%n vídeo".into(), "%n vídeos".into()]);
        msg.locations.push(Location {
            filename: "../src/listmodel.cpp".into(),
            line: Some(7),
        });
        let catalog = Catalog::new("pt_PT").with_context(Context::new("ListModel").with_message(msg));
        let text = write_catalog(&catalog);
        assert!(text.contains("<message numerus=\"yes\">"));
        assert!(text.contains("<location filename=\"../src/listmodel.cpp\" line=\"7\"/>"));
        assert!(text.contains(
            "<translation>\n            <numerusform>%n vídeo</numerusform>\n            <numerusform>%n vídeos</numerusform>\n        </translation>"
        ));
    }

    #[test]
    fn obsolete_status_is_written() {
        let mut msg = Message::new("Old", "Antigo");
        msg.status = TranslationStatus::Obsolete;
        let catalog = Catalog::new("pt_PT").with_context(Context::new("C").with_message(msg));
        assert!(write_catalog(&catalog).contains("<translation type=\"obsolete\">Antigo</translation>"));
    }

    #[test]
    fn control_characters_use_byte_elements() {
        assert_eq!(escape_text("a\u{1}<b"), "a<byte value=\"x1\"/>&lt;b");
        assert_eq!(escape_text("tab\tstays"), "tab\tstays");
    }
}

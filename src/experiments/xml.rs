//! XML experiment: wrap the words of a text in a small document.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use snmp_adapter::experiments::xml::words_document;
//!
//! let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
//! let doc = words_document(["fish", "&", "chips"], at).unwrap();
//! assert!(doc.starts_with("<!DOCTYPE xml><root><timestamp>2024-05-01T12:00:00+00:00</timestamp>"));
//! assert!(doc.contains("<word>&amp;</word>"));
//! ```

use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;

use crate::error::Result;

use super::RULE;

pub const DEFAULT_TEXT: &str = r#"We are the knights who say "NI"!"#;

const WORDS_ATTRIBUTE: (&str, &str) = ("myattribute", "So many pretty words!");

/// Whitespace-separated words of `text`.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// `<!DOCTYPE xml><root><timestamp/><words><word/>...</words></root>` on one line.
pub fn words_document<'a>(
    words: impl IntoIterator<Item = &'a str>,
    timestamp: DateTime<Utc>,
) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::DocType(BytesText::from_escaped("xml")))?;
    writer.write_event(Event::Start(BytesStart::new("root")))?;
    text_element(&mut writer, "timestamp", &isoformat(timestamp))?;

    writer.write_event(Event::Start(
        BytesStart::new("words").with_attributes([WORDS_ATTRIBUTE]),
    ))?;
    let mut count = 0usize;
    for word in words {
        text_element(&mut writer, "word", word)?;
        count += 1;
    }
    writer.write_event(Event::End(BytesEnd::new("words")))?;
    writer.write_event(Event::End(BytesEnd::new("root")))?;

    tracing::debug!(target: "snmp_adapter::experiments", { xml.words = count }, "built words document");
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

/// RFC 3339 with `+00:00`; microseconds only when there are any.
fn isoformat(timestamp: DateTime<Utc>) -> String {
    let precision = if timestamp.timestamp_subsec_micros() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    timestamp.to_rfc3339_opts(precision, false)
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Words document for `text`, stamped now.
pub fn words_xml(text: &str) -> Result<String> {
    words_document(split_words(text), Utc::now())
}

/// Re-serialize `xml` with two-space indentation.
///
/// Elements holding only text stay on one line.
pub fn indent(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            event => writer.write_event(event)?,
        }
    }
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

/// Print the document for `text`, a rule, then the indented document.
pub fn words(out: &mut impl Write, text: &str) -> Result<()> {
    let raw = words_xml(text)?;
    let pretty = indent(&raw)?;
    writeln!(out, "{raw}")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "{pretty}")?;
    Ok(())
}

//! Flattens the tabular XML returned by `ServiceANA.asmx` into rows of
//! `(column, text)` pairs.
//!
//! Responses wrap a `DataTable` around an inline `xs:schema` and a diffgram
//! holding the actual rows. Only elements whose local name matches the
//! requested row tag are read; each direct child becomes one column.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// One table row, columns in document order. Empty elements map to `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlRow {
    pub fields: Vec<(String, Option<String>)>,
}

impl XmlRow {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.as_deref())
    }
}

pub fn decode_rows(bytes: &[u8], row_tag: &str) -> Result<Vec<XmlRow>, quick_xml::Error> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut rows = Vec::new();
    let mut current: Option<XmlRow> = None;
    let mut column: Option<(String, String)> = None;
    // nesting below the current row element
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = local_name(&e);
                if current.is_some() {
                    depth += 1;
                    if depth == 1 {
                        column = Some((name, String::new()));
                    }
                } else if name == row_tag {
                    current = Some(XmlRow::default());
                    depth = 0;
                }
            }
            Event::Empty(e) => {
                let name = local_name(&e);
                match current.as_mut() {
                    Some(row) if depth == 0 => row.fields.push((name, None)),
                    Some(_) => {}
                    None if name == row_tag => rows.push(XmlRow::default()),
                    None => {}
                }
            }
            Event::Text(t) => {
                if let (1, Some((_, text))) = (depth, column.as_mut()) {
                    text.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let (1, Some((_, text))) = (depth, column.as_mut()) {
                    text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::End(_) => match current.take() {
                Some(row) if depth == 0 => rows.push(row),
                Some(mut row) => {
                    if depth == 1 {
                        if let Some((name, text)) = column.take() {
                            let value = (!text.is_empty()).then_some(text);
                            row.fields.push((name, value));
                        }
                    }
                    depth -= 1;
                    current = Some(row);
                }
                None => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rows)
}

fn local_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).into_owned()
}

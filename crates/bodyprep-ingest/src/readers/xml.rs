//! XML reading.
//!
//! The root element's children are records and each record's children are
//! fields, so
//!
//! ```xml
//! <people>
//!   <person><height>65</height><weight>140</weight></person>
//! </people>
//! ```
//!
//! yields one row with `height` and `weight` columns. Deeper nesting is
//! ignored, as is any text that is not directly inside a field.

use std::fs;
use std::path::Path;

use polars::prelude::DataFrame;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{IngestError, Result};
use crate::records::{Record, records_to_frame};

const ROOT_DEPTH: usize = 1;
const RECORD_DEPTH: usize = 2;
const FIELD_DEPTH: usize = 3;

/// Reads an XML file into a DataFrame.
pub fn read_xml(path: &Path) -> Result<DataFrame> {
    let text = fs::read_to_string(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let records = parse_records(&text).map_err(|message| IngestError::XmlParse {
        path: path.to_path_buf(),
        message,
    })?;

    records_to_frame(&records)
}

/// Field being collected: tag name, text so far, and whether a child
/// element has started (text after it is not part of the value).
struct OpenField {
    tag: String,
    text: String,
    closed: bool,
}

fn parse_records(text: &str) -> std::result::Result<Vec<Record>, String> {
    let mut reader = Reader::from_str(text);
    let mut depth = 0usize;
    let mut roots = 0usize;
    let mut records: Vec<Record> = Vec::new();
    let mut record: Option<Record> = None;
    let mut field: Option<OpenField> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("at byte {}: {e}", reader.error_position()))?;

        match event {
            Event::Start(start) => {
                depth += 1;
                match depth {
                    ROOT_DEPTH => roots += 1,
                    RECORD_DEPTH => record = Some(Vec::new()),
                    FIELD_DEPTH => {
                        field = Some(OpenField {
                            tag: element_name(start.name().as_ref()),
                            text: String::new(),
                            closed: false,
                        });
                    }
                    _ => {
                        if let Some(open) = field.as_mut() {
                            open.closed = true;
                        }
                    }
                }
            }
            Event::Empty(empty) => match depth + 1 {
                ROOT_DEPTH => roots += 1,
                RECORD_DEPTH => records.push(Vec::new()),
                FIELD_DEPTH => {
                    if let Some(current) = record.as_mut() {
                        current.push((element_name(empty.name().as_ref()), None));
                    }
                }
                _ => {
                    if let Some(open) = field.as_mut() {
                        open.closed = true;
                    }
                }
            },
            Event::End(_) => {
                match depth {
                    RECORD_DEPTH => {
                        if let Some(done) = record.take() {
                            records.push(done);
                        }
                    }
                    FIELD_DEPTH => {
                        if let (Some(current), Some(open)) = (record.as_mut(), field.take()) {
                            let value = open.text.trim();
                            let cell = (!value.is_empty()).then(|| value.to_string());
                            current.push((open.tag, cell));
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Text(content) => {
                if depth == FIELD_DEPTH {
                    push_text(&mut field, &String::from_utf8_lossy(&content));
                }
            }
            Event::CData(content) => {
                if depth == FIELD_DEPTH {
                    push_text(&mut field, &String::from_utf8_lossy(&content));
                }
            }
            Event::GeneralRef(reference) => {
                if depth == FIELD_DEPTH {
                    let name = String::from_utf8_lossy(&reference);
                    let resolved = resolve_reference(&name)
                        .ok_or_else(|| format!("unknown entity '&{name};'"))?;
                    push_text(&mut field, &resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }

        if roots > 1 {
            return Err("document has more than one root element".to_string());
        }
    }

    if depth != 0 {
        return Err("unexpected end of document inside an element".to_string());
    }
    if roots == 0 {
        return Err("document has no root element".to_string());
    }

    Ok(records)
}

fn push_text(field: &mut Option<OpenField>, text: &str) {
    if let Some(open) = field.as_mut().filter(|open| !open.closed) {
        open.text.push_str(text);
    }
}

fn element_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

/// Resolves `&name;` for the predefined entities and numeric references.
fn resolve_reference(name: &str) -> Option<String> {
    if let Some(code) = name.strip_prefix('#') {
        let value = match code.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        return value.and_then(char::from_u32).map(String::from);
    }
    quick_xml::escape::resolve_predefined_entity(name).map(str::to_string)
}

//! Format decoders.
//!
//! Every decoder turns a byte stream into a [`serde_json::Value`] tree. The
//! loader lays that tree over the target's current state, so decoders never
//! see the target type. JSON and TOML are typed already. INI and XML leaves
//! stay strings; the loader converts them through [`crate::lenient`] so the
//! target's field types decide what `12345` or `true` means.

use std::io::{BufRead, Read};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

use crate::error::EtcfigError;
use crate::types::Format;

/// Decode `reader` as `format`. `path` is only used for error reporting.
pub fn decode<R: BufRead>(format: Format, path: &Path, reader: R) -> Result<Value, EtcfigError> {
    match format {
        Format::Json => decode_json(path, reader),
        Format::Xml => decode_xml(path, reader),
        Format::Ini => decode_ini(path, reader),
        Format::Toml => decode_toml(path, reader),
    }
}

fn decode_json<R: BufRead>(path: &Path, reader: R) -> Result<Value, EtcfigError> {
    serde_json::from_reader(reader).map_err(|e| EtcfigError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

fn decode_toml<R: BufRead>(path: &Path, mut reader: R) -> Result<Value, EtcfigError> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|e| EtcfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
    toml::from_str(&content).map_err(|e| EtcfigError::Toml {
        path: path.to_path_buf(),
        source: e,
    })
}

// -- INI -------------------------------------------------------------------

/// Keys before the first section are top level. `[a.b]` nests as `a` → `b`.
/// A name used both as a key and as a section (`a = 1` with `[a]`) is a
/// [`EtcfigError::KeyConflict`].
fn decode_ini<R: BufRead>(path: &Path, mut reader: R) -> Result<Value, EtcfigError> {
    let ini = ini::Ini::read_from(&mut reader).map_err(|e| EtcfigError::Ini {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut root = Map::new();
    for (section, props) in ini.iter() {
        let prefix: Vec<&str> = match section {
            Some(name) => name.split('.').filter(|s| !s.is_empty()).collect(),
            None => Vec::new(),
        };
        for (key, value) in props.iter() {
            let mut segments = prefix.clone();
            segments.push(key);
            insert_nested(&mut root, &segments, Value::String(value.to_string())).map_err(|key| {
                EtcfigError::KeyConflict {
                    path: path.to_path_buf(),
                    key,
                }
            })?;
        }
    }
    Ok(Value::Object(root))
}

/// On a clash, returns the dotted key that is both a leaf and a table.
fn insert_nested(map: &mut Map<String, Value>, segments: &[&str], value: Value) -> Result<(), String> {
    insert_at(map, segments, 0, value)
}

fn insert_at(map: &mut Map<String, Value>, segments: &[&str], depth: usize, value: Value) -> Result<(), String> {
    let key = segments[depth];
    let clash = || segments[..=depth].join(".");

    if depth + 1 == segments.len() {
        if matches!(map.get(key), Some(Value::Object(_))) {
            return Err(clash());
        }
        map.insert(key.to_string(), value);
        return Ok(());
    }

    match map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()))
    {
        Value::Object(sub) => insert_at(sub, segments, depth + 1, value),
        _ => Err(clash()),
    }
}

// -- XML -------------------------------------------------------------------

/// An element whose end tag has not been seen yet.
struct Frame {
    name: String,
    children: Map<String, Value>,
    text: String,
}

/// The root element is unwrapped: `<config><port>80</port></config>` decodes
/// to `{"port": "80"}`. Attributes become keys alongside child elements, and a
/// repeated child name collects into an array. A child seen once stays a
/// single value; the loader widens it to a list when the target wants one.
fn decode_xml<R: BufRead>(path: &Path, reader: R) -> Result<Value, EtcfigError> {
    let xml_err = |reason: String| EtcfigError::Xml {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = quick_xml::Reader::from_reader(reader);
    let mut buf = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| xml_err(e.to_string()))?
        {
            Event::Start(start) => {
                stack.push(open_frame(&start).map_err(xml_err)?);
            }
            Event::Empty(start) => {
                let frame = open_frame(&start).map_err(xml_err)?;
                close_frame(&mut stack, &mut root, frame);
            }
            Event::End(_) => {
                // quick-xml already rejects mismatched end tags.
                if let Some(frame) = stack.pop() {
                    close_frame(&mut stack, &mut root, frame);
                }
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    let unescaped = text.unescape().map_err(|e| xml_err(e.to_string()))?;
                    frame.text.push_str(&unescaped);
                }
            }
            Event::CData(cdata) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(xml_err(format!("unexpected end of document inside <{}>", open.name)));
    }
    root.ok_or_else(|| xml_err("document has no root element".to_string()))
}

fn open_frame(start: &BytesStart<'_>) -> Result<Frame, String> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut children = Map::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        if attr.key.as_ref().starts_with(b"xmlns") {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|e| e.to_string())?;
        children.insert(key, Value::String(value.into_owned()));
    }
    Ok(Frame {
        name,
        children,
        text: String::new(),
    })
}

fn close_frame(stack: &mut [Frame], root: &mut Option<Value>, frame: Frame) {
    let name = frame.name.clone();
    let value = frame_value(frame);
    match stack.last_mut() {
        Some(parent) => push_child(&mut parent.children, name, value),
        None => {
            if root.is_none() {
                *root = Some(value);
            }
        }
    }
}

fn frame_value(frame: Frame) -> Value {
    let text = frame.text.trim();
    if frame.children.is_empty() {
        return Value::String(text.to_string());
    }
    let mut children = frame.children;
    if !text.is_empty() {
        children.insert("$text".to_string(), Value::String(text.to_string()));
    }
    Value::Object(children)
}

fn push_child(children: &mut Map<String, Value>, name: String, value: Value) {
    match children.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            children.insert(name, value);
        }
    }
}

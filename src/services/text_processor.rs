// Text Processing Service
// Normalizes submitted paper content into the single string that gets scanned

use serde_json::{Number, Value};

/// Paper content as submitted: either plain text or a set of named fields
/// (title, abstract, body, ...) kept in submission order.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentInput {
    RawText(String),
    KeyedFields(Vec<(String, String)>),
}

impl ContentInput {
    /// Build from an arbitrary JSON value. Objects become keyed fields in key order,
    /// anything else is stringified as a whole.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::KeyedFields(
                map.iter()
                    .map(|(k, v)| (k.clone(), value_to_text(v)))
                    .collect(),
            ),
            other => Self::RawText(value_to_text(other)),
        }
    }

    /// The text that gets scanned. Keyed fields are joined with single spaces.
    pub fn to_text(&self) -> String {
        match self {
            Self::RawText(text) => text.clone(),
            Self::KeyedFields(fields) => fields
                .iter()
                .map(|(_, v)| v.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl From<&str> for ContentInput {
    fn from(text: &str) -> Self {
        Self::RawText(text.to_string())
    }
}

impl From<String> for ContentInput {
    fn from(text: String) -> Self {
        Self::RawText(text)
    }
}

/// Field value as scanned text. Strings are taken verbatim; other values use their
/// printed form (`None`, `True`, `[1, 2]`, `{'k': 'v'}`), which the patterns see.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => render_value(other),
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => render_number(n),
        Value::String(s) => quote_string(s),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Object(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", quote_string(k), render_value(v)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
    }
}

fn render_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) => render_float(f),
        None => n.to_string(),
    }
}

/// Shortest round-trip float text; scientific outside [1e-4, 1e16) with a signed,
/// two-digit exponent (`1e+16`, `1.5e-05`).
fn render_float(f: f64) -> String {
    let abs = f.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let sci = format!("{:e}", f);
        let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
        let (sign, digits) = match exp.strip_prefix('-') {
            Some(d) => ('-', d),
            None => ('+', exp),
        };
        return format!("{}e{}{:0>2}", mantissa, sign, digits);
    }
    let plain = f.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{}.0", plain)
    }
}

/// Quoted string as it appears inside a printed list or dict: single quotes unless
/// the text holds a single quote and no double quote.
fn quote_string(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Character count, not byte length.
pub fn char_length(text: &str) -> usize {
    text.chars().count()
}

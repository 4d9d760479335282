use std::io;

use serde::{Serialize, ser::Error as _};
use serde_json::{Map, Serializer, Value, ser::Formatter};

/// Rewrites a JSON text into one canonical form.
pub trait JsonCanonicalizer {
    fn canonicalize(&self, text: &str) -> serde_json::Result<String>;
}

/// Compact output: no added whitespace, `&`, `<` and `>` left as-is, no
/// trailing newline. Object keys come out sorted, duplicate keys keep their
/// last value and every number is written as a double, so `1`, `1.0` and
/// `1e0` all become `1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompactJson;

impl JsonCanonicalizer for CompactJson {
    fn canonicalize(&self, text: &str) -> serde_json::Result<String> {
        // The body has to be an object; `null` decodes to an empty one.
        let document: Option<Map<String, Value>> = serde_json::from_str(text)?;
        let document = document.unwrap_or_default();

        let mut out = Vec::with_capacity(text.len());
        let mut ser = Serializer::with_formatter(&mut out, DoubleFormatter);
        document.serialize(&mut ser)?;
        String::from_utf8(out).map_err(serde_json::Error::custom)
    }
}

/// Compact formatter writing numbers as doubles and escaping the JavaScript
/// line separators U+2028 and U+2029.
struct DoubleFormatter;

impl Formatter for DoubleFormatter {
    fn write_i64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: i64) -> io::Result<()> {
        self.write_f64(writer, value as f64)
    }

    fn write_u64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: u64) -> io::Result<()> {
        self.write_f64(writer, value as f64)
    }

    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        writer.write_all(double_text(value).as_bytes())
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut rest = fragment;
        while let Some(at) = rest.find(['\u{2028}', '\u{2029}']) {
            writer.write_all(rest[..at].as_bytes())?;
            let separator = &rest[at..at + 3];
            let code = separator.chars().next().map_or(0, u32::from);
            write!(writer, "\\u{code:04x}")?;
            rest = &rest[at + separator.len()..];
        }
        writer.write_all(rest.as_bytes())
    }
}

/// Shortest round-trip text of `value`. Plain notation for magnitudes in
/// `[1e-6, 1e21)`, exponent notation (`1e+21`, `1e-7`) outside it.
fn double_text(value: f64) -> String {
    let abs = value.abs();
    if abs != 0.0 && !(1e-6..1e21).contains(&abs) {
        let text = format!("{value:e}");
        match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        }
    } else {
        format!("{value}")
    }
}

pub fn canonicalize_json(text: &str) -> serde_json::Result<String> {
    CompactJson.canonicalize(text)
}

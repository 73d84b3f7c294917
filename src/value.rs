use std::io::{self, Write};

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A renderable value in the wire format.
///
/// `DirectoryEntry` and `ListingError` build a `Value` tree only to hand it
/// to [`render`]. Strings are raw bytes: file
/// names on Unix are not guaranteed to be UTF-8 and are written through
/// unvalidated.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(Vec<u8>),
    /// Ordered key → value pairs. Keys render in insertion order.
    Map(Vec<(&'static str, Value)>),
    Seq(Vec<Value>),
}

impl Value {
    /// Build a string value from anything byte-like.
    pub fn str(s: impl AsRef<[u8]>) -> Self {
        Value::Str(s.as_ref().to_vec())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render `value` into `out`.
///
/// Maps are `{"key": value, ...}` and sequences `[value, ...]`, with `": "`
/// and `", "` as separators and no trailing newline.
pub fn render<W: Write>(value: &Value, out: &mut W) -> io::Result<()> {
    match value {
        Value::Null     => out.write_all(b"null"),
        Value::Bool(b)  => out.write_all(if *b { &b"true"[..] } else { &b"false"[..] }),
        Value::Int(n)   => write!(out, "{n}"),
        Value::UInt(n)  => write!(out, "{n}"),
        Value::Float(f) => out.write_all(format_float(*f).as_bytes()),
        Value::Str(s)   => write_string(s, out),
        Value::Map(pairs) => {
            out.write_all(b"{")?;
            for (i, (key, v)) in pairs.iter().enumerate() {
                if i > 0 {
                    out.write_all(b", ")?;
                }
                write_string(key.as_bytes(), out)?;
                out.write_all(b": ")?;
                render(v, out)?;
            }
            out.write_all(b"}")
        }
        Value::Seq(items) => {
            out.write_all(b"[")?;
            for (i, v) in items.iter().enumerate() {
                if i > 0 {
                    out.write_all(b", ")?;
                }
                render(v, out)?;
            }
            out.write_all(b"]")
        }
    }
}

/// Render `value` into a fresh buffer.
pub fn to_bytes(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = render(value, &mut buf);
    buf
}

/// Backslash-escape the eight reserved bytes and quote.
///
/// Forward slash is one of them. Everything else, including non-ASCII and
/// other control bytes, is copied as is.
fn write_string<W: Write>(s: &[u8], out: &mut W) -> io::Result<()> {
    out.write_all(b"\"")?;
    let mut start = 0;
    for (i, &b) in s.iter().enumerate() {
        if needs_escape(b) {
            out.write_all(&s[start..i])?;
            out.write_all(&[b'\\', b])?;
            start = i + 1;
        }
    }
    out.write_all(&s[start..])?;
    out.write_all(b"\"")
}

fn needs_escape(b: u8) -> bool {
    matches!(b, 0x08 | b'\t' | b'\n' | 0x0c | b'\r' | b'"' | b'/' | b'\\')
}

/// Shortest round-trip decimal, always with a fractional part.
fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".into();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf".into() } else { "-inf".into() };
    }
    let mut s = f.to_string();
    if !s.contains('.') {
        s.push_str(".0");
    }
    s
}

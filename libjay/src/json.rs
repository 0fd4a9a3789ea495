//! Streaming JSON reader and writer.
//!
//! The reader is a recursive-descent parser that pushes typed events
//! into a [`JsonSink`] as it goes, so no document tree is ever built.
//! The writer is the mirror image: it accepts the same event calls and
//! produces compact JSON, tracking separator placement with its own
//! frame stack.

use std::io::Write;

use crate::error::{Error, Result};

/// Recursion guard for the reader. Inputs nested deeper than this are
/// rejected as malformed rather than overflowing the stack.
const MAX_DEPTH: usize = 512;

/// Visitor for a JSON event stream.
///
/// The reader calls these in document order: container starts and ends
/// bracket their children, `key` precedes the value it names. Any error
/// a sink returns aborts the parse immediately.
pub trait JsonSink {
    fn null(&mut self) -> Result<()>;
    fn bool(&mut self, value: bool) -> Result<()>;
    fn int(&mut self, value: i64) -> Result<()>;
    fn uint(&mut self, value: u64) -> Result<()>;
    fn float(&mut self, value: f64) -> Result<()>;
    fn string(&mut self, value: &str) -> Result<()>;
    fn key(&mut self, name: &str) -> Result<()>;
    fn begin_object(&mut self) -> Result<()>;
    fn end_object(&mut self) -> Result<()>;
    fn begin_array(&mut self) -> Result<()>;
    fn end_array(&mut self) -> Result<()>;
}

/// Parse one JSON document, pushing events into the sink.
///
/// The whole input must be a single value plus optional surrounding
/// whitespace; trailing content is an error.
pub fn read_json(input: &str, sink: &mut impl JsonSink) -> Result<()> {
    let mut reader = Reader {
        input,
        pos: 0,
        depth: 0,
    };
    reader.skip_whitespace();
    reader.parse_value(sink)?;
    reader.skip_whitespace();
    if reader.pos < input.len() {
        return Err(reader.error("unexpected content after value"));
    }
    Ok(())
}

struct Reader<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Reader<'a> {
    fn error(&self, message: &str) -> Error {
        Error::Json {
            offset: self.pos,
            message: message.to_string(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.bump();
        }
    }

    fn expect_literal(&mut self, literal: &str) -> Result<()> {
        if self.input[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", literal)))
        }
    }

    fn parse_value(&mut self, sink: &mut impl JsonSink) -> Result<()> {
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some(b'n') => {
                self.expect_literal("null")?;
                sink.null()
            }
            Some(b't') => {
                self.expect_literal("true")?;
                sink.bool(true)
            }
            Some(b'f') => {
                self.expect_literal("false")?;
                sink.bool(false)
            }
            Some(b'"') => {
                let s = self.parse_string()?;
                sink.string(&s)
            }
            Some(b'[') => self.parse_array(sink),
            Some(b'{') => self.parse_object(sink),
            Some(b'-' | b'0'..=b'9') => self.parse_number(sink),
            Some(c) => Err(self.error(&format!("unexpected character '{}'", c as char))),
        }
    }

    fn parse_array(&mut self, sink: &mut impl JsonSink) -> Result<()> {
        self.enter()?;
        self.bump(); // '['
        sink.begin_array()?;
        self.skip_whitespace();

        if self.peek() == Some(b']') {
            self.bump();
            self.leave();
            return sink.end_array();
        }

        loop {
            self.parse_value(sink)?;
            self.skip_whitespace();
            match self.peek() {
                Some(b']') => {
                    self.bump();
                    self.leave();
                    return sink.end_array();
                }
                Some(b',') => {
                    self.bump();
                    self.skip_whitespace();
                }
                _ => return Err(self.error("expected ',' or ']'")),
            }
        }
    }

    fn parse_object(&mut self, sink: &mut impl JsonSink) -> Result<()> {
        self.enter()?;
        self.bump(); // '{'
        sink.begin_object()?;
        self.skip_whitespace();

        if self.peek() == Some(b'}') {
            self.bump();
            self.leave();
            return sink.end_object();
        }

        loop {
            if self.peek() != Some(b'"') {
                return Err(self.error("expected string key"));
            }
            let key = self.parse_string()?;
            sink.key(&key)?;

            self.skip_whitespace();
            if self.peek() != Some(b':') {
                return Err(self.error("expected ':'"));
            }
            self.bump();
            self.skip_whitespace();

            self.parse_value(sink)?;
            self.skip_whitespace();
            match self.peek() {
                Some(b'}') => {
                    self.bump();
                    self.leave();
                    return sink.end_object();
                }
                Some(b',') => {
                    self.bump();
                    self.skip_whitespace();
                }
                _ => return Err(self.error("expected ',' or '}'")),
            }
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_string(&mut self) -> Result<String> {
        self.bump(); // opening quote
        let mut result = String::new();

        loop {
            match self.input[self.pos..].chars().next() {
                None => return Err(self.error("unterminated string")),
                Some('"') => {
                    self.bump();
                    return Ok(result);
                }
                Some('\\') => {
                    self.bump();
                    self.parse_escape(&mut result)?;
                }
                Some(c) if (c as u32) < 0x20 => {
                    return Err(self.error("control character in string"));
                }
                Some(c) => {
                    result.push(c);
                    self.pos += c.len_utf8();
                }
            }
        }
    }

    fn parse_escape(&mut self, result: &mut String) -> Result<()> {
        let c = match self.peek() {
            None => return Err(self.error("unterminated escape sequence")),
            Some(c) => c,
        };
        self.bump();
        match c {
            b'"' => result.push('"'),
            b'\\' => result.push('\\'),
            b'/' => result.push('/'),
            b'b' => result.push('\x08'),
            b'f' => result.push('\x0c'),
            b'n' => result.push('\n'),
            b'r' => result.push('\r'),
            b't' => result.push('\t'),
            b'u' => {
                let unit = self.parse_hex_unit()?;
                if (0xD800..0xDC00).contains(&unit) {
                    // High surrogate: a low surrogate escape must follow.
                    if self.peek() != Some(b'\\') {
                        return Err(self.error("unpaired surrogate"));
                    }
                    self.bump();
                    if self.peek() != Some(b'u') {
                        return Err(self.error("unpaired surrogate"));
                    }
                    self.bump();
                    let low = self.parse_hex_unit()?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(self.error("unpaired surrogate"));
                    }
                    let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    match char::from_u32(code) {
                        Some(c) => result.push(c),
                        None => return Err(self.error("invalid unicode code point")),
                    }
                } else {
                    match char::from_u32(unit) {
                        Some(c) => result.push(c),
                        None => return Err(self.error("unpaired surrogate")),
                    }
                }
            }
            c => return Err(self.error(&format!("invalid escape '\\{}'", c as char))),
        }
        Ok(())
    }

    fn parse_hex_unit(&mut self) -> Result<u32> {
        let mut code = 0u32;
        for _ in 0..4 {
            let d = match self.peek().and_then(|b| (b as char).to_digit(16)) {
                Some(d) => d,
                None => return Err(self.error("invalid unicode escape")),
            };
            code = code * 16 + d;
            self.bump();
        }
        Ok(code)
    }

    fn parse_number(&mut self, sink: &mut impl JsonSink) -> Result<()> {
        let start = self.pos;

        if self.peek() == Some(b'-') {
            self.bump();
        }

        // Integer part: a single zero, or a nonzero digit run.
        match self.peek() {
            Some(b'0') => self.bump(),
            Some(b'1'..=b'9') => {
                while let Some(b'0'..=b'9') = self.peek() {
                    self.bump();
                }
            }
            _ => return Err(self.error("invalid number")),
        }

        let mut is_float = false;
        if self.peek() == Some(b'.') {
            is_float = true;
            self.bump();
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.error("invalid number"));
            }
            while let Some(b'0'..=b'9') = self.peek() {
                self.bump();
            }
        }

        if let Some(b'e' | b'E') = self.peek() {
            is_float = true;
            self.bump();
            if let Some(b'+' | b'-') = self.peek() {
                self.bump();
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.error("invalid number"));
            }
            while let Some(b'0'..=b'9') = self.peek() {
                self.bump();
            }
        }

        let text = &self.input[start..self.pos];

        // A dotless, exponentless number is an integer while it fits
        // i64, then u64; only past u64::MAX (or below i64::MIN) does it
        // degrade to a float.
        if !is_float {
            if let Ok(i) = text.parse::<i64>() {
                return sink.int(i);
            }
            if let Ok(u) = text.parse::<u64>() {
                return sink.uint(u);
            }
        }

        let f: f64 = text
            .parse()
            .map_err(|_| self.error("invalid number"))?;
        if f.is_infinite() {
            return Err(self.error("number out of range"));
        }
        sink.float(f)
    }
}

/// Streaming compact-JSON writer.
///
/// Separator placement is derived from a per-container value count, so
/// callers just replay events in document order.
pub struct JsonWriter<W: Write> {
    out: W,
    counts: Vec<usize>,
    after_key: bool,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            counts: Vec::new(),
            after_key: false,
        }
    }

    pub fn null(&mut self) -> Result<()> {
        self.separate_value()?;
        self.out.write_all(b"null")?;
        Ok(())
    }

    pub fn bool(&mut self, value: bool) -> Result<()> {
        self.separate_value()?;
        self.out
            .write_all(if value { b"true" } else { b"false" })?;
        Ok(())
    }

    pub fn int(&mut self, value: i64) -> Result<()> {
        self.separate_value()?;
        write!(self.out, "{}", value)?;
        Ok(())
    }

    /// Write a finite float. Integral values are written with a forced
    /// `.0` so the number reads back as a float, not an integer.
    pub fn float(&mut self, value: f64) -> Result<()> {
        self.separate_value()?;
        self.out.write_all(format_float(value).as_bytes())?;
        Ok(())
    }

    pub fn string(&mut self, value: &str) -> Result<()> {
        self.separate_value()?;
        self.write_escaped(value)
    }

    pub fn key(&mut self, name: &str) -> Result<()> {
        if let Some(count) = self.counts.last_mut() {
            if *count > 0 {
                self.out.write_all(b",")?;
            }
            *count += 1;
        }
        self.write_escaped(name)?;
        self.out.write_all(b":")?;
        self.after_key = true;
        Ok(())
    }

    pub fn begin_object(&mut self) -> Result<()> {
        self.separate_value()?;
        self.out.write_all(b"{")?;
        self.counts.push(0);
        Ok(())
    }

    pub fn end_object(&mut self) -> Result<()> {
        self.close(b"}")
    }

    pub fn begin_array(&mut self) -> Result<()> {
        self.separate_value()?;
        self.out.write_all(b"[")?;
        self.counts.push(0);
        Ok(())
    }

    pub fn end_array(&mut self) -> Result<()> {
        self.close(b"]")
    }

    fn close(&mut self, bracket: &[u8]) -> Result<()> {
        if self.counts.pop().is_none() {
            return Err(Error::Internal("container end without matching start"));
        }
        self.out.write_all(bracket)?;
        Ok(())
    }

    /// Comma before a value at any container position past the first.
    /// A value directly after a key already has its ':' separator.
    fn separate_value(&mut self) -> Result<()> {
        if self.after_key {
            self.after_key = false;
            return Ok(());
        }
        if let Some(count) = self.counts.last_mut() {
            if *count > 0 {
                self.out.write_all(b",")?;
            }
            *count += 1;
        }
        Ok(())
    }

    fn write_escaped(&mut self, value: &str) -> Result<()> {
        self.out.write_all(b"\"")?;
        for c in value.chars() {
            match c {
                '"' => self.out.write_all(b"\\\"")?,
                '\\' => self.out.write_all(b"\\\\")?,
                '\n' => self.out.write_all(b"\\n")?,
                '\r' => self.out.write_all(b"\\r")?,
                '\t' => self.out.write_all(b"\\t")?,
                '\x08' => self.out.write_all(b"\\b")?,
                '\x0c' => self.out.write_all(b"\\f")?,
                c if (c as u32) < 0x20 => write!(self.out, "\\u{:04x}", c as u32)?,
                c => write!(self.out, "{}", c)?,
            }
        }
        self.out.write_all(b"\"")?;
        Ok(())
    }
}

/// Shortest decimal text for a finite float, with a forced `.0` when the
/// value is integral. `5.0` must not come back as the integer `5`.
pub fn format_float(value: f64) -> String {
    let s = format!("{}", value);
    if s.contains(['.', 'e', 'E']) {
        s
    } else {
        format!("{}.0", s)
    }
}

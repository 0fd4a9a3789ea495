//! Streaming block-style YAML emitter.
//!
//! Accepts the same event calls the JSON reader produces and writes
//! indentation-based YAML as the events arrive, one line per node:
//! `key: value` entries, `- ` sequence items, nested containers on the
//! following lines one indent level deeper, and flow `{}`/`[]` for
//! containers that turn out to be empty.
//!
//! Scalar typing survives through styles: [`YamlEmitter::plain`] writes
//! a token verbatim (null, booleans, numbers), [`YamlEmitter::string`]
//! and [`YamlEmitter::key`] always quote. Quoting every string is the
//! deliberate conservative policy: a quoted scalar can never be re-read
//! as a non-string.

use std::io::Write;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Sequence,
    Mapping,
}

/// One open container. `line_open` means the parent's line (a `key:` or
/// a lone `-`) still waits for either a newline before the first child
/// or a flow `{}`/`[]` if no child ever comes.
#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    indent: usize,
    empty: bool,
    line_open: bool,
    after_key: bool,
}

/// Event-driven writer for one YAML document.
pub struct YamlEmitter<W: Write> {
    out: W,
    frames: Vec<Frame>,
}

impl<W: Write> YamlEmitter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            frames: Vec::new(),
        }
    }

    /// Write a mapping key, always quoted, followed by `:`.
    pub fn key(&mut self, name: &str) -> Result<()> {
        match self.frames.last() {
            Some(frame) if frame.kind == FrameKind::Mapping && !frame.after_key => {}
            _ => return Err(Error::Internal("key outside of mapping")),
        }
        self.open_line()?;
        let indent = self.frames.last().map_or(0, |f| f.indent);
        self.write_indent(indent)?;
        self.write_quoted(name)?;
        self.out.write_all(b":")?;
        if let Some(frame) = self.frames.last_mut() {
            frame.after_key = true;
        }
        Ok(())
    }

    /// Write a scalar token verbatim: `~`, `true`, numbers.
    pub fn plain(&mut self, token: &str) -> Result<()> {
        self.scalar_lead_in()?;
        self.out.write_all(token.as_bytes())?;
        self.finish_scalar_line()
    }

    /// Write a string value in a quoted style.
    pub fn string(&mut self, value: &str) -> Result<()> {
        self.scalar_lead_in()?;
        self.write_quoted(value)?;
        self.finish_scalar_line()
    }

    pub fn begin_mapping(&mut self) -> Result<()> {
        self.begin_container(FrameKind::Mapping)
    }

    pub fn end_mapping(&mut self) -> Result<()> {
        self.end_container(FrameKind::Mapping, b"{}")
    }

    pub fn begin_sequence(&mut self) -> Result<()> {
        self.begin_container(FrameKind::Sequence)
    }

    pub fn end_sequence(&mut self) -> Result<()> {
        self.end_container(FrameKind::Sequence, b"[]")
    }

    fn begin_container(&mut self, kind: FrameKind) -> Result<()> {
        let parent = self.frames.last().map(|f| (f.kind, f.indent, f.after_key));
        let (indent, line_open) = match parent {
            None => (0, false),
            Some((FrameKind::Mapping, parent_indent, after_key)) => {
                if !after_key {
                    return Err(Error::Internal("container in key position"));
                }
                if let Some(frame) = self.frames.last_mut() {
                    frame.after_key = false;
                }
                (parent_indent + 1, true)
            }
            Some((FrameKind::Sequence, parent_indent, _)) => {
                // Sequence item: the dash line stays open for the child.
                self.open_line()?;
                self.write_indent(parent_indent)?;
                self.out.write_all(b"-")?;
                (parent_indent + 1, true)
            }
        };
        self.frames.push(Frame {
            kind,
            indent,
            empty: true,
            line_open,
            after_key: false,
        });
        Ok(())
    }

    fn end_container(&mut self, kind: FrameKind, flow: &[u8]) -> Result<()> {
        let frame = match self.frames.pop() {
            Some(frame) if frame.kind == kind => frame,
            _ => return Err(Error::Internal("container end without matching start")),
        };
        if frame.empty {
            if frame.line_open {
                self.out.write_all(b" ")?;
            }
            self.out.write_all(flow)?;
            self.out.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Lead-in for a scalar in value position: a space after `key:`, a
    /// fresh `- ` line in a sequence, nothing at the document root.
    fn scalar_lead_in(&mut self) -> Result<()> {
        let parent = self.frames.last().map(|f| (f.kind, f.indent, f.after_key));
        match parent {
            None => Ok(()),
            Some((FrameKind::Mapping, _, after_key)) => {
                if !after_key {
                    return Err(Error::Internal("scalar value in key position"));
                }
                if let Some(frame) = self.frames.last_mut() {
                    frame.after_key = false;
                }
                self.out.write_all(b" ")?;
                Ok(())
            }
            Some((FrameKind::Sequence, indent, _)) => {
                self.open_line()?;
                self.write_indent(indent)?;
                self.out.write_all(b"- ")?;
                Ok(())
            }
        }
    }

    fn finish_scalar_line(&mut self) -> Result<()> {
        self.out.write_all(b"\n")?;
        Ok(())
    }

    /// First-child bookkeeping: terminate the parent's open line and mark
    /// the container nonempty.
    fn open_line(&mut self) -> Result<()> {
        if let Some(frame) = self.frames.last_mut() {
            if frame.empty {
                frame.empty = false;
                if frame.line_open {
                    self.out.write_all(b"\n")?;
                }
            }
        }
        Ok(())
    }

    fn write_indent(&mut self, indent: usize) -> Result<()> {
        for _ in 0..indent {
            self.out.write_all(b"  ")?;
        }
        Ok(())
    }

    /// Single-quoted when the text is printable (embedded quotes double),
    /// double-quoted with escapes when it carries control characters.
    fn write_quoted(&mut self, value: &str) -> Result<()> {
        if value.chars().any(|c| c.is_control()) {
            self.write_double_quoted(value)
        } else {
            self.out.write_all(b"'")?;
            for c in value.chars() {
                if c == '\'' {
                    self.out.write_all(b"''")?;
                } else {
                    write!(self.out, "{}", c)?;
                }
            }
            self.out.write_all(b"'")?;
            Ok(())
        }
    }

    fn write_double_quoted(&mut self, value: &str) -> Result<()> {
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
                '\0' => self.out.write_all(b"\\0")?,
                c if c.is_control() => write!(self.out, "\\u{:04x}", c as u32)?,
                c => write!(self.out, "{}", c)?,
            }
        }
        self.out.write_all(b"\"")?;
        Ok(())
    }
}

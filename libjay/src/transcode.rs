//! The two conversion drivers.
//!
//! Both directions are single-pass pipes: an event source on one side,
//! a write sink on the other, and the scalar type-resolution rules in
//! between. Neither direction materializes a document tree.

use std::io::Write;

use saphyr_parser::{Event, EventReceiver, Parser, TScalarStyle};

use crate::context::{ContextStack, Role};
use crate::error::{Error, Result};
use crate::json::{format_float, read_json, JsonSink, JsonWriter};
use crate::scalar::{classify, Scalar};
use crate::yaml::YamlEmitter;

/// Convert one JSON document to block-style YAML.
///
/// JSON's strict typing survives re-parsing: every string and key is
/// quoted, and integral floats are written with a trailing `.0` so `5.0`
/// cannot be re-read as the integer `5`.
pub fn json_to_yaml<W: Write>(input: &str, out: W) -> Result<()> {
    let mut sink = YamlSink {
        emitter: YamlEmitter::new(out),
    };
    read_json(input, &mut sink)
}

/// JSON event handler that re-emits each event as YAML.
///
/// The JSON reader distinguishes keys from values syntactically, so this
/// direction needs no context automaton; the typed events are rewritten
/// one-to-one.
struct YamlSink<W: Write> {
    emitter: YamlEmitter<W>,
}

impl<W: Write> JsonSink for YamlSink<W> {
    fn null(&mut self) -> Result<()> {
        self.emitter.plain("~")
    }

    fn bool(&mut self, value: bool) -> Result<()> {
        self.emitter.plain(if value { "true" } else { "false" })
    }

    fn int(&mut self, value: i64) -> Result<()> {
        self.emitter.plain(&value.to_string())
    }

    fn uint(&mut self, value: u64) -> Result<()> {
        self.emitter.plain(&value.to_string())
    }

    fn float(&mut self, value: f64) -> Result<()> {
        self.emitter.plain(&format_float(value))
    }

    fn string(&mut self, value: &str) -> Result<()> {
        self.emitter.string(value)
    }

    fn key(&mut self, name: &str) -> Result<()> {
        self.emitter.key(name)
    }

    fn begin_object(&mut self) -> Result<()> {
        self.emitter.begin_mapping()
    }

    fn end_object(&mut self) -> Result<()> {
        self.emitter.end_mapping()
    }

    fn begin_array(&mut self) -> Result<()> {
        self.emitter.begin_sequence()
    }

    fn end_array(&mut self) -> Result<()> {
        self.emitter.end_sequence()
    }
}

/// Convert one YAML document to compact JSON.
///
/// Plain scalars in value position go through core-schema type
/// resolution; quoted scalars are the author saying "string", so they
/// bypass it. Keys are written verbatim, never type-inferred. Constructs
/// JSON cannot represent (a second document, aliases, non-scalar mapping
/// keys, NaN or infinite floats) abort the conversion.
pub fn yaml_to_json<W: Write>(input: &str, out: W) -> Result<()> {
    let mut receiver = JsonReceiver {
        writer: JsonWriter::new(out),
        stack: ContextStack::new(),
        seen_document: false,
        error: None,
    };
    let mut parser = Parser::new_from_str(input);
    let scanned = parser.load(&mut receiver, true);
    // An error recorded by the receiver came from an earlier event than
    // any scan error that may have ended the load.
    if let Some(err) = receiver.error {
        return Err(err);
    }
    scanned?;
    Ok(())
}

/// YAML event handler that re-emits each event as JSON.
///
/// The receiver interface has no error channel, so the first failure is
/// parked in `error` and every later event is dropped; nothing more is
/// written once a conversion has failed.
struct JsonReceiver<W: Write> {
    writer: JsonWriter<W>,
    stack: ContextStack,
    seen_document: bool,
    error: Option<Error>,
}

impl<W: Write> EventReceiver for JsonReceiver<W> {
    fn on_event(&mut self, event: Event) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.handle(event) {
            self.error = Some(err);
        }
    }
}

impl<W: Write> JsonReceiver<W> {
    fn handle(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Nothing | Event::StreamStart | Event::StreamEnd | Event::DocumentEnd => Ok(()),
            Event::DocumentStart => {
                if self.seen_document {
                    return Err(Error::Unsupported(
                        "Multiple documents in a stream are unsupported",
                    ));
                }
                self.seen_document = true;
                Ok(())
            }
            Event::Alias(_) => Err(Error::Unsupported("Aliases are unsupported")),
            Event::SequenceStart(..) => {
                self.reject_complex_key()?;
                self.stack.begin_sequence();
                self.writer.begin_array()
            }
            Event::SequenceEnd => {
                self.stack.end_sequence()?;
                self.writer.end_array()
            }
            Event::MappingStart(..) => {
                self.reject_complex_key()?;
                self.stack.begin_mapping();
                self.writer.begin_object()
            }
            Event::MappingEnd => {
                self.stack.end_mapping()?;
                self.writer.end_object()
            }
            Event::Scalar(text, style, _, _) => match self.stack.on_scalar() {
                Role::Key => self.writer.key(&text),
                Role::Value | Role::StandaloneValue => {
                    if style != TScalarStyle::Plain {
                        // Quoted (or block) style suppresses inference.
                        self.writer.string(&text)
                    } else {
                        write_resolved(&mut self.writer, &text)
                    }
                }
            },
        }
    }

    /// JSON object keys are strings; a container opening in a mapping's
    /// key slot (`? [1]`) has no representation.
    fn reject_complex_key(&self) -> Result<()> {
        if self.stack.expects_key() {
            return Err(Error::Unsupported("Non-scalar mapping keys are unsupported"));
        }
        Ok(())
    }
}

fn write_resolved<W: Write>(writer: &mut JsonWriter<W>, text: &str) -> Result<()> {
    match classify(text) {
        Scalar::Null => writer.null(),
        Scalar::Bool(b) => writer.bool(b),
        Scalar::Int(i) => writer.int(i),
        Scalar::Float(f) if f.is_nan() => Err(Error::Unsupported("NaN floats are not supported")),
        Scalar::Float(f) if f.is_infinite() => {
            Err(Error::Unsupported("Infinity floats are not supported"))
        }
        Scalar::Float(f) => writer.float(f),
        Scalar::Str(s) => writer.string(s),
    }
}

//! Key/value context tracking for flat event streams.
//!
//! YAML parse events deliver mapping keys and values as indistinguishable
//! scalar events. The context stack reconstructs the distinction: one
//! frame per open container, and for mappings an explicit key/value
//! alternation state that flips on every scalar consumed directly inside
//! that mapping.

use crate::error::{Error, Result};

/// What the current scalar event stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A mapping key.
    Key,
    /// A mapping value.
    Value,
    /// A sequence item or the document's root scalar.
    StandaloneValue,
}

/// Which slot of a mapping entry comes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Key,
    Value,
}

/// One frame per open container, plus a root sentinel so a top-level
/// scalar is unambiguously a standalone value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Root,
    Sequence,
    Mapping(Expect),
}

/// Stack of container frames for one in-flight document.
///
/// Pushed on container start, popped on the matching end. The input
/// parser guarantees starts and ends balance; a mismatched pop here is
/// an internal consistency error, never recovered.
#[derive(Debug)]
pub struct ContextStack {
    frames: Vec<Frame>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::Root],
        }
    }

    pub fn begin_sequence(&mut self) {
        self.fill_value_slot();
        self.frames.push(Frame::Sequence);
    }

    pub fn end_sequence(&mut self) -> Result<()> {
        match self.frames.last() {
            Some(Frame::Sequence) => {
                self.frames.pop();
                Ok(())
            }
            _ => Err(Error::Internal("sequence end without matching start")),
        }
    }

    pub fn begin_mapping(&mut self) {
        self.fill_value_slot();
        self.frames.push(Frame::Mapping(Expect::Key));
    }

    pub fn end_mapping(&mut self) -> Result<()> {
        match self.frames.last() {
            Some(Frame::Mapping(_)) => {
                self.frames.pop();
                Ok(())
            }
            _ => Err(Error::Internal("mapping end without matching start")),
        }
    }

    /// Whether the next node would land in a mapping's key slot.
    pub fn expects_key(&self) -> bool {
        matches!(self.frames.last(), Some(Frame::Mapping(Expect::Key)))
    }

    /// Role of the next scalar in the current container, advancing the
    /// key/value alternation when that container is a mapping.
    pub fn on_scalar(&mut self) -> Role {
        match *self.top() {
            Frame::Mapping(Expect::Key) => {
                *self.top() = Frame::Mapping(Expect::Value);
                Role::Key
            }
            Frame::Mapping(Expect::Value) => {
                *self.top() = Frame::Mapping(Expect::Key);
                Role::Value
            }
            Frame::Root | Frame::Sequence => Role::StandaloneValue,
        }
    }

    /// A container opening in a mapping's value slot consumes that slot,
    /// so the scalar after the container closes is read as a key again.
    fn fill_value_slot(&mut self) {
        if let Frame::Mapping(Expect::Value) = *self.top() {
            *self.top() = Frame::Mapping(Expect::Key);
        }
    }

    fn top(&mut self) -> &mut Frame {
        // The root sentinel is never popped, so the stack is never empty.
        self.frames
            .last_mut()
            .expect("context stack holds at least the root sentinel")
    }
}

impl Default for ContextStack {
    fn default() -> Self {
        Self::new()
    }
}

//! Streaming, lossless JSON/YAML transcoding.
//!
//! Both directions run as a single pass over a parse-event stream: an
//! event source on one side drives a handler that immediately re-emits
//! each event through a writer for the other format. No document tree is
//! ever built, so conversion cost is flat in nesting depth and documents
//! stream through in one pass.
//!
//! # Pipeline
//!
//! The conversion core has three layers:
//!
//! 1. **Scalar resolution**: YAML plain scalars carry no type, so
//!    [`classify`] applies the YAML core-schema rules (null and boolean
//!    literal sets, integer and float grammars) to decide what JSON type
//!    a bare token denotes. [`needs_quoting`] answers the reverse
//!    question for emission.
//!
//! 2. **Context tracking**: YAML events deliver mapping keys and values
//!    as identical scalar events; a per-container frame stack
//!    reconstructs which is which.
//!
//! 3. **Transcoders**: [`json_to_yaml`] and [`yaml_to_json`] wire an
//!    event source to the opposite writer, quoting every JSON string on
//!    the way out and honoring quoted-scalar author intent on the way
//!    in, so values round-trip with their exact types.
//!
//! Constructs JSON cannot represent are rejected rather than bent:
//! multi-document streams, aliases, non-scalar mapping keys, and NaN or
//! infinite floats all abort the conversion with [`Error::Unsupported`].

mod context;
mod error;
mod json;
mod scalar;
mod transcode;
mod yaml;

pub use error::{Error, Result};
pub use scalar::{classify, needs_quoting, Scalar};
pub use transcode::{json_to_yaml, yaml_to_json};

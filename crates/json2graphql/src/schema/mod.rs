//! Graph resolution and schema assembly.
//!
//! The resolver walks the flat declaration set lazily from the two roots,
//! materializing each referenced object type exactly once; the assembler
//! registers the resulting nodes with the engine and finishes the schema.

mod assemble;
mod resolve;

pub(crate) use assemble::assemble;

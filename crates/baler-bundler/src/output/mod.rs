//! Output emission.

pub mod writer;

pub use writer::Emitter;

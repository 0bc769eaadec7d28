//! VEVENT block rendering.

mod assembler;

pub use assembler::EventAssembler;

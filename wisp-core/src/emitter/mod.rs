//! Binary emission: byte-level output utilities, per-section payload
//! encoders, section framing and module assembly.
//!
//! The encoders are pure functions over the declaration-table records
//! the parser produced; entry order exactly mirrors declaration order
//! since export indices are positional.

pub mod exports;
pub mod globals;
pub mod module;
pub mod opcode;
pub mod output;
pub mod section;

pub use exports::encode_exports;
pub use globals::encode_globals;
pub use module::assemble;
pub use output::OutputStream;
pub use section::{SectionId, export_section, global_section, write_section};

//! Module assembly: magic number, version, then the non-empty
//! sections in id order.

use crate::ast::Program;
use crate::emitter::section::{export_section, global_section};

const MAGIC: [u8; 4] = *b"\0asm";
const VERSION: u32 = 1;

/// Assemble a parsed program into a complete wasm module.
///
/// An empty program assembles to the minimal empty module: header
/// only, no sections.
pub fn assemble(program: &Program) -> Vec<u8> {
    let mut module = Vec::new();
    module.extend_from_slice(&MAGIC);
    module.extend_from_slice(&VERSION.to_le_bytes());

    if let Some(section) = global_section(&program.globals) {
        module.extend_from_slice(section.as_slice());
    }
    if let Some(section) = export_section(&program.exports) {
        module.extend_from_slice(section.as_slice());
    }

    module
}

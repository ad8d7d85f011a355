//! Section framing: id byte + size prefix around an encoded payload.

use crate::emitter::exports::encode_exports;
use crate::emitter::globals::encode_globals;
use crate::emitter::output::OutputStream;
use crate::records::{ExportRecord, GlobalRecord};

/// Wasm section ids for the sections this emitter produces. The name
/// is diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionId {
    Global,
    Export,
}

impl SectionId {
    pub fn code(self) -> u8 {
        match self {
            SectionId::Global => 0x06,
            SectionId::Export => 0x07,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SectionId::Global => "global",
            SectionId::Export => "export",
        }
    }
}

/// Frame a payload as a section: id byte, varuint32 size, payload.
pub fn write_section(id: SectionId, payload: &OutputStream) -> OutputStream {
    let mut section = OutputStream::new();
    section.push_u8(id.code());
    section.push_varuint32(payload.len() as u32);
    section.write(payload);
    section
}

/// The framed globals section, or `None` when there are no globals.
/// Empty sections are omitted from the module, not emitted empty.
pub fn global_section(globals: &[GlobalRecord]) -> Option<OutputStream> {
    if globals.is_empty() {
        return None;
    }
    Some(write_section(SectionId::Global, &encode_globals(globals)))
}

/// The framed exports section, or `None` when there are no exports.
pub fn export_section(exports: &[ExportRecord]) -> Option<OutputStream> {
    if exports.is_empty() {
        return None;
    }
    Some(write_section(SectionId::Export, &encode_exports(exports)))
}

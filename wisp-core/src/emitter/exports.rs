//! Exports-section payload encoding.

use crate::emitter::output::OutputStream;
use crate::records::ExportRecord;

/// Encode the exports section payload: a varuint32 count followed by
/// one entry per record, in export order.
///
/// Each entry is the length-prefixed field name, the external-kind
/// byte and the varuint32 index into the corresponding index space;
/// for globals the index is positional into the globals table.
pub fn encode_exports(exports: &[ExportRecord]) -> OutputStream {
    let mut payload = OutputStream::new();
    payload.push_varuint32(exports.len() as u32);
    for export in exports {
        payload.push_str(&export.field);
        payload.push_u8(export.kind.code());
        payload.push_varuint32(export.index);
    }
    payload
}

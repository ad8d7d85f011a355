//! Globals-section payload encoding.

use crate::emitter::opcode::Opcode;
use crate::emitter::output::OutputStream;
use crate::records::{ConstValue, GlobalInit, GlobalRecord};

/// Encode the globals section payload: a varuint32 count followed by
/// one entry per record, in declaration order.
///
/// Each entry is the type tag byte, the mutability byte, the
/// initializer expression and the explicit `end` opcode. Encoding the
/// same records twice yields byte-identical buffers.
pub fn encode_globals(globals: &[GlobalRecord]) -> OutputStream {
    let mut payload = OutputStream::new();
    payload.push_varuint32(globals.len() as u32);
    for global in globals {
        encode(&mut payload, global);
    }
    payload
}

fn encode(payload: &mut OutputStream, global: &GlobalRecord) {
    payload.push_u8(global.ty.code());
    payload.push_u8(global.mutable as u8);
    match &global.init {
        GlobalInit::Const(value) => encode_const(payload, *value),
        GlobalInit::Opcodes(instrs) => {
            // Pre-resolved initializer: emit the sequence verbatim.
            for instr in instrs {
                payload.push_u8(instr.op.code());
                for operand in &instr.operands {
                    payload.push_varuint32(*operand);
                }
            }
        }
    }
    payload.push_u8(Opcode::End.code());
}

fn encode_const(payload: &mut OutputStream, value: ConstValue) {
    match value {
        ConstValue::I32(v) => {
            payload.push_u8(Opcode::I32Const.code());
            payload.push_varint32(v);
        }
        ConstValue::I64(v) => {
            payload.push_u8(Opcode::I64Const.code());
            payload.push_varint64(v);
        }
        ConstValue::F32(v) => {
            payload.push_u8(Opcode::F32Const.code());
            payload.push_f32(v);
        }
        ConstValue::F64(v) => {
            payload.push_u8(Opcode::F64Const.code());
            payload.push_f64(v);
        }
    }
}

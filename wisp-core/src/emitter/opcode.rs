//! The slice of the wasm opcode table used by initializer
//! expressions.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    I32Const,
    I64Const,
    F32Const,
    F64Const,
    GlobalGet,
    End,
}

impl Opcode {
    pub fn code(self) -> u8 {
        match self {
            Opcode::I32Const => 0x41,
            Opcode::I64Const => 0x42,
            Opcode::F32Const => 0x43,
            Opcode::F64Const => 0x44,
            Opcode::GlobalGet => 0x23,
            Opcode::End => 0x0b,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Opcode::I32Const => "i32.const",
            Opcode::I64Const => "i64.const",
            Opcode::F32Const => "f32.const",
            Opcode::F64Const => "f64.const",
            Opcode::GlobalGet => "global.get",
            Opcode::End => "end",
        }
    }
}

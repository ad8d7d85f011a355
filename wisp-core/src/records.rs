//! Declaration-table records consumed by the section emitters.
//!
//! The parser appends these as a side effect of parsing module-scope
//! declarations and exports; the emitters read them back, in order,
//! after the parse completes. Byte values match the wasm binary
//! format so the encoded sections drop straight into a module.

use crate::emitter::opcode::Opcode;

/// Numeric value types supported for globals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    I32,
    I64,
    F32,
    F64,
}

impl ValueType {
    /// Wasm value-type tag byte.
    pub fn code(self) -> u8 {
        match self {
            ValueType::I32 => 0x7f,
            ValueType::I64 => 0x7e,
            ValueType::F32 => 0x7d,
            ValueType::F64 => 0x7c,
        }
    }

    /// Resolve a type annotation to a value type.
    ///
    /// Unrecognized annotations (for example `void`) fall back to
    /// `I32`. This mirrors the permissive behavior of the original
    /// type table; the fallback is deliberate, not silent data loss.
    pub fn from_name(name: &str) -> Self {
        match name {
            "i32" => ValueType::I32,
            "i64" => ValueType::I64,
            "f32" => ValueType::F32,
            "f64" => ValueType::F64,
            _ => ValueType::I32,
        }
    }

    /// The zero constant of this type, used for globals declared
    /// without an initializer.
    pub fn zero(self) -> ConstValue {
        match self {
            ValueType::I32 => ConstValue::I32(0),
            ValueType::I64 => ConstValue::I64(0),
            ValueType::F32 => ConstValue::F32(0.0),
            ValueType::F64 => ConstValue::F64(0.0),
        }
    }
}

/// Kind byte of an export entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalKind {
    Function,
    Table,
    Memory,
    Global,
}

impl ExternalKind {
    pub fn code(self) -> u8 {
        match self {
            ExternalKind::Function => 0x00,
            ExternalKind::Table => 0x01,
            ExternalKind::Memory => 0x02,
            ExternalKind::Global => 0x03,
        }
    }
}

/// A typed constant value, already resolved from its literal text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstValue {
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

/// One pre-resolved instruction of a non-constant initializer.
#[derive(Debug, Clone, PartialEq)]
pub struct InitInstr {
    pub op: Opcode,
    pub operands: Vec<u32>,
}

/// Initializer expression of a global.
///
/// Either a single typed constant or a literal sequence of
/// pre-resolved opcode/operand pairs; the emitter terminates both
/// forms with an explicit `end` opcode.
#[derive(Debug, Clone, PartialEq)]
pub enum GlobalInit {
    Const(ConstValue),
    Opcodes(Vec<InitInstr>),
}

/// One entry of the globals section, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalRecord {
    pub ty: ValueType,
    pub mutable: bool,
    pub init: GlobalInit,
}

/// One entry of the exports section.
///
/// `index` refers positionally into the globals table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord {
    pub index: u32,
    pub kind: ExternalKind,
    pub field: String,
}

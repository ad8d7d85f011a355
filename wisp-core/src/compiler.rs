use crate::ast::Program;
use crate::emitter::assemble;
use crate::error::CoreError;
use crate::parser::parse;

/// Result of compiling one source string.
///
/// The program is kept alongside the bytes so callers can inspect the
/// declaration table (the CLI uses the export records to know which
/// globals to print after instantiation).
#[derive(Debug, PartialEq)]
pub struct CompilationArtifact {
    pub wasm: Vec<u8>,
    pub program: Program,
}

/// Compile Wisp source into a wasm module.
///
/// One linear pass: lex, parse (filling the declaration table as a
/// side effect), then assemble the encoded sections into a module.
pub fn compile_wasm(source: &str) -> Result<CompilationArtifact, CoreError> {
    let program = parse(source)?;
    let wasm = assemble(&program);
    Ok(CompilationArtifact { wasm, program })
}

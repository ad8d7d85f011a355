use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use wasmi::{Engine, Linker, Module, Store, Val};
use wisp_core::{CompilationArtifact, compile_wasm};

/// Compile Wisp source into a WebAssembly module.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(short, long, help = "Input file; reads stdin when omitted")]
    input: Option<String>,

    #[arg(short, long)]
    output: String,

    #[arg(long, help = "Instantiate the module and print its exported globals")]
    run: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    execute(cli)
}

fn execute(cli: Cli) -> Result<()> {
    let source = match cli.input {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("failed to read input file {path}"))?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let artifact = compile_wasm(&source)?;
    write_output(&cli.output, &artifact.wasm)?;

    if cli.run {
        for (name, value) in run_wasm(&artifact)? {
            println!("{name} = {value}");
        }
    }

    Ok(())
}

fn write_output(path: &str, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = PathBuf::from(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {parent:?}"))?;
        }
    }
    fs::write(path, bytes).with_context(|| format!("failed to write output file {path}"))?;
    Ok(())
}

/// Instantiate the compiled module and read back every exported
/// global, in export order.
fn run_wasm(artifact: &CompilationArtifact) -> Result<Vec<(String, String)>> {
    let engine = Engine::default();
    let module = Module::new(&engine, &artifact.wasm).context("failed to compile wasm artifact")?;
    let linker = Linker::new(&engine);
    let mut store = Store::new(&engine, ());
    let instance = linker
        .instantiate(&mut store, &module)
        .context("failed to instantiate module")?
        .start(&mut store)
        .context("failed to start module")?;

    let mut values = Vec::new();
    for export in &artifact.program.exports {
        let global = instance
            .get_global(&store, &export.field)
            .with_context(|| format!("exported global '{}' is missing", export.field))?;
        values.push((export.field.clone(), format_val(global.get(&store))));
    }
    Ok(values)
}

fn format_val(val: Val) -> String {
    match val {
        Val::I32(v) => v.to_string(),
        Val::I64(v) => v.to_string(),
        Val::F32(v) => v.to_float().to_string(),
        Val::F64(v) => v.to_float().to_string(),
        other => format!("<{other:?}>"),
    }
}

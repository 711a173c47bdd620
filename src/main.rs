use std::{fs, path::PathBuf, rc::Rc, time::Instant};

use anyhow::{bail, Context as _};
use clap::Parser as _;
use inkwell::context::Context;
use pi_lang::{
    compiler::compiler::compile, errors::errors::Error, format_error, lexer::lexer::tokenize,
    parser::parser::parse,
};

/// Compiles a pi source file to LLVM IR.
#[derive(clap::Parser)]
struct Args {
    /// Source file to compile
    input: PathBuf,

    /// Where to write the textual IR
    #[arg(short, long, default_value = "build/out.ll")]
    output: PathBuf,

    /// Print the token stream
    #[arg(long)]
    emit_tokens: bool,

    /// Print the parsed declarations
    #[arg(long)]
    emit_ast: bool,

    /// Print the generated IR
    #[arg(long)]
    emit_ir: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read `{}`", args.input.display()))?;
    let file_name = args
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.input.display().to_string());

    let start = Instant::now();

    let tokens = match tokenize(source.clone(), Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(error) => return report(&[error], &source),
    };

    println!("Tokenized in {:?}", start.elapsed());
    if args.emit_tokens {
        for token in &tokens {
            println!("{}", token);
        }
    }

    let parse_start = Instant::now();
    let (_, decls) = parse(tokens, Rc::new(file_name.clone()));

    println!("Parsed in {:?}", parse_start.elapsed());

    let decls = match decls {
        Ok(decls) => decls,
        Err(errors) => return report(&errors, &source),
    };
    if args.emit_ast {
        println!("{:#?}", decls);
    }

    let context = Context::create();

    let compile_start = Instant::now();
    let compiler = match compile(&decls, &file_name, &context) {
        Ok(compiler) => compiler,
        Err(error) => return report(&[error], &source),
    };

    println!("Compiled in {:?}", compile_start.elapsed());
    println!("Total time for IR generation: {:?}", start.elapsed());

    if args.emit_ir {
        println!("{}", compiler.print_ir());
    }

    if let Some(parent) = args.output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create `{}`", parent.display()))?;
    }

    if let Err(message) = compiler.save_module_to_file(&args.output) {
        bail!("failed to write `{}`: {}", args.output.display(), message);
    }

    Ok(())
}

fn report(errors: &[Error], source: &str) -> anyhow::Result<()> {
    for error in errors {
        eprint!("{}", format_error(error, source));
    }

    bail!("compilation failed with {} error(s)", errors.len())
}

use clap::Parser;
use prost::Message;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use protoflags_compiler::{generate, CompileError, PLUGIN_NAME};

/// protoc plugin: reads a `CodeGeneratorRequest` on stdin and writes a
/// `CodeGeneratorResponse` with one `<file>.flags.rs` per input file that
/// carries flag options.
///
/// Run through protoc:
///
///     protoc --plugin=protoc-gen-flags --flags_out=. --flags_opt=runtime=::protoflags acme.proto
///
/// Set `DEBUG` to log to stderr.
#[derive(Parser)]
#[command(name = PLUGIN_NAME)]
#[command(version, about, long_about = None)]
struct Cli {}

fn run() -> Result<(), CompileError> {
    let mut input = Vec::new();
    io::stdin().read_to_end(&mut input)?;

    let response = generate(&input)?;
    log::debug!("writing {} file(s)", response.file.len());

    let mut stdout = io::stdout().lock();
    stdout.write_all(&response.encode_to_vec())?;
    stdout.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    Cli::parse();

    let level = if std::env::var_os("DEBUG").is_some() {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", PLUGIN_NAME, e);
            ExitCode::FAILURE
        }
    }
}

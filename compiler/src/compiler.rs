use prost_types::compiler::{
    code_generator_response::{Feature, File as ResponseFile},
    CodeGeneratorResponse,
};
use protoflags_schema::{File, Schema};

use crate::{
    config::Config,
    descriptor::{decode_request, load_schema},
    error::CompileError,
    gen_rust::{compile_file_to_rust, has_flags},
    verifier::verify_schema,
};

/// Plugin name used in generated headers and diagnostics.
pub const PLUGIN_NAME: &str = "protoc-gen-flags";

fn header(file: &File) -> String {
    format!(
        "// @generated by {}. DO NOT EDIT.\n// source: {}\n\n",
        PLUGIN_NAME, file.name
    )
}

/// Pretty-prints emitted code. A parse failure here means the emitter
/// produced invalid Rust.
fn format_code(name: &str, code: &str) -> Result<String, CompileError> {
    let parsed = syn::parse_file(code).map_err(|source| CompileError::Format {
        file: name.to_string(),
        source,
    })?;
    Ok(prettyplease::unparse(&parsed))
}

/// Verify `schema` and generate one output per file to generate.
/// Returns `(output name, content)` pairs; files without any flag options
/// produce no output.
pub fn compile_schema(schema: &Schema, config: &Config) -> Result<Vec<(String, String)>, CompileError> {
    verify_schema(schema)?;

    let mut outputs = Vec::new();
    for file in schema.files.iter().filter(|file| file.generate) {
        if !has_flags(file) {
            log::debug!("{} has no flag options, skipping", file.name);
            continue;
        }

        let name = config.output_name(&file.name);
        let code = compile_file_to_rust(file, config);
        let code = if config.format { format_code(&name, &code)? } else { code };

        log::info!("generated {}", name);
        outputs.push((name, format!("{}{}", header(file), code)));
    }
    Ok(outputs)
}

/// Logs the loaded IR as JSON when debug logging is on.
fn dump_schema(schema: &Schema) {
    if log::log_enabled!(log::Level::Debug) {
        match serde_json::to_string_pretty(schema) {
            Ok(json) => log::debug!("schema: {}", json),
            Err(e) => log::warn!("could not dump schema: {}", e),
        }
    }
}

/// Run the plugin on an encoded `CodeGeneratorRequest`.
pub fn generate(request: &[u8]) -> Result<CodeGeneratorResponse, CompileError> {
    let request = decode_request(request)?;
    let config = Config::from_parameter(request.parameter.as_deref())?;
    let schema = load_schema(&request.pool, &request.file_to_generate);

    dump_schema(&schema);

    let file = compile_schema(&schema, &config)?
        .into_iter()
        .map(|(name, content)| ResponseFile {
            name: Some(name),
            content: Some(content),
            ..Default::default()
        })
        .collect();

    Ok(CodeGeneratorResponse {
        supported_features: Some(Feature::Proto3Optional as u64),
        file,
        ..Default::default()
    })
}

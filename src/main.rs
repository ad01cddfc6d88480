mod adapters;
mod cli;
mod core;
mod global_constants;
mod utils;

use std::io::Write;
use std::process::ExitCode;

use crate::adapters::TesseractOcrService;
use crate::cli::CliArguments;
use crate::core::interfaces::adapters::OcrService;
use crate::core::models::{OcrPayload, OcrSettings};
use crate::core::orchestrators::OcrOrchestrator;
use crate::global_constants::{
    DEFAULT_ENVIRONMENT, DEFAULT_LOG_FILTER, FALLBACK_ERROR_JSON, LOG_TAG_MAIN,
};

fn main() -> ExitCode {
    // stderr carries the JSON error payload, so logging stays off unless RUST_LOG asks for it.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    log::info!("{} Starting {}", LOG_TAG_MAIN, global_constants::APPLICATION_NAME);

    let applied = utils::apply_default_environment(&DEFAULT_ENVIRONMENT);
    if !applied.is_empty() {
        log::debug!("{} Applied environment defaults: {}", LOG_TAG_MAIN, applied.join(", "));
    }

    let payload = match CliArguments::parse_arguments() {
        Ok(arguments) => recognize(arguments),
        Err(error) => OcrPayload::from_error(&error),
    };

    emit_payload(&payload)
}

fn recognize(arguments: CliArguments) -> OcrPayload {
    let CliArguments {
        image_path,
        languages,
        config,
    } = arguments;

    OcrOrchestrator::build(move || {
        let settings = OcrSettings::load(config.as_deref())?.with_language_override(&languages);
        let service = TesseractOcrService::build(&settings)?;
        Ok(Box::new(service) as Box<dyn OcrService>)
    })
    .run(image_path)
}

fn emit_payload(payload: &OcrPayload) -> ExitCode {
    let json = match payload.to_json() {
        Ok(json) => json,
        Err(error) => {
            log::error!("{} Failed to serialize payload: {}", LOG_TAG_MAIN, error);
            let _ = writeln!(std::io::stderr(), "{}", FALLBACK_ERROR_JSON);
            return ExitCode::FAILURE;
        }
    };

    if payload.is_success() {
        if let Err(error) = writeln!(std::io::stdout().lock(), "{}", json) {
            log::error!("{} Failed to write result: {}", LOG_TAG_MAIN, error);
            return ExitCode::FAILURE;
        }
    } else {
        let _ = writeln!(std::io::stderr(), "{}", json);
    }

    payload.exit_code()
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{DynamicImage, ImageReader};

use crate::core::interfaces::adapters::OcrService;
use crate::core::models::{AdapterError, OcrPayload, OcrResult};
use crate::global_constants::{
    ERROR_CONTEXT_DECODE_IMAGE, ERROR_CONTEXT_GUESS_FORMAT, ERROR_CONTEXT_OPEN_IMAGE,
    LOG_TAG_ORCHESTRATOR,
};

/// Runs one recognition request end to end. The service is only built once
/// the image path has been validated, so argument mistakes never wait on
/// engine start-up.
pub struct OcrOrchestrator<F> {
    service_factory: F,
}

impl<F> OcrOrchestrator<F>
where
    F: FnOnce() -> Result<Box<dyn OcrService>, AdapterError>,
{
    pub fn build(service_factory: F) -> Self {
        Self { service_factory }
    }

    pub fn run(self, image_path: Option<PathBuf>) -> OcrPayload {
        match self.process(image_path) {
            Ok(result) => {
                log::info!(
                    "{} Recognition finished with {} text blocks",
                    LOG_TAG_ORCHESTRATOR,
                    result.text_blocks.len()
                );
                OcrPayload::from_result(&result)
            }
            Err(error) => {
                log::error!("{} {}", LOG_TAG_ORCHESTRATOR, error);
                OcrPayload::from_error(&error)
            }
        }
    }

    fn process(self, image_path: Option<PathBuf>) -> Result<OcrResult, AdapterError> {
        let image_path = validate_image_path(image_path)?;
        log::info!("{} Processing {:?}", LOG_TAG_ORCHESTRATOR, image_path);

        let service = (self.service_factory)()?;

        let image = load_image(&image_path).map_err(AdapterError::recognition_failure)?;
        service
            .extract_text_from_image(&image)
            .map_err(AdapterError::recognition_failure)
    }
}

pub fn validate_image_path(image_path: Option<PathBuf>) -> Result<PathBuf, AdapterError> {
    let image_path = image_path.ok_or(AdapterError::MissingImagePath)?;

    if !image_path.exists() {
        return Err(AdapterError::ImageNotFound(image_path));
    }

    Ok(image_path)
}

fn load_image(image_path: &Path) -> Result<DynamicImage> {
    let image = ImageReader::open(image_path)
        .context(ERROR_CONTEXT_OPEN_IMAGE)?
        .with_guessed_format()
        .context(ERROR_CONTEXT_GUESS_FORMAT)?
        .decode()
        .context(ERROR_CONTEXT_DECODE_IMAGE)?;

    log::debug!(
        "{} Decoded image: {}x{}",
        LOG_TAG_ORCHESTRATOR,
        image.width(),
        image.height()
    );

    Ok(image)
}

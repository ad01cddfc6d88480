use std::borrow::Cow;

use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat};
use rusty_tesseract::{Args, Image as TesseractImage};
use tempfile::NamedTempFile;

use crate::core::interfaces::adapters::OcrService;
use crate::core::models::{AdapterError, OcrResult, OcrSettings};
use crate::global_constants::{LOG_TAG_TESSERACT, TEMPORARY_IMAGE_PREFIX, TESSDATA_PREFIX_VARIABLE};

pub struct TesseractOcrService {
    args: Args,
    paragraph: bool,
}

impl TesseractOcrService {
    pub fn build(settings: &OcrSettings) -> Result<Self, AdapterError> {
        log::info!("{} Initializing Tesseract OCR service", LOG_TAG_TESSERACT);

        if let Some(tessdata_dir) = &settings.tessdata_dir {
            log::debug!("{} Using tessdata from {:?}", LOG_TAG_TESSERACT, tessdata_dir);
            std::env::set_var(TESSDATA_PREFIX_VARIABLE, tessdata_dir);
        }

        let version = rusty_tesseract::get_tesseract_version()
            .map_err(|error| AdapterError::EngineUnavailable(error.to_string()))?;
        log::debug!("{} Tesseract version: {}", LOG_TAG_TESSERACT, version.trim());

        let language_codes = to_tesseract_languages(&settings.recognition_languages());
        Self::warn_about_missing_languages(&language_codes);

        let args = Self::build_args(settings, &language_codes);
        log::info!(
            "{} Service initialized with languages {}",
            LOG_TAG_TESSERACT,
            args.lang
        );

        Ok(Self {
            args,
            paragraph: settings.paragraph,
        })
    }

    fn build_args(settings: &OcrSettings, language_codes: &[String]) -> Args {
        let defaults = Args::default();

        Args {
            lang: language_codes.join("+"),
            dpi: settings.dpi.or(defaults.dpi),
            psm: settings.page_segmentation_mode.or(defaults.psm),
            ..defaults
        }
    }

    fn warn_about_missing_languages(language_codes: &[String]) {
        match rusty_tesseract::get_tesseract_langs() {
            Ok(installed) => {
                for code in language_codes {
                    if !installed.contains(code) {
                        log::warn!(
                            "{} Language data '{}' is not installed",
                            LOG_TAG_TESSERACT,
                            code
                        );
                    }
                }
            }
            Err(error) => {
                log::debug!(
                    "{} Could not list installed languages: {}",
                    LOG_TAG_TESSERACT,
                    error
                );
            }
        }
    }

    // Tesseract picks its decoder from the file extension, so uploads are
    // re-encoded to a PNG it always accepts.
    fn write_tesseract_compatible_image(image: &DynamicImage) -> Result<NamedTempFile> {
        log::debug!("{} Converting image to compatible format", LOG_TAG_TESSERACT);

        let file = tempfile::Builder::new()
            .prefix(TEMPORARY_IMAGE_PREFIX)
            .suffix(".png")
            .tempfile()
            .context("Failed to create temporary image file")?;

        // PNG has no float pixel types.
        let encodable = match image {
            DynamicImage::ImageRgb32F(_) => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
            DynamicImage::ImageRgba32F(_) => Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8())),
            _ => Cow::Borrowed(image),
        };

        encodable
            .save_with_format(file.path(), ImageFormat::Png)
            .context("Failed to convert image to PNG format")?;

        Ok(file)
    }
}

impl OcrService for TesseractOcrService {
    fn extract_text_from_image(&self, image: &DynamicImage) -> Result<OcrResult> {
        log::info!("{} Starting text extraction", LOG_TAG_TESSERACT);
        log::debug!(
            "{} Image dimensions: {}x{}",
            LOG_TAG_TESSERACT,
            image.width(),
            image.height()
        );

        let png_file = Self::write_tesseract_compatible_image(image)
            .context("Failed to prepare image for OCR")?;

        let tesseract_image = TesseractImage::from_path(png_file.path().to_path_buf())
            .context("Failed to create Tesseract image")?;

        let extracted_text = rusty_tesseract::image_to_string(&tesseract_image, &self.args)
            .context("Failed to extract text from image")?;

        log::info!(
            "{} Text extraction complete. Extracted {} characters",
            LOG_TAG_TESSERACT,
            extracted_text.chars().count()
        );
        log::debug!("{} Extracted text: {}", LOG_TAG_TESSERACT, extracted_text);

        Ok(OcrResult::from_engine_output(&extracted_text, self.paragraph))
    }
}

/// Accepts ISO 639-1 codes (and EasyOCR-style Chinese codes) next to native
/// Tesseract codes; anything unrecognized is passed through unchanged.
pub fn to_tesseract_language_code(code: &str) -> String {
    let normalized = code.trim().to_lowercase();

    let tesseract_code = match normalized.as_str() {
        "ko" => "kor",
        "en" => "eng",
        "ja" => "jpn",
        "zh" | "ch_sim" | "zh-cn" | "zh_cn" => "chi_sim",
        "ch_tra" | "zh-tw" | "zh_tw" => "chi_tra",
        "fr" => "fra",
        "de" => "deu",
        "es" => "spa",
        "it" => "ita",
        "pt" => "por",
        "ru" => "rus",
        "vi" => "vie",
        "th" => "tha",
        "ar" => "ara",
        "hi" => "hin",
        other => other,
    };

    tesseract_code.to_string()
}

fn to_tesseract_languages(languages: &[String]) -> Vec<String> {
    let mut codes: Vec<String> = Vec::with_capacity(languages.len());

    for code in languages.iter().map(|code| to_tesseract_language_code(code)) {
        if !codes.contains(&code) {
            codes.push(code);
        }
    }

    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_languages_map_to_korean_and_english_traineddata() {
        let codes = to_tesseract_languages(&OcrSettings::default().languages);

        assert_eq!(codes, vec!["kor", "eng"]);
    }

    #[test]
    fn test_language_codes_are_normalized() {
        assert_eq!(to_tesseract_language_code(" KO "), "kor");
        assert_eq!(to_tesseract_language_code("ch_sim"), "chi_sim");
        assert_eq!(to_tesseract_language_code("zh-TW"), "chi_tra");
    }

    #[test]
    fn test_native_tesseract_codes_pass_through() {
        assert_eq!(to_tesseract_language_code("kor"), "kor");
        assert_eq!(to_tesseract_language_code("kor_vert"), "kor_vert");
    }

    #[test]
    fn test_duplicate_languages_are_dropped() {
        let codes = to_tesseract_languages(&[
            "en".to_string(),
            "eng".to_string(),
            "ko".to_string(),
        ]);

        assert_eq!(codes, vec!["eng", "kor"]);
    }

    #[test]
    fn test_build_args_joins_languages_and_keeps_engine_defaults() {
        let settings = OcrSettings::default();
        let defaults = Args::default();

        let args = TesseractOcrService::build_args(&settings, &["kor".to_string(), "eng".to_string()]);

        assert_eq!(args.lang, "kor+eng");
        assert_eq!(args.dpi, defaults.dpi);
        assert_eq!(args.psm, defaults.psm);
        assert_eq!(args.oem, defaults.oem);
    }

    #[test]
    fn test_build_args_applies_configured_dpi_and_segmentation_mode() {
        let settings = OcrSettings {
            dpi: Some(300),
            page_segmentation_mode: Some(6),
            ..OcrSettings::default()
        };

        let args = TesseractOcrService::build_args(&settings, &["eng".to_string()]);

        assert_eq!(args.lang, "eng");
        assert_eq!(args.dpi, Some(300));
        assert_eq!(args.psm, Some(6));
    }

    #[test]
    fn test_compatible_image_is_written_as_png() {
        let image = DynamicImage::new_rgb8(4, 3);

        let file = TesseractOcrService::write_tesseract_compatible_image(&image).unwrap();
        let reloaded = image::open(file.path()).unwrap();

        assert_eq!(file.path().extension().unwrap(), "png");
        assert_eq!((reloaded.width(), reloaded.height()), (4, 3));
    }

    #[test]
    fn test_float_images_are_converted_before_png_encoding() {
        let rgb = DynamicImage::new_rgb32f(4, 3);
        let rgba = DynamicImage::new_rgba32f(2, 5);

        let rgb_file = TesseractOcrService::write_tesseract_compatible_image(&rgb).unwrap();
        let rgba_file = TesseractOcrService::write_tesseract_compatible_image(&rgba).unwrap();

        let reloaded_rgb = image::open(rgb_file.path()).unwrap();
        let reloaded_rgba = image::open(rgba_file.path()).unwrap();
        assert_eq!((reloaded_rgb.width(), reloaded_rgb.height()), (4, 3));
        assert_eq!((reloaded_rgba.width(), reloaded_rgba.height()), (2, 5));
    }

    #[test]
    fn test_sixteen_bit_images_are_written_unchanged() {
        let image = DynamicImage::new_rgba16(3, 3);

        let file = TesseractOcrService::write_tesseract_compatible_image(&image).unwrap();

        assert!(image::open(file.path()).is_ok());
    }
}

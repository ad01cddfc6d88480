pub const APPLICATION_NAME: &str = "ocr-json-adapter";

pub const LOG_TAG_MAIN: &str = "[MAIN]";
pub const LOG_TAG_SETTINGS: &str = "[SETTINGS]";
pub const LOG_TAG_ORCHESTRATOR: &str = "[ORCHESTRATOR]";
pub const LOG_TAG_TESSERACT: &str = "[TESSERACT_OCR]";
pub const LOG_TAG_ENVIRONMENT: &str = "[ENVIRONMENT]";

pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub const DEFAULT_LANGUAGES: [&str; 2] = ["ko", "en"];
pub const DEFAULT_PARAGRAPH_MODE: bool = true;

// Applied only when the variable is not already set; inherited by the engine process.
pub const DEFAULT_ENVIRONMENT: [(&str, &str); 2] =
    [("KMP_WARNINGS", "0"), ("CUDA_VISIBLE_DEVICES", "-1")];

pub const TESSDATA_PREFIX_VARIABLE: &str = "TESSDATA_PREFIX";
pub const TEMPORARY_IMAGE_PREFIX: &str = "ocr-json-adapter-";

pub const DEFAULT_LOG_FILTER: &str = "off";

pub const FALLBACK_ERROR_JSON: &str = r#"{"error":"failed to serialize OCR payload"}"#;

pub const ERROR_CONTEXT_OPEN_IMAGE: &str = "Failed to open image file";
pub const ERROR_CONTEXT_GUESS_FORMAT: &str = "Failed to detect image format";
pub const ERROR_CONTEXT_DECODE_IMAGE: &str = "Failed to decode image";

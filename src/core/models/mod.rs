mod adapter_error;
mod ocr;
mod ocr_settings;

pub use adapter_error::AdapterError;
pub use ocr::{OcrPayload, OcrResult};
pub use ocr_settings::OcrSettings;

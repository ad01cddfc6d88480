mod tesseract_ocr_service;

pub use tesseract_ocr_service::TesseractOcrService;

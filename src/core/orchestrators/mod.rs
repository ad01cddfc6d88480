mod ocr_orchestrator;

pub use ocr_orchestrator::OcrOrchestrator;

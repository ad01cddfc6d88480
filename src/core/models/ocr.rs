use std::process::ExitCode;

use serde::Serialize;

use super::AdapterError;

/// Text recognized in one image, in reading order as the engine produced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OcrResult {
    pub text_blocks: Vec<String>,
}

impl OcrResult {
    pub fn new(text_blocks: Vec<String>) -> Self {
        Self { text_blocks }
    }

    /// Splits raw engine output into blocks. Tesseract separates blocks with
    /// blank lines; in paragraph mode the lines of a block are joined with a
    /// single space, otherwise every line stands alone.
    pub fn from_engine_output(raw_text: &str, paragraph: bool) -> Self {
        if !paragraph {
            return Self::new(
                raw_text
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string)
                    .collect(),
            );
        }

        let mut paragraphs = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for line in raw_text.lines().map(str::trim) {
            if line.is_empty() {
                if !current.is_empty() {
                    paragraphs.push(current.join(" "));
                    current.clear();
                }
                continue;
            }
            current.push(line);
        }

        if !current.is_empty() {
            paragraphs.push(current.join(" "));
        }

        Self::new(paragraphs)
    }

    pub fn full_text(&self) -> String {
        clean_lines(&self.text_blocks).join("\n")
    }
}

pub fn clean_lines<S: AsRef<str>>(blocks: &[S]) -> Vec<&str> {
    blocks
        .iter()
        .map(|block| block.as_ref().trim())
        .filter(|block| !block.is_empty())
        .collect()
}

/// The single JSON object the adapter prints: `{"text": ...}` on stdout or
/// `{"error": ...}` on stderr.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OcrPayload {
    Text { text: String },
    Error { error: String },
}

impl OcrPayload {
    pub fn from_result(result: &OcrResult) -> Self {
        OcrPayload::Text {
            text: result.full_text(),
        }
    }

    pub fn from_error(error: &AdapterError) -> Self {
        OcrPayload::Error {
            error: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OcrPayload::Text { .. })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

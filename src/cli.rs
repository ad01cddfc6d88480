use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;

use crate::core::models::AdapterError;

#[derive(Debug, Parser)]
#[command(
    name = "ocr-json-adapter",
    version,
    about = "Extract text from an image and print it as JSON"
)]
pub struct CliArguments {
    /// Image file to recognize
    pub image_path: Option<PathBuf>,

    /// Recognition languages, comma separated (e.g. ko,en)
    #[arg(long = "lang", env = "OCR_ADAPTER_LANGUAGES", value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Settings file to use instead of the per-user one
    #[arg(long, env = "OCR_ADAPTER_CONFIG")]
    pub config: Option<PathBuf>,
}

impl CliArguments {
    pub fn parse_arguments() -> Result<Self, AdapterError> {
        Self::parse_from_args(std::env::args_os())
    }

    /// Help and version requests print and exit like any clap program; every
    /// other parse failure becomes an adapter error so it is reported as JSON.
    pub fn parse_from_args<I, T>(args: I) -> Result<Self, AdapterError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(arguments) => Ok(arguments),
            Err(error) => match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => error.exit(),
                _ => Err(AdapterError::InvalidArguments(summarize_clap_error(&error))),
            },
        }
    }
}

fn summarize_clap_error(error: &clap::Error) -> String {
    let rendered = error.to_string();
    let first_line = rendered.lines().next().unwrap_or_default();

    first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_positional_path_is_parsed() {
        let arguments = CliArguments::parse_from_args(["ocr-json-adapter", "receipt.png"]).unwrap();

        assert_eq!(arguments.image_path, Some(PathBuf::from("receipt.png")));
        assert_eq!(arguments.config, None);
    }

    #[test]
    fn test_missing_path_is_not_a_parse_error() {
        let arguments = CliArguments::parse_from_args(["ocr-json-adapter"]).unwrap();

        assert_eq!(arguments.image_path, None);
    }

    #[test]
    fn test_lang_option_splits_on_commas() {
        let arguments =
            CliArguments::parse_from_args(["ocr-json-adapter", "--lang", "ja,en", "scan.jpg"])
                .unwrap();

        assert_eq!(arguments.languages, vec!["ja", "en"]);
    }

    #[test]
    fn test_config_option_is_parsed() {
        let arguments = CliArguments::parse_from_args([
            "ocr-json-adapter",
            "--config",
            "/etc/ocr.json",
            "scan.jpg",
        ])
        .unwrap();

        assert_eq!(arguments.config, Some(PathBuf::from("/etc/ocr.json")));
    }

    #[test]
    fn test_extra_positional_arguments_are_rejected() {
        let error = CliArguments::parse_from_args(["ocr-json-adapter", "a.png", "b.png"]).unwrap_err();

        match error {
            AdapterError::InvalidArguments(message) => {
                assert!(message.contains("unexpected argument"));
                assert!(!message.starts_with("error:"));
            }
            other => panic!("expected invalid arguments, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let error =
            CliArguments::parse_from_args(["ocr-json-adapter", "--gpu", "a.png"]).unwrap_err();

        assert!(matches!(error, AdapterError::InvalidArguments(_)));
    }
}

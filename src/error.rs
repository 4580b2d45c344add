// SPDX-License-Identifier: MPL-2.0
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Dictionary Error: {0}")]
    Dictionary(String),

    #[error("Encode Error: {0}")]
    Encode(String),

    #[error("Image Error: {0}")]
    Image(String),

    #[error("Render Error: {0}")]
    Render(String),
}

/// Reasons a generation cycle stops before the canvas is updated.
///
/// Both variants are surfaced to the user as an alert; the i18n key selects
/// the localized message and `Display` gives the English fallback.
#[derive(Debug, Clone, Error)]
pub enum GenerateError {
    /// The trimmed text payload is empty.
    #[error("Please enter some content for the QR code")]
    EmptyContent,

    /// The encoder or the compositor failed.
    #[error("Error generating QR code. Please check your input.")]
    Failed(#[source] Error),
}

impl GenerateError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            GenerateError::EmptyContent => "alert.emptyContent",
            GenerateError::Failed(_) => "alert.generationError",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<qrcode::types::QrError> for Error {
    fn from(err: qrcode::types::QrError) -> Self {
        Error::Encode(err.to_string())
    }
}

impl From<Error> for GenerateError {
    fn from(err: Error) -> Self {
        GenerateError::Failed(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn qr_error_maps_to_encode_variant() {
        let err: Error = qrcode::types::QrError::DataTooLong.into();
        assert!(matches!(err, Error::Encode(_)));
    }

    #[test]
    fn generate_error_i18n_keys() {
        assert_eq!(GenerateError::EmptyContent.i18n_key(), "alert.emptyContent");
        assert_eq!(
            GenerateError::Failed(Error::Encode("x".into())).i18n_key(),
            "alert.generationError"
        );
    }

    #[test]
    fn generate_error_display_is_english_fallback() {
        assert_eq!(
            GenerateError::EmptyContent.to_string(),
            "Please enter some content for the QR code"
        );
        let failed: GenerateError = Error::Render("no pixmap".into()).into();
        assert_eq!(
            failed.to_string(),
            "Error generating QR code. Please check your input."
        );
    }
}

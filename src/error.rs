//! Error types for the pdfrank library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdfrank operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting and ranking sections.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// The input manifest is missing or unusable.
    #[error("Invalid input manifest: {0}")]
    Manifest(String),

    /// A required input path does not exist.
    #[error("Missing input path: {}", .0.display())]
    MissingInput(PathBuf),

    /// The model service credential is absent from the environment.
    #[error("Missing model credential: set {0}")]
    MissingCredential(&'static str),

    /// The model service call failed at the transport or service level.
    #[error("Model request failed: {0}")]
    ModelRequest(String),

    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::ModelRequest(err.to_string())
    }
}

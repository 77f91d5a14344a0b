use thiserror::Error;

/// Failures of a (possibly batched) translation API call.
///
/// Any error aborts the whole operation; results of batches that already
/// finished are dropped.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no target language specified")]
    MissingTarget,

    #[error("invalid translation endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("error connecting to translation service: {code}")]
    ConnectionError { code: String },

    #[error("translation service responded with status {status}")]
    UpstreamStatusError { status: u16 },

    #[error("could not parse response from translation service: {body}")]
    ResponseParseError { body: String },
}

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("failed to start tesseract: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("tesseract exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("tesseract produced non UTF-8 output")]
    InvalidOutput,
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("api error {code}: {message}")]
    Api { code: i64, message: String },
    #[error("no streams found")]
    NoStreams,
    #[error("missing or invalid task label: {0}")]
    Label(&'static str),
}

use std::path::PathBuf;

/// Everything that can abort a generation run.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("Failed to fetch meta-model from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Fetching {url} returned HTTP {status}: {body}")]
    HttpStatus {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Meta-model response is suspiciously short ({len} bytes): {body:?}")]
    ShortBody { len: usize, body: String },

    #[error("Failed to parse meta-model: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to parse config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    #[error("Invalid base URL {url}: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Methods {first:?} and {second:?} both map to identifier `{ident}`")]
    DuplicateIdentifier {
        ident: String,
        first: String,
        second: String,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

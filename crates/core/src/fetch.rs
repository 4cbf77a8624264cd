//! Retrieval of the meta-model document.

use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::config::GenConfig;
use crate::error::GenError;

/// Bodies shorter than this are treated as a failed download.
pub const MIN_BODY_LEN: usize = 10;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Reject bodies too short to be a meta-model.
fn check_body(body: String) -> Result<String, GenError> {
    if body.len() < MIN_BODY_LEN {
        return Err(GenError::ShortBody {
            len: body.len(),
            body,
        });
    }
    Ok(body)
}

/// Download `metaModel.json` for `version`.
pub fn fetch_meta_model(config: &GenConfig, version: &str) -> Result<String, GenError> {
    let raw_url = config.meta_model_url(version);
    let url = Url::parse(&raw_url).map_err(|source| GenError::BaseUrl {
        url: raw_url.clone(),
        source,
    })?;
    debug!(url = %url, "Fetching meta-model");

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|source| GenError::Fetch {
            url: raw_url.clone(),
            source,
        })?;

    let response = client
        .get(url)
        .send()
        .map_err(|source| GenError::Fetch {
            url: raw_url.clone(),
            source,
        })?;

    let status = response.status();
    let body = response.text().map_err(|source| GenError::Fetch {
        url: raw_url.clone(),
        source,
    })?;

    if !status.is_success() {
        return Err(GenError::HttpStatus {
            url: raw_url,
            status: status.as_u16(),
            body,
        });
    }

    debug!(status = status.as_u16(), body_len = body.len(), "Fetched meta-model");
    check_body(body)
}

/// Read a meta-model from a local file.
pub fn read_meta_model_file(path: &Path) -> Result<String, GenError> {
    let body = fs::read_to_string(path).map_err(|source| GenError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), body_len = body.len(), "Read meta-model from file");
    check_body(body)
}

// API client module: a small blocking HTTP client for the imgbb upload
// endpoint. Building the multipart form is kept apart from sending it so
// the two halves can be exercised separately.

use crate::config::Config;
use crate::error::{BuildStep, UploadError};
use crate::models::UploadResult;
use reqwest::blocking::{multipart, Client};
use reqwest::StatusCode;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, info};

const FALLBACK_MIME: &str = "application/octet-stream";

/// Uploads files to one endpoint. Holds no mutable state, so one value can
/// be cloned or shared between threads freely.
#[derive(Clone, Debug)]
pub struct Uploader {
    client: Client,
    endpoint: String,
}

impl Uploader {
    pub fn new(config: &Config) -> Result<Self, UploadError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(UploadError::Client)?;
        Ok(Uploader {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Uploader with default settings pointed at `endpoint`.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, UploadError> {
        let config = Config {
            endpoint: endpoint.into(),
            ..Config::default()
        };
        Uploader::new(&config)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Upload the file at `path` and return the decoded response.
    ///
    /// Every failure is final for the call; nothing is retried. A response
    /// other than `200 OK` is reported with its status and its body is
    /// never read.
    pub fn upload(&self, path: &Path, api_key: &str) -> Result<UploadResult, UploadError> {
        let form = build_form(path, api_key)?;

        debug!(endpoint = %self.endpoint, "sending upload request");
        let res = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .map_err(UploadError::Request)?;

        let status = res.status();
        if status != StatusCode::OK {
            debug!(%status, "upload failed");
            return Err(UploadError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = res.bytes().map_err(UploadError::Request)?;
        let result: UploadResult = serde_json::from_slice(&body).map_err(UploadError::Decode)?;

        if !result.success {
            return Err(UploadError::Rejected {
                status: result.status,
            });
        }

        info!(id = %result.data.id, url = %result.data.url, "image uploaded");
        Ok(result)
    }
}

/// Build the two-part form: `image` with the file contents and `key` with
/// the API key. The file is closed before this returns.
pub fn build_form(path: &Path, api_key: &str) -> Result<multipart::Form, UploadError> {
    let mut file = File::open(path).map_err(|source| UploadError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let file_name = path.file_name().ok_or_else(|| {
        UploadError::build(
            BuildStep::FormFile,
            io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;
    // The part filename must be the exact base name, so no lossy conversion.
    let file_name = file_name
        .to_str()
        .ok_or_else(|| {
            UploadError::build(
                BuildStep::FormFile,
                io::Error::new(io::ErrorKind::InvalidInput, "file name is not valid UTF-8"),
            )
        })?
        .to_string();

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|err| UploadError::build(BuildStep::CopyFile, err))?;

    let mime = infer::get(&bytes).map_or(FALLBACK_MIME, |kind| kind.mime_type());
    debug!(file = %file_name, size = bytes.len(), mime, "prepared image part");

    let image = multipart::Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime)
        .map_err(|err| UploadError::build(BuildStep::FormFile, err))?;

    if api_key.trim().is_empty() {
        return Err(UploadError::MissingApiKey);
    }

    Ok(multipart::Form::new()
        .part("image", image)
        .text("key", api_key.to_string()))
}

// Error taxonomy for the uploader. Each variant names the step of the
// upload pipeline that failed and keeps the underlying cause as `source`,
// so the full chain can be printed with `anyhow::Chain` in the UI.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Steps of building the multipart body that can fail on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    /// Creating the `image` part (base name, MIME type).
    FormFile,
    /// Copying the file bytes into the part.
    CopyFile,
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BuildStep::FormFile => "error creating form file",
            BuildStep::CopyFile => "error copying file",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("error opening file {path:?}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{step}")]
    RequestBuild {
        step: BuildStep,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Empty or whitespace-only key; caught before any network I/O.
    #[error("API key is missing")]
    MissingApiKey,

    #[error("error building http client")]
    Client(#[source] reqwest::Error),

    /// Also covers failures while the form body is streamed, which is
    /// where reqwest writes the closing multipart boundary.
    #[error("error making request")]
    Request(#[source] reqwest::Error),

    #[error("received non-200 response: {status}")]
    HttpStatus { status: u16 },

    #[error("error decoding response")]
    Decode(#[source] serde_json::Error),

    #[error("upload rejected by server (status {status})")]
    Rejected { status: i64 },
}

impl UploadError {
    pub(crate) fn build<E>(step: BuildStep, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        UploadError::RequestBuild {
            step,
            source: source.into(),
        }
    }

    /// Step of the multipart body that failed, if this is a build error.
    pub fn build_step(&self) -> Option<BuildStep> {
        match self {
            UploadError::RequestBuild { step, .. } => Some(*step),
            _ => None,
        }
    }
}

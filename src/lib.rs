// Library root
// -----------
// Uploads one image to imgbb and decodes the response. The binary
// (`main.rs`) only parses arguments, resolves the API key and hands over
// to these modules.
//
// Module responsibilities:
// - `api`: the `Uploader` (multipart form, POST, status check, decoding).
// - `models`: serde types of the upload response.
// - `error`: `UploadError`, one variant per failing step.
// - `config`: environment configuration and the saved API key file.
// - `ui`: prompts, spinner and printing of the outcome.
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod ui;

pub use api::Uploader;
pub use error::{BuildStep, UploadError};
pub use models::{ImageData, ImageVariant, UploadResult};

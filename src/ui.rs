// UI layer: prompts for whatever the command line didn't provide, shows a
// spinner while the upload runs and prints the outcome. Everything here is
// a thin wrapper around `api::Uploader`.

use crate::api::Uploader;
use crate::error::UploadError;
use crate::models::UploadResult;
use anyhow::Result;
use dialoguer::{Confirm, Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Ask for the image path when none was passed on the command line.
pub fn prompt_image_path() -> Result<PathBuf> {
    let path: String = Input::new().with_prompt("Image file path").interact_text()?;
    Ok(PathBuf::from(path.trim()))
}

/// `Password` hides the key while it is typed.
pub fn prompt_api_key() -> Result<String> {
    let key = Password::new().with_prompt("imgbb API key").interact()?;
    Ok(key.trim().to_string())
}

pub fn confirm_save_key(path: &Path) -> Result<bool> {
    let answer = Confirm::new()
        .with_prompt(format!("Save API key to {}?", path.display()))
        .default(false)
        .interact()?;
    Ok(answer)
}

/// Run the blocking upload with a spinner on the terminal.
pub fn upload_with_spinner(
    uploader: &Uploader,
    path: &Path,
    api_key: &str,
) -> Result<UploadResult, UploadError> {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Uploading {}...", path.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = uploader.upload(path, api_key);
    spinner.finish_and_clear();
    result
}

/// Line printed for an upload outcome. Errors are shown with their whole
/// cause chain, e.g. `error opening file "a.png": No such file or directory`.
pub fn format_outcome(result: &Result<UploadResult, UploadError>) -> String {
    match result {
        Ok(resp) => format!("Image uploaded successfully: {}", resp.data.url),
        Err(e) => format!("error uploading image: {}", error_chain(e)),
    }
}

/// Print the outcome to stdout. Returns whether the upload succeeded.
pub fn report(result: &Result<UploadResult, UploadError>) -> bool {
    println!("{}", format_outcome(result));
    result.is_ok()
}

/// Line printed when the run fails before the upload starts (config,
/// prompts, saving the key). Same shape and stream as upload failures.
pub fn format_failure(err: &anyhow::Error) -> String {
    format!("error uploading image: {:#}", err)
}

fn error_chain(err: &UploadError) -> String {
    anyhow::Chain::new(err)
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}

// Entrypoint for the `imgbb-upload` binary.
// - Parses arguments, loads config and resolves the API key.
// - Keeps `main` small: the upload itself lives in `api::Uploader`.

use anyhow::{Context, Result};
use clap::Parser;
use imgbb_cli::{config, config::Config, ui, Uploader};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Upload an image to imgbb and print its URL
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Image file to upload (asked for interactively when omitted)
    image: Option<PathBuf>,

    /// API key, overrides IMGBB_API_KEY and the saved key
    #[arg(long)]
    key: Option<String>,

    /// Store the key given with --key for later runs
    #[arg(long, requires = "key")]
    save_key: bool,

    /// Request timeout in seconds, 0 for none
    #[arg(long)]
    timeout: Option<u64>,

    /// Upload endpoint, overrides IMGBB_ENDPOINT
    #[arg(long)]
    endpoint: Option<String>,

    /// Print the whole decoded response as JSON instead of the URL
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Setup failures are printed on stdout like upload failures.
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            println!("{}", ui::format_failure(&e));
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the upload succeeded; upload failures are already printed.
fn run(args: &Args) -> Result<bool> {
    let mut config = Config::from_env()?;
    if let Some(endpoint) = args.endpoint.clone() {
        config.endpoint = endpoint;
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    debug!(endpoint = %config.endpoint, timeout = ?config.timeout(), "config loaded");

    let image = match args.image.clone() {
        Some(path) => path,
        None => ui::prompt_image_path().context("Failed to read image path")?,
    };
    let api_key = resolve_api_key(args, &config)?;

    let uploader = Uploader::new(&config).context("Failed to create uploader")?;
    let result = ui::upload_with_spinner(&uploader, &image, &api_key);

    let ok = match (&result, args.json) {
        (Ok(resp), true) => {
            let text = serde_json::to_string_pretty(resp).context("Failed to encode response")?;
            println!("{}", text);
            true
        }
        _ => ui::report(&result),
    };

    Ok(ok)
}

/// `--key`, then `IMGBB_API_KEY`, then the saved key file, then a prompt.
fn resolve_api_key(args: &Args, config: &Config) -> Result<String> {
    if let Some(key) = &args.key {
        if args.save_key {
            let path = config::save_api_key(key)?;
            debug!(?path, "api key saved");
        }
        return Ok(key.trim().to_string());
    }

    if let Some(key) = config.env_api_key() {
        return Ok(key.to_string());
    }

    if let Some(key) = config::load_api_key() {
        return Ok(key);
    }

    let key = ui::prompt_api_key().context("Failed to read API key")?;
    let path = config::key_file_path();
    if !key.is_empty() && ui::confirm_save_key(&path)? {
        if let Err(e) = config::save_api_key(&key) {
            warn!("could not save api key: {:#}", e);
        }
    }
    Ok(key)
}

//! CLI argument validation functions
//!
//! Custom value parsers for arguments clap cannot validate on its own.

use std::fs;
use std::path::PathBuf;

use reqwest::Url;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!(
            "Cannot read configuration file '{}': {}",
            path_str, e
        )),
    }
}

/// Validate an http(s) endpoint URL
pub fn validate_url(url_str: &str) -> Result<Url, String> {
    let url = Url::parse(url_str.trim()).map_err(|e| format!("Invalid URL '{}': {}", url_str, e))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(format!(
            "Unsupported URL scheme '{}'. Expected http or https.",
            scheme
        )),
    }
}

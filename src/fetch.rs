use anyhow::{Context, Result};
use std::fs;
use std::time::Instant;
use tracing::info;
use url::Url;

/// Retrieves the resource behind `url` and returns its text split into lines.
///
/// `file://` URLs are read from the local filesystem, everything else goes
/// through a single blocking HTTP GET. The body must be valid UTF-8.
pub fn download_lines(url: &Url) -> Result<Vec<String>> {
    let start_time = Instant::now();
    info!(action = "start", component = "fetch", url = %url, "Downloading log data");

    let body = match url.scheme() {
        "file" => read_local(url)?,
        _ => fetch_remote(url)?,
    };

    let text = String::from_utf8(body).context("Log data is not valid UTF-8")?;
    let lines = split_lines(&text);

    info!(
        action = "complete",
        component = "fetch",
        line_count = lines.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Download completed"
    );
    Ok(lines)
}

fn read_local(url: &Url) -> Result<Vec<u8>> {
    let path = url
        .to_file_path()
        .map_err(|_| anyhow::anyhow!("Not a usable local file URL: {}", url))?;
    info!(action = "read", component = "fetch", path = ?path, "Reading local file");

    fs::read(&path).with_context(|| format!("Failed to read {:?}", path))
}

fn fetch_remote(url: &Url) -> Result<Vec<u8>> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let response = client
        .get(url.clone())
        .send()
        .with_context(|| format!("Request to {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Server rejected request to {}", url))?;

    info!(action = "response", component = "fetch", status = %response.status(), "Received response");

    let bytes = response
        .bytes()
        .with_context(|| format!("Failed to read response body from {}", url))?;
    Ok(bytes.to_vec())
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Splits on every Unicode line boundary (`\r\n` counts once), dropping the
/// terminators. A trailing terminator does not produce an empty final line.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        match rest.find(is_line_break) {
            Some(idx) => {
                lines.push(rest[..idx].to_string());
                let skip = if rest[idx..].starts_with("\r\n") {
                    2
                } else {
                    rest[idx..].chars().next().map_or(1, char::len_utf8)
                };
                rest = &rest[idx + skip..];
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }

    lines
}

use crate::error::{Result, TeaError};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where the review sheet lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Http(String),
}

impl Source {
    /// `http://` and `https://` locations are fetched over the network; anything
    /// else is a path, relative paths resolving against `root`.
    pub fn resolve(location: &str, root: &Path) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Self::Http(trimmed.to_string());
        }
        let path = PathBuf::from(trimmed);
        if path.is_absolute() {
            Self::File(path)
        } else {
            Self::File(root.join(path))
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Http(url) => url.clone(),
        }
    }
}

pub fn fetch(source: &Source, timeout: Duration) -> Result<String> {
    match source {
        Source::File(path) => {
            let bytes = std::fs::read(path)
                .map_err(|e| TeaError::Transport(format!("{}: {}", path.display(), e)))?;
            Ok(decode_lossy(bytes, &path.display().to_string()))
        }
        Source::Http(url) => fetch_http(url, timeout),
    }
}

/// Re-attempts only transport-level failures; `retries = 0` means one attempt.
pub fn fetch_with_retries(source: &Source, timeout: Duration, retries: u32) -> Result<String> {
    let mut attempt = 0;
    loop {
        match fetch(source, timeout) {
            Ok(text) => return Ok(text),
            Err(err @ (TeaError::Transport(_) | TeaError::HttpStatus { .. })) if attempt < retries => {
                attempt += 1;
                tracing::warn!(
                    source = %source.label(),
                    attempt,
                    retries,
                    error = %err,
                    "fetch failed, retrying"
                );
            }
            Err(err) => return Err(err),
        }
    }
}

/// Invalid UTF-8 becomes U+FFFD so one bad byte only degrades its own field.
fn decode_lossy(bytes: Vec<u8>, label: &str) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(source = %label, "source is not valid UTF-8, replacing bad bytes");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }
}

fn fetch_http(url: &str, timeout: Duration) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("tearank/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|e| TeaError::Transport(e.to_string()))?;

    tracing::debug!(url = %url, "fetching review sheet");
    let response = client
        .get(url)
        .send()
        .map_err(|e| TeaError::Transport(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(TeaError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .text()
        .map_err(|e| TeaError::Transport(format!("{url}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn resolve_distinguishes_urls_and_paths() {
        let root = Path::new("/srv/site");
        assert_eq!(
            Source::resolve("https://example.com/teas.csv", root),
            Source::Http("https://example.com/teas.csv".to_string())
        );
        assert_eq!(
            Source::resolve("data/teas.csv", root),
            Source::File(PathBuf::from("/srv/site/data/teas.csv"))
        );
        assert_eq!(
            Source::resolve("/tmp/teas.csv", root),
            Source::File(PathBuf::from("/tmp/teas.csv"))
        );
    }

    #[test]
    fn fetch_reads_local_file() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("teas.csv");
        fs::write(&path, "Name\nSencha\n").expect("csv should write");

        let text = fetch(&Source::File(path), Duration::from_secs(1)).expect("fetch should work");
        assert!(text.contains("Sencha"));
    }

    #[test]
    fn fetch_missing_file_is_transport_error() {
        let dir = TempDir::new().expect("temp dir should be created");
        let source = Source::File(dir.path().join("absent.csv"));

        let err = fetch_with_retries(&source, Duration::from_secs(1), 2)
            .expect_err("missing file should fail");
        assert!(matches!(err, TeaError::Transport(_)));
        assert!(err.to_string().contains("absent.csv"));
    }
}

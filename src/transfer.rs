//! Single-file transfers against server-issued signed URLs.
//!
//! Uploads stream the file from disk as the PUT body; downloads are written
//! through a temporary sibling path and renamed into place so a failed
//! transfer never leaves a truncated file at the destination.

use std::path::Path;

use futures::StreamExt;
use reqwest::Client;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use uuid::Uuid;

/// Failure during a PUT/GET against a signed URL.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The storage backend rejected the transfer.
    #[error("transfer rejected (status {status})")]
    Status { status: u16 },

    /// Transport failure while talking to the storage backend.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Local read/write failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Infer a MIME type from the file extension, falling back to a generic
/// binary content type for unknown extensions.
pub fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}

/// PUT the file at `local_path` to `signed_url` with the given content type.
pub async fn upload(
    http: &Client,
    local_path: &Path,
    signed_url: &str,
    mime: &str,
) -> Result<(), TransferError> {
    let file = tokio::fs::File::open(local_path).await?;
    let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
    let response = http
        .put(signed_url)
        .header("Content-Type", mime)
        .body(body)
        .send()
        .await?;
    let status = response.status();
    if !status.is_success() {
        return Err(TransferError::Status {
            status: status.as_u16(),
        });
    }
    Ok(())
}

/// GET `signed_url` and write the response body to `dest_path`, creating
/// parent directories as needed.
pub async fn download(
    http: &Client,
    signed_url: &str,
    dest_path: &Path,
) -> Result<(), TransferError> {
    let response = http.get(signed_url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(TransferError::Status {
            status: status.as_u16(),
        });
    }

    if let Some(parent) = dest_path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    let tmp = dest_path.with_extension(format!("part-{}", Uuid::new_v4()));
    if let Err(e) = write_body(response, &tmp).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e);
    }
    tokio::fs::rename(&tmp, dest_path).await?;
    Ok(())
}

async fn write_body(response: reqwest::Response, path: &Path) -> Result<(), TransferError> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        file.write_all(&chunk?).await?;
    }
    file.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path as url_path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn guess_mime_known_audio_extension() {
        let mime = guess_mime(Path::new("recording.wav"));
        assert!(mime.starts_with("audio/"), "got {mime}");
    }

    #[test]
    fn guess_mime_unknown_extension_defaults_to_binary() {
        assert_eq!(
            guess_mime(Path::new("payload.zzz")),
            "application/octet-stream"
        );
        assert_eq!(guess_mime(Path::new("no_extension")), "application/octet-stream");
    }

    #[tokio::test]
    async fn upload_puts_file_bytes_with_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(url_path("/store/a.wav"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("a.wav");
        std::fs::write(&local, b"RIFF-audio-bytes").unwrap();

        let http = Client::new();
        let url = format!("{}/store/a.wav", server.uri());
        upload(&http, &local, &url, "audio/wav").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].body, b"RIFF-audio-bytes");
        assert_eq!(
            requests[0].headers.get("Content-Type").unwrap(),
            "audio/wav"
        );
    }

    #[tokio::test]
    async fn upload_non_2xx_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("a.wav");
        std::fs::write(&local, b"x").unwrap();

        let http = Client::new();
        let url = format!("{}/store/a.wav", server.uri());
        let err = upload(&http, &local, &url, "audio/wav").await.unwrap_err();
        assert!(matches!(err, TransferError::Status { status: 403 }));
    }

    #[tokio::test]
    async fn download_writes_body_and_creates_parents() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path("/store/a.json"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"{\"ok\":true}".as_slice()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("results/nested/a.json");

        let http = Client::new();
        let url = format!("{}/store/a.json", server.uri());
        download(&http, &url, &dest).await.unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"{\"ok\":true}");
        // No temporary leftovers next to the destination.
        let siblings: Vec<_> = std::fs::read_dir(dest.parent().unwrap())
            .unwrap()
            .collect();
        assert_eq!(siblings.len(), 1);
    }

    #[tokio::test]
    async fn download_non_2xx_leaves_no_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("a.json");

        let http = Client::new();
        let url = format!("{}/store/a.json", server.uri());
        let err = download(&http, &url, &dest).await.unwrap_err();
        assert!(matches!(err, TransferError::Status { status: 404 }));
        assert!(!dest.exists());
    }
}

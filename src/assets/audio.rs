use std::path::Path;

use futures::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::episode::Episode;
use crate::error::DownloadError;
use crate::http::HttpClient;
use crate::progress::{ProgressEvent, SharedProgressReporter};

/// Result of one audio download attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioOutcome {
    Downloaded { bytes: u64 },
    AlreadyPresent,
}

/// Download an episode's audio file into the audio directory.
///
/// The destination is `<audio_dir>/<file_name>`. A file that already exists
/// is never re-fetched; otherwise the response body is streamed to disk.
/// Failures propagate without cleanup or retry.
pub async fn download_audio<C: HttpClient>(
    client: &C,
    episode: &Episode,
    audio_dir: &Path,
    episode_index: usize,
    total_episodes: usize,
    reporter: &SharedProgressReporter,
) -> Result<AudioOutcome, DownloadError> {
    let output_path = audio_dir.join(&episode.file_name);

    if output_path.exists() {
        reporter.report(ProgressEvent::DownloadSkipped {
            file_name: episode.file_name.clone(),
        });
        return Ok(AudioOutcome::AlreadyPresent);
    }

    let url = episode.audio_url.as_str();

    let response = client
        .get_stream(url)
        .await
        .map_err(|e| DownloadError::HttpFailed {
            url: url.to_string(),
            source: e,
        })?;

    if response.status >= 400 {
        return Err(DownloadError::HttpStatus {
            url: url.to_string(),
            status: response.status,
        });
    }

    reporter.report(ProgressEvent::DownloadStarting {
        episode_title: episode.title.clone(),
        episode_index,
        total_episodes,
        content_length: response.content_length,
    });

    let mut file = File::create(&output_path)
        .await
        .map_err(|e| DownloadError::FileWriteFailed {
            path: output_path.clone(),
            source: e,
        })?;

    let mut bytes_downloaded: u64 = 0;
    let mut stream = response.body;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::StreamFailed {
            url: url.to_string(),
            source: e,
        })?;

        file.write_all(&chunk)
            .await
            .map_err(|e| DownloadError::FileWriteFailed {
                path: output_path.clone(),
                source: e,
            })?;

        bytes_downloaded += chunk.len() as u64;

        reporter.report(ProgressEvent::DownloadProgress {
            bytes_downloaded,
            total_bytes: response.content_length,
        });
    }

    file.flush()
        .await
        .map_err(|e| DownloadError::FileWriteFailed {
            path: output_path.clone(),
            source: e,
        })?;

    reporter.report(ProgressEvent::DownloadCompleted {
        episode_title: episode.title.clone(),
        bytes_downloaded,
    });

    Ok(AudioOutcome::Downloaded {
        bytes: bytes_downloaded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::Enclosure;
    use crate::http::{ByteStream, HttpResponse};
    use crate::progress::NoopReporter;
    use async_trait::async_trait;
    use bytes::Bytes;
    use tempfile::tempdir;
    use url::Url;

    struct MockHttpClient {
        response_data: Vec<u8>,
        status: u16,
    }

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn get_bytes(&self, _url: &str) -> Result<Bytes, reqwest::Error> {
            Ok(Bytes::from(self.response_data.clone()))
        }

        async fn get_stream(&self, _url: &str) -> Result<HttpResponse, reqwest::Error> {
            let data = self.response_data.clone();
            let len = data.len() as u64;

            let stream: ByteStream =
                Box::pin(futures::stream::once(async move { Ok(Bytes::from(data)) }));

            Ok(HttpResponse {
                status: self.status,
                content_length: Some(len),
                body: stream,
            })
        }
    }

    /// Client that fails the test if any request is made
    struct PanickingClient;

    #[async_trait]
    impl HttpClient for PanickingClient {
        async fn get_bytes(&self, url: &str) -> Result<Bytes, reqwest::Error> {
            panic!("unexpected request to {url}");
        }

        async fn get_stream(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
            panic!("unexpected request to {url}");
        }
    }

    fn make_episode(file_name: &str) -> Episode {
        Episode {
            title: "Test Episode".to_string(),
            description: None,
            pub_date: None,
            guid: None,
            duration: None,
            audio_url: Url::parse(&format!("https://cdn.example/{file_name}")).unwrap(),
            file_name: file_name.to_string(),
            slug: "test-episode".to_string(),
            enclosure: Enclosure {
                url: format!("https://cdn.example/{file_name}"),
                length: Some(1000),
                mime_type: Some("audio/mpeg".to_string()),
            },
        }
    }

    #[tokio::test]
    async fn download_writes_file() {
        let dir = tempdir().unwrap();

        let client = MockHttpClient {
            response_data: b"test audio content".to_vec(),
            status: 200,
        };

        let episode = make_episode("episode.mp3");
        let reporter = NoopReporter::shared();

        let outcome = download_audio(&client, &episode, dir.path(), 0, 1, &reporter)
            .await
            .unwrap();

        assert_eq!(outcome, AudioOutcome::Downloaded { bytes: 18 });

        let content = std::fs::read(dir.path().join("episode.mp3")).unwrap();
        assert_eq!(content, b"test audio content");
    }

    #[tokio::test]
    async fn existing_file_is_left_untouched() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("episode.mp3"), b"sentinel").unwrap();

        let episode = make_episode("episode.mp3");
        let reporter = NoopReporter::shared();

        // PanickingClient proves no request leaves the process
        let outcome = download_audio(&PanickingClient, &episode, dir.path(), 0, 1, &reporter)
            .await
            .unwrap();

        assert_eq!(outcome, AudioOutcome::AlreadyPresent);
        let content = std::fs::read(dir.path().join("episode.mp3")).unwrap();
        assert_eq!(content, b"sentinel");
    }

    #[tokio::test]
    async fn download_fails_on_http_error() {
        let dir = tempdir().unwrap();

        let client = MockHttpClient {
            response_data: b"Not Found".to_vec(),
            status: 404,
        };

        let episode = make_episode("episode.mp3");
        let reporter = NoopReporter::shared();

        let result = download_audio(&client, &episode, dir.path(), 0, 1, &reporter).await;

        match result.unwrap_err() {
            DownloadError::HttpStatus { status, .. } => assert_eq!(status, 404),
            other => panic!("Expected HttpStatus error, got {other:?}"),
        }
    }
}

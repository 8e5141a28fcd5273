use crate::classifier::{Classifier, MediaFile};
use crate::error::IngestError;
use crate::wildwatch::config::ClassifierConfig;
use crate::wildwatch::entry::MediaType;
use crate::wildwatch::record::SpeciesRecord;
use anyhow::{Context, Result};
use reqwest::blocking::{Client, multipart};
use std::fs;
use std::time::Duration;

/// Posts media as a multipart form (`image` or `video` field) and decodes the
/// JSON species record from the response. No retries.
pub struct HttpClassifier {
    client: Client,
    base_url: String,
    image_path: String,
    video_path: String,
}

impl HttpClassifier {
    pub fn new(cfg: &ClassifierConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("failed to build classifier http client")?;
        Ok(Self {
            client,
            base_url: cfg.base_url.trim().to_string(),
            image_path: cfg.image_path.clone(),
            video_path: cfg.video_path.clone(),
        })
    }

    pub fn endpoint(&self, media_type: MediaType) -> String {
        let path = match media_type {
            MediaType::Image => &self.image_path,
            MediaType::Video => &self.video_path,
        };
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim().trim_start_matches('/')
        )
    }
}

impl Classifier for HttpClassifier {
    fn submit(&self, media: &MediaFile) -> Result<SpeciesRecord, IngestError> {
        let bytes = fs::read(&media.path).map_err(|source| IngestError::UnreadableMedia {
            path: media.path.display().to_string(),
            source,
        })?;
        let file_name = media
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("upload")
            .to_string();

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(media.mime_type())
            .map_err(|err| IngestError::Transport(format!("invalid media type: {err}")))?;
        let form = multipart::Form::new().part(media.media_type.as_str(), part);

        let url = self.endpoint(media.media_type);
        log::debug!("submitting {} to {url}", media.path.display());
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|err| IngestError::Transport(format!("{url}: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::Status(status.as_u16()));
        }
        let body = response
            .text()
            .map_err(|err| IngestError::Transport(format!("{url}: {err}")))?;
        SpeciesRecord::from_json_str(&body)
    }
}

//! HTTP [`Uploader`] client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use secrecy::ExposeSecret as _;
use serde::Deserialize;

use super::{Config, Error, File, Stored, Uploader};

/// [`Uploader`] POSTing files to a remote HTTP object storage.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying HTTP client.
    client: reqwest::Client,

    /// Configuration of this [`Http`] uploader.
    config: Config,
}

impl Http {
    /// Creates a new [`Http`] uploader with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If the underlying HTTP client cannot be constructed.
    pub fn new(config: Config) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client, config })
    }
}

/// Response of a storage upload endpoint.
#[derive(Debug, Deserialize)]
struct Response {
    /// Durable URL of the uploaded file.
    url: String,

    /// Storage-assigned identifier of the uploaded file.
    public_id: Option<String>,
}

#[async_trait]
impl Uploader for Http {
    async fn upload(&self, file: File) -> Result<Stored, Error> {
        let File { filename, bytes } = file;

        tracing::debug!("uploading `{filename}` to `{}`", self.config.endpoint);

        let form = multipart::Form::new()
            .text("folder", self.config.folder.clone())
            .part("file", multipart::Part::bytes(bytes).file_name(filename));

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(self.config.api_key.expose_secret())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::BadStatus(status.as_u16()));
        }

        let Response { url, public_id } = response.json().await?;
        Ok(Stored { url, public_id })
    }
}

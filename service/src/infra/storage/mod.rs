//! Object-storage integration.

mod http;

use async_trait::async_trait;
use derive_more::{Debug, Display, Error as StdError, From};
use secrecy::SecretString;

pub use self::http::Http;

/// Configuration of an object-storage [`Uploader`].
#[derive(Clone, Debug)]
pub struct Config {
    /// URL of the upload endpoint.
    pub endpoint: String,

    /// API key to authorize uploads with.
    #[debug(skip)]
    pub api_key: SecretString,

    /// Folder to place uploaded files into.
    pub folder: String,
}

/// Raw file to upload.
#[derive(Clone, Debug)]
pub struct File {
    /// Original filename.
    pub filename: String,

    /// Raw bytes of the file.
    #[debug(skip)]
    pub bytes: Vec<u8>,
}

/// Reference to a durably stored file.
#[derive(Clone, Debug)]
pub struct Stored {
    /// Durable URL of the stored file.
    pub url: String,

    /// Storage-assigned identifier, if any.
    pub public_id: Option<String>,
}

/// Uploader of raw files into a durable object storage.
///
/// The storage is an external collaborator: once an upload returns, the
/// bytes are durably stored. A request failing after its uploads leaves
/// them orphaned, which is not reconciled here.
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Uploads the provided [`File`] and returns its [`Stored`] reference.
    ///
    /// # Errors
    ///
    /// If the storage rejects or fails the upload.
    async fn upload(&self, file: File) -> Result<Stored, Error>;
}

/// [`Uploader`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Transport failure.
    #[display("Transport failure: {_0}")]
    Transport(reqwest::Error),

    /// Storage responded with an unexpected status.
    #[display("Storage responded with `{_0}` status")]
    #[from(ignore)]
    BadStatus(#[error(not(source))] u16),
}

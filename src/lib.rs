/*!
 # Light Panel Effects Client

 A Rust client for the effects API of smart light panel controllers.
 Covers everything the device exposes under `/<token>/effects`.

 ## Features

 * Listing effects and reading the active one
 * Selecting, renaming and deleting effects
 * Fetching full effect definitions, one or all at once
 * Creating or overwriting effects
 * Streaming custom per-panel RGB animations
 * Showing an effect temporarily
 * Raw writes for commands without a typed helper

 ## Example

 ```no_run
 use panel_effects::*;

 #[tokio::main]
 async fn main() -> Result<()> {
     let config = DeviceConfig::new("http://192.168.1.40:16021/api/v1", "my-token")?;
     let effects = EffectsClient::new(&config);

     for name in effects.list().await? {
         println!("{name}");
     }

     let animation = StreamAnimation::new()
         .with_panel(1, vec![Frame::new(255, 0, 0, 5)])
         .with_panel(2, vec![Frame::new(0, 255, 0, 3), Frame::new(0, 0, 255, 7)]);
     effects.display_animation(&animation, true).await?;

     Ok(())
 }
 ```
*/

use thiserror::Error;

/// Error kinds surfaced by every effects operation
#[derive(Error, Debug)]
pub enum Error {
    /// The device rejected the auth token
    #[error("Unauthorized: the device rejected the auth token")]
    Unauthorized,

    /// The named effect does not exist on the device
    #[error("Effect not found")]
    EffectNotFound,

    /// The requested resource path does not exist on the device
    #[error("Resource not found")]
    ResourceNotFound,

    /// Status code outside the expected set for the operation
    #[error("Unexpected response status {0}")]
    UnexpectedResponse(u16),

    /// Body did not parse into the expected shape
    #[error("Malformed response body: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// Request body could not be serialized
    #[error("Failed to encode request body: {0}")]
    RequestEncoding(#[source] serde_json::Error),

    /// No response was obtained from the device
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Bad device URL or token
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Text is not a valid positional stream animation
    #[error("Invalid stream animation: {0}")]
    InvalidStream(String),
}

impl Error {
    /// True for both not-found kinds
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::EffectNotFound | Error::ResourceNotFound)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod client;
pub mod device;
pub mod effects;
pub mod envelope;
pub mod status;
pub mod stream;
pub mod transport;

// Re-export key types
pub use client::EffectsClient;
pub use device::DeviceConfig;
pub use effects::{EffectData, PaletteColor, PluginOption, PluginValue};
pub use envelope::Command;
pub use stream::{Frame, Panel, StreamAnimation};
pub use transport::{HttpTransport, Response, Transport};

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::device::DeviceConfig;
use crate::effects::EffectData;
use crate::envelope;
use crate::status::{self, Expect, Target};
use crate::stream::StreamAnimation;
use crate::transport::{HttpTransport, Transport};
use crate::Result;

/// Client for the effects API of one device
///
/// Holds nothing but the endpoint and a transport handle; every call is a
/// single independent round trip, so the client can be cloned or shared
/// across tasks freely. The device is the only source of truth.
#[derive(Clone)]
pub struct EffectsClient<T = HttpTransport> {
    /// `<url>/<token>/effects`; never logged
    endpoint: String,
    transport: T,
}

impl EffectsClient<HttpTransport> {
    /// Creates a client using a default [`HttpTransport`]
    pub fn new(config: &DeviceConfig) -> Self {
        Self::with_transport(config, HttpTransport::new())
    }
}

impl<T: Transport> EffectsClient<T> {
    /// Creates a client on top of any transport
    pub fn with_transport(config: &DeviceConfig, transport: T) -> Self {
        Self {
            endpoint: config.effects_endpoint(),
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `<endpoint>/<path>`, expecting 200
    async fn fetch(&self, path: &str, target: Target) -> Result<Vec<u8>> {
        debug!("GET effects/{}", path);
        let url = format!("{}/{}", self.endpoint, path);
        let response = self.transport.get(&url).await?;
        status::check(&response, Expect::Body, target)?;
        Ok(response.body)
    }

    /// PUT `envelope` to the endpoint root
    async fn send<B: Serialize>(
        &self,
        envelope: &B,
        expect: Expect,
        target: Target,
    ) -> Result<Vec<u8>> {
        let body = envelope::to_body(envelope)?;
        debug!("PUT effects with {} byte body", body.len());
        let response = self.transport.put(&self.endpoint, body).await?;
        status::check(&response, expect, target)?;
        Ok(response.body)
    }

    /// Names of all effects on the device, in device order
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<String>> {
        let body = self.fetch("effectsList", Target::Endpoint).await?;
        envelope::decode_string_list(&body)
    }

    /// Name of the currently active effect
    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<String> {
        let body = self.fetch("select", Target::Endpoint).await?;
        envelope::decode_string(&body)
    }

    /// Activates the named effect
    #[instrument(skip(self))]
    pub async fn select(&self, name: &str) -> Result<()> {
        self.send(&envelope::select(name), Expect::NoContent, Target::Effect)
            .await?;
        Ok(())
    }

    /// Full definition of one effect
    #[instrument(skip(self))]
    pub async fn fetch_effect(&self, name: &str) -> Result<EffectData> {
        let body = self
            .send(&envelope::request(name), Expect::Body, Target::Effect)
            .await?;
        envelope::decode_effect_data(&body)
    }

    /// Definitions of every effect on the device
    #[instrument(skip(self))]
    pub async fn fetch_all_effects(&self) -> Result<Vec<EffectData>> {
        let body = self
            .send(&envelope::request_all(), Expect::Body, Target::Effect)
            .await?;
        envelope::decode_effect_data_list(&body)
    }

    #[instrument(skip(self))]
    pub async fn rename(&self, name: &str, new_name: &str) -> Result<()> {
        self.send(
            &envelope::rename(name, new_name),
            Expect::NoContent,
            Target::Effect,
        )
        .await?;
        Ok(())
    }

    /// Creates or overwrites the effect `name`
    ///
    /// The command and name fields of `data` are replaced before sending.
    #[instrument(skip(self, data))]
    pub async fn add_or_update(&self, data: EffectData, name: &str) -> Result<()> {
        self.send(&envelope::add(data, name), Expect::NoContent, Target::Effect)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.send(&envelope::delete(name), Expect::NoContent, Target::Effect)
            .await?;
        Ok(())
    }

    /// Immediately shows a custom RGB animation in its encoded form
    #[instrument(skip(self, anim_data))]
    pub async fn display(&self, anim_data: &str, looped: bool) -> Result<()> {
        self.send(
            &envelope::display(anim_data, looped),
            Expect::NoContent,
            Target::Endpoint,
        )
        .await?;
        Ok(())
    }

    /// Encodes `animation` and shows it
    #[instrument(skip_all, fields(panels = animation.panels.len()))]
    pub async fn display_animation(&self, animation: &StreamAnimation, looped: bool) -> Result<()> {
        self.display(&animation.encode(), looped).await
    }

    /// Shows the named effect for `duration`, after which the device reverts
    ///
    /// Returns once the device acknowledges; the timer runs on the device.
    #[instrument(skip(self))]
    pub async fn display_temporary(&self, name: &str, duration: Duration) -> Result<()> {
        self.send(
            &envelope::display_temp(name, duration),
            Expect::NoContent,
            Target::Effect,
        )
        .await?;
        Ok(())
    }

    /// Sends `payload` verbatim under `write`
    #[instrument(skip_all)]
    pub async fn raw_write(&self, payload: serde_json::Value) -> Result<()> {
        self.send(&envelope::raw(payload), Expect::NoContent, Target::Endpoint)
            .await?;
        Ok(())
    }
}

/*!
 # Command envelopes

 Every mutation goes to the same endpoint wrapped in either a `select`
 or a `write` object. The `write` payload carries a `command` tag that
 picks the operation; each command gets its own builder and struct here
 so that the shape on the wire is fixed by the type.

 Decoding helpers turn response bodies into typed values. Any decode
 failure is reported as [`Error::MalformedResponse`].
*/

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::effects::EffectData;
use crate::{Error, Result};

/// Command tag placed inside a `write` envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    Request,
    RequestAll,
    Rename,
    Add,
    Delete,
    Display,
    DisplayTemp,
}

impl Command {
    /// Tag as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Request => "request",
            Command::RequestAll => "requestAll",
            Command::Rename => "rename",
            Command::Add => "add",
            Command::Delete => "delete",
            Command::Display => "display",
            Command::DisplayTemp => "displayTemp",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{"select": <name>}`
#[derive(Debug, Clone, Serialize)]
pub struct Select<'a> {
    pub select: &'a str,
}

/// `{"write": <payload>}`
#[derive(Debug, Clone, Serialize)]
pub struct Write<T> {
    pub write: T,
}

/// Payload for commands that only name an effect
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedEffect<'a> {
    pub command: Command,
    pub anim_name: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestAll {
    pub command: Command,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rename<'a> {
    pub command: Command,
    pub anim_name: &'a str,
    pub new_name: &'a str,
}

/// Live custom animation, always RGB
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Display<'a> {
    pub command: Command,
    pub anim_type: &'static str,
    pub color_type: &'static str,
    pub anim_data: &'a str,
    #[serde(rename = "loop")]
    pub looped: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayTemp<'a> {
    pub command: Command,
    /// Seconds
    pub duration: u64,
    pub anim_name: &'a str,
}

pub fn select(name: &str) -> Select<'_> {
    Select { select: name }
}

pub fn request(name: &str) -> Write<NamedEffect<'_>> {
    Write {
        write: NamedEffect {
            command: Command::Request,
            anim_name: name,
        },
    }
}

pub fn request_all() -> Write<RequestAll> {
    Write {
        write: RequestAll {
            command: Command::RequestAll,
        },
    }
}

pub fn rename<'a>(name: &'a str, new_name: &'a str) -> Write<Rename<'a>> {
    Write {
        write: Rename {
            command: Command::Rename,
            anim_name: name,
            new_name,
        },
    }
}

/// Wraps `data` for an add/update, overwriting its command and name
pub fn add(mut data: EffectData, name: &str) -> Write<EffectData> {
    data.command = Some(Command::Add.as_str().to_owned());
    data.name = name.to_owned();
    Write { write: data }
}

pub fn delete(name: &str) -> Write<NamedEffect<'_>> {
    Write {
        write: NamedEffect {
            command: Command::Delete,
            anim_name: name,
        },
    }
}

pub fn display(anim_data: &str, looped: bool) -> Write<Display<'_>> {
    Write {
        write: Display {
            command: Command::Display,
            anim_type: "custom",
            color_type: "RGB",
            anim_data,
            looped,
        },
    }
}

/// The device only takes whole seconds, so partial seconds round up
pub fn display_temp(name: &str, duration: Duration) -> Write<DisplayTemp<'_>> {
    let seconds = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
    Write {
        write: DisplayTemp {
            command: Command::DisplayTemp,
            duration: seconds,
            anim_name: name,
        },
    }
}

/// Caller payload sent verbatim under `write`
pub fn raw(payload: serde_json::Value) -> Write<serde_json::Value> {
    Write { write: payload }
}

/// Serializes a request body
pub fn to_body<T: Serialize>(envelope: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(envelope).map_err(Error::RequestEncoding)
}

#[derive(Deserialize)]
struct Animations {
    animations: Vec<EffectData>,
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        trace!("Undecodable body: {}", String::from_utf8_lossy(body));
        Error::MalformedResponse(e)
    })
}

/// Effect names in device order
pub fn decode_string_list(body: &[u8]) -> Result<Vec<String>> {
    decode(body)
}

pub fn decode_string(body: &[u8]) -> Result<String> {
    decode(body)
}

pub fn decode_effect_data(body: &[u8]) -> Result<EffectData> {
    decode(body)
}

/// Unwraps `{"animations": [...]}`
pub fn decode_effect_data_list(body: &[u8]) -> Result<Vec<EffectData>> {
    decode::<Animations>(body).map(|a| a.animations)
}

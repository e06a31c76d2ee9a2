/*!
 # Effect definitions

 Value types describing an effect as stored on the device. They are
 decoded from device responses and sent back when adding or updating
 effects; nothing here is cached client-side.
*/

use serde::{Deserialize, Serialize};

/// Full definition of an effect
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectData {
    /// Operation tag; filled in by the client, never by callers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Whether the animation loops
    #[serde(rename = "loop", default, skip_serializing_if = "Option::is_none")]
    pub looped: Option<bool>,
    /// Effect name, unique on the device
    #[serde(rename = "animName")]
    pub name: String,
    /// Animation type, e.g. `custom` or `plugin`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anim_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Positional animation data, see [`crate::stream`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anim_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub palette: Vec<PaletteColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugin_options: Vec<PluginOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overlay_palette: Vec<PaletteColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_color_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_overlay: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_panels_enabled: Option<bool>,
}

impl EffectData {
    /// Creates an otherwise empty definition for the given effect name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// One weighted color of an effect palette
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PaletteColor {
    /// Hue (0-360)
    #[serde(default)]
    pub hue: u16,
    /// Saturation (0-100)
    #[serde(default)]
    pub saturation: u8,
    /// Brightness (0-100)
    #[serde(default)]
    pub brightness: u8,
    /// Selection weight within the palette (0.0-1.0)
    #[serde(default)]
    pub probability: f64,
}

/// Named plugin setting; the value type comes from the plugin schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginOption {
    pub name: String,
    pub value: PluginValue,
}

impl PluginOption {
    pub fn new(name: impl Into<String>, value: impl Into<PluginValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Value of a plugin option
///
/// Serialized as the bare JSON primitive. Integers are tried before
/// floats when decoding, so `5` becomes `Int` and `5.0` becomes `Float`.
/// Integers above `i64::MAX` decode as `UInt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
}

impl From<bool> for PluginValue {
    fn from(value: bool) -> Self {
        PluginValue::Bool(value)
    }
}

impl From<i64> for PluginValue {
    fn from(value: i64) -> Self {
        PluginValue::Int(value)
    }
}

impl From<u64> for PluginValue {
    fn from(value: u64) -> Self {
        PluginValue::UInt(value)
    }
}

impl From<f64> for PluginValue {
    fn from(value: f64) -> Self {
        PluginValue::Float(value)
    }
}

impl From<&str> for PluginValue {
    fn from(value: &str) -> Self {
        PluginValue::String(value.to_owned())
    }
}

impl From<String> for PluginValue {
    fn from(value: String) -> Self {
        PluginValue::String(value)
    }
}

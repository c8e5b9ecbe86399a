//! Profile properties and the textures payload embedded in them.
//!
//! Properties arrive as `{name, value, signature?}` blobs. Known names are
//! specialized into richer types at construction time; currently the only
//! known kind is `textures`, a base64-encoded JSON bundle with the skin and
//! cape URLs.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;

use crate::errors::Result;

/// Property blob as it appears on the wire
#[derive(Debug, Clone, Deserialize)]
pub struct RawProperty {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub signature: Option<String>,
}

/// A profile property, specialized by name with a plain fallback
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawProperty")]
pub enum Property {
    Textures(TexturesProperty),
    Other { name: String, value: String },
}

impl From<RawProperty> for Property {
    fn from(raw: RawProperty) -> Self {
        match raw.name.as_str() {
            TexturesProperty::NAME => Self::Textures(TexturesProperty {
                value: raw.value,
                signature: raw.signature,
            }),
            _ => Self::Other {
                name: raw.name,
                value: raw.value,
            },
        }
    }
}

impl Property {
    pub fn name(&self) -> &str {
        match self {
            Self::Textures(_) => TexturesProperty::NAME,
            Self::Other { name, .. } => name,
        }
    }

    /// Raw (still encoded) property value
    pub fn value(&self) -> &str {
        match self {
            Self::Textures(textures) => &textures.value,
            Self::Other { value, .. } => value,
        }
    }

    pub fn as_textures(&self) -> Option<&TexturesProperty> {
        match self {
            Self::Textures(textures) => Some(textures),
            Self::Other { .. } => None,
        }
    }
}

/// The `textures` property. The payload stays encoded until
/// [`TexturesProperty::textures`] is called.
#[derive(Debug, Clone)]
pub struct TexturesProperty {
    pub value: String,
    pub signature: Option<String>,
}

impl TexturesProperty {
    pub const NAME: &'static str = "textures";

    /// Decodes the base64 + JSON payload.
    ///
    /// Malformed base64, malformed JSON and missing required keys are
    /// decode errors, never silent defaults.
    pub fn textures(&self) -> Result<TexturesPropertyValue> {
        let raw = BASE64.decode(&self.value)?;
        let decoded: RawTexturesValue = serde_json::from_slice(&raw)?;

        Ok(decoded.into())
    }
}

/// Decoded contents of a `textures` property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexturesPropertyValue {
    /// Profile uuid without dashes
    pub profile_id: String,
    pub profile_name: String,
    /// Seconds, floored from upstream milliseconds
    pub timestamp: u64,
    pub signature_required: bool,
    pub skin: Option<Skin>,
    pub cape: Option<Cape>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skin {
    pub url: String,
    pub is_slim: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cape {
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTexturesValue {
    profile_id: String,
    profile_name: String,
    /// Milliseconds
    timestamp: u64,
    #[serde(default)]
    signature_required: bool,
    textures: RawTexturesMap,
}

#[derive(Debug, Deserialize)]
struct RawTexturesMap {
    #[serde(rename = "SKIN")]
    skin: Option<RawSkin>,
    #[serde(rename = "CAPE")]
    cape: Option<RawCape>,
}

#[derive(Debug, Deserialize)]
struct RawSkin {
    url: String,
    #[serde(default)]
    metainfo: Option<RawSkinMetainfo>,
}

#[derive(Debug, Deserialize)]
struct RawSkinMetainfo {
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCape {
    url: String,
}

impl From<RawTexturesValue> for TexturesPropertyValue {
    fn from(raw: RawTexturesValue) -> Self {
        Self {
            profile_id: raw.profile_id,
            profile_name: raw.profile_name,
            timestamp: raw.timestamp / 1000,
            signature_required: raw.signature_required,
            skin: raw.textures.skin.map(|skin| Skin {
                url: skin.url,
                is_slim: skin
                    .metainfo
                    .and_then(|metainfo| metainfo.model)
                    .is_some_and(|model| model == "slim"),
            }),
            cape: raw.textures.cape.map(|cape| Cape { url: cape.url }),
        }
    }
}

//! Serde model of the animation-tool export format (bodymovin-style JSON).
//!
//! The wire format is loosely typed: a property value `k` may be a scalar, a
//! vector, or a list of keyframe objects, and keyframe fields may hold either
//! scalars or vectors. Deserialization is deliberately lenient here; semantic
//! validation (missing times, missing start/end pairs) happens in
//! `keyframer-core` where the offending layer and property can be named.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnimationJson {
    #[serde(default)]
    pub v: Option<String>,
    #[serde(default)]
    pub nm: Option<String>,
    pub ip: f32,
    pub op: f32,
    #[serde(default = "default_frame_rate")]
    pub fr: f32,
    #[serde(default)]
    pub w: Option<u32>,
    #[serde(default)]
    pub h: Option<u32>,
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

fn default_frame_rate() -> f32 {
    30.0
}

impl AnimationJson {
    /// Look up an image asset by the id a layer references through `refId`.
    pub fn asset(&self, ref_id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == ref_id)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Layer {
    #[serde(default)]
    pub ty: u8,
    #[serde(default)]
    pub ind: Option<u32>,
    #[serde(default)]
    pub nm: Option<String>,
    #[serde(default)]
    pub ip: f32,
    #[serde(default)]
    pub op: f32,
    #[serde(default)]
    pub st: f32,
    #[serde(default)]
    pub ks: Transform,
    #[serde(default, rename = "refId")]
    pub ref_id: Option<String>,
}

impl Layer {
    /// The name used for generated CSS selectors and diagnostics.
    ///
    /// Authoring tools often wrap the export-facing identifier in brackets,
    /// e.g. `"header (logo-spin)"`; when such a token exists it wins over the
    /// full layer name.
    pub fn display_name(&self) -> String {
        if let Some(nm) = &self.nm {
            if let Some(token) = bracketed_token(nm) {
                return token;
            }
            if !nm.is_empty() {
                return nm.clone();
            }
        }
        format!("layer-{}", self.ind.unwrap_or(0))
    }
}

fn bracketed_token(name: &str) -> Option<String> {
    const OPEN: [char; 4] = ['(', '[', '{', '\u{ff08}'];
    const CLOSE: [char; 4] = [')', ']', '}', '\u{ff09}'];
    let start = name.find(|c: char| OPEN.contains(&c))?;
    let rest = &name[start..];
    let open_len = rest.chars().next()?.len_utf8();
    let inner = &rest[open_len..];
    let end = inner.find(|c: char| CLOSE.contains(&c))?;
    let token = &inner[..end];
    // A usable token starts with a word character and is at least two
    // characters long; the tail may also contain dashes.
    let mut chars = token.chars();
    let head_ok = chars
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_');
    let mut rest = chars.peekable();
    let tail_ok = rest.peek().is_some()
        && rest.all(|c| c.is_alphanumeric() || c == '_' || c == '-');
    if head_ok && tail_ok {
        Some(token.to_string())
    } else {
        None
    }
}

/// The per-layer transform block (`ks`): one entry per animatable property.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Transform {
    /// Anchor point (`transform-origin`).
    #[serde(default)]
    pub a: Property,
    /// Position.
    #[serde(default)]
    pub p: Property,
    /// Scale.
    #[serde(default)]
    pub s: Property,
    /// Rotation in degrees.
    #[serde(default, alias = "rz")]
    pub r: Property,
    /// Opacity, 0..100.
    #[serde(default)]
    pub o: Property,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Property {
    /// 1 when the authoring tool marked this property as keyed.
    #[serde(default)]
    pub a: u8,
    #[serde(default)]
    pub k: Value,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub enum Value {
    /// Field absent from the export; callers substitute the semantic default.
    #[default]
    Default,
    /// A constant value; scalars are widened to one-element vectors.
    Static(Vec<f32>),
    /// A list of authored keyframes.
    Animated(Vec<Keyframe>),
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = serde_json::Value::deserialize(deserializer)?;

        if v.is_null() {
            return Ok(Value::Default);
        }

        // Keyframe lists are arrays of objects; plain vectors are arrays of
        // numbers. Disambiguate on the first element.
        if let serde_json::Value::Array(arr) = &v {
            if arr.first().is_some_and(|first| first.is_object()) {
                if let Ok(keys) = serde_json::from_value::<Vec<Keyframe>>(v.clone()) {
                    return Ok(Value::Animated(keys));
                }
            }
        }

        if let Some(n) = v.as_f64() {
            return Ok(Value::Static(vec![n as f32]));
        }

        if let Ok(vec) = serde_json::from_value::<Vec<f32>>(v) {
            return Ok(Value::Static(vec));
        }

        Ok(Value::Default)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Keyframe {
    /// Frame number of this keyframe. `None` when the export carried a
    /// missing or non-numeric time; surfaced as a validation error later.
    #[serde(default, deserialize_with = "deserialize_key_time")]
    pub t: Option<f32>,
    /// Value at the start of the segment this keyframe opens.
    #[serde(default, deserialize_with = "deserialize_key_value")]
    pub s: Option<Vec<f32>>,
    /// Value at the end of the segment this keyframe opens.
    #[serde(default, deserialize_with = "deserialize_key_value")]
    pub e: Option<Vec<f32>>,
}

fn deserialize_key_time<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(deserializer)?;
    Ok(v.as_f64().map(|n| n as f32))
}

fn deserialize_key_value<'de, D>(deserializer: D) -> Result<Option<Vec<f32>>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(deserializer)?;
    if v.is_null() {
        return Ok(None);
    }

    if let Some(n) = v.as_f64() {
        return Ok(Some(vec![n as f32]));
    }

    if let Ok(vec) = serde_json::from_value::<Vec<f32>>(v) {
        return Ok(Some(vec));
    }

    Ok(None)
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Asset {
    pub id: String,
    #[serde(default)]
    pub nm: Option<String>,
    #[serde(default)]
    pub w: Option<u32>,
    #[serde(default)]
    pub h: Option<u32>,
    /// Directory of the image file, e.g. `"images/"`.
    #[serde(default)]
    pub u: Option<String>,
    /// File name of the image.
    #[serde(default)]
    pub p: Option<String>,
}

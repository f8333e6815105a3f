//! Capabilities the player consumes from the rasterization engine and the
//! output surface. Nothing in this crate rasterizes; implementations live with
//! the host.

use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;
use crate::gate::DamageRect;

/// Kinds of content a backend can load
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Lottie JSON
    #[default]
    Json,
    /// Lottie LOT
    Lot,
    Jpg,
    Png,
    Svg,
}

impl FileType {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Lot => "lot",
            Self::Jpg => "jpg",
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    /// Only lottie content has a timeline; the rest renders once
    #[inline]
    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Json | Self::Lot)
    }
}

impl std::str::FromStr for FileType {
    type Err = PlaybackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "lot" => Ok(Self::Lot),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            other => Err(PlaybackError::Config {
                reason: format!("unknown file type '{other}'"),
            }),
        }
    }
}

/// Where animation content comes from. The backend interprets it.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimationSource {
    Bytes(Vec<u8>),
    Url(String),
    Json(serde_json::Value),
}

impl AnimationSource {
    /// Short description for logs
    pub fn describe(&self) -> String {
        match self {
            Self::Bytes(bytes) => format!("{} bytes", bytes.len()),
            Self::Url(url) => format!("url {url}"),
            Self::Json(_) => "inline json".to_string(),
        }
    }
}

impl From<Vec<u8>> for AnimationSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<serde_json::Value> for AnimationSource {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

/// RGBA background color, written as `#rgb`, `#rrggbb` or `#rrggbbaa`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: &str) -> Result<Self, PlaybackError> {
        let invalid = || PlaybackError::Config {
            reason: format!("invalid color '{hex}'"),
        };
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.is_ascii() {
            return Err(invalid());
        }
        let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).map_err(|_| invalid());
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        match digits.len() {
            3 => Ok(Self::rgba(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17, 255)),
            6 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl TryFrom<String> for Color {
    type Error = PlaybackError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Area of the surface an animation renders into
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
        }
    }
}

/// Opaque drawing target handed to [`RenderableAnimation::render`].
/// Renderers downcast to the concrete context they know how to fill.
pub trait DrawContext {
    fn size(&self) -> (u32, u32);
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Output surface owned by one player
pub trait Surface {
    /// Acquire the drawing context for this frame
    fn context(&mut self) -> Result<&mut dyn DrawContext, PlaybackError>;

    /// Drawable area
    fn bounds(&self) -> Rect;

    fn clear(&mut self, color: Color) -> Result<(), PlaybackError>;

    /// Flush the drawn frame to the display
    fn present(&mut self) -> Result<(), PlaybackError>;

    fn resize(&mut self, width: u32, height: u32);
}

/// A loaded animation inside the rasterization engine
pub trait RenderableAnimation {
    /// Timeline length in seconds
    fn duration(&self) -> f64;

    fn fps(&self) -> f64;

    /// Move to `fraction` and report what changed
    fn seek(&mut self, fraction: f64) -> Result<DamageRect, PlaybackError>;

    fn render(&mut self, context: &mut dyn DrawContext, bounds: Rect) -> Result<(), PlaybackError>;

    /// Release engine resources. Called once before the handle is dropped.
    fn dispose(&mut self);
}

/// Entry point into the rasterization engine
pub trait AnimationBackend {
    fn load(
        &mut self,
        source: &AnimationSource,
        file_type: FileType,
        width: u32,
        height: u32,
    ) -> Result<Box<dyn RenderableAnimation>, PlaybackError>;
}

//! Textual edit syntax used on the command line
//!
//! | Directive                  | Edit                          |
//! |----------------------------|-------------------------------|
//! | `scale=1280:720`           | resize                        |
//! | `scale-width=1280`         | resize by width               |
//! | `scale-height=720`         | resize by height              |
//! | `trim=5,1:30`              | trim (any [`TimeSpec`] form)  |
//! | `crop=640:360[:x:y]`       | crop                          |
//! | `crop-top=40` (`-bottom`, `-left`, `-right`) | crop out an edge |
//! | `blur=10`                  | box blur                      |
//! | `aspect=16:9` / `aspect=shorts` | display aspect ratio     |
//! | `volume=0.5`, `mute`       | volume                        |
//! | `nightcore`, `bass-boost`, `speed=1.25` | audio effects    |

use std::fmt;
use std::str::FromStr;

use crate::domain::errors::DomainError;
use crate::domain::model::{AspectRatio, TimeSpec};
use crate::media::MediaAsset;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditDirective {
    Resize { width: u32, height: u32 },
    ResizeByWidth(u32),
    ResizeByHeight(u32),
    Trim { start: TimeSpec, end: TimeSpec },
    Crop { width: u32, height: u32, x: u32, y: u32 },
    CropOutTop(u32),
    CropOutBottom(u32),
    CropOutLeft(u32),
    CropOutRight(u32),
    Blur(u8),
    Aspect(AspectRatio),
    Volume(f64),
    Mute,
    Nightcore,
    BassBoost,
    Speed(f64),
}

impl EditDirective {
    /// Queue this edit on `asset`
    pub fn apply(&self, asset: &mut MediaAsset) -> Result<(), DomainError> {
        match *self {
            EditDirective::Resize { width, height } => asset.resize(width, height)?,
            EditDirective::ResizeByWidth(width) => asset.resize_by_width(width)?,
            EditDirective::ResizeByHeight(height) => asset.resize_by_height(height)?,
            EditDirective::Trim { start, end } => asset.trim(start, end)?,
            EditDirective::Crop { width, height, x, y } => asset.crop(width, height, x, y)?,
            EditDirective::CropOutTop(pixels) => asset.crop_out_top(pixels)?,
            EditDirective::CropOutBottom(pixels) => asset.crop_out_bottom(pixels)?,
            EditDirective::CropOutLeft(pixels) => asset.crop_out_left(pixels)?,
            EditDirective::CropOutRight(pixels) => asset.crop_out_right(pixels)?,
            EditDirective::Blur(intensity) => asset.blur(intensity)?,
            EditDirective::Aspect(ratio) => asset.set_aspect_ratio(ratio)?,
            EditDirective::Volume(multiplier) => asset.change_volume(multiplier)?,
            EditDirective::Mute => asset.mute()?,
            EditDirective::Nightcore => asset.nightcore()?,
            EditDirective::BassBoost => asset.bass_boost()?,
            EditDirective::Speed(multiplier) => asset.speed_up(multiplier)?,
        };
        Ok(())
    }
}

impl FromStr for EditDirective {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (name, value) = match text.split_once('=') {
            Some((name, value)) => (name.trim().to_lowercase(), Some(value.trim())),
            None => (text.to_lowercase(), None),
        };

        let directive = match (name.as_str(), value) {
            ("mute", None) => EditDirective::Mute,
            ("nightcore", None) => EditDirective::Nightcore,
            ("bass-boost", None) => EditDirective::BassBoost,
            ("scale", Some(value)) => {
                let (width, height) = pair(value, ':', text)?;
                EditDirective::Resize {
                    width: number(width, text)?,
                    height: number(height, text)?,
                }
            }
            ("scale-width", Some(value)) => EditDirective::ResizeByWidth(number(value, text)?),
            ("scale-height", Some(value)) => EditDirective::ResizeByHeight(number(value, text)?),
            ("trim", Some(value)) => {
                let (start, end) = pair(value, ',', text)?;
                EditDirective::Trim {
                    start: TimeSpec::parse(start)?,
                    end: TimeSpec::parse(end)?,
                }
            }
            ("crop", Some(value)) => {
                let parts: Vec<&str> = value.split(':').collect();
                let (width, height, x, y) = match parts.as_slice() {
                    [w, h] => (*w, *h, "0", "0"),
                    [w, h, x, y] => (*w, *h, *x, *y),
                    _ => return Err(malformed(text)),
                };
                EditDirective::Crop {
                    width: number(width, text)?,
                    height: number(height, text)?,
                    x: number(x, text)?,
                    y: number(y, text)?,
                }
            }
            ("crop-top", Some(value)) => EditDirective::CropOutTop(number(value, text)?),
            ("crop-bottom", Some(value)) => EditDirective::CropOutBottom(number(value, text)?),
            ("crop-left", Some(value)) => EditDirective::CropOutLeft(number(value, text)?),
            ("crop-right", Some(value)) => EditDirective::CropOutRight(number(value, text)?),
            ("blur", Some(value)) => EditDirective::Blur(number(value, text)?),
            ("aspect", Some(value)) => EditDirective::Aspect(AspectRatio::parse(value)?),
            ("volume", Some(value)) => EditDirective::Volume(number(value, text)?),
            ("speed", Some(value)) => EditDirective::Speed(number(value, text)?),
            _ => {
                return Err(DomainError::BadArgs(format!(
                    "Unknown edit '{}'. Expected one of: scale, scale-width, scale-height, trim, crop, crop-top, crop-bottom, crop-left, crop-right, blur, aspect, volume, mute, nightcore, bass-boost, speed",
                    text
                )))
            }
        };
        Ok(directive)
    }
}

impl fmt::Display for EditDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditDirective::Resize { width, height } => write!(f, "scale={}:{}", width, height),
            EditDirective::ResizeByWidth(width) => write!(f, "scale-width={}", width),
            EditDirective::ResizeByHeight(height) => write!(f, "scale-height={}", height),
            EditDirective::Trim { start, end } => write!(f, "trim={},{}", start.seconds, end.seconds),
            EditDirective::Crop { width, height, x, y } => {
                write!(f, "crop={}:{}:{}:{}", width, height, x, y)
            }
            EditDirective::CropOutTop(pixels) => write!(f, "crop-top={}", pixels),
            EditDirective::CropOutBottom(pixels) => write!(f, "crop-bottom={}", pixels),
            EditDirective::CropOutLeft(pixels) => write!(f, "crop-left={}", pixels),
            EditDirective::CropOutRight(pixels) => write!(f, "crop-right={}", pixels),
            EditDirective::Blur(intensity) => write!(f, "blur={}", intensity),
            EditDirective::Aspect(ratio) => write!(f, "aspect={}", ratio.to_arg()),
            EditDirective::Volume(multiplier) => write!(f, "volume={}", multiplier),
            EditDirective::Mute => write!(f, "mute"),
            EditDirective::Nightcore => write!(f, "nightcore"),
            EditDirective::BassBoost => write!(f, "bass-boost"),
            EditDirective::Speed(multiplier) => write!(f, "speed={}", multiplier),
        }
    }
}

fn malformed(text: &str) -> DomainError {
    DomainError::BadArgs(format!("Malformed edit '{}'", text))
}

fn pair<'a>(value: &'a str, separator: char, text: &str) -> Result<(&'a str, &'a str), DomainError> {
    value.split_once(separator).ok_or_else(|| malformed(text))
}

fn number<T: FromStr>(value: &str, text: &str) -> Result<T, DomainError> {
    value.trim().parse().map_err(|_| malformed(text))
}

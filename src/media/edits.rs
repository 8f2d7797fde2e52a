// Edit builders - typed constructors for every supported edit

use crate::domain::errors::DomainError;
use crate::domain::model::{AspectRatio, Category, EditRequest, MediaKind, TimeSpec};
use crate::media::{MediaAsset, MediaSource};

pub const MAX_BLUR: u8 = 50;
pub const MAX_VOLUME: f64 = 100.0;
/// Range ffmpeg's `atempo` accepts
pub const TEMPO_RANGE: std::ops::RangeInclusive<f64> = 0.5..=100.0;

const NIGHTCORE: &str = "asetrate=44100*1.25,atempo=1.25";
const BASS_BOOST: &str = "equalizer=f=80:width_type=h:width=50:g=12";

impl MediaAsset {
    fn require(&self, kind: MediaKind, edit: &str) -> Result<(), DomainError> {
        if self.kind() == kind {
            Ok(())
        } else {
            Err(DomainError::UnsupportedEdit(format!(
                "{} is only available for {} files",
                edit, kind
            )))
        }
    }

    fn filter(&mut self, key: &str, expression: String) -> Result<&mut Self, DomainError> {
        self.push_edit(EditRequest::expr(Category::COMPOSABLE_FILTER, key, expression))
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<&mut Self, DomainError> {
        self.require(MediaKind::Video, "resize")?;
        positive(width, "width")?;
        positive(height, "height")?;
        self.filter("scale", format!("scale={}:{}", width, height))
    }

    /// Scale to `width`, keeping the aspect ratio
    pub fn resize_by_width(&mut self, width: u32) -> Result<&mut Self, DomainError> {
        self.require(MediaKind::Video, "resize")?;
        positive(width, "width")?;
        self.filter("scale", format!("scale={}:-1", width))
    }

    /// Scale to `height`, keeping the aspect ratio
    pub fn resize_by_height(&mut self, height: u32) -> Result<&mut Self, DomainError> {
        self.require(MediaKind::Video, "resize")?;
        positive(height, "height")?;
        self.filter("scale", format!("scale=-1:{}", height))
    }

    pub fn trim(&mut self, start: TimeSpec, end: TimeSpec) -> Result<&mut Self, DomainError> {
        self.push_edit(EditRequest::trim(start, end)?)
    }

    /// Crop a `width`x`height` window whose top-left corner is at (`x`, `y`)
    pub fn crop(&mut self, width: u32, height: u32, x: u32, y: u32) -> Result<&mut Self, DomainError> {
        self.require(MediaKind::Video, "crop")?;
        positive(width, "width")?;
        positive(height, "height")?;
        self.filter("crop", format!("crop={}:{}:{}:{}", width, height, x, y))
    }

    pub fn crop_out_top(&mut self, pixels: u32) -> Result<&mut Self, DomainError> {
        self.require(MediaKind::Video, "crop")?;
        self.filter("crop", format!("crop=in_w:in_h-{}:0:{}", pixels, pixels))
    }

    pub fn crop_out_bottom(&mut self, pixels: u32) -> Result<&mut Self, DomainError> {
        self.require(MediaKind::Video, "crop")?;
        self.filter("crop", format!("crop=in_w:in_h-{}:0:0", pixels))
    }

    pub fn crop_out_left(&mut self, pixels: u32) -> Result<&mut Self, DomainError> {
        self.require(MediaKind::Video, "crop")?;
        self.filter("crop", format!("crop=in_w-{}:in_h:{}:0", pixels, pixels))
    }

    pub fn crop_out_right(&mut self, pixels: u32) -> Result<&mut Self, DomainError> {
        self.require(MediaKind::Video, "crop")?;
        self.filter("crop", format!("crop=in_w-{}:in_h:0:0", pixels))
    }

    /// Box blur, intensity 0 to 50
    pub fn blur(&mut self, intensity: u8) -> Result<&mut Self, DomainError> {
        self.require(MediaKind::Video, "blur")?;
        if intensity > MAX_BLUR {
            return Err(DomainError::BadArgs(format!(
                "Blur intensity must be between 0 and {}: {}",
                MAX_BLUR, intensity
            )));
        }
        self.filter("blur", format!("boxblur={}", intensity))
    }

    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) -> Result<&mut Self, DomainError> {
        self.require(MediaKind::Video, "aspect ratio")?;
        self.push_edit(EditRequest::expr(Category::ASPECT, "aspect", ratio.to_arg()))
    }

    /// Multiply the volume, 0 to 100
    pub fn change_volume(&mut self, multiplier: f64) -> Result<&mut Self, DomainError> {
        if !multiplier.is_finite() || !(0.0..=MAX_VOLUME).contains(&multiplier) {
            return Err(DomainError::BadArgs(format!(
                "Volume multiplier must be between 0 and {}: {}",
                MAX_VOLUME, multiplier
            )));
        }
        self.push_edit(EditRequest::expr(
            Category::AUDIO_FILTER,
            "volume",
            format!("volume={}", multiplier),
        ))
    }

    pub fn mute(&mut self) -> Result<&mut Self, DomainError> {
        self.push_edit(EditRequest::expr(Category::AUDIO_FILTER, "volume", "volume=0"))
    }

    /// Pitch and tempo up by 25%
    pub fn nightcore(&mut self) -> Result<&mut Self, DomainError> {
        self.require(MediaKind::Audio, "nightcore")?;
        self.filter("nightcore", NIGHTCORE.to_string())
    }

    /// +12 dB around 80 Hz
    pub fn bass_boost(&mut self) -> Result<&mut Self, DomainError> {
        self.require(MediaKind::Audio, "bass boost")?;
        self.push_edit(EditRequest::expr(Category::EQUALIZER, "equalizer", BASS_BOOST))
    }

    /// Change tempo without changing pitch
    pub fn speed_up(&mut self, multiplier: f64) -> Result<&mut Self, DomainError> {
        self.require(MediaKind::Audio, "speed change")?;
        if !TEMPO_RANGE.contains(&multiplier) {
            return Err(DomainError::BadArgs(format!(
                "Speed multiplier must be between {} and {}: {}",
                TEMPO_RANGE.start(),
                TEMPO_RANGE.end(),
                multiplier
            )));
        }
        self.push_edit(EditRequest::expr(
            Category::AUDIO_FILTER,
            "tempo",
            format!("atempo={}", multiplier),
        ))
    }
}

fn positive(value: u32, name: &str) -> Result<(), DomainError> {
    if value == 0 {
        return Err(DomainError::BadArgs(format!("{} must be greater than 0", name)));
    }
    Ok(())
}

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    Low,
    Medium,
    High,
}

impl Quality {
    pub const NAMES: &'static [&'static str] = &["low", "medium", "high"];

    /// Maps a selector to a quality level, falling back to `Medium` for
    /// anything unrecognized.
    pub fn from_selector(selector: &str) -> Quality {
        selector.parse().unwrap_or(Quality::Medium)
    }

    pub fn name(self) -> &'static str {
        match self {
            Quality::Low => "low",
            Quality::Medium => "medium",
            Quality::High => "high",
        }
    }

    pub fn preset(self) -> &'static QualityPreset {
        match self {
            Quality::Low => &LOW,
            Quality::Medium => &MEDIUM,
            Quality::High => &HIGH,
        }
    }
}

impl Default for Quality {
    fn default() -> Self {
        Quality::Medium
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Quality {
    type Err = UnknownQuality;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Quality::Low),
            "medium" => Ok(Quality::Medium),
            "high" => Ok(Quality::High),
            _ => Err(UnknownQuality { name: s.to_owned() }),
        }
    }
}

#[derive(Debug)]
pub struct UnknownQuality {
    name: String,
}

impl fmt::Display for UnknownQuality {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown quality '{}' (expected one of {})", self.name, Quality::NAMES.join(", "))
    }
}

impl std::error::Error for UnknownQuality {}

#[derive(Debug)]
pub struct QualityPreset {
    pub resolution: &'static str,
    pub video_bitrate: &'static str,
    pub audio_bitrate: &'static str,
    pub fps: &'static str,
}

static LOW: QualityPreset = QualityPreset {
    resolution: "176x144",
    video_bitrate: "30k",
    audio_bitrate: "8k",
    fps: "8",
};

static MEDIUM: QualityPreset = QualityPreset {
    resolution: "320x240",
    video_bitrate: "80k",
    audio_bitrate: "24k",
    fps: "12",
};

static HIGH: QualityPreset = QualityPreset {
    resolution: "480x360",
    video_bitrate: "250k",
    audio_bitrate: "48k",
    fps: "20",
};

/// User supplied replacements for individual preset fields.
///
/// A field only takes effect when it is present and non-empty.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub resolution: Option<String>,
    pub fps: Option<String>,
    pub video_bitrate: Option<String>,
    pub audio_bitrate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub resolution: String,
    pub video_bitrate: String,
    pub audio_bitrate: String,
    pub fps: String,
}

impl EffectiveConfig {
    pub fn new(quality: Quality, overrides: &Overrides) -> Self {
        let mut config = EffectiveConfig::from(quality.preset());

        replace(&mut config.resolution, &overrides.resolution);
        replace(&mut config.video_bitrate, &overrides.video_bitrate);
        replace(&mut config.audio_bitrate, &overrides.audio_bitrate);
        replace(&mut config.fps, &overrides.fps);

        config
    }
}

impl From<&QualityPreset> for EffectiveConfig {
    fn from(preset: &QualityPreset) -> Self {
        EffectiveConfig {
            resolution: preset.resolution.to_owned(),
            video_bitrate: preset.video_bitrate.to_owned(),
            audio_bitrate: preset.audio_bitrate.to_owned(),
            fps: preset.fps.to_owned(),
        }
    }
}

impl fmt::Display for EffectiveConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}, {}fps, {} video, {} audio",
            self.resolution,
            self.fps,
            self.video_bitrate,
            self.audio_bitrate,
        )
    }
}

/// Builds the effective configuration for a raw quality selector.
pub fn build_config(selector: &str, overrides: &Overrides) -> EffectiveConfig {
    EffectiveConfig::new(Quality::from_selector(selector), overrides)
}

fn replace(field: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        if !value.is_empty() {
            *field = value.clone();
        }
    }
}

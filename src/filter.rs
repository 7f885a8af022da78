use std::fmt;

/// Scaler that keeps hard pixel edges instead of interpolating them away.
pub const SCALE_FLAGS: &str = "neighbor";

pub struct FilterConfig<'a> {
    pub fps: &'a str,
    pub resolution: &'a str,
}

/// Builds the `-vf` expression: drop the frame rate first, then rescale
/// with the nearest neighbor scaler.
pub fn generate(config: FilterConfig) -> String {
    config.to_string()
}

impl fmt::Display for FilterConfig<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let FilterConfig { fps, resolution } = self;

        write!(f, "fps={},scale={}:flags={}", fps, resolution, SCALE_FLAGS)
    }
}

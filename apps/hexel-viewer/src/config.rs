//! Viewer configuration.

use anyhow::{bail, Context};
use hexel_voxel::FaceFlags;

/// Settings for a viewer session.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Session title, used in log output.
    pub title: String,
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
    /// Number of frames to run.
    pub frames: u32,
    /// Fixed frame time in seconds.
    pub dt: f32,
    /// Visible faces of every voxel.
    pub faces: FaceFlags,
    /// Number of voxels, laid out in a row along +X.
    pub voxels: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Hexel Viewer".to_string(),
            width: 1280,
            height: 720,
            frames: 240,
            dt: 1.0 / 60.0,
            faces: FaceFlags::ALL,
            voxels: 1,
        }
    }
}

impl ViewerConfig {
    /// Set the number of frames to run.
    #[must_use]
    pub fn with_frames(mut self, frames: u32) -> Self {
        self.frames = frames;
        self
    }

    /// Set the visible faces.
    #[must_use]
    pub fn with_faces(mut self, faces: FaceFlags) -> Self {
        self.faces = faces;
        self
    }

    /// Viewport aspect ratio.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Apply command line flags on top of this config.
    pub fn parse_args<I>(mut self, args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            let mut value = || {
                args.next()
                    .with_context(|| format!("missing value for {flag}"))
            };
            match flag.as_str() {
                "--frames" => self = self.with_frames(value()?.parse().context("invalid --frames")?),
                "--dt" => self.dt = value()?.parse().context("invalid --dt")?,
                "--width" => self.width = value()?.parse().context("invalid --width")?,
                "--height" => self.height = value()?.parse().context("invalid --height")?,
                "--voxels" => self.voxels = value()?.parse().context("invalid --voxels")?,
                "--faces" => self = self.with_faces(parse_faces(&value()?)?),
                other => bail!("unknown argument: {other}"),
            }
        }

        if self.width == 0 || self.height == 0 {
            bail!("viewport must be non-empty, got {}x{}", self.width, self.height);
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            bail!("--dt must be a positive number of seconds, got {}", self.dt);
        }
        Ok(self)
    }

    /// Parse the process arguments.
    pub fn from_args() -> anyhow::Result<Self> {
        Self::default().parse_args(std::env::args().skip(1))
    }
}

/// Parse a face mask given as a decimal or `0x`-prefixed hex byte.
fn parse_faces(text: &str) -> anyhow::Result<FaceFlags> {
    let bits = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => text.parse(),
    }
    .with_context(|| format!("invalid face mask {text:?} (expected a byte)"))?;
    Ok(FaceFlags::from_bits_truncate(bits))
}

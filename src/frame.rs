use anyhow::{bail, Result};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Readiness of the upstream video feed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FeedState {
    Ready,
    Paused,
    Ended,
}

/// Read-only view over one decoded video frame.
pub trait VideoFrame: Send + Sync {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// RGB triple at (x, y). Errors on out-of-bounds reads or corrupt buffers;
    /// the detector converts those into a faceless verdict.
    fn rgb_at(&self, x: u32, y: u32) -> Result<[u8; 3]>;
}

/// Supplies decoded frames to the analysis loop on demand. Acquisition must
/// not block; a frame that is not ready yet is reported as `None`.
pub trait FrameSource: Send + Sync {
    fn feed_state(&self) -> FeedState;

    fn latest_frame(&self) -> Result<Option<Box<dyn VideoFrame>>>;
}

/// `VideoFrame` backed by an owned RGBA buffer.
pub struct ImageFrame {
    buffer: RgbaImage,
}

impl ImageFrame {
    pub fn new(buffer: RgbaImage) -> Self {
        Self { buffer }
    }
}

impl VideoFrame for ImageFrame {
    fn width(&self) -> u32 {
        self.buffer.width()
    }

    fn height(&self) -> u32 {
        self.buffer.height()
    }

    fn rgb_at(&self, x: u32, y: u32) -> Result<[u8; 3]> {
        if x >= self.buffer.width() || y >= self.buffer.height() {
            bail!(
                "pixel ({x}, {y}) outside {}x{} frame",
                self.buffer.width(),
                self.buffer.height()
            );
        }
        let pixel = self.buffer.get_pixel(x, y);
        Ok([pixel[0], pixel[1], pixel[2]])
    }
}

use anyhow::{bail, Result};
use image::{DynamicImage, Rgb, RgbImage};
use image_hasher::{HashAlg, HasherConfig, ImageHash};
use log::debug;

use crate::frame::VideoFrame;

const THUMBNAIL_EDGE: u32 = 64;
const UNCHANGED_DISTANCE_MAX: u32 = 0;

/// Spots a stalled capture pipeline by perceptually hashing successive
/// frames. Distance zero means the source replayed the same image.
pub(super) struct FreezeGuard {
    last_hash: Option<ImageHash>,
}

impl FreezeGuard {
    pub(super) fn new() -> Self {
        Self { last_hash: None }
    }

    /// True when `frame` hashes identically to the previous one. The first
    /// frame, and any unreadable frame, never counts as frozen.
    pub(super) fn is_frozen(&mut self, frame: &dyn VideoFrame) -> bool {
        let hash = match hash_frame(frame) {
            Ok(hash) => hash,
            Err(err) => {
                debug!("freeze check skipped, frame hash failed: {err:#}");
                self.last_hash = None;
                return false;
            }
        };

        let frozen = self
            .last_hash
            .as_ref()
            .map(|prev| prev.dist(&hash) <= UNCHANGED_DISTANCE_MAX)
            .unwrap_or(false);
        self.last_hash = Some(hash);
        frozen
    }
}

fn hash_frame(frame: &dyn VideoFrame) -> Result<ImageHash> {
    let thumb = thumbnail(frame)?;
    let hasher = HasherConfig::new()
        .hash_alg(HashAlg::DoubleGradient)
        .hash_size(8, 8)
        .to_hasher();
    Ok(hasher.hash_image(&DynamicImage::ImageRgb8(thumb)))
}

/// Downsamples the frame by nearest-neighbor into a small buffer the hasher
/// can chew on without touching every source pixel.
fn thumbnail(frame: &dyn VideoFrame) -> Result<RgbImage> {
    let width = frame.width();
    let height = frame.height();
    if width == 0 || height == 0 {
        bail!("frame has zero dimensions");
    }

    let thumb_width = THUMBNAIL_EDGE.min(width);
    let thumb_height = THUMBNAIL_EDGE.min(height);
    let mut thumb = RgbImage::new(thumb_width, thumb_height);

    for ty in 0..thumb_height {
        let sy = (u64::from(ty) * u64::from(height) / u64::from(thumb_height)) as u32;
        for tx in 0..thumb_width {
            let sx = (u64::from(tx) * u64::from(width) / u64::from(thumb_width)) as u32;
            let [r, g, b] = frame.rgb_at(sx, sy)?;
            thumb.put_pixel(tx, ty, Rgb([r, g, b]));
        }
    }

    Ok(thumb)
}

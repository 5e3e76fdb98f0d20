use anyhow::Result;
use log::debug;

use crate::frame::VideoFrame;

use super::config::DetectorConfig;
use super::skin::{is_skin, luma};
use super::types::{DetectionRegion, PresenceVerdict};

/// Heuristic face-presence detector. Pure function of the frame's pixels;
/// all state lives in the config.
pub struct FaceDetector {
    config: DetectorConfig,
}

#[derive(Default)]
struct RegionScan {
    sampled_pixels: u64,
    skin_pixels: u64,
    left_skin: u64,
    right_skin: u64,
    dark_pixels: u64,
    mid_pixels: u64,
    bright_pixels: u64,
}

impl FaceDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Decides whether a face is plausibly present in `frame`.
    ///
    /// Never errors: unreadable pixels or a degenerate frame produce an
    /// absent verdict so the scoring pipeline keeps running.
    pub fn detect(&self, frame: &dyn VideoFrame) -> PresenceVerdict {
        let width = frame.width();
        let height = frame.height();
        if width == 0 || height == 0 {
            return PresenceVerdict::absent();
        }

        let region = central_region(width, height);
        match self.scan_region(frame, &region) {
            Ok(scan) => self.assemble_verdict(region, &scan),
            Err(err) => {
                debug!("pixel scan failed, treating frame as faceless: {err:#}");
                PresenceVerdict::absent()
            }
        }
    }

    fn scan_region(&self, frame: &dyn VideoFrame, region: &DetectionRegion) -> Result<RegionScan> {
        let stride = self.config.sample_stride.max(1);
        let mid_x = region.x + region.width / 2;
        let mut scan = RegionScan::default();

        let mut y = region.y;
        while y < region.y + region.height {
            let mut x = region.x;
            while x < region.x + region.width {
                let [r, g, b] = frame.rgb_at(x, y)?;
                scan.sampled_pixels += 1;

                if is_skin(r, g, b, &self.config) {
                    scan.skin_pixels += 1;
                    if x < mid_x {
                        scan.left_skin += 1;
                    } else {
                        scan.right_skin += 1;
                    }
                }

                let level = luma(r, g, b);
                if level < self.config.dark_luma_max {
                    scan.dark_pixels += 1;
                } else if level > self.config.bright_luma_min {
                    scan.bright_pixels += 1;
                } else {
                    scan.mid_pixels += 1;
                }

                x += stride;
            }
            y += stride;
        }
        Ok(scan)
    }

    fn assemble_verdict(&self, region: DetectionRegion, scan: &RegionScan) -> PresenceVerdict {
        if scan.sampled_pixels == 0 {
            return PresenceVerdict::absent();
        }

        let sampled = scan.sampled_pixels as f64;
        let skin_ratio = scan.skin_pixels as f64 / sampled;
        let dark_ratio = scan.dark_pixels as f64 / sampled;
        let mid_ratio = scan.mid_pixels as f64 / sampled;
        let bright_ratio = scan.bright_pixels as f64 / sampled;
        let symmetry = symmetry_score(scan.left_skin, scan.right_skin);

        let config = &self.config;
        let skin_ok = skin_ratio > config.skin_ratio_cutoff;
        let light_ok = mid_ratio >= config.mid_ratio_floor
            && (dark_ratio >= config.dark_ratio_floor || bright_ratio >= config.bright_ratio_floor);
        let symmetry_ok = symmetry >= config.symmetry_floor;

        // All three signals must agree; any single one is too noisy alone.
        let detected = skin_ok && light_ok && symmetry_ok;

        let confidence = if detected {
            ((skin_ratio.min(1.0) + mid_ratio + symmetry) / 3.0).clamp(0.0, 1.0)
        } else {
            0.0
        };

        debug!(
            "verdict: skin {skin_ratio:.3} (ok={skin_ok}) mid {mid_ratio:.3} \
             dark {dark_ratio:.3} bright {bright_ratio:.3} (ok={light_ok}) \
             symmetry {symmetry:.3} (ok={symmetry_ok})"
        );

        let mut diagnostics = std::collections::BTreeMap::new();
        diagnostics.insert("skinRatio".to_string(), skin_ratio);
        diagnostics.insert("brightnessRatio".to_string(), mid_ratio);
        diagnostics.insert("darkRatio".to_string(), dark_ratio);
        diagnostics.insert("brightRatio".to_string(), bright_ratio);
        diagnostics.insert("symmetryScore".to_string(), symmetry);
        diagnostics.insert("skinPixels".to_string(), scan.skin_pixels as f64);
        diagnostics.insert("sampledPixels".to_string(), scan.sampled_pixels as f64);

        PresenceVerdict {
            detected,
            confidence,
            region: detected.then_some(region),
            diagnostics,
        }
    }
}

/// Middle third of the frame, biased toward head-and-shoulders framing.
fn central_region(width: u32, height: u32) -> DetectionRegion {
    DetectionRegion {
        x: width / 3,
        y: height / 3,
        width: width / 3,
        height: height / 3,
    }
}

fn symmetry_score(left: u64, right: u64) -> f64 {
    let max = left.max(right);
    if max == 0 {
        return 0.0;
    }
    1.0 - left.abs_diff(right) as f64 / max as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::ImageFrame;
    use anyhow::anyhow;
    use image::{Rgba, RgbaImage};

    const SKIN: Rgba<u8> = Rgba([180, 140, 110, 255]);
    const DARK_BG: Rgba<u8> = Rgba([50, 50, 55, 255]);
    const GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);

    fn detector() -> FaceDetector {
        FaceDetector::new(DetectorConfig::default())
    }

    /// 96x96 frame with a centered skin oval on a dark neutral background.
    /// The central third then mixes skin (mid luma) with dark surround.
    fn oval_face_frame() -> ImageFrame {
        let mut img = RgbaImage::from_pixel(96, 96, DARK_BG);
        for y in 0..96u32 {
            for x in 0..96u32 {
                let dx = (x as f64 - 48.0) / 12.0;
                let dy = (y as f64 - 48.0) / 15.0;
                if dx * dx + dy * dy <= 1.0 {
                    img.put_pixel(x, y, SKIN);
                }
            }
        }
        ImageFrame::new(img)
    }

    struct FaultyFrame;

    impl crate::frame::VideoFrame for FaultyFrame {
        fn width(&self) -> u32 {
            64
        }
        fn height(&self) -> u32 {
            64
        }
        fn rgb_at(&self, _x: u32, _y: u32) -> Result<[u8; 3]> {
            Err(anyhow!("buffer detached"))
        }
    }

    #[test]
    fn central_region_is_middle_third() {
        let region = central_region(96, 96);
        assert_eq!(
            region,
            DetectionRegion {
                x: 32,
                y: 32,
                width: 32,
                height: 32
            }
        );
    }

    #[test]
    fn symmetry_score_extremes() {
        assert_eq!(symmetry_score(0, 0), 0.0);
        assert_eq!(symmetry_score(10, 10), 1.0);
        assert_eq!(symmetry_score(10, 0), 0.0);
        assert!((symmetry_score(64, 79) - (1.0 - 15.0 / 79.0)).abs() < 1e-12);
    }

    #[test]
    fn well_lit_centered_oval_is_detected() {
        let verdict = detector().detect(&oval_face_frame());

        assert!(verdict.detected);
        assert!(verdict.confidence > 0.0);
        assert_eq!(
            verdict.region,
            Some(DetectionRegion {
                x: 32,
                y: 32,
                width: 32,
                height: 32
            })
        );
        let skin_ratio = verdict.diagnostics["skinRatio"];
        assert!(skin_ratio > 0.4 && skin_ratio < 0.7, "skin ratio {skin_ratio}");
        assert!(verdict.diagnostics["symmetryScore"] > 0.6);
        assert!(verdict.diagnostics["darkRatio"] >= 0.05);
    }

    #[test]
    fn oval_detected_at_every_sensitivity() {
        use super::super::config::DetectionSensitivity;
        let frame = oval_face_frame();
        for sensitivity in [
            DetectionSensitivity::High,
            DetectionSensitivity::Medium,
            DetectionSensitivity::Low,
        ] {
            let detector = FaceDetector::new(DetectorConfig::for_sensitivity(sensitivity));
            assert!(detector.detect(&frame).detected, "{sensitivity:?} missed the oval");
        }
    }

    #[test]
    fn flat_skin_field_fails_brightness_signal() {
        // Skin ratio and symmetry both pass; the region is a flat mid-luma
        // field with no dark or bright band, so the conjunction must reject.
        let frame = ImageFrame::new(RgbaImage::from_pixel(96, 96, SKIN));
        let verdict = detector().detect(&frame);

        assert!(!verdict.detected);
        assert_eq!(verdict.confidence, 0.0);
        assert!(verdict.region.is_none());
        assert_eq!(verdict.diagnostics["skinRatio"], 1.0);
        assert_eq!(verdict.diagnostics["symmetryScore"], 1.0);
        assert_eq!(verdict.diagnostics["darkRatio"], 0.0);
        assert_eq!(verdict.diagnostics["brightRatio"], 0.0);
    }

    #[test]
    fn half_frame_skin_block_fails_symmetry_signal() {
        // Skin fills the left half of the sampled region only: skin ratio and
        // brightness mix pass, left/right balance is zero.
        let mut img = RgbaImage::from_pixel(96, 96, DARK_BG);
        for y in 0..96u32 {
            for x in 0..48u32 {
                img.put_pixel(x, y, SKIN);
            }
        }
        let verdict = detector().detect(&ImageFrame::new(img));

        assert!(!verdict.detected);
        assert_eq!(verdict.diagnostics["skinRatio"], 0.5);
        assert_eq!(verdict.diagnostics["symmetryScore"], 0.0);
    }

    #[test]
    fn sparse_skin_fails_ratio_signal() {
        // Two symmetric skin stripes cover 12.5% of the samples: below the
        // medium cutoff while brightness and symmetry both pass.
        let mut img = RgbaImage::from_pixel(96, 96, GRAY);
        for y in 32..40u32 {
            for x in 32..64u32 {
                img.put_pixel(x, y, Rgba([30, 30, 30, 255]));
            }
        }
        for y in 32..64u32 {
            for x in [44u32, 45, 50, 51] {
                img.put_pixel(x, y, SKIN);
            }
        }
        let verdict = detector().detect(&ImageFrame::new(img));

        assert!(!verdict.detected);
        assert_eq!(verdict.diagnostics["skinRatio"], 0.125);
        assert_eq!(verdict.diagnostics["symmetryScore"], 1.0);
        assert!(verdict.diagnostics["darkRatio"] >= 0.05);
        assert!(verdict.diagnostics["brightnessRatio"] >= 0.30);
    }

    #[test]
    fn zero_size_frame_yields_absent_verdict() {
        let frame = ImageFrame::new(RgbaImage::new(0, 0));
        let verdict = detector().detect(&frame);

        assert!(!verdict.detected);
        assert_eq!(verdict.confidence, 0.0);
        assert!(verdict.diagnostics.is_empty());
    }

    #[test]
    fn pixel_read_failure_fails_closed() {
        let verdict = detector().detect(&FaultyFrame);

        assert!(!verdict.detected);
        assert_eq!(verdict.confidence, 0.0);
        assert!(verdict.region.is_none());
    }
}

use super::config::DetectorConfig;

/// RGB-margin rule: pronounced red dominance inside an absolute band.
pub(super) fn passes_rgb_margin(r: u8, g: u8, b: u8, config: &DetectorConfig) -> bool {
    r >= config.skin_red_min
        && r <= config.skin_red_max
        && r.saturating_sub(g) > config.skin_red_green_margin
        && r.saturating_sub(b) > config.skin_red_blue_margin
}

/// Chromaticity rule: each normalized channel inside its own band.
pub(super) fn passes_chromaticity(r: u8, g: u8, b: u8, config: &DetectorConfig) -> bool {
    let sum = r as f64 + g as f64 + b as f64;
    if sum <= 0.0 {
        return false;
    }
    in_band(r as f64 / sum, config.chroma_red_band)
        && in_band(g as f64 / sum, config.chroma_green_band)
        && in_band(b as f64 / sum, config.chroma_blue_band)
}

/// Either rule alone is enough to count a pixel as skin.
pub(super) fn is_skin(r: u8, g: u8, b: u8, config: &DetectorConfig) -> bool {
    passes_rgb_margin(r, g, b, config) || passes_chromaticity(r, g, b, config)
}

/// Rec. 601 luma.
pub(super) fn luma(r: u8, g: u8, b: u8) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

fn in_band(value: f64, (lo, hi): (f64, f64)) -> bool {
    value >= lo && value <= hi
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skin_tone_passes_both_rules() {
        let config = DetectorConfig::default();
        assert!(passes_rgb_margin(180, 140, 110, &config));
        assert!(passes_chromaticity(180, 140, 110, &config));
        assert!(is_skin(180, 140, 110, &config));
    }

    #[test]
    fn margin_rule_alone_can_classify() {
        // Saturated warm tone: chromaticity green channel sits above its band.
        let config = DetectorConfig::default();
        assert!(passes_rgb_margin(200, 150, 60, &config));
        assert!(!passes_chromaticity(200, 150, 60, &config));
        assert!(is_skin(200, 150, 60, &config));
    }

    #[test]
    fn chromaticity_rule_alone_can_classify() {
        // Muted tone: red leads green by exactly the margin, so the margin
        // rule rejects while every chromaticity band still matches.
        let config = DetectorConfig::default();
        assert!(!passes_rgb_margin(156, 136, 108, &config));
        assert!(passes_chromaticity(156, 136, 108, &config));
        assert!(is_skin(156, 136, 108, &config));
    }

    #[test]
    fn neutral_and_primary_colors_rejected() {
        let config = DetectorConfig::default();
        for (r, g, b) in [
            (128, 128, 128),
            (50, 50, 55),
            (255, 0, 0),
            (0, 255, 0),
            (0, 0, 255),
            (0, 0, 0),
            (255, 255, 255),
        ] {
            assert!(!is_skin(r, g, b, &config), "({r}, {g}, {b}) classified as skin");
        }
    }

    #[test]
    fn luma_matches_rec601_extremes() {
        assert_eq!(luma(0, 0, 0), 0.0);
        assert!((luma(255, 255, 255) - 255.0).abs() < 1e-9);
        assert!((luma(180, 140, 110) - 148.54).abs() < 0.01);
    }
}

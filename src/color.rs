use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Trace colors
// ---------------------------------------------------------------------------

/// Fixed colors for the two curve roles: baseline first, reference second.
pub fn trace_colors() -> (Color32, Color32) {
    (hue_color(210.0), hue_color(30.0))
}

fn hue_color(hue: f32) -> Color32 {
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_colors_are_distinct() {
        let (baseline, reference) = trace_colors();
        assert_ne!(baseline, reference);
    }
}

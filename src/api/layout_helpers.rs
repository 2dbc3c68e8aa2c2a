pub(crate) fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    // Keep this estimate deterministic and backend-independent.
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' | ':' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

/// Top edge of a box of `box_extent` centered on `anchor`, kept inside
/// `[min, max]`. When the box is larger than the range it sticks to `min`.
pub(crate) fn clamp_box_start(anchor: f64, box_extent: f64, min: f64, max: f64) -> f64 {
    let preferred = anchor - box_extent / 2.0;
    let upper = (max - box_extent).max(min);
    preferred.clamp(min, upper)
}

#[cfg(test)]
mod tests {
    use super::{clamp_box_start, estimate_label_text_width_px};

    #[test]
    fn box_near_top_edge_is_pushed_down() {
        assert_eq!(clamp_box_start(3.0, 18.0, 0.0, 300.0), 0.0);
        assert_eq!(clamp_box_start(299.0, 18.0, 0.0, 300.0), 282.0);
        assert_eq!(clamp_box_start(150.0, 18.0, 0.0, 300.0), 141.0);
    }

    #[test]
    fn oversized_box_sticks_to_start() {
        assert_eq!(clamp_box_start(5.0, 50.0, 0.0, 20.0), 0.0);
    }

    #[test]
    fn text_width_grows_with_length() {
        let short = estimate_label_text_width_px("9.9", 11.0);
        let long = estimate_label_text_width_px("1234.56", 11.0);
        assert!(long > short);
    }
}

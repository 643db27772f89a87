use image::{DynamicImage, GenericImageView};

use crate::pack;

/// Fraction of model pixel positions where the sample agrees bit-for-bit
/// and the model pixel is ink-colored (packed value <= threshold, signed
/// comparison).
///
/// Iteration is bounded by the model's dimensions only; a coordinate
/// outside the sample's own bounds contributes no match rather than
/// erroring. The score is therefore not symmetric when dimensions differ.
pub fn score(sample: &DynamicImage, model: &DynamicImage, ink_threshold: i32) -> f64 {
    let (model_w, model_h) = model.dimensions();
    let total = model_w as u64 * model_h as u64;
    if total == 0 {
        return 0.0;
    }

    let model = model.to_rgba8();
    let sample = sample.to_rgba8();
    let (sample_w, sample_h) = sample.dimensions();

    let mut matches: u64 = 0;
    for x in 0..model_w {
        for y in 0..model_h {
            if x >= sample_w || y >= sample_h {
                continue;
            }
            let model_px = pack::pack_argb(*model.get_pixel(x, y));
            let sample_px = pack::pack_argb(*sample.get_pixel(x, y));
            if model_px == sample_px && model_px <= ink_threshold {
                matches += 1;
            }
        }
    }

    matches as f64 / total as f64
}

use image::Rgba;

/// Packed opaque mid-gray (128/128/128), the canonical ink threshold.
pub const GRAY: i32 = pack_channels(0xFF, 128, 128, 128);

/// Pack alpha-red-green-blue, most significant byte first, into a signed
/// 32-bit value. Opaque pixels carry the sign bit, so every opaque pixel
/// sorts below every transparent one under the signed comparison used by
/// the ink threshold.
pub const fn pack_channels(a: u8, r: u8, g: u8, b: u8) -> i32 {
    (((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)) as i32
}

pub fn pack_argb(px: Rgba<u8>) -> i32 {
    let [r, g, b, a] = px.0;
    pack_channels(a, r, g, b)
}

/// Pack an RGB triple at full opacity. Used to turn a configured threshold
/// color into a packed comparison value.
pub const fn pack_rgb(rgb: [u8; 3]) -> i32 {
    pack_channels(0xFF, rgb[0], rgb[1], rgb[2])
}

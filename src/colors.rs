//! Colors in ARGB8888 format.

pub const BACKGROUND: u32 = 0xFF1E1E1E;
pub const GRID: u32 = 0xFF333333;
pub const WIREFRAME: u32 = 0xFFFFFFFF;
pub const MAGENTA: u32 = 0xFFFF00FF;

/// Splits an ARGB color into `[r, g, b, a]` bytes.
pub fn to_rgba(color: u32) -> [u8; 4] {
    let [a, r, g, b] = color.to_be_bytes();
    [r, g, b, a]
}

/// Packs RGB bytes into an opaque ARGB color.
pub fn from_rgb(r: u8, g: u8, b: u8) -> u32 {
    u32::from_be_bytes([0xFF, r, g, b])
}

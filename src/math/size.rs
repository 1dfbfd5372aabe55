/// Pixel dimensions of the render target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Half width and half height, in floating point.
    pub fn half(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl From<(u32, u32)> for ScreenSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

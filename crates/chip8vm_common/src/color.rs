#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::new_rgb(255, 255, 255);
    pub const YELLOW: Color = Color::new_rgb(255, 255, 0);

    #[inline]
    pub const fn new_rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    /// Build a color from a packed `0xRRGGBBAA` value.
    #[inline]
    pub const fn from_rgba_u32(value: u32) -> Color {
        let [r, g, b, a] = value.to_be_bytes();
        Color { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Write this color into one RGB24 pixel slot.
    #[inline]
    pub fn write_rgb24(&self, pixel: &mut [u8]) {
        pixel[0] = self.r;
        pixel[1] = self.g;
        pixel[2] = self.b;
    }
}

//! Linear RGBA colors.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self(r, g, b, a)
    }

    pub const fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Builds a color from a packed `0xAARRGGBB` value.
    pub const fn from_argb(argb: u32) -> Self {
        Self::from_rgba_u8(
            (argb >> 16) as u8,
            (argb >> 8) as u8,
            argb as u8,
            (argb >> 24) as u8,
        )
    }

    pub fn r(&self) -> f32 {
        self.0
    }

    pub fn g(&self) -> f32 {
        self.1
    }

    pub fn b(&self) -> f32 {
        self.2
    }

    pub fn a(&self) -> f32 {
        self.3
    }

    /// Multiplies the existing alpha by an 8-bit alpha (0..=255).
    pub fn modulate_alpha(&self, alpha: u8) -> Self {
        Self(self.0, self.1, self.2, self.3 * alpha as f32 / 255.0)
    }

    pub const BLACK: Color = Color(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color(0.0, 0.0, 1.0, 1.0);
    pub const CYAN: Color = Color(0.0, 1.0, 1.0, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_argb_unpacks_channels() {
        let color = Color::from_argb(0x80FF0000);
        assert_eq!(color.r(), 1.0);
        assert_eq!(color.g(), 0.0);
        assert_eq!(color.b(), 0.0);
        assert!((color.a() - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn modulate_alpha_scales_existing_alpha() {
        let color = Color::rgba(0.2, 0.4, 0.6, 0.5).modulate_alpha(255);
        assert_eq!(color.a(), 0.5);
        let faded = Color::BLACK.modulate_alpha(0);
        assert_eq!(faded.a(), 0.0);
    }
}

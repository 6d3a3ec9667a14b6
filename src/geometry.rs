//! Geometry and colour primitives.
//!
//! Plain value types so the drawing contract can be exercised without a
//! native surface. On Windows they convert into the Direct2D structs.

/// A rectangle with float coordinates in device-independent pixels.
///
/// Uses left/top/right/bottom format.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from x, y, width, height
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Keep `left`, `top` and `bottom`; set `right` to `left + width × fraction`.
    pub fn with_width_fraction(&self, fraction: f32) -> Self {
        Self {
            right: self.left + self.width() * fraction,
            ..*self
        }
    }

    #[cfg(windows)]
    pub fn to_d2d_rect(&self) -> windows::Win32::Graphics::Direct2D::Common::D2D_RECT_F {
        windows::Win32::Graphics::Direct2D::Common::D2D_RECT_F {
            left: self.left,
            top: self.top,
            right: self.right,
            bottom: self.bottom,
        }
    }
}

/// Straight-alpha RGBA colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from a `0xRRGGBB` value.
    pub fn from_rgb_u32(rgb: u32) -> Self {
        Self::from_rgb_u32_alpha(rgb, 1.0)
    }

    pub fn from_rgb_u32_alpha(rgb: u32, a: f32) -> Self {
        let channel = |shift: u32| ((rgb >> shift) & 0xFF) as f32 / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
            a,
        }
    }

    #[cfg(windows)]
    pub fn to_d2d_color(&self) -> windows::Win32::Graphics::Direct2D::Common::D2D1_COLOR_F {
        windows::Win32::Graphics::Direct2D::Common::D2D1_COLOR_F {
            r: self.r,
            g: self.g,
            b: self.b,
            a: self.a,
        }
    }
}

/// Size of a drawing surface in physical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size of a client rectangle; inverted edges clamp to zero.
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            width: (right - left).max(0) as u32,
            height: (bottom - top).max(0) as u32,
        }
    }

    #[cfg(windows)]
    pub fn to_d2d_size(&self) -> windows::Win32::Graphics::Direct2D::Common::D2D_SIZE_U {
        windows::Win32::Graphics::Direct2D::Common::D2D_SIZE_U {
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_from_xywh() {
        let r = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r, Rect::new(10.0, 20.0, 110.0, 70.0));
        assert_eq!(r.width(), 100.0);
        assert_eq!(r.height(), 50.0);
    }

    #[test]
    fn rect_width_fraction_keeps_origin() {
        let r = Rect::new(10.0, 5.0, 210.0, 25.0);
        let half = r.with_width_fraction(0.25);
        assert_eq!(half, Rect::new(10.0, 5.0, 60.0, 25.0));
    }

    #[test]
    fn color_from_hex() {
        let c = Color::from_rgb_u32(0xFF8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn color_from_hex_with_alpha() {
        let c = Color::from_rgb_u32_alpha(0x000000, 0.5);
        assert_eq!(c, Color::rgba(0.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn pixel_size_from_edges() {
        assert_eq!(PixelSize::from_edges(0, 0, 800, 600), PixelSize::new(800, 600));
        assert_eq!(PixelSize::from_edges(10, 10, 5, 20), PixelSize::new(0, 10));
    }
}

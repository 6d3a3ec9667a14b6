//! DPI scale arithmetic.

/// DPI at which one logical pixel equals one physical pixel.
pub const USER_DEFAULT_SCREEN_DPI: u32 = 96;

/// Ratio between a reference DPI and the DPI of the display hosting a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DpiScale(f32);

impl DpiScale {
    /// Scale used by an unbound or torn-down target.
    pub const ZERO: DpiScale = DpiScale(0.0);

    /// Scale against the default 96 DPI reference.
    pub fn from_dpi(dpi: u32) -> Self {
        Self::with_reference(USER_DEFAULT_SCREEN_DPI, dpi)
    }

    /// `reference / dpi`. A DPI of 0 (failed query) is treated as the reference.
    pub fn with_reference(reference: u32, dpi: u32) -> Self {
        let dpi = match dpi {
            0 => reference,
            dpi => dpi,
        };
        DpiScale(reference as f32 / dpi as f32)
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Scale an integer pixel value, truncating toward zero.
    pub fn adjust(self, origin: i32) -> i32 {
        (origin as f32 * self.0) as i32
    }
}

impl Default for DpiScale {
    fn default() -> Self {
        DpiScale(1.0)
    }
}

//! Window-bound Direct2D render target.

use windows::Win32::Foundation::{D2DERR_RECREATE_TARGET, HWND};
use windows::Win32::Graphics::Direct2D::{
    ID2D1Bitmap, ID2D1Factory, ID2D1HwndRenderTarget, ID2D1RenderTarget,
    D2D1_BITMAP_INTERPOLATION_MODE_LINEAR, D2D1_DRAW_TEXT_OPTIONS_NONE,
    D2D1_HWND_RENDER_TARGET_PROPERTIES, D2D1_PRESENT_OPTIONS_NONE,
    D2D1_RENDER_TARGET_PROPERTIES,
};
use windows::Win32::Graphics::DirectWrite::{
    IDWriteFactory5, IDWriteTextFormat, DWRITE_MEASURING_MODE_NATURAL,
};
use windows::Win32::Graphics::Gdi::{BeginPaint, EndPaint, PAINTSTRUCT};
use windows::Win32::UI::HiDpi::GetDpiForSystem;

use super::engine::{self, Engines};
use super::window::{client_size, dpi_for_window};
use crate::canvas::{self, Canvas, Fill};
use crate::config::G2dConfig;
use crate::dpi::DpiScale;
use crate::error::{G2dError, G2dResult, OptionExt, ResultExt};
use crate::frame::{finish_frame, RefreshCallback, SurfaceStatus};
use crate::geometry::{Color, PixelSize, Rect};

/// A drawing surface bound to one window.
///
/// Created unbound; [`initialize`](Self::initialize) binds it to a window and
/// takes a reference on the thread's engines, which
/// [`uninitialize`](Self::uninitialize) (or drop) gives back.
pub struct RenderTarget {
    hwnd: Option<HWND>,
    engines: Option<Engines>,
    target: Option<ID2D1HwndRenderTarget>,
    dpi_scale: DpiScale,
}

impl Default for RenderTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderTarget {
    pub fn new() -> Self {
        Self {
            hwnd: None,
            engines: None,
            target: None,
            dpi_scale: DpiScale::from_dpi(unsafe { GetDpiForSystem() }),
        }
    }

    /// Bind to `hwnd` and build a surface covering its client area.
    ///
    /// The target stays bound if only the surface creation fails; call
    /// [`refresh_resource`](Self::refresh_resource) to retry.
    pub fn initialize(&mut self, hwnd: HWND) -> G2dResult<()> {
        self.initialize_with_config(hwnd, &G2dConfig::default())
    }

    /// Like [`initialize`](Self::initialize), constructing the thread's
    /// engines from `config` if this is their first reference. Engines that
    /// are already live keep the configuration they were built with.
    pub fn initialize_with_config(&mut self, hwnd: HWND, config: &G2dConfig) -> G2dResult<()> {
        if self.engines.is_some() {
            self.uninitialize(None);
        }

        let engines = engine::initialize_with(config)?;
        self.dpi_scale =
            DpiScale::with_reference(engines.config.reference_dpi, dpi_for_window(hwnd));
        self.hwnd = Some(hwnd);
        self.engines = Some(engines);

        self.refresh_resource()
    }

    /// Run `on_release`, drop the surface and release the engine reference.
    ///
    /// An unbound target has nothing to release: the call returns without
    /// running `on_release`.
    pub fn uninitialize(&mut self, on_release: Option<RefreshCallback<'_>>) {
        if self.engines.is_none() {
            return;
        }
        if let Some(callback) = on_release {
            callback();
        }

        self.target = None;
        self.hwnd = None;
        self.engines = None;
        self.dpi_scale = DpiScale::ZERO;
        engine::uninitialize();
    }

    /// Tell the surface about a new client size. Bitmaps created from the
    /// surface remain valid.
    pub fn resize(&mut self, width: u32, height: u32) -> G2dResult<()> {
        let target = self.target.as_ref().or_uninit("drawing surface")?;
        unsafe { target.Resize(&PixelSize::new(width, height).to_d2d_size()) }.context("Resize")
    }

    /// Drop the surface and build a new one from the current client rectangle.
    pub fn refresh_resource(&mut self) -> G2dResult<()> {
        self.target = None;

        let hwnd = self.hwnd.or_uninit("window")?;
        let engines = self.engines.as_ref().or_uninit("graphics engines")?;
        let size = client_size(hwnd)?;

        let properties = D2D1_HWND_RENDER_TARGET_PROPERTIES {
            hwnd,
            pixelSize: size.to_d2d_size(),
            presentOptions: D2D1_PRESENT_OPTIONS_NONE,
        };
        let target = unsafe {
            engines
                .drawing
                .CreateHwndRenderTarget(&D2D1_RENDER_TARGET_PROPERTIES::default(), &properties)
        }
        .context("CreateHwndRenderTarget")?;

        tracing::debug!(
            "Created render target {}x{} for window {:?}",
            size.width,
            size.height,
            hwnd
        );
        self.target = Some(target);
        Ok(())
    }

    /// Validate the window's paint region and open the surface for drawing.
    pub fn begin_draw(&mut self) -> G2dResult<()> {
        let hwnd = self.hwnd.or_uninit("window")?;
        unsafe {
            let mut ps = PAINTSTRUCT::default();
            let _hdc = BeginPaint(hwnd, &mut ps);
            let _ = EndPaint(hwnd, &ps);
        }

        let target = self.target.as_ref().or_uninit("drawing surface")?;
        unsafe { target.BeginDraw() };
        Ok(())
    }

    /// Close the frame. If the surface was lost, `on_lost` runs once to let
    /// the caller drop resources created from it, then the surface is rebuilt
    /// unless the callback returned `false`.
    pub fn end_draw(&mut self, on_lost: Option<RefreshCallback<'_>>) -> G2dResult<()> {
        let target = self.target.as_ref().or_uninit("drawing surface")?;
        let status = match unsafe { target.EndDraw(None, None) } {
            Ok(()) => SurfaceStatus::Presented,
            Err(e) if e.code() == D2DERR_RECREATE_TARGET => SurfaceStatus::Lost,
            Err(e) => return Err(G2dError::native("EndDraw", e.code().0)),
        };
        finish_frame(status, on_lost, || self.refresh_resource())
    }

    /// Fill `rect` with `background` and draw `text` over it in `text_color`.
    pub fn draw_control(
        &self,
        rect: Rect,
        text: Option<&str>,
        format: Option<&IDWriteTextFormat>,
        text_color: Color,
        background: Fill<'_, ID2D1Bitmap>,
    ) -> G2dResult<()> {
        let mut canvas = self.canvas()?;
        canvas::draw_control(&mut canvas, rect, text, format, text_color, background)
    }

    /// Draw a progress bar: `background` over `rect`, then `front` over the
    /// leading `percentage` of its width.
    pub fn draw_progress_bar(
        &self,
        rect: Rect,
        percentage: f32,
        front: Fill<'_, ID2D1Bitmap>,
        background: Fill<'_, ID2D1Bitmap>,
    ) -> G2dResult<()> {
        let mut canvas = self.canvas()?;
        canvas::draw_progress_bar(&mut canvas, rect, percentage, front, background)
    }

    fn canvas(&self) -> G2dResult<D2dCanvas<'_>> {
        let target = self.target().or_uninit("drawing surface")?;
        Ok(D2dCanvas { target })
    }

    pub fn hwnd(&self) -> Option<HWND> {
        self.hwnd
    }

    pub fn factory(&self) -> Option<&ID2D1Factory> {
        self.engines.as_ref().map(|e| &e.drawing)
    }

    /// The surface as a generic render target, for creating bitmaps and brushes.
    pub fn target(&self) -> Option<&ID2D1RenderTarget> {
        self.target.as_ref().map(|t| &**t)
    }

    pub fn write_factory(&self) -> Option<&IDWriteFactory5> {
        self.engines.as_ref().map(|e| &e.text)
    }

    pub fn dpi_scale(&self) -> f32 {
        self.dpi_scale.value()
    }

    /// Scale a pixel value by the window's DPI scale.
    pub fn pixel_adjust(&self, origin: i32) -> i32 {
        self.dpi_scale.adjust(origin)
    }
}

impl Drop for RenderTarget {
    fn drop(&mut self) {
        self.uninitialize(None);
    }
}

struct D2dCanvas<'a> {
    target: &'a ID2D1RenderTarget,
}

impl Canvas for D2dCanvas<'_> {
    type Bitmap = ID2D1Bitmap;
    type TextFormat = IDWriteTextFormat;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> G2dResult<()> {
        unsafe {
            let brush = self
                .target
                .CreateSolidColorBrush(&color.to_d2d_color(), None)
                .context("CreateSolidColorBrush")?;
            self.target.FillRectangle(&rect.to_d2d_rect(), &brush);
        }
        Ok(())
    }

    fn draw_bitmap(&mut self, bitmap: &ID2D1Bitmap, rect: Rect) -> G2dResult<()> {
        unsafe {
            self.target.DrawBitmap(
                bitmap,
                Some(&rect.to_d2d_rect()),
                1.0,
                D2D1_BITMAP_INTERPOLATION_MODE_LINEAR,
                None,
            );
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        format: &IDWriteTextFormat,
        rect: Rect,
        color: Color,
    ) -> G2dResult<()> {
        let wide: Vec<u16> = text.encode_utf16().collect();
        unsafe {
            let brush = self
                .target
                .CreateSolidColorBrush(&color.to_d2d_color(), None)
                .context("CreateSolidColorBrush")?;
            self.target.DrawText(
                &wide,
                format,
                &rect.to_d2d_rect(),
                &brush,
                D2D1_DRAW_TEXT_OPTIONS_NONE,
                DWRITE_MEASURING_MODE_NATURAL,
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DrawingThreading;
    use crate::win::resource::current_module;
    use crate::win::window::create_central_window;
    use windows::Win32::UI::WindowsAndMessaging::{
        DestroyWindow, WINDOW_EX_STYLE, WS_OVERLAPPEDWINDOW,
    };

    fn test_window() -> HWND {
        let module = current_module().unwrap();
        create_central_window(
            WINDOW_EX_STYLE::default(),
            "STATIC",
            "graphics2d test",
            WS_OVERLAPPEDWINDOW,
            240,
            160,
            None,
            module.into(),
        )
        .unwrap()
    }

    #[test]
    fn test_unbound_uninitialize_skips_callback() {
        let mut target = RenderTarget::new();
        let mut called = false;
        target.uninitialize(Some(&mut || {
            called = true;
            true
        }));
        assert!(!called);
        assert_eq!(engine::reference_count(), 0);
    }

    #[test]
    fn test_unbound_target_is_uninitialized() {
        let mut target = RenderTarget::new();
        assert!(matches!(
            target.begin_draw(),
            Err(G2dError::NotInitialized("window"))
        ));
        assert!(matches!(
            target.end_draw(None),
            Err(G2dError::NotInitialized(_))
        ));
        assert!(matches!(
            target.resize(10, 10),
            Err(G2dError::NotInitialized(_))
        ));
        assert!(target.factory().is_none());
        assert!(target.write_factory().is_none());
    }

    #[test]
    fn test_invalid_config_leaves_target_unbound() {
        let mut target = RenderTarget::new();
        let config = G2dConfig {
            reference_dpi: 0,
            ..Default::default()
        };
        let err = target
            .initialize_with_config(HWND::default(), &config)
            .unwrap_err();
        assert!(matches!(err, G2dError::Config(_)));
        assert!(target.hwnd().is_none());
        assert_eq!(engine::reference_count(), 0);
    }

    #[test]
    fn test_config_reaches_engines_and_counts_balance() {
        let hwnd = test_window();
        let config = G2dConfig {
            drawing_threading: DrawingThreading::MultiThreaded,
            ..Default::default()
        };

        let mut target = RenderTarget::new();
        target.initialize_with_config(hwnd, &config).unwrap();
        assert_eq!(engine::reference_count(), 1);
        assert_eq!(
            engine::config().drawing_threading,
            DrawingThreading::MultiThreaded
        );
        assert!(target.target().is_some());

        // Re-initializing a bound target gives its old reference back first.
        target.initialize_with_config(hwnd, &config).unwrap();
        assert_eq!(engine::reference_count(), 1);

        let mut second = RenderTarget::new();
        second.initialize(hwnd).unwrap();
        assert_eq!(engine::reference_count(), 2);

        let mut released = 0;
        second.uninitialize(Some(&mut || {
            released += 1;
            true
        }));
        assert_eq!(released, 1);
        assert_eq!(engine::reference_count(), 1);

        drop(target);
        assert_eq!(engine::reference_count(), 0);
        assert!(engine::engines().is_none());

        unsafe { DestroyWindow(hwnd) }.unwrap();
    }

    #[test]
    fn test_frame_cycle_on_window() {
        let hwnd = test_window();
        let mut target = RenderTarget::new();
        target.initialize(hwnd).unwrap();

        target.resize(120, 80).unwrap();
        target.begin_draw().unwrap();
        target
            .draw_progress_bar(
                Rect::from_xywh(10.0, 10.0, 100.0, 12.0),
                0.5,
                Fill::Solid(Color::WHITE),
                Fill::Solid(Color::BLACK),
            )
            .unwrap();
        assert!(matches!(
            target.draw_control(
                Rect::from_xywh(0.0, 0.0, 50.0, 20.0),
                Some("label"),
                None,
                Color::WHITE,
                Fill::Solid(Color::BLACK),
            ),
            Err(G2dError::MissingTextFormat)
        ));
        target.end_draw(None).unwrap();

        target.refresh_resource().unwrap();
        assert!(target.target().is_some());

        target.uninitialize(None);
        assert!(target.hwnd().is_none());
        assert_eq!(engine::reference_count(), 0);
        unsafe { DestroyWindow(hwnd) }.unwrap();
    }
}

//! Convenience layer over Direct2D, DirectWrite and WIC.
//!
//! Provides window-bound render targets with a begin/draw/end frame cycle,
//! solid-colour and bitmap fills, text and progress-bar drawing, bitmap
//! loading from files or embedded resources, and font collections loaded
//! from files or embedded resources.
//!
//! The platform-neutral pieces (geometry, DPI arithmetic, engine reference
//! counting, the draw-call and frame-recovery contracts) live at the crate
//! root; the native bindings are in [`win`] and only build on Windows.
//!
//! # Frame cycle
//!
//! ```ignore
//! use graphics2d::{Color, Fill, Rect, RenderTarget};
//!
//! let mut target = RenderTarget::new();
//! target.initialize(hwnd)?;
//!
//! // WM_PAINT
//! target.begin_draw()?;
//! target.draw_progress_bar(
//!     Rect::from_xywh(20.0, 20.0, 200.0, 16.0),
//!     0.4,
//!     Fill::Solid(Color::from_rgb_u32(0x3A7BD5)),
//!     Fill::Solid(Color::from_rgb_u32(0x202020)),
//! )?;
//! target.end_draw(Some(&mut || {
//!     bitmaps.clear();
//!     true
//! }))?;
//! ```

pub mod canvas;
pub mod config;
pub mod dpi;
pub mod engine;
pub mod error;
pub mod font;
pub mod frame;
pub mod geometry;
pub mod resource;

#[cfg(windows)]
pub mod win;

pub use canvas::{draw_control, draw_progress_bar, progress_rect, Canvas, Fill};
pub use config::G2dConfig;
pub use dpi::{DpiScale, USER_DEFAULT_SCREEN_DPI};
pub use error::{G2dError, G2dResult};
pub use frame::{RefreshCallback, SurfaceStatus};
pub use geometry::{Color, PixelSize, Rect};
pub use resource::ResourceId;

#[cfg(windows)]
pub use win::{
    create_font_collection_from_file, create_font_collection_from_resource,
    load_bitmap_from_file, load_bitmap_from_resource, wic_initialize, wic_uninitialize,
    FontCollection, RenderTarget,
};

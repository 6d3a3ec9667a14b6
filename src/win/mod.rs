//! Direct2D, DirectWrite and WIC bindings.
//!
//! # Architecture
//!
//! ```text
//! engine.rs (per-thread factories)
//!   |
//!   +-- ID2D1Factory + IDWriteFactory5   (reference counted pair)
//!   +-- IWICImagingFactory               (idempotent)
//!
//! target.rs  RenderTarget: window surface, frame cycle, draw helpers
//! bitmap.rs  file / resource / memory -> ID2D1Bitmap
//! font.rs    file / resource -> FontCollection
//! resource.rs embedded module resources
//! window.rs  window creation and client-area queries
//! ```

pub mod bitmap;
pub mod engine;
pub mod font;
pub mod resource;
pub mod target;
pub mod window;

pub use bitmap::{load_bitmap_from_file, load_bitmap_from_memory, load_bitmap_from_resource};
pub use engine::{wic_initialize, wic_uninitialize, Engines};
pub use font::{
    create_font_collection_from_file, create_font_collection_from_resource, FontCollection,
};
pub use target::RenderTarget;
pub use window::{client_size, create_central_window, dpi_for_window};

use std::os::windows::ffi::OsStrExt;
use std::path::Path;

/// NUL-terminated wide path for file-based engine calls.
fn wide_path(path: &Path) -> Vec<u16> {
    path.as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect()
}

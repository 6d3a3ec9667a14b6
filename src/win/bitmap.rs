//! Image decoding into Direct2D bitmaps.
//!
//! Every loader runs the same pipeline: decoder → first frame → 32bpp
//! pre-multiplied BGRA conversion → bitmap on the given render target.
//! A failing stage stops the pipeline; interfaces acquired so far are
//! released when they go out of scope.

use std::path::Path;

use windows::core::PCWSTR;
use windows::Win32::Foundation::{GENERIC_READ, HMODULE};
use windows::Win32::Graphics::Direct2D::{ID2D1Bitmap, ID2D1RenderTarget};
use windows::Win32::Graphics::Imaging::{
    GUID_WICPixelFormat32bppPBGRA, IWICBitmapDecoder, IWICImagingFactory,
    WICBitmapDitherTypeNone, WICBitmapPaletteTypeMedianCut, WICDecodeMetadataCacheOnLoad,
};

use super::engine::wic_factory;
use super::resource::load_resource;
use super::wide_path;
use crate::error::{G2dResult, OptionExt, ResultExt};
use crate::resource::ResourceId;

/// Decode an image file. Requires [`wic_initialize`](super::wic_initialize).
pub fn load_bitmap_from_file(
    target: &ID2D1RenderTarget,
    path: impl AsRef<Path>,
) -> G2dResult<ID2D1Bitmap> {
    let path = path.as_ref();
    let factory = wic_factory().or_uninit("image codec")?;
    let wide = wide_path(path);

    let decoder = unsafe {
        factory.CreateDecoderFromFilename(
            PCWSTR(wide.as_ptr()),
            None,
            GENERIC_READ,
            WICDecodeMetadataCacheOnLoad,
        )
    }
    .with_context(|| format!("CreateDecoderFromFilename({})", path.display()))?;

    let bitmap = convert_first_frame(&factory, &decoder, target)?;
    tracing::debug!("Loaded bitmap from {}", path.display());
    Ok(bitmap)
}

/// Decode an encoded image held in memory.
pub fn load_bitmap_from_memory(target: &ID2D1RenderTarget, bytes: &[u8]) -> G2dResult<ID2D1Bitmap> {
    let factory = wic_factory().or_uninit("image codec")?;

    let decoder = unsafe {
        let stream = factory.CreateStream().context("CreateStream")?;
        stream
            .InitializeFromMemory(bytes)
            .context("InitializeFromMemory")?;
        factory
            .CreateDecoderFromStream(&stream, std::ptr::null(), WICDecodeMetadataCacheOnLoad)
            .context("CreateDecoderFromStream")?
    };

    convert_first_frame(&factory, &decoder, target)
}

/// Decode an image embedded in `module` as a resource of type `kind`.
pub fn load_bitmap_from_resource(
    target: &ID2D1RenderTarget,
    module: HMODULE,
    name: &ResourceId,
    kind: &ResourceId,
) -> G2dResult<ID2D1Bitmap> {
    let bytes = load_resource(module, name, kind)?;
    let bitmap = load_bitmap_from_memory(target, &bytes)?;
    tracing::debug!("Loaded bitmap from resource {} ({})", name, kind);
    Ok(bitmap)
}

fn convert_first_frame(
    factory: &IWICImagingFactory,
    decoder: &IWICBitmapDecoder,
    target: &ID2D1RenderTarget,
) -> G2dResult<ID2D1Bitmap> {
    unsafe {
        let frame = decoder.GetFrame(0).context("GetFrame")?;
        let converter = factory
            .CreateFormatConverter()
            .context("CreateFormatConverter")?;
        converter
            .Initialize(
                &frame,
                &GUID_WICPixelFormat32bppPBGRA,
                WICBitmapDitherTypeNone,
                None,
                0.0,
                WICBitmapPaletteTypeMedianCut,
            )
            .context("IWICFormatConverter::Initialize")?;
        target
            .CreateBitmapFromWicBitmap(&converter, None)
            .context("CreateBitmapFromWicBitmap")
    }
}

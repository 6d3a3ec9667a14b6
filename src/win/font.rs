//! Font collections built from font files or embedded font resources.

use std::ffi::c_void;
use std::path::Path;

use windows::core::{Interface, PCWSTR};
use windows::Win32::Foundation::HMODULE;
use windows::Win32::Graphics::DirectWrite::{
    IDWriteFactory5, IDWriteFontCollection1, IDWriteFontFile, IDWriteFontSetBuilder1,
    IDWriteInMemoryFontFileLoader, IDWriteTextFormat, DWRITE_FONT_STRETCH_NORMAL,
    DWRITE_FONT_STYLE_NORMAL, DWRITE_FONT_WEIGHT_NORMAL,
};

use super::engine;
use super::resource::load_resource;
use super::wide_path;
use crate::error::{G2dResult, ResultExt};
use crate::font::{copy_family_name, to_wide};
use crate::resource::ResourceId;

/// A font collection plus the in-memory loader backing it, if any.
///
/// The loader is registered with the text-layout factory for as long as the
/// collection lives and is unregistered on [`release`](Self::release) or drop.
pub struct FontCollection {
    collection: IDWriteFontCollection1,
    loader: Option<IDWriteInMemoryFontFileLoader>,
    factory: IDWriteFactory5,
    family_name: String,
}

impl FontCollection {
    pub fn collection(&self) -> &IDWriteFontCollection1 {
        &self.collection
    }

    /// Localized name of the collection's first family.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn has_memory_loader(&self) -> bool {
        self.loader.is_some()
    }

    /// Text format using the first family of this collection.
    pub fn create_text_format(&self, size: f32, locale: &str) -> G2dResult<IDWriteTextFormat> {
        let family = to_wide(&self.family_name);
        let locale = to_wide(locale);
        unsafe {
            self.factory.CreateTextFormat(
                PCWSTR(family.as_ptr()),
                &self.collection,
                DWRITE_FONT_WEIGHT_NORMAL,
                DWRITE_FONT_STYLE_NORMAL,
                DWRITE_FONT_STRETCH_NORMAL,
                size,
                PCWSTR(locale.as_ptr()),
            )
        }
        .context("CreateTextFormat")
    }

    /// Unregister the in-memory loader and drop the collection.
    pub fn release(self) {
        drop(self)
    }
}

impl Drop for FontCollection {
    fn drop(&mut self) {
        if let Some(loader) = self.loader.take() {
            unregister_loader(&self.factory, &loader);
        }
    }
}

fn unregister_loader(factory: &IDWriteFactory5, loader: &IDWriteInMemoryFontFileLoader) {
    if let Err(e) = unsafe { factory.UnregisterFontFileLoader(loader) } {
        tracing::warn!("Failed to unregister in-memory font loader: {}", e);
    }
}

/// Build a collection from one font file and copy its first family name
/// into `buffer` (see [`copy_family_name`] for the `size` protocol).
pub fn create_font_collection_from_file(
    factory: &IDWriteFactory5,
    path: impl AsRef<Path>,
    buffer: &mut [u16],
    size: &mut u32,
) -> G2dResult<FontCollection> {
    let path = path.as_ref();
    let wide = wide_path(path);
    let file = unsafe { factory.CreateFontFileReference(PCWSTR(wide.as_ptr()), None) }
        .with_context(|| format!("CreateFontFileReference({})", path.display()))?;

    let (collection, family_name) = collection_from_file(factory, &file, buffer, size)?;
    tracing::debug!("Loaded font family '{}' from {}", family_name, path.display());

    Ok(FontCollection {
        collection,
        loader: None,
        factory: factory.clone(),
        family_name,
    })
}

/// Build a collection from a font embedded in `module`.
///
/// The resource bytes are served through an in-memory loader registered
/// with `factory`; it stays registered until the returned collection is
/// released. If loading fails the loader is unregistered before returning.
pub fn create_font_collection_from_resource(
    factory: &IDWriteFactory5,
    module: HMODULE,
    name: &ResourceId,
    kind: &ResourceId,
    buffer: &mut [u16],
    size: &mut u32,
) -> G2dResult<FontCollection> {
    let bytes = load_resource(module, name, kind)?;

    let loader = unsafe { factory.CreateInMemoryFontFileLoader() }
        .context("CreateInMemoryFontFileLoader")?;
    unsafe { factory.RegisterFontFileLoader(&loader) }.context("RegisterFontFileLoader")?;

    let loaded = (|| {
        // No owner object: the loader keeps its own copy of the bytes.
        let file = unsafe {
            loader.CreateInMemoryFontFileReference(
                factory,
                bytes.as_ptr() as *const c_void,
                bytes.len() as u32,
                None,
            )
        }
        .context("CreateInMemoryFontFileReference")?;
        collection_from_file(factory, &file, buffer, size)
    })();

    match loaded {
        Ok((collection, family_name)) => {
            tracing::debug!("Loaded font family '{}' from resource {}", family_name, name);
            Ok(FontCollection {
                collection,
                loader: Some(loader),
                factory: factory.clone(),
                family_name,
            })
        }
        Err(e) => {
            unregister_loader(factory, &loader);
            Err(e)
        }
    }
}

fn collection_from_file(
    factory: &IDWriteFactory5,
    file: &IDWriteFontFile,
    buffer: &mut [u16],
    size: &mut u32,
) -> G2dResult<(IDWriteFontCollection1, String)> {
    let index = engine::config().family_name_locale_index;

    unsafe {
        let builder: IDWriteFontSetBuilder1 = factory
            .CreateFontSetBuilder()
            .context("CreateFontSetBuilder")?
            .cast()
            .context("IDWriteFontSetBuilder1")?;
        builder.AddFontFile(file).context("AddFontFile")?;
        let font_set = builder.CreateFontSet().context("CreateFontSet")?;
        let collection = factory
            .CreateFontCollectionFromFontSet(&font_set)
            .context("CreateFontCollectionFromFontSet")?;

        let family = collection.GetFontFamily(0).context("GetFontFamily")?;
        let names = family.GetFamilyNames().context("GetFamilyNames")?;
        let len = names.GetStringLength(index).context("GetStringLength")?;
        let mut name = vec![0u16; len as usize + 1];
        names.GetString(index, &mut name).context("GetString")?;
        name.truncate(len as usize);

        copy_family_name(&name, buffer, size)?;
        Ok((collection, String::from_utf16_lossy(&name)))
    }
}

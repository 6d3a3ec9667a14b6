//! Per-thread engine factories.
//!
//! The Direct2D and DirectWrite factories are created together on the first
//! [`initialize`] of a thread and released on the matching last
//! [`uninitialize`]. The WIC factory is separate and idempotent.
//!
//! Registries are thread-local: every call must come from the thread that
//! owns the target windows. Nothing here is synchronized.

use std::cell::RefCell;

use windows::Win32::Graphics::Direct2D::{
    D2D1CreateFactory, ID2D1Factory, D2D1_FACTORY_TYPE, D2D1_FACTORY_TYPE_MULTI_THREADED,
    D2D1_FACTORY_TYPE_SINGLE_THREADED,
};
use windows::Win32::Graphics::DirectWrite::{
    DWriteCreateFactory, IDWriteFactory5, DWRITE_FACTORY_TYPE, DWRITE_FACTORY_TYPE_ISOLATED,
    DWRITE_FACTORY_TYPE_SHARED,
};
use windows::Win32::Graphics::Imaging::{CLSID_WICImagingFactory, IWICImagingFactory};
use windows::Win32::System::Com::{
    CoCreateInstance, CoInitializeEx, CLSCTX_INPROC_SERVER, COINIT_APARTMENTTHREADED,
};

use crate::config::{DrawingThreading, G2dConfig, TextFactoryKind};
use crate::engine::{LazyEngine, SharedEngine};
use crate::error::{G2dError, G2dResult};

/// The drawing and text-layout factories, shared by every render target of
/// a thread.
#[derive(Clone)]
pub struct Engines {
    pub drawing: ID2D1Factory,
    pub text: IDWriteFactory5,
    pub config: G2dConfig,
}

thread_local! {
    static GRAPHICS: RefCell<SharedEngine<Engines>> = const { RefCell::new(SharedEngine::new()) };
    static CODEC: RefCell<LazyEngine<IWICImagingFactory>> = const { RefCell::new(LazyEngine::new()) };
}

/// COM must be up before WIC or DirectWrite objects are created. An
/// apartment already initialized in another mode is fine for our use.
fn ensure_com() {
    let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };
    if hr.is_err() {
        tracing::debug!("COM already initialized on this thread: {:?}", hr);
    }
}

fn engine_error(what: &str, err: windows::core::Error) -> G2dError {
    tracing::error!("Failed to create {}: {}", what, err);
    G2dError::EngineInit(format!("{}: {}", what, err))
}

fn create_engines(config: &G2dConfig) -> G2dResult<Engines> {
    ensure_com();

    let drawing_type: D2D1_FACTORY_TYPE = match config.drawing_threading {
        DrawingThreading::SingleThreaded => D2D1_FACTORY_TYPE_SINGLE_THREADED,
        DrawingThreading::MultiThreaded => D2D1_FACTORY_TYPE_MULTI_THREADED,
    };
    let text_type: DWRITE_FACTORY_TYPE = match config.text_factory {
        TextFactoryKind::Shared => DWRITE_FACTORY_TYPE_SHARED,
        TextFactoryKind::Isolated => DWRITE_FACTORY_TYPE_ISOLATED,
    };

    let drawing: ID2D1Factory = unsafe { D2D1CreateFactory(drawing_type, None) }
        .map_err(|e| engine_error("Direct2D factory", e))?;
    let text: IDWriteFactory5 = unsafe { DWriteCreateFactory(text_type) }
        .map_err(|e| engine_error("DirectWrite factory", e))?;

    tracing::debug!(
        "Created graphics engines ({:?}, {:?})",
        config.drawing_threading,
        config.text_factory
    );

    Ok(Engines {
        drawing,
        text,
        config: config.clone(),
    })
}

/// Take a reference on the thread's engines with the default configuration.
pub fn initialize() -> G2dResult<Engines> {
    initialize_with(&G2dConfig::default())
}

/// Take a reference on the thread's engines. `config` is only used if this
/// call constructs them.
pub fn initialize_with(config: &G2dConfig) -> G2dResult<Engines> {
    config.validate()?;
    GRAPHICS.with(|slot| {
        let mut slot = slot.borrow_mut();
        let engines = slot.acquire(|| create_engines(config))?.clone();
        tracing::trace!("Graphics engine references: {}", slot.count());
        Ok(engines)
    })
}

/// Drop a reference; the factories are released with the last one.
pub fn uninitialize() {
    let released = GRAPHICS.with(|slot| slot.borrow_mut().release());
    if released.is_some() {
        tracing::debug!("Released graphics engines");
    }
}

/// Engines of the current thread, if initialized.
pub fn engines() -> Option<Engines> {
    GRAPHICS.with(|slot| slot.borrow().get().cloned())
}

pub fn reference_count() -> u64 {
    GRAPHICS.with(|slot| slot.borrow().count())
}

/// Configuration of the live engines, or the default one.
pub fn config() -> G2dConfig {
    engines().map(|e| e.config).unwrap_or_default()
}

/// Create the WIC factory for this thread. Repeated calls are no-ops.
pub fn wic_initialize() -> G2dResult<()> {
    CODEC.with(|slot| {
        slot.borrow_mut()
            .initialize(|| {
                ensure_com();
                let factory: IWICImagingFactory = unsafe {
                    CoCreateInstance(&CLSID_WICImagingFactory, None, CLSCTX_INPROC_SERVER)
                }
                .map_err(|e| engine_error("WIC imaging factory", e))?;
                tracing::debug!("Created WIC imaging factory");
                Ok(factory)
            })
            .map(|_| ())
    })
}

/// Release the WIC factory regardless of how many times it was initialized.
pub fn wic_uninitialize() {
    if CODEC.with(|slot| slot.borrow_mut().uninitialize()).is_some() {
        tracing::debug!("Released WIC imaging factory");
    }
}

pub fn wic_factory() -> Option<IWICImagingFactory> {
    CODEC.with(|slot| slot.borrow().get().cloned())
}

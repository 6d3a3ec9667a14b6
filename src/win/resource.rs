//! Embedded module resources.

use windows::Win32::Foundation::HMODULE;
use windows::Win32::System::LibraryLoader::{
    FindResourceW, GetModuleHandleW, LoadResource, LockResource, SizeofResource,
};

use crate::error::{G2dError, G2dResult, ResultExt};
use crate::resource::ResourceId;

/// Handle of the executable that started the process.
pub fn current_module() -> G2dResult<HMODULE> {
    unsafe { GetModuleHandleW(None) }.context("GetModuleHandleW")
}

/// Copy of a resource located by name and type.
///
/// The bytes are copied out of the module image, so the result stays valid
/// even if `module` is unloaded afterwards.
pub fn load_resource(
    module: HMODULE,
    name: &ResourceId,
    kind: &ResourceId,
) -> G2dResult<Vec<u8>> {
    let not_found = || G2dError::ResourceNotFound {
        name: name.to_string(),
        kind: kind.to_string(),
    };

    unsafe {
        let info =
            name.with_pcwstr(|name| kind.with_pcwstr(|kind| FindResourceW(module, name, kind)));
        if info.is_invalid() {
            return Err(not_found());
        }
        let size = SizeofResource(module, info);
        let handle = LoadResource(module, info).context("LoadResource")?;
        let data = LockResource(handle) as *const u8;
        if data.is_null() || size == 0 {
            return Err(not_found());
        }
        tracing::trace!("Loaded resource {} ({}): {} bytes", name, kind, size);
        Ok(std::slice::from_raw_parts(data, size as usize).to_vec())
    }
}

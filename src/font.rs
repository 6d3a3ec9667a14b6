//! Family-name buffer handling shared by the font loaders.

use crate::error::{G2dError, G2dResult};

/// Copy a UTF-16 family name into a caller buffer, NUL terminated.
///
/// The usable capacity is `min(*size, buffer.len())`. When it cannot hold
/// the name plus terminator, `*size` is set to the required length
/// (`name.len() + 1`), nothing is written and
/// [`G2dError::InsufficientBuffer`] is returned, so callers can query the
/// size with an empty buffer and retry. On success `*size` is left alone
/// and the name length (without terminator) is returned.
pub fn copy_family_name(name: &[u16], buffer: &mut [u16], size: &mut u32) -> G2dResult<usize> {
    let capacity = (*size as usize).min(buffer.len());
    let len = name.len();
    if capacity <= len {
        let required = len as u32 + 1;
        *size = required;
        return Err(G2dError::InsufficientBuffer { required });
    }
    buffer[..len].copy_from_slice(name);
    buffer[len] = 0;
    Ok(len)
}

/// NUL-terminated UTF-16 copy of `s`, for passing to wide-string APIs.
pub fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Decode a UTF-16 buffer up to its first NUL.
pub fn from_wide(buffer: &[u16]) -> String {
    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    String::from_utf16_lossy(&buffer[..len])
}

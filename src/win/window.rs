//! Window helpers.

use windows::core::PCWSTR;
use windows::Win32::Foundation::{HINSTANCE, HWND, RECT};
use windows::Win32::UI::HiDpi::GetDpiForWindow;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, GetClientRect, GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN,
    WINDOW_EX_STYLE, WINDOW_STYLE,
};

use crate::error::{G2dResult, ResultExt};
use crate::font::to_wide;
use crate::geometry::PixelSize;

/// Create a window of the given outer size centred on the primary screen.
#[allow(clippy::too_many_arguments)]
pub fn create_central_window(
    ex_style: WINDOW_EX_STYLE,
    class_name: &str,
    title: &str,
    style: WINDOW_STYLE,
    width: i32,
    height: i32,
    parent: Option<HWND>,
    instance: HINSTANCE,
) -> G2dResult<HWND> {
    let class_name = to_wide(class_name);
    let title = to_wide(title);

    unsafe {
        let x = (GetSystemMetrics(SM_CXSCREEN) - width) / 2;
        let y = (GetSystemMetrics(SM_CYSCREEN) - height) / 2;

        CreateWindowExW(
            ex_style,
            PCWSTR(class_name.as_ptr()),
            PCWSTR(title.as_ptr()),
            style,
            x,
            y,
            width,
            height,
            parent.unwrap_or_default(),
            None,
            instance,
            None,
        )
        .context("CreateWindowExW")
    }
}

/// Current client-area size in physical pixels.
pub fn client_size(hwnd: HWND) -> G2dResult<PixelSize> {
    let mut rect = RECT::default();
    unsafe { GetClientRect(hwnd, &mut rect) }.context("GetClientRect")?;
    Ok(PixelSize::from_edges(
        rect.left,
        rect.top,
        rect.right,
        rect.bottom,
    ))
}

/// Effective DPI of the window; 0 if the handle is invalid.
pub fn dpi_for_window(hwnd: HWND) -> u32 {
    unsafe { GetDpiForWindow(hwnd) }
}

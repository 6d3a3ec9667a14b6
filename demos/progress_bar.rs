//! Animated progress bar with a labelled control.
//!
//! Run with `RUST_LOG=debug cargo run --example progress_bar`.

#[cfg(windows)]
mod demo {
    use std::cell::RefCell;

    use graphics2d::font::to_wide;
    use graphics2d::{Color, Fill, G2dResult, Rect, RenderTarget};
    use windows::core::PCWSTR;
    use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
    use windows::Win32::Graphics::DirectWrite::{
        IDWriteTextFormat, DWRITE_FONT_STRETCH_NORMAL, DWRITE_FONT_STYLE_NORMAL,
        DWRITE_FONT_WEIGHT_BOLD, DWRITE_PARAGRAPH_ALIGNMENT_CENTER, DWRITE_TEXT_ALIGNMENT_CENTER,
    };
    use windows::Win32::Graphics::Gdi::InvalidateRect;
    use windows::Win32::System::LibraryLoader::GetModuleHandleW;
    use windows::Win32::UI::WindowsAndMessaging::{
        DefWindowProcW, DispatchMessageW, GetMessageW, LoadCursorW, PostQuitMessage,
        RegisterClassW, SetTimer, ShowWindow, TranslateMessage, CS_HREDRAW, CS_VREDRAW,
        IDC_ARROW, MSG, SW_SHOW, WINDOW_EX_STYLE, WM_DESTROY, WM_PAINT, WM_SIZE, WM_TIMER,
        WNDCLASSW, WS_OVERLAPPEDWINDOW,
    };

    const CLASS_NAME: &str = "Graphics2DProgressDemo";
    const TIMER_ID: usize = 1;

    struct DemoState {
        target: RenderTarget,
        label_format: Option<IDWriteTextFormat>,
        progress: f32,
    }

    thread_local! {
        static STATE: RefCell<Option<DemoState>> = const { RefCell::new(None) };
    }

    fn create_label_format(target: &RenderTarget) -> G2dResult<Option<IDWriteTextFormat>> {
        let Some(factory) = target.write_factory() else {
            return Ok(None);
        };
        let font = to_wide("Segoe UI");
        let locale = to_wide("en-US");
        unsafe {
            let format = factory.CreateTextFormat(
                PCWSTR(font.as_ptr()),
                None,
                DWRITE_FONT_WEIGHT_BOLD,
                DWRITE_FONT_STYLE_NORMAL,
                DWRITE_FONT_STRETCH_NORMAL,
                14.0,
                PCWSTR(locale.as_ptr()),
            )?;
            format.SetTextAlignment(DWRITE_TEXT_ALIGNMENT_CENTER)?;
            format.SetParagraphAlignment(DWRITE_PARAGRAPH_ALIGNMENT_CENTER)?;
            Ok(Some(format))
        }
    }

    fn paint(state: &mut DemoState) -> G2dResult<()> {
        let scale = |v: i32| state.target.pixel_adjust(v) as f32;
        let bar = Rect::from_xywh(scale(40), scale(60), scale(400), scale(24));
        let label = Rect::from_xywh(scale(40), scale(110), scale(400), scale(40));
        let text = format!("{:.0}%", state.progress * 100.0);

        state.target.begin_draw()?;
        state.target.draw_control(
            Rect::from_xywh(0.0, 0.0, 10_000.0, 10_000.0),
            None,
            None,
            Color::WHITE,
            Fill::Solid(Color::from_rgb_u32(0x1E1E1E)),
        )?;
        state.target.draw_progress_bar(
            bar,
            state.progress,
            Fill::Solid(Color::from_rgb_u32(0x3A7BD5)),
            Fill::Solid(Color::from_rgb_u32(0x404040)),
        )?;
        state.target.draw_control(
            label,
            Some(&text),
            state.label_format.as_ref(),
            Color::WHITE,
            Fill::Solid(Color::from_rgb_u32(0x2D2D2D)),
        )?;
        state.target.end_draw(Some(&mut || {
            log::warn!("Surface lost, nothing surface-bound to release");
            true
        }))
    }

    unsafe extern "system" fn wnd_proc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        match msg {
            WM_PAINT => {
                STATE.with(|state| {
                    if let Some(state) = state.borrow_mut().as_mut() {
                        if let Err(e) = paint(state) {
                            log::error!("Paint failed: {}", e);
                        }
                    }
                });
                LRESULT(0)
            }
            WM_SIZE => {
                let width = (lparam.0 & 0xFFFF) as u32;
                let height = ((lparam.0 >> 16) & 0xFFFF) as u32;
                STATE.with(|state| {
                    if let Some(state) = state.borrow_mut().as_mut() {
                        let _ = state.target.resize(width, height);
                    }
                });
                LRESULT(0)
            }
            WM_TIMER => {
                STATE.with(|state| {
                    if let Some(state) = state.borrow_mut().as_mut() {
                        state.progress = (state.progress + 0.01) % 1.0;
                    }
                });
                let _ = InvalidateRect(hwnd, None, false);
                LRESULT(0)
            }
            WM_DESTROY => {
                STATE.with(|state| state.borrow_mut().take());
                PostQuitMessage(0);
                LRESULT(0)
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }

    pub fn run() -> G2dResult<()> {
        unsafe {
            let hinstance = GetModuleHandleW(None)?;
            let class_name = to_wide(CLASS_NAME);
            let wc = WNDCLASSW {
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(wnd_proc),
                hInstance: hinstance.into(),
                lpszClassName: PCWSTR(class_name.as_ptr()),
                hCursor: LoadCursorW(None, IDC_ARROW)?,
                ..Default::default()
            };
            if RegisterClassW(&wc) == 0 {
                return Err("Failed to register window class".into());
            }

            let hwnd = graphics2d::win::create_central_window(
                WINDOW_EX_STYLE::default(),
                CLASS_NAME,
                "graphics2d progress bar",
                WS_OVERLAPPEDWINDOW,
                480,
                220,
                None,
                hinstance.into(),
            )?;

            let mut target = RenderTarget::new();
            target.initialize(hwnd)?;
            let label_format = create_label_format(&target)?;
            log::info!("DPI scale {:.2}", target.dpi_scale());

            STATE.with(|state| {
                *state.borrow_mut() = Some(DemoState {
                    target,
                    label_format,
                    progress: 0.0,
                })
            });

            let _ = ShowWindow(hwnd, SW_SHOW);
            SetTimer(hwnd, TIMER_ID, 30, None);

            let mut msg = MSG::default();
            while GetMessageW(&mut msg, None, 0, 0).as_bool() {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
        Ok(())
    }
}

#[cfg(windows)]
fn main() {
    env_logger::init();
    if let Err(e) = demo::run() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(windows))]
fn main() {
    env_logger::init();
    log::warn!("The progress bar demo needs Direct2D and only runs on Windows");
}

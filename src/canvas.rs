//! Draw-call contract for controls and progress bars.
//!
//! [`draw_control`] and [`draw_progress_bar`] are written once against the
//! [`Canvas`] trait; the Direct2D surface implements it on Windows.

use crate::error::{G2dError, G2dResult};
use crate::geometry::{Color, Rect};

/// A surface that accepts the primitives used by the helpers in this module.
pub trait Canvas {
    type Bitmap;
    type TextFormat;

    /// Fill `rect` with a solid colour.
    fn fill_rect(&mut self, rect: Rect, color: Color) -> G2dResult<()>;

    /// Draw `bitmap` stretched to `rect`.
    fn draw_bitmap(&mut self, bitmap: &Self::Bitmap, rect: Rect) -> G2dResult<()>;

    /// Draw `text` laid out inside `rect` with a solid colour.
    fn draw_text(
        &mut self,
        text: &str,
        format: &Self::TextFormat,
        rect: Rect,
        color: Color,
    ) -> G2dResult<()>;
}

/// One layer of a control: a bitmap stretched over the rectangle or a solid colour.
#[derive(Debug)]
pub enum Fill<'a, B> {
    Bitmap(&'a B),
    Solid(Color),
}

// Manual impls: derives would require `B: Clone`.
impl<B> Clone for Fill<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for Fill<'_, B> {}

impl<'a, B> Fill<'a, B> {
    /// Bitmap when present, otherwise the fallback colour.
    pub fn or_color(bitmap: Option<&'a B>, color: Color) -> Self {
        match bitmap {
            Some(bitmap) => Fill::Bitmap(bitmap),
            None => Fill::Solid(color),
        }
    }
}

fn paint<C: Canvas>(canvas: &mut C, rect: Rect, fill: Fill<'_, C::Bitmap>) -> G2dResult<()> {
    match fill {
        Fill::Bitmap(bitmap) => canvas.draw_bitmap(bitmap, rect),
        Fill::Solid(color) => canvas.fill_rect(rect, color),
    }
}

/// Fill `rect` with `background`, then draw `text` over it in `text_color`.
///
/// Fails with [`G2dError::MissingTextFormat`] before drawing anything when
/// text is given without a format.
pub fn draw_control<C: Canvas>(
    canvas: &mut C,
    rect: Rect,
    text: Option<&str>,
    format: Option<&C::TextFormat>,
    text_color: Color,
    background: Fill<'_, C::Bitmap>,
) -> G2dResult<()> {
    let label = match (text, format) {
        (Some(_), None) => return Err(G2dError::MissingTextFormat),
        (Some(text), Some(format)) => Some((text, format)),
        (None, _) => None,
    };

    paint(canvas, rect, background)?;

    if let Some((text, format)) = label {
        canvas.draw_text(text, format, rect, text_color)?;
    }
    Ok(())
}

/// Front rectangle of a progress bar: `rect` with its right edge moved to
/// `left + width × percentage`. The percentage is not clamped.
pub fn progress_rect(rect: Rect, percentage: f32) -> Rect {
    rect.with_width_fraction(percentage)
}

/// Fill the whole bar with `background`, then the progress portion with `front`.
pub fn draw_progress_bar<C: Canvas>(
    canvas: &mut C,
    rect: Rect,
    percentage: f32,
    front: Fill<'_, C::Bitmap>,
    background: Fill<'_, C::Bitmap>,
) -> G2dResult<()> {
    paint(canvas, rect, background)?;
    paint(canvas, progress_rect(rect, percentage), front)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Call {
        Fill(Rect, Color),
        Bitmap(u32, Rect),
        Text(String, u32, Rect, Color),
    }

    /// Canvas that records every call; bitmaps and formats are plain ids.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Canvas for Recorder {
        type Bitmap = u32;
        type TextFormat = u32;

        fn fill_rect(&mut self, rect: Rect, color: Color) -> G2dResult<()> {
            self.calls.push(Call::Fill(rect, color));
            Ok(())
        }

        fn draw_bitmap(&mut self, bitmap: &u32, rect: Rect) -> G2dResult<()> {
            self.calls.push(Call::Bitmap(*bitmap, rect));
            Ok(())
        }

        fn draw_text(&mut self, text: &str, format: &u32, rect: Rect, color: Color) -> G2dResult<()> {
            self.calls
                .push(Call::Text(text.to_string(), *format, rect, color));
            Ok(())
        }
    }

    const BAR: Rect = Rect {
        left: 10.0,
        top: 20.0,
        right: 210.0,
        bottom: 40.0,
    };

    fn front_rect(percentage: f32) -> Rect {
        let mut canvas = Recorder::default();
        draw_progress_bar(
            &mut canvas,
            BAR,
            percentage,
            Fill::Solid(Color::WHITE),
            Fill::Solid(Color::BLACK),
        )
        .unwrap();
        match canvas.calls.as_slice() {
            [Call::Fill(bg, _), Call::Fill(front, _)] => {
                assert_eq!(*bg, BAR);
                *front
            }
            other => panic!("unexpected calls: {:?}", other),
        }
    }

    #[test]
    fn progress_zero_has_zero_width() {
        let front = front_rect(0.0);
        assert_eq!(front.width(), 0.0);
        assert_eq!(front.left, BAR.left);
    }

    #[test]
    fn progress_full_matches_background() {
        assert_eq!(front_rect(1.0), BAR);
    }

    #[test]
    fn progress_half_halves_width() {
        let front = front_rect(0.5);
        assert_eq!(front.width(), BAR.width() / 2.0);
        assert_eq!(front.top, BAR.top);
        assert_eq!(front.bottom, BAR.bottom);
    }

    #[test]
    fn progress_layers_use_bitmaps_independently() {
        let mut canvas = Recorder::default();
        draw_progress_bar(
            &mut canvas,
            BAR,
            0.25,
            Fill::Bitmap(&7),
            Fill::Solid(Color::BLACK),
        )
        .unwrap();
        assert_eq!(
            canvas.calls,
            vec![
                Call::Fill(BAR, Color::BLACK),
                Call::Bitmap(7, progress_rect(BAR, 0.25)),
            ]
        );
    }

    #[test]
    fn control_text_without_format_draws_nothing() {
        let mut canvas = Recorder::default();
        let result = draw_control(
            &mut canvas,
            BAR,
            Some("OK"),
            None,
            Color::WHITE,
            Fill::Solid(Color::BLACK),
        );
        assert!(matches!(result, Err(G2dError::MissingTextFormat)));
        assert!(canvas.calls.is_empty());
    }

    #[test]
    fn control_with_text_draws_background_then_text() {
        let mut canvas = Recorder::default();
        draw_control(
            &mut canvas,
            BAR,
            Some("Start"),
            Some(&3),
            Color::WHITE,
            Fill::or_color(Some(&9), Color::BLACK),
        )
        .unwrap();
        assert_eq!(
            canvas.calls,
            vec![
                Call::Bitmap(9, BAR),
                Call::Text("Start".into(), 3, BAR, Color::WHITE),
            ]
        );
    }

    #[test]
    fn control_without_text_only_fills() {
        let mut canvas = Recorder::default();
        draw_control(
            &mut canvas,
            BAR,
            None,
            None,
            Color::WHITE,
            Fill::or_color(None, Color::BLACK),
        )
        .unwrap();
        assert_eq!(canvas.calls, vec![Call::Fill(BAR, Color::BLACK)]);
    }
}

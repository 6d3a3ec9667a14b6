//! End-of-frame surface-loss handling.

use crate::error::{G2dError, G2dResult};

/// Outcome reported by the surface when a frame is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceStatus {
    Presented,
    /// Device or context lost; the surface must be rebuilt.
    Lost,
}

/// Callback run before a lost surface is rebuilt. It should release every
/// caller-owned resource created from the old surface (bitmaps, brushes)
/// and return `false` to veto the rebuild.
pub type RefreshCallback<'a> = &'a mut dyn FnMut() -> bool;

/// Resolve a closed frame.
///
/// On [`SurfaceStatus::Lost`] the callback runs exactly once; a `false`
/// return fails with [`G2dError::RefreshDeclined`] and `rebuild` is never
/// called. Without a callback the surface is rebuilt directly.
pub fn finish_frame<F>(
    status: SurfaceStatus,
    on_lost: Option<RefreshCallback<'_>>,
    rebuild: F,
) -> G2dResult<()>
where
    F: FnOnce() -> G2dResult<()>,
{
    match status {
        SurfaceStatus::Presented => Ok(()),
        SurfaceStatus::Lost => {
            tracing::warn!("Drawing surface lost, rebuilding");
            if let Some(callback) = on_lost {
                if !callback() {
                    tracing::warn!("Surface rebuild declined by caller");
                    return Err(G2dError::RefreshDeclined);
                }
            }
            rebuild()
        }
    }
}

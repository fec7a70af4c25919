//! Pagination and pageing UI model
//!
//! The external UI highlights the active bullet and, for bounded pagination
//! displays, shows a window of bullets centered on the current page. The
//! window math lives here so the host only styles what it is told.

/// One pagination bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bullet {
    /// Marks the current page.
    pub active: bool,
    /// Outside the visible window.
    pub hidden: bool,
}

/// Snapshot of the pagination and pageing chrome for one `UpdateUi` tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiModel {
    pub bullets: Vec<Bullet>,
    /// One-based page number for the pageing display; 0 while no page is
    /// selected.
    pub current_display: i32,
    pub total: u32,
}

/// Visible bullet range `[start, end]` of size `limit` centered on
/// `current`, clamped at both ends without shrinking near a boundary.
/// `limit = 0` shows everything.
pub fn pagination_window(current: usize, total: usize, limit: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if limit == 0 || limit >= total {
        return (0, total - 1);
    }

    let half = (limit / 2) as i64;
    let last = (total - 1) as i64;
    let mut start = current as i64 - half;
    let mut end = current as i64 + half;

    if start < 0 {
        end += -start;
        start = 0;
    }
    if end > last {
        start -= end - last;
        end = last;
        if start < 0 {
            start = 0;
        }
    }
    (start as usize, end as usize)
}

/// Compute the UI snapshot for the given page position.
pub fn ui_model(current_page: i32, page_count: u32, limit: usize) -> UiModel {
    let total = page_count as usize;
    let current = if current_page >= 0 {
        Some(current_page as usize)
    } else {
        None
    };
    let (start, end) = pagination_window(current.unwrap_or(0), total, limit);

    let bullets = (0..total)
        .map(|i| Bullet {
            active: current == Some(i),
            hidden: i < start || i > end,
        })
        .collect();

    UiModel {
        bullets,
        current_display: current_page + 1,
        total: page_count,
    }
}

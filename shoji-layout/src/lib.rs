//! Pure geometry for the shoji window manager: arrange functions over a
//! work area and client size-hint fitting. Nothing here performs I/O.

pub mod hints;
mod mono;
mod tile;

pub use hints::{fit, FitContext};
pub use shoji_ipc::{Arrangement, LayoutAxis, LayoutKind, Rect, SizeHints, SplitAxis};

/// Parameters of one arrange pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub area: Rect,
    pub mfact: f32,
    pub msplit: u32,
    pub axis: LayoutAxis,
    /// Regions whose per-client extent drops below this stack instead
    pub bar_height: i32,
    /// Visible clients on the monitor, floating ones included
    pub visible: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Outer rectangles (border included) in tiling order
    pub rects: Vec<Rect>,
    pub symbol: String,
}

pub const MFACT_MIN: f32 = 0.1;
pub const MFACT_MAX: f32 = 0.9;

pub fn clamp_mfact(mfact: f32) -> f32 {
    mfact.clamp(MFACT_MIN, MFACT_MAX)
}

/// Compute rectangles for `count` tileable clients.
/// Returns `None` for layouts without an arrange function.
pub fn arrange(kind: LayoutKind, params: &LayoutParams, count: usize) -> Option<Layout> {
    let (rects, symbol) = match kind {
        LayoutKind::Tile => (tile::tile(params, count), tile::symbol(&params.axis)),
        LayoutKind::Monocle => (
            mono::monocle(params, count),
            mono::monocle_symbol(params.visible),
        ),
        LayoutKind::Varimono => {
            let (rects, secondary) = mono::varimono(params, count);
            (rects, mono::varimono_symbol(secondary))
        }
        LayoutKind::Floating => return None,
    };
    Some(Layout { rects, symbol })
}

/// Symbol shown when a layout has nothing to arrange yet
pub fn default_symbol(kind: LayoutKind, axis: &LayoutAxis) -> String {
    match kind {
        LayoutKind::Tile => tile::symbol(axis),
        LayoutKind::Monocle => mono::monocle_symbol(0),
        LayoutKind::Varimono => mono::varimono_symbol(0),
        LayoutKind::Floating => "><>".to_string(),
    }
}

/// Split `extent` into `n` parts; the last part absorbs the rounding remainder.
fn split_extent(extent: i32, n: usize) -> Vec<i32> {
    if n == 0 {
        return vec![];
    }
    let each = extent / n as i32;
    let mut parts = vec![each; n];
    parts[n - 1] = extent - each * (n as i32 - 1);
    parts
}

/// Lay `n` clients out inside one region following `arrangement`.
pub(crate) fn subdivide(
    region: Rect,
    arrangement: Arrangement,
    n: usize,
    bar_height: i32,
) -> Vec<Rect> {
    if n == 0 {
        return vec![];
    }

    match arrangement {
        Arrangement::Monocle => vec![region; n],
        Arrangement::TopToBottom => {
            if region.height / (n as i32) < bar_height {
                return vec![region; n];
            }
            let mut y = region.y;
            split_extent(region.height, n)
                .into_iter()
                .map(|h| {
                    let rect = Rect::new(region.x, y, region.width, h);
                    y += h;
                    rect
                })
                .collect()
        }
        Arrangement::LeftToRight => {
            if region.width / (n as i32) < bar_height {
                return vec![region; n];
            }
            let mut x = region.x;
            split_extent(region.width, n)
                .into_iter()
                .map(|w| {
                    let rect = Rect::new(x, region.y, w, region.height);
                    x += w;
                    rect
                })
                .collect()
        }
    }
}

/// Cut `area` into (main, secondary) along the split axis, main taking `mfact`.
pub(crate) fn split_area(area: Rect, mfact: f32, axis: &LayoutAxis) -> (Rect, Rect) {
    match axis.split {
        SplitAxis::Vertical => {
            let mw = (area.width as f32 * mfact) as i32;
            let sw = area.width - mw;
            if axis.mirror {
                (
                    Rect::new(area.x + sw, area.y, mw, area.height),
                    Rect::new(area.x, area.y, sw, area.height),
                )
            } else {
                (
                    Rect::new(area.x, area.y, mw, area.height),
                    Rect::new(area.x + mw, area.y, sw, area.height),
                )
            }
        }
        SplitAxis::Horizontal => {
            let mh = (area.height as f32 * mfact) as i32;
            let sh = area.height - mh;
            if axis.mirror {
                (
                    Rect::new(area.x, area.y + sh, area.width, mh),
                    Rect::new(area.x, area.y, area.width, sh),
                )
            } else {
                (
                    Rect::new(area.x, area.y, area.width, mh),
                    Rect::new(area.x, area.y + mh, area.width, sh),
                )
            }
        }
    }
}

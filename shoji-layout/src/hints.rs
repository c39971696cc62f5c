use shoji_ipc::{Rect, SizeHints};

/// Environment a geometry request is fitted into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitContext {
    /// Whole root screen, used for interactive moves
    pub screen: Rect,
    /// Work area of the client's monitor
    pub work_area: Rect,
    pub interact: bool,
    pub bar_height: i32,
    /// Size hints only apply when set
    pub honor_hints: bool,
    /// Re-center a client that ended up smaller than its cell
    pub center: bool,
}

/// Fit `requested` (inner geometry) for a client currently at `current`.
/// Returns the adjusted geometry and whether it differs from `current`.
pub fn fit(
    current: Rect,
    border_width: i32,
    hints: &SizeHints,
    requested: Rect,
    ctx: &FitContext,
) -> (Rect, bool) {
    let Rect {
        mut x,
        mut y,
        mut width,
        mut height,
    } = requested;
    width = width.max(1);
    height = height.max(1);

    let outer_width = current.width + 2 * border_width;
    let outer_height = current.height + 2 * border_width;

    if ctx.interact {
        let screen = &ctx.screen;
        if x > screen.right() {
            x = screen.right() - outer_width;
        }
        if y > screen.bottom() {
            y = screen.bottom() - outer_height;
        }
        if x + width + 2 * border_width < screen.x {
            x = screen.x;
        }
        if y + height + 2 * border_width < screen.y {
            y = screen.y;
        }
    } else {
        let area = &ctx.work_area;
        if x >= area.right() {
            x = area.right() - outer_width;
        }
        if y >= area.bottom() {
            y = area.bottom() - outer_height;
        }
        if x + width + 2 * border_width <= area.x {
            x = area.x;
        }
        if y + height + 2 * border_width <= area.y {
            y = area.y;
        }
    }

    height = height.max(ctx.bar_height);
    width = width.max(ctx.bar_height);

    if ctx.honor_hints {
        (width, height) = apply_hints(hints, width, height);

        if ctx.center {
            x += (requested.width - width).max(0) / 2;
            y += (requested.height - height).max(0) / 2;
        }
    }

    let fitted = Rect::new(x, y, width, height);
    (fitted, fitted != current)
}

/// ICCCM 4.1.2.3: base size, aspect, increments, then min/max bounds.
fn apply_hints(hints: &SizeHints, mut width: i32, mut height: i32) -> (i32, i32) {
    let base_is_min = hints.base_width == hints.min_width && hints.base_height == hints.min_height;

    // Aspect limits exclude the base size unless it doubles as the minimum
    if !base_is_min {
        width -= hints.base_width;
        height -= hints.base_height;
    }

    if hints.min_aspect > 0.0 && hints.max_aspect > 0.0 && width > 0 && height > 0 {
        if hints.max_aspect < width as f32 / height as f32 {
            width = (height as f32 * hints.max_aspect + 0.5) as i32;
        } else if hints.min_aspect < height as f32 / width as f32 {
            height = (width as f32 * hints.min_aspect + 0.5) as i32;
        }
    }

    if base_is_min {
        width -= hints.base_width;
        height -= hints.base_height;
    }

    if hints.inc_width > 0 {
        width -= width % hints.inc_width;
    }
    if hints.inc_height > 0 {
        height -= height % hints.inc_height;
    }

    width = (width + hints.base_width).max(hints.min_width);
    height = (height + hints.base_height).max(hints.min_height);

    if hints.max_width > 0 {
        width = width.min(hints.max_width);
    }
    if hints.max_height > 0 {
        height = height.min(hints.max_height);
    }

    (width, height)
}

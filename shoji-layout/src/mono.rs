use shoji_ipc::Rect;

use crate::{clamp_mfact, split_area, subdivide, LayoutParams};

pub(crate) fn monocle_symbol(visible: usize) -> String {
    if visible == 0 {
        "[M]".to_string()
    } else {
        format!("[{}]", visible)
    }
}

pub(crate) fn varimono_symbol(secondary: usize) -> String {
    format!("[M{}]", secondary)
}

pub(crate) fn monocle(params: &LayoutParams, count: usize) -> Vec<Rect> {
    vec![params.area; count]
}

/// Main client plus overflow stacked in the main region, the next
/// `min(msplit, count - 1)` clients sharing a strip on the stack side.
/// Returns the rectangles and the number of secondary clients.
pub(crate) fn varimono(params: &LayoutParams, count: usize) -> (Vec<Rect>, usize) {
    if count == 0 {
        return (vec![], 0);
    }

    let secondary = (params.msplit as usize).min(count - 1);
    if secondary == 0 {
        return (vec![params.area; count], 0);
    }

    let mfact = clamp_mfact(params.mfact);
    let (main, strip) = split_area(params.area, mfact, &params.axis);
    let strip_rects = subdivide(strip, params.axis.stack, secondary, params.bar_height);

    let rects = (0..count)
        .map(|i| {
            if (1..=secondary).contains(&i) {
                strip_rects[i - 1]
            } else {
                main
            }
        })
        .collect();
    (rects, secondary)
}

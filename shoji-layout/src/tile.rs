use shoji_ipc::{LayoutAxis, Rect, SplitAxis};

use crate::{clamp_mfact, split_area, subdivide, LayoutParams};

pub(crate) fn symbol(axis: &LayoutAxis) -> String {
    match (axis.split, axis.mirror) {
        (SplitAxis::Vertical, false) => "[]=",
        (SplitAxis::Vertical, true) => "=[]",
        (SplitAxis::Horizontal, false) => "TTT",
        (SplitAxis::Horizontal, true) => "⊥⊥⊥",
    }
    .to_string()
}

/// Master region holds the first `msplit` clients, the stack region the rest.
pub(crate) fn tile(params: &LayoutParams, count: usize) -> Vec<Rect> {
    if count == 0 {
        return vec![];
    }

    let msplit = (params.msplit as usize).min(count);
    let axis = &params.axis;

    // One region covers the whole area
    if msplit == 0 {
        return subdivide(params.area, axis.stack, count, params.bar_height);
    }
    if msplit == count {
        return subdivide(params.area, axis.master, count, params.bar_height);
    }

    let mfact = clamp_mfact(params.mfact);
    let (master, stack) = split_area(params.area, mfact, axis);

    let mut rects = subdivide(master, axis.master, msplit, params.bar_height);
    rects.extend(subdivide(
        stack,
        axis.stack,
        count - msplit,
        params.bar_height,
    ));
    rects
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoji_ipc::{Arrangement, AxisTarget};

    fn params(msplit: u32, axis: LayoutAxis) -> LayoutParams {
        LayoutParams {
            area: Rect::new(0, 0, 1000, 800),
            mfact: 0.5,
            msplit,
            axis,
            bar_height: 20,
            visible: 5,
        }
    }

    #[test]
    fn test_two_masters_three_stack() {
        let rects = tile(&params(2, LayoutAxis::default()), 5);
        assert_eq!(rects.len(), 5);

        // Master region 500x800, two clients of 500x400
        assert_eq!(rects[0], Rect::new(0, 0, 500, 400));
        assert_eq!(rects[1], Rect::new(0, 400, 500, 400));

        // Stack region 500x800, three clients of about 267
        assert_eq!(rects[2], Rect::new(500, 0, 500, 266));
        assert_eq!(rects[3], Rect::new(500, 266, 500, 266));
        assert_eq!(rects[4], Rect::new(500, 532, 500, 268));
        assert_eq!(rects[2..].iter().map(|r| r.height).sum::<i32>(), 800);
    }

    #[test]
    fn test_msplit_equal_count_fills_area() {
        let rects = tile(&params(3, LayoutAxis::default()), 3);
        assert!(rects.iter().all(|r| r.width == 1000));
        assert_eq!(rects[0].y, 0);
        assert_eq!(rects[2].bottom(), 800);
    }

    #[test]
    fn test_msplit_clamped_to_count() {
        let rects = tile(&params(10, LayoutAxis::default()), 2);
        assert_eq!(rects, vec![Rect::new(0, 0, 1000, 400), Rect::new(0, 400, 1000, 400)]);
    }

    #[test]
    fn test_msplit_zero_uses_stack_arrangement() {
        let axis = LayoutAxis::default().rotated(AxisTarget::Stack);
        assert_eq!(axis.stack, Arrangement::LeftToRight);
        let rects = tile(&params(0, axis), 2);
        assert_eq!(rects, vec![Rect::new(0, 0, 500, 800), Rect::new(500, 0, 500, 800)]);
    }

    #[test]
    fn test_horizontal_split() {
        let axis = LayoutAxis::default().rotated(AxisTarget::Split);
        let rects = tile(&params(1, axis), 3);
        assert_eq!(rects[0], Rect::new(0, 0, 1000, 400));
        assert_eq!(rects[1], Rect::new(0, 400, 1000, 200));
        assert_eq!(rects[2], Rect::new(0, 600, 1000, 200));
        assert_eq!(symbol(&axis), "TTT");
    }

    #[test]
    fn test_mirrored_master_on_right() {
        let axis = LayoutAxis::default().mirrored();
        let rects = tile(&params(1, axis), 2);
        assert_eq!(rects[0], Rect::new(500, 0, 500, 800));
        assert_eq!(rects[1], Rect::new(0, 0, 500, 800));
        assert_eq!(symbol(&axis), "=[]");
    }

    #[test]
    fn test_mfact_is_clamped() {
        let mut p = params(1, LayoutAxis::default());
        p.mfact = 0.01;
        let rects = tile(&p, 2);
        assert_eq!(rects[0].width, 100);
        assert_eq!(rects[1].width, 900);
    }

    #[test]
    fn test_crowded_stack_falls_back_to_monocle() {
        let mut p = params(1, LayoutAxis::default());
        p.area = Rect::new(0, 0, 1000, 60);
        let rects = tile(&p, 4);
        // 60 / 3 = 20 is not below the bar height
        assert_eq!(rects[1].height, 20);

        let rects = tile(&p, 5);
        // 60 / 4 = 15 is, so every stack client gets the whole region
        assert!(rects[1..].iter().all(|r| *r == Rect::new(500, 0, 500, 60)));
    }
}

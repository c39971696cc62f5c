use shoji_ipc::LayoutAxis;

use super::Tag;

/// Presentation state of one tagset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewParams {
    /// The two alternating layout choices, as indices into the layout list
    pub layouts: [usize; 2],
    pub sel_layout: usize,
    pub mfact: f32,
    pub msplit: u32,
    pub axis: LayoutAxis,
    pub show_bar: bool,
}

impl ViewParams {
    pub fn layout(&self) -> usize {
        self.layouts[self.sel_layout]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub tagset: Tag,
    pub params: ViewParams,
}

/// Per-monitor view history, most recently viewed tagset first.
/// Holds at most one entry per tagset. `Clone` copies every entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewStack {
    entries: Vec<View>,
}

impl ViewStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tagset: Tag) -> Option<&View> {
        self.entries.iter().find(|v| v.tagset == tagset)
    }

    pub fn contains(&self, tagset: Tag) -> bool {
        self.get(tagset).is_some()
    }

    pub fn tagsets(&self) -> Vec<u32> {
        self.entries.iter().map(|v| v.tagset.mask()).collect()
    }

    /// Move the entry for `tagset` to the front, creating it with `params`
    /// when missing. An existing entry takes `params` unless `is_new_view`.
    pub fn push(&mut self, tagset: Tag, params: ViewParams, is_new_view: bool) -> &View {
        let view = match self.entries.iter().position(|v| v.tagset == tagset) {
            Some(pos) => {
                let mut view = self.entries.remove(pos);
                if !is_new_view {
                    view.params = params;
                }
                view
            }
            None => View { tagset, params },
        };
        self.entries.insert(0, view);
        &self.entries[0]
    }

    /// Discard the front entry and return the one it exposes.
    /// A stack with fewer than two entries is left untouched.
    pub fn rewind(&mut self) -> Option<&View> {
        if self.entries.len() < 2 {
            return None;
        }
        self.entries.remove(0);
        self.entries.first()
    }

    /// Alternate tagset for a monitor whose `current` view is empty.
    /// Nearest-to-front wins within each pass:
    /// disjoint and occupied, different and occupied, disjoint, different,
    /// then the lowest never-viewed single tag that has clients.
    pub fn find_spare_tagset(&self, current: Tag, occupied: Tag, num_tags: u32) -> Option<Tag> {
        let candidates = || {
            self.entries
                .iter()
                .map(|v| v.tagset)
                .filter(move |t| *t != current)
        };

        candidates()
            .find(|t| !t.intersects(current) && t.intersects(occupied))
            .or_else(|| candidates().find(|t| t.intersects(occupied)))
            .or_else(|| candidates().find(|t| !t.intersects(current)))
            .or_else(|| candidates().next())
            .or_else(|| self.unseen_occupied_tag(occupied, num_tags))
    }

    /// Tagset the "previous view" binding switches to.
    pub fn find_toggle_tagset(&self, current: Tag, occupied: Tag, num_tags: u32) -> Option<Tag> {
        self.entries
            .iter()
            .map(|v| v.tagset)
            .find(|t| *t != current)
            .or_else(|| self.unseen_occupied_tag(occupied, num_tags))
    }

    fn unseen_occupied_tag(&self, occupied: Tag, num_tags: u32) -> Option<Tag> {
        (1..=num_tags)
            .map(Tag::new)
            .find(|t| t.intersects(occupied) && !self.contains(*t))
    }

    pub(crate) fn take(&mut self) -> ViewStack {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(mfact: f32) -> ViewParams {
        ViewParams {
            layouts: [0, 1],
            sel_layout: 0,
            mfact,
            msplit: 1,
            axis: LayoutAxis::default(),
            show_bar: true,
        }
    }

    #[test]
    fn test_push_same_tagset_twice_keeps_one_entry() {
        let mut stack = ViewStack::new();
        stack.push(Tag::new(1), params(0.5), true);
        stack.push(Tag::new(2), params(0.5), true);
        stack.push(Tag::new(1), params(0.5), true);
        stack.push(Tag::new(1), params(0.5), true);

        assert_eq!(stack.tagsets().len(), 2);
        assert_eq!(stack.tagsets(), vec![0b01, 0b10]);
    }

    #[test]
    fn test_push_new_view_keeps_recorded_params() {
        let mut stack = ViewStack::new();
        stack.push(Tag::new(1), params(0.7), false);
        stack.push(Tag::new(2), params(0.5), true);

        let view = stack.push(Tag::new(1), params(0.3), true);
        assert_eq!(view.params.mfact, 0.7);

        let view = stack.push(Tag::new(1), params(0.3), false);
        assert_eq!(view.params.mfact, 0.3);
    }

    #[test]
    fn test_rewind_single_entry_is_noop() {
        let mut stack = ViewStack::new();
        stack.push(Tag::new(1), params(0.5), true);
        assert!(stack.rewind().is_none());
        assert_eq!(stack.tagsets(), vec![0b01]);
    }

    #[test]
    fn test_rewind_exposes_second() {
        let mut stack = ViewStack::new();
        stack.push(Tag::new(1), params(0.5), true);
        stack.push(Tag::new(3), params(0.6), true);

        let exposed = stack.rewind().map(|v| v.tagset);
        assert_eq!(exposed, Some(Tag::new(1)));
        assert_eq!(stack.tagsets().len(), 1);
    }

    #[test]
    fn test_find_spare_prefers_disjoint_occupied() {
        let mut stack = ViewStack::new();
        stack.push(Tag::from_mask(0b0100), params(0.5), true);
        stack.push(Tag::from_mask(0b0011), params(0.5), true);
        stack.push(Tag::from_mask(0b0001), params(0.5), true);

        // Current 0b0001 is empty; 0b0011 overlaps it, 0b0100 is disjoint
        let occupied = Tag::from_mask(0b0110);
        let spare = stack.find_spare_tagset(Tag::from_mask(0b0001), occupied, 9);
        assert_eq!(spare, Some(Tag::from_mask(0b0100)));
    }

    #[test]
    fn test_find_spare_pass_order() {
        let mut stack = ViewStack::new();
        stack.push(Tag::from_mask(0b1000), params(0.5), true);
        stack.push(Tag::from_mask(0b0011), params(0.5), true);
        stack.push(Tag::from_mask(0b0001), params(0.5), true);
        let current = Tag::from_mask(0b0001);

        // Only the overlapping entry is occupied
        let spare = stack.find_spare_tagset(current, Tag::from_mask(0b0010), 9);
        assert_eq!(spare, Some(Tag::from_mask(0b0011)));

        // Nothing occupied: disjoint wins over nearer overlapping
        let spare = stack.find_spare_tagset(current, Tag::default(), 9);
        assert_eq!(spare, Some(Tag::from_mask(0b1000)));
    }

    #[test]
    fn test_find_spare_falls_back_to_unseen_tag() {
        let mut stack = ViewStack::new();
        stack.push(Tag::new(1), params(0.5), true);

        let spare = stack.find_spare_tagset(Tag::new(1), Tag::from_mask(0b10_0000), 9);
        assert_eq!(spare, Some(Tag::new(6)));

        assert_eq!(stack.find_spare_tagset(Tag::new(1), Tag::default(), 9), None);
    }

    #[test]
    fn test_find_toggle_tagset() {
        let mut stack = ViewStack::new();
        stack.push(Tag::new(2), params(0.5), true);
        stack.push(Tag::new(1), params(0.5), true);

        assert_eq!(
            stack.find_toggle_tagset(Tag::new(1), Tag::default(), 9),
            Some(Tag::new(2))
        );

        let mut single = ViewStack::new();
        single.push(Tag::new(1), params(0.5), true);
        assert_eq!(
            single.find_toggle_tagset(Tag::new(1), Tag::from_mask(0b101), 9),
            Some(Tag::new(3))
        );
    }

    #[test]
    fn test_clone_is_deep() {
        let mut stack = ViewStack::new();
        stack.push(Tag::new(1), params(0.5), true);

        let mut copy = stack.clone();
        copy.push(Tag::new(1), params(0.8), false);

        assert_eq!(stack.get(Tag::new(1)).map(|v| v.params.mfact), Some(0.5));
        assert_eq!(copy.get(Tag::new(1)).map(|v| v.params.mfact), Some(0.8));
    }
}

use shoji_ipc::{LayoutAxis, Rect};

use super::{Config, MonitorId, Tag, ViewParams, ViewStack, WindowId};

#[derive(Debug, Clone)]
pub struct Monitor {
    pub num: MonitorId,
    pub frame: Rect,
    /// Frame minus the bar
    pub work_area: Rect,
    pub bar_y: i32,
    pub show_bar: bool,
    pub top_bar: bool,
    pub tagset: Tag,
    /// 0 while all tags are shown, otherwise the tag number the view is keyed on
    pub cur_tag: u32,
    pub layouts: [usize; 2],
    pub sel_layout: usize,
    pub mfact: f32,
    pub msplit: u32,
    pub axis: LayoutAxis,
    pub layout_symbol: String,
    /// Ownership order, most recently attached first
    pub clients: Vec<WindowId>,
    /// Focus order, most recently focused first
    pub stack: Vec<WindowId>,
    pub sel: Option<WindowId>,
    pub views: ViewStack,
}

impl Monitor {
    pub fn new(num: MonitorId, frame: Rect, config: &Config) -> Self {
        let params = config.default_params();
        let tagset = Tag::new(1);
        let mut views = ViewStack::new();
        views.push(tagset, params, true);

        let mut monitor = Self {
            num,
            frame,
            work_area: frame,
            bar_y: 0,
            show_bar: params.show_bar,
            top_bar: config.top_bar,
            tagset,
            cur_tag: 1,
            layouts: params.layouts,
            sel_layout: params.sel_layout,
            mfact: params.mfact,
            msplit: params.msplit,
            axis: params.axis,
            layout_symbol: String::new(),
            clients: Vec::new(),
            stack: Vec::new(),
            sel: None,
            views,
        };
        monitor.update_bar_pos(config.bar_height);
        monitor
    }

    pub fn params(&self) -> ViewParams {
        ViewParams {
            layouts: self.layouts,
            sel_layout: self.sel_layout,
            mfact: self.mfact,
            msplit: self.msplit,
            axis: self.axis,
            show_bar: self.show_bar,
        }
    }

    /// Restore presentation state. The caller repositions the bar.
    pub fn set_params(&mut self, params: ViewParams) {
        self.layouts = params.layouts;
        self.sel_layout = params.sel_layout;
        self.mfact = params.mfact;
        self.msplit = params.msplit;
        self.axis = params.axis;
        self.show_bar = params.show_bar;
    }

    pub fn layout_index(&self) -> usize {
        self.layouts[self.sel_layout]
    }

    pub fn update_bar_pos(&mut self, bar_height: i32) {
        self.work_area = self.frame;
        if self.show_bar {
            self.work_area.height -= bar_height;
            if self.top_bar {
                self.bar_y = self.frame.y;
                self.work_area.y = self.frame.y + bar_height;
            } else {
                self.bar_y = self.work_area.bottom();
            }
        } else {
            self.bar_y = -bar_height;
        }
    }

    pub fn bar_frame(&self, bar_height: i32) -> Option<Rect> {
        self.show_bar
            .then(|| Rect::new(self.frame.x, self.bar_y, self.frame.width, bar_height))
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.clients.contains(&id)
    }
}

/// Tag number a view is keyed on after the tagset changed.
/// Keeps `previous` while still part of the view, otherwise the lowest set bit.
pub fn derive_cur_tag(tagset: Tag, previous: u32, all: Tag) -> u32 {
    if tagset == all {
        return 0;
    }
    if previous > 0 && tagset.intersects(Tag::new(previous)) {
        return previous;
    }
    tagset.first_tag().unwrap_or(0)
}

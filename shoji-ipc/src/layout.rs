use serde::{Deserialize, Serialize};

/// The finite set of arrange algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    Tile,
    Monocle,
    Varimono,
    Floating,
}

impl LayoutKind {
    /// Floating has no arrange function: clients keep their own geometry.
    pub fn arranges(self) -> bool {
        !matches!(self, LayoutKind::Floating)
    }
}

/// Direction in which the work area is cut into master and stack regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitAxis {
    /// Regions side by side
    Vertical,
    /// Regions on top of each other
    Horizontal,
}

impl SplitAxis {
    pub fn toggled(self) -> Self {
        match self {
            SplitAxis::Vertical => SplitAxis::Horizontal,
            SplitAxis::Horizontal => SplitAxis::Vertical,
        }
    }
}

/// How clients are laid out inside one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arrangement {
    TopToBottom,
    LeftToRight,
    Monocle,
}

impl Arrangement {
    pub fn next(self) -> Self {
        match self {
            Arrangement::TopToBottom => Arrangement::LeftToRight,
            Arrangement::LeftToRight => Arrangement::Monocle,
            Arrangement::Monocle => Arrangement::TopToBottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisTarget {
    Split,
    Master,
    Stack,
}

/// The three orientation values of a tile-family layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutAxis {
    pub split: SplitAxis,
    /// Master region on the right (vertical split) or bottom (horizontal split)
    #[serde(default)]
    pub mirror: bool,
    pub master: Arrangement,
    pub stack: Arrangement,
}

impl Default for LayoutAxis {
    fn default() -> Self {
        Self {
            split: SplitAxis::Vertical,
            mirror: false,
            master: Arrangement::TopToBottom,
            stack: Arrangement::TopToBottom,
        }
    }
}

impl LayoutAxis {
    pub fn rotated(self, target: AxisTarget) -> Self {
        match target {
            AxisTarget::Split => Self {
                split: self.split.toggled(),
                ..self
            },
            AxisTarget::Master => Self {
                master: self.master.next(),
                ..self
            },
            AxisTarget::Stack => Self {
                stack: self.stack.next(),
                ..self
            },
        }
    }

    pub fn mirrored(self) -> Self {
        Self {
            mirror: !self.mirror,
            ..self
        }
    }
}

/// One entry of the configured layout list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub kind: LayoutKind,
    /// Fixed symbol; when absent the arrangement computes one
    #[serde(default)]
    pub symbol: Option<String>,
}

impl LayoutSpec {
    pub fn new(kind: LayoutKind) -> Self {
        Self { kind, symbol: None }
    }
}

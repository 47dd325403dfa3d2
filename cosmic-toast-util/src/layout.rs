//! Box sizing and corner placement.

use cosmic_toast_config::Corner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoxSize {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Screen or work-area rectangle, max edges exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl ScreenBounds {
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self {
            min_x: 0,
            min_y: 0,
            max_x: width,
            max_y: height,
        }
    }
}

/// Final on-screen rectangle of the box, border excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoxGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoxGeometry {
    pub const fn new(origin: Point, size: BoxSize) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Gaps between the bordered box and each screen edge, in the order
    /// top, right, bottom, left. Negative when the box pokes off screen.
    pub const fn edge_gaps(&self, screen: &ScreenBounds, border_size: i32) -> EdgeGaps {
        EdgeGaps {
            top: self.y - screen.min_y,
            right: screen.max_x - (self.x + self.width + 2 * border_size),
            bottom: screen.max_y - (self.y + self.height + 2 * border_size),
            left: self.x - screen.min_x,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EdgeGaps {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

/// Size of a box holding `nlines` lines of text.
///
/// The three paddings cover the top edge, the bottom edge and the gap below
/// the title line.
pub fn box_size(
    nlines: usize,
    line_height: i32,
    line_spacing: i32,
    padding: i32,
    fixed_width: i32,
) -> BoxSize {
    let nlines = i32::try_from(nlines).unwrap_or(i32::MAX);
    let height = nlines
        .saturating_mul(line_height)
        .saturating_add((nlines - 1).saturating_mul(line_spacing))
        .saturating_add(3 * padding);

    BoxSize {
        width: fixed_width.max(0),
        height: height.max(0),
    }
}

/// Top-left corner of a box of `size`, offset from `corner` of `screen` by
/// the insets. The border is drawn outside the box on every side.
///
/// The result is not clamped; oversized boxes or insets land partly or fully
/// off screen.
pub fn place(
    size: BoxSize,
    screen: &ScreenBounds,
    corner: Corner,
    inset_x: i32,
    inset_y: i32,
    border_size: i32,
) -> Point {
    let far_x = screen.max_x - size.width - 2 * border_size - inset_x;
    let far_y = screen.max_y - size.height - 2 * border_size - inset_y;

    let point = match corner {
        Corner::TopLeft => Point {
            x: inset_x,
            y: inset_y,
        },
        Corner::TopRight => Point {
            x: far_x,
            y: inset_y,
        },
        Corner::BottomLeft => Point {
            x: inset_x,
            y: far_y,
        },
        Corner::BottomRight => Point { x: far_x, y: far_y },
    };

    tracing::debug!(?corner, ?size, ?point, "placed notification box");
    point
}

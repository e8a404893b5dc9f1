use serde::{Deserialize, Serialize};

use crate::rect::Rect;

/// Default tile edge length in pixels.
pub const TILE_PIXELS: f32 = 64.0;

/// Which point of a body its position refers to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    TopLeft,
    /// Bottom-centre, the convention level tiles are placed with.
    #[default]
    Bot,
    Center,
}

/// Pixel size of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileScale {
    pub tile_width: f32,
    pub tile_height: f32,
}

impl Default for TileScale {
    fn default() -> Self {
        Self {
            tile_width: TILE_PIXELS,
            tile_height: TILE_PIXELS,
        }
    }
}

/// A static collision box in pixel space. `(x, y)` is the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticBody {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub anchor: Anchor,
}

impl StaticBody {
    /// Size and place a body over `rect`.
    ///
    /// Level tiles are positioned at `(col * tile_width, row * tile_height)`
    /// with that point as the tile's bottom-centre, so cell `(c, r)` spans
    /// `[c - 0.5, c + 0.5] x [r - 1, r]` in tile units. Bodies use the same
    /// frame so they line up with spawned tiles.
    pub fn from_rect(rect: &Rect, scale: &TileScale, anchor: Anchor) -> Self {
        let left = (rect.x as f32 - 0.5) * scale.tile_width;
        let top = (rect.y as f32 - 1.0) * scale.tile_height;
        let width = rect.width as f32 * scale.tile_width;
        let height = rect.height as f32 * scale.tile_height;

        let (x, y) = match anchor {
            Anchor::TopLeft => (left, top),
            Anchor::Bot => (left + width / 2.0, top + height),
            Anchor::Center => (left + width / 2.0, top + height / 2.0),
        };

        Self {
            x,
            y,
            width,
            height,
            anchor,
        }
    }

    /// Top-left corner regardless of anchor.
    pub fn top_left(&self) -> (f32, f32) {
        match self.anchor {
            Anchor::TopLeft => (self.x, self.y),
            Anchor::Bot => (self.x - self.width / 2.0, self.y - self.height),
            Anchor::Center => (self.x - self.width / 2.0, self.y - self.height / 2.0),
        }
    }
}

/// Convert merged hitboxes into one static body each, preserving order.
pub fn layout_bodies(rects: &[Rect], scale: &TileScale, anchor: Anchor) -> Vec<StaticBody> {
    rects
        .iter()
        .map(|r| StaticBody::from_rect(r, scale, anchor))
        .collect()
}

//! Pointer and scroll input folded into a small steering sample.
//!
//! Every event overwrites the previous sample; scenes read the latest value
//! once per step and never see intermediate events.

/// Steering state derived from input, sampled by the scene loop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Influence {
    /// Horizontal pointer offset in [-1, 1]. Left edge of the tracked
    /// region maps to -1, right edge to +1.
    pub x: f32,
    /// Vertical pointer offset in [-1, 1]. Top edge maps to -1.
    pub y: f32,
    /// How far the tracked region has scrolled into view, in [0, 1].
    pub progress: f32,
}

impl Influence {
    pub fn new(x: f32, y: f32, progress: f32) -> Self {
        Self { x, y, progress }
    }
}

/// Screen-space rectangle pointer coordinates are normalized against.
/// For a full-window tracker this is the whole client area; for a section
/// tracker it is that section's current bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Whether any part of the region overlaps a viewport of this height.
    pub fn visible_in(&self, viewport_height: f32) -> bool {
        self.top < viewport_height && self.bottom() > 0.0
    }
}

/// Folds raw pointer/scroll events into an [`Influence`] sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfluenceTracker {
    current: Influence,
}

impl InfluenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn influence(&self) -> Influence {
        self.current
    }

    /// Fold a pointer position into the sample. Coordinates are normalized
    /// against the region and pinned to [-1, 1], so a pointer outside the
    /// region reads as the nearest rim value.
    pub fn on_pointer_move(&mut self, x: f32, y: f32, region: Region) {
        if region.width <= 0.0 || region.height <= 0.0 {
            return;
        }
        self.current.x = (((x - region.left) / region.width) - 0.5) * 2.0;
        self.current.y = (((y - region.top) / region.height) - 0.5) * 2.0;
        self.current.x = self.current.x.clamp(-1.0, 1.0);
        self.current.y = self.current.y.clamp(-1.0, 1.0);
    }

    /// Fold a scroll event into the sample. Progress runs 0 while the
    /// region's top sits at the bottom of the viewport and reaches 1 once
    /// the top has scrolled up to the viewport's top edge.
    pub fn on_scroll(&mut self, region: Region, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.current.progress = (1.0 - region.top / viewport_height).clamp(0.0, 1.0);
    }
}

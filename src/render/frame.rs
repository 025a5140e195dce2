use crate::core::Viewport;
use crate::error::{TimelineError, TimelineResult};
use crate::render::{LinePrimitive, RectPrimitive, TextPrimitive};

/// What a clickable area of the frame refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    GroupHeader { group_id: String },
    Row { row_index: usize },
    Segment { row_index: usize, segment_index: usize },
    Event { row_index: usize, event_index: usize },
}

impl HitTarget {
    /// Segments and events win over the row band they sit on.
    fn precedence(&self) -> u8 {
        match self {
            Self::Event { .. } => 3,
            Self::Segment { .. } => 2,
            Self::GroupHeader { .. } => 1,
            Self::Row { .. } => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HitRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub target: HitTarget,
}

impl HitRegion {
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Backend-agnostic scene for one timeline draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub hit_regions: Vec<HitRegion>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            lines: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
            hit_regions: Vec::new(),
        }
    }

    /// Most specific target under `(x, y)`, if any.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&HitTarget> {
        self.hit_regions
            .iter()
            .filter(|region| region.contains(x, y))
            .max_by_key(|region| region.target.precedence())
            .map(|region| &region.target)
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if !self.viewport.is_valid() {
            return Err(TimelineError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for line in &self.lines {
            line.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rects.is_empty() && self.texts.is_empty()
    }
}

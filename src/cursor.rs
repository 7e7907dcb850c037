use crate::config::LayoutConfig;

/// Vertical write position: page index plus the offset of the next line's top
/// edge, measured downward from the top of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    page: usize,
    y: f32,
    top: f32,
    bottom: f32,
}

impl Cursor {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            page: 0,
            y: config.margin,
            top: config.margin,
            bottom: config.content_bottom(),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// Reserves `height` for the next line and returns the offset to draw it at.
    ///
    /// A line whose bottom would pass the bottom margin moves to a fresh page.
    /// A page that is still empty takes the line regardless, so an oversized
    /// line cannot spin out blank pages.
    pub fn place_line(&mut self, height: f32) -> f32 {
        if self.y > self.top && self.y + height > self.bottom {
            self.page += 1;
            self.y = self.top;
            log::debug!("page break: starting page {}", self.page + 1);
        }

        let y = self.y;
        self.y += height;
        y
    }

    /// Adds vertical spacing without checking for a page break; the next
    /// [`place_line`](Self::place_line) absorbs any overflow.
    pub fn advance(&mut self, gap: f32) {
        self.y += gap;
    }
}

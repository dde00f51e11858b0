//! # Scroll regions
//!
//! A `ScrollHost` backs one bounded-height region. Each layout pass reports
//! the measured content size; the offset comes either from the platform's
//! scroll view (`set_offset`) or from wheel deltas routed by the host
//! (`scroll_by`).
//!
//! Offsets follow the scroll view's coordinate space: `y` is `0` at the top
//! and negative once the content has moved up.
//!
//! ```rust
//! use ccmenu_core::*;
//! use ccmenu_ui::scroll::*;
//!
//! let s = ScrollHost::new(300.0);
//! s.set_content_size(Size::new(310.0, 500.0));
//! assert_eq!(s.visible_height(), 300.0);
//!
//! let leftover = s.scroll_by(250.0);
//! assert_eq!(s.offset().y, -200.0);
//! assert_eq!(leftover, 50.0);
//! assert_eq!(s.indicators(), OverflowIndicators { top: true, bottom: false });
//! ```

use ccmenu_core::{Signal, Size, Vec2, signal};

use crate::item::clamp_len;

/// How far past the top the content must move before the top indicator shows.
pub const INDICATOR_EPSILON: f32 = 1.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverflowIndicators {
    /// Content hidden above the viewport.
    pub top: bool,
    /// Content hidden below the viewport.
    pub bottom: bool,
}

pub struct ScrollHost {
    max_height: f32,
    offset: Signal<Vec2>,
    content_size: Signal<Size>,
}

impl ScrollHost {
    /// `max_height` is clamped to be non-negative.
    pub fn new(max_height: f32) -> Self {
        Self {
            max_height: clamp_len(max_height),
            offset: signal(Vec2::ZERO),
            content_size: signal(Size::ZERO),
        }
    }

    pub fn max_height(&self) -> f32 {
        self.max_height
    }

    pub fn offset(&self) -> Vec2 {
        self.offset.get()
    }

    pub fn content_size(&self) -> Size {
        self.content_size.get()
    }

    /// Records an offset reported by the platform, as is.
    pub fn set_offset(&self, offset: Vec2) {
        self.offset.set_if_changed(offset);
    }

    /// Records the measured content size and pulls the offset back in range.
    pub fn set_content_size(&self, size: Size) {
        let size = Size::new(clamp_len(size.width), clamp_len(size.height));
        if self.content_size.set_if_changed(size) {
            log::trace!("scroll: content {}x{}", size.width, size.height);
        }
        let y = self.offset.with(|o| o.y);
        let clamped = y.clamp(-self.max_scroll(), 0.0);
        if clamped != y {
            self.offset.update(|o| o.y = clamped);
        }
    }

    /// Height the region occupies: the content, up to `max_height`.
    pub fn visible_height(&self) -> f32 {
        self.max_height.min(self.content_size.with(|s| s.height))
    }

    /// How far the content can move up.
    pub fn max_scroll(&self) -> f32 {
        (self.content_size.with(|s| s.height) - self.visible_height()).max(0.0)
    }

    pub fn can_scroll_up(&self) -> bool {
        self.offset.with(|o| o.y) < -INDICATOR_EPSILON
    }

    pub fn can_scroll_down(&self) -> bool {
        self.offset.with(|o| o.y) > self.max_height - self.content_size.with(|s| s.height)
    }

    pub fn indicators(&self) -> OverflowIndicators {
        OverflowIndicators {
            top: self.can_scroll_up(),
            bottom: self.can_scroll_down(),
        }
    }

    /// Consumes a wheel delta (positive moves toward the end of the content)
    /// and returns what is left for an enclosing scroller.
    pub fn scroll_by(&self, dy: f32) -> f32 {
        let before = self.offset.with(|o| o.y);
        let after = (before - dy).clamp(-self.max_scroll(), 0.0);
        if after != before {
            self.offset.update(|o| o.y = after);
        }
        dy - (before - after)
    }
}

impl Default for ScrollHost {
    fn default() -> Self {
        Self::new(crate::item::ScrollRegionItem::DEFAULT_MAX_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(content: f32) -> ScrollHost {
        let s = ScrollHost::new(300.0);
        s.set_content_size(Size::new(310.0, content));
        s
    }

    #[test]
    fn indicators_follow_the_offset() {
        let s = host(500.0);
        let at = |y: f32| {
            s.set_offset(Vec2::new(0.0, y));
            let i = s.indicators();
            (i.top, i.bottom)
        };
        assert_eq!(at(0.0), (false, true));
        assert_eq!(at(-5.0), (true, true));
        assert_eq!(at(-200.0), (true, false));
        assert_eq!(at(-0.5), (false, true), "within epsilon of the top");
    }

    #[test]
    fn short_content_never_overflows() {
        let s = host(120.0);
        assert_eq!(s.visible_height(), 120.0);
        assert_eq!(s.max_scroll(), 0.0);
        assert_eq!(s.indicators(), OverflowIndicators::default());
        assert_eq!(s.scroll_by(40.0), 40.0);
        assert_eq!(s.offset().y, 0.0);
    }

    #[test]
    fn scroll_by_clamps_and_returns_the_rest() {
        let s = host(500.0);
        assert_eq!(s.scroll_by(150.0), 0.0);
        assert_eq!(s.offset().y, -150.0);
        assert_eq!(s.scroll_by(100.0), 50.0);
        assert_eq!(s.offset().y, -200.0);
        assert_eq!(s.scroll_by(-260.0), -60.0);
        assert_eq!(s.offset().y, 0.0);
    }

    #[test]
    fn shrinking_content_pulls_the_offset_back() {
        let s = host(500.0);
        s.scroll_by(200.0);
        s.set_content_size(Size::new(310.0, 350.0));
        assert_eq!(s.offset().y, -50.0);
        assert!(!s.can_scroll_down());
    }

    #[test]
    fn negative_max_height_is_clamped() {
        let s = ScrollHost::new(-20.0);
        assert_eq!(s.max_height(), 0.0);
        s.set_content_size(Size::new(10.0, 40.0));
        assert_eq!(s.visible_height(), 0.0);
        assert_eq!(ScrollHost::new(f32::NAN).max_height(), 0.0);
    }
}

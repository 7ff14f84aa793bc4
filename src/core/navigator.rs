//! # Horizontal Scroll Navigator
//!
//! Moves a horizontal viewport one "page" at a time. A page is the viewport
//! width minus a fixed margin, so the card at the edge stays partly visible
//! after the jump.

/// Default margin subtracted from the viewport width on each jump.
pub const DEFAULT_SCROLL_MARGIN: u32 = 110;

/// Scroll geometry of a horizontal container, in abstract units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// Offset of the left edge of the visible window.
    pub scroll_left: u32,
    /// Width of the visible window.
    pub client_width: u32,
    /// Width of the whole content.
    pub scroll_width: u32,
}

impl Viewport {
    pub fn new(client_width: u32, scroll_width: u32) -> Self {
        Self {
            scroll_left: 0,
            client_width,
            scroll_width,
        }
    }

    /// Largest valid `scroll_left`.
    pub fn max_scroll(&self) -> u32 {
        self.scroll_width.saturating_sub(self.client_width)
    }

    /// True when the right edge of the window has reached the end of the
    /// content (`scrollLeft + clientWidth >= scrollWidth`).
    pub fn at_end(&self) -> bool {
        self.scroll_left + self.client_width >= self.scroll_width
    }

    /// Set the offset, clamped to the content.
    pub fn scroll_to(&mut self, offset: u32) {
        self.scroll_left = offset.min(self.max_scroll());
    }

    /// Update the measured sizes, keeping the offset inside the new bounds.
    pub fn resize(&mut self, client_width: u32, scroll_width: u32) {
        self.client_width = client_width;
        self.scroll_width = scroll_width;
        self.scroll_to(self.scroll_left);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Back,
    Forward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollNavigator {
    margin: u32,
}

impl Default for ScrollNavigator {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_MARGIN)
    }
}

impl ScrollNavigator {
    pub fn new(margin: u32) -> Self {
        Self { margin }
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    /// Distance of one jump for a viewport of this width.
    pub fn step(&self, viewport: &Viewport) -> u32 {
        viewport.client_width.saturating_sub(self.margin)
    }

    /// Jump one page in `direction`. Does nothing when no viewport is attached.
    pub fn navigate(&self, viewport: Option<&mut Viewport>, direction: ScrollDirection) {
        let Some(viewport) = viewport else {
            return;
        };
        let step = self.step(viewport);
        let target = match direction {
            ScrollDirection::Forward => viewport.scroll_left.saturating_add(step),
            ScrollDirection::Back => viewport.scroll_left.saturating_sub(step),
        };
        viewport.scroll_to(target);
    }

    pub fn forward(&self, viewport: Option<&mut Viewport>) {
        self.navigate(viewport, ScrollDirection::Forward);
    }

    pub fn back(&self, viewport: Option<&mut Viewport>) {
        self.navigate(viewport, ScrollDirection::Back);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide_viewport(width: u32) -> Viewport {
        Viewport::new(width, 100_000)
    }

    #[test]
    fn test_forward_moves_by_width_minus_margin() {
        let nav = ScrollNavigator::default();
        let mut vp = wide_viewport(1280);
        nav.forward(Some(&mut vp));
        assert_eq!(vp.scroll_left, 1280 - 110);
    }

    #[test]
    fn test_back_undoes_forward() {
        let nav = ScrollNavigator::default();
        let mut vp = wide_viewport(1280);
        vp.scroll_to(5000);
        nav.back(Some(&mut vp));
        assert_eq!(vp.scroll_left, 5000 - 1170);
        nav.forward(Some(&mut vp));
        assert_eq!(vp.scroll_left, 5000);
    }

    #[test]
    fn test_two_forward_one_back_nets_one_forward() {
        let nav = ScrollNavigator::default();
        let mut vp = wide_viewport(800);
        nav.forward(Some(&mut vp));
        nav.forward(Some(&mut vp));
        nav.back(Some(&mut vp));
        assert_eq!(vp.scroll_left, 800 - 110);
    }

    #[test]
    fn test_detached_viewport_is_noop() {
        let nav = ScrollNavigator::default();
        nav.forward(None);
        nav.back(None);
    }

    #[test]
    fn test_offset_is_clamped_to_content() {
        let nav = ScrollNavigator::new(10);
        let mut vp = Viewport::new(100, 250);
        nav.forward(Some(&mut vp));
        assert_eq!(vp.scroll_left, 90);
        nav.forward(Some(&mut vp));
        assert_eq!(vp.scroll_left, 150);
        nav.back(Some(&mut vp));
        nav.back(Some(&mut vp));
        assert_eq!(vp.scroll_left, 0);
    }

    #[test]
    fn test_at_end_threshold() {
        let mut vp = Viewport::new(100, 250);
        assert!(!vp.at_end());
        vp.scroll_to(149);
        assert!(!vp.at_end());
        vp.scroll_to(150);
        assert!(vp.at_end());
        // Content narrower than the window is always at the end
        assert!(Viewport::new(100, 40).at_end());
    }

    #[test]
    fn test_resize_keeps_offset_in_bounds() {
        let mut vp = Viewport::new(100, 1000);
        vp.scroll_to(900);
        assert_eq!(vp.scroll_left, 900);
        vp.resize(200, 1000);
        assert_eq!(vp.scroll_left, 800);
    }

    #[test]
    fn test_narrow_viewport_step_is_zero() {
        let nav = ScrollNavigator::default();
        let mut vp = wide_viewport(80);
        assert_eq!(nav.step(&vp), 0);
        nav.forward(Some(&mut vp));
        assert_eq!(vp.scroll_left, 0);
    }
}

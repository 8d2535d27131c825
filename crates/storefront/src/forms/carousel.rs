use std::ops::Range;

/// Slides shown at once.
pub const VISIBLE_SLIDES: usize = 3;

/// Windowed navigation over image slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    current_index: usize,
    visible_slides: usize,
    len: usize,
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(VISIBLE_SLIDES)
    }
}

impl Carousel {
    #[must_use]
    pub const fn new(visible_slides: usize) -> Self {
        Self {
            current_index: 0,
            visible_slides,
            len: 0,
        }
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Update the slide count, pulling the window back if it now runs past
    /// the end.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        let last_start = len.saturating_sub(self.visible_slides);
        if self.current_index > 0 && self.current_index >= last_start {
            self.current_index = last_start;
        }
    }

    #[must_use]
    pub const fn can_go_next(&self) -> bool {
        self.len > self.visible_slides && self.current_index < self.len - self.visible_slides
    }

    #[must_use]
    pub const fn can_go_previous(&self) -> bool {
        self.current_index > 0
    }

    #[must_use]
    pub const fn show_navigation(&self) -> bool {
        self.len > self.visible_slides
    }

    pub fn next(&mut self) {
        if self.can_go_next() {
            self.current_index += 1;
        }
    }

    pub fn previous(&mut self) {
        if self.can_go_previous() {
            self.current_index -= 1;
        }
    }

    /// Indices of the slides currently in view.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.current_index + self.visible_slides).min(self.len);
        self.current_index.min(end)..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(len: usize) -> Carousel {
        let mut c = Carousel::default();
        c.set_len(len);
        c
    }

    #[test]
    fn test_no_navigation_when_everything_fits() {
        let mut c = carousel(3);
        assert!(!c.show_navigation());
        assert!(!c.can_go_next());
        c.next();
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.visible_range(), 0..3);
    }

    #[test]
    fn test_next_stops_at_last_window() {
        let mut c = carousel(5);
        assert!(c.show_navigation());
        c.next();
        c.next();
        c.next();
        assert_eq!(c.current_index(), 2);
        assert!(!c.can_go_next());
        assert_eq!(c.visible_range(), 2..5);

        c.previous();
        assert_eq!(c.current_index(), 1);
        assert!(c.can_go_previous());
    }

    #[test]
    fn test_removal_clamps_index() {
        let mut c = carousel(6);
        c.next();
        c.next();
        c.next();
        assert_eq!(c.current_index(), 3);

        c.set_len(5);
        assert_eq!(c.current_index(), 2);

        c.set_len(2);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.visible_range(), 0..2);
    }

    #[test]
    fn test_empty() {
        let c = carousel(0);
        assert!(c.is_empty());
        assert!(!c.can_go_previous());
        assert_eq!(c.visible_range(), 0..0);
    }
}

//! Slide Navigator
//! Current-slide state machine. All moves clamp at the deck edges.

/// Directional inputs understood by the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Forward,
    Back,
    Home,
    End,
}

/// Tracks the current slide index within a fixed-size deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current: usize,
    total: usize,
}

impl Navigator {
    /// `total` is the deck length; decks are never empty, so it is at least 1.
    pub fn new(total: usize) -> Self {
        Self {
            current: 0,
            total: total.max(1),
        }
    }

    /// Start on `index` (clamped).
    pub fn starting_at(total: usize, index: usize) -> Self {
        let mut nav = Self::new(total);
        nav.go_to(index);
        nav
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current == self.total - 1
    }

    /// Advance one slide. Returns whether the index changed.
    pub fn next(&mut self) -> bool {
        if self.current < self.total - 1 {
            self.set(self.current + 1)
        } else {
            false
        }
    }

    /// Go back one slide. Returns whether the index changed.
    pub fn previous(&mut self) -> bool {
        if self.current > 0 {
            self.set(self.current - 1)
        } else {
            false
        }
    }

    /// Jump to `index`; indices past the end land on the last slide.
    pub fn go_to(&mut self, index: usize) -> bool {
        self.set(index.min(self.total - 1))
    }

    pub fn first(&mut self) -> bool {
        self.set(0)
    }

    pub fn last(&mut self) -> bool {
        self.set(self.total - 1)
    }

    pub fn handle_key(&mut self, key: NavKey) -> bool {
        match key {
            NavKey::Forward => self.next(),
            NavKey::Back => self.previous(),
            NavKey::Home => self.first(),
            NavKey::End => self.last(),
        }
    }

    fn set(&mut self, index: usize) -> bool {
        if index == self.current {
            return false;
        }
        log::debug!("Slide {} -> {} of {}", self.current + 1, index + 1, self.total);
        self.current = index;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOTAL: usize = 7;

    #[test]
    fn test_next_saturates_at_last_slide() {
        for n in 0..TOTAL * 2 {
            let mut nav = Navigator::new(TOTAL);
            for _ in 0..n {
                nav.next();
            }
            assert_eq!(nav.current(), n.min(TOTAL - 1), "after {} next() calls", n);
        }
    }

    #[test]
    fn test_previous_saturates_at_first_slide() {
        for n in 0..TOTAL * 2 {
            let mut nav = Navigator::new(TOTAL);
            nav.last();
            for _ in 0..n {
                nav.previous();
            }
            let expected = (TOTAL - 1).saturating_sub(n);
            assert_eq!(nav.current(), expected, "after {} previous() calls", n);
        }
    }

    #[test]
    fn test_go_to_then_next_previous_returns() {
        for i in 1..TOTAL - 1 {
            let mut nav = Navigator::new(TOTAL);
            assert!(nav.go_to(i));
            assert!(nav.next());
            assert!(nav.previous());
            assert_eq!(nav.current(), i);
        }
    }

    #[test]
    fn test_boundaries_are_idempotent() {
        let mut nav = Navigator::new(TOTAL);
        assert!(nav.is_first());
        assert!(!nav.previous());
        assert!(!nav.previous());
        assert_eq!(nav.current(), 0);

        nav.last();
        assert!(nav.is_last());
        assert!(!nav.next());
        assert!(!nav.next());
        assert_eq!(nav.current(), TOTAL - 1);
    }

    #[test]
    fn test_go_to_out_of_range_clamps() {
        let mut nav = Navigator::new(TOTAL);
        assert!(nav.go_to(100));
        assert_eq!(nav.current(), TOTAL - 1);
        assert!(!nav.go_to(TOTAL));

        let nav = Navigator::starting_at(TOTAL, 42);
        assert_eq!(nav.current(), TOTAL - 1);
    }

    #[test]
    fn test_single_slide_deck() {
        let mut nav = Navigator::new(1);
        assert!(nav.is_first() && nav.is_last());
        assert!(!nav.next());
        assert!(!nav.previous());
        assert!(!nav.go_to(3));
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn test_key_bindings() {
        let mut nav = Navigator::new(TOTAL);
        nav.handle_key(NavKey::Forward);
        nav.handle_key(NavKey::Forward);
        assert_eq!(nav.current(), 2);
        nav.handle_key(NavKey::Back);
        assert_eq!(nav.current(), 1);
        nav.handle_key(NavKey::End);
        assert_eq!(nav.current(), TOTAL - 1);
        nav.handle_key(NavKey::Home);
        assert_eq!(nav.current(), 0);
    }
}

use crate::markdown::elements::Link;

/// The direction to move the link selection in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Up,
    Down,
}

/// The navigable links in a slide, along with the one that's currently selected.
#[derive(Clone, Debug, Default)]
pub(crate) struct LinkNavigator {
    links: Vec<Link>,
    selected: usize,
}

impl LinkNavigator {
    /// Construct a navigator with the first link selected.
    pub(crate) fn new(links: Vec<Link>) -> Self {
        Self { links, selected: 0 }
    }

    /// Move the selection, wrapping around at both ends.
    pub(crate) fn navigate(&mut self, direction: Direction) {
        let total = self.links.len();
        if total == 0 {
            return;
        }
        self.selected = match direction {
            Direction::Down => (self.selected + 1) % total,
            Direction::Up => (self.selected + total - 1) % total,
        };
    }

    /// Select the link at the given index, if there's one.
    pub(crate) fn select(&mut self, index: usize) {
        if index < self.links.len() {
            self.selected = index;
        }
    }

    pub(crate) fn selected_link(&self) -> Option<&Link> {
        self.links.get(self.selected)
    }

    pub(crate) fn selected_index(&self) -> Option<usize> {
        if self.links.is_empty() { None } else { Some(self.selected) }
    }

    pub(crate) fn links(&self) -> &[Link] {
        &self.links
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::corpus::Corpus;
use crate::error::NavigationError;
use crate::models::ChapterId;

/// Title of the search destination, used both in the drawer and the header.
pub(crate) const SEARCH_TITLE: &str = "Search";

/// Stable lookup key of a navigable screen. Display text lives separately in
/// [`Destination`] so renaming a chapter never changes its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DestinationKey {
    Search,
    Chapter(ChapterId),
}

impl fmt::Display for DestinationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationKey::Search => write!(f, "search"),
            DestinationKey::Chapter(id) => write!(f, "chapter {id}"),
        }
    }
}

/// A registered screen plus the text shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub key: DestinationKey,
    /// Drawer entry, e.g. `"2. The Cow"`.
    pub label: String,
    /// Header shown while the destination is active.
    pub header_title: String,
}

/// Drawer-style registry. Destinations keep registration order, which is the
/// order the drawer lists them in.
#[derive(Debug, Default)]
pub struct Navigator {
    destinations: Vec<Destination>,
    index: HashMap<DestinationKey, usize>,
}

impl Navigator {
    /// Register the search screen followed by one destination per chapter.
    pub fn register(corpus: &Corpus) -> Result<Self, NavigationError> {
        let mut navigator = Self::default();
        navigator.add(Destination {
            key: DestinationKey::Search,
            label: SEARCH_TITLE.to_string(),
            header_title: SEARCH_TITLE.to_string(),
        })?;
        for chapter in corpus.chapters() {
            navigator.add(Destination {
                key: DestinationKey::Chapter(chapter.id),
                label: chapter.display_title(),
                header_title: chapter.translation.clone(),
            })?;
        }
        debug!(count = navigator.len(), "registered destinations");
        Ok(navigator)
    }

    pub fn add(&mut self, destination: Destination) -> Result<(), NavigationError> {
        if self.index.contains_key(&destination.key) {
            return Err(NavigationError::DuplicateDestination(destination.key));
        }
        self.index.insert(destination.key, self.destinations.len());
        self.destinations.push(destination);
        Ok(())
    }

    /// Resolve a key to its registered destination.
    pub fn navigate(&self, key: DestinationKey) -> Result<&Destination, NavigationError> {
        self.position(key)
            .map(|index| &self.destinations[index])
            .ok_or(NavigationError::UnknownDestination(key))
    }

    pub fn position(&self, key: DestinationKey) -> Option<usize> {
        self.index.get(&key).copied()
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

/// Cursor over the drawer entries while the drawer is open.
pub(crate) struct DrawerState {
    pub(crate) selected: usize,
}

impl DrawerState {
    pub(crate) fn new(selected: usize) -> Self {
        Self { selected }
    }

    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        let max = len as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, max) as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::load_from_str;

    fn corpus() -> Corpus {
        load_from_str(
            r#"[
                {"id": 1, "translation": "The Opening"},
                {"id": 2, "translation": "The Cow"},
                {"id": 3, "translation": "The Cow"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn registers_search_then_chapters() {
        let navigator = Navigator::register(&corpus()).unwrap();
        let labels: Vec<&str> = navigator
            .destinations()
            .iter()
            .map(|d| d.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Search", "1. The Opening", "2. The Cow", "3. The Cow"]);
        assert_eq!(navigator.destinations()[2].header_title, "The Cow");
    }

    #[test]
    fn distinct_chapters_never_collide() {
        let navigator = Navigator::register(&corpus()).unwrap();
        let two = navigator.navigate(DestinationKey::Chapter(2)).unwrap();
        let three = navigator.navigate(DestinationKey::Chapter(3)).unwrap();
        assert_ne!(two.key, three.key);
        assert_eq!(two.header_title, three.header_title);
        assert_eq!(navigator.len(), 4);
    }

    #[test]
    fn unknown_destination_is_an_error() {
        let navigator = Navigator::register(&corpus()).unwrap();
        assert_eq!(
            navigator.navigate(DestinationKey::Chapter(99)),
            Err(NavigationError::UnknownDestination(DestinationKey::Chapter(99)))
        );
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut navigator = Navigator::default();
        let search = Destination {
            key: DestinationKey::Search,
            label: SEARCH_TITLE.to_string(),
            header_title: SEARCH_TITLE.to_string(),
        };
        navigator.add(search.clone()).unwrap();
        assert_eq!(
            navigator.add(search),
            Err(NavigationError::DuplicateDestination(DestinationKey::Search))
        );
    }

    #[test]
    fn drawer_selection_is_clamped() {
        let mut drawer = DrawerState::new(0);
        drawer.move_selection(-3, 4);
        assert_eq!(drawer.selected, 0);
        drawer.move_selection(10, 4);
        assert_eq!(drawer.selected, 3);
    }
}

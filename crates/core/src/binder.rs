use crate::deck::SlideDeck;
use slide_remote_channel::Command;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SlideHandler {
    slide: usize,
}

/// One live set of heading activation handlers plus the active-slide markers.
///
/// Built from a deck in document order, heading `i` maps to slide `i`.
/// Once [`teardown`](Self::teardown) runs nothing in the set fires again.
#[derive(Debug, Default)]
pub struct NavigationBindings {
    handlers: Vec<SlideHandler>,
    active: Vec<bool>,
}

impl NavigationBindings {
    pub fn bind(deck: &SlideDeck) -> Self {
        let handlers = (0..deck.len()).map(|slide| SlideHandler { slide }).collect();
        Self {
            handlers,
            active: vec![false; deck.len()],
        }
    }

    /// The request heading `element` issues when activated.
    pub fn activate(&self, element: usize) -> Option<Command> {
        self.handlers
            .get(element)
            .map(|handler| Command::ShowSlide(handler.slide))
    }

    pub fn highlight(&mut self, index: usize) -> bool {
        if index >= self.active.len() {
            return false;
        }
        for marker in self.active.iter_mut() {
            *marker = false;
        }
        self.active[index] = true;
        true
    }

    pub fn teardown(&mut self) {
        self.handlers.clear();
        self.active.clear();
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn slide_for(&self, element: usize) -> Option<usize> {
        self.handlers.get(element).map(|h| h.slide)
    }

    pub fn active_slide(&self) -> Option<usize> {
        self.active.iter().position(|&marked| marked)
    }

    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|&&marked| marked).count()
    }
}

/// Owns the binding set for the current connected session, if any.
#[derive(Debug, Default)]
pub struct NavigationBinder {
    bindings: Option<NavigationBindings>,
}

impl NavigationBinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rebuild(&mut self, deck: &SlideDeck) {
        self.teardown();
        let bindings = NavigationBindings::bind(deck);
        debug!("Bound {} slide headings", bindings.len());
        self.bindings = Some(bindings);
    }

    pub fn teardown(&mut self) {
        if let Some(mut bindings) = self.bindings.take() {
            debug!("Unbinding {} slide headings", bindings.len());
            bindings.teardown();
        }
    }

    pub fn highlight(&mut self, index: usize) -> bool {
        self.bindings
            .as_mut()
            .is_some_and(|bindings| bindings.highlight(index))
    }

    pub fn activate(&self, element: usize) -> Option<Command> {
        self.bindings.as_ref()?.activate(element)
    }

    pub fn bindings(&self) -> Option<&NavigationBindings> {
        self.bindings.as_ref()
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.as_ref().map_or(0, NavigationBindings::len)
    }

    pub fn active_slide(&self) -> Option<usize> {
        self.bindings.as_ref()?.active_slide()
    }
}

//! Multi-step controller over a fixed sequence of pages.
//!
//! DESIGN
//! ======
//! The controller owns a non-empty list of opaque pages and a single
//! position index. Position only moves through `advance`, `retreat` and
//! `jump_to`; every committed move reports a [`StepChange`] to the optional
//! focus handler after the new position is stored, so the host can bring
//! the freshly shown page into view.
//!
//! ERROR HANDLING
//! ==============
//! Boundary moves (`advance` on the last page, `retreat` on the first) are
//! no-ops. Out-of-range jumps are rejected with [`StepError::OutOfRange`]
//! and leave the position untouched.

#[cfg(test)]
#[path = "step_test.rs"]
mod step_test;

use std::fmt;

/// Error returned by [`StepController`] construction and jumps.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    /// The controller was given no pages.
    #[error("step controller requires at least one page")]
    EmptySequence,
    /// A jump targeted an index outside `0..len`.
    #[error("step index {index} out of range (page count {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Which navigation controls are valid at the current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigationState {
    pub can_go_back: bool,
    pub can_go_next: bool,
    pub is_final_step: bool,
}

impl NavigationState {
    /// Derive the navigation flags for `position` in a sequence of `len` pages.
    #[must_use]
    pub fn at(position: usize, len: usize) -> Self {
        let last = len.saturating_sub(1);
        Self { can_go_back: position > 0, can_go_next: position < last, is_final_step: position == last }
    }
}

/// A committed position change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepChange {
    pub from: usize,
    pub to: usize,
}

type FocusHandler = Box<dyn FnMut(StepChange) + Send + Sync>;

/// Sequences through a fixed, non-empty list of pages.
pub struct StepController<P> {
    pages: Vec<P>,
    position: usize,
    on_focus: Option<FocusHandler>,
}

impl<P> StepController<P> {
    /// Build a controller positioned on the first page.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::EmptySequence`] if `pages` is empty.
    pub fn new(pages: Vec<P>) -> Result<Self, StepError> {
        if pages.is_empty() {
            return Err(StepError::EmptySequence);
        }
        Ok(Self { pages, position: 0, on_focus: None })
    }

    /// Install the handler fired after each committed position change.
    ///
    /// Construction never fires it; only later moves do.
    #[must_use]
    pub fn with_focus_handler<F>(mut self, handler: F) -> Self
    where
        F: FnMut(StepChange) + Send + Sync + 'static,
    {
        self.on_focus = Some(Box::new(handler));
        self
    }

    /// Zero-based index of the visible page.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of pages. Always at least one.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn pages(&self) -> &[P] {
        &self.pages
    }

    /// The page at the current position.
    #[must_use]
    pub fn current_page(&self) -> &P {
        // position < len holds from construction onward.
        &self.pages[self.position]
    }

    #[must_use]
    pub fn navigation_state(&self) -> NavigationState {
        NavigationState::at(self.position, self.pages.len())
    }

    /// Move to the next page. Returns `None` on the last page.
    pub fn advance(&mut self) -> Option<StepChange> {
        if !self.navigation_state().can_go_next {
            return None;
        }
        Some(self.commit(self.position + 1))
    }

    /// Move to the previous page. Returns `None` on the first page.
    pub fn retreat(&mut self) -> Option<StepChange> {
        if !self.navigation_state().can_go_back {
            return None;
        }
        Some(self.commit(self.position - 1))
    }

    /// Move directly to `index`.
    ///
    /// Jumping to the current page succeeds with `Ok(None)` and does not
    /// fire the focus handler.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::OutOfRange`] if `index >= page_count()`; the
    /// position is left unchanged.
    pub fn jump_to(&mut self, index: usize) -> Result<Option<StepChange>, StepError> {
        let len = self.pages.len();
        if index >= len {
            return Err(StepError::OutOfRange { index, len });
        }
        if index == self.position {
            return Ok(None);
        }
        Ok(Some(self.commit(index)))
    }

    fn commit(&mut self, to: usize) -> StepChange {
        let change = StepChange { from: self.position, to };
        self.position = to;
        if let Some(handler) = self.on_focus.as_mut() {
            handler(change);
        }
        change
    }
}

impl<P> TryFrom<Vec<P>> for StepController<P> {
    type Error = StepError;

    fn try_from(pages: Vec<P>) -> Result<Self, Self::Error> {
        Self::new(pages)
    }
}

impl<P: fmt::Debug> fmt::Debug for StepController<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepController")
            .field("pages", &self.pages)
            .field("position", &self.position)
            .field("has_focus_handler", &self.on_focus.is_some())
            .finish()
    }
}

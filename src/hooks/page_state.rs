use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use crate::models::error::AppError;

/// Lifecycle of one page's data.
///
/// `Loading` and `Error` keep the last successful payload, if any, so a page
/// can keep showing it while refreshing or after a failed refresh.
#[derive(Debug, PartialEq)]
pub enum FetchState<T> {
    Loading(Option<Rc<T>>),
    Ready(Rc<T>),
    Error {
        message: String,
        stale: Option<Rc<T>>,
    },
}

// Manual impl: cloning only bumps the Rc, so `T: Clone` is not needed.
impl<T> Clone for FetchState<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Loading(previous) => Self::Loading(previous.clone()),
            Self::Ready(data) => Self::Ready(Rc::clone(data)),
            Self::Error { message, stale } => Self::Error {
                message: message.clone(),
                stale: stale.clone(),
            },
        }
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::Loading(None)
    }
}

/// What the status banner should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    /// First load, nothing to show yet
    Loading,
    /// Reloading while previous data stays on screen
    Refreshing,
    Ready,
    /// Failed with nothing to show: offer a retry
    Failed(String),
    /// Failed, but older data is still on screen
    Stale(String),
}

impl<T> FetchState<T> {
    /// Returns true if the state is loading
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    /// The payload to render: fresh, or retained from an earlier success.
    pub const fn data(&self) -> Option<&Rc<T>> {
        match self {
            Self::Ready(data) => Some(data),
            Self::Loading(previous) => previous.as_ref(),
            Self::Error { stale, .. } => stale.as_ref(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn status(&self) -> PageStatus {
        match self {
            Self::Loading(None) => PageStatus::Loading,
            Self::Loading(Some(_)) => PageStatus::Refreshing,
            Self::Ready(_) => PageStatus::Ready,
            Self::Error {
                message,
                stale: None,
            } => PageStatus::Failed(message.clone()),
            Self::Error {
                message,
                stale: Some(_),
            } => PageStatus::Stale(message.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Completed,
    /// A join for this page was still outstanding
    Skipped,
}

/// Drives one page's [`FetchState`] through its joins.
///
/// At most one join runs at a time; a refresh triggered while one is
/// outstanding is skipped. Every state change is pushed to `on_change`.
pub struct PageController<T> {
    state: RefCell<FetchState<T>>,
    in_flight: Cell<bool>,
    on_change: Box<dyn Fn(&FetchState<T>)>,
}

impl<T> PageController<T> {
    pub fn new(on_change: impl Fn(&FetchState<T>) + 'static) -> Self {
        Self {
            state: RefCell::new(FetchState::default()),
            in_flight: Cell::new(false),
            on_change: Box::new(on_change),
        }
    }

    pub fn state(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Runs `join` unless one is already outstanding, then settles the state
    /// to `Ready` or `Error` from its result.
    pub async fn refresh<F, Fut>(&self, join: F) -> RefreshOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        if self.in_flight.replace(true) {
            return RefreshOutcome::Skipped;
        }

        if !self.state.borrow().is_loading() {
            let previous = self.state.borrow().data().cloned();
            self.transition(FetchState::Loading(previous));
        }

        let result = join().await;
        self.in_flight.set(false);

        let next = match result {
            Ok(data) => FetchState::Ready(Rc::new(data)),
            Err(error) => FetchState::Error {
                message: error.to_string(),
                stale: self.state.borrow().data().cloned(),
            },
        };
        self.transition(next);

        RefreshOutcome::Completed
    }

    fn transition(&self, next: FetchState<T>) {
        *self.state.borrow_mut() = next;
        let state = self.state.borrow();
        (self.on_change)(&state);
    }
}

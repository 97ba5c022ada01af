//! Observable view-state for the character browser.
//!
//! # Design
//! The snapshot lives inside a `tokio::sync::watch` channel: mutations go
//! through the sender, and the presentation layer re-renders from its own
//! receiver. Only `load_characters` and the `select_*` operations mutate it.
//!
//! `load_characters` checks and sets `is_loading` under the channel's lock.
//! A call that finds a load already in flight is rejected with
//! [`LoadOutcome::InFlight`] and issues no request. Dropping a pending
//! `load_characters` future clears the flag again.

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::repository::CharacterRepository;
use crate::source::CharacterSource;
use crate::types::{CharacterSummary, Page};

/// What the presentation layer renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot<C> {
    pub characters: Vec<C>,
    pub is_loading: bool,
    /// User-facing message when a load failed outright.
    pub error: Option<String>,
    /// Set while `characters` is fallback content; holds the failure reason.
    pub degraded: Option<String>,
    pub selected_character: Option<C>,
}

impl<C> Default for ViewSnapshot<C> {
    fn default() -> Self {
        Self {
            characters: Vec::new(),
            is_loading: false,
            error: None,
            degraded: None,
            selected_character: None,
        }
    }
}

impl<C> ViewSnapshot<C> {
    /// Detail view when something is selected, list view otherwise.
    pub fn is_detail_view(&self) -> bool {
        self.selected_character.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { count: usize, degraded: bool },
    /// Characters were already present; nothing was fetched.
    AlreadyLoaded,
    /// Another load is running; nothing was fetched.
    InFlight,
    Failed(String),
    /// The view shut down before the fetch resolved.
    Cancelled,
}

pub struct AppViewState<S: CharacterSource> {
    repository: CharacterRepository<S>,
    page: Page,
    state: watch::Sender<ViewSnapshot<S::Character>>,
    shutdown: CancellationToken,
}

impl<S: CharacterSource> AppViewState<S> {
    pub fn new(repository: CharacterRepository<S>) -> Self {
        let (state, _) = watch::channel(ViewSnapshot::default());
        Self {
            repository,
            page: Page::default(),
            state,
            shutdown: CancellationToken::new(),
        }
    }

    /// Page requested by `load_characters`.
    pub fn with_page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    pub fn repository(&self) -> &CharacterRepository<S> {
        &self.repository
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot<S::Character>> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ViewSnapshot<S::Character> {
        self.state.borrow().clone()
    }

    pub fn characters(&self) -> Vec<S::Character> {
        self.state.borrow().characters.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn degraded(&self) -> Option<String> {
        self.state.borrow().degraded.clone()
    }

    pub fn selected_character(&self) -> Option<S::Character> {
        self.state.borrow().selected_character.clone()
    }

    pub fn is_detail_view(&self) -> bool {
        self.state.borrow().is_detail_view()
    }

    /// Fetch characters unless some are already loaded or a load is running.
    pub async fn load_characters(&self) -> LoadOutcome {
        let mut skipped = None;
        self.state.send_if_modified(|state| {
            if !state.characters.is_empty() {
                skipped = Some(LoadOutcome::AlreadyLoaded);
                return false;
            }
            if state.is_loading {
                skipped = Some(LoadOutcome::InFlight);
                return false;
            }
            state.is_loading = true;
            state.error = None;
            true
        });
        if let Some(outcome) = skipped {
            debug!(?outcome, "load_characters skipped");
            return outcome;
        }
        let guard = LoadingGuard::arm(&self.state);

        let result = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => None,
            result = self.repository.fetch_characters(self.page) => Some(result),
        };

        match result {
            None => {
                guard.disarm();
                self.state.send_modify(|state| state.is_loading = false);
                info!("character load cancelled");
                LoadOutcome::Cancelled
            }
            Some(Ok(fetched)) => {
                let count = fetched.characters.len();
                let degraded = fetched.fallback_reason().map(str::to_string);
                let outcome = LoadOutcome::Loaded {
                    count,
                    degraded: degraded.is_some(),
                };
                guard.disarm();
                self.state.send_modify(|state| {
                    state.characters = fetched.characters;
                    state.degraded = degraded;
                    state.is_loading = false;
                });
                info!(count, "characters loaded");
                outcome
            }
            Some(Err(err)) => {
                let message = format!("Error loading characters: {err}");
                warn!(error = %err, "character load failed");
                guard.disarm();
                self.state.send_modify(|state| {
                    state.error = Some(message.clone());
                    state.is_loading = false;
                });
                LoadOutcome::Failed(message)
            }
        }
    }

    /// Show `character` in the detail view, or return to the list with `None`.
    pub fn select_character(&self, character: Option<S::Character>) {
        self.state
            .send_modify(|state| state.selected_character = character);
    }

    /// Select a loaded character by id. Returns false if none matches.
    pub fn select_character_by_id(&self, id: &str) -> bool {
        self.state.send_if_modified(|state| {
            match state.characters.iter().find(|c| c.id() == id) {
                Some(found) => {
                    state.selected_character = Some(found.clone());
                    true
                }
                None => false,
            }
        })
    }

    /// Cancel any in-flight load. Later loads resolve as cancelled at once.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

/// Clears `is_loading` if a load future is dropped before it completes.
struct LoadingGuard<'a, C> {
    state: &'a watch::Sender<ViewSnapshot<C>>,
    armed: bool,
}

impl<'a, C> LoadingGuard<'a, C> {
    fn arm(state: &'a watch::Sender<ViewSnapshot<C>>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<C> Drop for LoadingGuard<'_, C> {
    fn drop(&mut self) {
        if self.armed {
            debug!("load_characters dropped before completion");
            self.state.send_modify(|state| state.is_loading = false);
        }
    }
}

//! Character repository: a live source plus a fallback policy.
//!
//! # Design
//! A failed fetch never reaches the caller as an error while a fallback is
//! configured. Instead the repository returns demo content and reports *that*
//! it did so through [`Origin::Fallback`], so presentation can decide whether
//! to flag a degraded state. With [`Fallback::Disabled`] errors propagate.

use tracing::{info, warn};

use crate::demo::{comics_demo_characters, roster_demo_characters};
use crate::error::ApiError;
use crate::source::CharacterSource;
use crate::types::{ComicCharacter, Page, RosterCharacter};

/// Demo content used when a live fetch fails.
#[derive(Debug, Clone, PartialEq)]
pub enum Fallback<C> {
    /// First `take` characters on the first page; later pages get nothing,
    /// so pagination still terminates.
    FirstPageOnly { characters: Vec<C>, take: usize },
    /// The same list regardless of page.
    Always(Vec<C>),
    /// Let the error through.
    Disabled,
}

impl<C: Clone> Fallback<C> {
    /// Characters to serve for `page`, or `None` when disabled.
    pub fn characters_for(&self, page: Page) -> Option<Vec<C>> {
        match self {
            Fallback::FirstPageOnly { characters, take } => Some(if page.is_first() {
                characters.iter().take(*take).cloned().collect()
            } else {
                Vec::new()
            }),
            Fallback::Always(characters) => Some(characters.clone()),
            Fallback::Disabled => None,
        }
    }
}

impl Fallback<ComicCharacter> {
    /// Number of demo characters served on the first page.
    pub const COMICS_DEMO_TAKE: usize = 3;

    pub fn comics_default() -> Self {
        Fallback::FirstPageOnly {
            characters: comics_demo_characters(),
            take: Self::COMICS_DEMO_TAKE,
        }
    }
}

impl Fallback<RosterCharacter> {
    pub fn roster_default() -> Self {
        Fallback::Always(roster_demo_characters())
    }
}

/// Where a [`Fetched`] list came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Live,
    /// Demo content; `reason` is the rendered error of the failed fetch.
    Fallback { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<C> {
    pub characters: Vec<C>,
    pub origin: Origin,
}

impl<C> Fetched<C> {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, Origin::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&str> {
        match &self.origin {
            Origin::Fallback { reason } => Some(reason),
            Origin::Live => None,
        }
    }
}

pub struct CharacterRepository<S: CharacterSource> {
    source: S,
    fallback: Fallback<S::Character>,
}

impl<S: CharacterSource> CharacterRepository<S> {
    pub fn new(source: S, fallback: Fallback<S::Character>) -> Self {
        Self { source, fallback }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// One page of characters, live or fallback.
    ///
    /// Errors only when the fallback is [`Fallback::Disabled`].
    pub async fn fetch_characters(&self, page: Page) -> Result<Fetched<S::Character>, ApiError> {
        let backend = self.source.label();
        match self.source.fetch_characters(page).await {
            Ok(characters) => {
                info!(backend, count = characters.len(), offset = page.offset(), "fetched characters");
                Ok(Fetched {
                    characters,
                    origin: Origin::Live,
                })
            }
            Err(err) => {
                warn!(backend, error = %err, "error fetching characters");
                if err.is_invalid_credentials() {
                    warn!(backend, "backend rejected the configured API credentials");
                }
                let characters = self.fallback.characters_for(page).ok_or_else(|| err.clone())?;
                Ok(Fetched {
                    characters,
                    origin: Origin::Fallback {
                        reason: err.to_string(),
                    },
                })
            }
        }
    }
}

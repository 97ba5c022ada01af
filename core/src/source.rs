//! Live character backends behind one capability trait.
//!
//! # Design
//! A source only knows how to fetch; it fails loudly. Substituting demo data
//! is the repository's concern (see [`crate::repository`]).

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::auth::{Clock, SystemClock};
use crate::client::{ComicsClient, RosterClient};
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{CharacterSummary, ComicCharacter, Page, RosterCharacter};

#[cfg_attr(test, mockall::automock(type Character = crate::types::RosterCharacter;))]
#[async_trait]
pub trait CharacterSource: Send + Sync {
    type Character: CharacterSummary + Clone + Debug + Send + Sync + 'static;

    /// Short backend name for logs.
    fn label(&self) -> &'static str;

    /// One page of characters in server order. Unpaginated backends ignore `page`.
    async fn fetch_characters(&self, page: Page) -> Result<Vec<Self::Character>, ApiError>;
}

/// Signed comics backend.
pub struct ComicsSource<T> {
    client: ComicsClient,
    transport: T,
    clock: Arc<dyn Clock>,
}

impl<T: Transport> ComicsSource<T> {
    pub fn new(client: ComicsClient, transport: T) -> Self {
        Self {
            client,
            transport,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn client(&self) -> &ComicsClient {
        &self.client
    }
}

#[async_trait]
impl<T: Transport> CharacterSource for ComicsSource<T> {
    type Character = ComicCharacter;

    fn label(&self) -> &'static str {
        "comics"
    }

    async fn fetch_characters(&self, page: Page) -> Result<Vec<ComicCharacter>, ApiError> {
        let ts = self.clock.now().timestamp_millis();
        let request = self.client.build_list_characters(page, ts);
        debug!(ts, method = request.method.as_str(), url = %request.url, "requesting comics characters");

        let response = self.transport.execute(request).await?;
        self.client.parse_list_characters(response)
    }
}

/// Roster backend authenticated by a static API key.
pub struct RosterSource<T> {
    client: RosterClient,
    transport: T,
}

impl<T: Transport> RosterSource<T> {
    pub fn new(client: RosterClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &RosterClient {
        &self.client
    }
}

#[async_trait]
impl<T: Transport> CharacterSource for RosterSource<T> {
    type Character = RosterCharacter;

    fn label(&self) -> &'static str {
        "roster"
    }

    async fn fetch_characters(&self, _page: Page) -> Result<Vec<RosterCharacter>, ApiError> {
        let request = self.client.build_list_heroes();
        debug!(method = request.method.as_str(), url = %request.url, "requesting roster heroes");

        let response = self.transport.execute(request).await?;
        self.client.parse_list_heroes(response)
    }
}

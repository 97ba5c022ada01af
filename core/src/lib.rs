//! Character browser core: API clients, repository and view-state.
//!
//! # Overview
//! Two unrelated superhero backends are wrapped behind one
//! [`CharacterSource`] capability. A [`CharacterRepository`] adds the
//! "never show a blank screen" fallback, and [`AppViewState`] coordinates
//! loading, error and selection state for whatever UI sits on top.
//!
//! # Design
//! - Request building and response parsing are pure (`client`); the network
//!   round-trip is a pluggable [`Transport`], so everything above it is
//!   testable without sockets.
//! - Fallback content and error reporting are separate: the repository tags
//!   demo data with [`Origin::Fallback`] instead of hiding the failure.
//! - `assets` and `palette` are the pure helpers the presentation layer needs
//!   for image URLs and colors.

pub mod assets;
pub mod auth;
pub mod client;
pub mod config;
pub mod demo;
pub mod error;
pub mod http;
pub mod palette;
pub mod repository;
pub mod source;
pub mod transport;
pub mod types;
pub mod view_state;

pub use assets::{resolve_icon_url, resolve_image_url, ASSET_ORIGIN};
pub use auth::{Clock, Credentials, SystemClock};
pub use client::{ComicsClient, RosterClient};
pub use config::Config;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use palette::{ability_type_color, quality_color};
pub use repository::{CharacterRepository, Fallback, Fetched, Origin};
pub use source::{CharacterSource, ComicsSource, RosterSource};
pub use transport::{ReqwestTransport, Transport};
pub use types::{CharacterSummary, ComicCharacter, Page, RosterCharacter};
pub use view_state::{AppViewState, LoadOutcome, ViewSnapshot};

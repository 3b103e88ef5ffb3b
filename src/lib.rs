//! # shortreel
//!
//! A terminal short-video feed: a paged video feed with one live player,
//! comments, multi-source keyword search, uploads and an editable profile.
//!
//! ## Architecture
//!
//! ```text
//! VideoCatalog → Store → FeedController → Player
//! SearchSession → SearchAggregator → SearchSource*
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the TUI
//! shortreel
//!
//! # Search from the command line
//! shortreel search "rust async"
//!
//! # List the video feed
//! shortreel feed
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the store,
/// the video catalog and the search aggregator.
pub mod app;

/// Video catalog used to load the feed.
///
/// - [`VideoCatalog`](catalog::VideoCatalog): Async trait for feed sources
/// - [`PexelsCatalog`](catalog::PexelsCatalog): Pexels video search API
pub mod catalog;

/// Command-line interface using clap.
///
/// - `tui` - Launch the TUI (default)
/// - `search <query>` - Print merged search results
/// - `feed` - List the video feed
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/shortreel/config.toml`, supporting:
/// - Custom colors (named or hex)
/// - Custom keybindings
/// - Catalog, search source and profile settings
pub mod config;

/// Core domain models: videos, comments, search results, profiles.
pub mod domain;

/// Active-item feed controller and visibility mapping.
pub mod feed;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for GET requests
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Media player seam and the clock-driven simulated player.
pub mod player;

/// Profile screen state with staged edits.
pub mod profile;

/// Multi-source keyword search with debounce.
pub mod search;

/// In-memory video and comment store.
///
/// - [`Store`](store::Store): Trait defining storage operations
/// - [`MemoryStore`](store::MemoryStore): In-memory implementation
pub mod store;

/// Terminal user interface.
///
/// Five screens as tabs: Home, Explore, Create, Duet, Profile.
/// Keybindings: Tab cycles screens, j/k scroll, Space plays or pauses,
/// f likes, c comments, / searches, q quits.
pub mod tui;

/// Upload flow: permission gate and media picker.
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

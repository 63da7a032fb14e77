//! # Lineup Builder Backend
//!
//! Backend service for a football (soccer) lineup builder. The frontend
//! assembles a starting XI onto a graphical pitch; this crate supplies the
//! pieces it talks to over HTTP plus the lineup assignment model itself.
//!
//! ## Features
//!
//! - **Lineup model**: the player-to-slot assignment state with
//!   assign/move/swap/remove semantics and occupancy invariants
//! - **Formation catalog**: built-in set of named formations on a normalized
//!   0-100 pitch plane, with display-time flip transforms
//! - **Player search**: in-memory index over scraper output with
//!   diacritics-insensitive matching, filtering and pagination
//! - **Export**: export sizing plus server-side SVG rendering of a lineup
//! - **Scraper proxy**: cached pass-through to the upstream squad scraper
//! - **HTTP API**: RESTful endpoints for frontend integration via axum
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: domain types (formations, players, the lineup itself)
//! - [`services`]: business logic over the domain types
//! - [`http`]: axum-based HTTP server and request handlers
//! - [`config`]: server configuration from TOML file and environment
//!

pub mod config;
pub mod models;
pub mod services;

pub mod http;

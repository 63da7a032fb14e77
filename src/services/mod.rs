//! Service layer for business logic and orchestration.
//!
//! Services sit between the domain models and the HTTP handlers: the
//! formation catalog, the player search index, export rendering, and the
//! cached proxy to the upstream squad scraper.

pub mod export;

pub mod formations;

pub mod players;

pub mod scraper;

pub use export::{export_dimensions, prepare_export, render_svg};
pub use formations::FormationCatalog;
pub use players::{PlayerStore, SearchRequest, SearchResult};
pub use scraper::{ScrapeClient, ScrapeError};

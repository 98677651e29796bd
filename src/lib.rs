//! Research terminal for football fixtures.
//!
//! The provider's payloads are loosely structured and drift across data eras,
//! so everything user-visible goes through the normalization modules below
//! (`score`, `standings`, `odds_board`, `time_buckets`, `form`, `corners`).
//! Those are pure functions over the raw model in `model`; fetching lives in
//! the `*_fetch` modules and never leaks into the derivations.

pub mod corners;
pub mod form;
pub mod http_cache;
pub mod http_client;
pub mod model;
pub mod odds_board;
pub mod odds_fetch;
pub mod provider_fetch;
pub mod score;
pub mod standings;
pub mod taxonomy;
pub mod time_buckets;

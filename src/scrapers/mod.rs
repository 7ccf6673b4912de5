//! Thairath scrapers.
//!
//! Scraping follows the same two-phase pattern as any listing-driven news site:
//!
//! 1. **Indexing**: [`listing`] discovers article links on the listing page
//! 2. **Extraction**: [`article`] fetches each link and pulls out its
//!    publish time, body text and tags
//!
//! | Phase | Module | Method | On failure |
//! |-------|--------|--------|------------|
//! | Indexing | [`listing`] | HTML anchors under `/news/` | Error, run aborts |
//! | Extraction | [`article`] | `__NEXT_DATA__` JSON, then CSS selectors | `N/A` placeholders |

pub mod article;
pub mod listing;

//! Output stages run after all articles have been scraped.
//!
//! # Submodules
//!
//! - [`table`]: Writes the records to a CSV file
//! - [`upload`]: Pushes that file to an object store
//!
//! # Output Layout
//!
//! ```text
//! ./thairath_news.csv                               # local table, replaced each run
//! {endpoint}/{bucket}/thairath/thairath_news.csv    # uploaded copy, overwritten each run
//! ```

pub mod table;
pub mod upload;

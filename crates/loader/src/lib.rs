// ABOUTME: Main library entry point for the xmlkit URL loader.
// ABOUTME: Re-exports the public API: Loader, LoaderBuilder, LoadOptions, LoadResponse, LoadError, query_params.

//! xmlkit-loader - Asynchronous single-shot URL loading for xmlkit.
//!
//! A [`Loader`] issues one network operation at a time and resolves it
//! exactly once: success with the response data, an error, or cancellation
//! after an explicit [`Loader::abort`]. The document core stays out of HTTP
//! entirely; [`Loader::load_xml`] hands the fetched text over to
//! `xmlkit-dom` only after the transfer is complete.
//!
//! # Example
//!
//! ```no_run
//! use xmlkit_loader::{LoadError, Loader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), LoadError> {
//!     let loader = Loader::new("https://example.com/record.xml")?;
//!     let doc = loader.load_xml().await?;
//!     println!("root: {:?}", doc.root().and_then(|n| n.name()));
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loader;
pub mod options;
pub mod query;

pub use crate::error::LoadError;
pub use crate::loader::{LoadResponse, Loader};
pub use crate::options::{LoadOptions, LoaderBuilder, DEFAULT_TIMEOUT};
pub use crate::query::query_params;

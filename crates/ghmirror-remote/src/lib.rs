//! The Remote Fetcher: a paginating, rate-aware REST client speaking the
//! GitHub issues/comments dialect over `ureq`.

pub mod cancel;
pub mod client;
pub mod dto;
pub mod error;
pub mod pagination;
pub mod traits;

pub use cancel::CancelToken;
pub use client::GithubFetcher;
pub use error::{FetchError, Result};
pub use traits::{FetchProgress, Fetcher};

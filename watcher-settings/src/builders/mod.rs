//! Section builders
//!
//! One builder per settings category. Each is a pure function from the
//! current form state to the document sections it owns, or a
//! [`Rejection`](crate::validator::Rejection) wrapped in
//! [`Error::Rejected`](crate::Error::Rejected).

pub mod downloader;
pub mod plugins;
pub mod postprocessing;
pub mod providers;
pub mod quality;
pub mod search;
pub mod server;

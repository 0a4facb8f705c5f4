//! odr-webapi
//!
//! A minimal HTTP API for updating the DLS (Dynamic Label Segment) text file read by
//! [ODR-PadEnc] when broadcasting a DAB+ radio service.
//!
//! A text source on the local network `POST`s the new label text with a shared token, and
//! odr-webapi overwrites a single file with it. A status endpoint reports when that file was
//! last modified. See the [HTTP API][crate::api] for details.
//!
//! There is no TLS and the token is compared as a plain string: only run odr-webapi on a
//! trusted network.
//!
//! [ODR-PadEnc]: https://github.com/Opendigitalradio/ODR-PadEnc
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod cli;
pub mod config;
pub mod dls_file;
pub mod error;

pub use api::new as new_http;
pub use cli::Args;
pub use config::{Config, SharedConfig};
pub use dls_file::{DlsFile, LastUpdate};

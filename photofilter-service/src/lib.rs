//! photofilter-service: the two collaborators that produce new images.
//!
//! - `HttpFilterService` talks to the remote filter service.
//! - `ImageTransformer` rotates and flips locally.
//!
//! Both sit behind small traits so the editor can be driven by test doubles.

pub mod client;
pub mod config;
pub mod response;
pub mod transform;

pub use client::{FilterService, HttpFilterService};
pub use config::{ConfigError, ServiceConfig, DEFAULT_PORT};
pub use response::{parse_filter_response, FilterResponse};
pub use transform::{ImageTransformer, Transformer};

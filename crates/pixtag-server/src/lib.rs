//! pixtag-server: HTTP layer over object storage and the image database.
//!
//! Layering follows the request path: route handlers perform object-storage
//! side effects inline and delegate persistence to use cases, each of which
//! wraps exactly one repository call.

pub mod context;
pub mod error;
pub mod repository;
pub mod router;
pub mod routes;
pub mod storage;
pub mod usecase;

pub use context::AppContext;
pub use router::build_router;

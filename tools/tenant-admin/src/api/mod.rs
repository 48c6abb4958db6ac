//! API client module for the tenant listing and detail endpoints.
//!
//! Both endpoints are plain JSON `GET`s against the console's API host.

mod client;
mod types;

pub use client::{ApiError, TenantApiClient, TenantSource};
pub use types::*;

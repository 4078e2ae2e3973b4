//! Data Transfer Objects returned by the remote search service
//!
//! These are lightweight representations of service responses that carry no
//! behavior of their own: the artifact manifest entries the cache filters and
//! the file-layout schema passed through to upstream callers.

pub mod block;
pub mod layout;

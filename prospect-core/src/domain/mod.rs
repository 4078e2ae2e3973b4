//! Core domain types
//!
//! This module contains the domain structures used across the Prospect
//! client. These types represent the state of a remote search task as the
//! service reports it and are shared between the poller, the outcome
//! aggregation, and the artifact cache.

pub mod metadata;
pub mod snapshot;
pub mod status;
pub mod table;

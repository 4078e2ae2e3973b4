//! Prospect Core
//!
//! Core types and abstractions for the Prospect feature-search client.
//!
//! This crate contains:
//! - Domain types: Core business entities (statuses, snapshots, provider
//!   metadata, feature tables)
//! - DTOs: Data transfer objects returned by the remote search service

pub mod domain;
pub mod dto;

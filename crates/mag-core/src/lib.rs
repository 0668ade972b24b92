//! # mag-core
//!
//! Core types and pure logic shared across all magkit crates:
//! - Entity structs for projects, editions, and project-index rows
//! - The opaque API [`Credential`]
//! - Edition ordering (recency first, then locale-style title collation)
//! - Project-index filtering by presence of a latest edition
//! - Cross-cutting error types

pub mod collation;
pub mod credential;
pub mod entities;
pub mod errors;
pub mod filter;
pub mod ordering;

pub use credential::Credential;
pub use entities::{
    CustomDomain, Edition, EditionSummary, LatestEdition, Project, ProjectListEntry,
};
pub use errors::CoreError;
pub use filter::filter_projects_with_latest_edition;
pub use ordering::sort_editions;

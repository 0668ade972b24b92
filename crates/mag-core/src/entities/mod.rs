//! Entity structs for the magazine-hosting service's JSON documents.
//!
//! Field names follow the service's snake_case JSON. All structs derive
//! `Serialize` and `Deserialize` for JSON roundtrip.

mod edition;
mod project;
mod project_list;

pub use edition::Edition;
pub use project::{CustomDomain, Project};
pub use project_list::{EditionSummary, LatestEdition, ProjectListEntry};

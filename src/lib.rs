//! Distributes a program's pool of student slots across the organizations
//! competing for it.
//!
//! Each run takes the applicant counts, mentor capacities and admin
//! overrides of one program and returns how many slots every organization
//! gets. Three algorithms are available, see [`Algorithm`].

pub mod allocator;
pub mod assignment;
pub mod error;
pub mod model;
pub mod program;
pub mod sets;
pub mod sheet;

pub use allocator::allocate;
pub use error::{ConfigurationError, DecodeError};
pub use model::allocation::Allocation;
pub use model::entity::{OrgId, Popularity, Slots};
pub use model::request::{Algorithm, AllocationRequest, Limits};
pub use program::{OrgStats, ProgramSettings};
pub use sheet::{AllocationSheet, SheetEntry, SheetRow};

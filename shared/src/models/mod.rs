//! Domain Models
//!
//! Profile and department documents plus the read-only HR wire snapshot.

pub mod department;
pub mod employee_record;
pub mod profile;

pub use department::{Department, DepartmentId};
pub use employee_record::ExternalEmployeeRecord;
pub use profile::{Employment, Profile, ProfileCreate, ProfileId, ProfileUpdate, Role};

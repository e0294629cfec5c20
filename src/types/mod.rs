//! Shared data structures for dispatch planning
//!
//! - `geo`: Coordinate, DistanceEstimate
//! - `registry`: EmsBase, Hospital (immutable reference data)
//! - `request`: PatientRequest with its Severity and Condition categories
//! - `plan`: TimeBreakdown and the DispatchPlan returned per request

mod geo;
mod plan;
mod registry;
mod request;

pub use geo::*;
pub use plan::*;
pub use registry::*;
pub use request::*;

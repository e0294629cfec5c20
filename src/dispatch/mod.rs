//! Dispatch Engine
//!
//! Deterministic scoring for a single patient request. Nothing here
//! mutates shared state or performs I/O.
//!
//! - `nearest_base()` - EMS base with minimum travel time
//! - `rank_hospitals()` - every hospital, ascending by distance
//! - `ResponseTimeModel::compose()` - fixed components plus travel legs
//! - `DispatchOrchestrator::dispatch()` - full plan including the classifier

mod error;
pub mod locator;
pub mod orchestrator;
pub mod ranking;
mod response_time;

pub use error::{CategoryKind, DispatchError, ErrorClass};
pub use locator::nearest_base;
pub use orchestrator::{resolve_hospital, DispatchOrchestrator};
pub use ranking::{find_by_id, nearest, rank_hospitals};
pub use response_time::ResponseTimeModel;

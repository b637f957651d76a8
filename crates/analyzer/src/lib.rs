//! Read-only queries over a collection of `SimulationRecord`s.
//!
//! Nothing here mutates its input: every function borrows the records and
//! returns a new view (`Vec<&SimulationRecord>`) or derived values. Inputs are
//! taken as `&[T]` with `T: Borrow<SimulationRecord>`, so a query can run
//! directly on the owned records from the repository or on the output of a
//! previous query.
//!
//! Parameter values are compared with exact floating-point equality. The
//! simulator writes parameters as clean integers, so callers pass values such
//! as `2.0` that match the parsed file exactly.

pub mod error;
pub mod grouping;
pub mod query;

pub use error::AnalyzerError;
pub use grouping::{group_by_parameter, ParameterGroup};
pub use query::{
    distinct_parameter_values, filter_by_parameter, filter_by_two_parameters, find_simulation,
    sort_by_parameter,
};

//! Analysis module - the pure computation engine
//!
//! Every operation here is a pure function from inputs to an immutable
//! result record. Degenerate arithmetic (for example a zero standard
//! deviation) produces absent optional fields; only structurally invalid
//! input raises an error.

pub mod capability;
pub mod control;
pub mod msa;
pub mod sample;
pub mod spec;

pub use capability::{CapabilityRating, CapabilityResult};
pub use control::ControlLimits;
pub use msa::{GrrStudyDesign, MeasurementGrid, VarianceComponents};
pub use sample::{EmptySeriesError, NumericSample, SeriesSummary};
pub use spec::{InvalidSpecificationError, SpecMode, SpecificationLimits};

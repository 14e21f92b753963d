//! Domain model (IDs, job records, analysis results, errors).

pub mod analysis;
pub mod errors;
pub mod ids;
pub mod job;

pub use analysis::{Alliteration, AnalysisRecord, Anaphora, EndRhyme};
pub use errors::{AnalysisError, ResolveError};
pub use ids::{IdParseError, JobId};
pub use job::{JobRecord, JobSnapshot, JobStatus};

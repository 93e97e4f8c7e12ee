//! Grade-point arithmetic shared by the transcript view and the improvement
//! simulator. Every function here is pure; inputs are assumed to have been
//! validated when they were entered.

pub mod improvement;
pub mod points;
pub mod transcript;

pub use improvement::{
    final_cgpa, improvement_delta, projected_cgpa, simulate, Baseline, EntryProjection,
    SimulationReport, MAX_CGPA,
};
pub use points::points_of;
pub use transcript::{cgpa, sgpa, summarize, SemesterSummary};

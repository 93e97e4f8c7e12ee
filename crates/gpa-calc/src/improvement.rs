use models::ImprovementEntry;
use serde::Serialize;
use tracing::debug;

use crate::points::points_of;

pub const MAX_CGPA: f64 = 4.0;

/// Externally supplied starting point for the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Baseline {
    current_cgpa: f64,
    total_credits: f64,
}

impl Baseline {
    /// `None` means the simulator has nothing to compute against: a value is
    /// missing, not finite, the credits are not positive, or the CGPA is off
    /// the 4.0 scale.
    pub fn new(current_cgpa: Option<f64>, total_credits: Option<f64>) -> Option<Self> {
        let current_cgpa =
            current_cgpa.filter(|c| c.is_finite() && (0.0..=MAX_CGPA).contains(c))?;
        let total_credits = total_credits.filter(|t| t.is_finite() && *t > 0.0)?;
        Some(Self {
            current_cgpa,
            total_credits,
        })
    }

    pub fn current_cgpa(&self) -> f64 {
        self.current_cgpa
    }

    pub fn total_credits(&self) -> f64 {
        self.total_credits
    }

    fn shifted_by(&self, point_delta: f64) -> f64 {
        self.current_cgpa + point_delta / self.total_credits
    }
}

/// CGPA if only this one course had the new grade.
pub fn projected_cgpa(baseline: &Baseline, entry: &ImprovementEntry) -> f64 {
    baseline.shifted_by(point_delta(entry))
}

pub fn improvement_delta(baseline: &Baseline, entry: &ImprovementEntry) -> f64 {
    projected_cgpa(baseline, entry) - baseline.current_cgpa
}

/// CGPA with every replacement applied to the same running point total.
pub fn final_cgpa(baseline: &Baseline, entries: &[ImprovementEntry]) -> f64 {
    let total: f64 = entries.iter().map(point_delta).sum();
    baseline.shifted_by(total)
}

fn point_delta(entry: &ImprovementEntry) -> f64 {
    (points_of(entry.new_grade) - points_of(entry.old_grade)) * entry.credits
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryProjection {
    pub name: String,
    pub current_cgpa: Option<f64>,
    pub projected_cgpa: Option<f64>,
    pub improvement: Option<f64>,
}

/// Everything the simulator view shows. `None` fields are "not computed".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub baseline: Option<Baseline>,
    pub entries: Vec<EntryProjection>,
    pub final_cgpa: Option<f64>,
    pub total_improvement: Option<f64>,
}

pub fn simulate(baseline: Option<&Baseline>, entries: &[ImprovementEntry]) -> SimulationReport {
    let rows = entries
        .iter()
        .map(|entry| EntryProjection {
            name: entry.name.clone(),
            current_cgpa: baseline.map(Baseline::current_cgpa),
            projected_cgpa: baseline.map(|b| projected_cgpa(b, entry)),
            improvement: baseline.map(|b| improvement_delta(b, entry)),
        })
        .collect();

    let final_cgpa = baseline.map(|b| final_cgpa(b, entries));
    let total_improvement = baseline.zip(final_cgpa).map(|(b, f)| f - b.current_cgpa);

    debug!(
        entries = entries.len(),
        computed = baseline.is_some(),
        ?final_cgpa,
        "simulated improvement plan"
    );

    SimulationReport {
        baseline: baseline.copied(),
        entries: rows,
        final_cgpa,
        total_improvement,
    }
}

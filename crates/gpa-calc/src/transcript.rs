use models::{Semester, Subject, Transcript};
use serde::Serialize;

use crate::points::points_of;

/// One rendered row of the transcript view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemesterSummary {
    pub name: String,
    pub courses: usize,
    pub credits: u64,
    pub sgpa: f64,
    /// CGPA over this semester and every semester before it.
    pub cgpa: f64,
}

/// Credit-weighted average of one semester. An empty semester is `0.0`.
pub fn sgpa(semester: &Semester) -> f64 {
    weighted_average(semester.subjects.iter())
}

/// Credit-weighted average over every course of the given semesters.
pub fn cgpa(semesters: &[Semester]) -> f64 {
    weighted_average(semesters.iter().flat_map(|s| s.subjects.iter()))
}

pub fn summarize(transcript: &Transcript) -> Vec<SemesterSummary> {
    let semesters = transcript.semesters();
    semesters
        .iter()
        .enumerate()
        .map(|(i, semester)| SemesterSummary {
            name: semester.name.clone(),
            courses: semester.subjects.len(),
            credits: semester.total_credits(),
            sgpa: sgpa(semester),
            cgpa: cgpa(&semesters[..=i]),
        })
        .collect()
}

fn weighted_average<'a>(subjects: impl Iterator<Item = &'a Subject>) -> f64 {
    let (credits, weighted) = subjects.fold((0u64, 0.0f64), |(credits, weighted), s| {
        (
            credits + u64::from(s.credits),
            weighted + points_of(s.grade) * f64::from(s.credits),
        )
    });
    if credits == 0 {
        return 0.0;
    }
    weighted / credits as f64
}

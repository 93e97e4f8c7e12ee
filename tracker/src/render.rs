use std::io::Write;

use eyre::WrapErr;
use gpa_calc::{points_of, SemesterSummary, SimulationReport};
use models::{Grade, ImprovementEntry, Transcript};
use serde::Serialize;

const NOT_COMPUTED: &str = "N/A";

pub fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> eyre::Result<()> {
    let json = serde_json::to_string_pretty(value).wrap_err("serialize output")?;
    writeln!(out, "{json}").wrap_err("write output")
}

pub fn transcript_pretty(
    out: &mut impl Write,
    transcript: &Transcript,
    summaries: &[SemesterSummary],
) -> eyre::Result<()> {
    if transcript.is_empty() {
        writeln!(out, "No semesters yet. Start with `gpa-tracker transcript add-semester`.")?;
        return Ok(());
    }

    for (i, (semester, summary)) in transcript.semesters().iter().zip(summaries).enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "[{}] {}", i + 1, semester.name)?;
        if semester.subjects.is_empty() {
            writeln!(out, "  (no courses)")?;
        } else {
            writeln!(out, "  {:>3}  {:<30} {:>7}  {:<5}", "#", "Course", "Credits", "Grade")?;
            for (j, subject) in semester.subjects.iter().enumerate() {
                writeln!(
                    out,
                    "  {:>3}  {:<30} {:>7}  {:<5}",
                    j + 1,
                    subject.name,
                    subject.credits,
                    subject.grade.as_str()
                )?;
            }
        }
        writeln!(
            out,
            "  SGPA: {:.2}  CGPA: {:.2}  ({} credits)",
            summary.sgpa, summary.cgpa, summary.credits
        )?;
    }
    Ok(())
}

pub fn simulation_pretty(
    out: &mut impl Write,
    entries: &[ImprovementEntry],
    report: &SimulationReport,
) -> eyre::Result<()> {
    match &report.baseline {
        Some(b) => writeln!(
            out,
            "Current CGPA: {:.3} over {} credits",
            b.current_cgpa(),
            b.total_credits()
        )?,
        None => writeln!(
            out,
            "Current CGPA: {NOT_COMPUTED} (pass --current-cgpa and a positive --total-credits)"
        )?,
    }

    if entries.is_empty() {
        writeln!(out, "No courses added. Use --course NAME:CREDITS:OLD:NEW or --plan FILE.")?;
        return Ok(());
    }

    writeln!(out)?;
    writeln!(
        out,
        "  {:>3}  {:<24} {:>7}  {:<3}  {:<3}  {:>8}  {:>11}",
        "#", "Course", "Credits", "Old", "New", "New CGPA", "Improvement"
    )?;
    for (i, (entry, row)) in entries.iter().zip(&report.entries).enumerate() {
        writeln!(
            out,
            "  {:>3}  {:<24} {:>7}  {:<3}  {:<3}  {:>8}  {:>11}",
            i + 1,
            entry.name,
            entry.credits,
            entry.old_grade.as_str(),
            entry.new_grade.as_str(),
            fixed3(row.projected_cgpa),
            signed3(row.improvement)
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Final CGPA after improvements: {}", fixed3(report.final_cgpa))?;
    writeln!(out, "Total GPA improvement: {}", signed3(report.total_improvement))?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct GradeRow {
    grade: Grade,
    points: f64,
}

pub fn grades(out: &mut impl Write, json: bool) -> eyre::Result<()> {
    let rows: Vec<GradeRow> = Grade::ALL
        .iter()
        .map(|&grade| GradeRow {
            grade,
            points: points_of(grade),
        })
        .collect();
    if json {
        return write_json(out, &rows);
    }
    for row in rows {
        writeln!(out, "{:<3} {:.3}", row.grade.as_str(), row.points)?;
    }
    Ok(())
}

fn fixed3(v: Option<f64>) -> String {
    v.map_or_else(|| NOT_COMPUTED.to_string(), |v| format!("{v:.3}"))
}

fn signed3(v: Option<f64>) -> String {
    v.map_or_else(|| NOT_COMPUTED.to_string(), |v| format!("{v:+.3}"))
}

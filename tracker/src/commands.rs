use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use eyre::WrapErr;
use gpa_calc::{simulate, summarize, Baseline};
use models::{ImprovementEntry, ImprovementPlan, SubjectUpdate};
use tracing::{info, warn};
use transcript_io::{export_json, import_file, FileStore, TranscriptStore};

use crate::cli::{Command, ImproveArgs, OutputFormat, TranscriptCommand};
use crate::config::AppConfig;
use crate::render;
use crate::session::{Persisted, TranscriptAction, TranscriptSession};

pub fn run(config: &AppConfig, command: Command, out: &mut impl Write) -> eyre::Result<()> {
    match command {
        Command::Transcript { command } => {
            let store = FileStore::new(&config.store_path, config.store_lifetime_days);
            run_transcript(&store, command, config.format, out)
        }
        Command::Improve(args) => run_improve(&args, config.format, out),
        Command::Grades => render::grades(out, config.format == OutputFormat::Json),
    }
}

pub fn run_transcript<S: TranscriptStore>(
    store: &S,
    command: TranscriptCommand,
    format: OutputFormat,
    out: &mut impl Write,
) -> eyre::Result<()> {
    let mut session = TranscriptSession::open(store)?;

    let action = match command {
        TranscriptCommand::Show => None,
        TranscriptCommand::Export { out: path } => {
            let json = export_json(session.transcript())?;
            if path == Path::new("-") {
                writeln!(out, "{json}").wrap_err("write transcript")?;
            } else {
                write_export(&path, &json)?;
                writeln!(out, "saved={}", path.display())?;
            }
            return Ok(());
        }
        TranscriptCommand::Import { file } => {
            let transcript = import_file(&file)
                .wrap_err("could not import transcript; current transcript left unchanged")?;
            Some(TranscriptAction::Replace(transcript))
        }
        TranscriptCommand::AddSemester => Some(TranscriptAction::AddSemester),
        TranscriptCommand::RemoveSemester { semester } => {
            Some(TranscriptAction::RemoveSemester(position(semester, "semester")?))
        }
        TranscriptCommand::AddCourse {
            semester,
            name,
            credits,
            grade,
        } => Some(TranscriptAction::AddCourse {
            semester: position(semester, "semester")?,
            name,
            credits,
            grade,
        }),
        TranscriptCommand::SetCourse {
            semester,
            course,
            name,
            credits,
            grade,
        } => {
            let updates = name
                .map(SubjectUpdate::Name)
                .into_iter()
                .chain(credits.map(SubjectUpdate::Credits))
                .chain(grade.map(SubjectUpdate::Grade))
                .collect();
            Some(TranscriptAction::UpdateCourse {
                semester: position(semester, "semester")?,
                course: position(course, "course")?,
                updates,
            })
        }
        TranscriptCommand::RemoveCourse { semester, course } => {
            Some(TranscriptAction::RemoveCourse {
                semester: position(semester, "semester")?,
                course: position(course, "course")?,
            })
        }
    };

    let persisted = match action {
        Some(action) => Some(session.apply(action)?),
        None => None,
    };
    if persisted == Some(Persisted::KeptPrevious) {
        warn!("transcript is now empty; the last saved transcript was kept");
    }

    let transcript = session.transcript();
    let summaries = summarize(transcript);
    match format {
        OutputFormat::Json => render::write_json(out, &summaries),
        OutputFormat::Pretty => {
            render::transcript_pretty(out, transcript, &summaries)?;
            if persisted == Some(Persisted::KeptPrevious) {
                writeln!(
                    out,
                    "Note: empty transcripts are not saved; the last saved transcript \
                     will be shown again next time."
                )?;
            }
            Ok(())
        }
    }
}

/// The simulator never touches the transcript store.
pub fn run_improve(
    args: &ImproveArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> eyre::Result<()> {
    let mut plan = match &args.plan {
        Some(path) => load_plan(path)?,
        None => ImprovementPlan::default(),
    };
    for entry in &args.courses {
        plan.push(entry.clone())?;
    }

    let baseline = Baseline::new(args.current_cgpa, args.total_credits);
    if baseline.is_none() {
        warn!(
            current_cgpa = ?args.current_cgpa,
            total_credits = ?args.total_credits,
            "baseline missing or invalid; simulator outputs are not computed"
        );
    }

    let report = simulate(baseline.as_ref(), plan.entries());
    match format {
        OutputFormat::Json => render::write_json(out, &report),
        OutputFormat::Pretty => render::simulation_pretty(out, plan.entries(), &report),
    }
}

fn load_plan(path: &Path) -> eyre::Result<ImprovementPlan> {
    let file = File::open(path).wrap_err_with(|| format!("open plan: {}", path.display()))?;
    let entries: Vec<ImprovementEntry> = serde_json::from_reader(BufReader::new(file))
        .wrap_err_with(|| format!("parse plan: {}", path.display()))?;
    let plan = ImprovementPlan::try_from(entries)?;
    info!(path = %path.display(), entries = plan.len(), "loaded improvement plan");
    Ok(plan)
}

fn write_export(path: &Path, json: &str) -> eyre::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).wrap_err("create output directory")?;
        }
    }
    std::fs::write(path, json).wrap_err_with(|| format!("write {}", path.display()))
}

/// Convert a 1-based number from the command line into an index.
fn position(n: usize, what: &str) -> eyre::Result<usize> {
    n.checked_sub(1).ok_or_else(|| eyre::eyre!("{what} numbers start at 1"))
}

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use models::{Grade, ImprovementEntry};

#[derive(Debug, Parser)]
#[command(name = "gpa-tracker")]
#[command(about = "Semester/cumulative GPA tracker and grade improvement simulator")]
#[command(arg_required_else_help = true)]
pub struct RootArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Path to the persisted transcript (overrides GPA_STORE_PATH)"
    )]
    pub store: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty, help = "Output format")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Build a transcript and see SGPA/CGPA per semester")]
    Transcript {
        #[command(subcommand)]
        command: TranscriptCommand,
    },
    #[command(about = "Simulate CGPA after replacing grades of already counted courses")]
    Improve(ImproveArgs),
    #[command(about = "Print the letter grade to grade point table")]
    Grades,
}

#[derive(Debug, Subcommand)]
pub enum TranscriptCommand {
    #[command(about = "Show every semester with its SGPA and running CGPA")]
    Show,
    #[command(about = "Append an empty semester")]
    AddSemester,
    #[command(about = "Remove a semester")]
    RemoveSemester {
        #[arg(long, value_name = "N", help = "Semester number as shown (1-based)")]
        semester: usize,
    },
    #[command(about = "Add a course to a semester (defaults: \"Course N\", 3 credits, A)")]
    AddCourse {
        #[arg(long, value_name = "N", help = "Semester number as shown (1-based)")]
        semester: usize,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_name = "1..6")]
        credits: Option<u32>,
        #[arg(long, value_parser = parse_grade)]
        grade: Option<Grade>,
    },
    #[command(about = "Edit a course's name, credits or grade")]
    SetCourse {
        #[arg(long, value_name = "N", help = "Semester number as shown (1-based)")]
        semester: usize,
        #[arg(long, value_name = "M", help = "Course number as shown (1-based)")]
        course: usize,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_name = "1..6")]
        credits: Option<u32>,
        #[arg(long, value_parser = parse_grade)]
        grade: Option<Grade>,
    },
    #[command(about = "Remove a course from a semester")]
    RemoveCourse {
        #[arg(long, value_name = "N", help = "Semester number as shown (1-based)")]
        semester: usize,
        #[arg(long, value_name = "M", help = "Course number as shown (1-based)")]
        course: usize,
    },
    #[command(about = "Replace the transcript with a .json/.yml/.yaml file")]
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    #[command(about = "Write the transcript as JSON")]
    Export {
        #[arg(
            long,
            default_value = "transcript.json",
            value_name = "FILE",
            help = "Output file path, or - for stdout"
        )]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, clap::Args)]
pub struct ImproveArgs {
    #[arg(long, value_name = "CGPA", help = "Current CGPA (0.0 to 4.0)")]
    pub current_cgpa: Option<f64>,

    #[arg(long, value_name = "CREDITS", help = "Total credits completed")]
    pub total_credits: Option<f64>,

    #[arg(
        long = "course",
        value_name = "NAME:CREDITS:OLD:NEW",
        value_parser = parse_entry,
        help = "Course to improve, e.g. \"Calculus:3:C:A\" (repeatable)"
    )]
    pub courses: Vec<ImprovementEntry>,

    #[arg(
        long,
        value_name = "FILE",
        help = "JSON array of {name, credits, oldGrade, newGrade}"
    )]
    pub plan: Option<PathBuf>,
}

pub fn parse_grade(s: &str) -> Result<Grade, String> {
    Grade::from_symbol(s).ok_or_else(|| {
        let all: Vec<_> = Grade::ALL.iter().map(|g| g.as_str()).collect();
        format!("unknown grade {s:?}; expected one of {}", all.join(", "))
    })
}

/// Parse `NAME:CREDITS:OLD:NEW`. The name itself may contain `:`.
pub fn parse_entry(s: &str) -> Result<ImprovementEntry, String> {
    let mut parts = s.rsplitn(4, ':');
    let (Some(new), Some(old), Some(credits), Some(name)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected NAME:CREDITS:OLD:NEW, got {s:?}"));
    };
    let credits: f64 = credits
        .trim()
        .parse()
        .map_err(|_| format!("credits must be a number, got {credits:?}"))?;
    let old = parse_grade(old)?;
    let new = parse_grade(new)?;
    ImprovementEntry::new(name.trim(), credits, old, new).map_err(|e| e.to_string())
}

use eyre::WrapErr;
use models::{Grade, SubjectUpdate, Transcript};
use tracing::{debug, info};
use transcript_io::TranscriptStore;

/// One user edit on the transcript. Indices are 0-based.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptAction {
    AddSemester,
    RemoveSemester(usize),
    AddCourse {
        semester: usize,
        name: Option<String>,
        credits: Option<u32>,
        grade: Option<Grade>,
    },
    UpdateCourse {
        semester: usize,
        course: usize,
        updates: Vec<SubjectUpdate>,
    },
    RemoveCourse {
        semester: usize,
        course: usize,
    },
    Replace(Transcript),
}

/// What happened to the store after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persisted {
    Saved,
    /// The edit emptied the transcript; the previous save is still on disk.
    KeptPrevious,
}

/// Owns the working transcript for one run and writes it back to the store.
pub struct TranscriptSession<'a, S: TranscriptStore> {
    store: &'a S,
    transcript: Transcript,
}

impl<'a, S: TranscriptStore> TranscriptSession<'a, S> {
    /// Read the store once; a missing or expired entry starts empty.
    pub fn open(store: &'a S) -> eyre::Result<Self> {
        let transcript = store
            .load()
            .wrap_err("load stored transcript")?
            .unwrap_or_default();
        debug!(semesters = transcript.len(), "opened transcript");
        Ok(Self { store, transcript })
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Apply an edit to a copy and swap it in only if every step succeeded.
    pub fn apply(&mut self, action: TranscriptAction) -> eyre::Result<Persisted> {
        let mut next = self.transcript.clone();
        match action {
            TranscriptAction::AddSemester => {
                let name = next.add_semester().name.clone();
                info!(%name, "added semester");
            }
            TranscriptAction::RemoveSemester(index) => {
                let removed = next.remove_semester(index)?;
                info!(name = %removed.name, "removed semester");
            }
            TranscriptAction::AddCourse {
                semester,
                name,
                credits,
                grade,
            } => {
                let subject = next.semester_mut(semester)?.add_subject();
                let updates = name
                    .map(SubjectUpdate::Name)
                    .into_iter()
                    .chain(credits.map(SubjectUpdate::Credits))
                    .chain(grade.map(SubjectUpdate::Grade));
                for update in updates {
                    subject.apply(update)?;
                }
                info!(
                    name = %subject.name,
                    credits = subject.credits,
                    grade = %subject.grade,
                    "added course"
                );
            }
            TranscriptAction::UpdateCourse {
                semester,
                course,
                updates,
            } => {
                if updates.is_empty() {
                    return Err(eyre::eyre!(
                        "nothing to change: pass --name, --credits or --grade"
                    ));
                }
                let sem = next.semester_mut(semester)?;
                for update in updates {
                    sem.update_subject(course, update)?;
                }
            }
            TranscriptAction::RemoveCourse { semester, course } => {
                let removed = next.semester_mut(semester)?.remove_subject(course)?;
                info!(name = %removed.name, "removed course");
            }
            TranscriptAction::Replace(transcript) => {
                transcript.validate()?;
                next = transcript;
            }
        }
        self.transcript = next;
        self.persist()
    }

    fn persist(&self) -> eyre::Result<Persisted> {
        if self.transcript.is_empty() {
            debug!("transcript is empty; leaving store untouched");
            return Ok(Persisted::KeptPrevious);
        }
        self.store.save(&self.transcript).wrap_err("save transcript")?;
        Ok(Persisted::Saved)
    }
}

use serde::{Deserialize, Serialize};

use crate::{Grade, MIN_COURSE_CREDITS};

const DEFAULT_COURSE_GRADE: Grade = Grade::A;
const DEFAULT_COURSE_CREDITS: u32 = 3;

/// A single graded course inside a semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Subject {
    pub name: String,
    pub grade: Grade,
    pub credits: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Semester {
    pub name: String,
    pub subjects: Vec<Subject>,
}

/// Ordered list of semesters; this is the whole exported state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    semesters: Vec<Semester>,
}

/// One field edit on an existing subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectUpdate {
    Name(String),
    Credits(u32),
    Grade(Grade),
}

impl Subject {
    pub fn apply(&mut self, update: SubjectUpdate) -> eyre::Result<()> {
        match update {
            SubjectUpdate::Name(name) => self.name = name,
            SubjectUpdate::Credits(credits) => {
                ensure_credits(credits)?;
                self.credits = credits;
            }
            SubjectUpdate::Grade(grade) => self.grade = grade,
        }
        Ok(())
    }
}

impl Semester {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subjects: Vec::new(),
        }
    }

    /// Append a course with the default name, grade and credits.
    pub fn add_subject(&mut self) -> &mut Subject {
        let n = self.subjects.len() + 1;
        self.subjects.push(Subject {
            name: format!("Course {n}"),
            grade: DEFAULT_COURSE_GRADE,
            credits: DEFAULT_COURSE_CREDITS,
        });
        let last = self.subjects.len() - 1;
        &mut self.subjects[last]
    }

    pub fn update_subject(&mut self, index: usize, update: SubjectUpdate) -> eyre::Result<()> {
        let count = self.subjects.len();
        let subject = self
            .subjects
            .get_mut(index)
            .ok_or_else(|| eyre::eyre!("course index {index} out of range (have {count})"))?;
        subject.apply(update)
    }

    pub fn remove_subject(&mut self, index: usize) -> eyre::Result<Subject> {
        if index >= self.subjects.len() {
            return Err(eyre::eyre!(
                "course index {index} out of range (have {})",
                self.subjects.len()
            ));
        }
        Ok(self.subjects.remove(index))
    }

    /// Summed in `u64`: a handful of large imported courses can exceed `u32`.
    pub fn total_credits(&self) -> u64 {
        self.subjects.iter().map(|s| u64::from(s.credits)).sum()
    }

    /// Reject subjects that could not have been produced by the edit operations.
    pub fn validate(&self) -> eyre::Result<()> {
        for subject in &self.subjects {
            ensure_credits(subject.credits)
                .map_err(|e| eyre::eyre!("{}: course {:?}: {e}", self.name, subject.name))?;
        }
        Ok(())
    }
}

impl Transcript {
    pub fn new(semesters: Vec<Semester>) -> Self {
        Self { semesters }
    }

    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    pub fn semester_mut(&mut self, index: usize) -> eyre::Result<&mut Semester> {
        let count = self.semesters.len();
        self.semesters
            .get_mut(index)
            .ok_or_else(|| eyre::eyre!("semester index {index} out of range (have {count})"))
    }

    pub fn len(&self) -> usize {
        self.semesters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.semesters.is_empty()
    }

    /// Append an empty semester named "Semester {n}".
    pub fn add_semester(&mut self) -> &mut Semester {
        let n = self.semesters.len() + 1;
        self.semesters.push(Semester::new(format!("Semester {n}")));
        let last = self.semesters.len() - 1;
        &mut self.semesters[last]
    }

    pub fn remove_semester(&mut self, index: usize) -> eyre::Result<Semester> {
        if index >= self.semesters.len() {
            return Err(eyre::eyre!(
                "semester index {index} out of range (have {})",
                self.semesters.len()
            ));
        }
        Ok(self.semesters.remove(index))
    }

    pub fn validate(&self) -> eyre::Result<()> {
        self.semesters.iter().try_for_each(Semester::validate)
    }

    pub fn into_semesters(self) -> Vec<Semester> {
        self.semesters
    }
}

fn ensure_credits(credits: u32) -> eyre::Result<()> {
    if credits < MIN_COURSE_CREDITS {
        return Err(eyre::eyre!(
            "credits must be at least {MIN_COURSE_CREDITS}, got {credits}"
        ));
    }
    Ok(())
}

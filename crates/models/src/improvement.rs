use serde::{Deserialize, Serialize};

use crate::Grade;

/// A proposed grade replacement for one already-counted course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImprovementEntry {
    pub name: String,
    pub credits: f64,
    pub old_grade: Grade,
    pub new_grade: Grade,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryUpdate {
    Name(String),
    Credits(f64),
    OldGrade(Grade),
    NewGrade(Grade),
}

impl ImprovementEntry {
    pub fn new(
        name: impl Into<String>,
        credits: f64,
        old_grade: Grade,
        new_grade: Grade,
    ) -> eyre::Result<Self> {
        let entry = Self {
            name: name.into(),
            credits,
            old_grade,
            new_grade,
        };
        entry.validate()?;
        Ok(entry)
    }

    pub fn validate(&self) -> eyre::Result<()> {
        if self.name.trim().is_empty() {
            return Err(eyre::eyre!("course name must not be empty"));
        }
        if !self.credits.is_finite() || self.credits <= 0.0 {
            return Err(eyre::eyre!(
                "credits must be a positive number, got {}",
                self.credits
            ));
        }
        Ok(())
    }
}

/// The simulator's editable list of entries. Every stored entry is valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImprovementPlan {
    entries: Vec<ImprovementEntry>,
}

impl ImprovementPlan {
    pub fn entries(&self) -> &[ImprovementEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: ImprovementEntry) -> eyre::Result<()> {
        entry.validate()?;
        self.entries.push(entry);
        Ok(())
    }

    /// Apply one field edit. An edit that would make the entry invalid is
    /// rejected and the entry keeps its previous value.
    pub fn update(&mut self, index: usize, update: EntryUpdate) -> eyre::Result<()> {
        let count = self.entries.len();
        let current = self
            .entries
            .get(index)
            .ok_or_else(|| eyre::eyre!("entry index {index} out of range (have {count})"))?;

        let mut next = current.clone();
        match update {
            EntryUpdate::Name(name) => next.name = name,
            EntryUpdate::Credits(credits) => next.credits = credits,
            EntryUpdate::OldGrade(grade) => next.old_grade = grade,
            EntryUpdate::NewGrade(grade) => next.new_grade = grade,
        }
        next.validate()?;
        self.entries[index] = next;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> eyre::Result<ImprovementEntry> {
        if index >= self.entries.len() {
            return Err(eyre::eyre!(
                "entry index {index} out of range (have {})",
                self.entries.len()
            ));
        }
        Ok(self.entries.remove(index))
    }
}

impl TryFrom<Vec<ImprovementEntry>> for ImprovementPlan {
    type Error = eyre::Report;

    fn try_from(entries: Vec<ImprovementEntry>) -> eyre::Result<Self> {
        let mut plan = Self::default();
        for (i, entry) in entries.into_iter().enumerate() {
            plan.push(entry).map_err(|e| eyre::eyre!("entry #{}: {e}", i + 1))?;
        }
        Ok(plan)
    }
}

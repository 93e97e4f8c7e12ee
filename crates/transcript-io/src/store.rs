use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use eyre::WrapErr;
use models::Transcript;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

pub const DEFAULT_LIFETIME_DAYS: u32 = 365;

/// Where the tracker keeps the transcript between runs.
pub trait TranscriptStore {
    fn load(&self) -> eyre::Result<Option<Transcript>>;
    fn save(&self, transcript: &Transcript) -> eyre::Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredTranscript {
    saved_at: i64,
    transcript: Transcript,
}

/// JSON file on disk. Entries older than `lifetime` are treated as absent.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    lifetime: Duration,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, lifetime_days: u32) -> Self {
        Self {
            path: path.into(),
            lifetime: Duration::days(i64::from(lifetime_days)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A file that no longer parses or validates is logged and treated as
    /// absent, so the next save (or an import) replaces it.
    pub fn load_at(&self, now: OffsetDateTime) -> eyre::Result<Option<Transcript>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let file = File::open(&self.path)
            .wrap_err_with(|| format!("open transcript store: {}", self.path.display()))?;
        let stored = match read_stored(file) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %format!("{e:#}"),
                    "ignoring unreadable transcript store; starting empty"
                );
                return Ok(None);
            }
        };

        if now - stored.saved_at > self.lifetime {
            tracing::info!(
                path = %self.path.display(),
                saved_at = stored.saved_at.unix_timestamp(),
                "stored transcript expired; starting empty"
            );
            return Ok(None);
        }
        Ok(Some(stored.transcript))
    }

    pub fn save_at(&self, transcript: &Transcript, now: OffsetDateTime) -> eyre::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).wrap_err("create transcript store directory")?;
            }
        }
        let file = File::create(&self.path)
            .wrap_err_with(|| format!("create transcript store: {}", self.path.display()))?;
        let stored = StoredTranscript {
            saved_at: now.unix_timestamp(),
            transcript: transcript.clone(),
        };
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &stored).wrap_err("write transcript store")?;
        writer.flush().wrap_err("flush transcript store")?;
        tracing::debug!(path = %self.path.display(), "saved transcript");
        Ok(())
    }
}

struct LoadedTranscript {
    saved_at: OffsetDateTime,
    transcript: Transcript,
}

fn read_stored(file: File) -> eyre::Result<LoadedTranscript> {
    let stored: StoredTranscript =
        serde_json::from_reader(BufReader::new(file)).wrap_err("parse transcript store")?;
    stored
        .transcript
        .validate()
        .wrap_err("stored transcript is invalid")?;
    let saved_at = OffsetDateTime::from_unix_timestamp(stored.saved_at)
        .wrap_err("stored timestamp out of range")?;
    Ok(LoadedTranscript {
        saved_at,
        transcript: stored.transcript,
    })
}

impl TranscriptStore for FileStore {
    fn load(&self) -> eyre::Result<Option<Transcript>> {
        self.load_at(OffsetDateTime::now_utc())
    }

    fn save(&self, transcript: &Transcript) -> eyre::Result<()> {
        self.save_at(transcript, OffsetDateTime::now_utc())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RefCell<Option<Transcript>>,
    saves: RefCell<usize>,
}

impl MemoryStore {
    pub fn with(transcript: Transcript) -> Self {
        Self {
            slot: RefCell::new(Some(transcript)),
            saves: RefCell::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl TranscriptStore for MemoryStore {
    fn load(&self) -> eyre::Result<Option<Transcript>> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, transcript: &Transcript) -> eyre::Result<()> {
        *self.slot.borrow_mut() = Some(transcript.clone());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

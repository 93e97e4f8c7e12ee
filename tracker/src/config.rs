use std::path::PathBuf;

use eyre::WrapErr;
use transcript_io::DEFAULT_LIFETIME_DAYS;

use crate::cli::{OutputFormat, RootArgs};

const DEFAULT_STORE_PATH: &str = "data/transcript.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_path: PathBuf,
    pub store_lifetime_days: u32,
    pub format: OutputFormat,
}

impl AppConfig {
    pub fn from_env_and_args(args: &RootArgs) -> eyre::Result<Self> {
        let store_path = match &args.store {
            Some(path) => path.clone(),
            None => std::env::var("GPA_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORE_PATH)),
        };
        let store_lifetime_days = match std::env::var("GPA_STORE_TTL_DAYS") {
            Ok(v) => v
                .trim()
                .parse::<u32>()
                .wrap_err("GPA_STORE_TTL_DAYS must be a valid u32")?,
            Err(_) => DEFAULT_LIFETIME_DAYS,
        };

        Ok(Self {
            store_path,
            store_lifetime_days,
            format: args.format,
        })
    }
}

//! Command-line surface.

use clap::{Parser, Subcommand};
use halloffame_core::config::{ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
use halloffame_core::{CoreConfig, PersonId};

/// Hall of Fame person registry
#[derive(Parser, Debug)]
#[command(name = "halloffame")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file (in-memory when omitted)
    #[arg(long, global = true, env = ENV_DB_PATH)]
    pub db: Option<String>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true, env = ENV_LOG_LEVEL)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files (logging off when omitted)
    #[arg(long, global = true, env = ENV_LOG_DIR)]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every person
    List,
    /// Show one person
    Get { id: PersonId },
    /// Create a person from a JSON body (`-` reads stdin)
    Create { body: String },
    /// Replace a person's fields and skills from a JSON body (`-` reads stdin)
    Update { id: PersonId, body: String },
    /// Delete a person and its skills
    Delete { id: PersonId },
}

impl Cli {
    /// Resolves flags (already merged with env by clap) into core config.
    pub fn core_config(&self) -> Result<CoreConfig, String> {
        CoreConfig::from_lookup(|key| match key {
            ENV_DB_PATH => self.db.clone(),
            ENV_LOG_LEVEL => self.log_level.clone(),
            ENV_LOG_DIR => self.log_dir.clone(),
            _ => None,
        })
    }
}

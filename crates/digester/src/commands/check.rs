//! `digester check` command implementation.

use std::path::PathBuf;

use clap::Args;
use digester_config::Config;

use crate::error::CliError;
use crate::export::load_messages;
use crate::output::{Reporter, check_line, decode_failure_line};

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Channel export file (JSON array of messages).
    messages: PathBuf,

    /// Path to configuration file (default: auto-discover digester.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Every message is decoded; each failure is reported, not only the first.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or any message fails to decode.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let reporter = Reporter::new();

        let config = Config::load(self.config.as_deref(), None)?;
        let messages = load_messages(&self.messages)?;

        let mut failures = 0;
        for (index, message) in messages.iter().enumerate() {
            if let Err(err) = message.decode_blocks(config.render.max_depth) {
                reporter.emit(&decode_failure_line(index, message, &err));
                failures += 1;
            }
        }

        match check_line(messages.len(), failures) {
            Some(line) => {
                reporter.emit(&line);
                Ok(())
            }
            None => Err(CliError::Validation(format!(
                "{failures} of {} messages could not be decoded",
                messages.len()
            ))),
        }
    }
}

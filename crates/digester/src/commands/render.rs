//! `digester render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use digester_blocks::{RenderedMessage, RichTextRenderer, render_messages};
use digester_config::{CliSettings, Config, DecodeErrorPolicy};

use crate::error::CliError;
use crate::export::{batch_config, load_channels, load_messages, load_users, render_options};
use crate::output::{Reporter, batch_lines};

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Channel export file (JSON array of messages).
    messages: PathBuf,

    /// Export `users.json` (overrides config).
    #[arg(short, long)]
    users: Option<PathBuf>,

    /// Export `channels.json` (overrides config).
    #[arg(long)]
    channels: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover digester.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write rendered JSON to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip messages that cannot be decoded instead of failing.
    #[arg(long)]
    skip_invalid: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if an input file cannot be read or a message cannot
    /// be decoded under the abort policy.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            users_file: self.users,
            channels_file: self.channels,
            on_decode_error: self.skip_invalid.then_some(DecodeErrorPolicy::Skip),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let messages = load_messages(&self.messages)?;
        let users = load_users(config.export_resolved.users_file.as_deref())?;
        let channels = load_channels(config.export_resolved.channels_file.as_deref())?;

        let mut renderer = RichTextRenderer::new(&users, render_options(&config));
        if let Some(channels) = &channels {
            renderer = renderer.with_channels(channels);
        }

        let outcome = render_messages(&renderer, &messages, &batch_config(&config))?;

        write_rendered(self.output.as_deref(), &outcome.rendered)?;

        Reporter::new().emit_all(&batch_lines(&outcome, self.output.as_deref()));

        Ok(())
    }
}

/// Write rendered messages as pretty JSON to a file or stdout.
fn write_rendered(path: Option<&Path>, rendered: &[RenderedMessage]) -> Result<(), CliError> {
    match path {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            let mut writer = std::io::BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, rendered)?;
            writeln!(writer)?;
            writer.flush()?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, rendered)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_write_rendered_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let rendered = vec![RenderedMessage {
            ts: "1.0".to_owned(),
            user: None,
            thread_ts: None,
            parent_user_id: None,
            markdown: "**hi**".to_owned(),
            html: "<p><strong>hi</strong></p>".to_owned(),
            warnings: Vec::new(),
        }];

        write_rendered(Some(&path), &rendered).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!([{
                "ts": "1.0",
                "markdown": "**hi**",
                "html": "<p><strong>hi</strong></p>"
            }])
        );
    }

    #[test]
    fn test_execute_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let messages = dir.path().join("2024-01-01.json");
        let users = dir.path().join("users.json");
        let config = dir.path().join("digester.toml");
        let out = dir.path().join("rendered.json");
        std::fs::write(
            &messages,
            r#"[
                {
                    "user": "U01",
                    "ts": "1.0",
                    "blocks": [{
                        "type": "rich_text",
                        "elements": [{
                            "type": "rich_text_section",
                            "elements": [
                                {"type": "user", "user_id": "U01"},
                                {"type": "text", "text": " shipped it", "style": {"italic": true}}
                            ]
                        }]
                    }]
                },
                {"user": "U01", "ts": "2.0", "blocks": [{"type": "rich_text", "elements": [{"type": "text", "text": "x", "style": 1}]}]}
            ]"#,
        )
        .unwrap();
        std::fs::write(&users, r#"[{"id": "U01", "name": "alice"}]"#).unwrap();
        std::fs::write(&config, "").unwrap();

        let args = RenderArgs {
            messages,
            users: Some(users),
            channels: None,
            config: Some(config),
            output: Some(out.clone()),
            skip_invalid: true,
            verbose: false,
        };
        args.execute().unwrap();

        let written: Vec<serde_json::Value> =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(
            written[0]["markdown"],
            r#"<span class="user-mention">@alice</span> *shipped it*"#
        );
    }

    #[test]
    fn test_execute_aborts_on_invalid_message() {
        let dir = tempfile::tempdir().unwrap();
        let messages = dir.path().join("2024-01-01.json");
        let config = dir.path().join("digester.toml");
        std::fs::write(
            &messages,
            r#"[{"ts": "7.0", "blocks": [{"type": "rich_text", "elements": [{"type": "text", "text": "x", "style": 1}]}]}]"#,
        )
        .unwrap();
        std::fs::write(&config, "").unwrap();

        let args = RenderArgs {
            messages,
            users: None,
            channels: None,
            config: Some(config),
            output: Some(dir.path().join("rendered.json")),
            skip_invalid: false,
            verbose: false,
        };
        let err = args.execute().unwrap_err();

        assert!(matches!(err, CliError::Batch(_)), "Expected CliError::Batch, got {err:?}");
        assert!(err.to_string().contains("ts 7.0"));
    }
}

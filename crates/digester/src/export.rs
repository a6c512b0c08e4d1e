//! Reading Slack export files and mapping configuration onto the renderer.

use std::path::Path;

use digester_blocks::{
    BatchConfig, ChannelDirectory, ChannelMentions, ChannelRecord, DecodePolicy, Message,
    RenderOptions, UserDirectory, UserRecord,
};
use digester_config::{ChannelMentionsSetting, Config, DecodeErrorPolicy};
use serde::de::DeserializeOwned;

use crate::error::CliError;

/// Read and parse a JSON export file.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a channel's messages (one daily export file).
pub(crate) fn load_messages(path: &Path) -> Result<Vec<Message>, CliError> {
    let messages: Vec<Message> = read_json(path)?;
    tracing::info!(path = %path.display(), count = messages.len(), "Loaded messages");
    Ok(messages)
}

/// Load the user directory, or an empty one when no file is configured.
pub(crate) fn load_users(path: Option<&Path>) -> Result<UserDirectory, CliError> {
    let Some(path) = path else {
        tracing::info!("No users file configured, mentions will render as unknown users");
        return Ok(UserDirectory::new());
    };
    let records: Vec<UserRecord> = read_json(path)?;
    let users = UserDirectory::from_users(&records);
    tracing::info!(path = %path.display(), count = users.len(), "Loaded users");
    Ok(users)
}

/// Load the channel directory, if a file is configured.
pub(crate) fn load_channels(path: Option<&Path>) -> Result<Option<ChannelDirectory>, CliError> {
    let Some(path) = path else {
        return Ok(None);
    };
    let records: Vec<ChannelRecord> = read_json(path)?;
    let channels = ChannelDirectory::from_channels(&records);
    tracing::info!(path = %path.display(), count = channels.len(), "Loaded channels");
    Ok(Some(channels))
}

/// Renderer options from the `[render]` section.
pub(crate) fn render_options(config: &Config) -> RenderOptions {
    RenderOptions {
        links_in_new_tab: config.render.links_in_new_tab,
        gfm: config.render.gfm,
        channel_mentions: match config.render.channel_mentions {
            ChannelMentionsSetting::Identifier => ChannelMentions::Identifier,
            ChannelMentionsSetting::Name => ChannelMentions::Name,
        },
    }
}

/// Batch settings from the `[render]` and `[ingest]` sections.
pub(crate) fn batch_config(config: &Config) -> BatchConfig {
    BatchConfig {
        policy: match config.ingest.on_decode_error {
            DecodeErrorPolicy::Abort => DecodePolicy::Abort,
            DecodeErrorPolicy::Skip => DecodePolicy::Skip,
        },
        max_depth: config.render.max_depth,
    }
}

//! User and channel mentions.
//!
//! Mentions are wrapped in inline `<span>` markers. The markdown parser
//! passes inline HTML through unchanged, so the HTML output keeps a styling
//! hook for mentions without a custom syntax extension.

use crate::directory::{ChannelDirectory, UserDirectory};

const UNKNOWN_USER: &str = "unknown-user";
const UNKNOWN_CHANNEL: &str = "unknown-channel";

/// Render a user mention as `@name` inside a `user-mention` span.
///
/// Users missing from the directory, or listed with an empty name, render as
/// `@unknown-user`.
pub fn render_user(user_id: &str, users: &UserDirectory) -> String {
    format!(
        r#"<span class="user-mention">{}</span>"#,
        user_label(user_id, users)
    )
}

/// Render a channel mention inside a `channel-mention` span.
///
/// With a directory, known channels render as `#name`. Otherwise the channel
/// ID is shown. An empty ID renders as `#unknown-channel`.
pub fn render_channel(channel_id: &str, channels: Option<&ChannelDirectory>) -> String {
    format!(
        r#"<span class="channel-mention">{}</span>"#,
        channel_label(channel_id, channels)
    )
}

/// `@name` without markup.
pub(super) fn user_label(user_id: &str, users: &UserDirectory) -> String {
    let name = users
        .get(user_id)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_USER);
    format!("@{name}")
}

/// `#name` or `#id` without markup.
pub(super) fn channel_label(channel_id: &str, channels: Option<&ChannelDirectory>) -> String {
    if channel_id.is_empty() {
        return format!("#{UNKNOWN_CHANNEL}");
    }
    let name = channels
        .and_then(|directory| directory.get(channel_id))
        .filter(|name| !name.is_empty())
        .unwrap_or(channel_id);
    format!("#{name}")
}

//! Error types for rich text decoding.

/// Error returned when a block array cannot be turned into a [`Block`](crate::Block) tree.
///
/// Decode failures are fatal for the message they belong to: a malformed
/// style or an unexpected structure means the export uses a schema this
/// crate does not understand, and rendering it anyway would store wrong
/// content.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A `style` value is neither a list style string nor a text style object.
    #[error("unrecognized style shape: expected a list style string or a text style object, found {found}")]
    UnrecognizedStyleShape {
        /// Description of the JSON value that was found (e.g. "number").
        found: String,
    },

    /// The block array does not have the expected JSON structure.
    #[error("invalid block structure: {0}")]
    Json(#[from] serde_json::Error),

    /// Elements are nested deeper than the configured limit.
    #[error("element nesting exceeds the limit of {limit} levels")]
    NestingTooDeep {
        /// Maximum allowed nesting depth.
        limit: usize,
    },
}

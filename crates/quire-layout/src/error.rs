//! Layout errors.
//!
//! Everything here is an invariant violation of the box tree or of a
//! collaborator contract. Layout of the current page stops at the first one;
//! degenerate but legal inputs (zero-sized images, lines too narrow for a
//! single word) never produce an error.

use thiserror::Error;

/// Errors raised while laying out inline content or out-of-flow boxes.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A box of the wrong kind reached a dispatch point.
    #[error("unexpected {kind} box in {context}")]
    UnexpectedBox {
        /// Where the box was found.
        context: &'static str,
        /// Kind of the offending box.
        kind: &'static str,
    },

    /// A skip stack does not match the shape of the box it is applied to.
    #[error("malformed skip stack for {context}")]
    MalformedSkipStack {
        /// Kind of the box the skip stack was applied to.
        context: &'static str,
    },

    /// The text shaper skipped characters that are not a preserved line break.
    #[error("expected nothing or a preserved line break between two lines, got {found:?}")]
    UnexpectedLineBreak {
        /// The skipped characters.
        found: String,
    },

    /// The text shaper returned an offset that is not a character boundary.
    #[error("shaping offset {offset} is not a character boundary in {text:?}")]
    InvalidShapingOffset {
        /// Offset in UTF-8 bytes.
        offset: usize,
        /// The shaped text.
        text: String,
    },

    /// The text shaper consumed nothing and asked to resume at the same place.
    #[error("text shaper made no progress in {text:?}")]
    NoProgress {
        /// The shaped text.
        text: String,
    },

    /// An absolute placeholder was laid out twice.
    #[error("absolute placeholder is already laid out")]
    PlaceholderAlreadyResolved,

    /// A normal-flow collaborator failed.
    #[error("flow layout failed: {0}")]
    Collaborator(String),

    /// A layout snapshot could not be serialized.
    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Result type used across layout.
pub type Result<T> = std::result::Result<T, LayoutError>;

use thiserror::Error;

use crate::document::ElementId;

/// Library error type for carousel operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No element in the document carries the requested marker.
    #[error("no element marked `{0}` in the document")]
    MissingElement(String),

    /// An id captured at mount time no longer resolves to an element.
    #[error("element {0} is not part of the document")]
    StaleElement(ElementId),

    /// A control line did not name a known command.
    #[error("unknown control command: {0:?}")]
    UnknownCommand(String),

    /// A `scroll` control line carried an unparsable offset.
    #[error("invalid scroll offset: {0:?}")]
    BadScrollOffset(String),
}

use thiserror::Error;

/// Errors reported by cursor operations.
///
/// Every error is surfaced synchronously to the caller and is never retried
/// internally. A rejected operation leaves the list untouched: links, length
/// and change counter are exactly as they were before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CursorError {
    /// `next` or `previous` was called with no element available in that
    /// direction.
    #[error("no element available in that direction")]
    EndOfSequence,

    /// `remove` or `set` was called with no current element, either because
    /// the cursor has not visited one yet or because a prior `remove`
    /// already consumed it.
    #[error("no current element to update")]
    NoCurrentElement,

    /// The list was structurally modified through another cursor (or a
    /// direct list mutation) since this cursor last synchronized with it.
    /// The cursor is permanently stale and should be discarded.
    #[error("list was structurally modified since this cursor last synchronized")]
    StaleCursor,

    /// The list variant does not support the named operation in its current
    /// state.
    #[error("operation `{0}` is not supported by this list")]
    Unsupported(&'static str),
}

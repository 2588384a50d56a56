use crate::SnowId;

/// Outcome of a non-blocking [`Generator::poll_id`] call.
///
/// - [`IdGenStatus::Ready`] carries a freshly minted ID.
/// - [`IdGenStatus::Pending`] means the current millisecond is used up (or the
///   clock reads behind the last ID) and the caller should retry after
///   `yield_for` milliseconds.
///
/// # Example
///
/// ```
/// use snowid::{Generator, IdGenStatus};
///
/// let generator = Generator::new(0).unwrap();
/// let id = loop {
///     match generator.poll_id() {
///         IdGenStatus::Ready { id } => break id,
///         IdGenStatus::Pending { .. } => std::thread::yield_now(),
///     }
/// };
/// assert!(id.is_valid());
/// ```
///
/// [`Generator::poll_id`]: crate::Generator::poll_id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: SnowId,
    },
    /// No ID could be generated without going backward or reusing a sequence.
    Pending {
        /// Milliseconds to wait before trying again.
        yield_for: i64,
    },
}

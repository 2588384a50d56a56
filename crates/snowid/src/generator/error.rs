/// Errors raised while setting up a [`Generator`].
///
/// Generating IDs never fails once a generator exists; these are all
/// construction-time problems.
///
/// [`Generator`]: crate::Generator
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The node number does not fit the layout's node field.
    #[error("node number must be between 0 and {max}, got {node}")]
    InvalidNode {
        /// The rejected node number.
        node: i64,
        /// The largest node number the layout allows.
        max: i64,
    },

    /// The node and sequence widths leave too few bits for the timestamp.
    #[error("node bits ({node_bits}) and step bits ({step_bits}) must not exceed 22 combined")]
    InvalidLayout {
        /// Requested node field width.
        node_bits: u8,
        /// Requested sequence field width.
        step_bits: u8,
    },
}

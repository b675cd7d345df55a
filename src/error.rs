//! Errors reported by [`List`](crate::List) operations.

/// The reason a list operation was rejected.
///
/// A rejected operation never modifies the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// The operation needs at least one element.
    #[error("the list is empty")]
    EmptyContainer,
    /// The index does not address a valid position of the list.
    #[error("index {index} is out of range for a list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T, E = ListError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::ListError;

    #[test]
    fn error_messages() {
        assert_eq!(ListError::EmptyContainer.to_string(), "the list is empty");
        assert_eq!(
            ListError::IndexOutOfRange { index: 4, len: 3 }.to_string(),
            "index 4 is out of range for a list of length 3"
        );
    }
}

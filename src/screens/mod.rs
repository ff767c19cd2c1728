//! Screen state.
//!
//! Each screen owns its records, its list query and its in-flight remote
//! calls. Rendering reads these objects; key handling mutates them.

pub mod explore;
pub mod favorites;
pub mod trips;

pub use explore::ExploreScreen;
pub use favorites::FavoritesScreen;
pub use trips::TripsScreen;

/// Something a finished background operation wants the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Show a message in the status bar
    Status(String),
    /// Open a URL in the user's browser
    OpenUrl(String),
}

/// Previous index in a list of `len` items, wrapping to the bottom.
pub(crate) fn wrap_prev(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if index == 0 {
        len - 1
    } else {
        (index - 1).min(len - 1)
    }
}

/// Next index in a list of `len` items, wrapping to the top.
pub(crate) fn wrap_next(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (index + 1) % len }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_selection() {
        assert_eq!(wrap_prev(0, 3), 2);
        assert_eq!(wrap_prev(2, 3), 1);
        assert_eq!(wrap_next(2, 3), 0);
        assert_eq!(wrap_next(0, 0), 0);
        assert_eq!(wrap_prev(0, 0), 0);
    }
}

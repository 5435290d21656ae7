//! # Pattern Tools

/// Concatenate string literals with a separator.
///
/// ```rust
/// use robertatok::join_strs;
///
/// assert_eq!(join_strs!(",", ("a", "b", "c")), "a,b,c");
/// assert_eq!(join_strs!(";", ("OnlyOne")), "OnlyOne");
/// ```
#[macro_export]
macro_rules! join_strs {
    ($sep:literal, ($first:literal $(, $rest:literal)* $(,)?)) => {
        concat!($first $(, $sep, $rest)*)
    };
}

/// [`join_strs!()`] with ``"|"`` as the separator; builds regex alternations.
#[macro_export]
macro_rules! join_patterns {
    ($($e:literal),* $(,)?) => { $crate::join_strs!("|", ($($e),*)) };
}

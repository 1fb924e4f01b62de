//! Random source for reply variety. Injected so tests can pin the selection.

/// Uniform index generator.
pub trait RandomSource: Send + Sync {
    /// Returns an index in `0..len`. Callers never pass zero.
    fn next_index(&self, len: usize) -> usize;
}

/// Pick one element of a non-empty canned-reply table.
pub fn pick<'a, T>(rng: &dyn RandomSource, items: &'a [T]) -> &'a T {
    debug_assert!(!items.is_empty(), "pick from empty table");
    &items[rng.next_index(items.len()) % items.len()]
}

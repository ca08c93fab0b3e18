//! Guarding deeply recursive traversals against stack overflow.

/// Remaining stack space below which the stack is grown.
const RED_ZONE: usize = 100 * 1024; // 100k

/// How much stack to allocate each time the stack is grown.
const STACK_PER_RECURSION: usize = 1024 * 1024; // 1MB

/// Grows the stack on demand to prevent stack overflow. Call this in strategic
/// locations to "break up" recursive calls, e.g. at the entry of every term
/// visited by a tree walk. The walk itself stays a plain recursive function,
/// but its depth is then only bounded by available memory.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

//! Relocating a paused reading position inside a freshly captured buffer.
//!
//! Captured text shifts between scrapes, so resuming by raw index is not
//! reliable. Instead the paused word and up to [`CONTEXT_RADIUS`] neighbours on
//! each side are remembered, and every case-insensitive occurrence of the
//! word in the new buffer is scored by how much of that neighbourhood lines
//! up around it.

use alloc::string::String;

use heapless::Vec as HeaplessVec;

pub const CONTEXT_RADIUS: usize = 3;
pub const CONTEXT_WINDOW: usize = CONTEXT_RADIUS * 2 + 1;

/// Snapshot of the tokens surrounding a paused word.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RememberedContext {
    window: HeaplessVec<String, CONTEXT_WINDOW>,
    target_offset: usize,
}

impl RememberedContext {
    /// Capture the window around `tokens[index]`, clipped at the buffer edges.
    pub fn capture(tokens: &[String], index: usize) -> Option<Self> {
        if index >= tokens.len() {
            return None;
        }

        let start = index.saturating_sub(CONTEXT_RADIUS);
        let end = (index + CONTEXT_RADIUS).min(tokens.len() - 1);
        let window = HeaplessVec::from_slice(&tokens[start..=end]).ok()?;

        Some(Self {
            window,
            target_offset: index - start,
        })
    }

    /// Build a context from an explicit window with the target at `target_offset`.
    pub fn from_window<'a, I>(window: I, target_offset: usize) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tokens = HeaplessVec::new();
        for token in window {
            tokens.push(String::from(token)).ok()?;
        }
        if target_offset >= tokens.len() {
            return None;
        }

        Some(Self {
            window: tokens,
            target_offset,
        })
    }

    pub fn target(&self) -> &str {
        &self.window[self.target_offset]
    }

    pub fn window(&self) -> &[String] {
        &self.window
    }

    pub fn target_offset(&self) -> usize {
        self.target_offset
    }
}

/// Index in `tokens` matching the remembered target, or `None` when the buffer is too
/// short or no occurrence has enough surrounding context in common.
///
/// The first occurrence (ascending) matching at least half the window wins.
///
/// Slots are compared by their offset from the target, so near the start of
/// the buffer, where the scan window is clamped, each remembered word is
/// still checked against the token at the same distance from the candidate.
/// The slots the clamp cuts off count as misses.
pub fn resume_index(tokens: &[String], context: &RememberedContext) -> Option<usize> {
    let window_len = context.window.len();
    if tokens.len() < window_len {
        return None;
    }

    let threshold = window_len / 2;
    let target = context.target();

    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| tokens_match(token, target))
        .map(|(candidate, _)| candidate)
        .find(|&candidate| aligned_matches(tokens, context, candidate) >= threshold)
}

/// Count window slots that agree with `tokens` when the target is placed at
/// `candidate`. Slots falling outside the buffer never match.
fn aligned_matches(tokens: &[String], context: &RememberedContext, candidate: usize) -> usize {
    let window_len = context.window.len();
    let start = candidate.saturating_sub(context.target_offset);
    let end = (start + window_len - 1).min(tokens.len() - 1);

    (start..=end)
        .filter(|&position| {
            let Some(slot) = (position + context.target_offset).checked_sub(candidate) else {
                return false;
            };
            context
                .window
                .get(slot)
                .is_some_and(|expected| tokens_match(&tokens[position], expected))
        })
        .count()
}

fn tokens_match(left: &str, right: &str) -> bool {
    left.chars()
        .flat_map(char::to_lowercase)
        .eq(right.chars().flat_map(char::to_lowercase))
}

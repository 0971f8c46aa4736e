//! Merging of caller-supplied and AI-suggested tags.

use std::collections::HashSet;

/// User tags first in their original order, then AI tags not already present.
///
/// Duplicates are dropped on first sight. Comparison is exact string equality:
/// no case folding or trimming.
pub fn reconcile(user_tags: &[String], ai_tags: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();

    user_tags
        .iter()
        .chain(ai_tags)
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}

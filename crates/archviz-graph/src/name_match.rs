//! Substring matching for the node name filter.
//!
//! The pattern language of the filter input field:
//! - leading whitespace is ignored,
//! - trailing whitespace anchors the pattern at the end of the target,
//! - `*` matches any number of arbitrary characters,
//! - every other character matches literally (no regex metacharacters),
//! - an empty pattern matches everything.

/// A parsed filter pattern, reusable across many targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePattern {
    segments: Vec<String>,
    anchored_end: bool,
}

impl NamePattern {
    pub fn new(pattern: &str) -> Self {
        let anchored_end = pattern.ends_with(char::is_whitespace);
        let trimmed = pattern.trim();
        Self {
            segments: trimmed.split('*').map(str::to_owned).collect(),
            anchored_end,
        }
    }

    /// Whether the pattern occurs in `target` (as a contiguous substring, up
    /// to `*` wildcards), respecting the end anchor.
    pub fn matches(&self, target: &str) -> bool {
        if self.anchored_end {
            // `split` yields at least one segment even for the empty pattern.
            let (last, head_segments) = self.segments.split_last().expect("non-empty split");
            match target.strip_suffix(last.as_str()) {
                Some(head) => segments_in_order(head, head_segments),
                None => false,
            }
        } else {
            segments_in_order(target, &self.segments)
        }
    }
}

/// Greedy left-to-right search: each literal segment must occur after the end
/// of the previous one. This is exactly substring search with `.*` gaps.
fn segments_in_order(target: &str, segments: &[String]) -> bool {
    let mut rest = target;
    for segment in segments {
        match rest.find(segment.as_str()) {
            Some(idx) => rest = &rest[idx + segment.len()..],
            None => return false,
        }
    }
    true
}

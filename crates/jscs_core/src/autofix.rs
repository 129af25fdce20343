//! Text-edit plumbing for automatic fixes.
//!
//! Rules describe fixes as replace-range edits against the text that was
//! checked; the checker applies them, re-parses, and re-checks until a pass
//! produces nothing new. Edits from different rules that overlap cannot be
//! applied together, so the overlapped rule's whole edit set is dropped for
//! the pass and picked up on the next iteration.

use std::ops::Range;

/// Fix passes that do not converge indicate a rule whose fix does not remove
/// its own condition; the loop is capped rather than trusted.
pub const MAX_FIX_ITERATIONS: usize = 10;

/// A single replacement of a byte range with new text. An insertion has an
/// empty range; a deletion has empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub insert: String,
}

impl TextEdit {
    pub fn replace(range: Range<usize>, insert: impl Into<String>) -> Self {
        Self {
            range,
            insert: insert.into(),
        }
    }

    pub fn insert_at(offset: usize, insert: impl Into<String>) -> Self {
        Self::replace(offset..offset, insert)
    }

    pub fn delete(range: Range<usize>) -> Self {
        Self::replace(range, "")
    }
}

/// An edit tagged with the rule that produced it.
#[derive(Debug, Clone)]
pub(crate) struct TaggedEdit {
    pub tag: String,
    pub edit: TextEdit,
}

/// Sort edits and throw out whole rules whose edits overlap an earlier one.
/// Partial application of one rule's edits is worse than deferring the rule
/// to the next pass.
pub(crate) fn runnable_edits(mut tagged: Vec<TaggedEdit>) -> Vec<TaggedEdit> {
    tagged.sort_by_key(|t| (t.edit.range.start, t.edit.range.end));

    let mut excluded: Vec<String> = Vec::new();
    for pair in tagged.windows(2) {
        if pair[0].edit.range.end > pair[1].edit.range.start && pair[0].tag != pair[1].tag {
            excluded.push(pair[1].tag.clone());
        }
    }

    tagged
        .into_iter()
        .filter(|t| !excluded.contains(&t.tag))
        .collect()
}

/// Apply edits to the text. Edits must be non-overlapping; they are applied
/// back to front so earlier offsets stay valid.
pub(crate) fn apply_edits(edits: &[TaggedEdit], text: &mut String) {
    let mut sorted: Vec<&TaggedEdit> = edits.iter().collect();
    sorted.sort_by_key(|t| std::cmp::Reverse(t.edit.range.start));
    for tagged in sorted {
        text.replace_range(tagged.edit.range.clone(), &tagged.edit.insert);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str, edit: TextEdit) -> TaggedEdit {
        TaggedEdit {
            tag: name.to_string(),
            edit,
        }
    }

    #[test]
    fn applies_edits_back_to_front() {
        let mut text = "abcdef".to_string();
        let edits = vec![
            tag("a", TextEdit::delete(0..1)),
            tag("a", TextEdit::replace(3..5, "XY")),
        ];
        apply_edits(&edits, &mut text);
        assert_eq!(text, "bcXYf");
    }

    #[test]
    fn overlapping_rule_is_dropped_wholesale() {
        let edits = vec![
            tag("first", TextEdit::replace(0..4, "aa")),
            tag("second", TextEdit::replace(2..6, "bb")),
            tag("second", TextEdit::replace(10..12, "cc")),
            tag("third", TextEdit::replace(20..21, "dd")),
        ];
        let runnable = runnable_edits(edits);
        let tags: Vec<_> = runnable.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, ["first", "third"]);
    }
}

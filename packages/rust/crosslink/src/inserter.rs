//! Anchor search and Markdown link insertion with span tracking.
//!
//! Matches are rejected when they sit next to existing link syntax
//! (`[`/`(` before, `]`/`)` after) or overlap a span this inserter has
//! already consumed. Consumed-interval tracking replaces lookaround-only
//! rejection so an anchor can never land inside the visible text of a
//! link inserted earlier in the same pass.

use regex::RegexBuilder;

/// Mutating link inserter over one article body.
pub(crate) struct LinkInserter {
    content: String,
    /// Byte ranges of inserted `[anchor](url)` spans, kept current as
    /// later insertions shift the text.
    consumed: Vec<(usize, usize)>,
}

impl LinkInserter {
    pub(crate) fn new(content: String) -> Self {
        Self {
            content,
            consumed: Vec::new(),
        }
    }

    /// Finish and return the mutated content.
    pub(crate) fn into_content(self) -> String {
        self.content
    }

    /// Try each anchor candidate in order; on the first match, replace the
    /// matched span with `[matched-text](url)` and return the visible
    /// anchor text with its original casing. `None` means no candidate
    /// matched anywhere in the body.
    pub(crate) fn insert_first(&mut self, anchors: &[String], url: &str) -> Option<String> {
        for anchor in anchors {
            if anchor.is_empty() {
                continue;
            }

            let Some((start, end)) = self.find_linkable(anchor) else {
                continue;
            };

            let matched = self.content[start..end].to_string();
            let link_md = format!("[{matched}]({url})");
            let delta = link_md.len() - (end - start);

            self.content.replace_range(start..end, &link_md);

            // Shift spans that sit after the insertion point.
            for span in &mut self.consumed {
                if span.0 >= start {
                    span.0 += delta;
                    span.1 += delta;
                }
            }
            self.consumed.push((start, start + link_md.len()));

            return Some(matched);
        }

        None
    }

    /// First case-insensitive literal occurrence of `anchor` that is not
    /// adjacent to link syntax and not inside a consumed span.
    fn find_linkable(&self, anchor: &str) -> Option<(usize, usize)> {
        let re = RegexBuilder::new(&regex::escape(anchor))
            .case_insensitive(true)
            .build()
            .ok()?;

        for m in re.find_iter(&self.content) {
            if self.overlaps_consumed(m.start(), m.end()) {
                continue;
            }
            if matches!(self.content[..m.start()].chars().last(), Some('[') | Some('(')) {
                continue;
            }
            if matches!(self.content[m.end()..].chars().next(), Some(']') | Some(')')) {
                continue;
            }
            return Some((m.start(), m.end()));
        }

        None
    }

    fn overlaps_consumed(&self, start: usize, end: usize) -> bool {
        self.consumed
            .iter()
            .any(|&(s, e)| start < e && end > s)
    }
}

//! Anchor-text candidate generation from post titles.
//!
//! Candidates are tried in priority order: the full cleaned title first,
//! then 3-word windows, 2-word windows, and finally single words longer
//! than five characters. Multi-word windows whose first word is a common
//! function word are dropped, since anchors like "to write better" read
//! poorly mid-sentence.

/// Function words that disqualify a window when they lead it.
const SKIP_WORDS: [&str; 9] = ["how", "to", "the", "a", "an", "what", "why", "when", "where"];

fn is_skip_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    SKIP_WORDS.contains(&lower.as_str())
}

/// Strip punctuation from a title, keeping word characters and whitespace.
fn clean_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Generate anchor-text candidates from a post title, best first.
pub(crate) fn anchor_candidates(title: &str) -> Vec<String> {
    let clean = clean_title(title);
    let mut candidates = Vec::new();

    if !clean.is_empty() {
        candidates.push(clean.clone());
    }

    let words: Vec<&str> = clean.split_whitespace().collect();

    for window in [3usize, 2] {
        if words.len() < window {
            continue;
        }
        for i in 0..=words.len() - window {
            if !is_skip_word(words[i]) {
                candidates.push(words[i..i + window].join(" "));
            }
        }
    }

    for word in &words {
        if word.chars().count() > 5 && !is_skip_word(word) {
            candidates.push((*word).to_string());
        }
    }

    candidates
}

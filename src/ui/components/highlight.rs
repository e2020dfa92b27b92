//! Search-term highlighting for card text.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

/// Split `text` into runs, flagging the runs that match `term`
///
/// Matching ignores case. An empty or blank term yields the whole text as a
/// single unmatched run.
pub fn split_matches(text: &str, term: &str) -> Vec<(String, bool)> {
    let term: Vec<char> = term.trim().chars().collect();
    if term.is_empty() || text.is_empty() {
        return vec![(text.to_string(), false)];
    }

    let chars: Vec<char> = text.chars().collect();
    let mut runs: Vec<(String, bool)> = Vec::new();
    let mut plain = String::new();
    let mut i = 0;
    while i < chars.len() {
        if matches_at(&chars[i..], &term) {
            if !plain.is_empty() {
                runs.push((std::mem::take(&mut plain), false));
            }
            runs.push((chars[i..i + term.len()].iter().collect(), true));
            i += term.len();
        } else {
            plain.push(chars[i]);
            i += 1;
        }
    }
    if !plain.is_empty() {
        runs.push((plain, false));
    }
    runs
}

fn matches_at(haystack: &[char], needle: &[char]) -> bool {
    haystack.len() >= needle.len()
        && haystack
            .iter()
            .zip(needle)
            .all(|(a, b)| a.to_lowercase().eq(b.to_lowercase()))
}

/// Spans for `text` with the matches of `term` drawn on a yellow background
pub fn highlight_spans(text: &str, term: &str, base: Style) -> Vec<Span<'static>> {
    let matched = base.bg(Color::Yellow).fg(Color::Black).add_modifier(Modifier::BOLD);
    split_matches(text, term)
        .into_iter()
        .map(|(run, is_match)| Span::styled(run, if is_match { matched } else { base }))
        .collect()
}

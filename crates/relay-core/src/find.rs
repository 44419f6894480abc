//! Fuzzy search over the tool collection.

use relay_proto::Tool;

/// Scores `query` against `text`, 0-100. Exact match beats prefix beats
/// substring beats a scattered in-order character match.
pub fn fuzzy_score(query: &str, text: &str) -> u32 {
    if query.is_empty() {
        return 100;
    }
    if text.is_empty() {
        return 0;
    }

    let query = query.to_lowercase();
    let text = text.to_lowercase();

    if text == query {
        return 100;
    }
    if text.starts_with(&query) {
        return 85;
    }
    if text.contains(&query) {
        return 65;
    }

    // In-order character scan: every query character must appear in the
    // text, in sequence. Density of the match sets the score below the
    // substring tier.
    let mut remaining = query.chars().peekable();
    let mut matched = 0usize;
    for c in text.chars() {
        if remaining.peek() == Some(&c) {
            remaining.next();
            matched += 1;
        }
    }
    if remaining.peek().is_some() {
        return 0;
    }
    let density = matched as f32 / text.chars().count() as f32;
    10 + (density * 40.0) as u32
}

/// Tools matching `query` by name or description, best matches first.
/// Ties keep collection order.
pub fn search_tools(tools: &[Tool], query: &str) -> Vec<Tool> {
    let mut scored: Vec<(u32, &Tool)> = tools
        .iter()
        .map(|tool| {
            let score = fuzzy_score(query, &tool.name).max(fuzzy_score(query, &tool.description));
            (score, tool)
        })
        .filter(|(score, _)| *score > 0)
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, tool)| tool.clone()).collect()
}

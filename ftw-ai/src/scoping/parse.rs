use regex::Regex;

use crate::llm::extract_json_object;
use crate::models::ScopeResult;

const QUICK_DEFAULT_PRICE: (u32, u32) = (100, 300);
const QUICK_DEFAULT_TIME: &str = "1-2 days";

const DETAILED_DEFAULT_PRICE: (u32, u32) = (200, 800);
const DETAILED_DEFAULT_TIME: &str = "1-3 days";

/// Raw-text truncation length when a detailed response fails to parse as
/// JSON entirely.
const RAW_SCOPE_MAX_CHARS: usize = 600;

/// Parse the cheap tier's labeled-line format (`SCOPE:`, `PRICE:`,
/// `MATERIALS:`, `TIME:`). Missing labels fall back to defaults; a missing
/// `SCOPE:` label keeps the whole response text as the scope.
pub fn parse_labeled_scope(text: &str, model: &str) -> ScopeResult {
    let mut scope = None;
    let mut price = None;
    let mut materials = Vec::new();
    let mut time = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(rest) = strip_label(trimmed, "SCOPE:") {
            scope = Some(rest.to_string());
        } else if let Some(rest) = strip_label(trimmed, "PRICE:") {
            price = parse_price_range(rest);
        } else if let Some(rest) = strip_label(trimmed, "MATERIALS:") {
            materials = rest
                .split(',')
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty() && item != "none")
                .collect();
        } else if let Some(rest) = strip_label(trimmed, "TIME:") {
            time = Some(rest.to_string());
        }
    }

    let (price_low, price_high) = price.unwrap_or(QUICK_DEFAULT_PRICE);

    ScopeResult {
        scope: scope.unwrap_or_else(|| text.trim().to_string()),
        price_low,
        price_high,
        materials,
        time: time.unwrap_or_else(|| QUICK_DEFAULT_TIME.to_string()),
        model: model.to_string(),
    }
    .normalize_prices()
}

/// Parse the expensive tier's JSON response, defaulting any missing field.
/// When no JSON object parses at all, the raw text (truncated) becomes the
/// scope with the default price range and timeline.
pub fn parse_json_scope(text: &str, model: &str) -> ScopeResult {
    let parsed = extract_json_object(text)
        .and_then(|block| serde_json::from_str::<serde_json::Value>(block).ok());

    let Some(parsed) = parsed else {
        tracing::warn!("Detailed scope response was not parseable JSON, keeping raw text");
        return ScopeResult {
            scope: truncate_chars(text.trim(), RAW_SCOPE_MAX_CHARS),
            price_low: DETAILED_DEFAULT_PRICE.0,
            price_high: DETAILED_DEFAULT_PRICE.1,
            materials: Vec::new(),
            time: DETAILED_DEFAULT_TIME.to_string(),
            model: model.to_string(),
        };
    };

    let scope = parsed
        .get("scope")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| truncate_chars(text.trim(), RAW_SCOPE_MAX_CHARS));

    let price_low = parsed
        .get("price_low")
        .and_then(|v| v.as_f64())
        .map(|v| v.max(0.0) as u32)
        .unwrap_or(DETAILED_DEFAULT_PRICE.0);

    let price_high = parsed
        .get("price_high")
        .and_then(|v| v.as_f64())
        .map(|v| v.max(0.0) as u32)
        .unwrap_or(DETAILED_DEFAULT_PRICE.1);

    let materials = parsed
        .get("materials")
        .and_then(|v| v.as_array())
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    let time = parsed
        .get("time")
        .and_then(|v| v.as_str())
        .unwrap_or(DETAILED_DEFAULT_TIME)
        .to_string();

    ScopeResult {
        scope,
        price_low,
        price_high,
        materials,
        time,
        model: model.to_string(),
    }
    .normalize_prices()
}

fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let head = line.get(..label.len())?;
    if head.eq_ignore_ascii_case(label) {
        Some(line[label.len()..].trim())
    } else {
        None
    }
}

/// Pull `low-high` out of a price line, tolerating `$` signs, commas and
/// surrounding words. A single number becomes a degenerate `n-n` range.
fn parse_price_range(text: &str) -> Option<(u32, u32)> {
    let range = Regex::new(r"\$?\s*(\d[\d,]*)\s*(?:-|to)\s*\$?\s*(\d[\d,]*)").expect("valid pattern");
    if let Some(captures) = range.captures(text) {
        let low = parse_amount(&captures[1])?;
        let high = parse_amount(&captures[2])?;
        return Some((low, high));
    }

    let single = Regex::new(r"\$?\s*(\d[\d,]*)").expect("valid pattern");
    let captures = single.captures(text)?;
    let amount = parse_amount(&captures[1])?;
    Some((amount, amount))
}

fn parse_amount(digits: &str) -> Option<u32> {
    digits.replace(',', "").parse().ok()
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((boundary, _)) => text[..boundary].to_string(),
        None => text.to_string(),
    }
}

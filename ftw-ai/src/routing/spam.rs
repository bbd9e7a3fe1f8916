use regex::Regex;

/// Score added per matched spam signal.
const SIGNAL_WEIGHT: f32 = 0.2;

/// Letters examined before the uppercase-ratio signal can fire.
const SHOUTING_MIN_LETTERS: usize = 20;

/// Additive spam heuristic over a job description. Each signal (URL,
/// "free", "call now", a run of 4+ identical characters, mostly-uppercase
/// text) adds 0.2; the total caps at 1.0.
pub fn spam_score(description: &str) -> f32 {
    let url = Regex::new(r"(?i)https?://|www\.").expect("valid pattern");
    let free = Regex::new(r"(?i)\bfree\b").expect("valid pattern");
    let call_now = Regex::new(r"(?i)call\s+now").expect("valid pattern");

    let mut hits = 0u32;

    if url.is_match(description) {
        hits += 1;
    }
    if free.is_match(description) {
        hits += 1;
    }
    if call_now.is_match(description) {
        hits += 1;
    }
    if has_repeated_run(description, 4) {
        hits += 1;
    }
    if is_mostly_uppercase(description) {
        hits += 1;
    }

    (hits as f32 * SIGNAL_WEIGHT).min(1.0)
}

fn has_repeated_run(text: &str, run_len: usize) -> bool {
    let mut previous = None;
    let mut run = 0usize;

    for ch in text.chars() {
        if Some(ch) == previous {
            run += 1;
            if run >= run_len {
                return true;
            }
        } else {
            previous = Some(ch);
            run = 1;
        }
    }

    false
}

fn is_mostly_uppercase(text: &str) -> bool {
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() < SHOUTING_MIN_LETTERS {
        return false;
    }

    let upper = letters.iter().filter(|c| c.is_uppercase()).count();
    upper as f32 / letters.len() as f32 > 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_description_scores_zero() {
        assert_eq!(spam_score("Kitchen faucet has a slow drip under the sink"), 0.0);
    }

    #[test]
    fn test_each_signal_adds_fixed_increment() {
        assert_eq!(spam_score("see https://deals.example.com"), 0.2);
        assert_eq!(spam_score("totally free estimate"), 0.2);
        assert_eq!(spam_score("call now for savings"), 0.2);
        assert_eq!(spam_score("heeeeelp with my sink"), 0.2);
    }

    #[test]
    fn test_four_signals_sum_to_point_eight() {
        let description = "FREE estimate!!!! call now at www.spam.example";
        // URL + "free" + "call now" + repeated '!' run.
        assert!((spam_score(description) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_five_signals_cap_at_one() {
        let description =
            "FREE FREE FREE CALL NOW BEST DEALS EVER!!!! VISIT https://spam.example TODAY";
        assert_eq!(spam_score(description), 1.0);
    }

    #[test]
    fn test_uppercase_ratio_needs_enough_letters() {
        assert_eq!(spam_score("HELP ME NOW"), 0.0, "too few letters to count as shouting");
        assert_eq!(spam_score("MY WHOLE BASEMENT IS UNDERWATER RIGHT NOW"), 0.2);
    }

    #[test]
    fn test_word_boundary_on_free() {
        assert_eq!(spam_score("freezer stopped working"), 0.0);
    }
}

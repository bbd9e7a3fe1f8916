//! Prompt templates for the AI layer.
//!
//! Plain `format!()` interpolation keeps every variable checked at compile
//! time. Retrieval context is rendered to a text block and spliced in before
//! the instructions.

use crate::models::{Conversation, JobRequest, Lead, RagContext};

/// Prompt for classifying a posted job description into intent, complexity,
/// trades and spam signals, returned as a single JSON object.
pub fn classification_prompt(description: &str) -> String {
    format!(
        r#"Classify this home-services job request.

Job description:
{description}

Respond with valid JSON only, in this exact shape:
{{
  "intent": "quick_fix" | "standard" | "major_project" | "multi_trade" | "inspection" | "emergency",
  "complexity": 0-100,
  "trades": ["plumbing", ...],
  "requires_sonnet": true | false,
  "spam_score": 0.0-1.0,
  "reasoning": "one short sentence"
}}

Guidance:
- "emergency" for urgent safety or property-damage situations (leaks, gas, no heat).
- "multi_trade" when the work clearly spans multiple trades (remodels, additions).
- "requires_sonnet" when scoping needs the more capable model: emergencies, multi-trade, or high complexity.
- spam_score near 1.0 for promotional text, links, or gibberish."#
    )
}

/// Render retrieval context as a plain-text block for prompt augmentation.
/// Caps at 3 similar scopes, 5 material prices and 3 contractors.
pub fn context_block(context: &RagContext) -> String {
    if context.is_empty() && context.average_price.is_none() {
        return String::new();
    }

    let mut block = String::from("Relevant market context:\n");

    for doc in context.similar_scopes.iter().take(3) {
        let scope = doc
            .metadata
            .get("scope")
            .and_then(|v| v.as_str())
            .unwrap_or("(no scope text)");
        let price = doc.metadata.get("price").and_then(|v| v.as_f64());
        match price {
            Some(price) => block.push_str(&format!("- Similar job: {scope} (${price:.0})\n")),
            None => block.push_str(&format!("- Similar job: {scope}\n")),
        }
    }

    for doc in context.material_pricing.iter().take(5) {
        let name = doc
            .metadata
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or("material");
        if let Some(price) = doc.metadata.get("price").and_then(|v| v.as_f64()) {
            block.push_str(&format!("- Material: {name} (${price:.2})\n"));
        }
    }

    for doc in context.suggested_contractors.iter().take(3) {
        let name = doc
            .metadata
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or(doc.id.as_str());
        block.push_str(&format!("- Available contractor: {name}\n"));
    }

    if let Some(average) = context.average_price {
        block.push_str(&format!("- Average price for similar work: ${average}\n"));
    }
    if let Some(ref timeframe) = context.typical_timeframe {
        block.push_str(&format!("- Typical timeframe: {timeframe}\n"));
    }

    block
}

/// Cheap-tier scope prompt: compact, labeled-line output for reliable
/// line-oriented parsing.
pub fn quick_scope_prompt(job: &JobRequest, context: &RagContext) -> String {
    format!(
        r#"Write a brief scope of work for this home-services job.

Job: {title}
Description: {description}

{context}Respond in exactly this format, one item per line:
SCOPE: <2-3 sentence scope of work>
PRICE: <low>-<high>
MATERIALS: <comma-separated list>
TIME: <estimated duration>"#,
        title = job.title,
        description = job.description,
        context = context_block(context),
    )
}

/// Expensive-tier scope prompt: full job detail, JSON output.
pub fn detailed_scope_prompt(job: &JobRequest, context: &RagContext) -> String {
    format!(
        r#"You are an experienced general contractor preparing a detailed scope of work.

Job: {title}
Description: {description}
Trades involved: {trades}
Photos provided: {photos}

{context}Produce a thorough scope: tasks in order, permits or inspections if likely
needed, and a realistic price range for the region.

Respond with valid JSON only:
{{
  "scope": "detailed scope of work",
  "price_low": <number>,
  "price_high": <number>,
  "materials": ["item", ...],
  "time": "estimated duration"
}}"#,
        title = job.title,
        description = job.description,
        trades = if job.trades.is_empty() {
            "unknown".to_string()
        } else {
            job.trades.join(", ")
        },
        photos = job.photo_count,
        context = context_block(context),
    )
}

/// Lead-scoring prompt built from pipeline signals.
pub fn lead_scoring_prompt(lead: &Lead) -> String {
    format!(
        r#"Score this home-services lead for a {trade} contractor.

Signals:
- Days since last contact: {days}
- Estimated job value: {value}
- Messages exchanged: {messages}
- Last message was from the lead: {from_lead}

Respond with valid JSON only:
{{
  "score": 0-100,
  "likelihood": "hot" | "warm" | "cold",
  "reasoning": "one sentence",
  "suggested_action": "one concrete next step",
  "optimal_contact_time": "e.g. weekday mornings"
}}"#,
        trade = lead.trade,
        days = lead.days_since_contact,
        value = lead
            .job_value
            .map(|v| format!("${v:.0}"))
            .unwrap_or_else(|| "unknown".to_string()),
        messages = lead.message_count,
        from_lead = lead.last_message_from_lead,
    )
}

/// Conversation sentiment prompt over the most recent messages.
pub fn sentiment_prompt(conversation: &Conversation) -> String {
    let transcript: String = conversation
        .messages
        .iter()
        .rev()
        .take(20)
        .rev()
        .map(|message| {
            let speaker = if message.from_lead { "Lead" } else { "Contractor" };
            format!("{speaker}: {}\n", message.text)
        })
        .collect();

    format!(
        r#"Analyze the tone of this conversation between a home-services lead and a contractor.

Transcript:
{transcript}
Respond with valid JSON only:
{{
  "overall_sentiment": "positive" | "neutral" | "negative" | "frustrated",
  "trend": "improving" | "stable" | "declining",
  "warning_flags": ["short phrase", ...],
  "key_moments": ["short phrase", ...],
  "suggested_response": "only if sentiment is negative or frustrated, else null"
}}"#
    )
}

/// Follow-up drafting prompt. Delivery time and channel are computed
/// locally and intentionally left out of the prompt.
pub fn follow_up_prompt(lead: &Lead) -> String {
    format!(
        r#"Draft a short follow-up message from a {trade} contractor to a lead.

Context:
- Lead name: {name}
- Days since last contact: {days}
- Messages exchanged so far: {messages}

Keep it under 2 sentences, friendly, no pressure.

Respond with valid JSON only:
{{
  "message": "the follow-up text",
  "tone": "friendly" | "professional" | "urgent"
}}"#,
        trade = lead.trade,
        name = lead.name.as_deref().unwrap_or("there"),
        days = lead.days_since_contact,
        messages = lead.message_count,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConversationMessage, RetrievedDoc};
    use serde_json::json;

    #[test]
    fn test_classification_prompt_embeds_description() {
        let prompt = classification_prompt("Replace a leaking water heater");
        assert!(prompt.contains("Replace a leaking water heater"));
        assert!(prompt.contains("\"intent\""));
    }

    #[test]
    fn test_context_block_empty_context_renders_nothing() {
        assert_eq!(context_block(&RagContext::empty()), "");
    }

    #[test]
    fn test_context_block_caps_and_stats() {
        let doc = |name: &str| RetrievedDoc {
            id: name.to_string(),
            score: 0.9,
            metadata: json!({"name": name, "price": 25.0}),
        };
        let context = RagContext {
            similar_scopes: vec![],
            material_pricing: (0..8).map(|i| doc(&format!("pipe-{i}"))).collect(),
            suggested_contractors: vec![],
            average_price: Some(450),
            typical_timeframe: Some("1-3 days".to_string()),
        };

        let block = context_block(&context);
        assert_eq!(block.matches("- Material:").count(), 5);
        assert!(block.contains("$450"));
        assert!(block.contains("1-3 days"));
    }

    #[test]
    fn test_quick_scope_prompt_labeled_format() {
        let job = JobRequest {
            title: "Fix faucet".to_string(),
            description: "Dripping kitchen faucet".to_string(),
            ..Default::default()
        };
        let prompt = quick_scope_prompt(&job, &RagContext::empty());
        for label in ["SCOPE:", "PRICE:", "MATERIALS:", "TIME:"] {
            assert!(prompt.contains(label));
        }
    }

    #[test]
    fn test_sentiment_prompt_keeps_most_recent_messages() {
        let messages = (0..30)
            .map(|i| ConversationMessage {
                from_lead: i % 2 == 0,
                text: format!("message {i}"),
            })
            .collect();
        let conversation = Conversation {
            lead_id: "lead-1".to_string(),
            messages,
        };

        let prompt = sentiment_prompt(&conversation);
        assert!(!prompt.contains("message 9\n"), "oldest messages dropped");
        assert!(prompt.contains("message 29"));
        assert!(prompt.contains("message 10"));
    }
}

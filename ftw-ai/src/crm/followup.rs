use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use serde_json::Value;

use crate::error::Result;
use crate::llm::{prompts, ChatProvider};
use crate::models::{FollowUp, Lead};
use crate::outcome::Derived;

/// Drafts follow-up messages via the background chat provider. Delivery
/// time and channel are derived locally and never asked of the model.
#[derive(Clone)]
pub struct FollowUpGenerator {
    provider: ChatProvider,
    enabled: bool,
}

impl FollowUpGenerator {
    pub fn new(provider: ChatProvider, enabled: bool) -> Self {
        Self { provider, enabled }
    }

    pub async fn generate(&self, lead: &Lead) -> Result<Derived<FollowUp>> {
        self.generate_at(lead, Utc::now()).await
    }

    /// Like [`generate`](Self::generate) with an explicit clock, so the
    /// business-slot arithmetic is testable.
    pub async fn generate_at(&self, lead: &Lead, now: DateTime<Utc>) -> Result<Derived<FollowUp>> {
        let send_at = optimal_send_time(lead.days_since_contact, now);

        if !self.enabled {
            return Ok(Derived::fallback(
                template_follow_up(lead, send_at),
                "background disabled",
            ));
        }

        if !self.provider.is_available() {
            return Ok(Derived::fallback(
                template_follow_up(lead, send_at),
                "background provider unavailable",
            ));
        }

        let prompt = prompts::follow_up_prompt(lead);
        match self.provider.complete_json(&prompt, None).await {
            Ok(parsed) => Ok(Derived::Model(parse_follow_up(&parsed, lead, send_at))),
            Err(e) => {
                tracing::warn!(lead_id = %lead.id, error = %e, "Follow-up generation failed, using template");
                Ok(Derived::fallback(
                    template_follow_up(lead, send_at),
                    format!("follow-up call failed: {e}"),
                ))
            }
        }
    }
}

/// Delivery channel. A single channel is wired up today; the signature
/// leaves room for per-lead selection later.
pub fn determine_channel() -> &'static str {
    "sms"
}

/// Next business slot for a follow-up, keyed off how long the lead has been
/// quiet: fresh leads get the next business morning, cooling leads two
/// business days out in the afternoon, stale leads next Monday morning.
pub fn optimal_send_time(days_since_contact: i64, now: DateTime<Utc>) -> DateTime<Utc> {
    let today = now.date_naive();

    let (date, hour) = if days_since_contact <= 2 {
        (next_business_day(today), 10)
    } else if days_since_contact <= 7 {
        (add_business_days(today, 2), 14)
    } else {
        (next_monday(today), 9)
    };

    at_hour(date, hour)
}

fn next_business_day(date: NaiveDate) -> NaiveDate {
    roll_off_weekend(date + Duration::days(1))
}

fn add_business_days(date: NaiveDate, days: u32) -> NaiveDate {
    let mut date = date;
    for _ in 0..days {
        date = next_business_day(date);
    }
    date
}

fn next_monday(date: NaiveDate) -> NaiveDate {
    let ahead = 7 - date.weekday().num_days_from_monday() as i64;
    date + Duration::days(ahead)
}

fn roll_off_weekend(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date + Duration::days(2),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}

fn at_hour(date: NaiveDate, hour: u32) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(hour, 0, 0).expect("valid constant time");
    date.and_time(time).and_utc()
}

fn parse_follow_up(parsed: &Value, lead: &Lead, send_at: DateTime<Utc>) -> FollowUp {
    let message = parsed
        .get("message")
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| template_message(lead));

    let tone = parsed
        .get("tone")
        .and_then(|v| v.as_str())
        .unwrap_or("friendly")
        .to_string();

    FollowUp {
        message,
        channel: determine_channel().to_string(),
        send_at,
        tone,
    }
}

fn template_follow_up(lead: &Lead, send_at: DateTime<Utc>) -> FollowUp {
    FollowUp {
        message: template_message(lead),
        channel: determine_channel().to_string(),
        send_at,
        tone: "friendly".to_string(),
    }
}

fn template_message(lead: &Lead) -> String {
    format!(
        "Hi {}, just checking in on your {} project. Happy to answer any questions whenever you're ready.",
        lead.name.as_deref().unwrap_or("there"),
        lead.trade
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn wednesday_noon() -> DateTime<Utc> {
        // 2024-06-05 is a Wednesday.
        Utc.with_ymd_and_hms(2024, 6, 5, 12, 0, 0).unwrap()
    }

    fn friday_noon() -> DateTime<Utc> {
        // 2024-06-07 is a Friday.
        Utc.with_ymd_and_hms(2024, 6, 7, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_fresh_lead_next_business_morning() {
        let send_at = optimal_send_time(1, wednesday_noon());
        assert_eq!(send_at, Utc.with_ymd_and_hms(2024, 6, 6, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_fresh_lead_on_friday_rolls_to_monday() {
        let send_at = optimal_send_time(0, friday_noon());
        assert_eq!(send_at, Utc.with_ymd_and_hms(2024, 6, 10, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_cooling_lead_two_business_days_afternoon() {
        let send_at = optimal_send_time(5, wednesday_noon());
        assert_eq!(send_at, Utc.with_ymd_and_hms(2024, 6, 7, 14, 0, 0).unwrap());

        // Thursday + 2 business days = Monday.
        let thursday = Utc.with_ymd_and_hms(2024, 6, 6, 12, 0, 0).unwrap();
        let send_at = optimal_send_time(5, thursday);
        assert_eq!(send_at, Utc.with_ymd_and_hms(2024, 6, 10, 14, 0, 0).unwrap());
    }

    #[test]
    fn test_stale_lead_next_monday_morning() {
        let send_at = optimal_send_time(21, wednesday_noon());
        assert_eq!(send_at, Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap());

        // From a Monday, "next Monday" is a full week out.
        let monday = Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap();
        let send_at = optimal_send_time(21, monday);
        assert_eq!(send_at, Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_channel_is_sms() {
        assert_eq!(determine_channel(), "sms");
    }

    #[tokio::test]
    async fn test_disabled_background_uses_template() {
        let generator = FollowUpGenerator::new(ChatProvider::disabled("test"), false);
        let lead = Lead {
            name: Some("Dana".to_string()),
            trade: "roofing".to_string(),
            days_since_contact: 1,
            ..Default::default()
        };

        let outcome = generator.generate_at(&lead, wednesday_noon()).await.unwrap();
        assert!(outcome.is_fallback());
        let follow_up = outcome.value();
        assert!(follow_up.message.contains("Dana"));
        assert!(follow_up.message.contains("roofing"));
        assert_eq!(follow_up.channel, "sms");
        assert_eq!(
            follow_up.send_at,
            Utc.with_ymd_and_hms(2024, 6, 6, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_follow_up_defaults() {
        let lead = Lead {
            trade: "hvac".to_string(),
            ..Default::default()
        };
        let send_at = wednesday_noon();

        let follow_up = parse_follow_up(&serde_json::json!({}), &lead, send_at);
        assert!(follow_up.message.contains("hvac"), "empty message falls back to template");
        assert_eq!(follow_up.tone, "friendly");
    }
}

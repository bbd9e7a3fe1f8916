use crate::config::ScopingConfig;
use crate::error::{FtwError, Result};
use crate::llm::{prompts, ChatProvider};
use crate::models::{JobClassification, JobIntent, JobRequest, RagContext, ScopeResult};
use crate::rag::RagContextBuilder;
use crate::routing::JobClassifier;
use crate::scoping::api::MessagesApiClient;
use crate::scoping::parse::{parse_json_scope, parse_labeled_scope};

/// Cheap-tier model. The expensive tier comes from configuration.
pub const CHEAP_MODEL: &str = "claude-3-haiku-20240307";

/// A job only qualifies for the cheap tier below this description length.
const SIMPLE_MAX_DESC_LEN: usize = 200;

/// Photo count at or above which a job stops looking simple.
const SIMPLE_MAX_PHOTOS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeTier {
    Quick,
    Detailed,
}

/// Pick the generation tier from the classification and the raw job
/// attributes. The classifier can force the detailed tier; otherwise the
/// job itself must look simple on every axis to stay cheap.
pub fn select_tier(classification: &JobClassification, job: &JobRequest) -> ScopeTier {
    let classifier_demands_detail = classification.requires_sonnet
        || matches!(
            classification.intent,
            JobIntent::MultiTrade | JobIntent::MajorProject
        );

    let job_looks_simple = job.description.len() < SIMPLE_MAX_DESC_LEN
        && !job.multi_trade
        && !job.is_major_project
        && job.photo_count < SIMPLE_MAX_PHOTOS;

    if !classifier_demands_detail && job_looks_simple {
        ScopeTier::Quick
    } else {
        ScopeTier::Detailed
    }
}

/// Tiered scope generation: classify, gather context, then route to a cheap
/// or capable model. Unlike the rest of the layer this operation has a hard
/// failure mode: when neither the messages provider nor the chat fallback
/// is reachable it returns [`FtwError::AiUnavailable`].
#[derive(Clone)]
pub struct ScopeGenerator {
    classifier: JobClassifier,
    rag: RagContextBuilder,
    scoping: ScopingConfig,
    fallback_chat: ChatProvider,
}

impl ScopeGenerator {
    pub fn new(
        classifier: JobClassifier,
        rag: RagContextBuilder,
        scoping: &ScopingConfig,
        fallback_chat: ChatProvider,
    ) -> Self {
        Self {
            classifier,
            rag,
            scoping: scoping.clone(),
            fallback_chat,
        }
    }

    pub async fn job_scope(&self, job: &JobRequest) -> Result<ScopeResult> {
        let classification = self.classifier.classify(&job.description).await?.into_inner();
        let context = self.rag.job_context(&job.description).await;

        let tier = select_tier(&classification, job);
        tracing::debug!(?tier, intent = classification.intent.as_str(), "Scope tier selected");

        match tier {
            ScopeTier::Quick => self.quick_scope(job, &context).await,
            ScopeTier::Detailed => self.detailed_scope(job, &context).await,
        }
    }

    async fn quick_scope(&self, job: &JobRequest, context: &RagContext) -> Result<ScopeResult> {
        let prompt = prompts::quick_scope_prompt(job, context);
        let (text, model) = self.complete_with_fallback(CHEAP_MODEL, &prompt).await?;
        Ok(parse_labeled_scope(&text, &model))
    }

    async fn detailed_scope(&self, job: &JobRequest, context: &RagContext) -> Result<ScopeResult> {
        let prompt = prompts::detailed_scope_prompt(job, context);
        let (text, model) = self.complete_with_fallback(&self.scoping.model, &prompt).await?;
        Ok(parse_json_scope(&text, &model))
    }

    /// Try the messages provider first, then the chat provider in-process.
    /// Returns the response text together with the model that produced it.
    async fn complete_with_fallback(&self, model: &str, prompt: &str) -> Result<(String, String)> {
        match MessagesApiClient::new(&self.scoping) {
            Ok(client) => match client.complete(model, prompt).await {
                Ok(text) => return Ok((text, model.to_string())),
                Err(e) => {
                    tracing::warn!(error = %e, model = model, "Scoping provider failed, trying chat fallback");
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Scoping provider unconfigured, trying chat fallback");
            }
        }

        if self.fallback_chat.is_available() {
            let fallback_model = self
                .fallback_chat
                .model()
                .unwrap_or("gpt-4o-mini")
                .to_string();
            match self.fallback_chat.complete(prompt, None, None).await {
                Ok(text) => return Ok((text, fallback_model)),
                Err(e) => {
                    tracing::warn!(error = %e, "Chat fallback failed");
                }
            }
        }

        Err(FtwError::AiUnavailable)
    }
}

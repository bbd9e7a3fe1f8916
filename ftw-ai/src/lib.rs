//! AI routing and intelligence layer for the FTW home-services marketplace.
//!
//! Everything here is a stateless request/response transform over hosted
//! providers: classify a job, generate a scope of work at the right model
//! tier, assemble retrieval context, derive CRM signals, rank contractors.
//! The only state is a bounded TTL cache in front of classification and
//! embeddings. Degradation is uniform: disabled or failing providers fall
//! back to deterministic heuristics, surfaced through [`outcome::Derived`].

pub mod cache;
pub mod config;
pub mod crm;
pub mod embeddings;
pub mod error;
pub mod llm;
pub mod matching;
pub mod models;
pub mod outcome;
pub mod rag;
pub mod routing;
pub mod scoping;
pub mod vector;

use crate::config::Config;
use crate::crm::{FollowUpGenerator, LeadScorer, SentimentAnalyzer};
use crate::embeddings::EmbeddingProvider;
use crate::llm::ChatProvider;
use crate::matching::ContractorMatcher;
use crate::rag::RagContextBuilder;
use crate::routing::JobClassifier;
use crate::scoping::ScopeGenerator;

/// Assembled handle over the whole layer, wired from one [`Config`].
/// Components share the embedding provider (and through it the embedding
/// cache); everything else is cheap to clone.
#[derive(Clone)]
pub struct FtwAi {
    classifier: JobClassifier,
    scope_generator: ScopeGenerator,
    lead_scorer: LeadScorer,
    sentiment: SentimentAnalyzer,
    follow_up: FollowUpGenerator,
    matcher: ContractorMatcher,
}

impl FtwAi {
    pub fn new(config: &Config) -> Self {
        let routing_chat = ChatProvider::new(&config.routing);
        let background_chat = ChatProvider::new(&config.background);

        let embeddings =
            EmbeddingProvider::new(&config.embeddings, config.switches.embeddings, &config.cache);

        let classifier =
            JobClassifier::new(routing_chat, config.switches.routing, &config.cache);

        let rag = RagContextBuilder::new(
            embeddings.clone(),
            &config.vector,
            config.switches.rag,
        );

        let scope_generator = ScopeGenerator::new(
            classifier.clone(),
            rag,
            &config.scoping,
            background_chat.clone(),
        );

        let matcher = ContractorMatcher::new(
            embeddings,
            &config.vector,
            config.match_weights.clone(),
            config.switches.matching,
            config.switches.rag,
        );

        Self {
            classifier,
            scope_generator,
            lead_scorer: LeadScorer::new(background_chat.clone(), config.switches.background),
            sentiment: SentimentAnalyzer::new(background_chat.clone(), config.switches.background),
            follow_up: FollowUpGenerator::new(background_chat, config.switches.background),
            matcher,
        }
    }

    pub fn from_env() -> Self {
        Self::new(&Config::from_env())
    }

    pub fn classifier(&self) -> &JobClassifier {
        &self.classifier
    }

    pub fn scope_generator(&self) -> &ScopeGenerator {
        &self.scope_generator
    }

    pub fn lead_scorer(&self) -> &LeadScorer {
        &self.lead_scorer
    }

    pub fn sentiment(&self) -> &SentimentAnalyzer {
        &self.sentiment
    }

    pub fn follow_up(&self) -> &FollowUpGenerator {
        &self.follow_up
    }

    pub fn matcher(&self) -> &ContractorMatcher {
        &self.matcher
    }
}

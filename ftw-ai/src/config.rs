use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn env_or(var: &str, default: &str) -> String {
    env::var(var).unwrap_or_else(|_| default.to_string())
}

/// Feature switches default to enabled; only the literal string `"false"`
/// disables a subsystem.
fn switch_enabled(var: &str) -> bool {
    env::var(var).map(|val| val != "false").unwrap_or(true)
}

/// Full configuration for the AI layer, assembled once from `FTW_*`
/// environment variables and injected by value into each component.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub routing: ChatProviderConfig,
    pub background: ChatProviderConfig,
    pub embeddings: EmbeddingConfig,
    pub scoping: ScopingConfig,
    pub vector: VectorConfig,
    pub switches: Switches,
    pub cache: CacheConfig,
    pub match_weights: MatchWeights,
}

/// An OpenAI-style chat-completion provider endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatProviderConfig {
    pub provider: String,
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    pub provider: String,
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

/// Messages-style (Anthropic-compatible) scoping provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ScopingConfig {
    /// Expensive-tier model. The cheap tier is pinned to
    /// [`crate::scoping::CHEAP_MODEL`].
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VectorConfig {
    pub provider: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub index_scopes: String,
    pub index_materials: String,
    pub index_contractors: String,
    pub timeout_secs: u64,
}

impl VectorConfig {
    /// A vector provider is usable only with both an endpoint and a key.
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some() && self.api_key.is_some()
    }
}

/// Per-subsystem kill switches, each enabled unless explicitly `"false"`.
#[derive(Debug, Clone, Deserialize)]
pub struct Switches {
    pub routing: bool,
    pub embeddings: bool,
    pub rag: bool,
    pub background: bool,
    pub matching: bool,
}

impl Default for Switches {
    fn default() -> Self {
        Self {
            routing: true,
            embeddings: true,
            rag: true,
            background: true,
            matching: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub max_entries: usize,
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 500,
            ttl_secs: 3600,
        }
    }
}

/// Composite-score weights for contractor matching. The defaults are the
/// historical constants; treat them as tunable parameters, not ground truth.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchWeights {
    pub similarity: f64,
    pub reviews: f64,
    pub completion: f64,
    pub response: f64,
    pub specialty: f64,
    pub availability: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            similarity: 0.40,
            reviews: 0.20,
            completion: 0.15,
            response: 0.10,
            specialty: 0.10,
            availability: 0.05,
        }
    }
}

impl MatchWeights {
    /// Parse `FTW_MATCH_WEIGHTS`, comma-separated `name:weight` pairs, e.g.
    /// `similarity:0.5,reviews:0.2`. Unknown names warn and are skipped;
    /// unnamed weights keep their defaults.
    fn from_env() -> Self {
        let mut weights = Self::default();
        let Ok(raw) = env::var("FTW_MATCH_WEIGHTS") else {
            return weights;
        };

        for pair in raw.split(',').filter(|p| !p.trim().is_empty()) {
            let mut parts = pair.splitn(2, ':');
            let name = parts.next().unwrap_or("").trim();
            let value = parts.next().and_then(|v| v.trim().parse::<f64>().ok());

            match (name, value) {
                ("similarity", Some(v)) => weights.similarity = v,
                ("reviews", Some(v)) => weights.reviews = v,
                ("completion", Some(v)) => weights.completion = v,
                ("response", Some(v)) => weights.response = v,
                ("specialty", Some(v)) => weights.specialty = v,
                ("availability", Some(v)) => weights.availability = v,
                _ => {
                    tracing::warn!(
                        "Invalid weight pair '{}' in FTW_MATCH_WEIGHTS, skipping",
                        pair
                    );
                }
            }
        }

        weights
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            routing: ChatProviderConfig {
                provider: env_or("FTW_ROUTING_PROVIDER", "openai"),
                model: env_or("FTW_ROUTING_MODEL", "gpt-4o-mini"),
                base_url: env::var("FTW_ROUTING_URL").ok(),
                api_key: env::var("FTW_ROUTING_KEY").ok(),
                timeout_secs: parse_env_or("FTW_ROUTING_TIMEOUT", 30),
            },
            background: ChatProviderConfig {
                provider: env_or("FTW_BG_PROVIDER", "openai"),
                model: env_or("FTW_BG_MODEL", "gpt-4o-mini"),
                base_url: env::var("FTW_BG_URL").ok(),
                api_key: env::var("FTW_BG_KEY").ok(),
                timeout_secs: parse_env_or("FTW_BG_TIMEOUT", 30),
            },
            embeddings: EmbeddingConfig {
                provider: env_or("FTW_EMBED_PROVIDER", "openai"),
                model: env_or("FTW_EMBED_MODEL", "text-embedding-3-small"),
                base_url: env::var("FTW_EMBED_URL").ok(),
                api_key: env::var("FTW_EMBED_KEY").ok(),
                timeout_secs: parse_env_or("FTW_EMBED_TIMEOUT", 30),
            },
            scoping: ScopingConfig {
                model: env_or("FTW_SCOPING_MODEL", "claude-3-5-sonnet-20241022"),
                api_key: env::var("CLAUDE_API_KEY")
                    .or_else(|_| env::var("VITE_CLAUDE_API_KEY"))
                    .ok(),
                base_url: env_or("FTW_SCOPING_URL", "https://api.anthropic.com/v1"),
                max_tokens: parse_env_or("FTW_SCOPING_MAX_TOKENS", 1024),
                timeout_secs: parse_env_or("FTW_SCOPING_TIMEOUT", 60),
            },
            vector: VectorConfig {
                provider: env_or("FTW_VECTOR_PROVIDER", "pinecone"),
                api_key: env::var("FTW_VECTOR_KEY").ok(),
                base_url: env::var("FTW_VECTOR_URL").ok(),
                index_scopes: env_or("FTW_VECTOR_INDEX_SCOPES", "job-scopes"),
                index_materials: env_or("FTW_VECTOR_INDEX_MATERIALS", "material-prices"),
                index_contractors: env_or("FTW_VECTOR_INDEX_CONTRACTORS", "contractors"),
                timeout_secs: parse_env_or("FTW_VECTOR_TIMEOUT", 30),
            },
            switches: Switches {
                routing: switch_enabled("FTW_ENABLE_ROUTING"),
                embeddings: switch_enabled("FTW_ENABLE_EMBEDDINGS"),
                rag: switch_enabled("FTW_ENABLE_RAG"),
                background: switch_enabled("FTW_ENABLE_BACKGROUND"),
                matching: switch_enabled("FTW_ENABLE_MATCHING"),
            },
            cache: CacheConfig {
                max_entries: parse_env_or("FTW_CACHE_MAX_ENTRIES", 500),
                ttl_secs: parse_env_or("FTW_CACHE_TTL_SECS", 3600),
            },
            match_weights: MatchWeights::from_env(),
        }
    }
}

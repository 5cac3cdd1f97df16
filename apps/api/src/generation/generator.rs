//! Learning path generation: orchestrates the three collaborators for one request.
//!
//! Flow: resolve profile → search resources → build prompt → complete → parse.
//!
//! Calls are strictly sequential and made once each. Profile and resource failures
//! degrade to empty data; model and parse failures become a `Failure` response.
//! Nothing here returns `Err` to the gateway.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::generation::parser::{parse_completion, GenerationError};
use crate::generation::prompts::learning_path_prompt;
use crate::llm_client::CompletionModel;
use crate::models::path::{LearningPath, LearningPathResponse};
use crate::models::profile::UserProfile;
use crate::models::resource::ResourceRecord;
use crate::profiles::ProfileStore;
use crate::resources::ResourceIndex;

/// Fields matched by the resource search.
pub const SEARCH_FIELDS: [&str; 3] = ["content", "title", "description"];
/// Number of top-ranked resources embedded in the prompt.
pub const RESOURCE_LIMIT: usize = 5;

pub const DEFAULT_MAX_TOKENS: u32 = 2000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Model generation knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

pub struct PathGenerator {
    profiles: Arc<dyn ProfileStore>,
    resources: Arc<dyn ResourceIndex>,
    model: Arc<dyn CompletionModel>,
    settings: GenerationSettings,
}

impl PathGenerator {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        resources: Arc<dyn ResourceIndex>,
        model: Arc<dyn CompletionModel>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            profiles,
            resources,
            model,
            settings,
        }
    }

    /// Generates a learning path for `query`, personalised with `user_id`'s profile when given.
    pub async fn generate(&self, query: &str, user_id: Option<&str>) -> LearningPathResponse {
        let profile = match user_id {
            Some(user_id) => self.resolve_profile(user_id).await,
            None => UserProfile::empty(),
        };

        let resources = self.retrieve_resources(query).await;

        info!(
            "Generating learning path (user={}, profile_fields={}, resources={})",
            user_id.unwrap_or("-"),
            profile.attributes.len(),
            resources.len()
        );

        match self.complete_path(query, &profile, &resources).await {
            Ok(path) => {
                info!("Generated learning path with {} steps", path.steps().len());
                LearningPathResponse::Success(path)
            }
            Err(e) => {
                error!("Error generating learning path: {e}");
                LearningPathResponse::generation_failed(e.to_string())
            }
        }
    }

    async fn resolve_profile(&self, user_id: &str) -> UserProfile {
        match self.profiles.get(user_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => UserProfile::empty(),
            Err(e) => {
                warn!("Error getting user profile for {user_id}: {e}");
                UserProfile::empty()
            }
        }
    }

    async fn retrieve_resources(&self, query: &str) -> Vec<ResourceRecord> {
        match self
            .resources
            .search(query, &SEARCH_FIELDS, RESOURCE_LIMIT)
            .await
        {
            Ok(resources) => resources,
            Err(e) => {
                warn!("Error querying resource index: {e}");
                Vec::new()
            }
        }
    }

    async fn complete_path(
        &self,
        query: &str,
        profile: &UserProfile,
        resources: &[ResourceRecord],
    ) -> Result<LearningPath, GenerationError> {
        let prompt = build_path_prompt(query, profile, resources)?;
        let raw = self
            .model
            .complete(&prompt, self.settings.max_tokens, self.settings.temperature)
            .await?;
        parse_completion(&raw)
    }
}

/// Builds the generation prompt. Pure, so identical inputs give identical prompt text.
pub fn build_path_prompt(
    query: &str,
    profile: &UserProfile,
    resources: &[ResourceRecord],
) -> Result<String, GenerationError> {
    let profile_json = serde_json::to_string_pretty(profile).map_err(GenerationError::Prompt)?;
    let resources_json =
        serde_json::to_string_pretty(resources).map_err(GenerationError::Prompt)?;
    Ok(learning_path_prompt(query, &profile_json, &resources_json))
}

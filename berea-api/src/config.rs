use std::str::FromStr;

use serde::Deserialize;
use serde_with::serde_as;
use strum::{Display, EnumString};

use crate::domain::chat::{AssemblerConfig, RankWeights};

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub gemini: GeminiSettings,
    #[serde(default)]
    pub supabase: Option<SupabaseSettings>,
    #[serde(default)]
    pub context: ContextSettings,
}

#[serde_as]
#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub app_url: String,
}

#[derive(Deserialize, Clone)]
pub struct GeminiSettings {
    /// Falls back to the `GEMINI_API_KEY` environment variable when unset.
    #[serde(default)]
    pub api_key: Option<String>,
    pub primary_model: String,
    pub secondary_model: String,
    pub tertiary_model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GeminiSettings {
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var("GEMINI_API_KEY").ok().filter(|key| !key.is_empty()))
    }
}

#[derive(Deserialize, Clone)]
pub struct SupabaseSettings {
    pub url: String,
    pub anon_key: String,
    /// Session user whose personal notes are fetched into the snapshot.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Context-selection policy: rank weights and truncation budgets.
///
/// The exact constants are tunable, but the weight ordering
/// title > tags > reference > summary is part of the ranking contract.
#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct ContextSettings {
    pub max_sermons: usize,
    pub max_notes: usize,
    pub char_budget: usize,
    pub sermon_summary_chars: usize,
    pub note_content_chars: usize,
    pub title_weight: u32,
    pub tag_weight: u32,
    pub reference_weight: u32,
    pub summary_weight: u32,
    pub location_weight: u32,
    pub body_weight: u32,
    pub personal_note_bonus: u32,
    /// Path to the bundled sermon library JSON.
    pub sermon_bundle_path: Option<String>,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            max_sermons: 8,
            max_notes: 10,
            char_budget: 12_000,
            sermon_summary_chars: 220,
            note_content_chars: 180,
            title_weight: 4,
            tag_weight: 3,
            reference_weight: 2,
            summary_weight: 1,
            location_weight: 3,
            body_weight: 1,
            personal_note_bonus: 1,
            sermon_bundle_path: None,
        }
    }
}

impl ContextSettings {
    pub fn rank_weights(&self) -> RankWeights {
        RankWeights {
            title: self.title_weight,
            tags: self.tag_weight,
            reference: self.reference_weight,
            summary: self.summary_weight,
            location: self.location_weight,
            body: self.body_weight,
            personal_note_bonus: self.personal_note_bonus,
        }
    }

    pub fn assembler_config(&self) -> AssemblerConfig {
        AssemblerConfig {
            max_sermons: self.max_sermons,
            max_notes: self.max_notes,
            char_budget: self.char_budget,
            sermon_summary_chars: self.sermon_summary_chars,
            note_content_chars: self.note_content_chars,
        }
    }
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let config_directory = base_path.join("config");

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .expect("Failed to parse APP_ENVIRONMENT");
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(
            config_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("BEREA")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_keep_documented_ordering() {
        let context = ContextSettings::default();
        assert!(context.title_weight > context.tag_weight);
        assert!(context.tag_weight > context.reference_weight);
        assert!(context.reference_weight > context.summary_weight);
        assert!(context.location_weight > context.body_weight);
    }
}

use std::sync::Arc;

use gemini::{models::GenerationConfig, GeminiClient};
use tokio::sync::RwLock;

use crate::{
    adapters::outbound::LibraryLoader,
    config::Settings,
    domain::{
        chat::{ChatConfig, ChatService, ModelLadder},
        SourceError, StudyLibrary,
    },
};

#[derive(Clone)]
pub struct AppState {
    chat: Option<Arc<ChatService<GeminiClient>>>,
    loader: Arc<LibraryLoader>,
    // Snapshot replaced wholesale on refresh; readers always see a
    // consistent library.
    library: Arc<RwLock<Arc<StudyLibrary>>>,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        let chat = settings.gemini.resolved_api_key().map(|api_key| {
            let config = ChatConfig {
                ladder: ModelLadder {
                    primary: settings.gemini.primary_model.clone(),
                    secondary: settings.gemini.secondary_model.clone(),
                    tertiary: settings.gemini.tertiary_model.clone(),
                },
                weights: settings.context.rank_weights(),
                assembler: settings.context.assembler_config(),
                generation: GenerationConfig {
                    temperature: settings.gemini.temperature,
                    max_output_tokens: settings.gemini.max_output_tokens,
                },
            };
            Arc::new(ChatService::new(GeminiClient::new(api_key), config))
        });

        if chat.is_none() {
            tracing::warn!("No Gemini API key configured; chat requests will be rejected");
        }

        Self {
            chat,
            loader: Arc::new(LibraryLoader::from_settings(settings)),
            library: Arc::new(RwLock::new(Arc::new(StudyLibrary::default()))),
        }
    }

    pub fn chat_service(&self) -> Option<Arc<ChatService<GeminiClient>>> {
        self.chat.clone()
    }

    pub async fn library_snapshot(&self) -> Arc<StudyLibrary> {
        self.library.read().await.clone()
    }

    /// Re-fetch the document snapshot and swap it in with a full
    /// reassignment.
    pub async fn refresh_library(&self) -> Result<Arc<StudyLibrary>, SourceError> {
        let fresh = Arc::new(self.loader.load().await?);
        *self.library.write().await = fresh.clone();
        Ok(fresh)
    }
}

//! Server state shared by every handler.

use std::sync::Arc;

use crate::{
    config::ServerConfig,
    domain::{AdminGate, AiResponder, RoomRepository, SubscriptionRegistry},
    error::ServerError,
    infrastructure::{
        ai_responder::HttpAiResponder,
        repository::{InMemoryRoomRepository, InMemorySubscriptionRegistry},
    },
    usecase::RoomRelay,
};

/// Shared application state
pub struct AppState {
    /// Relay Engine (owns the Room Store and Subscription Registry handles)
    pub relay: Arc<RoomRelay>,
    /// AI Responder Adapter
    pub responder: Arc<dyn AiResponder>,
    /// Admin Gate
    pub gate: Arc<AdminGate>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        registry: Arc<dyn SubscriptionRegistry>,
        responder: Arc<dyn AiResponder>,
        gate: Arc<AdminGate>,
    ) -> Self {
        Self {
            relay: Arc::new(RoomRelay::new(repository, registry)),
            responder,
            gate,
        }
    }

    /// Build the production state: in-memory stores and the HTTP AI responder.
    pub fn from_config(config: &ServerConfig) -> Result<Self, ServerError> {
        let responder = HttpAiResponder::new(config.ai_endpoint.clone(), config.ai_timeout())?;
        tracing::info!(
            "AI responder: {} (timeout {}s, enabled: {})",
            responder.endpoint(),
            config.ai_timeout_secs,
            !config.ai_disabled
        );

        Ok(Self::new(
            Arc::new(InMemoryRoomRepository::new()),
            Arc::new(InMemorySubscriptionRegistry::new()),
            Arc::new(responder),
            Arc::new(AdminGate::new(!config.ai_disabled)),
        ))
    }

    pub fn repository(&self) -> &Arc<dyn RoomRepository> {
        self.relay.repository()
    }

    pub fn registry(&self) -> &Arc<dyn SubscriptionRegistry> {
        self.relay.registry()
    }
}

//! Gateway state
//!
//! Shared dependencies for the gateway server.

use crate::connection::ConnectionRegistry;
use crate::fanout::MessageGateway;
use groupchat_common::AppConfig;
use groupchat_core::{MembershipChecker, MessageStore};
use std::sync::Arc;

/// Gateway application state
///
/// The registry is constructed here and shared by every connection task
/// and publisher; tests build independent states to get independent
/// registries.
#[derive(Clone)]
pub struct GatewayState {
    /// Connection registry (owns subscription state)
    registry: Arc<ConnectionRegistry>,
    /// Fan-out entry point for the write path
    gateway: Arc<MessageGateway>,
    /// External message persistence
    store: Arc<dyn MessageStore>,
    /// External membership authorization
    membership: Arc<dyn MembershipChecker>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Create a new gateway state over the given collaborators
    pub fn new(
        store: Arc<dyn MessageStore>,
        membership: Arc<dyn MembershipChecker>,
        config: AppConfig,
    ) -> Self {
        let registry = ConnectionRegistry::new_shared();
        let gateway = Arc::new(MessageGateway::new(Arc::clone(&registry)));

        Self {
            registry,
            gateway,
            store,
            membership,
            config: Arc::new(config),
        }
    }

    /// Get the connection registry
    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Get the message gateway
    pub fn gateway(&self) -> &MessageGateway {
        &self.gateway
    }

    /// Get the message store
    pub fn store(&self) -> &dyn MessageStore {
        self.store.as_ref()
    }

    /// Get the membership checker
    pub fn membership(&self) -> &dyn MembershipChecker {
        self.membership.as_ref()
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("registry", &self.registry)
            .finish()
    }
}

//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context and configuration.

use std::sync::Arc;

use auth_common::{AppConfig, TokenService};
use auth_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the token service from the service context
    pub fn token_service(&self) -> &TokenService {
        self.service_context.token_service()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use auth_common::{
        AppConfig, AppSettings, CorsConfig, DatabaseConfig, Environment, HashingConfig,
        JwtConfig, ServerConfig,
    };
    use auth_db::InMemoryUserRepository;

    use super::AppState;
    use crate::server::create_app_state_with_repo;

    pub const TEST_SECRET: &str = "test-secret-key-that-is-long-enough";

    pub fn test_config() -> AppConfig {
        AppConfig {
            app: AppSettings {
                name: "auth-server-test".to_string(),
                env: Environment::Development,
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "postgres://unused".to_string(),
                max_connections: 1,
                min_connections: 1,
            },
            jwt: JwtConfig {
                secret: TEST_SECRET.to_string(),
                expires_in_secs: 3600,
            },
            hashing: HashingConfig {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
            cors: CorsConfig::default(),
        }
    }

    pub fn test_state() -> (AppState, Arc<InMemoryUserRepository>) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let state = create_app_state_with_repo(test_config(), repo.clone()).unwrap();
        (state, repo)
    }
}

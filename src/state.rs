use std::sync::Arc;

use eduke_cache::{CacheConfig, SharedStore, SnapshotCache, open_store};
use eduke_config::{ApiConfig, SessionConfig, SessionConfigError};
use eduke_core::{Authorizer, Permission, Role, StaticAuthorizer};
use eduke_client::{HttpApiClient, SchoolApi};
use eduke_models::{BranchId, SessionUser, UserId, role_of};
use tracing::{info, warn};

/// Everything a view controller needs, shared between views.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn SchoolApi>,
    pub authorizer: Arc<dyn Authorizer>,
    pub cache: SnapshotCache<SharedStore>,
    pub session: Option<SessionUser>,
}

impl AppState {
    pub fn new(
        api: Arc<dyn SchoolApi>,
        authorizer: Arc<dyn Authorizer>,
        cache: SnapshotCache<SharedStore>,
        session: Option<SessionUser>,
    ) -> Self {
        Self {
            api,
            authorizer,
            cache,
            session,
        }
    }

    pub fn role(&self) -> Option<Role> {
        role_of(self.session.as_ref())
    }

    /// Whether the current session holds `permission`.
    pub fn can(&self, permission: Permission) -> bool {
        self.authorizer.has_permission(self.role(), permission)
    }
}

/// Build the application state from environment variables.
///
/// A missing `EDUKE_SESSION_ROLE` yields an unauthenticated session; any
/// other malformed session variable is an error.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let api_config = ApiConfig::from_env();
    let cache_config = CacheConfig::from_env()?;

    let session = match SessionConfig::from_env() {
        Ok(config) => Some(session_user(config)),
        Err(SessionConfigError::MissingRole) => {
            warn!("No session role configured, running unauthenticated");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let store = open_store(&cache_config).await?;
    let cache = SnapshotCache::with_config(store, &cache_config);
    let api = HttpApiClient::new(api_config)?;

    info!(
        api.base_url = %api.config().base_url,
        session.role = ?role_of(session.as_ref()),
        "Application state initialized"
    );

    Ok(AppState::new(
        Arc::new(api),
        Arc::new(StaticAuthorizer::standard()),
        cache,
        session,
    ))
}

fn session_user(config: SessionConfig) -> SessionUser {
    SessionUser::new(
        UserId::new(config.user_id),
        config.role,
        config.branch_id.map(BranchId::new),
        config.full_name,
    )
}

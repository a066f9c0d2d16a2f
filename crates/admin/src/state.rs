//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::db::CrmDatabase;
use crate::routes::table::RouteTable;
use crate::services::{AffiliateLinkService, AuthError, Authenticator};

/// Application state shared across all handlers.
///
/// Cheap to clone; everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    authenticator: Authenticator,
    db: CrmDatabase,
    links: AffiliateLinkService,
    routes: RouteTable,
}

impl AppState {
    /// Build state from configuration with the demo data set.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the configured credentials cannot be loaded.
    pub fn new(config: AdminConfig) -> Result<Self, AuthError> {
        let authenticator = Authenticator::from_config(&config)?;
        Ok(Self::with_parts(config, authenticator, CrmDatabase::seeded()))
    }

    /// Build state from already constructed parts.
    #[must_use]
    pub fn with_parts(config: AdminConfig, authenticator: Authenticator, db: CrmDatabase) -> Self {
        let links = AffiliateLinkService::new(config.latency.affiliate_link);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                authenticator,
                db,
                links,
                routes: RouteTable::default(),
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn authenticator(&self) -> &Authenticator {
        &self.inner.authenticator
    }

    /// The CRM data set.
    #[must_use]
    pub fn db(&self) -> &CrmDatabase {
        &self.inner.db
    }

    #[must_use]
    pub fn links(&self) -> &AffiliateLinkService {
        &self.inner.links
    }

    /// The route table the guard middleware consults.
    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.inner.routes
    }
}

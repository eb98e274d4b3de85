//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use medcheck::domain::ports::InteractionOracle;
use medcheck::outbound::persistence::DbPool;

/// Builder-style configuration for [`super::create_server`].
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) oracle: Option<Arc<dyn InteractionOracle>>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            oracle: None,
        }
    }

    /// Attach a database pool; without one every port uses its fixture.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach the external interaction oracle.
    #[must_use]
    pub fn with_oracle(mut self, oracle: Arc<dyn InteractionOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }
}

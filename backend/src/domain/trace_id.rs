//! Correlation identifier for one inbound request.
//!
//! The identifier is stored in a Tokio task-local so that [`crate::domain::Error`]
//! constructors pick it up without every port passing it along. Task-locals
//! do not follow `tokio::spawn`; wrap spawned work in [`TraceId::scope`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use uuid::Uuid;

tokio::task_local! {
    static CURRENT: TraceId;
}

/// Header used to accept and return the identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// UUID naming one request in logs, error payloads and the `trace-id` header.
///
/// ```
/// use medcheck::TraceId;
///
/// let id = TraceId::from_header_value(" 00000000-0000-0000-0000-000000000000 ");
/// assert!(id.is_some());
/// assert!(TraceId::from_header_value("check-42").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random (v4) identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a caller-supplied header value; surrounding whitespace is ignored.
    #[must_use]
    pub fn from_header_value(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }

    /// Identifier of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Await `fut` with `self` as the current identifier.
    ///
    /// ```
    /// use medcheck::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let id = TraceId::generate();
    /// assert_eq!(id.scope(async { TraceId::current() }).await, Some(id));
    /// # });
    /// ```
    pub async fn scope<Fut: Future>(self, fut: Fut) -> Fut::Output {
        CURRENT.scope(self, fut).await
    }

    /// Run a synchronous closure with `self` as the current identifier.
    ///
    /// Actix builds handler futures inside `Service::call`, so the
    /// identifier must already be set while that call runs.
    pub fn sync_scope<R>(self, f: impl FnOnce() -> R) -> R {
        CURRENT.sync_scope(self, f)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

//! Domain primitives, session state, and driven ports.
//!
//! Purpose: define the records exchanged with the backend, the session and
//! locale state the client keeps on the device, and the ports that outbound
//! adapters implement. Nothing here performs I/O directly; storage and HTTP
//! arrive through the traits in [`ports`].
//!
//! Public surface:
//! - `SessionStore`: persisted token and identity of the signed-in user.
//! - `Localizer` and `ErrorTranslator`: active-locale message lookup and
//!   backend error phrase translation.
//! - `RouteGuard`: session-based navigation gate.
//! - `ApiError`: failure type of every resource client.

pub mod auth;
pub mod compliment;
pub mod error;
pub mod error_translator;
pub mod ids;
pub mod localization;
pub mod navigation;
pub mod ports;
pub mod session;
pub mod task;
pub mod user;

pub use self::auth::{AuthResponse, LoginCredentials, Registration};
pub use self::compliment::{
    Compliment, ComplimentValidationError, ComplimentWithSender, MarkViewed, NewCompliment,
};
pub use self::error::{ApiError, ApiResult};
pub use self::error_translator::{DEFAULT_PHRASES, ErrorTranslator};
pub use self::ids::{ComplimentId, TaskId, TenantId, UserId};
pub use self::localization::{Locale, Localizer, MessageCatalog};
pub use self::navigation::{
    Access, NavigationDecision, ROUTES, RouteDefinition, RouteGuard, RouteMatch, RouteName,
    RouteTable,
};
pub use self::session::{BearerToken, Identity, Session, SessionStore};
pub use self::task::{CompleteTask, FrequencyUnit, NewTask, Recurrence, Task, TaskWithCompleter};
pub use self::user::{NewUser, User};

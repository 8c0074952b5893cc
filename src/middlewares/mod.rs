pub mod session;

pub use session::{ResolveSession, SessionPrincipal, resolve_session};

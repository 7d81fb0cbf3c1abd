pub mod middleware;
pub mod pw;
pub mod service;
pub mod session;

pub use middleware::{require_auth, AuthUser};
pub use pw::{hash_password, verify_password};
pub use service::{login, signup};
pub use session::{signing_key, SESSION_COOKIE};

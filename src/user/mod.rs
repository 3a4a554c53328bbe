//! User entity and its account-security lifecycles.
//!
//! The `User` struct carries the account state; the lockout, email,
//! password and role state machines live in sibling modules as separate
//! `impl` blocks over the same entity.

mod display;
mod email;
mod lockout;
mod model;
mod password;
mod roles;

pub use display::{gravatar_url, obfuscate_email};
pub use lockout::{FAILED_LOGIN_LIMIT, LOCKOUT_MINUTES};
pub use model::{User, UserView};
pub use roles::{effective_roles, RoleQuery};

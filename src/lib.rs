//! userkit - pluggable user-account core.
//!
//! Registration, email confirmation, password recovery, login lockout and
//! role-based authorization, implemented as a thin data-and-rules layer.
//! Persistence, mail delivery and request routing belong to the host
//! application; this crate only exposes the entities, their lifecycle
//! operations and the validation schemas.

pub mod config;
pub mod error;
pub mod logging;
pub mod password;
pub mod principal;
pub mod role;
pub mod schema;
pub mod storage;
pub mod token;
pub mod user;

pub use config::{EmailSubjects, UserConfig, DEFAULT_LINK_EXPIRES_HOURS};
pub use error::{Result, UserKitError};
pub use password::{hash_password, validate_password, verify_password, PasswordError};
pub use principal::RoleNeed;
pub use role::{Role, DEFAULT_ROLE_HANDLE};
pub use schema::{Filter, RegisterSchema, RoleSchema, Rule, SchemaResult, UpdateSchema};
pub use storage::{ConflictSource, NoConflicts};
pub use token::{generate_link_token, generate_token, LINK_TOKEN_LENGTH};
pub use user::{
    effective_roles, gravatar_url, obfuscate_email, RoleQuery, User, UserView,
    FAILED_LOGIN_LIMIT, LOCKOUT_MINUTES,
};

//! Declarative validation schemas for roles and accounts.
//!
//! A schema runs each named property through ordered filters (trim,
//! lowercase) and then ordered validators (required-ness, length bounds,
//! email format, uniqueness against storage). Processing returns a
//! structured result with per-property messages instead of raising.
//!
//! Filters are applied to the entity's fields even when validation fails:
//! processing an invalid role still normalizes its handle, title and
//! description in place. That side effect is deliberate and relied upon
//! by callers.

use std::collections::BTreeMap;

use crate::role::Role;
use crate::storage::ConflictSource;
use crate::user::User;

/// A value filter applied before validation.
#[derive(Debug, Clone, Copy)]
pub enum Filter {
    /// Trim surrounding whitespace.
    Trim,
    /// Lowercase the value.
    Lowercase,
}

impl Filter {
    /// Apply the filter to a value.
    pub fn apply(&self, value: &str) -> String {
        match self {
            Filter::Trim => value.trim().to_string(),
            Filter::Lowercase => value.to_lowercase(),
        }
    }
}

/// A validation rule applied after filtering.
///
/// Every rule except [`Rule::Required`] skips missing or empty values;
/// presence is the required rule's concern alone.
pub enum Rule<'a> {
    /// The value must be present and non-empty.
    Required {
        /// Message reported when the value is missing.
        message: &'static str,
    },
    /// Character-count bounds.
    Length {
        /// Minimum length, inclusive.
        min: Option<usize>,
        /// Maximum length, inclusive.
        max: Option<usize>,
    },
    /// Basic email format check.
    Email,
    /// The email must not belong to another stored user.
    UniqueEmail(&'a dyn ConflictSource),
    /// The handle must not belong to another stored role.
    UniqueRoleHandle(&'a dyn ConflictSource),
}

impl Rule<'_> {
    /// Check a filtered value, returning an error message on violation.
    ///
    /// `owner` is the entity's own persisted id, excluded from
    /// uniqueness queries.
    fn check(&self, value: Option<&str>, owner: Option<i64>) -> Option<String> {
        let present = value.filter(|v| !v.is_empty());
        match self {
            Rule::Required { message } => match present {
                Some(_) => None,
                None => Some((*message).to_string()),
            },
            Rule::Length { min, max } => {
                let value = present?;
                let len = value.chars().count();
                if let Some(min) = min {
                    if len < *min {
                        return Some(format!("must be at least {min} characters"));
                    }
                }
                if let Some(max) = max {
                    if len > *max {
                        return Some(format!("must be at most {max} characters"));
                    }
                }
                None
            }
            Rule::Email => {
                let value = present?;
                if is_valid_email(value) {
                    None
                } else {
                    Some("invalid email format".to_string())
                }
            }
            Rule::UniqueEmail(source) => {
                let value = present?;
                if source.email_taken(value, owner) {
                    Some("email is already in use".to_string())
                } else {
                    None
                }
            }
            Rule::UniqueRoleHandle(source) => {
                let value = present?;
                if source.role_handle_taken(value, owner) {
                    Some("handle is already in use".to_string())
                } else {
                    None
                }
            }
        }
    }
}

/// Basic email format check.
///
/// Intentionally simple: one `@`, non-empty local part, dotted domain
/// with no empty labels, no whitespace. Full RFC validation is not the
/// goal.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(|c| c.is_whitespace()) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    if !domain.contains('.') {
        return false;
    }

    domain.split('.').all(|part| !part.is_empty())
}

/// A named property pipeline: ordered filters, then ordered rules.
pub struct Property<'a> {
    name: &'static str,
    filters: Vec<Filter>,
    rules: Vec<Rule<'a>>,
}

impl<'a> Property<'a> {
    /// Create a property pipeline with no filters or rules.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            filters: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Append a filter.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Append a rule.
    pub fn rule(mut self, rule: Rule<'a>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Property name, used as the error key.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the filters over a value.
    fn apply_filters(&self, value: Option<String>) -> Option<String> {
        value.map(|v| self.filters.iter().fold(v, |acc, f| f.apply(&acc)))
    }

    /// Run every rule, collecting all violation messages.
    fn check(&self, value: Option<&str>, owner: Option<i64>) -> Vec<String> {
        self.rules
            .iter()
            .filter_map(|rule| rule.check(value, owner))
            .collect()
    }
}

/// Outcome of processing an entity through a schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaResult {
    errors: BTreeMap<&'static str, Vec<String>>,
}

impl SchemaResult {
    /// Whether validation passed.
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// All per-property error messages.
    pub fn errors(&self) -> &BTreeMap<&'static str, Vec<String>> {
        &self.errors
    }

    /// Error messages for one property.
    pub fn errors_for(&self, property: &str) -> &[String] {
        self.errors.get(property).map(Vec::as_slice).unwrap_or(&[])
    }

    fn record(&mut self, name: &'static str, messages: Vec<String>) {
        if !messages.is_empty() {
            self.errors.entry(name).or_default().extend(messages);
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Validation schema for [`Role`].
///
/// Handle: trimmed, lowercased, 3-200 characters, unique, required.
/// Title and description: trimmed, at most 256 characters.
pub struct RoleSchema<'a> {
    handle: Property<'a>,
    title: Property<'a>,
    description: Property<'a>,
}

impl<'a> RoleSchema<'a> {
    /// Build the role schema against the given conflict source.
    pub fn new(conflicts: &'a dyn ConflictSource) -> Self {
        Self {
            handle: Property::new("handle")
                .filter(Filter::Trim)
                .filter(Filter::Lowercase)
                .rule(Rule::Length {
                    min: Some(3),
                    max: Some(200),
                })
                .rule(Rule::UniqueRoleHandle(conflicts))
                .rule(Rule::Required {
                    message: "Role requires a handle",
                }),
            title: Property::new("title").filter(Filter::Trim).rule(Rule::Length {
                min: None,
                max: Some(256),
            }),
            description: Property::new("description")
                .filter(Filter::Trim)
                .rule(Rule::Length {
                    min: None,
                    max: Some(256),
                }),
        }
    }

    /// Process a role: normalize its fields in place, then validate.
    ///
    /// Normalization happens regardless of the validation outcome.
    pub fn process(&self, role: &mut Role) -> SchemaResult {
        let mut result = SchemaResult::default();

        let handle = self.handle.apply_filters(role.handle().map(String::from));
        role.set_handle(handle);
        result.record(self.handle.name(), self.handle.check(role.handle(), role.id));

        let title = self.title.apply_filters(role.title.take());
        result.record(self.title.name(), self.title.check(title.as_deref(), role.id));
        role.title = title;

        let description = self.description.apply_filters(role.description.take());
        result.record(
            self.description.name(),
            self.description.check(description.as_deref(), role.id),
        );
        role.description = description;

        result
    }
}

/// Validation schema for registering a new user account.
///
/// Email: trimmed, lowercased, 3-200 characters, valid format, unique,
/// required.
pub struct RegisterSchema<'a> {
    email: Property<'a>,
}

impl<'a> RegisterSchema<'a> {
    /// Build the registration schema against the given conflict source.
    pub fn new(conflicts: &'a dyn ConflictSource) -> Self {
        Self {
            email: email_property("email", Some(conflicts)).rule(Rule::Required {
                message: "User needs an email address",
            }),
        }
    }

    /// Process a user: normalize the live email in place, then validate.
    pub fn process(&self, user: &mut User) -> SchemaResult {
        let mut result = SchemaResult::default();

        let email = self.email.apply_filters(non_empty(user.email()));
        user.store_email(email.clone().unwrap_or_default());
        result.record(self.email.name(), self.email.check(email.as_deref(), user.id));

        result
    }
}

/// Validation schema for updating an existing user account.
///
/// Extends [`RegisterSchema`] with rules for the staged `email_new`
/// value (same filters and format bounds, but neither unique nor
/// required: staging is optional and the conflict check happens when the
/// change is confirmed and persisted).
pub struct UpdateSchema<'a> {
    register: RegisterSchema<'a>,
    email_new: Property<'a>,
}

impl<'a> UpdateSchema<'a> {
    /// Build the update schema against the given conflict source.
    pub fn new(conflicts: &'a dyn ConflictSource) -> Self {
        Self {
            register: RegisterSchema::new(conflicts),
            email_new: email_property("email_new", None),
        }
    }

    /// Process a user: normalize live and staged emails, then validate.
    pub fn process(&self, user: &mut User) -> SchemaResult {
        let mut result = self.register.process(user);

        let staged = self
            .email_new
            .apply_filters(user.email_new().map(String::from));
        result.record(
            self.email_new.name(),
            self.email_new.check(staged.as_deref(), user.id),
        );
        user.store_email_new(staged);

        result
    }
}

/// Shared email property pipeline: trim, lowercase, length 3-200, format,
/// optionally unique.
fn email_property<'a>(
    name: &'static str,
    unique_against: Option<&'a dyn ConflictSource>,
) -> Property<'a> {
    let mut property = Property::new(name)
        .filter(Filter::Trim)
        .filter(Filter::Lowercase)
        .rule(Rule::Length {
            min: Some(3),
            max: Some(200),
        })
        .rule(Rule::Email);

    if let Some(conflicts) = unique_against {
        property = property.rule(Rule::UniqueEmail(conflicts));
    }

    property
}

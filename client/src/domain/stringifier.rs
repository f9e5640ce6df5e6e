//! Conversion between caller identifier types and their wire strings.
//!
//! The service only understands strings. A [`UniqueStringifier`] is supplied
//! per identifier category when the client is built, and the client uses it
//! to render path segments and to parse identifiers returned in responses.
//! Callers must keep the mapping bijective for every value they round-trip;
//! the client does not check it.

use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;

use super::ports::define_port_error;

define_port_error! {
    /// Errors raised when a wire string does not name a valid identifier.
    pub enum StringifierError {
        /// The string has no corresponding identifier value.
        Unrecognised { value: String, message: String } =>
            "failed to convert '{value}' to an identifier: {message}",
    }
}

/// Bidirectional mapping between an identifier type and its wire string.
pub trait UniqueStringifier<T>: Send + Sync {
    /// Render `value` as its canonical string.
    fn to_unique_string(&self, value: &T) -> String;

    /// Parse a canonical string back into an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StringifierError::Unrecognised`] when `raw` does not
    /// correspond to any value of `T`.
    fn from_unique_string(&self, raw: &str) -> Result<T, StringifierError>;
}

/// Identity stringifier for identifiers that are already strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringUniqueStringifier;

impl UniqueStringifier<String> for StringUniqueStringifier {
    fn to_unique_string(&self, value: &String) -> String {
        value.clone()
    }

    fn from_unique_string(&self, raw: &str) -> Result<String, StringifierError> {
        Ok(raw.to_owned())
    }
}

/// Stringifier backed by a type's [`Display`] and [`FromStr`] impls.
///
/// # Examples
///
/// ```
/// use access_manager_client::domain::{DisplayFromStrStringifier, UniqueStringifier};
///
/// let stringifier = DisplayFromStrStringifier::<u32>::new();
/// assert_eq!(stringifier.to_unique_string(&42), "42");
/// assert_eq!(stringifier.from_unique_string("7").ok(), Some(7));
/// assert!(stringifier.from_unique_string("seven").is_err());
/// ```
pub struct DisplayFromStrStringifier<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> DisplayFromStrStringifier<T> {
    /// Create the stringifier.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for DisplayFromStrStringifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for DisplayFromStrStringifier<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DisplayFromStrStringifier<T> {}

impl<T> fmt::Debug for DisplayFromStrStringifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayFromStrStringifier").finish()
    }
}

impl<T> UniqueStringifier<T> for DisplayFromStrStringifier<T>
where
    T: Display + FromStr,
    T::Err: Display,
{
    fn to_unique_string(&self, value: &T) -> String {
        value.to_string()
    }

    fn from_unique_string(&self, raw: &str) -> Result<T, StringifierError> {
        raw.parse::<T>()
            .map_err(|error| StringifierError::unrecognised(raw, error.to_string()))
    }
}

/// The four stringifiers a typed client needs, one per identifier category.
pub struct ElementStringifiers<TUser, TGroup, TComponent, TAccess> {
    /// Converts users.
    pub user: Arc<dyn UniqueStringifier<TUser>>,
    /// Converts groups.
    pub group: Arc<dyn UniqueStringifier<TGroup>>,
    /// Converts application components.
    pub application_component: Arc<dyn UniqueStringifier<TComponent>>,
    /// Converts access levels.
    pub access_level: Arc<dyn UniqueStringifier<TAccess>>,
}

impl<TUser, TGroup, TComponent, TAccess> ElementStringifiers<TUser, TGroup, TComponent, TAccess> {
    /// Bundle the four stringifiers.
    pub fn new(
        user: impl UniqueStringifier<TUser> + 'static,
        group: impl UniqueStringifier<TGroup> + 'static,
        application_component: impl UniqueStringifier<TComponent> + 'static,
        access_level: impl UniqueStringifier<TAccess> + 'static,
    ) -> Self {
        Self {
            user: Arc::new(user),
            group: Arc::new(group),
            application_component: Arc::new(application_component),
            access_level: Arc::new(access_level),
        }
    }
}

impl ElementStringifiers<String, String, String, String> {
    /// Identity stringifiers for all four categories.
    #[must_use]
    pub fn strings() -> Self {
        Self::new(
            StringUniqueStringifier,
            StringUniqueStringifier,
            StringUniqueStringifier,
            StringUniqueStringifier,
        )
    }
}

impl<TUser, TGroup, TComponent, TAccess> Clone
    for ElementStringifiers<TUser, TGroup, TComponent, TAccess>
{
    fn clone(&self) -> Self {
        Self {
            user: Arc::clone(&self.user),
            group: Arc::clone(&self.group),
            application_component: Arc::clone(&self.application_component),
            access_level: Arc::clone(&self.access_level),
        }
    }
}

impl<TUser, TGroup, TComponent, TAccess> fmt::Debug
    for ElementStringifiers<TUser, TGroup, TComponent, TAccess>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementStringifiers").finish_non_exhaustive()
    }
}

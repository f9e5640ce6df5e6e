//! Value objects returned by mapping queries.

use std::fmt;

/// An application component paired with a level of access to it.
///
/// Equality and hashing are structural so results can be collected into a
/// set when de-duplication is part of the query contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApplicationComponentAndAccessLevel<TComponent, TAccess> {
    /// The application component.
    pub application_component: TComponent,
    /// The level of access to the component.
    pub access_level: TAccess,
}

impl<TComponent, TAccess> ApplicationComponentAndAccessLevel<TComponent, TAccess> {
    /// Pair a component with an access level.
    pub const fn new(application_component: TComponent, access_level: TAccess) -> Self {
        Self {
            application_component,
            access_level,
        }
    }
}

/// An entity together with the type it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityTypeAndEntity {
    /// The entity type, e.g. `ClientAccount`.
    pub entity_type: String,
    /// The entity within that type, e.g. `Company1`.
    pub entity: String,
}

impl EntityTypeAndEntity {
    /// Pair an entity type with an entity.
    pub fn new(entity_type: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity: entity.into(),
        }
    }
}

impl fmt::Display for EntityTypeAndEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.entity_type, self.entity)
    }
}

/// A name and value pair, used for the attributes of a structured error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameValuePair {
    /// Attribute name.
    pub name: String,
    /// Attribute value.
    pub value: String,
}

impl NameValuePair {
    /// Build a pair.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The element kinds the service reports as individually missing.
///
/// Each kind maps to the error code the service emits and to the attribute
/// carrying the missing identifier. Extend this table whenever the service
/// adds a new `<Kind>NotFoundException`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A user.
    User,
    /// A group.
    Group,
    /// An entity type.
    EntityType,
    /// An entity.
    Entity,
}

impl ElementKind {
    /// All kinds, in classification precedence order.
    pub const ALL: [Self; 4] = [Self::User, Self::Group, Self::EntityType, Self::Entity];

    /// Kind name as used in error codes and attributes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Group => "Group",
            Self::EntityType => "EntityType",
            Self::Entity => "Entity",
        }
    }

    /// Error code the service returns when an element of this kind is
    /// missing.
    #[must_use]
    pub const fn not_found_code(self) -> &'static str {
        match self {
            Self::User => "UserNotFoundException",
            Self::Group => "GroupNotFoundException",
            Self::EntityType => "EntityTypeNotFoundException",
            Self::Entity => "EntityNotFoundException",
        }
    }

    /// Attribute holding the missing element's identifier.
    #[must_use]
    pub const fn resource_id_attribute(self) -> &'static str {
        self.as_str()
    }

    /// Find the kind whose not-found code is exactly `code`.
    ///
    /// # Examples
    ///
    /// ```
    /// use access_manager_client::domain::ElementKind;
    ///
    /// assert_eq!(
    ///     ElementKind::from_not_found_code("GroupNotFoundException"),
    ///     Some(ElementKind::Group)
    /// );
    /// assert_eq!(ElementKind::from_not_found_code("NotFoundException"), None);
    /// ```
    #[must_use]
    pub fn from_not_found_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.not_found_code() == code)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;

    use super::*;

    #[test]
    fn component_pairs_deduplicate_structurally() {
        let set: HashSet<_> = [
            ApplicationComponentAndAccessLevel::new("Order", "View"),
            ApplicationComponentAndAccessLevel::new("Order", "View"),
            ApplicationComponentAndAccessLevel::new("Order", "Modify"),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn entity_pairs_deduplicate_structurally() {
        let set: HashSet<_> = [
            EntityTypeAndEntity::new("ClientAccount", "Company1"),
            EntityTypeAndEntity::new("ClientAccount", "Company1"),
            EntityTypeAndEntity::new("ProductLines", "Company1"),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[rstest]
    #[case("UserNotFoundException", Some(ElementKind::User))]
    #[case("GroupNotFoundException", Some(ElementKind::Group))]
    #[case("EntityTypeNotFoundException", Some(ElementKind::EntityType))]
    #[case("EntityNotFoundException", Some(ElementKind::Entity))]
    #[case("NotFoundException", None)]
    #[case("userNotFoundException", None)]
    #[case("ArgumentException", None)]
    fn codes_map_to_element_kinds(#[case] code: &str, #[case] expected: Option<ElementKind>) {
        assert_eq!(ElementKind::from_not_found_code(code), expected);
    }

    #[rstest]
    #[case(ElementKind::User, "User")]
    #[case(ElementKind::Group, "Group")]
    #[case(ElementKind::EntityType, "EntityType")]
    #[case(ElementKind::Entity, "Entity")]
    fn kinds_name_their_resource_attribute(#[case] kind: ElementKind, #[case] attribute: &str) {
        assert_eq!(kind.resource_id_attribute(), attribute);
        assert_eq!(kind.to_string(), attribute);
    }
}

//! Operation traits implemented by both AccessManager facades.
//!
//! [`AccessManagerEventProcessor`] covers every mutation and
//! [`AccessManagerQueryProcessor`] every read. Application code can depend on
//! these traits and receive either facade, or a test double.
//!
//! Mapping queries with `include_indirect_mappings` set to `true` also return
//! relationships inherited through the group hierarchy.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::{AccessManagerResult, ApplicationComponentAndAccessLevel, EntityTypeAndEntity};

/// Mutations of the permission graph.
///
/// Every operation is one POST (add) or DELETE (remove) round trip. Adds
/// succeed only on `201 Created` and removes only on `200 OK`.
#[async_trait]
pub trait AccessManagerEventProcessor<TUser, TGroup, TComponent, TAccess>: Send + Sync {
    /// Add a user.
    async fn add_user(&self, user: &TUser) -> AccessManagerResult<()>;

    /// Remove a user and every mapping that references it.
    async fn remove_user(&self, user: &TUser) -> AccessManagerResult<()>;

    /// Add a group.
    async fn add_group(&self, group: &TGroup) -> AccessManagerResult<()>;

    /// Remove a group and every mapping that references it.
    async fn remove_group(&self, group: &TGroup) -> AccessManagerResult<()>;

    /// Make `user` a member of `group`.
    async fn add_user_to_group_mapping(&self, user: &TUser, group: &TGroup) -> AccessManagerResult<()>;

    /// Remove `user` from `group`.
    async fn remove_user_to_group_mapping(
        &self,
        user: &TUser,
        group: &TGroup,
    ) -> AccessManagerResult<()>;

    /// Make `from_group` a member of `to_group`.
    async fn add_group_to_group_mapping(
        &self,
        from_group: &TGroup,
        to_group: &TGroup,
    ) -> AccessManagerResult<()>;

    /// Remove `from_group` from `to_group`.
    async fn remove_group_to_group_mapping(
        &self,
        from_group: &TGroup,
        to_group: &TGroup,
    ) -> AccessManagerResult<()>;

    /// Grant `user` an access level to an application component.
    async fn add_user_to_application_component_and_access_level_mapping(
        &self,
        user: &TUser,
        application_component: &TComponent,
        access_level: &TAccess,
    ) -> AccessManagerResult<()>;

    /// Revoke an application component grant from `user`.
    async fn remove_user_to_application_component_and_access_level_mapping(
        &self,
        user: &TUser,
        application_component: &TComponent,
        access_level: &TAccess,
    ) -> AccessManagerResult<()>;

    /// Grant `group` an access level to an application component.
    async fn add_group_to_application_component_and_access_level_mapping(
        &self,
        group: &TGroup,
        application_component: &TComponent,
        access_level: &TAccess,
    ) -> AccessManagerResult<()>;

    /// Revoke an application component grant from `group`.
    async fn remove_group_to_application_component_and_access_level_mapping(
        &self,
        group: &TGroup,
        application_component: &TComponent,
        access_level: &TAccess,
    ) -> AccessManagerResult<()>;

    /// Add an entity type.
    async fn add_entity_type(&self, entity_type: &str) -> AccessManagerResult<()>;

    /// Remove an entity type, its entities, and every mapping to them.
    async fn remove_entity_type(&self, entity_type: &str) -> AccessManagerResult<()>;

    /// Add an entity of an existing type.
    async fn add_entity(&self, entity_type: &str, entity: &str) -> AccessManagerResult<()>;

    /// Remove an entity and every mapping to it.
    async fn remove_entity(&self, entity_type: &str, entity: &str) -> AccessManagerResult<()>;

    /// Grant `user` access to an entity.
    async fn add_user_to_entity_mapping(
        &self,
        user: &TUser,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<()>;

    /// Revoke `user`'s access to an entity.
    async fn remove_user_to_entity_mapping(
        &self,
        user: &TUser,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<()>;

    /// Grant `group` access to an entity.
    async fn add_group_to_entity_mapping(
        &self,
        group: &TGroup,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<()>;

    /// Revoke `group`'s access to an entity.
    async fn remove_group_to_entity_mapping(
        &self,
        group: &TGroup,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<()>;
}

/// Reads of the permission graph.
#[async_trait]
pub trait AccessManagerQueryProcessor<TUser, TGroup, TComponent, TAccess>: Send + Sync {
    /// All users.
    async fn get_users(&self) -> AccessManagerResult<Vec<TUser>>;

    /// All groups.
    async fn get_groups(&self) -> AccessManagerResult<Vec<TGroup>>;

    /// All entity types.
    async fn get_entity_types(&self) -> AccessManagerResult<Vec<String>>;

    /// Whether `user` exists.
    async fn contains_user(&self, user: &TUser) -> AccessManagerResult<bool>;

    /// Whether `group` exists.
    async fn contains_group(&self, group: &TGroup) -> AccessManagerResult<bool>;

    /// Groups `user` belongs to.
    async fn get_user_to_group_mappings(
        &self,
        user: &TUser,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<TGroup>>;

    /// Users belonging to `group`.
    async fn get_group_to_user_mappings(
        &self,
        group: &TGroup,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<TUser>>;

    /// Groups `group` belongs to.
    async fn get_group_to_group_mappings(
        &self,
        group: &TGroup,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<TGroup>>;

    /// Groups belonging to `group`.
    async fn get_group_to_group_reverse_mappings(
        &self,
        group: &TGroup,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<TGroup>>;

    /// Application component grants held directly by `user`.
    async fn get_user_to_application_component_and_access_level_mappings(
        &self,
        user: &TUser,
    ) -> AccessManagerResult<Vec<ApplicationComponentAndAccessLevel<TComponent, TAccess>>>;

    /// Users holding an application component grant.
    async fn get_application_component_and_access_level_to_user_mappings(
        &self,
        application_component: &TComponent,
        access_level: &TAccess,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<TUser>>;

    /// Application component grants held directly by `group`.
    async fn get_group_to_application_component_and_access_level_mappings(
        &self,
        group: &TGroup,
    ) -> AccessManagerResult<Vec<ApplicationComponentAndAccessLevel<TComponent, TAccess>>>;

    /// Groups holding an application component grant.
    async fn get_application_component_and_access_level_to_group_mappings(
        &self,
        application_component: &TComponent,
        access_level: &TAccess,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<TGroup>>;

    /// Whether `entity_type` exists.
    async fn contains_entity_type(&self, entity_type: &str) -> AccessManagerResult<bool>;

    /// Entities of `entity_type`.
    async fn get_entities(&self, entity_type: &str) -> AccessManagerResult<Vec<String>>;

    /// Whether the entity exists.
    async fn contains_entity(&self, entity_type: &str, entity: &str) -> AccessManagerResult<bool>;

    /// Entities `user` is mapped to directly.
    async fn get_user_to_entity_mappings(&self, user: &TUser) -> AccessManagerResult<Vec<EntityTypeAndEntity>>;

    /// Entities of one type `user` is mapped to directly.
    async fn get_user_to_entity_mappings_for_type(
        &self,
        user: &TUser,
        entity_type: &str,
    ) -> AccessManagerResult<Vec<String>>;

    /// Users mapped to an entity.
    async fn get_entity_to_user_mappings(
        &self,
        entity_type: &str,
        entity: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<TUser>>;

    /// Entities `group` is mapped to directly.
    async fn get_group_to_entity_mappings(
        &self,
        group: &TGroup,
    ) -> AccessManagerResult<Vec<EntityTypeAndEntity>>;

    /// Entities of one type `group` is mapped to directly.
    async fn get_group_to_entity_mappings_for_type(
        &self,
        group: &TGroup,
        entity_type: &str,
    ) -> AccessManagerResult<Vec<String>>;

    /// Groups mapped to an entity.
    async fn get_entity_to_group_mappings(
        &self,
        entity_type: &str,
        entity: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<TGroup>>;

    /// Whether `user`, directly or through its groups, holds the grant.
    async fn has_access_to_application_component(
        &self,
        user: &TUser,
        application_component: &TComponent,
        access_level: &TAccess,
    ) -> AccessManagerResult<bool>;

    /// Whether `user`, directly or through its groups, can access the entity.
    async fn has_access_to_entity(
        &self,
        user: &TUser,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<bool>;

    /// Every application component grant available to `user`.
    async fn get_application_components_accessible_by_user(
        &self,
        user: &TUser,
    ) -> AccessManagerResult<HashSet<ApplicationComponentAndAccessLevel<TComponent, TAccess>>>;

    /// Every application component grant available to `group`.
    async fn get_application_components_accessible_by_group(
        &self,
        group: &TGroup,
    ) -> AccessManagerResult<HashSet<ApplicationComponentAndAccessLevel<TComponent, TAccess>>>;

    /// Every entity available to `user`.
    async fn get_entities_accessible_by_user(
        &self,
        user: &TUser,
    ) -> AccessManagerResult<HashSet<EntityTypeAndEntity>>;

    /// Every entity of one type available to `user`.
    async fn get_entities_of_type_accessible_by_user(
        &self,
        user: &TUser,
        entity_type: &str,
    ) -> AccessManagerResult<HashSet<String>>;

    /// Every entity available to `group`.
    async fn get_entities_accessible_by_group(
        &self,
        group: &TGroup,
    ) -> AccessManagerResult<HashSet<EntityTypeAndEntity>>;

    /// Every entity of one type available to `group`.
    async fn get_entities_of_type_accessible_by_group(
        &self,
        group: &TGroup,
        entity_type: &str,
    ) -> AccessManagerResult<HashSet<String>>;
}

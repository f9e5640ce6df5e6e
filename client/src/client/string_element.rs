//! Facade for services whose identifiers are already strings.
//!
//! Every operation builds one request path, delegates to the request core,
//! and projects the response onto plain strings. The typed facade wraps this
//! one and adds identifier conversion on either side.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use super::dto::{
    ComponentMappingDto, EntityMappingDto, GroupToGroupMappingDto, UserToGroupMappingDto,
};
use super::path::RequestPath;
use super::processors::{AccessManagerEventProcessor, AccessManagerQueryProcessor};
use super::request::RequestCore;
use crate::config::AccessManagerClientSettings;
use crate::domain::ports::HttpTransport;
use crate::domain::{
    AccessManagerError, AccessManagerResult, ApplicationComponentAndAccessLevel,
    EntityTypeAndEntity,
};
use crate::outbound::http::ReqwestTransport;

/// Application component mapping with string identifiers.
pub type StringComponentMapping = ApplicationComponentAndAccessLevel<String, String>;

const USERS: &str = "users";
const GROUPS: &str = "groups";
const ENTITY_TYPES: &str = "entityTypes";
const ENTITIES: &str = "entities";
const USER_TO_GROUP_MAPPINGS: &str = "userToGroupMappings";
const GROUP_TO_GROUP_MAPPINGS: &str = "groupToGroupMappings";
const GROUP_TO_GROUP_REVERSE_MAPPINGS: &str = "groupToGroupReverseMappings";
const DATA_ELEMENT_ACCESS: &str = "dataElementAccess";

/// The side of a mapping that receives a grant.
#[derive(Debug, Clone, Copy)]
enum Principal {
    User,
    Group,
}

impl Principal {
    const fn key(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
        }
    }

    const fn component_mappings(self) -> &'static str {
        match self {
            Self::User => "userToApplicationComponentAndAccessLevelMappings",
            Self::Group => "groupToApplicationComponentAndAccessLevelMappings",
        }
    }

    const fn entity_mappings(self) -> &'static str {
        match self {
            Self::User => "userToEntityMappings",
            Self::Group => "groupToEntityMappings",
        }
    }

    fn component_grant(self, principal: &str, component: &str, access_level: &str) -> RequestPath {
        RequestPath::collection(self.component_mappings())
            .keyed(self.key(), principal)
            .keyed("applicationComponent", component)
            .keyed("accessLevel", access_level)
    }

    fn entity_grant(self, principal: &str, entity_type: &str, entity: &str) -> RequestPath {
        RequestPath::collection(self.entity_mappings())
            .keyed(self.key(), principal)
            .keyed("entityType", entity_type)
            .keyed("entity", entity)
    }
}

fn entity_path(entity_type: &str, entity: &str) -> RequestPath {
    RequestPath::collection(ENTITY_TYPES)
        .encoded(entity_type)
        .literal(ENTITIES)
        .encoded(entity)
}

/// AccessManager client operating directly on string identifiers.
///
/// # Examples
///
/// ```rust,no_run
/// use access_manager_client::AccessManagerStringElementClient;
///
/// # async fn demo() -> Result<(), access_manager_client::AccessManagerError> {
/// let client = AccessManagerStringElementClient::new("http://127.0.0.1:5000/")?;
/// client.add_user("user1").await?;
/// assert!(client.contains_user("user1").await?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AccessManagerStringElementClient {
    core: RequestCore,
}

impl AccessManagerStringElementClient {
    /// Connect to `base_url` with the default reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`AccessManagerError::InvalidBaseUrl`] when the base URL is
    /// unusable and [`AccessManagerError::TransportSetup`] when the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str) -> AccessManagerResult<Self> {
        Self::from_settings(&AccessManagerClientSettings::for_base_url(base_url))
    }

    /// Connect using loaded settings.
    ///
    /// # Errors
    ///
    /// As [`Self::new`], plus [`AccessManagerError::MissingBaseUrl`] when the
    /// settings carry no base URL.
    pub fn from_settings(settings: &AccessManagerClientSettings) -> AccessManagerResult<Self> {
        let base_url = settings.base_url().ok_or(AccessManagerError::MissingBaseUrl)?;
        let transport = ReqwestTransport::from_settings(settings).map_err(|error| {
            AccessManagerError::TransportSetup {
                message: error.to_string(),
            }
        })?;
        Self::with_transport(base_url, Arc::new(transport))
    }

    /// Connect to `base_url` through a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns [`AccessManagerError::InvalidBaseUrl`] when the base URL is
    /// unusable.
    pub fn with_transport(
        base_url: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> AccessManagerResult<Self> {
        Ok(Self {
            core: RequestCore::new(base_url, transport)?,
        })
    }

    /// The `<base>/api/v1/` root every request is resolved against.
    #[must_use]
    pub const fn api_root(&self) -> &Url {
        self.core.api_root()
    }

    // Users and groups

    /// All users.
    ///
    /// # Errors
    ///
    /// Any transport, status, or decoding failure.
    pub async fn get_users(&self) -> AccessManagerResult<Vec<String>> {
        self.core.send_get(&RequestPath::collection(USERS)).await
    }

    /// All groups.
    ///
    /// # Errors
    ///
    /// Any transport, status, or decoding failure.
    pub async fn get_groups(&self) -> AccessManagerResult<Vec<String>> {
        self.core.send_get(&RequestPath::collection(GROUPS)).await
    }

    /// Add a user.
    ///
    /// # Errors
    ///
    /// Any transport failure or a status other than `201`.
    pub async fn add_user(&self, user: &str) -> AccessManagerResult<()> {
        self.core
            .send_post(&RequestPath::collection(USERS).encoded(user))
            .await
    }

    /// Whether a user exists.
    ///
    /// # Errors
    ///
    /// Any transport failure, or a failure status other than a generic
    /// not-found.
    pub async fn contains_user(&self, user: &str) -> AccessManagerResult<bool> {
        self.core
            .send_get_for_contains(&RequestPath::collection(USERS).encoded(user))
            .await
    }

    /// Remove a user.
    ///
    /// # Errors
    ///
    /// Any transport failure or a status other than `200`.
    pub async fn remove_user(&self, user: &str) -> AccessManagerResult<()> {
        self.core
            .send_delete(&RequestPath::collection(USERS).encoded(user))
            .await
    }

    /// Add a group.
    ///
    /// # Errors
    ///
    /// Any transport failure or a status other than `201`.
    pub async fn add_group(&self, group: &str) -> AccessManagerResult<()> {
        self.core
            .send_post(&RequestPath::collection(GROUPS).encoded(group))
            .await
    }

    /// Whether a group exists.
    ///
    /// # Errors
    ///
    /// Any transport failure, or a failure status other than a generic
    /// not-found.
    pub async fn contains_group(&self, group: &str) -> AccessManagerResult<bool> {
        self.core
            .send_get_for_contains(&RequestPath::collection(GROUPS).encoded(group))
            .await
    }

    /// Remove a group.
    ///
    /// # Errors
    ///
    /// Any transport failure or a status other than `200`.
    pub async fn remove_group(&self, group: &str) -> AccessManagerResult<()> {
        self.core
            .send_delete(&RequestPath::collection(GROUPS).encoded(group))
            .await
    }

    // Group membership

    /// Make `user` a member of `group`.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when either side is missing,
    /// or any other failure.
    pub async fn add_user_to_group_mapping(&self, user: &str, group: &str) -> AccessManagerResult<()> {
        self.core.send_post(&user_to_group(user, group)).await
    }

    /// Groups `user` belongs to.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the user is missing, or
    /// any other failure.
    pub async fn get_user_to_group_mappings(
        &self,
        user: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<String>> {
        let path = RequestPath::collection(USER_TO_GROUP_MAPPINGS)
            .keyed("user", user)
            .include_indirect_mappings(include_indirect_mappings);
        let mappings: Vec<UserToGroupMappingDto> = self.core.send_get(&path).await?;
        Ok(mappings.into_iter().map(|mapping| mapping.group).collect())
    }

    /// Users belonging to `group`.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the group is missing, or
    /// any other failure.
    pub async fn get_group_to_user_mappings(
        &self,
        group: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<String>> {
        let path = RequestPath::collection(USER_TO_GROUP_MAPPINGS)
            .keyed("group", group)
            .include_indirect_mappings(include_indirect_mappings);
        let mappings: Vec<UserToGroupMappingDto> = self.core.send_get(&path).await?;
        Ok(mappings.into_iter().map(|mapping| mapping.user).collect())
    }

    /// Remove `user` from `group`.
    ///
    /// # Errors
    ///
    /// Any transport failure or a status other than `200`.
    pub async fn remove_user_to_group_mapping(&self, user: &str, group: &str) -> AccessManagerResult<()> {
        self.core.send_delete(&user_to_group(user, group)).await
    }

    /// Make `from_group` a member of `to_group`.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when either group is missing,
    /// or any other failure.
    pub async fn add_group_to_group_mapping(
        &self,
        from_group: &str,
        to_group: &str,
    ) -> AccessManagerResult<()> {
        self.core.send_post(&group_to_group(from_group, to_group)).await
    }

    /// Groups `group` belongs to.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the group is missing, or
    /// any other failure.
    pub async fn get_group_to_group_mappings(
        &self,
        group: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<String>> {
        let path = RequestPath::collection(GROUP_TO_GROUP_MAPPINGS)
            .keyed("group", group)
            .include_indirect_mappings(include_indirect_mappings);
        let mappings: Vec<GroupToGroupMappingDto> = self.core.send_get(&path).await?;
        Ok(mappings.into_iter().map(|mapping| mapping.to_group).collect())
    }

    /// Groups belonging to `group`.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the group is missing, or
    /// any other failure.
    pub async fn get_group_to_group_reverse_mappings(
        &self,
        group: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<String>> {
        let path = RequestPath::collection(GROUP_TO_GROUP_REVERSE_MAPPINGS)
            .keyed("group", group)
            .include_indirect_mappings(include_indirect_mappings);
        let mappings: Vec<GroupToGroupMappingDto> = self.core.send_get(&path).await?;
        Ok(mappings.into_iter().map(|mapping| mapping.from_group).collect())
    }

    /// Remove `from_group` from `to_group`.
    ///
    /// # Errors
    ///
    /// Any transport failure or a status other than `200`.
    pub async fn remove_group_to_group_mapping(
        &self,
        from_group: &str,
        to_group: &str,
    ) -> AccessManagerResult<()> {
        self.core.send_delete(&group_to_group(from_group, to_group)).await
    }

    // Application component grants

    /// Grant `user` an access level to an application component.
    ///
    /// # Errors
    ///
    /// Any transport failure or a status other than `201`.
    pub async fn add_user_to_application_component_and_access_level_mapping(
        &self,
        user: &str,
        application_component: &str,
        access_level: &str,
    ) -> AccessManagerResult<()> {
        let path = Principal::User.component_grant(user, application_component, access_level);
        self.core.send_post(&path).await
    }

    /// Application component grants held directly by `user`.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the user is missing, or
    /// any other failure.
    pub async fn get_user_to_application_component_and_access_level_mappings(
        &self,
        user: &str,
    ) -> AccessManagerResult<Vec<StringComponentMapping>> {
        self.component_mappings_of(Principal::User, user, false).await
    }

    /// Users holding an application component grant.
    ///
    /// # Errors
    ///
    /// Any transport, status, or decoding failure.
    pub async fn get_application_component_and_access_level_to_user_mappings(
        &self,
        application_component: &str,
        access_level: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<String>> {
        self.principals_with_component(
            Principal::User,
            application_component,
            access_level,
            include_indirect_mappings,
        )
        .await
    }

    /// Revoke an application component grant from `user`.
    ///
    /// # Errors
    ///
    /// Any transport failure or a status other than `200`.
    pub async fn remove_user_to_application_component_and_access_level_mapping(
        &self,
        user: &str,
        application_component: &str,
        access_level: &str,
    ) -> AccessManagerResult<()> {
        let path = Principal::User.component_grant(user, application_component, access_level);
        self.core.send_delete(&path).await
    }

    /// Grant `group` an access level to an application component.
    ///
    /// # Errors
    ///
    /// Any transport failure or a status other than `201`.
    pub async fn add_group_to_application_component_and_access_level_mapping(
        &self,
        group: &str,
        application_component: &str,
        access_level: &str,
    ) -> AccessManagerResult<()> {
        let path = Principal::Group.component_grant(group, application_component, access_level);
        self.core.send_post(&path).await
    }

    /// Application component grants held directly by `group`.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the group is missing, or
    /// any other failure.
    pub async fn get_group_to_application_component_and_access_level_mappings(
        &self,
        group: &str,
    ) -> AccessManagerResult<Vec<StringComponentMapping>> {
        self.component_mappings_of(Principal::Group, group, false).await
    }

    /// Groups holding an application component grant.
    ///
    /// # Errors
    ///
    /// Any transport, status, or decoding failure.
    pub async fn get_application_component_and_access_level_to_group_mappings(
        &self,
        application_component: &str,
        access_level: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<String>> {
        self.principals_with_component(
            Principal::Group,
            application_component,
            access_level,
            include_indirect_mappings,
        )
        .await
    }

    /// Revoke an application component grant from `group`.
    ///
    /// # Errors
    ///
    /// Any transport failure or a status other than `200`.
    pub async fn remove_group_to_application_component_and_access_level_mapping(
        &self,
        group: &str,
        application_component: &str,
        access_level: &str,
    ) -> AccessManagerResult<()> {
        let path = Principal::Group.component_grant(group, application_component, access_level);
        self.core.send_delete(&path).await
    }

    // Entity types and entities

    /// All entity types.
    ///
    /// # Errors
    ///
    /// Any transport, status, or decoding failure.
    pub async fn get_entity_types(&self) -> AccessManagerResult<Vec<String>> {
        self.core.send_get(&RequestPath::collection(ENTITY_TYPES)).await
    }

    /// Add an entity type.
    ///
    /// # Errors
    ///
    /// Any transport failure or a status other than `201`.
    pub async fn add_entity_type(&self, entity_type: &str) -> AccessManagerResult<()> {
        self.core
            .send_post(&RequestPath::collection(ENTITY_TYPES).encoded(entity_type))
            .await
    }

    /// Whether an entity type exists.
    ///
    /// # Errors
    ///
    /// Any transport failure, or a failure status other than a generic
    /// not-found.
    pub async fn contains_entity_type(&self, entity_type: &str) -> AccessManagerResult<bool> {
        self.core
            .send_get_for_contains(&RequestPath::collection(ENTITY_TYPES).encoded(entity_type))
            .await
    }

    /// Remove an entity type.
    ///
    /// # Errors
    ///
    /// Any transport failure or a status other than `200`.
    pub async fn remove_entity_type(&self, entity_type: &str) -> AccessManagerResult<()> {
        self.core
            .send_delete(&RequestPath::collection(ENTITY_TYPES).encoded(entity_type))
            .await
    }

    /// Add an entity.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the entity type is
    /// missing, or any other failure.
    pub async fn add_entity(&self, entity_type: &str, entity: &str) -> AccessManagerResult<()> {
        self.core.send_post(&entity_path(entity_type, entity)).await
    }

    /// Entities of `entity_type`.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the entity type is
    /// missing, or any other failure.
    pub async fn get_entities(&self, entity_type: &str) -> AccessManagerResult<Vec<String>> {
        let path = RequestPath::collection(ENTITY_TYPES)
            .encoded(entity_type)
            .literal(ENTITIES);
        self.core.send_get(&path).await
    }

    /// Whether an entity exists.
    ///
    /// # Errors
    ///
    /// Any transport failure, or a failure status other than a generic
    /// not-found.
    pub async fn contains_entity(&self, entity_type: &str, entity: &str) -> AccessManagerResult<bool> {
        self.core
            .send_get_for_contains(&entity_path(entity_type, entity))
            .await
    }

    /// Remove an entity.
    ///
    /// # Errors
    ///
    /// Any transport failure or a status other than `200`.
    pub async fn remove_entity(&self, entity_type: &str, entity: &str) -> AccessManagerResult<()> {
        self.core.send_delete(&entity_path(entity_type, entity)).await
    }

    // Entity grants

    /// Grant `user` access to an entity.
    ///
    /// # Errors
    ///
    /// Any transport failure or a status other than `201`.
    pub async fn add_user_to_entity_mapping(
        &self,
        user: &str,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<()> {
        self.core
            .send_post(&Principal::User.entity_grant(user, entity_type, entity))
            .await
    }

    /// Entities `user` is mapped to directly.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the user is missing, or
    /// any other failure.
    pub async fn get_user_to_entity_mappings(&self, user: &str) -> AccessManagerResult<Vec<EntityTypeAndEntity>> {
        self.entity_mappings_of(Principal::User, user, false).await
    }

    /// Entities of one type `user` is mapped to directly.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the user or entity type
    /// is missing, or any other failure.
    pub async fn get_user_to_entity_mappings_for_type(
        &self,
        user: &str,
        entity_type: &str,
    ) -> AccessManagerResult<Vec<String>> {
        self.entity_mappings_of_type(Principal::User, user, entity_type, false)
            .await
    }

    /// Users mapped to an entity.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the entity is missing, or
    /// any other failure.
    pub async fn get_entity_to_user_mappings(
        &self,
        entity_type: &str,
        entity: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<String>> {
        self.principals_with_entity(Principal::User, entity_type, entity, include_indirect_mappings)
            .await
    }

    /// Revoke `user`'s access to an entity.
    ///
    /// # Errors
    ///
    /// Any transport failure or a status other than `200`.
    pub async fn remove_user_to_entity_mapping(
        &self,
        user: &str,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<()> {
        self.core
            .send_delete(&Principal::User.entity_grant(user, entity_type, entity))
            .await
    }

    /// Grant `group` access to an entity.
    ///
    /// # Errors
    ///
    /// Any transport failure or a status other than `201`.
    pub async fn add_group_to_entity_mapping(
        &self,
        group: &str,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<()> {
        self.core
            .send_post(&Principal::Group.entity_grant(group, entity_type, entity))
            .await
    }

    /// Entities `group` is mapped to directly.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the group is missing, or
    /// any other failure.
    pub async fn get_group_to_entity_mappings(&self, group: &str) -> AccessManagerResult<Vec<EntityTypeAndEntity>> {
        self.entity_mappings_of(Principal::Group, group, false).await
    }

    /// Entities of one type `group` is mapped to directly.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the group or entity type
    /// is missing, or any other failure.
    pub async fn get_group_to_entity_mappings_for_type(
        &self,
        group: &str,
        entity_type: &str,
    ) -> AccessManagerResult<Vec<String>> {
        self.entity_mappings_of_type(Principal::Group, group, entity_type, false)
            .await
    }

    /// Groups mapped to an entity.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the entity is missing, or
    /// any other failure.
    pub async fn get_entity_to_group_mappings(
        &self,
        entity_type: &str,
        entity: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<String>> {
        self.principals_with_entity(Principal::Group, entity_type, entity, include_indirect_mappings)
            .await
    }

    /// Revoke `group`'s access to an entity.
    ///
    /// # Errors
    ///
    /// Any transport failure or a status other than `200`.
    pub async fn remove_group_to_entity_mapping(
        &self,
        group: &str,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<()> {
        self.core
            .send_delete(&Principal::Group.entity_grant(group, entity_type, entity))
            .await
    }

    // Access checks

    /// Whether `user`, directly or through its groups, holds the grant.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the user is missing, or
    /// any other failure.
    pub async fn has_access_to_application_component(
        &self,
        user: &str,
        application_component: &str,
        access_level: &str,
    ) -> AccessManagerResult<bool> {
        let path = RequestPath::collection(DATA_ELEMENT_ACCESS)
            .literal("applicationComponent")
            .keyed("user", user)
            .keyed("applicationComponent", application_component)
            .keyed("accessLevel", access_level);
        self.core.send_get(&path).await
    }

    /// Whether `user`, directly or through its groups, can access the entity.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the user or entity is
    /// missing, or any other failure.
    pub async fn has_access_to_entity(
        &self,
        user: &str,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<bool> {
        let path = RequestPath::collection(DATA_ELEMENT_ACCESS)
            .literal("entity")
            .keyed("user", user)
            .keyed("entityType", entity_type)
            .keyed("entity", entity);
        self.core.send_get(&path).await
    }

    /// Every application component grant available to `user`.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the user is missing, or
    /// any other failure.
    pub async fn get_application_components_accessible_by_user(
        &self,
        user: &str,
    ) -> AccessManagerResult<HashSet<StringComponentMapping>> {
        let mappings = self.component_mappings_of(Principal::User, user, true).await?;
        Ok(mappings.into_iter().collect())
    }

    /// Every application component grant available to `group`.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the group is missing, or
    /// any other failure.
    pub async fn get_application_components_accessible_by_group(
        &self,
        group: &str,
    ) -> AccessManagerResult<HashSet<StringComponentMapping>> {
        let mappings = self.component_mappings_of(Principal::Group, group, true).await?;
        Ok(mappings.into_iter().collect())
    }

    /// Every entity available to `user`.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the user is missing, or
    /// any other failure.
    pub async fn get_entities_accessible_by_user(&self, user: &str) -> AccessManagerResult<HashSet<EntityTypeAndEntity>> {
        let mappings = self.entity_mappings_of(Principal::User, user, true).await?;
        Ok(mappings.into_iter().collect())
    }

    /// Every entity of one type available to `user`.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the user or entity type
    /// is missing, or any other failure.
    pub async fn get_entities_of_type_accessible_by_user(
        &self,
        user: &str,
        entity_type: &str,
    ) -> AccessManagerResult<HashSet<String>> {
        let entities = self
            .entity_mappings_of_type(Principal::User, user, entity_type, true)
            .await?;
        Ok(entities.into_iter().collect())
    }

    /// Every entity available to `group`.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the group is missing, or
    /// any other failure.
    pub async fn get_entities_accessible_by_group(
        &self,
        group: &str,
    ) -> AccessManagerResult<HashSet<EntityTypeAndEntity>> {
        let mappings = self.entity_mappings_of(Principal::Group, group, true).await?;
        Ok(mappings.into_iter().collect())
    }

    /// Every entity of one type available to `group`.
    ///
    /// # Errors
    ///
    /// [`AccessManagerError::ElementNotFound`] when the group or entity type
    /// is missing, or any other failure.
    pub async fn get_entities_of_type_accessible_by_group(
        &self,
        group: &str,
        entity_type: &str,
    ) -> AccessManagerResult<HashSet<String>> {
        let entities = self
            .entity_mappings_of_type(Principal::Group, group, entity_type, true)
            .await?;
        Ok(entities.into_iter().collect())
    }

    async fn component_mappings_of(
        &self,
        principal: Principal,
        id: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<StringComponentMapping>> {
        let path = RequestPath::collection(principal.component_mappings())
            .keyed(principal.key(), id)
            .include_indirect_mappings(include_indirect_mappings);
        let mappings: Vec<ComponentMappingDto> = self.core.send_get(&path).await?;
        Ok(mappings
            .into_iter()
            .map(|mapping| {
                ApplicationComponentAndAccessLevel::new(
                    mapping.application_component,
                    mapping.access_level,
                )
            })
            .collect())
    }

    async fn principals_with_component(
        &self,
        principal: Principal,
        application_component: &str,
        access_level: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<String>> {
        let path = RequestPath::collection(principal.component_mappings())
            .keyed("applicationComponent", application_component)
            .keyed("accessLevel", access_level)
            .include_indirect_mappings(include_indirect_mappings);
        let mappings: Vec<ComponentMappingDto> = self.core.send_get(&path).await?;
        Ok(mappings.into_iter().map(|mapping| mapping.principal).collect())
    }

    async fn entity_mappings_of(
        &self,
        principal: Principal,
        id: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<EntityTypeAndEntity>> {
        let path = RequestPath::collection(principal.entity_mappings())
            .keyed(principal.key(), id)
            .include_indirect_mappings(include_indirect_mappings);
        let mappings: Vec<EntityMappingDto> = self.core.send_get(&path).await?;
        Ok(mappings
            .into_iter()
            .map(|mapping| EntityTypeAndEntity {
                entity_type: mapping.entity_type,
                entity: mapping.entity,
            })
            .collect())
    }

    async fn entity_mappings_of_type(
        &self,
        principal: Principal,
        id: &str,
        entity_type: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<String>> {
        let path = RequestPath::collection(principal.entity_mappings())
            .keyed(principal.key(), id)
            .keyed("entityType", entity_type)
            .include_indirect_mappings(include_indirect_mappings);
        let mappings: Vec<EntityMappingDto> = self.core.send_get(&path).await?;
        Ok(mappings.into_iter().map(|mapping| mapping.entity).collect())
    }

    async fn principals_with_entity(
        &self,
        principal: Principal,
        entity_type: &str,
        entity: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<String>> {
        let path = RequestPath::collection(principal.entity_mappings())
            .keyed("entityType", entity_type)
            .keyed("entity", entity)
            .include_indirect_mappings(include_indirect_mappings);
        let mappings: Vec<EntityMappingDto> = self.core.send_get(&path).await?;
        Ok(mappings.into_iter().map(|mapping| mapping.principal).collect())
    }
}

fn user_to_group(user: &str, group: &str) -> RequestPath {
    RequestPath::collection(USER_TO_GROUP_MAPPINGS)
        .keyed("user", user)
        .keyed("group", group)
}

fn group_to_group(from_group: &str, to_group: &str) -> RequestPath {
    RequestPath::collection(GROUP_TO_GROUP_MAPPINGS)
        .keyed("fromGroup", from_group)
        .keyed("toGroup", to_group)
}

#[async_trait]
impl AccessManagerEventProcessor<String, String, String, String> for AccessManagerStringElementClient {
    async fn add_user(&self, user: &String) -> AccessManagerResult<()> {
        Self::add_user(self, user).await
    }

    async fn remove_user(&self, user: &String) -> AccessManagerResult<()> {
        Self::remove_user(self, user).await
    }

    async fn add_group(&self, group: &String) -> AccessManagerResult<()> {
        Self::add_group(self, group).await
    }

    async fn remove_group(&self, group: &String) -> AccessManagerResult<()> {
        Self::remove_group(self, group).await
    }

    async fn add_user_to_group_mapping(&self, user: &String, group: &String) -> AccessManagerResult<()> {
        Self::add_user_to_group_mapping(self, user, group).await
    }

    async fn remove_user_to_group_mapping(&self, user: &String, group: &String) -> AccessManagerResult<()> {
        Self::remove_user_to_group_mapping(self, user, group).await
    }

    async fn add_group_to_group_mapping(
        &self,
        from_group: &String,
        to_group: &String,
    ) -> AccessManagerResult<()> {
        Self::add_group_to_group_mapping(self, from_group, to_group).await
    }

    async fn remove_group_to_group_mapping(
        &self,
        from_group: &String,
        to_group: &String,
    ) -> AccessManagerResult<()> {
        Self::remove_group_to_group_mapping(self, from_group, to_group).await
    }

    async fn add_user_to_application_component_and_access_level_mapping(
        &self,
        user: &String,
        application_component: &String,
        access_level: &String,
    ) -> AccessManagerResult<()> {
        Self::add_user_to_application_component_and_access_level_mapping(
            self,
            user,
            application_component,
            access_level,
        )
        .await
    }

    async fn remove_user_to_application_component_and_access_level_mapping(
        &self,
        user: &String,
        application_component: &String,
        access_level: &String,
    ) -> AccessManagerResult<()> {
        Self::remove_user_to_application_component_and_access_level_mapping(
            self,
            user,
            application_component,
            access_level,
        )
        .await
    }

    async fn add_group_to_application_component_and_access_level_mapping(
        &self,
        group: &String,
        application_component: &String,
        access_level: &String,
    ) -> AccessManagerResult<()> {
        Self::add_group_to_application_component_and_access_level_mapping(
            self,
            group,
            application_component,
            access_level,
        )
        .await
    }

    async fn remove_group_to_application_component_and_access_level_mapping(
        &self,
        group: &String,
        application_component: &String,
        access_level: &String,
    ) -> AccessManagerResult<()> {
        Self::remove_group_to_application_component_and_access_level_mapping(
            self,
            group,
            application_component,
            access_level,
        )
        .await
    }

    async fn add_entity_type(&self, entity_type: &str) -> AccessManagerResult<()> {
        Self::add_entity_type(self, entity_type).await
    }

    async fn remove_entity_type(&self, entity_type: &str) -> AccessManagerResult<()> {
        Self::remove_entity_type(self, entity_type).await
    }

    async fn add_entity(&self, entity_type: &str, entity: &str) -> AccessManagerResult<()> {
        Self::add_entity(self, entity_type, entity).await
    }

    async fn remove_entity(&self, entity_type: &str, entity: &str) -> AccessManagerResult<()> {
        Self::remove_entity(self, entity_type, entity).await
    }

    async fn add_user_to_entity_mapping(
        &self,
        user: &String,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<()> {
        Self::add_user_to_entity_mapping(self, user, entity_type, entity).await
    }

    async fn remove_user_to_entity_mapping(
        &self,
        user: &String,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<()> {
        Self::remove_user_to_entity_mapping(self, user, entity_type, entity).await
    }

    async fn add_group_to_entity_mapping(
        &self,
        group: &String,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<()> {
        Self::add_group_to_entity_mapping(self, group, entity_type, entity).await
    }

    async fn remove_group_to_entity_mapping(
        &self,
        group: &String,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<()> {
        Self::remove_group_to_entity_mapping(self, group, entity_type, entity).await
    }
}

#[async_trait]
impl AccessManagerQueryProcessor<String, String, String, String> for AccessManagerStringElementClient {
    async fn get_users(&self) -> AccessManagerResult<Vec<String>> {
        Self::get_users(self).await
    }

    async fn get_groups(&self) -> AccessManagerResult<Vec<String>> {
        Self::get_groups(self).await
    }

    async fn get_entity_types(&self) -> AccessManagerResult<Vec<String>> {
        Self::get_entity_types(self).await
    }

    async fn contains_user(&self, user: &String) -> AccessManagerResult<bool> {
        Self::contains_user(self, user).await
    }

    async fn contains_group(&self, group: &String) -> AccessManagerResult<bool> {
        Self::contains_group(self, group).await
    }

    async fn get_user_to_group_mappings(
        &self,
        user: &String,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<String>> {
        Self::get_user_to_group_mappings(self, user, include_indirect_mappings).await
    }

    async fn get_group_to_user_mappings(
        &self,
        group: &String,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<String>> {
        Self::get_group_to_user_mappings(self, group, include_indirect_mappings).await
    }

    async fn get_group_to_group_mappings(
        &self,
        group: &String,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<String>> {
        Self::get_group_to_group_mappings(self, group, include_indirect_mappings).await
    }

    async fn get_group_to_group_reverse_mappings(
        &self,
        group: &String,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<String>> {
        Self::get_group_to_group_reverse_mappings(self, group, include_indirect_mappings).await
    }

    async fn get_user_to_application_component_and_access_level_mappings(
        &self,
        user: &String,
    ) -> AccessManagerResult<Vec<StringComponentMapping>> {
        Self::get_user_to_application_component_and_access_level_mappings(self, user).await
    }

    async fn get_application_component_and_access_level_to_user_mappings(
        &self,
        application_component: &String,
        access_level: &String,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<String>> {
        Self::get_application_component_and_access_level_to_user_mappings(
            self,
            application_component,
            access_level,
            include_indirect_mappings,
        )
        .await
    }

    async fn get_group_to_application_component_and_access_level_mappings(
        &self,
        group: &String,
    ) -> AccessManagerResult<Vec<StringComponentMapping>> {
        Self::get_group_to_application_component_and_access_level_mappings(self, group).await
    }

    async fn get_application_component_and_access_level_to_group_mappings(
        &self,
        application_component: &String,
        access_level: &String,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<String>> {
        Self::get_application_component_and_access_level_to_group_mappings(
            self,
            application_component,
            access_level,
            include_indirect_mappings,
        )
        .await
    }

    async fn contains_entity_type(&self, entity_type: &str) -> AccessManagerResult<bool> {
        Self::contains_entity_type(self, entity_type).await
    }

    async fn get_entities(&self, entity_type: &str) -> AccessManagerResult<Vec<String>> {
        Self::get_entities(self, entity_type).await
    }

    async fn contains_entity(&self, entity_type: &str, entity: &str) -> AccessManagerResult<bool> {
        Self::contains_entity(self, entity_type, entity).await
    }

    async fn get_user_to_entity_mappings(&self, user: &String) -> AccessManagerResult<Vec<EntityTypeAndEntity>> {
        Self::get_user_to_entity_mappings(self, user).await
    }

    async fn get_user_to_entity_mappings_for_type(
        &self,
        user: &String,
        entity_type: &str,
    ) -> AccessManagerResult<Vec<String>> {
        Self::get_user_to_entity_mappings_for_type(self, user, entity_type).await
    }

    async fn get_entity_to_user_mappings(
        &self,
        entity_type: &str,
        entity: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<String>> {
        Self::get_entity_to_user_mappings(self, entity_type, entity, include_indirect_mappings).await
    }

    async fn get_group_to_entity_mappings(&self, group: &String) -> AccessManagerResult<Vec<EntityTypeAndEntity>> {
        Self::get_group_to_entity_mappings(self, group).await
    }

    async fn get_group_to_entity_mappings_for_type(
        &self,
        group: &String,
        entity_type: &str,
    ) -> AccessManagerResult<Vec<String>> {
        Self::get_group_to_entity_mappings_for_type(self, group, entity_type).await
    }

    async fn get_entity_to_group_mappings(
        &self,
        entity_type: &str,
        entity: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<String>> {
        Self::get_entity_to_group_mappings(self, entity_type, entity, include_indirect_mappings).await
    }

    async fn has_access_to_application_component(
        &self,
        user: &String,
        application_component: &String,
        access_level: &String,
    ) -> AccessManagerResult<bool> {
        Self::has_access_to_application_component(self, user, application_component, access_level).await
    }

    async fn has_access_to_entity(
        &self,
        user: &String,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<bool> {
        Self::has_access_to_entity(self, user, entity_type, entity).await
    }

    async fn get_application_components_accessible_by_user(
        &self,
        user: &String,
    ) -> AccessManagerResult<HashSet<StringComponentMapping>> {
        Self::get_application_components_accessible_by_user(self, user).await
    }

    async fn get_application_components_accessible_by_group(
        &self,
        group: &String,
    ) -> AccessManagerResult<HashSet<StringComponentMapping>> {
        Self::get_application_components_accessible_by_group(self, group).await
    }

    async fn get_entities_accessible_by_user(&self, user: &String) -> AccessManagerResult<HashSet<EntityTypeAndEntity>> {
        Self::get_entities_accessible_by_user(self, user).await
    }

    async fn get_entities_of_type_accessible_by_user(
        &self,
        user: &String,
        entity_type: &str,
    ) -> AccessManagerResult<HashSet<String>> {
        Self::get_entities_of_type_accessible_by_user(self, user, entity_type).await
    }

    async fn get_entities_accessible_by_group(
        &self,
        group: &String,
    ) -> AccessManagerResult<HashSet<EntityTypeAndEntity>> {
        Self::get_entities_accessible_by_group(self, group).await
    }

    async fn get_entities_of_type_accessible_by_group(
        &self,
        group: &String,
        entity_type: &str,
    ) -> AccessManagerResult<HashSet<String>> {
        Self::get_entities_of_type_accessible_by_group(self, group, entity_type).await
    }
}

//! Facade generic over caller-supplied identifier types.
//!
//! Arguments are rendered with the configured [`UniqueStringifier`]s, the
//! request is delegated to [`AccessManagerStringElementClient`], and returned
//! identifiers are parsed back. Entity types and entities are plain strings
//! on both sides.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use super::processors::{AccessManagerEventProcessor, AccessManagerQueryProcessor};
use super::string_element::{AccessManagerStringElementClient, StringComponentMapping};
use crate::config::AccessManagerClientSettings;
use crate::domain::ports::HttpTransport;
use crate::domain::{
    AccessManagerError, AccessManagerResult, ApplicationComponentAndAccessLevel,
    ElementStringifiers, EntityTypeAndEntity, UniqueStringifier,
};

/// AccessManager client generic over user, group, application component,
/// and access level identifier types.
///
/// # Examples
///
/// ```rust,no_run
/// use access_manager_client::{
///     AccessManagerClient, AccessManagerEventProcessor, AccessManagerQueryProcessor,
///     DisplayFromStrStringifier, ElementStringifiers, StringUniqueStringifier,
/// };
///
/// # async fn demo() -> Result<(), access_manager_client::AccessManagerError> {
/// let stringifiers = ElementStringifiers::new(
///     DisplayFromStrStringifier::<u64>::new(),
///     StringUniqueStringifier,
///     StringUniqueStringifier,
///     StringUniqueStringifier,
/// );
/// let client = AccessManagerClient::new("http://127.0.0.1:5000/", stringifiers)?;
/// client.add_user(&42).await?;
/// let groups = client.get_user_to_group_mappings(&42, true).await?;
/// # let _ = groups;
/// # Ok(())
/// # }
/// ```
pub struct AccessManagerClient<TUser, TGroup, TComponent, TAccess> {
    inner: AccessManagerStringElementClient,
    stringifiers: ElementStringifiers<TUser, TGroup, TComponent, TAccess>,
}

impl<TUser, TGroup, TComponent, TAccess> AccessManagerClient<TUser, TGroup, TComponent, TAccess> {
    /// Connect to `base_url` with the default reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`AccessManagerError::InvalidBaseUrl`] when the base URL is
    /// unusable and [`AccessManagerError::TransportSetup`] when the HTTP
    /// client cannot be built.
    pub fn new(
        base_url: &str,
        stringifiers: ElementStringifiers<TUser, TGroup, TComponent, TAccess>,
    ) -> AccessManagerResult<Self> {
        Ok(Self::from_string_client(
            AccessManagerStringElementClient::new(base_url)?,
            stringifiers,
        ))
    }

    /// Connect using loaded settings.
    ///
    /// # Errors
    ///
    /// As [`Self::new`], plus [`AccessManagerError::MissingBaseUrl`] when the
    /// settings carry no base URL.
    pub fn from_settings(
        settings: &AccessManagerClientSettings,
        stringifiers: ElementStringifiers<TUser, TGroup, TComponent, TAccess>,
    ) -> AccessManagerResult<Self> {
        Ok(Self::from_string_client(
            AccessManagerStringElementClient::from_settings(settings)?,
            stringifiers,
        ))
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
        stringifiers: ElementStringifiers<TUser, TGroup, TComponent, TAccess>,
    ) -> AccessManagerResult<Self> {
        Ok(Self::from_string_client(
            AccessManagerStringElementClient::with_transport(base_url, transport)?,
            stringifiers,
        ))
    }

    /// Layer identifier conversion over an existing string client.
    #[must_use]
    pub const fn from_string_client(
        inner: AccessManagerStringElementClient,
        stringifiers: ElementStringifiers<TUser, TGroup, TComponent, TAccess>,
    ) -> Self {
        Self { inner, stringifiers }
    }

    /// The underlying string client.
    #[must_use]
    pub const fn string_client(&self) -> &AccessManagerStringElementClient {
        &self.inner
    }

    /// The `<base>/api/v1/` root every request is resolved against.
    #[must_use]
    pub const fn api_root(&self) -> &Url {
        self.inner.api_root()
    }

    fn user(&self, user: &TUser) -> String {
        self.stringifiers.user.to_unique_string(user)
    }

    fn group(&self, group: &TGroup) -> String {
        self.stringifiers.group.to_unique_string(group)
    }

    fn component(&self, application_component: &TComponent) -> String {
        self.stringifiers
            .application_component
            .to_unique_string(application_component)
    }

    fn access_level(&self, access_level: &TAccess) -> String {
        self.stringifiers.access_level.to_unique_string(access_level)
    }

    fn parse_users(&self, raw: &[String]) -> AccessManagerResult<Vec<TUser>> {
        parse_all(self.stringifiers.user.as_ref(), raw)
    }

    fn parse_groups(&self, raw: &[String]) -> AccessManagerResult<Vec<TGroup>> {
        parse_all(self.stringifiers.group.as_ref(), raw)
    }

    fn parse_component_mapping(
        &self,
        raw: &StringComponentMapping,
    ) -> AccessManagerResult<ApplicationComponentAndAccessLevel<TComponent, TAccess>> {
        Ok(ApplicationComponentAndAccessLevel::new(
            self.stringifiers
                .application_component
                .from_unique_string(&raw.application_component)?,
            self.stringifiers
                .access_level
                .from_unique_string(&raw.access_level)?,
        ))
    }
}

fn parse_all<T>(stringifier: &dyn UniqueStringifier<T>, raw: &[String]) -> AccessManagerResult<Vec<T>> {
    raw.iter()
        .map(|value| {
            stringifier
                .from_unique_string(value)
                .map_err(AccessManagerError::from)
        })
        .collect()
}

impl<TUser, TGroup, TComponent, TAccess> Clone for AccessManagerClient<TUser, TGroup, TComponent, TAccess> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            stringifiers: self.stringifiers.clone(),
        }
    }
}

impl<TUser, TGroup, TComponent, TAccess> fmt::Debug
    for AccessManagerClient<TUser, TGroup, TComponent, TAccess>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessManagerClient")
            .field("api_root", &self.api_root().as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<TUser, TGroup, TComponent, TAccess> AccessManagerEventProcessor<TUser, TGroup, TComponent, TAccess>
    for AccessManagerClient<TUser, TGroup, TComponent, TAccess>
where
    TUser: Send + Sync + 'static,
    TGroup: Send + Sync + 'static,
    TComponent: Send + Sync + 'static,
    TAccess: Send + Sync + 'static,
{
    async fn add_user(&self, user: &TUser) -> AccessManagerResult<()> {
        self.inner.add_user(&self.user(user)).await
    }

    async fn remove_user(&self, user: &TUser) -> AccessManagerResult<()> {
        self.inner.remove_user(&self.user(user)).await
    }

    async fn add_group(&self, group: &TGroup) -> AccessManagerResult<()> {
        self.inner.add_group(&self.group(group)).await
    }

    async fn remove_group(&self, group: &TGroup) -> AccessManagerResult<()> {
        self.inner.remove_group(&self.group(group)).await
    }

    async fn add_user_to_group_mapping(&self, user: &TUser, group: &TGroup) -> AccessManagerResult<()> {
        self.inner
            .add_user_to_group_mapping(&self.user(user), &self.group(group))
            .await
    }

    async fn remove_user_to_group_mapping(&self, user: &TUser, group: &TGroup) -> AccessManagerResult<()> {
        self.inner
            .remove_user_to_group_mapping(&self.user(user), &self.group(group))
            .await
    }

    async fn add_group_to_group_mapping(
        &self,
        from_group: &TGroup,
        to_group: &TGroup,
    ) -> AccessManagerResult<()> {
        self.inner
            .add_group_to_group_mapping(&self.group(from_group), &self.group(to_group))
            .await
    }

    async fn remove_group_to_group_mapping(
        &self,
        from_group: &TGroup,
        to_group: &TGroup,
    ) -> AccessManagerResult<()> {
        self.inner
            .remove_group_to_group_mapping(&self.group(from_group), &self.group(to_group))
            .await
    }

    async fn add_user_to_application_component_and_access_level_mapping(
        &self,
        user: &TUser,
        application_component: &TComponent,
        access_level: &TAccess,
    ) -> AccessManagerResult<()> {
        self.inner
            .add_user_to_application_component_and_access_level_mapping(
                &self.user(user),
                &self.component(application_component),
                &self.access_level(access_level),
            )
            .await
    }

    async fn remove_user_to_application_component_and_access_level_mapping(
        &self,
        user: &TUser,
        application_component: &TComponent,
        access_level: &TAccess,
    ) -> AccessManagerResult<()> {
        self.inner
            .remove_user_to_application_component_and_access_level_mapping(
                &self.user(user),
                &self.component(application_component),
                &self.access_level(access_level),
            )
            .await
    }

    async fn add_group_to_application_component_and_access_level_mapping(
        &self,
        group: &TGroup,
        application_component: &TComponent,
        access_level: &TAccess,
    ) -> AccessManagerResult<()> {
        self.inner
            .add_group_to_application_component_and_access_level_mapping(
                &self.group(group),
                &self.component(application_component),
                &self.access_level(access_level),
            )
            .await
    }

    async fn remove_group_to_application_component_and_access_level_mapping(
        &self,
        group: &TGroup,
        application_component: &TComponent,
        access_level: &TAccess,
    ) -> AccessManagerResult<()> {
        self.inner
            .remove_group_to_application_component_and_access_level_mapping(
                &self.group(group),
                &self.component(application_component),
                &self.access_level(access_level),
            )
            .await
    }

    async fn add_entity_type(&self, entity_type: &str) -> AccessManagerResult<()> {
        self.inner.add_entity_type(entity_type).await
    }

    async fn remove_entity_type(&self, entity_type: &str) -> AccessManagerResult<()> {
        self.inner.remove_entity_type(entity_type).await
    }

    async fn add_entity(&self, entity_type: &str, entity: &str) -> AccessManagerResult<()> {
        self.inner.add_entity(entity_type, entity).await
    }

    async fn remove_entity(&self, entity_type: &str, entity: &str) -> AccessManagerResult<()> {
        self.inner.remove_entity(entity_type, entity).await
    }

    async fn add_user_to_entity_mapping(
        &self,
        user: &TUser,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<()> {
        self.inner
            .add_user_to_entity_mapping(&self.user(user), entity_type, entity)
            .await
    }

    async fn remove_user_to_entity_mapping(
        &self,
        user: &TUser,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<()> {
        self.inner
            .remove_user_to_entity_mapping(&self.user(user), entity_type, entity)
            .await
    }

    async fn add_group_to_entity_mapping(
        &self,
        group: &TGroup,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<()> {
        self.inner
            .add_group_to_entity_mapping(&self.group(group), entity_type, entity)
            .await
    }

    async fn remove_group_to_entity_mapping(
        &self,
        group: &TGroup,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<()> {
        self.inner
            .remove_group_to_entity_mapping(&self.group(group), entity_type, entity)
            .await
    }
}

#[async_trait]
impl<TUser, TGroup, TComponent, TAccess> AccessManagerQueryProcessor<TUser, TGroup, TComponent, TAccess>
    for AccessManagerClient<TUser, TGroup, TComponent, TAccess>
where
    TUser: Send + Sync + 'static,
    TGroup: Send + Sync + 'static,
    TComponent: Eq + Hash + Send + Sync + 'static,
    TAccess: Eq + Hash + Send + Sync + 'static,
{
    async fn get_users(&self) -> AccessManagerResult<Vec<TUser>> {
        let raw = self.inner.get_users().await?;
        self.parse_users(&raw)
    }

    async fn get_groups(&self) -> AccessManagerResult<Vec<TGroup>> {
        let raw = self.inner.get_groups().await?;
        self.parse_groups(&raw)
    }

    async fn get_entity_types(&self) -> AccessManagerResult<Vec<String>> {
        self.inner.get_entity_types().await
    }

    async fn contains_user(&self, user: &TUser) -> AccessManagerResult<bool> {
        self.inner.contains_user(&self.user(user)).await
    }

    async fn contains_group(&self, group: &TGroup) -> AccessManagerResult<bool> {
        self.inner.contains_group(&self.group(group)).await
    }

    async fn get_user_to_group_mappings(
        &self,
        user: &TUser,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<TGroup>> {
        let raw = self
            .inner
            .get_user_to_group_mappings(&self.user(user), include_indirect_mappings)
            .await?;
        self.parse_groups(&raw)
    }

    async fn get_group_to_user_mappings(
        &self,
        group: &TGroup,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<TUser>> {
        let raw = self
            .inner
            .get_group_to_user_mappings(&self.group(group), include_indirect_mappings)
            .await?;
        self.parse_users(&raw)
    }

    async fn get_group_to_group_mappings(
        &self,
        group: &TGroup,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<TGroup>> {
        let raw = self
            .inner
            .get_group_to_group_mappings(&self.group(group), include_indirect_mappings)
            .await?;
        self.parse_groups(&raw)
    }

    async fn get_group_to_group_reverse_mappings(
        &self,
        group: &TGroup,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<TGroup>> {
        let raw = self
            .inner
            .get_group_to_group_reverse_mappings(&self.group(group), include_indirect_mappings)
            .await?;
        self.parse_groups(&raw)
    }

    async fn get_user_to_application_component_and_access_level_mappings(
        &self,
        user: &TUser,
    ) -> AccessManagerResult<Vec<ApplicationComponentAndAccessLevel<TComponent, TAccess>>> {
        let raw = self
            .inner
            .get_user_to_application_component_and_access_level_mappings(&self.user(user))
            .await?;
        raw.iter()
            .map(|mapping| self.parse_component_mapping(mapping))
            .collect()
    }

    async fn get_application_component_and_access_level_to_user_mappings(
        &self,
        application_component: &TComponent,
        access_level: &TAccess,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<TUser>> {
        let raw = self
            .inner
            .get_application_component_and_access_level_to_user_mappings(
                &self.component(application_component),
                &self.access_level(access_level),
                include_indirect_mappings,
            )
            .await?;
        self.parse_users(&raw)
    }

    async fn get_group_to_application_component_and_access_level_mappings(
        &self,
        group: &TGroup,
    ) -> AccessManagerResult<Vec<ApplicationComponentAndAccessLevel<TComponent, TAccess>>> {
        let raw = self
            .inner
            .get_group_to_application_component_and_access_level_mappings(&self.group(group))
            .await?;
        raw.iter()
            .map(|mapping| self.parse_component_mapping(mapping))
            .collect()
    }

    async fn get_application_component_and_access_level_to_group_mappings(
        &self,
        application_component: &TComponent,
        access_level: &TAccess,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<TGroup>> {
        let raw = self
            .inner
            .get_application_component_and_access_level_to_group_mappings(
                &self.component(application_component),
                &self.access_level(access_level),
                include_indirect_mappings,
            )
            .await?;
        self.parse_groups(&raw)
    }

    async fn contains_entity_type(&self, entity_type: &str) -> AccessManagerResult<bool> {
        self.inner.contains_entity_type(entity_type).await
    }

    async fn get_entities(&self, entity_type: &str) -> AccessManagerResult<Vec<String>> {
        self.inner.get_entities(entity_type).await
    }

    async fn contains_entity(&self, entity_type: &str, entity: &str) -> AccessManagerResult<bool> {
        self.inner.contains_entity(entity_type, entity).await
    }

    async fn get_user_to_entity_mappings(&self, user: &TUser) -> AccessManagerResult<Vec<EntityTypeAndEntity>> {
        self.inner.get_user_to_entity_mappings(&self.user(user)).await
    }

    async fn get_user_to_entity_mappings_for_type(
        &self,
        user: &TUser,
        entity_type: &str,
    ) -> AccessManagerResult<Vec<String>> {
        self.inner
            .get_user_to_entity_mappings_for_type(&self.user(user), entity_type)
            .await
    }

    async fn get_entity_to_user_mappings(
        &self,
        entity_type: &str,
        entity: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<TUser>> {
        let raw = self
            .inner
            .get_entity_to_user_mappings(entity_type, entity, include_indirect_mappings)
            .await?;
        self.parse_users(&raw)
    }

    async fn get_group_to_entity_mappings(&self, group: &TGroup) -> AccessManagerResult<Vec<EntityTypeAndEntity>> {
        self.inner.get_group_to_entity_mappings(&self.group(group)).await
    }

    async fn get_group_to_entity_mappings_for_type(
        &self,
        group: &TGroup,
        entity_type: &str,
    ) -> AccessManagerResult<Vec<String>> {
        self.inner
            .get_group_to_entity_mappings_for_type(&self.group(group), entity_type)
            .await
    }

    async fn get_entity_to_group_mappings(
        &self,
        entity_type: &str,
        entity: &str,
        include_indirect_mappings: bool,
    ) -> AccessManagerResult<Vec<TGroup>> {
        let raw = self
            .inner
            .get_entity_to_group_mappings(entity_type, entity, include_indirect_mappings)
            .await?;
        self.parse_groups(&raw)
    }

    async fn has_access_to_application_component(
        &self,
        user: &TUser,
        application_component: &TComponent,
        access_level: &TAccess,
    ) -> AccessManagerResult<bool> {
        self.inner
            .has_access_to_application_component(
                &self.user(user),
                &self.component(application_component),
                &self.access_level(access_level),
            )
            .await
    }

    async fn has_access_to_entity(
        &self,
        user: &TUser,
        entity_type: &str,
        entity: &str,
    ) -> AccessManagerResult<bool> {
        self.inner
            .has_access_to_entity(&self.user(user), entity_type, entity)
            .await
    }

    async fn get_application_components_accessible_by_user(
        &self,
        user: &TUser,
    ) -> AccessManagerResult<HashSet<ApplicationComponentAndAccessLevel<TComponent, TAccess>>> {
        let raw = self
            .inner
            .get_application_components_accessible_by_user(&self.user(user))
            .await?;
        raw.iter()
            .map(|mapping| self.parse_component_mapping(mapping))
            .collect()
    }

    async fn get_application_components_accessible_by_group(
        &self,
        group: &TGroup,
    ) -> AccessManagerResult<HashSet<ApplicationComponentAndAccessLevel<TComponent, TAccess>>> {
        let raw = self
            .inner
            .get_application_components_accessible_by_group(&self.group(group))
            .await?;
        raw.iter()
            .map(|mapping| self.parse_component_mapping(mapping))
            .collect()
    }

    async fn get_entities_accessible_by_user(&self, user: &TUser) -> AccessManagerResult<HashSet<EntityTypeAndEntity>> {
        self.inner
            .get_entities_accessible_by_user(&self.user(user))
            .await
    }

    async fn get_entities_of_type_accessible_by_user(
        &self,
        user: &TUser,
        entity_type: &str,
    ) -> AccessManagerResult<HashSet<String>> {
        self.inner
            .get_entities_of_type_accessible_by_user(&self.user(user), entity_type)
            .await
    }

    async fn get_entities_accessible_by_group(
        &self,
        group: &TGroup,
    ) -> AccessManagerResult<HashSet<EntityTypeAndEntity>> {
        self.inner
            .get_entities_accessible_by_group(&self.group(group))
            .await
    }

    async fn get_entities_of_type_accessible_by_group(
        &self,
        group: &TGroup,
        entity_type: &str,
    ) -> AccessManagerResult<HashSet<String>> {
        self.inner
            .get_entities_of_type_accessible_by_group(&self.group(group), entity_type)
            .await
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for identifier conversion around the string client.

    use std::str::FromStr;

    use mockall::predicate::eq;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::{HttpResponse, MockHttpTransport};
    use crate::domain::{DisplayFromStrStringifier, StringUniqueStringifier};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum AccessLevel {
        View,
        Modify,
    }

    impl fmt::Display for AccessLevel {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(match self {
                Self::View => "View",
                Self::Modify => "Modify",
            })
        }
    }

    impl FromStr for AccessLevel {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "View" => Ok(Self::View),
                "Modify" => Ok(Self::Modify),
                other => Err(format!("no access level named '{other}'")),
            }
        }
    }

    type TypedClient = AccessManagerClient<u32, String, String, AccessLevel>;

    #[fixture]
    fn stringifiers() -> ElementStringifiers<u32, String, String, AccessLevel> {
        ElementStringifiers::new(
            DisplayFromStrStringifier::<u32>::new(),
            StringUniqueStringifier,
            StringUniqueStringifier,
            DisplayFromStrStringifier::<AccessLevel>::new(),
        )
    }

    fn client_with(
        transport: MockHttpTransport,
        stringifiers: ElementStringifiers<u32, String, String, AccessLevel>,
    ) -> TypedClient {
        AccessManagerClient::with_transport("http://127.0.0.1:5000/", Arc::new(transport), stringifiers)
            .expect("valid base URL")
    }

    fn url(path: &str) -> Url {
        Url::parse(&format!("http://127.0.0.1:5000/api/v1/{path}")).expect("valid test URL")
    }

    #[rstest]
    #[tokio::test]
    async fn renders_typed_arguments_into_the_path(
        stringifiers: ElementStringifiers<u32, String, String, AccessLevel>,
    ) {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_post()
            .with(eq(url(
                "userToApplicationComponentAndAccessLevelMappings/user/42/applicationComponent/Order%20Screen/accessLevel/Modify",
            )))
            .times(1)
            .return_once(|_| Ok(HttpResponse::new(201, "")));

        client_with(transport, stringifiers)
            .add_user_to_application_component_and_access_level_mapping(
                &42,
                &"Order Screen".to_owned(),
                &AccessLevel::Modify,
            )
            .await
            .expect("mapping should be added");
    }

    #[rstest]
    #[tokio::test]
    async fn parses_returned_identifiers(
        stringifiers: ElementStringifiers<u32, String, String, AccessLevel>,
    ) {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_get()
            .with(eq(url("userToGroupMappings/group/group1?includeIndirectMappings=true")))
            .times(1)
            .return_once(|_| {
                Ok(HttpResponse::new(
                    200,
                    r#"[{"user":"7","group":"group1"},{"user":"11","group":"group1"}]"#,
                ))
            });

        let users = client_with(transport, stringifiers)
            .get_group_to_user_mappings(&"group1".to_owned(), true)
            .await
            .expect("users should parse");
        assert_eq!(users, vec![7, 11]);
    }

    #[rstest]
    #[tokio::test]
    async fn parses_component_mappings_into_typed_pairs(
        stringifiers: ElementStringifiers<u32, String, String, AccessLevel>,
    ) {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_get()
            .with(eq(url(
                "userToApplicationComponentAndAccessLevelMappings/user/42?includeIndirectMappings=true",
            )))
            .times(1)
            .return_once(|_| {
                Ok(HttpResponse::new(
                    200,
                    r#"[
                        {"user":"42","applicationComponent":"Order","accessLevel":"View"},
                        {"user":"42","applicationComponent":"Order","accessLevel":"View"},
                        {"user":"42","applicationComponent":"Summary","accessLevel":"Modify"}
                    ]"#,
                ))
            });

        let accessible = client_with(transport, stringifiers)
            .get_application_components_accessible_by_user(&42)
            .await
            .expect("mappings should parse");
        let expected: HashSet<_> = [
            ApplicationComponentAndAccessLevel::new("Order".to_owned(), AccessLevel::View),
            ApplicationComponentAndAccessLevel::new("Summary".to_owned(), AccessLevel::Modify),
        ]
        .into_iter()
        .collect();
        assert_eq!(accessible, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_identifiers_the_stringifier_cannot_parse(
        stringifiers: ElementStringifiers<u32, String, String, AccessLevel>,
    ) {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_get()
            .times(1)
            .return_once(|_| {
                Ok(HttpResponse::new(
                    200,
                    r#"[{"user":"42","applicationComponent":"Order","accessLevel":"Delete"}]"#,
                ))
            });

        let error = client_with(transport, stringifiers)
            .get_user_to_application_component_and_access_level_mappings(&42)
            .await
            .expect_err("unknown access level should be rejected");
        assert!(
            matches!(error, AccessManagerError::Stringifier(_)),
            "unexpected error: {error:?}",
        );
        assert_eq!(
            error.to_string(),
            "failed to convert 'Delete' to an identifier: no access level named 'Delete'"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn has_access_decodes_a_json_boolean(
        stringifiers: ElementStringifiers<u32, String, String, AccessLevel>,
    ) {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_get()
            .with(eq(url(
                "dataElementAccess/applicationComponent/user/42/applicationComponent/Order/accessLevel/View",
            )))
            .times(1)
            .return_once(|_| Ok(HttpResponse::new(200, "true")));

        let allowed = client_with(transport, stringifiers)
            .has_access_to_application_component(&42, &"Order".to_owned(), &AccessLevel::View)
            .await
            .expect("response should decode");
        assert!(allowed);
    }

    #[rstest]
    fn debug_output_names_the_api_root(stringifiers: ElementStringifiers<u32, String, String, AccessLevel>) {
        let client = client_with(MockHttpTransport::new(), stringifiers);
        let rendered = format!("{client:?}");
        assert!(rendered.contains("http://127.0.0.1:5000/api/v1/"), "{rendered}");
    }
}

//! The typed facade converting caller identifier types on both sides.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use access_manager_client::domain::ports::HttpResponse;
use access_manager_client::test_support::InMemoryAccessManagerService;
use access_manager_client::{
    AccessManagerClient, AccessManagerError, AccessManagerEventProcessor,
    AccessManagerQueryProcessor, ApplicationComponentAndAccessLevel, DisplayFromStrStringifier,
    ElementStringifiers, StringUniqueStringifier, StringifierError, UniqueStringifier,
};
use rstest::{fixture, rstest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Screen {
    Order,
    Settings,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Order => "Order",
            Self::Settings => "Settings",
        })
    }
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "Order" => Ok(Self::Order),
            "Settings" => Ok(Self::Settings),
            other => Err(format!("unknown screen '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Access {
    View,
    Modify,
}

/// Access levels travel in lower case.
struct AccessStringifier;

impl UniqueStringifier<Access> for AccessStringifier {
    fn to_unique_string(&self, value: &Access) -> String {
        match value {
            Access::View => "view".to_owned(),
            Access::Modify => "modify".to_owned(),
        }
    }

    fn from_unique_string(&self, raw: &str) -> Result<Access, StringifierError> {
        match raw {
            "view" => Ok(Access::View),
            "modify" => Ok(Access::Modify),
            other => Err(StringifierError::unrecognised(other, "unknown access level")),
        }
    }
}

type TypedClient = AccessManagerClient<u32, String, Screen, Access>;

#[fixture]
fn service() -> Arc<InMemoryAccessManagerService> {
    Arc::new(InMemoryAccessManagerService::new())
}

fn typed_client(service: &Arc<InMemoryAccessManagerService>) -> TypedClient {
    service
        .client(ElementStringifiers::new(
            DisplayFromStrStringifier::<u32>::new(),
            StringUniqueStringifier,
            DisplayFromStrStringifier::<Screen>::new(),
            AccessStringifier,
        ))
        .expect("client should build")
}

#[rstest]
#[tokio::test]
async fn identifiers_are_rendered_with_their_stringifiers(
    service: Arc<InMemoryAccessManagerService>,
) {
    let client = typed_client(&service);
    client.add_user(&42).await.expect("add user");
    client.add_group(&"admins".to_owned()).await.expect("add group");
    client
        .add_group_to_application_component_and_access_level_mapping(
            &"admins".to_owned(),
            &Screen::Settings,
            &Access::Modify,
        )
        .await
        .expect("grant group");

    let paths: Vec<String> = service
        .requests()
        .iter()
        .map(|request| request.url.path().to_owned())
        .collect();
    assert_eq!(
        paths,
        [
            "/api/v1/users/42",
            "/api/v1/groups/admins",
            "/api/v1/groupToApplicationComponentAndAccessLevelMappings/group/admins/applicationComponent/Settings/accessLevel/modify",
        ]
    );
}

#[rstest]
#[tokio::test]
async fn results_are_parsed_back_into_caller_types(service: Arc<InMemoryAccessManagerService>) {
    let client = typed_client(&service);
    let admins = "admins".to_owned();
    for user in [7, 42] {
        client.add_user(&user).await.expect("add user");
    }
    client.add_group(&admins).await.expect("add group");
    client
        .add_user_to_group_mapping(&42, &admins)
        .await
        .expect("map user");
    client
        .add_user_to_application_component_and_access_level_mapping(&7, &Screen::Order, &Access::View)
        .await
        .expect("grant user");
    client
        .add_group_to_application_component_and_access_level_mapping(
            &admins,
            &Screen::Settings,
            &Access::Modify,
        )
        .await
        .expect("grant group");

    let users: HashSet<u32> = client
        .get_users()
        .await
        .expect("list users")
        .into_iter()
        .collect();
    assert_eq!(users, HashSet::from([7, 42]));
    assert_eq!(
        client
            .get_group_to_user_mappings(&admins, false)
            .await
            .expect("group members"),
        [42]
    );
    assert_eq!(
        client
            .get_application_component_and_access_level_to_user_mappings(
                &Screen::Settings,
                &Access::Modify,
                true,
            )
            .await
            .expect("users with grant"),
        [42]
    );
    assert_eq!(
        client
            .get_application_components_accessible_by_user(&42)
            .await
            .expect("accessible components"),
        HashSet::from([ApplicationComponentAndAccessLevel::new(
            Screen::Settings,
            Access::Modify,
        )])
    );
    assert!(
        client
            .has_access_to_application_component(&7, &Screen::Order, &Access::View)
            .await
            .expect("access check")
    );
    assert!(
        !client
            .has_access_to_application_component(&7, &Screen::Settings, &Access::Modify)
            .await
            .expect("access check")
    );
}

#[rstest]
#[tokio::test]
async fn unrecognised_returned_identifiers_fail_conversion(
    service: Arc<InMemoryAccessManagerService>,
) {
    service.respond_next_with(Ok(HttpResponse::new(200, r#"["7","seven"]"#)));
    let error = typed_client(&service)
        .get_users()
        .await
        .expect_err("'seven' is not a u32");
    assert!(
        matches!(
            &error,
            AccessManagerError::Stringifier(StringifierError::Unrecognised { value, .. }) if value == "seven"
        ),
        "unexpected error: {error:?}",
    );
}

#[rstest]
#[tokio::test]
async fn unrecognised_access_levels_fail_conversion(service: Arc<InMemoryAccessManagerService>) {
    let body = r#"[{"user":"7","applicationComponent":"Order","accessLevel":"delete"}]"#;
    service.respond_next_with(Ok(HttpResponse::new(200, body)));
    let error = typed_client(&service)
        .get_user_to_application_component_and_access_level_mappings(&7)
        .await
        .expect_err("'delete' is not an access level");
    assert_eq!(
        error.to_string(),
        "failed to convert 'delete' to an identifier: unknown access level"
    );
}

#[rstest]
#[tokio::test]
async fn string_client_is_shared_with_the_typed_facade(
    service: Arc<InMemoryAccessManagerService>,
) {
    let client = typed_client(&service);
    client.add_user(&5).await.expect("add user");
    assert!(
        client
            .string_client()
            .contains_user("5")
            .await
            .expect("contains via string client")
    );
    assert_eq!(client.api_root().as_str(), "http://access-manager.test/api/v1/");
}

//! Indirect mappings resolved through a multi-level group hierarchy.
//!
//! The fixture builds users `user1..user12` and groups `group1..group6` with
//! the memberships
//!
//! ```text
//! group1 -> group3 -> group5
//! group1 -> group4 -> group5
//! group2 -> group4 -> group6
//! ```
//!
//! and places `user1`, `user2`, `user3`, and `user4` directly in `group1`,
//! `group2`, `group3`, and `group6` respectively.

use std::collections::HashSet;
use std::sync::Arc;

use access_manager_client::test_support::InMemoryAccessManagerService;
use access_manager_client::{
    AccessManagerStringElementClient, ApplicationComponentAndAccessLevel, EntityTypeAndEntity,
};
use rstest::{fixture, rstest};

fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

fn as_set(items: Vec<String>) -> HashSet<String> {
    items.into_iter().collect()
}

#[fixture]
async fn hierarchy() -> AccessManagerStringElementClient {
    let service = Arc::new(InMemoryAccessManagerService::new());
    let client = service.string_client().expect("client should build");
    for index in 1..=12 {
        client.add_user(&format!("user{index}")).await.expect("add user");
    }
    for index in 1..=6 {
        client.add_group(&format!("group{index}")).await.expect("add group");
    }
    for (from_group, to_group) in [
        ("group1", "group3"),
        ("group3", "group5"),
        ("group1", "group4"),
        ("group4", "group5"),
        ("group4", "group6"),
        ("group2", "group4"),
    ] {
        client
            .add_group_to_group_mapping(from_group, to_group)
            .await
            .expect("map groups");
    }
    for (user, group) in [
        ("user1", "group1"),
        ("user2", "group2"),
        ("user3", "group3"),
        ("user4", "group6"),
    ] {
        client
            .add_user_to_group_mapping(user, group)
            .await
            .expect("map user");
    }
    client
}

#[rstest]
#[tokio::test]
async fn group_to_group_mappings_follow_the_hierarchy(
    #[future] hierarchy: AccessManagerStringElementClient,
) {
    let client = hierarchy.await;

    let indirect = client
        .get_group_to_group_mappings("group2", true)
        .await
        .expect("indirect mappings");
    assert_eq!(as_set(indirect), set(&["group4", "group5", "group6"]));

    let direct = client
        .get_group_to_group_mappings("group2", false)
        .await
        .expect("direct mappings");
    assert_eq!(direct, ["group4"]);
}

#[rstest]
#[tokio::test]
async fn reverse_mappings_follow_the_hierarchy(
    #[future] hierarchy: AccessManagerStringElementClient,
) {
    let client = hierarchy.await;

    let indirect = client
        .get_group_to_group_reverse_mappings("group6", true)
        .await
        .expect("indirect reverse mappings");
    assert_eq!(as_set(indirect), set(&["group1", "group2", "group4"]));

    let direct = client
        .get_group_to_group_reverse_mappings("group5", false)
        .await
        .expect("direct reverse mappings");
    assert_eq!(as_set(direct), set(&["group3", "group4"]));
}

#[rstest]
#[case::direct("user1", false, &["group1"])]
#[case::through_two_levels("user1", true, &["group1", "group3", "group4", "group5", "group6"])]
#[case::through_one_level("user2", true, &["group2", "group4", "group5", "group6"])]
#[case::leaf("user4", true, &["group6"])]
#[case::unmapped("user12", true, &[])]
#[tokio::test]
async fn user_memberships_include_inherited_groups(
    #[future] hierarchy: AccessManagerStringElementClient,
    #[case] user: &str,
    #[case] include_indirect_mappings: bool,
    #[case] expected: &[&str],
) {
    let client = hierarchy.await;
    let groups = client
        .get_user_to_group_mappings(user, include_indirect_mappings)
        .await
        .expect("user mappings");
    assert_eq!(as_set(groups), set(expected));
}

#[rstest]
#[tokio::test]
async fn group_members_include_users_of_nested_groups(
    #[future] hierarchy: AccessManagerStringElementClient,
) {
    let client = hierarchy.await;
    let members = client
        .get_group_to_user_mappings("group5", true)
        .await
        .expect("group members");
    assert_eq!(as_set(members), set(&["user1", "user2", "user3"]));
    assert!(
        client
            .get_group_to_user_mappings("group5", false)
            .await
            .expect("direct members")
            .is_empty()
    );
}

#[rstest]
#[tokio::test]
async fn component_grants_are_inherited_through_groups(
    #[future] hierarchy: AccessManagerStringElementClient,
) {
    let client = hierarchy.await;
    client
        .add_group_to_application_component_and_access_level_mapping("group5", "Order", "View")
        .await
        .expect("grant group5");
    client
        .add_user_to_application_component_and_access_level_mapping("user4", "Summary", "Create")
        .await
        .expect("grant user4");

    assert!(
        client
            .has_access_to_application_component("user3", "Order", "View")
            .await
            .expect("access check")
    );
    assert!(
        !client
            .has_access_to_application_component("user4", "Order", "View")
            .await
            .expect("access check")
    );

    let users = client
        .get_application_component_and_access_level_to_user_mappings("Order", "View", true)
        .await
        .expect("users with grant");
    assert_eq!(as_set(users), set(&["user1", "user2", "user3"]));
    let groups = client
        .get_application_component_and_access_level_to_group_mappings("Order", "View", true)
        .await
        .expect("groups with grant");
    assert_eq!(
        as_set(groups),
        set(&["group1", "group2", "group3", "group4", "group5"])
    );

    assert_eq!(
        client
            .get_application_components_accessible_by_user("user2")
            .await
            .expect("accessible components"),
        HashSet::from([ApplicationComponentAndAccessLevel::new(
            "Order".to_owned(),
            "View".to_owned(),
        )])
    );
    assert_eq!(
        client
            .get_user_to_application_component_and_access_level_mappings("user4")
            .await
            .expect("direct grants"),
        [ApplicationComponentAndAccessLevel::new(
            "Summary".to_owned(),
            "Create".to_owned(),
        )]
    );
}

#[rstest]
#[tokio::test]
async fn entity_grants_are_inherited_through_groups(
    #[future] hierarchy: AccessManagerStringElementClient,
) {
    let client = hierarchy.await;
    client.add_entity_type("ClientAccount").await.expect("add type");
    client.add_entity_type("BusinessUnit").await.expect("add type");
    client.add_entity("ClientAccount", "Company1").await.expect("add entity");
    client.add_entity("BusinessUnit", "Sales").await.expect("add entity");
    client
        .add_group_to_entity_mapping("group6", "ClientAccount", "Company1")
        .await
        .expect("grant group6");
    client
        .add_group_to_entity_mapping("group4", "BusinessUnit", "Sales")
        .await
        .expect("grant group4");

    assert!(
        client
            .has_access_to_entity("user2", "ClientAccount", "Company1")
            .await
            .expect("access check")
    );
    assert!(
        !client
            .has_access_to_entity("user3", "ClientAccount", "Company1")
            .await
            .expect("access check")
    );

    assert_eq!(
        client
            .get_entities_accessible_by_user("user1")
            .await
            .expect("accessible entities"),
        HashSet::from([
            EntityTypeAndEntity::new("ClientAccount", "Company1"),
            EntityTypeAndEntity::new("BusinessUnit", "Sales"),
        ])
    );
    assert_eq!(
        client
            .get_entities_of_type_accessible_by_group("group2", "BusinessUnit")
            .await
            .expect("accessible entities of type"),
        HashSet::from(["Sales".to_owned()])
    );
    assert!(
        client
            .get_group_to_entity_mappings("group2")
            .await
            .expect("direct entity grants")
            .is_empty()
    );

    let groups = client
        .get_entity_to_group_mappings("ClientAccount", "Company1", true)
        .await
        .expect("groups with entity");
    assert_eq!(as_set(groups), set(&["group1", "group2", "group4", "group6"]));
    let users = client
        .get_entity_to_user_mappings("ClientAccount", "Company1", true)
        .await
        .expect("users with entity");
    assert_eq!(as_set(users), set(&["user1", "user2", "user4"]));
}

#[rstest]
#[tokio::test]
async fn removing_a_group_detaches_its_descendants(
    #[future] hierarchy: AccessManagerStringElementClient,
) {
    let client = hierarchy.await;
    client.remove_group("group4").await.expect("remove group4");

    let reachable = client
        .get_group_to_group_mappings("group2", true)
        .await
        .expect("indirect mappings");
    assert!(reachable.is_empty());
    assert!(!client.contains_group("group4").await.expect("contains"));
}

//! Request routing for the in-memory service.
//!
//! Each route mutates or reads the [`PermissionGraph`] and answers with the
//! statuses and JSON shapes the real service uses: `201` for creation, `200`
//! for reads and removals, `404` with a structured error for missing
//! elements, and `400` for invalid requests.

use std::collections::BTreeSet;

use serde_json::{Value, json};

use super::graph::{ComponentGrant, EntityGrant, PermissionGraph};
use crate::domain::ElementKind;
use crate::domain::ports::{HttpMethod, HttpResponse};

/// A successful reply.
enum Reply {
    Created,
    Done,
    Json(Value),
}

/// A failed reply with its status and body.
struct Rejection {
    status: u16,
    body: String,
}

type Outcome = Result<Reply, Rejection>;

/// A decoded request against the API root.
pub(super) struct Request<'a> {
    pub(super) method: HttpMethod,
    pub(super) segments: &'a [&'a str],
    pub(super) include_indirect_mappings: bool,
}

/// Route `request` and render the response.
pub(super) fn respond(graph: &mut PermissionGraph, request: &Request<'_>) -> HttpResponse {
    match route(graph, request) {
        Ok(Reply::Created) => HttpResponse::new(201, ""),
        Ok(Reply::Done) => HttpResponse::new(200, ""),
        Ok(Reply::Json(value)) => HttpResponse::new(200, value.to_string()),
        Err(rejection) => HttpResponse::new(rejection.status, rejection.body),
    }
}

/// Plain-text `400` for a request the service cannot interpret.
pub(super) fn bad_request(description: &str) -> HttpResponse {
    HttpResponse::new(400, format!("Unrecognised request '{description}'."))
}

fn route(graph: &mut PermissionGraph, request: &Request<'_>) -> Outcome {
    use HttpMethod::{Delete, Get, Post};

    let indirect = request.include_indirect_mappings;
    match (request.method, request.segments) {
        (Get, ["users"]) => Ok(list(&graph.users)),
        (Post, ["users", user]) => add_element(&mut graph.users, ElementKind::User, user),
        (Get, ["users", user]) => contains(graph.users.contains(*user), user),
        (Delete, ["users", user]) => {
            require(&graph.users, ElementKind::User, user)?;
            graph.remove_user(user);
            Ok(Reply::Done)
        }
        (Get, ["groups"]) => Ok(list(&graph.groups)),
        (Post, ["groups", group]) => add_element(&mut graph.groups, ElementKind::Group, group),
        (Get, ["groups", group]) => contains(graph.groups.contains(*group), group),
        (Delete, ["groups", group]) => {
            require(&graph.groups, ElementKind::Group, group)?;
            graph.remove_group(group);
            Ok(Reply::Done)
        }
        (method, ["userToGroupMappings", rest @ ..]) => {
            user_to_group_route(graph, method, rest, indirect)
        }
        (method, ["groupToGroupMappings", rest @ ..]) => {
            group_to_group_route(graph, method, rest, indirect)
        }
        (Get, ["groupToGroupReverseMappings", "group", group]) => {
            require(&graph.groups, ElementKind::Group, group)?;
            let from_groups = graph.groups_in_group(group, indirect);
            Ok(Reply::Json(Value::Array(
                from_groups
                    .iter()
                    .map(|from| json!({ "fromGroup": from, "toGroup": group }))
                    .collect(),
            )))
        }
        (method, ["userToApplicationComponentAndAccessLevelMappings", rest @ ..]) => {
            component_route(graph, Holder::User, method, rest, indirect)
        }
        (method, ["groupToApplicationComponentAndAccessLevelMappings", rest @ ..]) => {
            component_route(graph, Holder::Group, method, rest, indirect)
        }
        (method, ["userToEntityMappings", rest @ ..]) => {
            entity_mapping_route(graph, Holder::User, method, rest, indirect)
        }
        (method, ["groupToEntityMappings", rest @ ..]) => {
            entity_mapping_route(graph, Holder::Group, method, rest, indirect)
        }
        (method, ["entityTypes", rest @ ..]) => entity_type_route(graph, method, rest),
        (
            Get,
            [
                "dataElementAccess",
                "applicationComponent",
                "user",
                user,
                "applicationComponent",
                component,
                "accessLevel",
                access_level,
            ],
        ) => {
            require(&graph.users, ElementKind::User, user)?;
            let grant = ((*component).to_owned(), (*access_level).to_owned());
            Ok(Reply::Json(Value::Bool(
                graph.user_component_grants(user, true).contains(&grant),
            )))
        }
        (
            Get,
            ["dataElementAccess", "entity", "user", user, "entityType", entity_type, "entity", entity],
        ) => {
            require(&graph.users, ElementKind::User, user)?;
            let grant = ((*entity_type).to_owned(), (*entity).to_owned());
            Ok(Reply::Json(Value::Bool(
                graph.user_entity_grants(user, true).contains(&grant),
            )))
        }
        _ => Err(unrecognised(request)),
    }
}

fn user_to_group_route(
    graph: &mut PermissionGraph,
    method: HttpMethod,
    segments: &[&str],
    indirect: bool,
) -> Outcome {
    match (method, segments) {
        (HttpMethod::Post, ["user", user, "group", group]) => {
            require(&graph.users, ElementKind::User, user)?;
            require(&graph.groups, ElementKind::Group, group)?;
            insert_mapping(
                &mut graph.user_to_group,
                ((*user).to_owned(), (*group).to_owned()),
                &format!("user '{user}' to group '{group}'"),
            )
        }
        (HttpMethod::Delete, ["user", user, "group", group]) => remove_mapping(
            &mut graph.user_to_group,
            &((*user).to_owned(), (*group).to_owned()),
            &format!("{user}/{group}"),
        ),
        (HttpMethod::Get, ["user", user]) => {
            require(&graph.users, ElementKind::User, user)?;
            let groups = graph.groups_for_user_query(user, indirect);
            Ok(Reply::Json(Value::Array(
                groups
                    .iter()
                    .map(|group| json!({ "user": user, "group": group }))
                    .collect(),
            )))
        }
        (HttpMethod::Get, ["group", group]) => {
            require(&graph.groups, ElementKind::Group, group)?;
            let users = graph.users_in_group(group, indirect);
            Ok(Reply::Json(Value::Array(
                users
                    .iter()
                    .map(|user| json!({ "user": user, "group": group }))
                    .collect(),
            )))
        }
        _ => Err(unrecognised_segments(method, "userToGroupMappings", segments)),
    }
}

fn group_to_group_route(
    graph: &mut PermissionGraph,
    method: HttpMethod,
    segments: &[&str],
    indirect: bool,
) -> Outcome {
    match (method, segments) {
        (HttpMethod::Post, ["fromGroup", from, "toGroup", to]) => {
            require(&graph.groups, ElementKind::Group, from)?;
            require(&graph.groups, ElementKind::Group, to)?;
            if graph.creates_cycle(from, to) {
                return Err(rejection(
                    400,
                    "CircularReferenceException",
                    &format!(
                        "A mapping between groups '{from}' and '{to}' cannot be created as it would cause a circular reference."
                    ),
                    &[("FromGroup", *from), ("ToGroup", *to)],
                ));
            }
            insert_mapping(
                &mut graph.group_to_group,
                ((*from).to_owned(), (*to).to_owned()),
                &format!("group '{from}' to group '{to}'"),
            )
        }
        (HttpMethod::Delete, ["fromGroup", from, "toGroup", to]) => remove_mapping(
            &mut graph.group_to_group,
            &((*from).to_owned(), (*to).to_owned()),
            &format!("{from}/{to}"),
        ),
        (HttpMethod::Get, ["group", group]) => {
            require(&graph.groups, ElementKind::Group, group)?;
            let to_groups = graph.groups_of_group(group, indirect);
            Ok(Reply::Json(Value::Array(
                to_groups
                    .iter()
                    .map(|to| json!({ "fromGroup": group, "toGroup": to }))
                    .collect(),
            )))
        }
        _ => Err(unrecognised_segments(method, "groupToGroupMappings", segments)),
    }
}

/// Which side of a grant a mapping collection addresses.
#[derive(Clone, Copy)]
enum Holder {
    User,
    Group,
}

impl Holder {
    const fn key(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
        }
    }

    const fn kind(self) -> ElementKind {
        match self {
            Self::User => ElementKind::User,
            Self::Group => ElementKind::Group,
        }
    }

    const fn members(self, graph: &PermissionGraph) -> &BTreeSet<String> {
        match self {
            Self::User => &graph.users,
            Self::Group => &graph.groups,
        }
    }

    const fn component_grants(self, graph: &mut PermissionGraph) -> &mut BTreeSet<ComponentGrant> {
        match self {
            Self::User => &mut graph.user_components,
            Self::Group => &mut graph.group_components,
        }
    }

    const fn entity_grants(self, graph: &mut PermissionGraph) -> &mut BTreeSet<EntityGrant> {
        match self {
            Self::User => &mut graph.user_entities,
            Self::Group => &mut graph.group_entities,
        }
    }
}

fn component_route(
    graph: &mut PermissionGraph,
    holder: Holder,
    method: HttpMethod,
    segments: &[&str],
    indirect: bool,
) -> Outcome {
    let key = holder.key();
    match (method, segments) {
        (HttpMethod::Post, [name, id, "applicationComponent", component, "accessLevel", access_level])
            if *name == key =>
        {
            require(holder.members(graph), holder.kind(), id)?;
            insert_mapping(
                holder.component_grants(graph),
                ((*id).to_owned(), (*component).to_owned(), (*access_level).to_owned()),
                &format!("{key} '{id}' to application component '{component}' at access level '{access_level}'"),
            )
        }
        (HttpMethod::Delete, [name, id, "applicationComponent", component, "accessLevel", access_level])
            if *name == key =>
        {
            remove_mapping(
                holder.component_grants(graph),
                &((*id).to_owned(), (*component).to_owned(), (*access_level).to_owned()),
                &format!("{id}/{component}/{access_level}"),
            )
        }
        (HttpMethod::Get, [name, id]) if *name == key => {
            require(holder.members(graph), holder.kind(), id)?;
            let grants = match holder {
                Holder::User => graph.user_component_grants(id, indirect),
                Holder::Group => graph.group_component_grants(id, indirect),
            };
            Ok(Reply::Json(Value::Array(
                grants
                    .iter()
                    .map(|(component, access_level)| {
                        json!({
                            key: id,
                            "applicationComponent": component,
                            "accessLevel": access_level,
                        })
                    })
                    .collect(),
            )))
        }
        (HttpMethod::Get, ["applicationComponent", component, "accessLevel", access_level]) => {
            let holders = match holder {
                Holder::User => graph.users_granted(
                    &graph.user_components,
                    &graph.group_components,
                    component,
                    access_level,
                    indirect,
                ),
                Holder::Group => {
                    graph.groups_granted(&graph.group_components, component, access_level, indirect)
                }
            };
            Ok(Reply::Json(Value::Array(
                holders
                    .iter()
                    .map(|id| {
                        json!({
                            key: id,
                            "applicationComponent": component,
                            "accessLevel": access_level,
                        })
                    })
                    .collect(),
            )))
        }
        _ => Err(unrecognised_segments(method, "applicationComponentAndAccessLevelMappings", segments)),
    }
}

fn entity_mapping_route(
    graph: &mut PermissionGraph,
    holder: Holder,
    method: HttpMethod,
    segments: &[&str],
    indirect: bool,
) -> Outcome {
    let key = holder.key();
    match (method, segments) {
        (HttpMethod::Post, [name, id, "entityType", entity_type, "entity", entity]) if *name == key => {
            require(holder.members(graph), holder.kind(), id)?;
            require_entity(graph, entity_type, entity)?;
            insert_mapping(
                holder.entity_grants(graph),
                ((*id).to_owned(), (*entity_type).to_owned(), (*entity).to_owned()),
                &format!("{key} '{id}' to entity '{entity}' of type '{entity_type}'"),
            )
        }
        (HttpMethod::Delete, [name, id, "entityType", entity_type, "entity", entity])
            if *name == key =>
        {
            remove_mapping(
                holder.entity_grants(graph),
                &((*id).to_owned(), (*entity_type).to_owned(), (*entity).to_owned()),
                &format!("{id}/{entity_type}/{entity}"),
            )
        }
        (HttpMethod::Get, [name, id]) if *name == key => {
            require(holder.members(graph), holder.kind(), id)?;
            let grants = entity_grants_of(graph, holder, id, indirect);
            Ok(entity_grant_reply(key, id, grants.iter()))
        }
        (HttpMethod::Get, [name, id, "entityType", entity_type]) if *name == key => {
            require(holder.members(graph), holder.kind(), id)?;
            require_entity_type(graph, entity_type)?;
            let grants = entity_grants_of(graph, holder, id, indirect);
            Ok(entity_grant_reply(
                key,
                id,
                grants.iter().filter(|(granted_type, _)| granted_type.as_str() == *entity_type),
            ))
        }
        (HttpMethod::Get, ["entityType", entity_type, "entity", entity]) => {
            let holders = match holder {
                Holder::User => graph.users_granted(
                    &graph.user_entities,
                    &graph.group_entities,
                    entity_type,
                    entity,
                    indirect,
                ),
                Holder::Group => {
                    graph.groups_granted(&graph.group_entities, entity_type, entity, indirect)
                }
            };
            Ok(Reply::Json(Value::Array(
                holders
                    .iter()
                    .map(|id| json!({ key: id, "entityType": entity_type, "entity": entity }))
                    .collect(),
            )))
        }
        _ => Err(unrecognised_segments(method, "entityMappings", segments)),
    }
}

fn entity_grants_of(
    graph: &PermissionGraph,
    holder: Holder,
    id: &str,
    indirect: bool,
) -> BTreeSet<(String, String)> {
    match holder {
        Holder::User => graph.user_entity_grants(id, indirect),
        Holder::Group => graph.group_entity_grants(id, indirect),
    }
}

fn entity_grant_reply<'a>(
    key: &str,
    id: &str,
    grants: impl Iterator<Item = &'a (String, String)>,
) -> Reply {
    Reply::Json(Value::Array(
        grants
            .map(|(entity_type, entity)| json!({ key: id, "entityType": entity_type, "entity": entity }))
            .collect(),
    ))
}

fn entity_type_route(graph: &mut PermissionGraph, method: HttpMethod, segments: &[&str]) -> Outcome {
    match (method, segments) {
        (HttpMethod::Get, []) => Ok(Reply::Json(json!(
            graph.entity_types.keys().collect::<Vec<_>>()
        ))),
        (HttpMethod::Post, [entity_type]) => {
            if graph.entity_types.contains_key(*entity_type) {
                return Err(already_exists(ElementKind::EntityType, entity_type));
            }
            graph
                .entity_types
                .insert((*entity_type).to_owned(), BTreeSet::new());
            Ok(Reply::Created)
        }
        (HttpMethod::Get, [entity_type]) => {
            contains(graph.entity_types.contains_key(*entity_type), entity_type)
        }
        (HttpMethod::Delete, [entity_type]) => {
            require_entity_type(graph, entity_type)?;
            graph.remove_entity_type(entity_type);
            Ok(Reply::Done)
        }
        (HttpMethod::Get, [entity_type, "entities"]) => {
            let entities = graph
                .entity_types
                .get(*entity_type)
                .ok_or_else(|| element_not_found(ElementKind::EntityType, entity_type))?;
            Ok(list(entities))
        }
        (HttpMethod::Post, [entity_type, "entities", entity]) => {
            let entities = graph
                .entity_types
                .get_mut(*entity_type)
                .ok_or_else(|| element_not_found(ElementKind::EntityType, entity_type))?;
            if !entities.insert((*entity).to_owned()) {
                return Err(already_exists(ElementKind::Entity, entity));
            }
            Ok(Reply::Created)
        }
        (HttpMethod::Get, [entity_type, "entities", entity]) => {
            contains(graph.contains_entity(entity_type, entity), entity)
        }
        (HttpMethod::Delete, [entity_type, "entities", entity]) => {
            require_entity(graph, entity_type, entity)?;
            graph.remove_entity(entity_type, entity);
            Ok(Reply::Done)
        }
        _ => Err(unrecognised_segments(method, "entityTypes", segments)),
    }
}

fn list(items: &BTreeSet<String>) -> Reply {
    Reply::Json(json!(items))
}

fn add_element(members: &mut BTreeSet<String>, kind: ElementKind, id: &str) -> Outcome {
    if members.insert(id.to_owned()) {
        Ok(Reply::Created)
    } else {
        Err(already_exists(kind, id))
    }
}

fn contains(present: bool, resource_id: &str) -> Outcome {
    if present {
        Ok(Reply::Done)
    } else {
        Err(rejection(
            404,
            "NotFoundException",
            &format!("Resource '{resource_id}' not found."),
            &[("ResourceId", resource_id)],
        ))
    }
}

fn require(members: &BTreeSet<String>, kind: ElementKind, id: &str) -> Result<(), Rejection> {
    if members.contains(id) {
        Ok(())
    } else {
        Err(element_not_found(kind, id))
    }
}

fn require_entity_type(graph: &PermissionGraph, entity_type: &str) -> Result<(), Rejection> {
    if graph.entity_types.contains_key(entity_type) {
        Ok(())
    } else {
        Err(element_not_found(ElementKind::EntityType, entity_type))
    }
}

fn require_entity(graph: &PermissionGraph, entity_type: &str, entity: &str) -> Result<(), Rejection> {
    require_entity_type(graph, entity_type)?;
    if graph.contains_entity(entity_type, entity) {
        Ok(())
    } else {
        Err(element_not_found(ElementKind::Entity, entity))
    }
}

fn insert_mapping<T: Ord>(mappings: &mut BTreeSet<T>, mapping: T, description: &str) -> Outcome {
    if mappings.insert(mapping) {
        Ok(Reply::Created)
    } else {
        Err(rejection(
            400,
            "ArgumentException",
            &format!("A mapping between {description} already exists."),
            &[],
        ))
    }
}

fn remove_mapping<T: Ord>(mappings: &mut BTreeSet<T>, mapping: &T, resource_id: &str) -> Outcome {
    if mappings.remove(mapping) {
        Ok(Reply::Done)
    } else {
        Err(rejection(
            404,
            "NotFoundException",
            &format!("Mapping '{resource_id}' not found."),
            &[("ResourceId", resource_id)],
        ))
    }
}

const fn parameter_name(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::User => "user",
        ElementKind::Group => "group",
        ElementKind::EntityType => "entityType",
        ElementKind::Entity => "entity",
    }
}

fn element_not_found(kind: ElementKind, id: &str) -> Rejection {
    let parameter = parameter_name(kind);
    rejection(
        404,
        kind.not_found_code(),
        &format!("{kind} '{id}' does not exist. (Parameter '{parameter}')"),
        &[("ParameterName", parameter), (kind.resource_id_attribute(), id)],
    )
}

fn already_exists(kind: ElementKind, id: &str) -> Rejection {
    let parameter = parameter_name(kind);
    rejection(
        400,
        "ArgumentException",
        &format!("{kind} '{id}' already exists. (Parameter '{parameter}')"),
        &[("ParameterName", parameter)],
    )
}

/// Build an error reply in the service's wrapped envelope.
fn rejection(status: u16, code: &str, message: &str, attributes: &[(&str, &str)]) -> Rejection {
    let pairs: Vec<Value> = attributes
        .iter()
        .map(|(name, value)| json!({ "name": name, "value": value }))
        .collect();
    let body = json!({
        "error": {
            "code": code,
            "message": message,
            "attributes": pairs,
        }
    });
    Rejection {
        status,
        body: body.to_string(),
    }
}

fn unrecognised(request: &Request<'_>) -> Rejection {
    unrecognised_segments(request.method, "", request.segments)
}

fn unrecognised_segments(method: HttpMethod, collection: &str, segments: &[&str]) -> Rejection {
    let path = if collection.is_empty() {
        segments.join("/")
    } else {
        format!("{collection}/{}", segments.join("/"))
    };
    let response = bad_request(&format!("{method} {path}"));
    Rejection {
        status: response.status,
        body: response.body.unwrap_or_default(),
    }
}

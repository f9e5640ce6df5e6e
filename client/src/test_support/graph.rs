//! Permission graph held by the in-memory service.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// A principal together with an application component grant.
pub(super) type ComponentGrant = (String, String, String);

/// A principal together with an entity grant.
pub(super) type EntityGrant = (String, String, String);

/// Users, groups, entities, and every mapping between them.
#[derive(Debug, Default)]
pub(super) struct PermissionGraph {
    pub(super) users: BTreeSet<String>,
    pub(super) groups: BTreeSet<String>,
    /// `(user, group)` memberships.
    pub(super) user_to_group: BTreeSet<(String, String)>,
    /// `(from_group, to_group)` memberships.
    pub(super) group_to_group: BTreeSet<(String, String)>,
    pub(super) user_components: BTreeSet<ComponentGrant>,
    pub(super) group_components: BTreeSet<ComponentGrant>,
    /// Entity type to its entities.
    pub(super) entity_types: BTreeMap<String, BTreeSet<String>>,
    pub(super) user_entities: BTreeSet<EntityGrant>,
    pub(super) group_entities: BTreeSet<EntityGrant>,
}

impl PermissionGraph {
    pub(super) fn contains_entity(&self, entity_type: &str, entity: &str) -> bool {
        self.entity_types
            .get(entity_type)
            .is_some_and(|entities| entities.contains(entity))
    }

    /// Groups `user` belongs to directly.
    pub(super) fn direct_groups_of_user(&self, user: &str) -> BTreeSet<String> {
        self.user_to_group
            .iter()
            .filter(|(member, _)| member == user)
            .map(|(_, group)| group.clone())
            .collect()
    }

    /// Groups reachable from `starts` through group memberships, including
    /// the starting groups themselves.
    pub(super) fn reachable_groups(&self, starts: &BTreeSet<String>) -> BTreeSet<String> {
        self.walk(starts, |(from, to)| (from, to))
    }

    /// Groups from which one of `targets` is reachable, including the
    /// targets themselves.
    pub(super) fn groups_reaching(&self, targets: &BTreeSet<String>) -> BTreeSet<String> {
        self.walk(targets, |(from, to)| (to, from))
    }

    fn walk<'a>(
        &'a self,
        starts: &BTreeSet<String>,
        orient: impl Fn((&'a String, &'a String)) -> (&'a String, &'a String),
    ) -> BTreeSet<String> {
        let mut seen = starts.clone();
        let mut queue: VecDeque<String> = starts.iter().cloned().collect();
        while let Some(current) = queue.pop_front() {
            for (from, to) in &self.group_to_group {
                let (source, target) = orient((from, to));
                if *source == current && seen.insert(target.clone()) {
                    queue.push_back(target.clone());
                }
            }
        }
        seen
    }

    /// Groups `user` belongs to, directly or through the hierarchy.
    pub(super) fn effective_groups_of_user(&self, user: &str) -> BTreeSet<String> {
        self.reachable_groups(&self.direct_groups_of_user(user))
    }

    /// Groups `group` belongs to, excluding itself unless `indirect` adds
    /// it through a cycle.
    pub(super) fn groups_of_group(&self, group: &str, indirect: bool) -> BTreeSet<String> {
        let direct: BTreeSet<String> = self
            .group_to_group
            .iter()
            .filter(|(from, _)| from == group)
            .map(|(_, to)| to.clone())
            .collect();
        if indirect {
            self.reachable_groups(&direct)
        } else {
            direct
        }
    }

    /// Groups belonging to `group`.
    pub(super) fn groups_in_group(&self, group: &str, indirect: bool) -> BTreeSet<String> {
        let direct: BTreeSet<String> = self
            .group_to_group
            .iter()
            .filter(|(_, to)| to == group)
            .map(|(from, _)| from.clone())
            .collect();
        if indirect {
            self.groups_reaching(&direct)
        } else {
            direct
        }
    }

    /// Groups a user-side query should consider for `user`.
    pub(super) fn groups_for_user_query(&self, user: &str, indirect: bool) -> BTreeSet<String> {
        if indirect {
            self.effective_groups_of_user(user)
        } else {
            self.direct_groups_of_user(user)
        }
    }

    /// Users who belong to any of `groups` directly.
    pub(super) fn users_in_any(&self, groups: &BTreeSet<String>) -> BTreeSet<String> {
        self.user_to_group
            .iter()
            .filter(|(_, group)| groups.contains(group))
            .map(|(user, _)| user.clone())
            .collect()
    }

    /// Users belonging to `group`, optionally through nested groups.
    pub(super) fn users_in_group(&self, group: &str, indirect: bool) -> BTreeSet<String> {
        let single = BTreeSet::from([group.to_owned()]);
        let groups = if indirect {
            self.groups_reaching(&single)
        } else {
            single
        };
        self.users_in_any(&groups)
    }

    /// Would adding `from -> to` close a cycle?
    pub(super) fn creates_cycle(&self, from: &str, to: &str) -> bool {
        from == to
            || self
                .reachable_groups(&BTreeSet::from([to.to_owned()]))
                .contains(from)
    }

    /// `(component, access_level)` pairs granted to `user`, optionally
    /// through its groups.
    pub(super) fn user_component_grants(&self, user: &str, indirect: bool) -> BTreeSet<(String, String)> {
        let mut grants = grants_of(&self.user_components, user);
        if indirect {
            for group in self.effective_groups_of_user(user) {
                grants.extend(grants_of(&self.group_components, &group));
            }
        }
        grants
    }

    /// `(component, access_level)` pairs granted to `group`, optionally
    /// through the groups it belongs to.
    pub(super) fn group_component_grants(&self, group: &str, indirect: bool) -> BTreeSet<(String, String)> {
        let groups = self.group_with_ancestors(group, indirect);
        groups
            .iter()
            .flat_map(|member| grants_of(&self.group_components, member))
            .collect()
    }

    /// `(entity_type, entity)` pairs granted to `user`, optionally through
    /// its groups.
    pub(super) fn user_entity_grants(&self, user: &str, indirect: bool) -> BTreeSet<(String, String)> {
        let mut grants = grants_of(&self.user_entities, user);
        if indirect {
            for group in self.effective_groups_of_user(user) {
                grants.extend(grants_of(&self.group_entities, &group));
            }
        }
        grants
    }

    /// `(entity_type, entity)` pairs granted to `group`, optionally through
    /// the groups it belongs to.
    pub(super) fn group_entity_grants(&self, group: &str, indirect: bool) -> BTreeSet<(String, String)> {
        let groups = self.group_with_ancestors(group, indirect);
        groups
            .iter()
            .flat_map(|member| grants_of(&self.group_entities, member))
            .collect()
    }

    /// Users holding a grant, optionally through their groups.
    pub(super) fn users_granted(
        &self,
        user_grants: &BTreeSet<(String, String, String)>,
        group_grants: &BTreeSet<(String, String, String)>,
        first: &str,
        second: &str,
        indirect: bool,
    ) -> BTreeSet<String> {
        let mut users = holders_of(user_grants, first, second);
        if indirect {
            let granted_groups = holders_of(group_grants, first, second);
            users.extend(self.users_in_any(&self.groups_reaching(&granted_groups)));
        }
        users
    }

    /// Groups holding a grant, optionally through the groups they belong to.
    pub(super) fn groups_granted(
        &self,
        group_grants: &BTreeSet<(String, String, String)>,
        first: &str,
        second: &str,
        indirect: bool,
    ) -> BTreeSet<String> {
        let granted = holders_of(group_grants, first, second);
        if indirect {
            self.groups_reaching(&granted)
        } else {
            granted
        }
    }

    fn group_with_ancestors(&self, group: &str, indirect: bool) -> BTreeSet<String> {
        let single = BTreeSet::from([group.to_owned()]);
        if indirect {
            self.reachable_groups(&single)
        } else {
            single
        }
    }

    /// Remove a user and everything that references it.
    pub(super) fn remove_user(&mut self, user: &str) {
        self.users.remove(user);
        self.user_to_group.retain(|(member, _)| member != user);
        self.user_components.retain(|(holder, _, _)| holder != user);
        self.user_entities.retain(|(holder, _, _)| holder != user);
    }

    /// Remove a group and everything that references it.
    pub(super) fn remove_group(&mut self, group: &str) {
        self.groups.remove(group);
        self.user_to_group.retain(|(_, member_of)| member_of != group);
        self.group_to_group
            .retain(|(from, to)| from != group && to != group);
        self.group_components.retain(|(holder, _, _)| holder != group);
        self.group_entities.retain(|(holder, _, _)| holder != group);
    }

    /// Remove an entity type, its entities, and every grant to them.
    pub(super) fn remove_entity_type(&mut self, entity_type: &str) {
        self.entity_types.remove(entity_type);
        self.user_entities.retain(|(_, kind, _)| kind != entity_type);
        self.group_entities.retain(|(_, kind, _)| kind != entity_type);
    }

    /// Remove one entity and every grant to it.
    pub(super) fn remove_entity(&mut self, entity_type: &str, entity: &str) {
        if let Some(entities) = self.entity_types.get_mut(entity_type) {
            entities.remove(entity);
        }
        let matches = |kind: &String, name: &String| kind == entity_type && name == entity;
        self.user_entities.retain(|(_, kind, name)| !matches(kind, name));
        self.group_entities.retain(|(_, kind, name)| !matches(kind, name));
    }
}

fn grants_of(grants: &BTreeSet<(String, String, String)>, holder: &str) -> BTreeSet<(String, String)> {
    grants
        .iter()
        .filter(|(principal, _, _)| principal == holder)
        .map(|(_, first, second)| (first.clone(), second.clone()))
        .collect()
}

fn holders_of(grants: &BTreeSet<(String, String, String)>, first: &str, second: &str) -> BTreeSet<String> {
    grants
        .iter()
        .filter(|(_, granted_first, granted_second)| granted_first == first && granted_second == second)
        .map(|(principal, _, _)| principal.clone())
        .collect()
}

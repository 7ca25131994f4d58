//! Pairwise collision filtering, based off
//! https://rapier.rs/docs/user_guides/bevy_plugin/advanced_collision_detection/#contact-and-intersection-filtering

use bevy::{
    ecs::system::SystemParam,
    prelude::*,
};
use bevy_rapier3d::{
    geometry::SolverFlags,
    pipeline::{BevyPhysicsHooks, PairFilterContextView},
    prelude::ActiveHooks,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
/// Indicates that this entity cannot be collided with.
/// This should be used with [`CollisionBlacklist`]
pub struct CollisionBlacklistedEntity {
    /// The entity to not collide with
    pub entity: Entity,
    /// If this is true, when an entity is hit the parent(s) of that
    /// entity will be searched and checked if they match this entity.
    ///
    /// Vehicles are rarely collided with directly, but rather through their collider children.
    pub search_parents: bool,
}

impl CollisionBlacklistedEntity {
    fn matches(&self, mut entity_checking: Entity, q_parent: &Query<&ChildOf>) -> bool {
        if self.entity == entity_checking {
            return true;
        }

        if !self.search_parents {
            return false;
        }

        while let Ok(child_of) = q_parent.get(entity_checking) {
            entity_checking = child_of.parent();
            if self.entity == entity_checking {
                return true;
            }
        }

        false
    }
}

#[derive(Component, Debug, Clone, Default, PartialEq, Eq, Reflect)]
/// If this is on an entity, then this entity will not collide with any entities
/// present in the list of [`CollisionBlacklistedEntity`]s.
///
/// Use [`CollisionBlacklist::hooks`] for the rapier hooks this needs to take effect.
pub struct CollisionBlacklist(Vec<CollisionBlacklistedEntity>);

impl CollisionBlacklist {
    /// A convenience method to initialize this with just one cannot collide with entity.
    pub fn single(blacklist_entity: CollisionBlacklistedEntity) -> Self {
        Self::new(vec![blacklist_entity])
    }

    /// This entity will not collide with any of the entities provided.
    pub fn new(blacklist_entities: Vec<CollisionBlacklistedEntity>) -> Self {
        Self(blacklist_entities)
    }

    /// The rapier hooks that must be present next to this component
    pub fn hooks() -> ActiveHooks {
        ActiveHooks::FILTER_CONTACT_PAIRS | ActiveHooks::FILTER_INTERSECTION_PAIR
    }

    /// Adds this entity to the blacklist, replacing any existing entry for the same entity.
    pub fn add(&mut self, blacklist_entity: CollisionBlacklistedEntity) {
        self.remove(blacklist_entity.entity);
        self.0.push(blacklist_entity);
    }

    /// Removes every entry for this entity. Returns true if anything was removed.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let before = self.0.len();
        self.0.retain(|x| x.entity != entity);
        before != self.0.len()
    }

    /// Checks if this entity is directly present in the blacklist
    pub fn contains(&self, entity: Entity) -> bool {
        self.0.iter().any(|x| x.entity == entity)
    }

    /// Returns true if there are no entities in this blacklist
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over every blacklisted entity
    pub fn iter(&self) -> impl Iterator<Item = &CollisionBlacklistedEntity> {
        self.0.iter()
    }

    /// Checks if this entity should be collided with.
    pub fn check_should_collide(&self, entity_checking: Entity, q_parent: &Query<&ChildOf>) -> bool {
        !self.0.iter().any(|x| x.matches(entity_checking, q_parent))
    }
}

/// A custom filter that filters collisions between rigid-bodies
/// with the [`CollisionBlacklist`] component.
///
/// Colliders that are children of a blacklisted body are checked against their parents'
/// blacklists as well.
#[derive(SystemParam)]
pub struct PassivePhysicsFilter<'w, 's> {
    q_collision_blacklist: Query<'w, 's, &'static CollisionBlacklist>,
    q_parent: Query<'w, 's, &'static ChildOf>,
}

impl PassivePhysicsFilter<'_, '_> {
    fn blacklist_allows(&self, mut owner: Entity, other: Entity) -> bool {
        loop {
            if let Ok(collision_blacklist) = self.q_collision_blacklist.get(owner) {
                if !collision_blacklist.check_should_collide(other, &self.q_parent) {
                    return false;
                }
            }

            let Ok(child_of) = self.q_parent.get(owner) else {
                return true;
            };
            owner = child_of.parent();
        }
    }

    fn check_pair_filter(&self, collider1: Entity, collider2: Entity) -> bool {
        self.blacklist_allows(collider1, collider2) && self.blacklist_allows(collider2, collider1)
    }
}

impl BevyPhysicsHooks for PassivePhysicsFilter<'_, '_> {
    fn filter_contact_pair(&self, context: PairFilterContextView) -> Option<SolverFlags> {
        if self.check_pair_filter(context.collider1(), context.collider2()) {
            Some(SolverFlags::COMPUTE_IMPULSES)
        } else {
            None
        }
    }

    fn filter_intersection_pair(&self, context: PairFilterContextView) -> bool {
        self.check_pair_filter(context.collider1(), context.collider2())
    }
}

pub(super) fn register(app: &mut App) {
    app.register_type::<CollisionBlacklist>();
}

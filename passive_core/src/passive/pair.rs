//! Keeps the collisions & alpha between the local player and one remote player in sync

use bevy::prelude::Entity;

use crate::{
    entities::{player::PlayerId, vehicle::Seat},
    simulation::SimulationApi,
};

use super::{
    ops::{FULL_OPACITY, change_collisions, set_alpha, target_alpha},
    resolver::resolve,
    triple::{EntityHandle, EntityTriple, Side, Slot, SlotKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What a call to [`PairState::synchronize`] ended up doing
pub enum SyncOutcome {
    /// The suppression flag changed, so everything was re-applied
    Resynced,
    /// Some of the six slots changed and were updated
    Updated {
        /// How many slots changed
        changed_slots: usize,
    },
    /// No slot changed, but the remote body started or stopped an exempt task so the alpha of
    /// every remote entity was applied again
    AlphaRefreshed,
    /// Nothing changed, nothing was done
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Everything a pair update needs to know besides the pair itself
pub struct PairContext {
    /// The player this client controls
    pub local: PlayerId,
    /// If collisions between the two players should be suppressed
    pub suppressed: bool,
    /// The alpha remote entities are faded to
    pub faded_alpha: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// What has been applied between the local player and one remote player.
///
/// The known triples only ever hold what was last acted upon. They are updated while changes
/// are applied, never ahead of time.
pub struct PairState {
    owner: PlayerId,
    last_activation: bool,
    last_exempt: bool,
    local_known: EntityTriple,
    remote_known: EntityTriple,
}

impl PairState {
    /// Creates the state for a player that was just encountered.
    ///
    /// Nothing is known yet, so the first update treats every entity of both players as new.
    pub fn new(owner: PlayerId, activation: bool) -> Self {
        Self {
            owner,
            last_activation: activation,
            last_exempt: false,
            local_known: EntityTriple::default(),
            remote_known: EntityTriple::default(),
        }
    }

    /// The remote player this state belongs to
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// The suppression flag that was applied last
    pub fn last_activation(&self) -> bool {
        self.last_activation
    }

    /// The entities last acted upon for this side of the pair
    pub fn known(&self, side: Side) -> &EntityTriple {
        match side {
            Side::Local => &self.local_known,
            Side::Remote => &self.remote_known,
        }
    }

    fn known_mut(&mut self, side: Side) -> &mut EntityTriple {
        match side {
            Side::Local => &mut self.local_known,
            Side::Remote => &mut self.remote_known,
        }
    }

    /// Brings the collisions & alpha of this pair up to date.
    ///
    /// If the suppression flag changed since last time, every relationship is re-applied.
    /// Otherwise only the slots whose entity changed are touched.
    pub fn synchronize(&mut self, sim: &mut impl SimulationApi, ctx: PairContext) -> SyncOutcome {
        let fresh_local = resolve(sim, ctx.local);
        let fresh_remote = resolve(sim, self.owner);

        if ctx.suppressed != self.last_activation {
            self.resync(sim, fresh_local, fresh_remote, ctx);
            return SyncOutcome::Resynced;
        }

        // Entities that are new this tick get the current exempt state from the diff
        let exempt_changed = self.refresh_exempt(sim, &fresh_remote, ctx);

        match (self.apply_changes(sim, fresh_local, fresh_remote, ctx), exempt_changed) {
            (0, false) => SyncOutcome::Unchanged,
            (0, true) => SyncOutcome::AlphaRefreshed,
            (changed_slots, _) => SyncOutcome::Updated { changed_slots },
        }
    }

    /// Lifts everything this pair has applied, for a remote player that is going away.
    ///
    /// Every known local & remote entity collides again, and remote entities that still exist
    /// are drawn fully opaque.
    pub fn release(&self, sim: &mut impl SimulationApi) {
        for (_, remote_entity) in self.remote_known.entities() {
            for (_, local_entity) in self.local_known.entities() {
                change_collisions(sim, remote_entity, local_entity, true);
            }

            if sim.exists(remote_entity) {
                set_alpha(sim, remote_entity, FULL_OPACITY);
            }
        }
    }

    /// Re-applies the alpha of the known remote entities if the remote body started or stopped
    /// an exempt task. Returns true if it did.
    fn refresh_exempt(&mut self, sim: &mut impl SimulationApi, fresh_remote: &EntityTriple, ctx: PairContext) -> bool {
        let exempt = is_exempt(sim, fresh_remote);
        if exempt == self.last_exempt {
            return false;
        }
        self.last_exempt = exempt;

        let remote_known = self.remote_known;
        for (_, remote_entity) in remote_known.entities() {
            if sim.exists(remote_entity) {
                apply_remote_alpha(sim, remote_entity, fresh_remote, self.local_known.vehicle, ctx);
            }
        }

        true
    }

    fn fresh_for(side: Side, fresh_local: &EntityTriple, fresh_remote: &EntityTriple) -> EntityTriple {
        match side {
            Side::Local => *fresh_local,
            Side::Remote => *fresh_remote,
        }
    }

    fn resync(&mut self, sim: &mut impl SimulationApi, fresh_local: EntityTriple, fresh_remote: EntityTriple, ctx: PairContext) {
        // Entities that left a player since the last update would otherwise keep whatever the old
        // flag gave them.
        for (_, dropped) in self.local_known.entities().filter(|(_, e)| !fresh_local.contains(*e)) {
            for (_, other) in self.remote_known.entities() {
                change_collisions(sim, dropped, other, true);
            }
        }
        for (_, dropped) in self.remote_known.entities().filter(|(_, e)| !fresh_remote.contains(*e)) {
            for (_, other) in self.local_known.entities().filter(|(_, e)| fresh_local.contains(*e)) {
                change_collisions(sim, dropped, other, true);
            }
            if sim.exists(dropped) {
                set_alpha(sim, dropped, FULL_OPACITY);
            }
        }

        let enabled = !ctx.suppressed;
        let passenger_of = fresh_local
            .primary
            .entity()
            .zip(fresh_remote.vehicle.entity())
            .filter(|(body, vehicle)| ctx.suppressed && is_passenger(sim, *body, *vehicle))
            .map(|(_, vehicle)| vehicle);

        for (kind, remote_entity) in fresh_remote.entities() {
            if kind == SlotKind::Vehicle && passenger_of == Some(remote_entity) {
                continue;
            }

            for (_, local_entity) in fresh_local.entities() {
                change_collisions(sim, remote_entity, local_entity, enabled);
            }
        }

        for (_, remote_entity) in fresh_remote.entities() {
            apply_remote_alpha(sim, remote_entity, &fresh_remote, fresh_local.vehicle, ctx);
        }

        self.local_known = fresh_local;
        self.remote_known = fresh_remote;
        self.last_activation = ctx.suppressed;
        self.last_exempt = is_exempt(sim, &fresh_remote);
    }

    /// Returns how many slots changed
    fn apply_changes(
        &mut self,
        sim: &mut impl SimulationApi,
        fresh_local: EntityTriple,
        fresh_remote: EntityTriple,
        ctx: PairContext,
    ) -> usize {
        let enabled = !ctx.suppressed;
        let mut changed_slots = 0;

        for slot in Slot::ALL {
            let fresh_side = Self::fresh_for(slot.side, &fresh_local, &fresh_remote);
            let fresh = fresh_side.get(slot.kind);
            let old = self.known(slot.side).get(slot.kind);

            if fresh == old {
                continue;
            }
            changed_slots += 1;

            let opposite = *self.known(slot.side.opposite());

            // An entity that only moved to another slot of the same player is still part of
            // this pair, so it keeps its relationships.
            if let Some(old_entity) = old.entity().filter(|e| !fresh_side.contains(*e)) {
                for (_, other) in opposite.entities() {
                    change_collisions(sim, old_entity, other, true);
                }

                if slot.side == Side::Remote && sim.exists(old_entity) {
                    set_alpha(sim, old_entity, FULL_OPACITY);
                }
            }

            if let Some(new_entity) = fresh.entity() {
                for (_, other) in opposite.entities() {
                    change_collisions(sim, new_entity, other, enabled);
                }
            }

            self.known_mut(slot.side).set(slot.kind, fresh);

            match (slot.side, fresh.entity()) {
                (Side::Remote, Some(new_entity)) => {
                    apply_remote_alpha(sim, new_entity, &fresh_remote, self.local_known.vehicle, ctx);
                }
                (Side::Local, _) if slot.kind == SlotKind::Vehicle => {
                    // Whether the local player sits in one of them decides their alpha
                    let remote_known = self.remote_known;
                    for (_, remote_entity) in remote_known.entities() {
                        apply_remote_alpha(sim, remote_entity, &remote_known, self.local_known.vehicle, ctx);
                    }
                }
                _ => {}
            }
        }

        changed_slots
    }
}

fn is_passenger(sim: &impl SimulationApi, body: Entity, vehicle: Entity) -> bool {
    sim.is_in_vehicle(body, vehicle) && sim.seat_occupant(vehicle, Seat::Driver) != Some(body)
}

fn is_exempt(sim: &impl SimulationApi, remote: &EntityTriple) -> bool {
    remote
        .primary
        .entity()
        .is_some_and(|body| sim.is_performing_exempt_task(body))
}

fn apply_remote_alpha(
    sim: &mut impl SimulationApi,
    entity: Entity,
    remote: &EntityTriple,
    local_vehicle: EntityHandle,
    ctx: PairContext,
) {
    let exempt = is_exempt(sim, remote);
    let alpha = target_alpha(ctx.faded_alpha, ctx.suppressed, exempt, entity, local_vehicle);
    set_alpha(sim, entity, alpha);
}

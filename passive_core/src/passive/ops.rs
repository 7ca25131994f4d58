//! The two operations every passive change boils down to

use bevy::prelude::Entity;

use crate::simulation::SimulationApi;

use super::triple::EntityHandle;

/// Alpha of an entity that is drawn normally
pub const FULL_OPACITY: u8 = 255;

/// Changes the collisions between two entities.
///
/// The simulation only stores this one way, so it is always applied in both directions. An entity
/// is never toggled against itself.
pub fn change_collisions(sim: &mut impl SimulationApi, one: Entity, two: Entity, enabled: bool) {
    if one == two {
        return;
    }

    sim.set_no_collision(one, two, !enabled);
    sim.set_no_collision(two, one, !enabled);
}

/// Sets the alpha of an entity. Anything at or above [`FULL_OPACITY`] resets it instead.
pub fn set_alpha(sim: &mut impl SimulationApi, entity: Entity, alpha: u8) {
    if alpha >= FULL_OPACITY {
        sim.reset_alpha(entity);
    } else {
        sim.set_alpha(entity, alpha);
    }
}

/// The alpha a remote player's entity should be drawn with.
///
/// Faded only while collisions are suppressed, the remote body isn't busy with an exempt task,
/// and the local player isn't sitting in that very entity.
pub fn target_alpha(faded: u8, suppressed: bool, exempt: bool, entity: Entity, local_vehicle: EntityHandle) -> u8 {
    if suppressed && !exempt && local_vehicle != EntityHandle::Valid(entity) {
        faded
    } else {
        FULL_OPACITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::mock::{MockSimulation, Op};

    #[test]
    fn collisions_are_symmetric() {
        let mut sim = MockSimulation::default();
        let a = sim.spawn();
        let b = sim.spawn();

        change_collisions(&mut sim, a, b, false);

        assert_eq!(sim.take_collision_ops(), vec![(a, b, true), (b, a, true)]);
    }

    #[test]
    fn never_against_itself() {
        let mut sim = MockSimulation::default();
        let a = sim.spawn();

        change_collisions(&mut sim, a, a, false);

        assert!(sim.take_ops().is_empty());
    }

    #[test]
    fn full_alpha_resets() {
        let mut sim = MockSimulation::default();
        let a = sim.spawn();

        set_alpha(&mut sim, a, FULL_OPACITY);
        set_alpha(&mut sim, a, 100);

        assert_eq!(
            sim.take_ops(),
            vec![Op::ResetAlpha { entity: a }, Op::Alpha { entity: a, alpha: 100 }]
        );
    }

    #[test]
    fn alpha_rule() {
        let mut sim = MockSimulation::default();
        let vehicle = sim.spawn();
        let other = sim.spawn();

        assert_eq!(target_alpha(200, true, false, vehicle, EntityHandle::None), 200);
        assert_eq!(target_alpha(200, false, false, vehicle, EntityHandle::None), FULL_OPACITY);
        assert_eq!(target_alpha(200, true, true, vehicle, EntityHandle::None), FULL_OPACITY);
        assert_eq!(
            target_alpha(200, true, false, vehicle, EntityHandle::Valid(vehicle)),
            FULL_OPACITY
        );
        assert_eq!(target_alpha(200, true, false, vehicle, EntityHandle::Valid(other)), 200);
    }
}

//! Systems driving the carried-object slot.
use bevy::prelude::*;

use crate::interaction::{
    components::{Interactor, InteractorFault},
    input::InteractionInput,
};

use super::{
    components::{Carryable, InventorySlot, ItemOwner},
    config::InventorySettings,
    events::HandChanged,
    transfer::{drop_from_slot, ActorPose, CarriedItems},
};

/// Drops whatever each actor is holding when the secondary button goes down.
#[allow(clippy::type_complexity)]
pub fn drop_held_on_secondary(
    input: Option<Res<InteractionInput>>,
    settings: Res<InventorySettings>,
    mut actors: Query<
        (Entity, &Transform, &mut InventorySlot),
        (With<Interactor>, Without<InteractorFault>),
    >,
    mut items: CarriedItems,
    mut hands: MessageWriter<HandChanged>,
) {
    if !input.is_some_and(|input| input.secondary_activated) {
        return;
    }

    for (actor, transform, mut slot) in actors.iter_mut() {
        let pose = ActorPose::new(transform, &slot, settings.drop_distance);
        drop_from_slot(actor, &mut slot, &pose, &mut items, &mut hands);
    }
}

/// Keeps held items on their actor's hold anchor with zero local offset.
pub fn sync_held_items(
    settings: Res<InventorySettings>,
    actors: Query<(&Transform, &InventorySlot), With<Interactor>>,
    mut items: Query<(&Carryable, &mut Transform), Without<Interactor>>,
) {
    for (carryable, mut transform) in items.iter_mut() {
        let ItemOwner::Hand { actor } = carryable.owner else {
            continue;
        };
        let Ok((actor_transform, slot)) = actors.get(actor) else {
            continue;
        };

        let pose = ActorPose::new(actor_transform, slot, settings.drop_distance);
        transform.translation = pose.anchor;
        transform.rotation = pose.rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        interaction::{components::Collider, input::MouseClick},
        inventory::components::PhysicsBody,
        testing::{self, Recorded},
    };

    #[test]
    fn secondary_click_drops_the_held_rock_forward() {
        let mut app = testing::puzzle_app();
        let actor = testing::spawn_actor(&mut app, Vec3::ZERO);
        let rock = testing::spawn_rock(&mut app, 5.0, 0, Vec3::new(0.0, 0.0, -2.0));

        testing::press(&mut app, MouseClick::Primary);
        let held_at = app.world().get::<Transform>(rock).expect("rock").translation;
        let anchor = app
            .world()
            .get::<Transform>(actor)
            .expect("actor")
            .transform_point(InventorySettings::default().hold_anchor);
        assert!((held_at - anchor).length() < 1e-5);

        testing::press(&mut app, MouseClick::Secondary);

        let world = app.world();
        assert!(world.get::<InventorySlot>(actor).expect("slot").is_empty());
        assert_eq!(
            world.get::<Carryable>(rock).expect("carryable").owner,
            ItemOwner::World
        );
        assert!(world.get::<Collider>(rock).expect("collider").enabled);
        assert!(!world.get::<PhysicsBody>(rock).expect("body").kinematic);

        let dropped_at = world.get::<Transform>(rock).expect("rock").translation;
        assert!((dropped_at - (held_at + Vec3::NEG_Z * 1.5)).length() < 1e-5);

        let hands: Vec<bool> = world
            .resource::<Recorded<HandChanged>>()
            .0
            .iter()
            .map(|event| event.occupied)
            .collect();
        assert_eq!(hands, vec![true, false]);
    }

    #[test]
    fn secondary_click_with_empty_hands_emits_nothing() {
        let mut app = testing::puzzle_app();
        let actor = testing::spawn_actor(&mut app, Vec3::ZERO);

        testing::press(&mut app, MouseClick::Secondary);

        assert!(app
            .world()
            .get::<InventorySlot>(actor)
            .expect("slot")
            .is_empty());
        assert!(app.world().resource::<Recorded<HandChanged>>().0.is_empty());
    }

    #[test]
    fn held_rock_follows_the_actor() {
        let mut app = testing::puzzle_app();
        let actor = testing::spawn_actor(&mut app, Vec3::ZERO);
        let rock = testing::spawn_rock(&mut app, 5.0, 0, Vec3::new(0.0, 0.0, -2.0));
        testing::press(&mut app, MouseClick::Primary);

        app.world_mut()
            .get_mut::<Transform>(actor)
            .expect("actor")
            .translation = Vec3::new(4.0, 0.0, 0.0);
        testing::step(&mut app);

        let anchor = Transform::from_xyz(4.0, 0.0, 0.0)
            .transform_point(InventorySettings::default().hold_anchor);
        let held_at = app.world().get::<Transform>(rock).expect("rock").translation;
        assert!((held_at - anchor).length() < 1e-5);
    }

    #[test]
    fn drop_after_moving_uses_the_new_anchor() {
        let mut app = testing::puzzle_app();
        let actor = testing::spawn_actor(&mut app, Vec3::ZERO);
        let rock = testing::spawn_rock(&mut app, 5.0, 0, Vec3::new(0.0, 0.0, -2.0));
        testing::press(&mut app, MouseClick::Primary);

        app.world_mut()
            .get_mut::<Transform>(actor)
            .expect("actor")
            .translation = Vec3::new(4.0, 0.0, 0.0);
        testing::press(&mut app, MouseClick::Secondary);

        let anchor = Transform::from_xyz(4.0, 0.0, 0.0)
            .transform_point(InventorySettings::default().hold_anchor);
        let dropped_at = app.world().get::<Transform>(rock).expect("rock").translation;
        assert!((dropped_at - (anchor + Vec3::NEG_Z * 1.5)).length() < 1e-5);
    }
}

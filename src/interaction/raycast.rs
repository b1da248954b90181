//! Ray queries against interaction colliders.
use bevy::{
    math::bounding::{Aabb3d, BoundingSphere, RayCast3d},
    prelude::*,
};

use super::components::{Collider, ColliderShape, CollisionLayers};

/// Nearest collider hit by an interaction ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub point: Vec3,
    pub distance: f32,
}

/// Casts `ray` against the candidates and returns the closest enabled collider within
/// `max_distance` whose layers intersect `filter`.
pub fn cast_interaction_ray<'a>(
    ray: Ray3d,
    max_distance: f32,
    filter: CollisionLayers,
    candidates: impl IntoIterator<Item = (Entity, Vec3, &'a Collider)>,
) -> Option<RayHit> {
    let cast = RayCast3d::from_ray(ray, max_distance.max(0.0));

    candidates
        .into_iter()
        .filter(|(_, _, collider)| collider.enabled && collider.layers.intersects(filter))
        .filter_map(|(entity, position, collider)| {
            let distance = match collider.shape {
                ColliderShape::Sphere { radius } => {
                    cast.sphere_intersection_at(&BoundingSphere::new(position, radius))
                }
                ColliderShape::Box { half_extents } => {
                    cast.aabb_intersection_at(&Aabb3d::new(position, half_extents))
                }
            }?;
            Some(RayHit {
                entity,
                point: ray.get_point(distance),
                distance,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward_ray() -> Ray3d {
        Ray3d {
            origin: Vec3::ZERO,
            direction: Dir3::NEG_Z,
        }
    }

    #[test]
    fn returns_the_closest_hit() {
        let mut world = World::new();
        let near = world.spawn_empty().id();
        let far = world.spawn_empty().id();
        let near_collider = Collider::sphere(0.25, CollisionLayers::INTERACTABLE);
        let far_collider = Collider::cuboid(Vec3::splat(0.5), CollisionLayers::INTERACTABLE);

        let hit = cast_interaction_ray(
            forward_ray(),
            5.0,
            CollisionLayers::INTERACTABLE,
            [
                (far, Vec3::new(0.0, 0.0, -3.0), &far_collider),
                (near, Vec3::new(0.0, 0.0, -2.0), &near_collider),
            ],
        )
        .expect("ray should hit");

        assert_eq!(hit.entity, near);
        assert!((hit.distance - 1.75).abs() < 1e-4);
        assert!((hit.point.z + 1.75).abs() < 1e-4);
    }

    #[test]
    fn skips_disabled_filtered_and_distant_colliders() {
        let mut world = World::new();
        let disabled = world.spawn_empty().id();
        let wrong_layer = world.spawn_empty().id();
        let distant = world.spawn_empty().id();

        let mut disabled_collider = Collider::sphere(0.5, CollisionLayers::INTERACTABLE);
        disabled_collider.enabled = false;
        let door_collider = Collider::sphere(0.5, CollisionLayers::DOOR);
        let distant_collider = Collider::sphere(0.5, CollisionLayers::INTERACTABLE);

        let hit = cast_interaction_ray(
            forward_ray(),
            2.5,
            CollisionLayers::INTERACTABLE,
            [
                (disabled, Vec3::new(0.0, 0.0, -1.0), &disabled_collider),
                (wrong_layer, Vec3::new(0.0, 0.0, -1.5), &door_collider),
                (distant, Vec3::new(0.0, 0.0, -6.0), &distant_collider),
            ],
        );

        assert!(hit.is_none());
    }
}

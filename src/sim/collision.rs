//! Radius-based proximity checks
//!
//! Every contact in the arena is a sphere test on full 3D distance. Tests are
//! strict (`<`), so an entity exactly at the radius is not touching.

use glam::Vec3;

use super::state::{Collectible, Enemy};

/// Result of a contact check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Whether the two points are within the radius
    pub hit: bool,
    /// Distance between the points
    pub distance: f32,
}

impl Contact {
    #[inline]
    pub fn check(a: Vec3, b: Vec3, radius: f32) -> Self {
        let distance = a.distance(b);
        Self {
            hit: distance < radius,
            distance,
        }
    }
}

#[inline]
pub fn within_radius(a: Vec3, b: Vec3, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// Indices of alive enemies strictly within `radius` of `center`
pub fn enemies_in_range(enemies: &[Enemy], center: Vec3, radius: f32) -> Vec<usize> {
    enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.alive && within_radius(center, e.pos, radius))
        .map(|(i, _)| i)
        .collect()
}

/// Indices of uncollected collectibles strictly within `radius` of `center`
pub fn collectibles_in_range(collectibles: &[Collectible], center: Vec3, radius: f32) -> Vec<usize> {
    collectibles
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.collected && within_radius(center, c.pos, radius))
        .map(|(i, _)| i)
        .collect()
}

/// Closest point among `candidates`, by distance from `from`
pub fn nearest<'a, I>(from: Vec3, candidates: I) -> Option<Vec3>
where
    I: IntoIterator<Item = &'a Vec3>,
{
    candidates
        .into_iter()
        .copied()
        .min_by(|a, b| {
            from.distance_squared(*a)
                .partial_cmp(&from.distance_squared(*b))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pickup_contact() {
        // Player hovering at the centre, crystal just in front of it
        let contact = Contact::check(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.0, 0.8, 0.5), 1.2);
        assert!(contact.hit);
        assert!((contact.distance - 0.34f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_boundary_is_exclusive() {
        assert!(!within_radius(Vec3::ZERO, Vec3::new(2.5, 0.0, 0.0), 2.5));
        assert!(within_radius(Vec3::ZERO, Vec3::new(2.49, 0.0, 0.0), 2.5));
    }

    #[test]
    fn test_dead_enemies_out_of_range() {
        let mut enemies = vec![
            Enemy::new(1, 1.0, 0.0, 0.0),
            Enemy::new(2, 0.0, 1.0, 0.0),
            Enemy::new(3, 6.0, 6.0, 0.0),
        ];
        enemies[1].alive = false;
        let hits = enemies_in_range(&enemies, Vec3::new(0.0, 0.5, 0.0), 2.5);
        assert_eq!(hits, vec![0]);
    }

    #[test]
    fn test_nearest_point() {
        let points = [Vec3::new(5.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 3.0)];
        assert_eq!(nearest(Vec3::ZERO, points.iter()), Some(Vec3::new(-1.0, 0.0, 0.0)));
        assert_eq!(nearest(Vec3::ZERO, std::iter::empty::<&Vec3>()), None);
    }
}

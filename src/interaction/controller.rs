use crate::garden::{Garden, PlantOutcome};
use super::picking::{GardenPicker, Pick, PickTarget, Ray};

/// Result of a click on the garden canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// A new flower was planted at this index
    Planted(usize),
    /// The flower at this index started watering
    Watering(usize),
    /// Something was hit, but the garden is full or already watering
    Ignored,
    /// The ray missed both the flowers and the ground
    None,
}

impl ClickAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClickAction::Planted(_) => "planted",
            ClickAction::Watering(_) => "watering",
            ClickAction::Ignored => "ignored",
            ClickAction::None => "none",
        }
    }
}

/// Route a click: a flower under the pointer is watered, otherwise a ground
/// hit plants. A flower click never plants behind the flower.
pub fn resolve_click(
    garden: &mut Garden,
    picker: &GardenPicker,
    targets: &[PickTarget],
    ray: &Ray,
) -> ClickAction {
    match picker.pick(ray, targets) {
        Pick::Flower { index, .. } => {
            if garden.water(index) {
                ClickAction::Watering(index)
            } else {
                ClickAction::Ignored
            }
        }
        Pick::Ground { point } => match garden.plant(point) {
            PlantOutcome::Planted(index) => ClickAction::Planted(index),
            PlantOutcome::Full => ClickAction::Ignored,
        },
        Pick::Nothing => ClickAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use crate::scene::pick_targets;

    fn down_at(x: f32, z: f32) -> Ray {
        Ray::new(Vec3::new(x, 10.0, z), -Vec3::UP)
    }

    fn click(garden: &mut Garden, ray: &Ray) -> ClickAction {
        let targets = pick_targets(garden.flowers());
        resolve_click(garden, &GardenPicker::default(), &targets, ray)
    }

    #[test]
    fn test_ground_click_plants() {
        let mut garden = Garden::default();
        let action = click(&mut garden, &down_at(2.0, 3.0));
        assert_eq!(action, ClickAction::Planted(0));

        let flower = garden.get(0).unwrap();
        assert!((flower.position.x - 2.0).abs() < 0.0001);
        assert!((flower.position.y + 0.9).abs() < 0.0001);
        assert!((flower.position.z - 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_flower_click_waters_instead_of_planting() {
        let mut garden = Garden::default();
        click(&mut garden, &down_at(2.0, 3.0));

        let action = click(&mut garden, &down_at(2.0, 3.0));
        assert_eq!(action, ClickAction::Watering(0));
        assert_eq!(garden.len(), 1);
        assert_eq!(garden.watering_index(), Some(0));
    }

    #[test]
    fn test_second_watering_ignored() {
        let mut garden = Garden::default();
        click(&mut garden, &down_at(2.0, 3.0));
        click(&mut garden, &down_at(2.0, 3.0));

        assert_eq!(click(&mut garden, &down_at(2.0, 3.0)), ClickAction::Ignored);
    }

    #[test]
    fn test_full_garden_ignores_ground() {
        let mut garden = Garden::default();
        for i in 0..10 {
            let x = -9.0 + 2.0 * i as f32;
            assert_eq!(click(&mut garden, &down_at(x, -8.0)), ClickAction::Planted(i));
        }
        assert_eq!(click(&mut garden, &down_at(0.0, 8.0)), ClickAction::Ignored);
        assert_eq!(garden.len(), 10);
    }

    #[test]
    fn test_miss_outside_ground() {
        let mut garden = Garden::default();
        assert_eq!(click(&mut garden, &down_at(50.0, 0.0)), ClickAction::None);
        assert!(garden.is_empty());
    }

    #[test]
    fn test_action_strings() {
        assert_eq!(ClickAction::Planted(3).as_str(), "planted");
        assert_eq!(ClickAction::Watering(0).as_str(), "watering");
        assert_eq!(ClickAction::Ignored.as_str(), "ignored");
        assert_eq!(ClickAction::None.as_str(), "none");
    }
}

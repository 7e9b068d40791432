use tracing::{debug, info};
use crate::config::GardenConfig;
use crate::math::Vec3;
use super::flower::Flower;

/// A watering in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Watering {
    /// Flower being watered
    pub index: usize,
    /// Seconds until the growth step lands
    pub remaining: f32,
}

/// Result of a planting attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlantOutcome {
    Planted(usize),
    /// Garden already holds `max_flowers`
    Full,
}

/// Emitted by [`Garden::advance`] when a watering completes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthEvent {
    pub index: usize,
    pub previous: f32,
    pub growth: f32,
}

/// Owns every flower plus the single watering slot.
///
/// The watering delay is measured in simulation time fed through
/// [`Garden::advance`], so nothing fires once the garden is dropped.
#[derive(Debug, Clone)]
pub struct Garden {
    flowers: Vec<Flower>,
    watering: Option<Watering>,
    config: GardenConfig,
}

impl Default for Garden {
    fn default() -> Self {
        Self::new(GardenConfig::default())
    }
}

impl Garden {
    pub fn new(config: GardenConfig) -> Self {
        Self {
            flowers: Vec::with_capacity(config.max_flowers),
            watering: None,
            config,
        }
    }

    pub fn config(&self) -> &GardenConfig {
        &self.config
    }

    /// Flowers in planting order
    pub fn flowers(&self) -> &[Flower] {
        &self.flowers
    }

    pub fn get(&self, index: usize) -> Option<&Flower> {
        self.flowers.get(index)
    }

    pub fn len(&self) -> usize {
        self.flowers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flowers.is_empty()
    }

    pub fn max_flowers(&self) -> usize {
        self.config.max_flowers
    }

    pub fn is_full(&self) -> bool {
        self.flowers.len() >= self.config.max_flowers
    }

    pub fn watering(&self) -> Option<Watering> {
        self.watering
    }

    pub fn watering_index(&self) -> Option<usize> {
        self.watering.map(|w| w.index)
    }

    pub fn is_watering(&self, index: usize) -> bool {
        self.watering_index() == Some(index)
    }

    /// Plant at a ground hit point. Only x and z are kept; the flower sits at
    /// the configured planting height. A full garden ignores the request.
    pub fn plant(&mut self, point: Vec3) -> PlantOutcome {
        if self.is_full() {
            debug!(cap = self.config.max_flowers, "garden full, planting ignored");
            return PlantOutcome::Full;
        }

        let position = point.with_y(self.config.planting_height);
        self.flowers.push(Flower::new(position, self.config.initial_growth));
        let index = self.flowers.len() - 1;

        debug!(index, x = position.x, z = position.z, "planted flower");
        PlantOutcome::Planted(index)
    }

    /// Start watering a flower. Returns false when the index is unknown or
    /// another watering is still pending; only one flower waters at a time.
    pub fn water(&mut self, index: usize) -> bool {
        if index >= self.flowers.len() {
            debug!(index, "watering ignored, no such flower");
            return false;
        }
        if let Some(current) = self.watering {
            debug!(index, busy = current.index, "watering ignored, already watering");
            return false;
        }

        self.watering = Some(Watering {
            index,
            remaining: self.config.watering_delay,
        });
        debug!(index, "watering started");
        true
    }

    /// Advance simulation time. When the pending watering's delay runs out,
    /// the slot clears and that flower grows by one step.
    pub fn advance(&mut self, dt: f32) -> Option<GrowthEvent> {
        let watering = self.watering.as_mut()?;
        watering.remaining -= dt.max(0.0);
        if watering.remaining > 0.0 {
            return None;
        }

        let index = watering.index;
        self.watering = None;

        let step = self.config.growth_step;
        let flower = self.flowers.get_mut(index)?;
        let previous = flower.growth;
        let growth = flower.grow(step);

        info!(index, previous, growth, "flower watered");
        Some(GrowthEvent {
            index,
            previous,
            growth,
        })
    }

    /// Drop the pending watering without growing anything
    pub fn cancel_watering(&mut self) -> Option<Watering> {
        let cancelled = self.watering.take();
        if let Some(w) = cancelled {
            debug!(index = w.index, "watering cancelled");
        }
        cancelled
    }

    /// Hint for the page overlay, derived from the enforced cap
    pub fn planting_hint(&self) -> String {
        format!(
            "Haz clic en el suelo para plantar (máx. {} girasoles)",
            self.config.max_flowers
        )
    }

    pub fn watering_hint(&self) -> &'static str {
        "Haz clic en un girasol para regarlo y hacerlo crecer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.0001;

    fn run_delay(garden: &mut Garden) -> Option<GrowthEvent> {
        // 60 fps frames covering the whole delay
        let mut event = None;
        for _ in 0..130 {
            if let Some(e) = garden.advance(1.0 / 60.0) {
                event = Some(e);
            }
        }
        event
    }

    #[test]
    fn test_plant_then_water_scenario() {
        let mut garden = Garden::default();
        assert_eq!(garden.plant(Vec3::new(2.0, 0.0, 3.0)), PlantOutcome::Planted(0));

        let flower = garden.flowers()[0];
        assert_eq!(flower.position, Vec3::new(2.0, -0.9, 3.0));
        assert!((flower.growth - 0.1).abs() < EPS);

        assert!(garden.water(0));
        assert_eq!(garden.watering_index(), Some(0));

        let event = run_delay(&mut garden).unwrap();
        assert_eq!(event.index, 0);
        assert!((garden.flowers()[0].growth - 0.3).abs() < EPS);
        assert_eq!(garden.watering_index(), None);
    }

    #[test]
    fn test_cap_is_enforced() {
        let mut garden = Garden::default();
        for i in 0..10 {
            let outcome = garden.plant(Vec3::new(i as f32, 0.0, -(i as f32)));
            assert_eq!(outcome, PlantOutcome::Planted(i));
        }
        assert_eq!(garden.len(), 10);
        assert!(garden.is_full());

        for _ in 0..5 {
            assert_eq!(garden.plant(Vec3::new(9.0, 0.0, 9.0)), PlantOutcome::Full);
        }
        assert_eq!(garden.len(), 10);
    }

    #[test]
    fn test_planting_order_and_height() {
        let mut garden = Garden::default();
        let clicks = [
            Vec3::new(-4.0, -1.0, 2.5),
            Vec3::new(1.0, -1.0, -3.0),
            Vec3::new(0.5, -1.0, 0.5),
        ];
        for p in clicks {
            garden.plant(p);
        }

        for (flower, click) in garden.flowers().iter().zip(clicks) {
            assert_eq!(flower.position.x, click.x);
            assert_eq!(flower.position.z, click.z);
            assert_eq!(flower.position.y, -0.9);
        }
    }

    #[test]
    fn test_growth_clamps_at_one() {
        let mut garden = Garden::default();
        garden.plant(Vec3::ZERO);
        // 0.1 -> 0.3 -> 0.5 -> 0.7 -> 0.9
        for _ in 0..4 {
            assert!(garden.water(0));
            run_delay(&mut garden);
        }
        assert!((garden.flowers()[0].growth - 0.9).abs() < EPS);

        assert!(garden.water(0));
        let event = run_delay(&mut garden).unwrap();
        assert!((event.previous - 0.9).abs() < EPS);
        assert_eq!(event.growth, 1.0);
        assert_eq!(garden.flowers()[0].growth, 1.0);
    }

    #[test]
    fn test_watering_only_touches_target() {
        let mut garden = Garden::default();
        for x in 0..3 {
            garden.plant(Vec3::new(x as f32, 0.0, 0.0));
        }
        garden.water(1);
        run_delay(&mut garden);

        let growths: Vec<f32> = garden.flowers().iter().map(|f| f.growth).collect();
        assert!((growths[0] - 0.1).abs() < EPS);
        assert!((growths[1] - 0.3).abs() < EPS);
        assert!((growths[2] - 0.1).abs() < EPS);
    }

    #[test]
    fn test_growth_waits_for_delay() {
        let mut garden = Garden::default();
        garden.plant(Vec3::ZERO);
        garden.water(0);

        assert!(garden.advance(1.0).is_none());
        assert!(garden.advance(0.9).is_none());
        assert!((garden.flowers()[0].growth - 0.1).abs() < EPS);
        assert!(garden.is_watering(0));

        assert!(garden.advance(0.2).is_some());
        assert!(!garden.is_watering(0));
        assert!((garden.flowers()[0].growth - 0.3).abs() < EPS);
    }

    #[test]
    fn test_double_watering_is_debounced() {
        let mut garden = Garden::default();
        garden.plant(Vec3::ZERO);
        garden.plant(Vec3::RIGHT);

        assert!(garden.water(0));
        assert!(!garden.water(0));
        assert!(!garden.water(1));

        run_delay(&mut garden);
        assert!((garden.flowers()[0].growth - 0.3).abs() < EPS);
        assert!((garden.flowers()[1].growth - 0.1).abs() < EPS);

        // Slot is free again afterwards
        assert!(garden.water(1));
    }

    #[test]
    fn test_water_unknown_index() {
        let mut garden = Garden::default();
        assert!(!garden.water(0));
        garden.plant(Vec3::ZERO);
        assert!(!garden.water(3));
        assert_eq!(garden.watering(), None);
    }

    #[test]
    fn test_planting_during_watering_is_kept() {
        let mut garden = Garden::default();
        garden.plant(Vec3::ZERO);
        garden.water(0);
        garden.advance(1.0);
        garden.plant(Vec3::new(5.0, 0.0, 5.0));
        garden.advance(1.0);

        assert_eq!(garden.len(), 2);
        assert!((garden.flowers()[0].growth - 0.3).abs() < EPS);
        assert!((garden.flowers()[1].growth - 0.1).abs() < EPS);
    }

    #[test]
    fn test_cancel_drops_pending_growth() {
        let mut garden = Garden::default();
        garden.plant(Vec3::ZERO);
        garden.water(0);
        assert_eq!(garden.cancel_watering().map(|w| w.index), Some(0));
        assert!(run_delay(&mut garden).is_none());
        assert!((garden.flowers()[0].growth - 0.1).abs() < EPS);
    }

    #[test]
    fn test_growth_stays_in_range_and_monotonic() {
        let mut garden = Garden::default();
        for i in 0..4 {
            garden.plant(Vec3::new(i as f32, 0.0, 0.0));
        }
        let mut last: Vec<f32> = garden.flowers().iter().map(|f| f.growth).collect();

        for round in 0..20 {
            garden.water(round % 4);
            garden.advance(0.7);
            for (flower, prev) in garden.flowers().iter().zip(last.iter_mut()) {
                assert!((0.0..=1.0).contains(&flower.growth));
                assert!(flower.growth >= *prev);
                *prev = flower.growth;
            }
        }
    }

    #[test]
    fn test_custom_cap_and_hint() {
        let config = GardenConfig {
            max_flowers: 7,
            ..Default::default()
        };
        let mut garden = Garden::new(config);
        for _ in 0..9 {
            garden.plant(Vec3::ZERO);
        }
        assert_eq!(garden.len(), 7);
        assert!(garden.planting_hint().contains("máx. 7"));
    }

    #[test]
    fn test_default_hint_matches_enforced_cap() {
        let garden = Garden::default();
        assert!(garden.planting_hint().contains("máx. 10"));
    }
}

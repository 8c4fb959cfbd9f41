//! Reference engine: balls in a linear heap, stepped by real time

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::clock::SimulatedClock;
use super::heap::{DESCRIPTOR_ADDR, LinearHeap};
use super::physics;
use crate::bridge::Ball;
use crate::engine::{Address, Engine};
use crate::platform::{TimeSource, WallClock};
use crate::settings::Settings;

/// A bouncing-ball world that publishes its state through a [`LinearHeap`].
pub struct BallWorld<T: TimeSource = WallClock> {
    settings: Settings,
    heap: LinearHeap,
    viewport: (u32, u32),
    clock: SimulatedClock,
    time: T,
    rng: Pcg32,
    ticks: u64,
    populated: bool,
}

impl<T: TimeSource> BallWorld<T> {
    pub fn new(settings: Settings, time: T) -> Self {
        let settings = settings.sanitized();
        let rng = Pcg32::seed_from_u64(settings.seed.unwrap_or_default());
        Self {
            settings,
            heap: LinearHeap::new(0),
            viewport: (0, 0),
            clock: SimulatedClock::default(),
            time,
            rng,
            ticks: 0,
            populated: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn clock(&self) -> SimulatedClock {
        self.clock
    }

    /// Number of `tick` calls so far (including gated ones)
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn size(&self) -> Vec2 {
        Vec2::new(self.viewport.0 as f32, self.viewport.1 as f32)
    }

    /// Replace the population with explicit balls. Relocates the columns.
    pub fn populate(&mut self, balls: &[Ball]) {
        self.heap = LinearHeap::new(balls.len());
        let cols = self.heap.columns_mut();
        for (i, ball) in balls.iter().enumerate() {
            cols.x[i] = ball.position.x;
            cols.y[i] = ball.position.y;
            cols.x_speed[i] = ball.velocity.x;
            cols.y_speed[i] = ball.velocity.y;
            cols.radius[i] = ball.radius;
        }
        self.populated = true;
        log::debug!("Populated {} balls", balls.len());
    }

    /// Replace the population with `ball_count` random balls inside the viewport.
    pub fn scatter(&mut self) {
        let s = &self.settings;
        let size = self.size();
        let balls: Vec<Ball> = (0..s.ball_count)
            .map(|_| {
                let radius = self.rng.random_range(s.min_radius..=s.max_radius);
                let x = self.rng.random::<f32>() * (size.x - radius * 2.0).max(0.0) + radius;
                let y = self.rng.random::<f32>() * (size.y - radius * 2.0).max(0.0) + radius;
                let speed = self.rng.random_range(s.min_speed..=s.max_speed);
                let dir = self.rng.random::<f32>() * std::f32::consts::TAU;
                Ball {
                    position: Vec2::new(x, y),
                    velocity: Vec2::from_angle(dir) * speed,
                    radius,
                }
            })
            .collect();
        self.populate(&balls);
        log::info!(
            "Scattered {} balls in {}x{}",
            balls.len(),
            self.viewport.0,
            self.viewport.1
        );
    }
}

impl<T: TimeSource> Engine for BallWorld<T> {
    fn is_ready(&self) -> bool {
        true
    }

    fn initialize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        if !self.populated {
            self.scatter();
        }
        self.set_viewport(width, height);
        self.clock.start(self.time.now());
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
        let size = self.size();
        physics::rebound(&mut self.heap.columns_mut(), size.x, size.y);
    }

    fn tick(&mut self) {
        self.ticks += 1;
        let dt = self.clock.advance(self.time.now());
        if dt <= 0.0 {
            return;
        }
        let size = self.size();
        let (collisions, gravity) = (self.settings.collisions, self.settings.gravity);
        physics::step(&mut self.heap.columns_mut(), collisions, gravity, size, dt);
    }

    fn start_clock(&mut self) {
        self.clock.start(self.time.now());
    }

    fn stop_clock(&mut self) {
        self.clock.stop();
    }

    fn get_descriptor(&self) -> Address {
        DESCRIPTOR_ADDR
    }

    fn memory(&self) -> &[u8] {
        self.heap.bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{Descriptor, read_ball_set, with_ball_set};
    use crate::platform::ManualTime;

    fn world(settings: Settings) -> (BallWorld<ManualTime>, ManualTime) {
        let time = ManualTime::new(100.0);
        (BallWorld::new(settings, time.clone()), time)
    }

    fn ball(x: f32, y: f32, vx: f32, vy: f32, radius: f32) -> Ball {
        Ball {
            position: Vec2::new(x, y),
            velocity: Vec2::new(vx, vy),
            radius,
        }
    }

    #[test]
    fn test_initialize_scatters_inside_viewport() {
        let (mut world, _) = world(Settings {
            seed: Some(42),
            ..Settings::default()
        });
        world.initialize(800, 600);
        let set = read_ball_set(&world).unwrap();
        assert_eq!(set.count(), 20);
        for b in set.iter() {
            assert!(b.radius >= 10.0 && b.radius <= 60.0);
            assert!(b.position.x >= b.radius && b.position.x <= 800.0 - b.radius);
            assert!(b.position.y >= b.radius && b.position.y <= 600.0 - b.radius);
            let speed = b.velocity.length();
            assert!(speed >= 49.9 && speed <= 100.1, "speed {}", speed);
        }
        assert!(world.clock().is_running());
        assert_eq!(world.settings().seed, Some(42));
    }

    #[test]
    fn test_same_seed_same_scatter() {
        let settings = Settings {
            seed: Some(9),
            ..Settings::default()
        };
        let (mut a, _) = world(settings.clone());
        let (mut b, _) = world(settings);
        a.initialize(640, 480);
        b.initialize(640, 480);
        assert_eq!(a.memory(), b.memory());
    }

    #[test]
    fn test_overflowing_stored_ranges_still_scatter() {
        let settings = Settings::from_json(r#"{"max_radius": 1e39, "max_speed": 1e39}"#).unwrap();
        let (mut world, _) = world(settings);
        world.initialize(800, 600);
        let set = read_ball_set(&world).unwrap();
        assert_eq!(set.count(), 20);
        assert!(set.iter().all(|b| b.radius <= 60.0 && b.velocity.length() <= 100.1));
    }

    #[test]
    fn test_initialize_keeps_explicit_population() {
        let (mut world, _) = world(Settings::default());
        world.populate(&[ball(400.0, 300.0, 0.0, 0.0, 10.0)]);
        world.initialize(800, 600);
        assert_eq!(with_ball_set(&world, |balls| balls.count()), Ok(1));
    }

    #[test]
    fn test_tick_uses_elapsed_time() {
        let (mut world, time) = world(Settings::default());
        world.populate(&[ball(100.0, 100.0, 50.0, 0.0, 10.0)]);
        world.initialize(800, 600);
        time.advance(0.1);
        world.tick();
        let set = read_ball_set(&world).unwrap();
        assert!((set.x[0] - 105.0).abs() < 1e-3);
        assert_eq!(world.ticks(), 1);
    }

    #[test]
    fn test_stopped_clock_gates_tick() {
        let (mut world, time) = world(Settings::default());
        world.populate(&[ball(100.0, 100.0, 50.0, 0.0, 10.0)]);
        world.initialize(800, 600);
        world.stop_clock();
        time.advance(5.0);
        world.tick();
        assert_eq!(read_ball_set(&world).unwrap().x[0], 100.0);

        world.start_clock();
        world.tick();
        assert_eq!(read_ball_set(&world).unwrap().x[0], 100.0);
    }

    #[test]
    fn test_shrinking_viewport_rebounds_balls() {
        let (mut world, _) = world(Settings::default());
        world.populate(&[ball(700.0, 500.0, 10.0, 10.0, 20.0)]);
        world.initialize(800, 600);
        world.set_viewport(300, 200);
        let b = read_ball_set(&world).unwrap().get(0).unwrap();
        assert_eq!(b.position, Vec2::new(280.0, 180.0));
        assert_eq!(b.velocity, Vec2::new(10.0, 10.0));
        assert_eq!(world.viewport(), (300, 200));
    }

    #[test]
    fn test_population_change_relocates_columns() {
        let (mut world, _) = world(Settings::default());
        world.populate(&[ball(1.0, 1.0, 0.0, 0.0, 1.0)]);
        let before = Descriptor::read(world.memory(), world.get_descriptor()).unwrap();
        world.populate(&[ball(1.0, 1.0, 0.0, 0.0, 1.0), ball(2.0, 2.0, 0.0, 0.0, 2.0)]);
        let after = Descriptor::read(world.memory(), world.get_descriptor()).unwrap();
        assert_eq!(after.count, 2);
        assert_ne!(after.radius, before.radius);
        assert_eq!(read_ball_set(&world).unwrap().radius, &[1.0, 2.0]);
    }
}

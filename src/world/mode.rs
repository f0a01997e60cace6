//! Mode contract consumed by the host loop, and the world fly-through mode

use crate::core::camera::Viewpoint;
use crate::core::time::FixedTimestep;
use crate::core::types::Vec3;
use crate::render::{MeshRenderer, RenderStats};
use crate::streaming::TickReport;
use crate::world::World;

/// A top-level application mode.
///
/// The host calls `enter` once, then `tick` and `render` every frame, then
/// `exit` once.
pub trait GameMode {
    fn enter(&mut self);
    /// Advance by a frame delta in seconds
    fn tick(&mut self, frame_delta: f32);
    /// Draw; returns triangles rendered
    fn render(&mut self, renderer: &mut dyn MeshRenderer) -> usize;
    fn exit(&mut self);
}

/// Glides the viewpoint forward over the terrain while streaming chunks
#[derive(Debug)]
pub struct WorldMode {
    world: World,
    viewpoint: Viewpoint,
    timestep: FixedTimestep,
    /// Horizontal speed in world units per second
    speed: f32,
    last_tick: TickReport,
    last_render: RenderStats,
}

impl WorldMode {
    pub fn new(world: World, viewpoint: Viewpoint, speed: f32, ticks_per_second: u32) -> Self {
        Self {
            world,
            viewpoint,
            timestep: FixedTimestep::new(ticks_per_second),
            speed,
            last_tick: TickReport::default(),
            last_render: RenderStats::default(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn viewpoint(&self) -> &Viewpoint {
        &self.viewpoint
    }

    pub fn viewpoint_mut(&mut self) -> &mut Viewpoint {
        &mut self.viewpoint
    }

    /// Fixed ticks run so far
    pub fn ticks(&self) -> u64 {
        self.timestep.tick_count()
    }

    pub fn last_tick(&self) -> TickReport {
        self.last_tick
    }

    pub fn last_render(&self) -> RenderStats {
        self.last_render
    }

    fn step(&mut self) {
        let dt = self.timestep.step();
        let heading = self.viewpoint.planar_forward();
        self.viewpoint.position += Vec3::new(heading.x, 0.0, heading.y) * self.speed * dt;
        self.viewpoint.follow_terrain(self.world.terrain());
        self.last_tick = self.world.tick(&self.viewpoint);
    }
}

impl GameMode for WorldMode {
    fn enter(&mut self) {
        self.viewpoint.follow_terrain(self.world.terrain());
        self.last_tick = self.world.tick(&self.viewpoint);
        log::info!(
            "Entered world at ({:.1}, {:.1}, {:.1}), {} chunks resident",
            self.viewpoint.position.x,
            self.viewpoint.position.y,
            self.viewpoint.position.z,
            self.last_tick.resident
        );
    }

    fn tick(&mut self, frame_delta: f32) {
        for _ in 0..self.timestep.advance(frame_delta) {
            self.step();
        }
    }

    fn render(&mut self, renderer: &mut dyn MeshRenderer) -> usize {
        self.last_render = self.world.render(&self.viewpoint, renderer);
        self.last_render.triangles
    }

    fn exit(&mut self) {
        log::info!("Leaving world after {} ticks", self.timestep.tick_count());
        self.world.unload_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::WorldConfig;
    use crate::render::HeadlessRenderer;

    fn mode(speed: f32) -> WorldMode {
        WorldMode::new(World::new(WorldConfig::default()), Viewpoint::default(), speed, 20)
    }

    #[test]
    fn test_enter_loads_neighborhood() {
        let mut mode = mode(0.0);
        mode.enter();
        assert_eq!(mode.world().store().len(), 9);
        let ground = mode.world().terrain().interpolated_height(0.0, 0.0);
        assert!(mode.viewpoint().position.y >= ground + 3.0 - 1e-4);
    }

    #[test]
    fn test_tick_moves_forward() {
        let mut mode = mode(10.0);
        mode.enter();
        // 0.1 s at 20 Hz is two ticks of 0.5 units each
        mode.tick(0.1);
        assert_eq!(mode.ticks(), 2);
        assert!((mode.viewpoint().position.z - (-1.0)).abs() < 1e-3);
    }

    #[test]
    fn test_render_and_exit() {
        let mut mode = mode(5.0);
        mode.enter();
        let mut renderer = HeadlessRenderer::new();
        let triangles = mode.render(&mut renderer);
        assert!(triangles > 0);
        assert_eq!(mode.last_render().triangles, triangles);

        mode.exit();
        assert!(mode.world().store().is_empty());
    }

    #[test]
    fn test_long_flight_stays_bounded() {
        let mut mode = mode(200.0);
        mode.enter();
        let limit = mode.world().config().max_resident_chunks();
        for _ in 0..60 {
            mode.tick(0.1);
            assert!(mode.world().store().len() <= limit);
        }
        // 6 s at 200 units/s crosses dozens of chunks
        assert!(mode.viewpoint().position.z < -1000.0);
    }
}

//! Tundra - headless fly-through over the streamed landscape
//!
//! Usage: tundra [--config <path>] [--ticks <n>] [--speed <units/s>] [--top-down]

use std::path::PathBuf;

use glam::Vec3;

use tundra::core::{logging, ViewMode, Viewpoint};
use tundra::generation::WorldConfig;
use tundra::render::HeadlessRenderer;
use tundra::world::{GameMode, World, WorldMode};

const TICKS_PER_SECOND: u32 = 60;

fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let config_path = parse_str_arg(&args, "--config").map(PathBuf::from);
    let ticks = parse_u64_arg(&args, "--ticks").unwrap_or(600);
    let speed = parse_f32_arg(&args, "--speed").unwrap_or(12.0);
    let top_down = args.iter().any(|a| a == "--top-down");

    let config = match &config_path {
        Some(path) => WorldConfig::load_or_default(path),
        None => {
            log::info!("No --config given, using default world settings");
            WorldConfig::default()
        }
    };

    let mut viewpoint = Viewpoint::with_euler(Vec3::new(0.0, 5.0, 0.0), 0.3, -0.1);
    if top_down {
        viewpoint.set_rotation_euler(0.3, -std::f32::consts::FRAC_PI_2);
        viewpoint.mode = ViewMode::TopDown;
    }

    let mut mode = WorldMode::new(World::new(config), viewpoint, speed, TICKS_PER_SECOND);
    let mut renderer = HeadlessRenderer::new();
    let frame_delta = 1.0 / TICKS_PER_SECOND as f32;

    mode.enter();

    let mut loaded = 0;
    let mut evicted = 0;
    while mode.ticks() < ticks {
        let before = mode.ticks();
        mode.tick(frame_delta);
        if mode.ticks() > before {
            let report = mode.last_tick();
            loaded += report.loaded;
            evicted += report.evicted;
        }
        mode.render(&mut renderer);

        if mode.ticks() > before && mode.ticks() % TICKS_PER_SECOND as u64 == 0 {
            let stats = mode.last_render();
            let p = mode.viewpoint().position;
            log::info!(
                "t={}s pos=({:.0}, {:.0}, {:.0}) resident={} ({} KB) loaded={} evicted={} drawn={} culled={} tris={}",
                mode.ticks() / TICKS_PER_SECOND as u64,
                p.x, p.y, p.z,
                mode.world().store().len(),
                mode.world().store().memory_size() / 1024,
                loaded,
                evicted,
                stats.submitted,
                stats.culled,
                stats.triangles
            );
            loaded = 0;
            evicted = 0;
        }
    }

    log::info!(
        "Rendered {} meshes, {} triangles total",
        renderer.meshes, renderer.triangles
    );
    mode.exit();
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_u64_arg(args: &[String], flag: &str) -> Option<u64> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

use criterion::{criterion_group, criterion_main, Criterion, black_box};

use tundra::core::Viewpoint;
use tundra::generation::{ChunkGenerator, TreeGenerator, TreeParams, WorldConfig};
use tundra::mesh::{MeshBuilder, Shading};
use tundra::render::{HeadlessRenderer, Light, RenderOrderer};
use tundra::streaming::{ChunkKey, ChunkStore, ChunkStreamer, TreeLod};
use tundra::terrain::{TerrainGenerator, TerrainParams};

use glam::Vec3;

fn bench_terrain_height(c: &mut Criterion) {
    let terrain = TerrainGenerator::new(2, TerrainParams::default());

    c.bench_function("terrain_height_1k", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for i in 0..1000 {
                let x = i as f32 * 1.7;
                sum += terrain.height_at(black_box(x), black_box(-x * 0.5));
            }
            sum
        });
    });
}

fn bench_interpolated_height(c: &mut Criterion) {
    let terrain = TerrainGenerator::new(2, TerrainParams::default());

    c.bench_function("interpolated_height", |b| {
        let mut frame = 0u32;
        b.iter(|| {
            frame += 1;
            let t = frame as f32 * 0.01;
            terrain.interpolated_height(black_box(t.sin() * 300.0), black_box(t.cos() * 300.0))
        });
    });
}

fn bench_tree_full_detail(c: &mut Criterion) {
    let trees = TreeGenerator::new(2);
    let params = TreeParams::default();

    c.bench_function("tree_generate_lod0", |b| {
        b.iter(|| {
            let mut builder = MeshBuilder::new(Shading::Bark);
            let skeleton = trees.generate(&mut builder, black_box(Vec3::new(12.0, 3.0, -7.0)), &params);
            black_box(skeleton.map(|s| s.triangles).unwrap_or(0))
        });
    });
}

fn bench_chunk_generate(c: &mut Criterion) {
    let generator = ChunkGenerator::new(&WorldConfig::default());

    c.bench_function("chunk_generate_near", |b| {
        let mut x = 0;
        b.iter(|| {
            x += 1;
            generator.generate(black_box(ChunkKey::new(x, 3)), TreeLod::NEAR).map(|(chunk, _)| chunk.triangle_count())
        });
    });
}

fn bench_streaming_jump(c: &mut Criterion) {
    let config = WorldConfig::default();
    let streamer = ChunkStreamer::new(&config);

    c.bench_function("streaming_tick_after_jump", |b| {
        let mut store = ChunkStore::new(config.load_square_count());
        let mut hop = 0;
        b.iter(|| {
            // Every tick lands on fresh ground: full evict + 3x3 load
            hop += 10;
            let viewpoint = Viewpoint::new(Vec3::new(hop as f32 * 32.0, 10.0, 0.0));
            black_box(streamer.tick(&mut store, &viewpoint))
        });
    });
}

fn bench_render_ordering(c: &mut Criterion) {
    let config = WorldConfig { chunk_load_radius: 3, ..Default::default() };
    let streamer = ChunkStreamer::new(&config);
    let orderer = RenderOrderer::new(&config);
    let mut store = ChunkStore::new(config.load_square_count());
    let viewpoint = Viewpoint::with_euler(Vec3::new(5.0, 10.0, 5.0), 0.6, 0.0);
    streamer.tick(&mut store, &viewpoint);
    let lights = [Light::sun()];

    c.bench_function("render_order_49_chunks", |b| {
        let mut renderer = HeadlessRenderer::new();
        b.iter(|| {
            black_box(orderer.render(&store, &viewpoint, &lights, &mut renderer))
        });
    });
}

criterion_group!(
    benches,
    bench_terrain_height,
    bench_interpolated_height,
    bench_tree_full_detail,
    bench_chunk_generate,
    bench_streaming_jump,
    bench_render_ordering,
);
criterion_main!(benches);

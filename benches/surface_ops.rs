//! Benchmarks for surface traversal and sampling.

use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::{Point3, Vector3};
use rove::prelude::*;
use rove::sample::eliminate;

fn create_grid_mesh(n: usize) -> TriangleMesh {
    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    let mut triangles = Vec::with_capacity(n * n * 2);

    // Create grid vertices
    for j in 0..=n {
        for i in 0..=n {
            vertices.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }

    // Create triangles
    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;

            triangles.push([v00, v10, v11]);
            triangles.push([v00, v11, v01]);
        }
    }

    TriangleMesh::from_triangles(&vertices, &triangles).unwrap()
}

fn bench_adjacency_build(c: &mut Criterion) {
    let mesh = create_grid_mesh(50);

    c.bench_function("half_edge_map_50x50", |b| {
        b.iter(|| HalfEdgeMap::build(&mesh).unwrap());
    });
}

fn bench_walk(c: &mut Criterion) {
    let mesh = create_grid_mesh(50);
    let walker = SurfaceWalker::new(&mesh).unwrap();
    let start = SurfacePoint::new(Point3::new(0.6, 0.2, 0.0), TriangleId::new(0));
    let options = WalkOptions::default().with_max_crossings(10_000);

    c.bench_function("walk_across_grid", |b| {
        b.iter(|| {
            walker
                .walk(&start, &Vector3::new(35.0, 22.0, 0.0), &options)
                .unwrap()
        });
    });
}

fn bench_blue_noise(c: &mut Criterion) {
    let mesh = create_grid_mesh(10);
    let mut sampler = SurfaceSampler::with_seed(&mesh, 42).unwrap();
    let candidates: Vec<SurfacePoint> = (0..2000).map(|_| sampler.sample()).collect();
    let area = mesh.surface_area();

    c.bench_function("eliminate_2000_to_500", |b| {
        b.iter(|| eliminate(&candidates, area, 500, &BlueNoiseOptions::default()));
    });
}

criterion_group!(benches, bench_adjacency_build, bench_walk, bench_blue_noise);
criterion_main!(benches);

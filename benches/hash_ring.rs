use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};

use ch_router::{GroupNode, HashRing, Md5Hash, Murmur3Hash, RouterHolder};

fn groups(n: usize) -> Vec<Arc<GroupNode>> {
    (0..n)
        .map(|i| Arc::new(GroupNode::new(format!("group{}", i))))
        .collect()
}

fn random_keys(n: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n).map(|_| rng.random::<u64>().to_string()).collect()
}

fn bench_route_node(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_node");
    let keys = random_keys(1_000);
    group.throughput(Throughput::Elements(keys.len() as u64));

    for nodes in [5usize, 20, 100] {
        let md5 = HashRing::with_nodes(groups(nodes), 160, Md5Hash::new()).unwrap();
        group.bench_with_input(BenchmarkId::new("md5", nodes), &md5, |b, ring| {
            b.iter(|| {
                for key in &keys {
                    std::hint::black_box(ring.route_node(key));
                }
            });
        });
        let murmur = HashRing::with_nodes(groups(nodes), 160, Murmur3Hash::new(0)).unwrap();
        group.bench_with_input(BenchmarkId::new("murmur3", nodes), &murmur, |b, ring| {
            b.iter(|| {
                for key in &keys {
                    std::hint::black_box(ring.route_node(key));
                }
            });
        });
    }
    group.finish();
}

fn bench_add_node(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_node");

    for replicas in [40i64, 160, 320] {
        group.throughput(Throughput::Elements(replicas as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(replicas),
            &replicas,
            |b, &replicas| {
                b.iter(|| {
                    // the index scan in add_node grows with ring size
                    let mut ring = HashRing::with_nodes(groups(5), 160, Md5Hash::new()).unwrap();
                    let extra = Arc::new(GroupNode::new("extra"));
                    ring.add_node(extra, replicas).unwrap();
                    std::hint::black_box(ring);
                });
            },
        );
    }
    group.finish();
}

fn bench_holder_rebuild(c: &mut Criterion) {
    c.bench_function("holder_cached_get_router", |b| {
        let holder = RouterHolder::new();
        for i in 0..5 {
            holder.add_group("orders", &format!("group{}", i));
        }
        b.iter(|| std::hint::black_box(holder.get_router("orders")));
    });

    c.bench_function("holder_rebuild_get_router", |b| {
        b.iter(|| {
            let holder = RouterHolder::new();
            for i in 0..5 {
                holder.add_group("orders", &format!("group{}", i));
            }
            std::hint::black_box(holder.get_router("orders"))
        });
    });
}

criterion_group!(
    benches,
    bench_route_node,
    bench_add_node,
    bench_holder_rebuild
);
criterion_main!(benches);

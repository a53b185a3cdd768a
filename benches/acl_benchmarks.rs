//! Whitelist performance benchmarks: linear-scan cost against whitelist
//! size, and the sequenced vs. concurrent dual-check policies.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ipacl::{Acl, BasicDual, BasicNetwork, LaunchPolicy, NetworkAcl};
use tokio::runtime::Runtime;

fn populate(wl: &BasicNetwork, size: usize) {
    for i in 0..size {
        let net = format!("10.{}.{}.0/24", i / 256, i % 256);
        wl.add(net.parse().unwrap());
    }
}

fn network_scan_benchmarks(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("network_scan");

    for size in [8usize, 64, 512].iter() {
        let wl = BasicNetwork::new();
        populate(&wl, *size);

        // Worst case: the probe matches nothing, so every entry is scanned.
        let miss = [172u8, 16, 0, 1];
        group.bench_with_input(BenchmarkId::new("miss", size), size, |b, _| {
            b.iter(|| rt.block_on(wl.permitted(black_box(&miss))));
        });

        let hit = [10u8, 0, 0, 1];
        group.bench_with_input(BenchmarkId::new("first_hit", size), size, |b, _| {
            b.iter(|| rt.block_on(wl.permitted(black_box(&hit))));
        });
    }

    group.finish();
}

fn dual_policy_benchmarks(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("dual_policy");

    for (name, policy) in [
        ("sequenced", LaunchPolicy::Sequenced),
        ("concurrent", LaunchPolicy::Concurrent),
    ] {
        let wl = BasicDual::new(policy);
        wl.add_address("10.1.2.3".parse().unwrap());
        wl.add_network("192.168.3.0/24".parse().unwrap());

        let probe = [192u8, 168, 3, 42];
        group.bench_function(name, |b| {
            b.iter(|| rt.block_on(wl.permitted(black_box(&probe))));
        });
    }

    group.finish();
}

criterion_group!(benches, network_scan_benchmarks, dual_policy_benchmarks);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use netforge::prelude::*;

/// A chain of `rungs` resistors between two rails, every node tapped to ground
/// through a capacitor.
fn ladder(rungs: usize) -> (Circuit, ComponentId) {
    let mut circuit = Circuit::new();
    let top = circuit.add_component("ladder");
    let input = circuit
        .add_interface(top, "input", InterfaceShape::Electrical)
        .unwrap();
    let gnd = circuit
        .add_interface(top, "gnd", InterfaceShape::Electrical)
        .unwrap();

    let mut node = input;
    for i in 0..rungs {
        let r = Resistor::new(&mut circuit, Parameter::constant(1e3))
            .and_then(|r| r.place(&mut circuit, top, &format!("r{}", i)))
            .unwrap();
        r.assign_smd_footprint(&mut circuit, SmdSize::I0603).unwrap();
        let c = Capacitor::new(&mut circuit, Parameter::constant(100e-9))
            .and_then(|c| c.place(&mut circuit, top, &format!("c{}", i)))
            .unwrap();
        c.assign_smd_footprint(&mut circuit, SmdSize::I0603).unwrap();

        circuit.connect(node, r.terminals[0]).unwrap();
        circuit.connect_via(r.terminals[1], c.component, gnd).unwrap();
        node = r.terminals[1];
    }
    (circuit, top)
}

fn bench_logical_nets(c: &mut Criterion) {
    let (circuit, top) = ladder(500);
    c.bench_function("logical_nets_500", |b| {
        b.iter(|| NetforgeCore::logical_nets(black_box(&circuit), black_box(top)));
    });
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    let options = ExtractionOptions::default();
    for rungs in [50, 500, 2000] {
        let (circuit, top) = ladder(rungs);
        group.bench_with_input(BenchmarkId::from_parameter(rungs), &rungs, |b, _| {
            b.iter(|| NetforgeCore::extract(black_box(&circuit), black_box(top), &options));
        });
    }
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build_ladder_500", |b| {
        b.iter(|| ladder(black_box(500)));
    });
}

criterion_group!(benches, bench_logical_nets, bench_extract, bench_build);
criterion_main!(benches);

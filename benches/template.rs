use barmon_core::{combine, parse_template, MonitorConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::HashMap;

const TEMPLATE: &str = "<fc=#8be9fd>Cpu:</fc> <total> <bar> u<user> s<system> | Mem: <usedratio>";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_template", |b| {
        b.iter(|| parse_template(black_box(TEMPLATE)))
    });
}

fn bench_combine(c: &mut Criterion) {
    let segments = parse_template(TEMPLATE);
    let values: HashMap<String, String> = ["total", "bar", "user", "system", "usedratio"]
        .iter()
        .enumerate()
        .map(|(i, key)| (key.to_string(), format!("{}%", i * 10)))
        .collect();

    c.bench_function("combine", |b| {
        b.iter(|| combine(black_box(&values), black_box(&segments)))
    });
}

fn bench_fill(c: &mut Criterion) {
    let config = MonitorConfig::new(TEMPLATE, &["total", "bar", "user", "system", "usedratio"]);
    let values = ["12%", "##::", "8%", "4%", "40%"];

    c.bench_function("fill_template", |b| {
        b.iter(|| barmon_core::fill_template(black_box(&config), black_box(&values)))
    });
}

criterion_group!(benches, bench_parse, bench_combine, bench_fill);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, Criterion};
use ollama_remote::storage::{join_for_display, parse_entries, ApEntry};
use ollama_remote::text::decode_bytes;
use std::hint::black_box;
use std::time::Duration;

fn saved_aps(count: usize) -> String {
    (0..count)
        .map(|i| format!("Network-{i}//password-{i}\r\n"))
        .collect()
}

pub fn bench_parse_saved_aps(c: &mut Criterion) {
    let content = saved_aps(200);
    c.bench_function("parse_200_saved_aps", |b| {
        b.iter(|| black_box(parse_entries(black_box(&content))))
    });
}

pub fn bench_join_ssids(c: &mut Criterion) {
    let entries = parse_entries(&saved_aps(200));
    let records: Vec<_> = entries.iter().filter_map(ApEntry::as_record).collect();
    c.bench_function("join_200_ssids", |b| {
        b.iter(|| black_box(join_for_display(records.iter().copied())))
    });
}

pub fn bench_decode_chunk(c: &mut Criterion) {
    let chunk: Vec<u8> = (0..1024u32).map(|i| (i % 256) as u8).collect();
    c.bench_function("decode_1k_chunk", |b| {
        b.iter(|| black_box(decode_bytes(black_box(&chunk))))
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_millis(300))
        .measurement_time(Duration::from_secs(2));
    targets = bench_parse_saved_aps, bench_join_ssids, bench_decode_chunk
}
criterion_main!(benches);

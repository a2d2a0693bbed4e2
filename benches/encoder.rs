#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};
use tson::prelude::*;

const N_BIG_ARR: usize = 2000;
const N_RECORDS: usize = 200;

#[derive(Clone, Debug, TsonRep, PartialEq)]
struct Record {
    id: u64,
    label: String,
    samples: Vec<i64>,
}

fn big_arr() -> Vec<i64> {
    (0..N_BIG_ARR as i64).collect()
}

fn big_records() -> Vec<Record> {
    (0..N_RECORDS as u64)
        .map(|id| Record {
            id,
            label: format!("record-{}", id),
            samples: (-5..5).map(|i| i * id as i64).collect(),
        })
        .collect()
}

fn bench_enc(c: &mut Criterion) {
    let records = big_records();
    let enc_len = to_bytes(&records).unwrap().len();
    c.bench_function(
        &format!("Encoding a record batch, output size of {} bytes", enc_len),
        move |b| b.iter(|| to_bytes(black_box(&records)).unwrap()),
    );
}

fn bench_dec(c: &mut Criterion) {
    let enc = to_bytes(&big_records()).unwrap();
    c.bench_function(
        &format!("Decoding a record batch, input size of {} bytes", enc.len()),
        move |b| {
            b.iter(|| {
                from_bytes::<Vec<Record>, _>(black_box(enc.as_slice())).unwrap()
            })
        },
    );
}

fn bench_enc_flat(c: &mut Criterion) {
    let big_arr = big_arr();
    let enc_len = to_bytes(&big_arr).unwrap().len();
    c.bench_function(
        &format!("Encoding an int vector, output size of {} bytes", enc_len),
        move |b| b.iter(|| to_bytes(black_box(&big_arr)).unwrap()),
    );
}

fn bench_dec_flat(c: &mut Criterion) {
    let enc = to_bytes(&big_arr()).unwrap();
    c.bench_function(
        &format!("Decoding an int vector of {} bytes", enc.len()),
        move |b| {
            b.iter(|| from_bytes::<Vec<i64>, _>(black_box(enc.as_slice())).unwrap())
        },
    );
}

fn bench_fingerprint(c: &mut Criterion) {
    c.bench_function("Fingerprinting a nested record type", |b| {
        b.iter(|| black_box(fingerprint_of::<Vec<Record>>()))
    });
}

criterion_group!(
    benches,
    bench_enc,
    bench_dec,
    bench_enc_flat,
    bench_dec_flat,
    bench_fingerprint
);
criterion_main!(benches);

//! Performance benchmarks for acknowledgement construction.
//!
//! Every uplink frame earns exactly one acknowledgement, so the
//! builder and encoder run once per received report. These benchmarks
//! isolate the build cost from the parse cost and measure the full
//! receive-to-acknowledge cycle a gateway executes per frame.
//!
//! Run benchmarks with:
//! ```sh
//! cargo bench --bench builder_bench
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lockwire_core::{DeviceCode, Imei, TrackerTimestamp};
use lockwire_protocol::{CommandCode, PacketParser, ResponseBuilder};
use std::hint::black_box;

const LOCK_FRAME: &str = "*CMDR,OM,863725031194523,161201150000,L1,1,1497689816,20#";

fn fixed_timestamp() -> TrackerTimestamp {
    TrackerTimestamp::parse_wire("161201150000")
        .expect("Valid timestamp token")
        .expect("Not the placeholder")
}

/// Benchmark building an acknowledgement from pre-validated parts.
fn bench_build_ack(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_ack");
    group.throughput(Throughput::Elements(1));

    let device_code: DeviceCode = "OM".parse().expect("Valid device code");
    let imei: Imei = "863725031194523".parse().expect("Valid IMEI");
    let timestamp = fixed_timestamp();

    group.bench_function("build_from_parts", |b| {
        b.iter(|| {
            let response = ResponseBuilder::new()
                .device_code(black_box(device_code.clone()))
                .imei(black_box(imei.clone()))
                .timestamp(timestamp)
                .command(CommandCode::LOCK)
                .build()
                .unwrap();
            black_box(response);
        });
    });

    group.finish();
}

/// Benchmark building with the server clock read included.
///
/// This is the path a live gateway takes for every acknowledgement.
fn bench_build_with_current_clock(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_with_current_clock");
    group.throughput(Throughput::Elements(1));

    let device_code: DeviceCode = "OM".parse().expect("Valid device code");
    let imei: Imei = "863725031194523".parse().expect("Valid IMEI");

    group.bench_function("build_with_clock_read", |b| {
        b.iter(|| {
            let response = ResponseBuilder::new()
                .device_code(black_box(device_code.clone()))
                .imei(black_box(imei.clone()))
                .with_current_timestamp()
                .command(CommandCode::HEARTBEAT)
                .build()
                .unwrap();
            black_box(response);
        });
    });

    group.finish();
}

/// Benchmark deriving an acknowledgement from a parsed packet.
fn bench_reply_to(c: &mut Criterion) {
    let mut group = c.benchmark_group("reply_to");
    group.throughput(Throughput::Elements(1));

    let packet = PacketParser::parse(LOCK_FRAME).expect("Valid frame");
    let timestamp = fixed_timestamp();

    group.bench_function("reply_to_packet", |b| {
        b.iter(|| {
            let response = ResponseBuilder::reply_to(black_box(&packet))
                .timestamp(timestamp)
                .build()
                .unwrap();
            black_box(response);
        });
    });

    group.finish();
}

/// Benchmark rendering a built response to wire bytes.
fn bench_encode_response(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_response");
    group.throughput(Throughput::Elements(1));

    let packet = PacketParser::parse(LOCK_FRAME).expect("Valid frame");
    let response = ResponseBuilder::reply_to(&packet)
        .timestamp(fixed_timestamp())
        .build()
        .expect("Valid response");

    group.bench_function("encode_to_bytes", |b| {
        b.iter(|| {
            let bytes = black_box(&response).encode();
            black_box(bytes);
        });
    });

    group.finish();
}

/// Benchmark the complete receive-to-acknowledge cycle.
fn bench_acknowledge_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("acknowledge_cycle");
    group.throughput(Throughput::Elements(1));

    let timestamp = fixed_timestamp();

    group.bench_function("parse_reply_encode", |b| {
        b.iter(|| {
            // 1. Parse the uplink frame
            let packet = PacketParser::parse(black_box(LOCK_FRAME)).unwrap();

            // 2. Derive the acknowledgement
            let response = ResponseBuilder::reply_to(&packet)
                .timestamp(timestamp)
                .build()
                .unwrap();

            // 3. Render it to wire bytes
            let bytes = response.encode();
            black_box(bytes);
        });
    });

    group.finish();
}

/// Benchmark acknowledgement throughput at batch sizes.
fn bench_ack_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("ack_throughput");

    let timestamp = fixed_timestamp();

    for batch_size in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*batch_size as u64));

        let packets: Vec<_> = (0..*batch_size)
            .map(|_| PacketParser::parse(LOCK_FRAME).expect("Valid frame"))
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            &packets,
            |b, packets| {
                b.iter(|| {
                    let mut total = 0;

                    for packet in packets {
                        let response = ResponseBuilder::reply_to(packet)
                            .timestamp(timestamp)
                            .build()
                            .unwrap();
                        total += response.encode().len();
                    }

                    black_box(total);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark building across the IMEI lengths seen in the field.
fn bench_imei_lengths(c: &mut Criterion) {
    let mut group = c.benchmark_group("imei_lengths");
    group.throughput(Throughput::Elements(1));

    let imeis = [
        ("5_digits", "97316"),
        ("10_digits", "8637250311"),
        ("15_digits", "863725031194523"),
    ];

    let device_code: DeviceCode = "OM".parse().expect("Valid device code");
    let timestamp = fixed_timestamp();

    for (name, imei) in imeis.iter() {
        let imei: Imei = imei.parse().expect("Valid IMEI");

        group.bench_with_input(BenchmarkId::from_parameter(name), &imei, |b, imei| {
            b.iter(|| {
                let bytes = ResponseBuilder::new()
                    .device_code(black_box(device_code.clone()))
                    .imei(black_box(imei.clone()))
                    .timestamp(timestamp)
                    .command(CommandCode::POSITION)
                    .build_bytes()
                    .unwrap();
                black_box(bytes);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build_ack,
    bench_build_with_current_clock,
    bench_reply_to,
    bench_encode_response,
    bench_acknowledge_cycle,
    bench_ack_throughput,
    bench_imei_lengths,
);

criterion_main!(benches);

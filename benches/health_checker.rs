//! 健康检测基准测试
//!
//! 测试响应体解码和指标数据点构造的开销

use criterion::{criterion_group, criterion_main, Criterion};
use etcd_monitor::health::HealthStatus;
use etcd_monitor::metrics::MetricPoint;
use std::hint::black_box;

/// 响应体解码基准测试
fn health_payload_benchmark(c: &mut Criterion) {
    c.bench_function("health_payload_decode", |b| {
        let body = br#"{"health":"true","reason":""}"#;
        b.iter(|| {
            let status = HealthStatus::from_slice(black_box(body)).unwrap();
            black_box(status)
        });
    });

    c.bench_function("health_payload_decode_invalid", |b| {
        let body = b"<html>502 Bad Gateway</html>";
        b.iter(|| black_box(HealthStatus::from_slice(black_box(body)).is_err()));
    });
}

/// 数据点构造基准测试
fn metric_point_benchmark(c: &mut Criterion) {
    c.bench_function("metric_point_creation", |b| {
        b.iter(|| {
            let point = MetricPoint::unhealthy_count(black_box(1.0), "prod-etcd", "etcd");
            black_box(point)
        });
    });
}

criterion_group!(benches, health_payload_benchmark, metric_point_benchmark);
criterion_main!(benches);

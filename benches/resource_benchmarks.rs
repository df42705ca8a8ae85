//! Resource Usage Benchmarks
//!
//! Measures baseline resource consumption:
//! - Memory footprint per actor (incremental: 1 → 10 → 50)
//! - Memory comparison: bounded vs unbounded mailboxes

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

// Layer 1: Standard library imports
use std::hint::black_box;
use std::time::Duration;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

// Layer 3: Internal module imports
use emberrt::mailbox::{AtomicMetrics, BoundedMailbox, UnboundedMailbox};
use emberrt::prelude::*;

#[derive(Debug, Clone)]
struct BenchMessage {
    value: u64,
}

impl Message for BenchMessage {
    const MESSAGE_TYPE: &'static str = "bench_message";
}

struct TestActor {
    state: u64,
}

#[async_trait]
impl Actor for TestActor {
    type Message = BenchMessage;
    type Error = std::convert::Infallible;

    async fn receive(&mut self, message: Self::Message, _ctx: &mut ActorContext<Self::Message>) -> Result<ReceiveOutcome, Self::Error> {
        self.state += message.value;
        Ok(ReceiveOutcome::Handled)
    }
}

/// Benchmark: memory per actor (incremental scaling), measured as the
/// cost of spawning N live incarnations in one system.
fn memory_per_actor_baseline(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("memory_per_actor");

    for actor_count in [1, 10, 50] {
        group.bench_with_input(BenchmarkId::from_parameter(actor_count), &actor_count, |b, &count| {
            b.to_async(&rt).iter(|| async move {
                let system = ActorSystem::new(SystemConfig::default());
                system
                    .register_prop::<TestActor, _>(PropsRegistry::default_prop_id::<TestActor>(), || TestActor { state: 0 }, MailboxKind::default(), None)
                    .unwrap();

                let mut refs = Vec::with_capacity(count);
                for i in 0..count {
                    let path = ActorPath::root().child(format!("actor-{i}"));
                    refs.push(system.actor_of::<TestActor>(path).await.unwrap());
                }

                black_box(refs);
            });
        });
    }

    group.finish();
}

/// Benchmark: mailbox memory comparison
fn mailbox_memory_comparison(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("mailbox_memory");

    group.bench_function("bounded_mailbox_100", |b| {
        b.to_async(&rt).iter(|| async {
            let mailboxes: Vec<_> = (0..10).map(|_| BoundedMailbox::<BenchMessage, AtomicMetrics>::new(100)).collect();
            black_box(mailboxes);
        });
    });

    group.bench_function("unbounded_mailbox", |b| {
        b.to_async(&rt).iter(|| async {
            let mailboxes: Vec<_> = (0..10).map(|_| UnboundedMailbox::<BenchMessage, AtomicMetrics>::new()).collect();
            black_box(mailboxes);
        });
    });

    group.finish();
}

/// Configure criterion for resource-conscious benchmarking
fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(30)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(2))
        .without_plots()
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets =
        memory_per_actor_baseline,
        mailbox_memory_comparison
}

criterion_main!(benches);

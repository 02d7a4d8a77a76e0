use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use miller::{SerializationFormat, Signer};
use std::hint::black_box;

#[allow(clippy::unwrap_used)]
fn bench_sign_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("sign_verify");
    let payload_sizes = [16usize, 256, 4096, 65536];

    for format in [
        SerializationFormat::Json,
        SerializationFormat::Bincode,
        SerializationFormat::MessagePack,
    ] {
        let signer = Signer::new("bench", vec![7u8; 32]).with_serializer(format);

        for &size in &payload_sizes {
            let payload = vec![0xA5u8; size];
            group.throughput(Throughput::Bytes(size as u64));

            group.bench_function(format!("sign_{}_{size}b", format.name()), |b| {
                b.iter(|| signer.sign(black_box(&payload)).unwrap())
            });

            let token = signer.sign(&payload).unwrap();
            group.bench_function(format!("verify_{}_{size}b", format.name()), |b| {
                b.iter(|| signer.verify::<Vec<u8>>(black_box(&token)).unwrap())
            });
        }
    }

    group.finish();
}

#[allow(clippy::unwrap_used)]
fn bench_rejection(c: &mut Criterion) {
    let signer = Signer::new("bench", vec![7u8; 32]);
    let token = signer.sign(&"x".repeat(256)).unwrap();
    let mut forged = token.clone().into_bytes();
    let last = forged.len() - 2;
    forged[last] = if forged[last] == b'A' { b'B' } else { b'A' };
    let forged = String::from_utf8(forged).unwrap();

    c.bench_function("verify_forged", |b| {
        b.iter_batched(
            || forged.clone(),
            |t| signer.verify::<String>(&t).is_err(),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_sign_verify, bench_rejection);
criterion_main!(benches);

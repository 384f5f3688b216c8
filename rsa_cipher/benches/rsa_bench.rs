use cipher_core::NoProgress;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rsa_cipher::{RsaCipher, RsaKeyGenerator};

fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    StdRng::seed_from_u64(0).fill_bytes(&mut buf);
    buf
}

fn bench_key_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("RSA key generation");
    group.sample_size(10);
    for bits in [128usize, 256, 512] {
        let generator = RsaKeyGenerator::new(bits);
        group.bench_with_input(BenchmarkId::from_parameter(bits), &generator, |b, generator| {
            let mut rng = StdRng::seed_from_u64(bits as u64);
            b.iter(|| generator.generate_with_rng(&mut rng).unwrap());
        });
    }
    group.finish();
}

fn bench_bytewise_encryption(c: &mut Criterion) {
    let keys = RsaKeyGenerator::new(512)
        .generate_with_rng(&mut StdRng::seed_from_u64(1))
        .unwrap();
    let rsa = RsaCipher::new(keys);
    let text = "The quick brown fox jumps over the lazy dog.";
    let data = random_bytes(4096);

    c.bench_function("RSA text encrypt", |b| b.iter(|| rsa.encrypt_text(text)));

    let ciphertext = rsa.encrypt_text(text);
    c.bench_function("RSA text decrypt", |b| {
        b.iter(|| rsa.decrypt_text(&ciphertext).unwrap())
    });

    c.bench_function("RSA file encode 4KiB", |b| {
        b.iter_batched(
            || data.clone(),
            |input| rsa.encode(&input, &NoProgress),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_key_generation, bench_bytewise_encryption);
criterion_main!(benches);

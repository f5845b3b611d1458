use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use symkey::cryptor::{self, Mode, Padding};
use symkey::wire;
use symkey::{generate_key, AesKeyLength, ByteBuffer, DesKeyLength, KeyType};

fn benchmark_cipher(c: &mut Criterion) {
    let mut group = c.benchmark_group("cipher");

    let sizes = [1024, 10 * 1024, 100 * 1024];
    let key_types = [
        KeyType::Aes(AesKeyLength::Aes128),
        KeyType::Aes(AesKeyLength::Aes256),
        KeyType::Des(DesKeyLength::Triple),
    ];

    for key_type in key_types {
        let key = generate_key(key_type).unwrap();
        let iv = symkey::random_bytes(key_type.block_size()).unwrap();
        for size in sizes {
            let payload = ByteBuffer::new(size);
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_function(format!("{}_cbc_pkcs7_{}kb", key_type, size / 1024), |b| {
                b.iter(|| {
                    cryptor::encrypt(
                        black_box(&payload),
                        black_box(&key),
                        Mode::Cbc,
                        Padding::Pkcs7,
                        Some(&iv),
                    )
                    .unwrap()
                });
            });
        }
    }

    group.finish();
}

fn benchmark_key_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_lifecycle");

    group.bench_function("generate_aes128", |b| {
        b.iter(|| generate_key(black_box(KeyType::Aes(AesKeyLength::Aes128))).unwrap());
    });

    let key = generate_key(KeyType::Aes(AesKeyLength::Aes256)).unwrap();
    let blob = wire::wrap(&key);
    group.bench_function("wrap_aes256", |b| {
        b.iter(|| wire::wrap(black_box(&key)));
    });
    group.bench_function("unwrap_aes256", |b| {
        b.iter(|| wire::unwrap(black_box(blob.as_bytes())).unwrap());
    });

    group.finish();
}

criterion_group!(benches, benchmark_cipher, benchmark_key_lifecycle);
criterion_main!(benches);

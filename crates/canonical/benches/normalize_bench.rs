use canonical::{normalize, NameMapping, NormalizationConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn bench_normalize(c: &mut Criterion) {
    let config = NormalizationConfig::default();
    let mapping = NameMapping::from_pairs([("dbo.", "PUBLIC."), ("[dbo].", "PUBLIC.")]);
    let mut group = c.benchmark_group("normalize");

    let statement = "SELECT [Id], ISNULL([Name], '') -- c\nFROM dbo.[Orders] /* b */ WITH (NOLOCK);\n";
    for size in [512, 4096, 32768].iter() {
        let text = statement.repeat(*size / statement.len() + 1);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("bytes_{size}"), |b| {
            b.iter(|| normalize(black_box(&text), black_box(&config), black_box(&mapping)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);

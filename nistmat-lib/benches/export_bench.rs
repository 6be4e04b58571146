use criterion::{Criterion, black_box, criterion_group, criterion_main};
use nistmat::{Catalog, build_document, build_user_materials, generate_mixture_name};

fn bench_catalog(c: &mut Criterion) {
    c.bench_function("catalog_new", |b| {
        b.iter(|| black_box(Catalog::new()));
    });

    c.bench_function("build_user_materials", |b| {
        b.iter(|| {
            let mut catalog = Catalog::new();
            black_box(build_user_materials(&mut catalog).unwrap());
        });
    });
}

fn bench_document(c: &mut Criterion) {
    c.bench_function("build_document_full", |b| {
        b.iter(|| {
            let mut catalog = Catalog::new();
            let derived = build_user_materials(&mut catalog).unwrap();
            let (document, _) = build_document(&mut catalog, &derived).unwrap();
            black_box(document.to_document_string());
        });
    });

    c.bench_function("generate_mixture_name", |b| {
        b.iter(|| {
            black_box(generate_mixture_name(
                black_box("Argon"),
                black_box("Isobutane"),
                black_box(2.0),
                black_box(1.4),
            ))
        });
    });
}

criterion_group!(benches, bench_catalog, bench_document);
criterion_main!(benches);

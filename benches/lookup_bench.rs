use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use xrm::Database;

// Test data generators

fn generate_database(entries: usize) -> Database {
    let mut text = String::new();
    for i in 0..entries {
        match i % 4 {
            0 => text.push_str(&format!("app{}.widget.background: color{}\n", i, i)),
            1 => text.push_str(&format!("app{}*foreground: color{}\n", i, i)),
            2 => text.push_str(&format!("*label{}: value{}\n", i, i)),
            _ => text.push_str(&format!("app{}.?.border: {}\n", i, i)),
        }
    }
    Database::from_string(&text)
}

fn bench_from_string(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_string");
    for size in [10, 100, 1000] {
        let mut text = String::new();
        for i in 0..size {
            text.push_str(&format!("app{}.widget.background: color{}\n", i, i));
        }
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| Database::from_string(black_box(text)));
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    for size in [10, 100, 1000] {
        let db = generate_database(size);
        let name = format!("app{}.widget.background", size / 2);
        group.bench_with_input(BenchmarkId::from_parameter(size), &db, |b, db| {
            b.iter(|| db.lookup(black_box(&name), None).unwrap());
        });
    }
    group.finish();
}

fn bench_lookup_with_class(c: &mut Criterion) {
    let db = generate_database(1000);
    c.bench_function("lookup_with_class_1000", |b| {
        b.iter(|| {
            db.lookup(
                black_box("app500.widget.background"),
                black_box(Some("App500.Widget.Background")),
            )
            .unwrap()
        });
    });
}

fn bench_serialize(c: &mut Criterion) {
    let db = generate_database(1000);
    c.bench_function("to_string_1000", |b| {
        b.iter(|| black_box(&db).to_string());
    });
}

criterion_group!(
    benches,
    bench_from_string,
    bench_lookup,
    bench_lookup_with_class,
    bench_serialize
);
criterion_main!(benches);

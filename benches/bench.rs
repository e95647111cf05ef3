// Criterion benchmarks for PetSpot Algo

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use petspot_algo::core::{breed::{normalize, BreedFilter}, least_favorited};
use petspot_algo::models::{Animal, FavoriteCounts};

const BREEDS: &[&str] = &[
    "Labrador Retriever Mix",
    "German Shepherd Dog / Husky",
    "Pit Bull Terrier (Mixed)",
    "Beagle",
    "Chihuahua-Dachshund",
    "Border Collie & Australian Shepherd",
    "Poodle, Standard",
    "Shih Tzu",
];

fn create_candidate(id: usize) -> Animal {
    let mut animal = Animal::with_id(format!("{:06}", id));
    animal.breed_string = BREEDS[id % BREEDS.len()].to_string();
    animal
}

fn create_counts(size: usize) -> FavoriteCounts {
    (0..size)
        .filter(|i| i % 3 != 0)
        .map(|i| (format!("{:06}", i), (i % 17) as u64))
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("breed_normalize", |b| {
        b.iter(|| normalize(black_box("Border Collie & Australian Shepherd Dog (Mixed)")));
    });
}

fn bench_breed_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("breed_filter");
    let selected = vec!["German Shepherd Dog".to_string(), "Beagle".to_string()];

    for size in [150, 200, 1000].iter() {
        let candidates: Vec<Animal> = (0..*size).map(create_candidate).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let filter = BreedFilter::new(&selected);
                candidates
                    .iter()
                    .filter(|a| filter.accepts(&a.breed_string))
                    .count()
            });
        });
    }

    group.finish();
}

fn bench_least_favorited(c: &mut Criterion) {
    let mut group = c.benchmark_group("least_favorited");

    for size in [100, 1000, 10000].iter() {
        let candidates: Vec<Animal> = (0..*size).map(create_candidate).collect();
        let counts = create_counts(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| least_favorited(black_box(&candidates), black_box(&counts), 3));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_breed_filter, bench_least_favorited);
criterion_main!(benches);

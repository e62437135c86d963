use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hidroweb::{reshape, reshape_lenient, ConsistencyLevel, DaySlot, Month, StationMonthRecord};

fn century_of_records() -> Vec<StationMonthRecord> {
    let mut records = Vec::with_capacity(100 * 12);
    for year in 1920..2020 {
        for month in 1..=12 {
            let mut record =
                StationMonthRecord::empty("02045012", Month(year, month), ConsistencyLevel::Consistent, "Chuva");
            for day in 1..=31u32 {
                record = match day % 7 {
                    0 => record,
                    1 => record.with_day(day, DaySlot::Text(format!("{}.5", day))),
                    _ => record.with_day(day, day as f64),
                };
            }
            records.push(record);
        }
    }
    records
}

fn bench_reshape(c: &mut Criterion) {
    let records = century_of_records();
    c.bench_function("reshape", |b| b.iter(|| reshape(black_box(&records))));
    c.bench_function("reshape_lenient", |b| {
        b.iter(|| reshape_lenient(black_box(&records)))
    });
}

criterion_group!(benches, bench_reshape);
criterion_main!(benches);

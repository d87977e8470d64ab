use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gressbar::test_utils::SharedBuffer;
use gressbar::{ActivityLock, BarConfig, IndeterminateBar, MultiBar, PercentageBar, Start, ValueBar};

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_for");

    for width in [10, 50, 200].iter() {
        let config = BarConfig::new().width(*width).show_value(true);
        let value = ValueBar::new(1000.0, &config).unwrap();
        let percentage = PercentageBar::new(&config).unwrap();
        let mut indeterminate = IndeterminateBar::new(&config).unwrap();

        group.bench_with_input(BenchmarkId::new("value", width), width, |b, _| {
            b.iter(|| value.text_for(black_box(437.0)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("percentage", width), width, |b, _| {
            b.iter(|| percentage.text_for(black_box(43.7)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("indeterminate", width), width, |b, _| {
            b.iter(|| indeterminate.next_text())
        });
    }

    let config = BarConfig::new().width(25);
    let mut multi = MultiBar::default();
    multi
        .add(ValueBar::new(3.0, &config).unwrap())
        .add(PercentageBar::new(&config).unwrap())
        .add(IndeterminateBar::new(&config).unwrap());
    group.bench_function("multi", |b| {
        b.iter(|| multi.next_text(black_box(&[2.0, 50.0, 0.0])).unwrap())
    });

    group.finish();
}

fn bench_redraw(c: &mut Criterion) {
    let lock = ActivityLock::new();
    let config = BarConfig::new().width(50).show_value(true);

    c.bench_function("redraw_percentage_bar", |b| {
        b.iter(|| {
            let mut bar = PercentageBar::new(&config)
                .unwrap()
                .start_with_lock(SharedBuffer::new(), &lock)
                .unwrap();
            for part in 0..=100 {
                bar.update(part as f64).unwrap();
            }
            bar.stop().unwrap();
        })
    });
}

criterion_group!(benches, bench_formatting, bench_redraw);
criterion_main!(benches);

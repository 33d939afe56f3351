use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use signage_slide_renderer::config::LayoutConfig;
use signage_slide_renderer::ir::{LayoutSpec, MultiLayout, SlideContent};
use signage_slide_renderer::layout::{compute_fact_layout, compute_multi_layout, compute_slide_layout, resolve_layout, wrap_text};
use signage_slide_renderer::render::{render_svg, to_data_uri};
use signage_slide_renderer::theme::Theme;
use std::hint::black_box;

const SINGLE_LAYOUTS: [&str; 6] = ["centered", "left-aligned", "card", "minimal", "elegant", "modern-grid"];

fn menu_item(i: usize) -> SlideContent {
    SlideContent::new(format!("Kabuli Pulao {i}"))
        .with_description(
            "Traditional Afghan rice dish with tender lamb, caramelized carrots, raisins and \
             slivered almonds, slow cooked with cumin and cardamom",
        )
        .with_price(15.99 + i as f64)
        .with_tags(["Halal", "Spicy"])
        .with_image("data:image/png;base64,iVBORw0KGgo=")
}

fn long_text(words: usize) -> String {
    let vocabulary = ["saffron", "lamb", "cardamom", "bolani", "with", "mint", "yogurt", "i", "W"];
    (0..words)
        .map(|i| vocabulary[i % vocabulary.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_wrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("wrap");
    for words in [20usize, 200, 2000] {
        let text = long_text(words);
        group.bench_with_input(BenchmarkId::from_parameter(words), &text, |b, text| {
            b.iter(|| {
                let lines = wrap_text(black_box(text), 24.0, 800.0);
                black_box(lines.len());
            });
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let theme = Theme::default();
    let config = LayoutConfig::default();
    let item = menu_item(0);
    for name in SINGLE_LAYOUTS {
        let spec = resolve_layout(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), &item, |b, item| {
            b.iter(|| {
                let scene = compute_slide_layout(spec, black_box(item), &theme, &config);
                black_box(scene.elements.len());
            });
        });
    }
    let items: Vec<SlideContent> = (0..8).map(menu_item).collect();
    for layout in [MultiLayout::Grid2x2, MultiLayout::Grid3x2, MultiLayout::MenuStyle, MultiLayout::MultiGrid] {
        group.bench_with_input(BenchmarkId::new("multi", format!("{layout:?}")), &items, |b, items| {
            b.iter(|| {
                let scene = compute_multi_layout(layout, black_box(items), &theme, &config);
                black_box(scene.elements.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let theme = Theme::warm_rustic();
    let config = LayoutConfig::default();
    let item = menu_item(1);
    group.bench_function("centered_data_uri", |b| {
        b.iter(|| {
            let scene = compute_slide_layout(LayoutSpec::default(), black_box(&item), &theme, &config);
            black_box(to_data_uri(&render_svg(&scene)).len());
        });
    });
    let fact = SlideContent::new(long_text(60));
    group.bench_function("fact_card", |b| {
        b.iter(|| {
            let scene = compute_fact_layout(black_box(&fact), &theme, &config);
            black_box(render_svg(&scene).len());
        });
    });
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_wrap, bench_layout, bench_end_to_end
);
criterion_main!(benches);

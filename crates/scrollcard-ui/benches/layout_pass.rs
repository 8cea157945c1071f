use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scrollcard_testing::{stacked_blocks, wrapped_text, CardHost};
use scrollcard_ui::{NodeId, Size};

const ROOT_SIZE: Size = Size {
    width: 1080.0,
    height: 1920.0,
};
const STACK_SAMPLES: &[usize] = &[4, 16, 64, 128, 256, 512];

struct CardFixture {
    host: CardHost,
    content: NodeId,
}

impl CardFixture {
    fn stacked(blocks: usize) -> Self {
        let mut host = CardHost::new(ROOT_SIZE);
        let heights: Vec<f32> = (0..blocks).map(|index| 24.0 + (index % 5) as f32 * 8.0).collect();
        let content = stacked_blocks(host.tree_mut(), &heights).expect("stacked content");
        host.set_content(Some(content)).expect("attach content");
        Self { host, content }
    }

    fn relayout(&mut self) -> usize {
        self.host.tree_mut().set_needs_layout();
        self.host.layout().expect("layout").passes
    }
}

fn bench_settled_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("card_settled_pass");
    for &blocks in STACK_SAMPLES {
        group.bench_with_input(BenchmarkId::new("blocks", blocks), &blocks, |b, &blocks| {
            let mut fixture = CardFixture::stacked(blocks);
            // Settle the height constant so a single pass is measured.
            fixture.relayout();

            b.iter(|| {
                black_box(fixture.relayout());
            });
        });
    }
    group.finish();
}

fn bench_content_swap(c: &mut Criterion) {
    let mut fixture = CardFixture::stacked(32);
    fixture.relayout();
    let alternate = wrapped_text(fixture.host.tree_mut(), 2_000, 9.0, 18.0);
    let original = fixture.content;
    let mut showing_original = true;

    c.bench_function("card_content_swap", |b| {
        b.iter(|| {
            let next = if showing_original { alternate } else { original };
            showing_original = !showing_original;
            fixture.host.set_content(Some(next)).expect("swap content");
            black_box(fixture.host.layout().expect("layout"));
        });
    });
}

criterion_group!(layout_pass, bench_settled_pass, bench_content_swap);
criterion_main!(layout_pass);

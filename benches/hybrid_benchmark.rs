//! Benchmarks for docsift page decisions and text assembly.
//!
//! Run with: cargo bench
//!
//! These benchmarks use in-memory page sources, so no external tools are
//! needed and only the library's own overhead is measured.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docsift::error::Result;
use docsift::{
    assemble, HybridExtractor, ImageFormat, OcrEngine, PageSelection, PageSource, RasterImage,
};

/// Synthetic document where every third page has no text layer.
struct SyntheticSource {
    pages: Vec<String>,
}

impl SyntheticSource {
    fn new(page_count: usize) -> Self {
        let pages = (0..page_count)
            .map(|i| {
                if i % 3 == 2 {
                    String::new()
                } else {
                    format!(
                        "Page {} - Benchmark test content for docsift text layer measurement.",
                        i + 1
                    )
                }
            })
            .collect();
        Self { pages }
    }
}

impl PageSource for SyntheticSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn read_text_layer(&self, page: u32) -> Result<String> {
        Ok(self.pages[page as usize - 1].clone())
    }

    fn rasterize_page(&self, page: u32) -> Result<RasterImage> {
        Ok(RasterImage::new(page, ImageFormat::Png, vec![0u8; 64]))
    }
}

struct InstantOcr;

impl OcrEngine for InstantOcr {
    fn recognize(&self, image: &RasterImage, _language: &str) -> Result<String> {
        Ok(format!("recognized page {}", image.page))
    }
}

/// Benchmark the per-page decision at various document sizes.
fn bench_hybrid_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("hybrid_extraction");

    for page_count in [1, 10, 100].iter() {
        let source = SyntheticSource::new(*page_count);
        let extractor = HybridExtractor::new(InstantOcr, "eng");

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| extractor.extract(black_box(&source)));
        });
    }

    group.finish();
}

/// Benchmark assembling extracted fragments into text.
fn bench_assemble(c: &mut Criterion) {
    let source = SyntheticSource::new(100);
    let result = HybridExtractor::new(InstantOcr, "eng").extract(&source);

    c.bench_function("assemble_100_pages", |b| {
        b.iter(|| assemble(black_box(&result)));
    });
}

/// Benchmark page selection parsing.
fn bench_page_selection(c: &mut Criterion) {
    c.bench_function("page_selection_parse", |b| {
        b.iter(|| PageSelection::parse(black_box("1-5,8,10-20,3")).unwrap());
    });
}

criterion_group!(
    benches,
    bench_hybrid_extraction,
    bench_assemble,
    bench_page_selection,
);
criterion_main!(benches);

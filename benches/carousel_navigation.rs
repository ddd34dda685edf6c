// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for gallery browsing.
//!
//! Measures the performance of:
//! - Carousel navigation (next/previous/select) on a full gallery
//! - Building the render snapshot with resolved URLs
//! - Upload selection (type filter and capacity limit)

use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use mockup_gallery::application::gallery::GalleryPhase;
use mockup_gallery::application::query::GalleryView;
use mockup_gallery::domain::gallery::Carousel;
use mockup_gallery::domain::mockup::{
    capacity_bounds, CandidateFile, MaxImages, Mockup, MockupId, ProjectId, UploadSelection,
};
use std::hint::black_box;

const PUBLIC_BASE: &str = "https://demo.example.co/storage/v1/object/public/project-mockups";

/// A gallery filled to the largest allowed capacity.
fn full_gallery() -> Carousel<Mockup> {
    let project = ProjectId::new("rms").unwrap();
    let mockups = (0..capacity_bounds::MAX_IMAGES)
        .map(|i| Mockup {
            id: MockupId::new(format!("mockup-{i}")),
            project_id: project.clone(),
            file_name: format!("screen-{i}.png"),
            file_path: format!("rms/{}_screen-{i}.png", 1_700_000_000_000_i64 + i as i64),
            file_size: Some(256 * 1024),
            mime_type: Some("image/png".to_string()),
            uploaded_at: Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap(),
        })
        .collect();
    Carousel::from_items(mockups)
}

/// Benchmark cursor moves.
fn bench_navigate(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel_navigation");
    let gallery = full_gallery();

    group.bench_function("next_full_cycle", |b| {
        b.iter(|| {
            let mut carousel = gallery.clone();
            for _ in 0..carousel.len() {
                black_box(carousel.next());
            }
        });
    });

    group.bench_function("previous_wraparound", |b| {
        b.iter(|| {
            let mut carousel = gallery.clone();
            black_box(carousel.previous());
        });
    });

    group.bench_function("select_thumbnail", |b| {
        b.iter(|| {
            let mut carousel = gallery.clone();
            black_box(carousel.select(black_box(capacity_bounds::MAX_IMAGES / 2)));
        });
    });

    group.finish();
}

/// Benchmark render snapshots.
///
/// URL resolution runs once per thumbnail plus once for the main preview.
fn bench_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel_navigation");
    let gallery = full_gallery();

    group.bench_function("build_view", |b| {
        b.iter(|| {
            black_box(GalleryView::build(
                &gallery,
                MaxImages::new(capacity_bounds::MAX_IMAGES),
                GalleryPhase::Idle,
                |path| format!("{PUBLIC_BASE}/{path}"),
            ))
        });
    });

    group.finish();
}

/// Benchmark upload filtering on a mixed batch.
fn bench_upload_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("carousel_navigation");
    let batch: Vec<CandidateFile> = (0..40)
        .map(|i| {
            let declared = match i % 4 {
                0 => "image/png",
                1 => "image/jpeg",
                2 => "image/gif",
                _ => "application/pdf",
            };
            CandidateFile::new(format!("file-{i}"), declared, vec![0; 64])
        })
        .collect();

    group.bench_function("select_mixed_batch", |b| {
        b.iter(|| {
            black_box(UploadSelection::select(
                batch.clone(),
                MaxImages::default(),
                black_box(3),
            ))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_navigate, bench_view, bench_upload_selection);
criterion_main!(benches);

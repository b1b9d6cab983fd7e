// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cicerone-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cicerone and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use cicerone::model::{CourseId, ElementId};
use cicerone::page::highlight::{HighlightController, PickMode};
use cicerone::page::locator::locate_targets;
use cicerone::page::{CoursePage, PageElement};
use cicerone::render::render_page_unicode;

fn eid(value: &str) -> ElementId {
    ElementId::new(value).expect("element id")
}

fn large_page(sections: usize, modules_per_section: usize) -> CoursePage {
    let mut page = CoursePage::new(CourseId::new(1));
    page.push_element(PageElement::header(eid("page-header")));
    for s in 0..sections {
        page.push_element(PageElement::section(
            eid(&format!("section-{s}")),
            format!("Section {s}"),
        ));
        for m in 0..modules_per_section {
            page.push_element(PageElement::module(
                eid(&format!("module-{s}-{m}")),
                format!("Activity {s}.{m}"),
            ));
        }
    }
    page
}

fn bench_locate(c: &mut Criterion) {
    let page = large_page(50, 8);
    c.bench_function("locate_targets/50x8", |b| {
        b.iter(|| {
            let candidates = locate_targets(black_box(&page));
            black_box(candidates.sections().len() + candidates.modules().len())
        })
    });
}

fn bench_highlight_cycle(c: &mut Criterion) {
    let page = large_page(50, 8);
    c.bench_function("highlight/enter_free_then_remove/50x8", |b| {
        b.iter_batched(
            || page.clone(),
            |mut page| {
                let mut controller = HighlightController::new();
                controller.enter(&mut page, PickMode::Free);
                controller.remove(&mut page);
                black_box(page)
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("highlight/enter_sticky_then_remove/50x8", |b| {
        b.iter_batched(
            || page.clone(),
            |mut page| {
                let mut controller = HighlightController::new();
                controller.enter(&mut page, PickMode::Sticky);
                controller.remove(&mut page);
                black_box(page)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_render(c: &mut Criterion) {
    let mut page = large_page(50, 8);
    let mut controller = HighlightController::new();
    controller.enter(&mut page, PickMode::Free);
    c.bench_function("render_page_unicode/50x8", |b| {
        b.iter(|| black_box(render_page_unicode(black_box(&page))).len())
    });
}

criterion_group!(benches, bench_locate, bench_highlight_cycle, bench_render);
criterion_main!(benches);

//! Benchmarks for character page extraction at varying page sizes.
//!
//! Run with: `cargo bench --bench extract_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lodestone_jobs::extract::job::{is_name_candidate, parse_exp_pair};
use lodestone_jobs::extract::{map_category, parse_character_page, reconstruct_source};

const SECTIONS: &[&str] = &[
    "Tank",
    "Healer",
    "Melee DPS",
    "Physical Ranged DPS",
    "Magical Ranged DPS",
    "Limited Jobs",
    "Disciples of the Hand",
    "Disciples of the Land",
];

/// Generate a character page with `jobs_per_section` items in every section.
fn generate_page(jobs_per_section: usize) -> String {
    let mut html = String::from(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Character</title></head>
<body>
<div class="frame__chara"><p class="frame__chara__name">Bench Mark</p><p class="frame__chara__world">Gilgamesh [Aether]</p></div>
"#,
    );

    for section in SECTIONS {
        html.push_str(&format!(
            "<h4 class=\"heading--lead\"><img src=\"https://img.example/{section}.png\">{section}</h4>\n<ul class=\"character__job\">\n"
        ));
        for i in 0..jobs_per_section {
            let level = if i % 3 == 0 { "-".to_string() } else { (i % 100).to_string() };
            let exp = if i % 3 == 0 { "- / -".to_string() } else { format!("{},000 / 9,999,999", i) };
            html.push_str(&format!(
                "  <li><i class=\"character__job__icon\"><img src=\"https://img.example/job{i}.png\"></i>\
                 <div class=\"character__job__level\">{level}</div>\
                 <div class=\"character__job__name js__tooltip\" data-tooltip=\"Job {i} / Class {i}\">Job {i}</div>\
                 <div class=\"character__job__exp\">{exp}</div></li>\n"
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</body></html>");
    html
}

/// Render `html` the way a browser's view-source page does.
fn as_view_source(html: &str) -> String {
    let mut dump = String::from("<html><body><table>");
    for (idx, line) in html.lines().enumerate() {
        let escaped = line
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        dump.push_str(&format!(
            "<tr><td class=\"line-number\" value=\"{}\"></td><td class=\"line-content\"><span class=\"html-tag\">{escaped}</span></td></tr>",
            idx + 1
        ));
    }
    dump.push_str("</table></body></html>");
    dump
}

fn bench_parse_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_character_page");

    let sizes: &[(usize, &str)] = &[(4, "4_per_section"), (32, "32_per_section"), (128, "128_per_section")];

    for &(jobs, label) in sizes {
        let html = generate_page(jobs);
        let dump = as_view_source(&html);

        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::new("plain", label), &html, |b, html| {
            b.iter(|| black_box(parse_character_page(black_box(html))));
        });

        group.throughput(Throughput::Bytes(dump.len() as u64));
        group.bench_with_input(BenchmarkId::new("view_source", label), &dump, |b, dump| {
            b.iter(|| black_box(parse_character_page(black_box(dump))));
        });
    }

    group.finish();
}

fn bench_reconstruct(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruct_source");

    let html = generate_page(32);
    let dump = as_view_source(&html);

    // Pass-through path (no line cells)
    group.bench_function("passthrough", |b| {
        b.iter(|| black_box(reconstruct_source(black_box(&html))));
    });

    group.bench_function("view_source", |b| {
        b.iter(|| black_box(reconstruct_source(black_box(&dump))));
    });

    group.finish();
}

fn bench_field_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_rules");

    group.bench_function("map_category", |b| {
        b.iter(|| {
            for label in ["tank", "magical ranged dps", "disciples of the land", "unknown"] {
                black_box(map_category(black_box(label)));
            }
        });
    });

    group.bench_function("exp_pair", |b| {
        b.iter(|| black_box(parse_exp_pair(black_box("1,234,567 / 9,999,999"))));
    });

    group.bench_function("name_candidate", |b| {
        b.iter(|| black_box(is_name_candidate(black_box("Gunbreaker"))));
    });

    group.finish();
}

criterion_group!(benches, bench_parse_page, bench_reconstruct, bench_field_rules);

criterion_main!(benches);

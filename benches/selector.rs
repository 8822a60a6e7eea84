//! Benchmarks for selector matching and scheme resolution
//!
//! Run with: cargo bench --bench selector

use scopelens::matcher::ColorSchemeMatcher;
use scopelens::selector::{ScopePath, Selector};
use scopelens::theme::{ThemeRuleSet, LENS_DARK_YAML};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

const SELECTORS: &[&str] = &[
    "comment",
    "string.quoted",
    "keyword, storage",
    "entity.name.function, support.function",
    "source.python meta.function string",
    "string -string.quoted",
];

const SCOPES: &[&str] = &[
    "comment.line.double-slash",
    "source.python string.quoted.double",
    "source.js meta.function entity.name.function",
    "text.html.markdown markup.heading.1",
    "source.rust keyword.control.flow",
];

#[divan::bench]
fn parse_selectors(bencher: divan::Bencher) {
    bencher.bench(|| {
        for selector in SELECTORS {
            divan::black_box(Selector::parse(selector).unwrap());
        }
    });
}

#[divan::bench]
fn match_selectors(bencher: divan::Bencher) {
    let selectors: Vec<Selector> = SELECTORS
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect();
    let scopes: Vec<ScopePath> = SCOPES.iter().map(|s| ScopePath::parse(s)).collect();

    bencher.bench(|| {
        for selector in &selectors {
            for scope in &scopes {
                divan::black_box(selector.matches(scope));
            }
        }
    });
}

#[divan::bench]
fn resolve_uncached(bencher: divan::Bencher) {
    bencher
        .with_inputs(|| ColorSchemeMatcher::new(ThemeRuleSet::from_yaml(LENS_DARK_YAML).unwrap()))
        .bench_values(|matcher| {
            for scope in SCOPES {
                divan::black_box(matcher.resolve(scope));
            }
        });
}

#[divan::bench]
fn resolve_cached(bencher: divan::Bencher) {
    let matcher = ColorSchemeMatcher::new(ThemeRuleSet::from_yaml(LENS_DARK_YAML).unwrap());
    for scope in SCOPES {
        matcher.resolve(scope);
    }

    bencher.bench(|| {
        for scope in SCOPES {
            divan::black_box(matcher.resolve(scope));
        }
    });
}

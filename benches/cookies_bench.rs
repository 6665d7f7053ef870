use cookielens::cookies::pagevisit::{generate_page_visit_cookies, PageVisit};
use cookielens::cookies::{normalize_cookie, CookieRecord};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_normalize(c: &mut Criterion) {
    let raw = CookieRecord {
        value: "GA1.1.123".into(),
        expiration_date: Some(1_800_000_000.0),
        same_site: Some("no_restriction".into()),
        ..CookieRecord::new("_ga", ".sub.example.co.uk", "/")
    };

    c.bench_function("normalize_cookie", |b| {
        b.iter(|| normalize_cookie(black_box(&raw), black_box("https://www.example.co.uk/home")))
    });
}

fn benchmark_page_visits(c: &mut Criterion) {
    let visits: Vec<PageVisit> = (0..20)
        .map(|page| {
            let cookies = (0..50)
                .map(|i| CookieRecord::new(format!("cookie{}", i), ".example.com", "/"))
                .collect();
            PageVisit::new(format!("https://example.com/page/{}", page), cookies)
        })
        .collect();

    c.bench_function("page_visit_aggregation_20x50", |b| {
        b.iter(|| black_box(generate_page_visit_cookies(black_box(&visits))))
    });
}

criterion_group!(benches, benchmark_normalize, benchmark_page_visits);
criterion_main!(benches);

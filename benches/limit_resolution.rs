use std::sync::Arc;
use std::thread;
use std::time::Duration;

use build_quota_hub::bench_support::{mixed_apps, PlanFixture};
use build_quota_hub::build_limits::{Application, Plan, User, FREE_PLAN, ORGANIZATION_PLAN};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_limit_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("limit_resolution");
    group
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));

    let fixture = PlanFixture::new();
    for plan in Plan::ALL {
        let tenant = fixture.tenant(plan);
        let cases: [(&str, &dyn Application); 4] = [
            ("private", &tenant.private_app),
            ("public_default", &tenant.default_app),
            ("public_custom", &tenant.custom_app),
            ("public_inherited", &tenant.inherited_app),
        ];
        for (name, app) in cases {
            group.bench_function(BenchmarkId::new(name, plan), |b| {
                b.iter(|| black_box(app.limit()))
            });
        }
    }

    let user = User::new(FREE_PLAN);
    let apps = mixed_apps(&user, 64);
    group.bench_function("mixed_apps_64", |b| {
        b.iter(|| {
            for app in &apps {
                black_box(app.limit());
            }
        })
    });

    group.finish();
}

fn bench_contended_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended_reads");
    group.sample_size(20);

    group.bench_function("private_app_during_plan_changes", |b| {
        let user = User::new(FREE_PLAN);
        let app = Arc::new(user.upload_private_app());
        b.iter(|| {
            let readers: Vec<_> = (0..4)
                .map(|_| {
                    let app = Arc::clone(&app);
                    thread::spawn(move || {
                        for _ in 0..1_000 {
                            black_box(app.limit());
                        }
                    })
                })
                .collect();
            for round in 0..100 {
                let next = if round % 2 == 0 {
                    ORGANIZATION_PLAN
                } else {
                    FREE_PLAN
                };
                user.change_plan(next);
            }
            for reader in readers {
                reader.join().expect("reader thread");
            }
        });
    });

    group.finish();
}

criterion_group!(limit_benches, bench_limit_resolution, bench_contended_reads);
criterion_main!(limit_benches);

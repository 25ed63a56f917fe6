//! Scoring benchmark: feature vector → per-modality score (low-latency request path).

use behavioral_auth::features::{FeatureSchema, FeatureVector};
use behavioral_auth::model::{BoundaryBundle, Kernel, OneClassSvm, StandardScaler, SvmArtifact};
use behavioral_auth::scoring;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn svm(dim: usize, n_support: usize) -> OneClassSvm {
    OneClassSvm::from_artifact(SvmArtifact {
        kernel: Kernel::Rbf { gamma: 0.1 },
        support_vectors: (0..n_support)
            .map(|i| vec![i as f64 / n_support as f64; dim])
            .collect(),
        dual_coef: vec![1.0 / n_support as f64; n_support],
        intercept: -0.5,
    })
    .unwrap()
}

fn bench_motion_score(c: &mut Criterion) {
    let bundle = BoundaryBundle::new(Box::new(svm(12, 64)), Some(StandardScaler::identity(12)));
    let fv = FeatureVector::new(FeatureSchema::Motion, vec![0.1; 12]).unwrap();

    c.bench_function("motion_score_64sv", |b| {
        b.iter(|| scoring::boundary::score(&bundle, black_box(&fv)))
    });
}

fn bench_boundary_by_support(c: &mut Criterion) {
    let fv = FeatureVector::new(FeatureSchema::Tap, vec![110.0, 5.5]).unwrap();

    let mut g = c.benchmark_group("tap_score_by_support_vectors");
    for n in [16, 64, 256, 1024] {
        let bundle = BoundaryBundle::new(Box::new(svm(2, n)), None);
        g.bench_function(format!("sv_{}", n).as_str(), |b| {
            b.iter(|| scoring::boundary::score(&bundle, black_box(&fv)))
        });
    }
    g.finish();
}

criterion_group!(benches, bench_motion_score, bench_boundary_by_support);
criterion_main!(benches);

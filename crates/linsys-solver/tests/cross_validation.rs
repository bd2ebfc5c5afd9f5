//! Cross-method properties on square, rectangular and degenerate systems.

use approx::assert_abs_diff_eq;
use linsys_solver::{
    DMatrix, DVector, Execution, FailureKind, Method, Orchestrator, SolverPolicy, matrix_from_rows,
    vector_from_slice,
};

fn system(rows: &[Vec<f64>], rhs: &[f64]) -> (DMatrix<f64>, DVector<f64>) {
    (
        matrix_from_rows(rows).expect("valid matrix"),
        vector_from_slice(rhs),
    )
}

/// Diagonally dominant matrices of several orders, deterministic entries.
fn well_conditioned(n: usize) -> (DMatrix<f64>, DVector<f64>) {
    let a = DMatrix::from_fn(n, n, |i, j| {
        if i == j {
            (2 * n + i) as f64
        } else {
            ((i * 7 + j * 3) % 5) as f64 - 2.0
        }
    });
    let b = DVector::from_fn(n, |i, _| (i as f64) * 1.5 - 3.0);
    (a, b)
}

#[test]
fn all_methods_agree_on_well_conditioned_systems() {
    let orchestrator = Orchestrator::default();
    for n in 1..=7 {
        let (a, b) = well_conditioned(n);
        let report = orchestrator.run_all(&a, &b);
        assert!(report.all_succeeded(), "order {n}: {report:?}");

        let check = report.cross_check(1e-6);
        assert_eq!(check.compared, 3);
        assert!(check.agree, "order {n}: deviation {}", check.max_deviation);

        for entry in &report.entries {
            assert!(entry.residual_norm.unwrap() < 1e-4, "order {n}: {entry:?}");
        }
    }
}

#[test]
fn two_by_two_reference_solution() {
    let (a, b) = system(&[vec![2.0, 1.0], vec![1.0, 3.0]], &[3.0, 5.0]);
    let report = Orchestrator::default().run_all(&a, &b);
    for method in Method::ALL {
        assert_eq!(report.solution(method), Some(&[0.8, 1.4][..]), "{method}");
    }
}

#[test]
fn textbook_three_by_three_solution() {
    let (a, b) = system(
        &[
            vec![2.0, 1.0, -1.0],
            vec![-3.0, -1.0, 2.0],
            vec![-2.0, 1.0, 2.0],
        ],
        &[8.0, -11.0, -3.0],
    );
    let report = Orchestrator::default().run_all(&a, &b);
    for method in Method::ALL {
        let x = report.solution(method).expect("solved");
        assert_abs_diff_eq!(x[0], 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(x[1], 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(x[2], -1.0, epsilon = 1e-6);
    }
}

#[test]
fn dependent_consistent_system() {
    let (a, b) = system(&[vec![1.0, 2.0], vec![2.0, 4.0]], &[3.0, 6.0]);
    let report = Orchestrator::default().run_all(&a, &b);

    let kind = |m| report.get(m).and_then(|e| e.outcome.failure_kind());
    assert_eq!(kind(Method::Gauss), Some(FailureKind::InfiniteSolutions));
    assert_eq!(kind(Method::GaussJordan), Some(FailureKind::InfiniteSolutions));
    assert_eq!(kind(Method::Cramer), Some(FailureKind::SingularMatrix));
}

#[test]
fn dependent_inconsistent_system() {
    let (a, b) = system(&[vec![1.0, 2.0], vec![2.0, 4.0]], &[3.0, 7.0]);
    let report = Orchestrator::default().run_all(&a, &b);

    let kind = |m| report.get(m).and_then(|e| e.outcome.failure_kind());
    assert_eq!(kind(Method::Gauss), Some(FailureKind::InconsistentSystem));
    assert_eq!(kind(Method::GaussJordan), Some(FailureKind::InconsistentSystem));
    assert_eq!(kind(Method::Cramer), Some(FailureKind::SingularMatrix));
}

#[test]
fn wide_system_only_fails_cramer_on_shape() {
    let (a, b) = system(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]], &[1.0, 2.0]);
    let report = Orchestrator::default().run_all(&a, &b);

    let gauss = report.get(Method::Gauss).unwrap();
    assert_eq!(
        gauss.outcome.failure_kind(),
        Some(FailureKind::InfiniteSolutions)
    );
    assert!(gauss.outcome.rank().unwrap() <= 2);

    let cramer = report.get(Method::Cramer).unwrap();
    assert_eq!(
        cramer.outcome.failure_kind(),
        Some(FailureKind::ShapeMismatch)
    );
    assert!(cramer.detail().unwrap().contains("square"));
}

#[test]
fn mismatched_vector_is_rejected_by_every_method() {
    let a = matrix_from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
    let b = vector_from_slice(&[1.0, 2.0, 3.0]);
    let report = Orchestrator::default().run_all(&a, &b);
    for entry in &report.entries {
        assert_eq!(
            entry.outcome.failure_kind(),
            Some(FailureKind::ShapeMismatch)
        );
        assert!(entry.detail().unwrap().contains("dimension mismatch"));
    }
}

#[test]
fn gauss_and_gauss_jordan_ranks_match() {
    let cases: Vec<(Vec<Vec<f64>>, Vec<f64>)> = vec![
        (vec![vec![1.0, 2.0], vec![2.0, 4.0]], vec![3.0, 6.0]),
        (vec![vec![1.0, 2.0], vec![2.0, 4.0]], vec![3.0, 7.0]),
        (vec![vec![0.0, 0.0], vec![0.0, 0.0]], vec![0.0, 1.0]),
        (
            vec![vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0], vec![1.0, 0.0, 1.0]],
            vec![1.0, 2.0, 3.0],
        ),
        (
            vec![vec![1.0, 1.0], vec![1.0, -1.0], vec![2.0, 1.0]],
            vec![3.0, 1.0, 6.0],
        ),
        (vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]], vec![1.0, 2.0]),
        (vec![vec![3.0, 1.0], vec![1.0, 2.0]], vec![9.0, 8.0]),
    ];

    let methods = [Method::Gauss, Method::GaussJordan];
    for (rows, rhs) in cases {
        let (a, b) = system(&rows, &rhs);
        let report = Orchestrator::default().run(&a, &b, &methods);
        let ranks = report.ranks();
        assert_eq!(ranks[0].1, ranks[1].1, "rows {rows:?}");
        assert!(ranks[0].1.is_some());
        assert_eq!(
            report.entries[0].outcome.failure_kind(),
            report.entries[1].outcome.failure_kind()
        );
    }
}

#[test]
fn repeated_solves_are_identical() {
    let (a, b) = well_conditioned(5);
    let orchestrator = Orchestrator::default();
    let first = orchestrator.run_all(&a, &b);
    let second = orchestrator.run_all(&a, &b);
    for (x, y) in first.entries.iter().zip(&second.entries) {
        assert_eq!(x.outcome, y.outcome);
    }
}

#[test]
fn parallel_and_sequential_reports_match() {
    let (a, b) = well_conditioned(6);
    let policy = SolverPolicy::default();
    let parallel = Orchestrator::new(policy).run_all(&a, &b);
    let sequential = Orchestrator::new(policy)
        .with_execution(Execution::Sequential)
        .run_all(&a, &b);

    assert_eq!(parallel.methods(), sequential.methods());
    for (p, s) in parallel.entries.iter().zip(&sequential.entries) {
        assert_eq!(p.outcome, s.outcome);
    }
}

#[test]
fn cramer_cap_does_not_block_elimination_methods() {
    let (a, b) = well_conditioned(4);
    let policy = SolverPolicy {
        cramer_max_order: Some(3),
        ..Default::default()
    };
    let report = Orchestrator::new(policy).run_all(&a, &b);
    assert!(report.get(Method::Gauss).unwrap().outcome.is_solved());
    assert!(report.get(Method::GaussJordan).unwrap().outcome.is_solved());
    assert_eq!(
        report.get(Method::Cramer).unwrap().outcome.failure_kind(),
        Some(FailureKind::SizeLimitExceeded)
    );
}

#[test]
fn coarser_threshold_reclassifies_near_singular_system() {
    // Second row differs from a multiple of the first by 1e-9.
    let (a, b) = system(&[vec![1.0, 1.0], vec![1.0, 1.0 + 1e-9]], &[2.0, 2.0]);

    let fine = Orchestrator::default().run(&a, &b, &[Method::Gauss]);
    assert!(fine.entries[0].outcome.is_solved());

    let coarse = SolverPolicy {
        zero_threshold: 1e-6,
        ..Default::default()
    };
    let report = Orchestrator::new(coarse).run(&a, &b, &[Method::Gauss, Method::Cramer]);
    assert_eq!(
        report.entries[0].outcome.failure_kind(),
        Some(FailureKind::InfiniteSolutions)
    );
    assert_eq!(
        report.entries[1].outcome.failure_kind(),
        Some(FailureKind::SingularMatrix)
    );
}

#[test]
fn overflowing_cramer_is_a_failure_not_a_nan_solution() {
    let (a, b) = system(&[vec![1e200, 0.0], vec![0.0, 1e200]], &[1e200, 1e200]);
    let report = Orchestrator::default().run_all(&a, &b);

    assert_eq!(report.solution(Method::Gauss), Some(&[1.0, 1.0][..]));
    assert_eq!(report.solution(Method::GaussJordan), Some(&[1.0, 1.0][..]));
    let cramer = report.get(Method::Cramer).unwrap();
    assert_eq!(
        cramer.outcome.failure_kind(),
        Some(FailureKind::NumericalOverflow)
    );
    assert!(cramer.residual_norm.is_none());

    let check = report.cross_check_default();
    assert_eq!(check.compared, 2);
    assert!(check.agree);
}

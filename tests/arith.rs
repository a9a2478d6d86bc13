use reduction_bench::arith::equation::{
    complex_equation_parallel, complex_equation_sequential, g, term, LOG_FLOOR,
};
use reduction_bench::arith::formula::{
    optimized_locals, optimized_precomputed, optimized_terms, original, FormulaVariant, Precomputed,
};

#[test]
fn g_base_case_and_recursion() {
    assert_eq!(g(0.5), 1.0);
    assert_eq!(g(-3.0), 1.0);
    // g(2) = 1 + g(1) = 1 + (0.5 + g(0.5)) = 2.5
    assert_eq!(g(2.0), 2.5);
}

#[test]
fn term_clamps_domain_errors() {
    // x + i is negative: log and sqrt arguments are clamped, result stays finite.
    let t = term(-10.0, 1);
    assert!(t.is_finite());

    let x: f64 = -10.0;
    let expected = x.powi(1) * LOG_FLOOR.ln() / ((x + 1.0).sin() + 1e-10);
    assert!((t - expected).abs() <= expected.abs() * 1e-12);
}

#[test]
fn equation_is_finite_for_negative_x() {
    assert!(complex_equation_sequential(-50.0, 200).is_finite());
}

#[test]
fn sequential_and_parallel_equation_agree() {
    for (x, n) in [(0.5, 10_000), (1.5, 50_000), (10.0, 20_000)] {
        let seq = complex_equation_sequential(x, n);
        let par = complex_equation_parallel(x, n);
        let scale = seq.abs().max(1.0);
        assert!((seq - par).abs() <= scale * 1e-9, "x {x}, n {n}: {seq} vs {par}");
    }
}

#[test]
fn zero_terms_is_just_g() {
    assert_eq!(complex_equation_sequential(4.0, 0), g(4.0));
    assert_eq!(complex_equation_parallel(4.0, 0), g(4.0));
}

#[test]
fn formula_rewrites_agree_at_reference_point() {
    assert_eq!(original(3.0, 4.0), 717.5);
    assert_eq!(optimized_locals(3.0, 4.0), 717.5);
    assert_eq!(optimized_terms(3.0, 4.0), 717.5);
    assert_eq!(optimized_precomputed(&Precomputed::new(3.0, 4.0)), 717.5);
}

#[test]
fn formula_variants_agree_on_a_grid() {
    for xi in -5..=5 {
        for yi in -5..=5 {
            let (x, y) = (xi as f64 * 0.75, yi as f64 * 1.25);
            let base = original(x, y);
            for v in FormulaVariant::ALL {
                let got = v.evaluate(x, y);
                assert!((got - base).abs() <= base.abs().max(1.0) * 1e-12, "{v} at ({x}, {y})");
            }
        }
    }
}

#[test]
fn variant_names() {
    let names: Vec<String> = FormulaVariant::ALL.iter().map(ToString::to_string).collect();
    assert_eq!(
        names,
        ["original", "optimized-locals", "optimized-terms", "optimized-precomputed"]
    );
}

//! End-to-end analysis of small circuits.

use approx::assert_abs_diff_eq;
use compact_mna::error::Capacity;
use compact_mna::netlist::{self, ParseOptions};
use compact_mna::{analyze, Analysis, AnalysisConfig, MnaError};

#[test]
fn test_ohms_law() {
    let solution = analyze("R1 1 0 1000\nI1 0 1 1e-3\n").unwrap();
    assert_eq!(solution.num_equations, 1);
    assert_abs_diff_eq!(solution.node_voltage("1").unwrap(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_voltage_divider() {
    let solution = analyze("V1 1 0 10\nR1 1 2 1000\nR2 2 0 1000\n").unwrap();
    assert_eq!(solution.num_nodes, 2);
    assert_eq!(solution.num_variables, 3);
    assert_eq!(solution.num_equations, 2);
    assert_abs_diff_eq!(solution.node_voltage("1").unwrap(), 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(solution.node_voltage("2").unwrap(), 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(solution.branch_current("V1").unwrap(), -5e-3, epsilon = 1e-12);
    assert_abs_diff_eq!(solution.current("jV1").unwrap(), -5e-3, epsilon = 1e-12);
}

#[test]
fn test_unity_buffer() {
    let solution = analyze("V1 1 0 5\nO1 2 0 1 2\nR1 2 0 1k\n").unwrap();
    assert_abs_diff_eq!(solution.node_voltage("2").unwrap(), 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(
        solution.node_voltage("2").unwrap(),
        solution.node_voltage("1").unwrap(),
        epsilon = 1e-12
    );
    // The op-amp sources the load current; the input draws nothing
    assert_abs_diff_eq!(solution.branch_current("O1").unwrap(), -5e-3, epsilon = 1e-12);
    assert_abs_diff_eq!(solution.branch_current("V1").unwrap(), 0.0, epsilon = 1e-12);
}

#[test]
fn test_inverting_amplifier() {
    let solution = analyze(
        "* gain -10\n\
         V1 in 0 1\n\
         R1 in minus 1k\n\
         R2 minus out 10k\n\
         O1 out 0 0 minus\n",
    )
    .unwrap();
    assert!(solution.num_equations < solution.num_nodes);
    assert_abs_diff_eq!(solution.node_voltage("minus").unwrap(), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(solution.node_voltage("out").unwrap(), -10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(solution.branch_current("V1").unwrap(), -1e-3, epsilon = 1e-12);
    assert_abs_diff_eq!(solution.branch_current("O1").unwrap(), 1e-3, epsilon = 1e-12);
}

#[test]
fn test_vccs() {
    let solution = analyze("V1 1 0 2\nG1 2 0 1 0 1m\nR2 2 0 1k\n").unwrap();
    assert_abs_diff_eq!(solution.node_voltage("2").unwrap(), -2.0, epsilon = 1e-9);
}

#[test]
fn test_vcvs() {
    let solution = analyze("V1 1 0 2\nR1 1 0 1k\nE1 2 0 1 0 3\nR2 2 0 1k\n").unwrap();
    assert_abs_diff_eq!(solution.node_voltage("2").unwrap(), 6.0, epsilon = 1e-9);
    assert_abs_diff_eq!(solution.branch_current("E1").unwrap(), -6e-3, epsilon = 1e-12);
    assert_abs_diff_eq!(solution.branch_current("V1").unwrap(), -2e-3, epsilon = 1e-12);
}

#[test]
fn test_cccs() {
    let solution = analyze("I1 0 1 1m\nF1 2 0 1 0 10\nR2 2 0 1k\n").unwrap();
    // The controlling short holds node 1 at ground
    assert_abs_diff_eq!(solution.node_voltage("1").unwrap(), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(solution.node_voltage("2").unwrap(), -10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(solution.branch_current("F1").unwrap(), 1e-3, epsilon = 1e-12);
}

#[test]
fn test_ccvs() {
    let solution = analyze("I1 0 1 1m\nH1 2 0 1 0 100\nR2 2 0 1k\n").unwrap();
    assert_abs_diff_eq!(solution.node_voltage("2").unwrap(), 0.1, epsilon = 1e-12);
    assert_abs_diff_eq!(solution.branch_current("H1").unwrap(), 1e-3, epsilon = 1e-12);
    assert_abs_diff_eq!(solution.current("jxH1").unwrap(), 1e-3, epsilon = 1e-12);
    assert_abs_diff_eq!(solution.current("jyH1").unwrap(), -1e-4, epsilon = 1e-12);
}

#[test]
fn test_resistive_ladder_equation_count() {
    let solution = analyze("I1 0 1 1\nR1 1 2 1\nR2 2 3 1\nR3 3 0 1\n").unwrap();
    assert_eq!(solution.num_equations, solution.num_nodes);
    assert_abs_diff_eq!(solution.node_voltage("1").unwrap(), 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(solution.node_voltage("3").unwrap(), 1.0, epsilon = 1e-9);
}

#[test]
fn test_equations_never_exceed_nodes() {
    let netlists = [
        "V1 1 0 1\nR1 1 2 1\nR2 2 0 1\n",
        "V1 1 2 1\nR1 1 0 1\nR2 2 0 1\nR3 1 2 1\n",
        "I1 0 1 1m\nH1 2 0 1 0 100\nR2 2 0 1k\n",
        "V1 1 0 2\nR1 1 0 1k\nE1 2 0 1 0 3\nR2 2 0 1k\n",
        "V1 in 0 1\nR1 in minus 1k\nR2 minus out 10k\nO1 out 0 0 minus\n",
    ];
    for text in netlists {
        let solution = analyze(text).unwrap();
        assert!(
            solution.num_equations <= solution.num_nodes,
            "{} equations for {} nodes in {:?}",
            solution.num_equations,
            solution.num_nodes,
            text
        );
    }
}

#[test]
fn test_zero_resistor_rejected_before_solving() {
    let err = analyze("V1 1 0 1\nR1 1 0 0\n").unwrap_err();
    assert!(matches!(err, MnaError::InvalidValue { ref element, line: 2, .. } if element == "R1"));
}

#[test]
fn test_isolated_node_is_singular() {
    let err = analyze("I1 0 1 1e-3\nR1 1 0 1000\nR2 2 3 1000\n").unwrap_err();
    assert!(matches!(err, MnaError::SingularSystem { .. }));
}

#[test]
fn test_parallel_voltage_sources_invalid() {
    let err = analyze("V1 1 0 1\nV2 1 0 2\nR1 1 0 1\n").unwrap_err();
    assert!(matches!(err, MnaError::InvalidCircuit { ref element, .. } if element == "V2"));
}

#[test]
fn test_unknown_element() {
    let err = analyze("R1 1 0 1\nX1 1 0 1\n").unwrap_err();
    assert!(matches!(err, MnaError::UnknownElementType { line: 2, .. }));
}

#[test]
fn test_element_capacity() {
    let config = AnalysisConfig::new().with_max_elements(1);
    let err = Analysis::from_netlist("R1 1 0 1\nI1 0 1 1\n", config)
        .err()
        .unwrap();
    assert!(matches!(
        err,
        MnaError::CapacityExceeded {
            what: Capacity::Elements,
            limit: 1,
            ref element,
            line: 2,
        } if element == "I1"
    ));
    assert!(err.to_string().contains("'I1' (line 2)"));
}

#[test]
fn test_title_line_and_comments() {
    let ast = netlist::parse_with(
        "Simple divider\n* comment\nV1 1 0 10\nR1 1 2 1k\n* another\nR2 2 0 1k\n",
        ParseOptions::with_title(),
    )
    .unwrap();
    let solution = Analysis::from_ast(&ast, AnalysisConfig::default())
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(solution.title.as_deref(), Some("Simple divider"));
    assert_eq!(solution.num_elements, 3);
    assert_abs_diff_eq!(solution.node_voltage("2").unwrap(), 5.0, epsilon = 1e-9);
}

#[test]
fn test_not_computed_listing() {
    let solution = analyze("V1 1 0 10\nR1 1 2 1000\nR2 2 0 1000\n").unwrap();
    let listing = solution.to_string();
    assert!(listing.contains("Current jV1 (0): not computed"));
    assert!(solution
        .variables()
        .iter()
        .filter(|v| v.slot != 0)
        .all(|v| v.value.is_some()));
}

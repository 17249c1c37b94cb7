//! Branch current recovery.
//!
//! The compact system does not solve for the currents of voltage sources,
//! E and H outputs or op-amp outputs: their auxiliary columns are merged
//! into ground and their KCL rows are summed. Once the voltages are known,
//! those currents follow from Kirchhoff's current law at any node where
//! only one of them is still unknown.

use crate::circuit::{Circuit, ElementId, VarId};
use crate::components::Element;

use super::reduction::Reduction;

/// How a branch current was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentOrigin {
    /// Read directly from the solved system
    Solved,
    /// Computed from KCL after solving
    Recovered,
}

/// The current of one element branch, flowing into terminal `a` from the
/// circuit and out of terminal `b`.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchCurrent {
    /// Display label (`jV1`, `jxH1`, `jO1`, ...)
    pub label: String,
    pub element: ElementId,
    pub value: f64,
    pub origin: CurrentOrigin,
}

/// A branch whose current is not in the solution.
struct Pending {
    index: usize,
    a: VarId,
    b: VarId,
    value: Option<f64>,
}

/// Collect every branch current of the circuit, solved or recovered.
///
/// `solution` is indexed by column slot; slot 0 is the reference.
///
/// Every unknown branch merged the rows of its two terminals during
/// reduction, so these branches form a forest over the nodes and peeling
/// leaves resolves all of them.
pub fn recover_currents(circuit: &Circuit, reduction: &Reduction, solution: &[f64]) -> Vec<BranchCurrent> {
    let value = |var: VarId| solution[reduction.col(var)];
    let mut leaving = vec![0.0; reduction.num_nodes + 1];
    let flow = |leaving: &mut Vec<f64>, from: VarId, to: VarId, i: f64| {
        leaving[from.0] += i;
        leaving[to.0] -= i;
    };

    let mut currents = Vec::new();
    let mut pending = Vec::new();
    let mut unknown = |currents: &mut Vec<BranchCurrent>, label: String, element: ElementId, a, b| {
        pending.push(Pending {
            index: currents.len(),
            a,
            b,
            value: None,
        });
        currents.push(BranchCurrent {
            label,
            element,
            value: 0.0,
            origin: CurrentOrigin::Recovered,
        });
    };

    for element in &circuit.elements {
        let aux = reduction.aux(element.id());
        match element {
            Element::Resistor(r) => {
                let (a, b) = (r.nodes[0], r.nodes[1]);
                flow(&mut leaving, a, b, r.current(value(a), value(b)));
            }
            Element::CurrentSource(i) => {
                flow(&mut leaving, i.nodes[0], i.nodes[1], i.current);
            }
            Element::Vccs(s) => {
                let (a, b) = s.output();
                let (c, d) = s.control();
                flow(&mut leaving, a, b, s.gain * (value(c) - value(d)));
            }
            Element::Cccs(s) => {
                let (a, b) = s.output();
                let (c, d) = s.control();
                if let Some(x) = aux.x {
                    let jx = value(x);
                    flow(&mut leaving, a, b, s.gain * jx);
                    flow(&mut leaving, c, d, jx);
                    currents.push(BranchCurrent {
                        label: reduction.label(x).to_string(),
                        element: s.id,
                        value: jx,
                        origin: CurrentOrigin::Solved,
                    });
                }
            }
            Element::Ccvs(s) => {
                let (a, b) = s.output();
                let (c, d) = s.control();
                if let (Some(x), Some(y)) = (aux.x, aux.y) {
                    let jx = value(x);
                    flow(&mut leaving, c, d, jx);
                    currents.push(BranchCurrent {
                        label: reduction.label(x).to_string(),
                        element: s.id,
                        value: jx,
                        origin: CurrentOrigin::Solved,
                    });
                    unknown(&mut currents, reduction.label(y).to_string(), s.id, a, b);
                }
            }
            Element::VoltageSource(v) => {
                if let Some(x) = aux.x {
                    unknown(&mut currents, reduction.label(x).to_string(), v.id, v.nodes[0], v.nodes[1]);
                }
            }
            Element::Vcvs(s) => {
                if let Some(x) = aux.x {
                    let (a, b) = s.output();
                    unknown(&mut currents, reduction.label(x).to_string(), s.id, a, b);
                }
            }
            Element::OpAmp(o) => {
                let (a, b) = o.output();
                unknown(&mut currents, format!("j{}", o.name), o.id, a, b);
            }
        }
    }

    // Peel off nodes with a single unknown branch until none is left
    loop {
        let mut progress = false;
        for node in 0..leaving.len() {
            let mut incident = pending
                .iter_mut()
                .filter(|p| p.value.is_none() && (p.a.0 == node || p.b.0 == node));
            let (Some(branch), None) = (incident.next(), incident.next()) else {
                continue;
            };

            let sign = if branch.a.0 == node { 1.0 } else { -1.0 };
            let mut j = -sign * leaving[node];
            if j == 0.0 {
                // Report 0 rather than -0
                j = 0.0;
            }
            branch.value = Some(j);
            flow(&mut leaving, branch.a, branch.b, j);
            log::debug!("{} = {} from KCL at node {}", currents[branch.index].label, j, node);
            progress = true;
        }
        if !progress {
            break;
        }
    }

    for branch in &pending {
        debug_assert!(branch.value.is_some(), "unresolved {}", currents[branch.index].label);
        currents[branch.index].value = branch.value.unwrap_or(f64::NAN);
    }

    currents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist;
    use crate::solver::{assemble, gauss_jordan};
    use approx::assert_abs_diff_eq;

    fn currents_of(text: &str) -> Vec<BranchCurrent> {
        let circuit = Circuit::from_ast(&netlist::parse(text).unwrap(), 50, 50).unwrap();
        let reduction = Reduction::build(&circuit, 50).unwrap();
        let mut matrix = assemble(&circuit, &reduction);
        gauss_jordan(&mut matrix, 1e-9).unwrap();
        recover_currents(&circuit, &reduction, &matrix.rhs())
    }

    fn find<'a>(currents: &'a [BranchCurrent], label: &str) -> &'a BranchCurrent {
        currents.iter().find(|c| c.label == label).unwrap()
    }

    #[test]
    fn test_source_and_opamp_in_series() {
        // V1 (1-0) and the floating O1 output (2-1) share node 1: V1 is
        // only resolvable from ground, O1 only once V1 is known.
        let currents = currents_of("I1 0 3 1m\nR1 3 0 1k\nV1 1 0 2\nO1 2 1 3 2\nR2 2 0 1k\n");
        assert_eq!(currents.len(), 2);

        let v1 = find(&currents, "jV1");
        assert_eq!(v1.origin, CurrentOrigin::Recovered);
        assert_abs_diff_eq!(v1.value, -1e-3, epsilon = 1e-12);

        // O1 drives 1 mA into the load and draws it back from V1
        let o1 = find(&currents, "jO1");
        assert_eq!(o1.origin, CurrentOrigin::Recovered);
        assert_abs_diff_eq!(o1.value, -1e-3, epsilon = 1e-12);
    }

    #[test]
    fn test_floating_source_sign() {
        let currents = currents_of("V1 1 2 3\nR1 1 0 1k\nR2 2 0 2k\n");
        assert_abs_diff_eq!(find(&currents, "jV1").value, -1e-3, epsilon = 1e-12);

        // Same loop with the source terminals swapped
        let currents = currents_of("V1 2 1 -3\nR1 1 0 1k\nR2 2 0 2k\n");
        assert_abs_diff_eq!(find(&currents, "jV1").value, 1e-3, epsilon = 1e-12);
    }

    #[test]
    fn test_control_currents_are_solved() {
        let currents = currents_of("I1 0 1 1m\nF1 2 0 1 0 10\nR2 2 0 1k\n");
        let f1 = find(&currents, "jF1");
        assert_eq!(f1.origin, CurrentOrigin::Solved);
        assert_abs_diff_eq!(f1.value, 1e-3, epsilon = 1e-12);

        let currents = currents_of("I1 0 1 1m\nH1 2 0 1 0 100\nR2 2 0 1k\n");
        assert_eq!(find(&currents, "jxH1").origin, CurrentOrigin::Solved);
        let jy = find(&currents, "jyH1");
        assert_eq!(jy.origin, CurrentOrigin::Recovered);
        assert_abs_diff_eq!(jy.value, -1e-4, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_current_is_positive_zero() {
        let currents = currents_of("V1 1 0 5\nO1 2 0 1 2\nR1 2 0 1k\n");
        let v1 = find(&currents, "jV1");
        assert_eq!(v1.value, 0.0);
        assert!(v1.value.is_sign_positive());
    }
}

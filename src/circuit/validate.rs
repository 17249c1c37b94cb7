//! Circuit validation.

use crate::components::Element;
use crate::error::{MnaError, Result};

use super::Circuit;

/// Validate element values before the circuit is reduced and stamped.
///
/// Checks:
/// - Every value is finite
/// - No resistor has zero resistance (its conductance is undefined)
pub fn validate_circuit(circuit: &Circuit) -> Result<()> {
    for element in &circuit.elements {
        if let Some(value) = element.value() {
            if !value.is_finite() {
                return Err(MnaError::invalid_value(
                    element.name(),
                    element.line(),
                    format!("value {} is not finite", value),
                ));
            }
        }

        if let Element::Resistor(r) = element {
            if r.resistance == 0.0 {
                return Err(MnaError::invalid_value(
                    &r.name,
                    r.line,
                    "zero resistance has no conductance (use a voltage source of 0 V for a short)",
                ));
            }
        }
    }

    Ok(())
}

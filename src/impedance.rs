//! Closed-form resistance and impedance of component groups.
//!
//! These functions work on any iterator of components, so they can be used without a ledger.
//! Only resistors contribute to the resistance totals; all kinds contribute to impedance.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::{Component, ComponentKind, Group};

/// Magnitude used for a capacitor that behaves as an open circuit.
pub const OPEN_CIRCUIT: f64 = 1e10;

const ZERO: Complex64 = Complex64 { re: 0.0, im: 0.0 };
const J: Complex64 = Complex64 { re: 0.0, im: 1.0 };

/// Complex impedance of a single component at `frequency_hz`.
///
/// A capacitor whose `ωC` is zero is an open circuit and is reported as the real value
/// [`OPEN_CIRCUIT`] instead of infinity.
pub fn component_impedance(component: &Component, frequency_hz: f64) -> Complex64 {
    let omega = 2.0 * PI * frequency_hz;
    match component.kind {
        ComponentKind::Resistor => Complex64::new(component.value, 0.0),
        ComponentKind::Inductor => J * omega * component.value,
        ComponentKind::Capacitor => {
            let omega_c = omega * component.value;
            if omega_c == 0.0 {
                Complex64::new(OPEN_CIRCUIT, 0.0)
            } else {
                -J / omega_c
            }
        }
    }
}

/// Sum of resistor values. Other kinds contribute nothing.
pub fn series_resistance<'a>(components: impl IntoIterator<Item = &'a Component>) -> f64 {
    components
        .into_iter()
        .filter_map(|c| match c.kind {
            ComponentKind::Resistor => Some(c.value),
            ComponentKind::Capacitor | ComponentKind::Inductor => None,
        })
        .sum()
}

/// `1 / Σ(1/R)` over nonzero resistor values, or 0 when there are none.
pub fn parallel_resistance<'a>(components: impl IntoIterator<Item = &'a Component>) -> f64 {
    let conductance: f64 = components
        .into_iter()
        .filter_map(|c| match c.kind {
            ComponentKind::Resistor if c.value != 0.0 => Some(1.0 / c.value),
            ComponentKind::Resistor | ComponentKind::Capacitor | ComponentKind::Inductor => None,
        })
        .sum();
    if conductance == 0.0 {
        0.0
    } else {
        1.0 / conductance
    }
}

/// Magnitude of the combined impedance of `components` connected as `topology`.
///
/// In parallel, components with zero impedance are skipped and a zero admittance sum gives 0.
pub fn impedance_magnitude<'a>(
    components: impl IntoIterator<Item = &'a Component>,
    frequency_hz: f64,
    topology: Group,
) -> f64 {
    let impedances = components
        .into_iter()
        .map(|c| component_impedance(c, frequency_hz));
    match topology {
        Group::Series => impedances.fold(ZERO, |acc, z| acc + z).norm(),
        Group::Parallel => {
            let admittance = impedances
                .filter(|z| *z != ZERO)
                .fold(ZERO, |acc, z| acc + z.inv());
            if admittance == ZERO {
                0.0
            } else {
                admittance.inv().norm()
            }
        }
    }
}

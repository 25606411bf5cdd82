//! A component ledger for series/parallel circuit exercises.
//!
//! Components (resistors, capacitors and inductors) are added to a `ComponentLedger` and tagged
//! as belonging to either the series or the parallel group. The ledger can then report the total
//! resistance and the magnitude of the complex impedance of each group at a configurable analysis
//! frequency. Every change is snapshotted first, so the last change can always be undone.
//!
//! # Example
//! ```rust
//! extern crate circuit_ledger;
//!
//! use circuit_ledger::*;
//!
//! fn main() {
//!     let mut ledger = ComponentLedger::new();
//!
//!     let r1 = ledger.add(ComponentKind::Resistor, 100.0, Group::Parallel).unwrap();
//!     ledger.add(ComponentKind::Resistor, 100.0, Group::Parallel).unwrap();
//!     ledger.add(ComponentKind::Inductor, 1.0, Group::Series).unwrap();
//!
//!     assert!((ledger.parallel_resistance() - 50.0).abs() < 1e-9);
//!     assert!((ledger.series_impedance() - 314.159).abs() < 1e-3);
//!
//!     assert!(ledger.remove(r1));
//!     assert!(ledger.undo());
//!     assert_eq!(ledger.parallel_ids(), &[r1, ComponentId(2)]);
//!
//!     println!("{}", ledger.report());
//! }
//! ```
//! Running this example prints:
//! ```text
//! Frequency: 50.0 Hz
//! Series: 1 components | R = 0.000 Ohm | Z = 314.159 Ohm
//! Parallel: 2 components | R = 50.000 Ohm | Z = 50.000 Ohm
//! Combined: R = 50.000 Ohm | Z = 364.159 Ohm
//! ```

extern crate itertools;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate num_complex;
extern crate thiserror;

use std::fmt;

mod error;
mod history;
pub mod impedance;
mod ledger;
mod report;

#[cfg(feature = "value_expr")]
mod value_expr;

pub use error::{LedgerError, Result};
pub use history::HistoryStack;
pub use ledger::{AnalysisConfig, ComponentLedger};
pub use report::{CircuitReport, GroupSummary, Layout};

#[cfg(feature = "value_expr")]
pub use value_expr::parse_value;

lazy_static! {
    /// SI prefixes used to present component values, largest first. The empty prefix is unity.
    pub(crate) static ref SI_PREFIXES: Vec<(&'static str, f64)> = vec![
        ("G", 1e9),
        ("M", 1e6),
        ("k", 1e3),
        ("", 1e0),
        ("m", 1e-3),
        ("µ", 1e-6),
        ("n", 1e-9),
        ("p", 1e-12),
    ];
}

/// Identifier of a component within a ledger. Identifiers start at 1 and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(pub u32);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of a component, which fixes the unit of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Resistor,
    Capacitor,
    Inductor,
}

impl ComponentKind {
    /// Unit symbol of values of this kind.
    pub fn unit(self) -> &'static str {
        match self {
            ComponentKind::Resistor => "Ω",
            ComponentKind::Capacitor => "F",
            ComponentKind::Inductor => "H",
        }
    }

    /// Schematic designator letter, `R`, `C` or `L`.
    pub fn designator(self) -> char {
        match self {
            ComponentKind::Resistor => 'R',
            ComponentKind::Capacitor => 'C',
            ComponentKind::Inductor => 'L',
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ComponentKind::Resistor => "Resistor",
            ComponentKind::Capacitor => "Capacitor",
            ComponentKind::Inductor => "Inductor",
        };
        f.write_str(name)
    }
}

/// The aggregate group a component contributes to. Also used as the topology when combining
/// impedances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Series,
    Parallel,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Group::Series => f.write_str("series"),
            Group::Parallel => f.write_str("parallel"),
        }
    }
}

/// A single circuit component. All fields are fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Component {
    pub id: ComponentId,
    pub kind: ComponentKind,
    pub value: f64,
    pub group: Group,
}

impl Component {
    /// The value with an SI prefix and the unit of the component kind.
    /// # Examples
    /// ```
    ///     # use circuit_ledger::*;
    ///     let c = Component {
    ///         id: ComponentId(3),
    ///         kind: ComponentKind::Resistor,
    ///         value: 4700.0,
    ///         group: Group::Series,
    ///     };
    ///     assert_eq!(c.display_value(), "4.7kΩ");
    ///     assert_eq!(c.to_string(), "R3 4.7kΩ (series)");
    /// ```
    pub fn display_value(&self) -> String {
        format_value(self.value, self.kind.unit())
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{} {} ({})",
            self.kind.designator(),
            self.id,
            self.display_value(),
            self.group
        )
    }
}

fn format_value(value: f64, unit: &str) -> String {
    let magnitude = value.abs();
    let mut idx = SI_PREFIXES
        .iter()
        .position(|&(_, scale)| magnitude >= scale)
        .unwrap_or(SI_PREFIXES.len() - 1);
    // A mantissa that rounds up to 1000 moves to the next prefix.
    if idx > 0 && (magnitude / SI_PREFIXES[idx].1 * 1e3).round() >= 1e6 {
        idx -= 1;
    }
    let (prefix, scale) = SI_PREFIXES[idx];
    let mut val = format!("{:.3}", value / scale);
    if val.contains('.') {
        let trimmed = val.trim_end_matches('0').trim_end_matches('.').len();
        val.truncate(trimmed);
    }
    format!("{}{}{}", val, prefix, unit)
}

use std::fmt;

use crate::{ComponentLedger, Group};

/// Totals for one group of a ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupSummary {
    pub group: Group,
    pub count: usize,
    /// Combined resistance of the resistors in the group, in ohms.
    pub resistance: f64,
    /// Magnitude of the combined impedance of the whole group, in ohms.
    pub impedance: f64,
}

impl GroupSummary {
    fn new(ledger: &ComponentLedger, group: Group) -> Self {
        let (resistance, impedance) = match group {
            Group::Series => (ledger.series_resistance(), ledger.series_impedance()),
            Group::Parallel => (ledger.parallel_resistance(), ledger.parallel_impedance()),
        };
        GroupSummary {
            group,
            count: ledger.ids_in(group).len(),
            resistance,
            impedance,
        }
    }

    /// True when the group has no components.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Which groups of a ledger hold components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Empty,
    SeriesOnly,
    ParallelOnly,
    Combined,
}

/// Snapshot of both group totals at the frequency the ledger was configured with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitReport {
    pub frequency_hz: f64,
    pub series: GroupSummary,
    pub parallel: GroupSummary,
}

impl CircuitReport {
    pub(crate) fn new(ledger: &ComponentLedger) -> Self {
        CircuitReport {
            frequency_hz: ledger.config().frequency_hz,
            series: GroupSummary::new(ledger, Group::Series),
            parallel: GroupSummary::new(ledger, Group::Parallel),
        }
    }

    /// Which of the two groups hold components.
    pub fn layout(&self) -> Layout {
        match (self.series.is_empty(), self.parallel.is_empty()) {
            (true, true) => Layout::Empty,
            (false, true) => Layout::SeriesOnly,
            (true, false) => Layout::ParallelOnly,
            (false, false) => Layout::Combined,
        }
    }

    /// Summed resistance and summed impedance magnitude of the two groups, when both hold
    /// components.
    pub fn combined(&self) -> Option<(f64, f64)> {
        match self.layout() {
            Layout::Combined => Some((
                self.series.resistance + self.parallel.resistance,
                self.series.impedance + self.parallel.impedance,
            )),
            Layout::Empty | Layout::SeriesOnly | Layout::ParallelOnly => None,
        }
    }
}

impl fmt::Display for GroupSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self.group {
            Group::Series => "Series",
            Group::Parallel => "Parallel",
        };
        write!(
            f,
            "{}: {} components | R = {:.3} Ohm | Z = {:.3} Ohm",
            name, self.count, self.resistance, self.impedance
        )
    }
}

impl fmt::Display for CircuitReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Frequency: {:.1} Hz", self.frequency_hz)?;
        writeln!(f, "{}", self.series)?;
        write!(f, "{}", self.parallel)?;
        if let Some((r, z)) = self.combined() {
            return write!(f, "\nCombined: R = {:.3} Ohm | Z = {:.3} Ohm", r, z);
        }
        match self.layout() {
            Layout::Empty => write!(f, "\nNo components added yet"),
            Layout::SeriesOnly => write!(f, "\nOnly the series group holds components"),
            Layout::ParallelOnly => write!(f, "\nOnly the parallel group holds components"),
            Layout::Combined => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ComponentKind;

    #[test]
    fn empty_ledger_reports_nothing_combined() {
        let report = ComponentLedger::new().report();
        assert_eq!(report.layout(), Layout::Empty);
        assert_eq!(report.combined(), None);
        assert_eq!(report.series.resistance, 0.0);
        assert_eq!(report.parallel.impedance, 0.0);
    }

    #[test]
    fn one_sided_layouts() {
        let mut ledger = ComponentLedger::new();
        ledger.add(ComponentKind::Resistor, 10.0, Group::Parallel).unwrap();
        assert_eq!(ledger.report().layout(), Layout::ParallelOnly);

        let mut ledger = ComponentLedger::new();
        ledger.add(ComponentKind::Resistor, 10.0, Group::Series).unwrap();
        let report = ledger.report();
        assert_eq!(report.layout(), Layout::SeriesOnly);
        assert_eq!(report.combined(), None);
    }

    #[test]
    fn combined_sums_both_groups() {
        let mut ledger = ComponentLedger::new();
        ledger.add(ComponentKind::Resistor, 30.0, Group::Series).unwrap();
        ledger.add(ComponentKind::Resistor, 100.0, Group::Parallel).unwrap();
        ledger.add(ComponentKind::Resistor, 100.0, Group::Parallel).unwrap();

        let report = ledger.report();
        assert_eq!(report.series.count, 1);
        assert_eq!(report.parallel.count, 2);
        let (r, z) = report.combined().unwrap();
        assert!((r - 80.0).abs() < 1e-9);
        assert!((z - 80.0).abs() < 1e-9);
    }

    #[test]
    fn report_text() {
        let mut ledger = ComponentLedger::new();
        ledger.add(ComponentKind::Resistor, 10.0, Group::Series).unwrap();
        ledger.add(ComponentKind::Resistor, 20.0, Group::Series).unwrap();

        assert_eq!(
            ledger.report().to_string(),
            "Frequency: 50.0 Hz\n\
             Series: 2 components | R = 30.000 Ohm | Z = 30.000 Ohm\n\
             Parallel: 0 components | R = 0.000 Ohm | Z = 0.000 Ohm\n\
             Only the series group holds components"
        );
    }
}

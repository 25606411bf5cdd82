use std::fmt;

use itertools::Itertools;

use crate::history::HistoryStack;
use crate::impedance;
use crate::report::CircuitReport;
use crate::{Component, ComponentId, ComponentKind, Group, LedgerError, Result};

/// Settings read by the ledger's own aggregate calculations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    /// Frequency used for impedance totals, in hertz.
    pub frequency_hz: f64,
    /// Number of activity labels kept by the history.
    pub activity_log_capacity: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            frequency_hz: 50.0,
            activity_log_capacity: 20,
        }
    }
}

impl AnalysisConfig {
    /// Sets the analysis frequency. It is checked when the ledger is built.
    pub fn with_frequency(mut self, frequency_hz: f64) -> Self {
        self.frequency_hz = frequency_hz;
        self
    }

    /// Sets how many activity labels the history keeps.
    pub fn with_activity_log_capacity(mut self, capacity: usize) -> Self {
        self.activity_log_capacity = capacity;
        self
    }
}

fn check_frequency(frequency_hz: f64) -> Result<()> {
    if frequency_hz.is_finite() && frequency_hz > 0.0 {
        Ok(())
    } else {
        warn!("rejected analysis frequency {}", frequency_hz);
        Err(LedgerError::InvalidFrequency(frequency_hz))
    }
}

fn tag(component: &Component) -> String {
    format!(
        "{}{} {}",
        component.kind.designator(),
        component.id,
        component.display_value()
    )
}

/// Owner of the component list and its series/parallel membership.
///
/// Every component is listed in exactly one of the two group lists. Mutations snapshot the
/// component list first, so `undo` restores the state from before the most recent change.
#[derive(Debug, Clone)]
pub struct ComponentLedger {
    components: Vec<Component>,
    series: Vec<ComponentId>,
    parallel: Vec<ComponentId>,
    history: HistoryStack,
    next_id: u32,
    config: AnalysisConfig,
}

impl Default for ComponentLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentLedger {
    /// Creates an empty ledger analysing at 50 Hz.
    pub fn new() -> Self {
        ComponentLedger {
            components: Vec::new(),
            series: Vec::new(),
            parallel: Vec::new(),
            history: HistoryStack::new(AnalysisConfig::default().activity_log_capacity),
            next_id: 1,
            config: AnalysisConfig::default(),
        }
    }

    /// Creates an empty ledger with the given settings. Fails if the frequency is not positive.
    pub fn with_config(config: AnalysisConfig) -> Result<Self> {
        check_frequency(config.frequency_hz)?;
        Ok(ComponentLedger {
            history: HistoryStack::new(config.activity_log_capacity),
            config,
            ..Self::new()
        })
    }

    /// Current settings.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Changes the frequency used by the impedance totals. Components are unaffected.
    pub fn set_frequency(&mut self, frequency_hz: f64) -> Result<()> {
        check_frequency(frequency_hz)?;
        debug!("analysis frequency set to {} Hz", frequency_hz);
        self.config.frequency_hz = frequency_hz;
        Ok(())
    }

    /// Adds a component to `group` and returns its newly assigned id.
    ///
    /// Values that are not positive and finite are rejected with `LedgerError::InvalidValue`
    /// before anything changes.
    pub fn add(&mut self, kind: ComponentKind, value: f64, group: Group) -> Result<ComponentId> {
        if !(value.is_finite() && value > 0.0) {
            warn!("rejected {} with value {}", kind, value);
            return Err(LedgerError::InvalidValue(value));
        }
        let component = Component {
            id: ComponentId(self.next_id),
            kind,
            value,
            group,
        };
        let label = format!("added {} {} to {} group", kind, tag(&component), group);
        self.history.snapshot(&self.components, label);

        self.components.push(component);
        self.members_mut(group).push(component.id);
        self.next_id += 1;
        debug!("added {}", component);
        Ok(component.id)
    }

    /// Removes the component with `id`. Returns false, leaving everything untouched, if there is
    /// no such component.
    pub fn remove(&mut self, id: ComponentId) -> bool {
        let idx = match self.components.iter().position(|c| c.id == id) {
            Some(idx) => idx,
            None => return false,
        };
        let component = self.components[idx];
        let label = format!("removed {} from {} group", tag(&component), component.group);
        self.history.snapshot(&self.components, label);

        self.members_mut(component.group).retain(|&member| member != id);
        self.components.remove(idx);
        debug!("removed {}", component);
        true
    }

    /// Looks up a component by id. The result is a copy and stays valid across later changes.
    pub fn find(&self, id: ComponentId) -> Option<Component> {
        self.components.iter().find(|c| c.id == id).cloned()
    }

    /// Restores the component list from before the most recent change. Returns false if there
    /// is nothing to undo.
    ///
    /// Group membership is rebuilt from the restored components in list order. The id counter
    /// keeps counting, so ids handed out before the undo are never handed out again.
    pub fn undo(&mut self) -> bool {
        let restored = match self.history.pop() {
            Some(snapshot) => snapshot,
            None => return false,
        };
        self.components = restored;
        self.series.clear();
        self.parallel.clear();
        for c in &self.components {
            match c.group {
                Group::Series => self.series.push(c.id),
                Group::Parallel => self.parallel.push(c.id),
            }
        }
        debug!(
            "undo restored {} components, {} snapshots left",
            self.components.len(),
            self.history.depth()
        );
        true
    }

    /// All components, in the order they were added.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Ids in the series group, in the order they joined it.
    pub fn series_ids(&self) -> &[ComponentId] {
        &self.series
    }

    /// Ids in the parallel group, in the order they joined it.
    pub fn parallel_ids(&self) -> &[ComponentId] {
        &self.parallel
    }

    /// Ids in `group`.
    pub fn ids_in(&self, group: Group) -> &[ComponentId] {
        match group {
            Group::Series => &self.series,
            Group::Parallel => &self.parallel,
        }
    }

    /// The group as a one-line chain, e.g. `R1 100Ω -- L3 1H` for series or
    /// `R2 1kΩ || C4 1µF` for parallel.
    pub fn describe(&self, group: Group) -> String {
        let sep = match group {
            Group::Series => " -- ",
            Group::Parallel => " || ",
        };
        self.resolve(self.ids_in(group)).map(tag).join(sep)
    }

    fn members_mut(&mut self, group: Group) -> &mut Vec<ComponentId> {
        match group {
            Group::Series => &mut self.series,
            Group::Parallel => &mut self.parallel,
        }
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True when there are no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// The id the next successful `add` will return.
    pub fn next_id(&self) -> ComponentId {
        ComponentId(self.next_id)
    }

    /// Snapshot history and activity log.
    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    fn resolve<'a>(&'a self, ids: &'a [ComponentId]) -> impl Iterator<Item = &'a Component> + 'a {
        ids.iter()
            .filter_map(move |&id| self.components.iter().find(|c| c.id == id))
    }

    /// Total resistance of the resistors among `ids` connected in series. Unknown ids are
    /// skipped.
    pub fn calc_series_resistance(&self, ids: &[ComponentId]) -> f64 {
        let r = impedance::series_resistance(self.resolve(ids));
        trace!("series resistance of {} ids: {}", ids.len(), r);
        r
    }

    /// Total resistance of the resistors among `ids` connected in parallel, or 0 if there are
    /// none.
    pub fn calc_parallel_resistance(&self, ids: &[ComponentId]) -> f64 {
        let r = impedance::parallel_resistance(self.resolve(ids));
        trace!("parallel resistance of {} ids: {}", ids.len(), r);
        r
    }

    /// Magnitude of the impedance of `ids` connected as `topology` at `frequency_hz`.
    ///
    /// A negative or non-finite frequency has no meaningful impedance and gives 0.
    pub fn calc_impedance_magnitude(
        &self,
        ids: &[ComponentId],
        frequency_hz: f64,
        topology: Group,
    ) -> f64 {
        if !(frequency_hz.is_finite() && frequency_hz >= 0.0) {
            warn!("ignored impedance request at {} Hz", frequency_hz);
            return 0.0;
        }
        let z = impedance::impedance_magnitude(self.resolve(ids), frequency_hz, topology);
        trace!(
            "{} impedance of {} ids at {} Hz: {}",
            topology,
            ids.len(),
            frequency_hz,
            z
        );
        z
    }

    /// Resistance of the series group.
    pub fn series_resistance(&self) -> f64 {
        self.calc_series_resistance(&self.series)
    }

    /// Resistance of the parallel group.
    pub fn parallel_resistance(&self) -> f64 {
        self.calc_parallel_resistance(&self.parallel)
    }

    /// Impedance magnitude of the series group at the configured frequency.
    pub fn series_impedance(&self) -> f64 {
        self.calc_impedance_magnitude(&self.series, self.config.frequency_hz, Group::Series)
    }

    /// Impedance magnitude of the parallel group at the configured frequency.
    pub fn parallel_impedance(&self) -> f64 {
        self.calc_impedance_magnitude(&self.parallel, self.config.frequency_hz, Group::Parallel)
    }

    /// Summarises both groups at the configured frequency.
    pub fn report(&self) -> CircuitReport {
        CircuitReport::new(self)
    }
}

impl fmt::Display for ComponentLedger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "total: {} | series: {} | parallel: {} | next id: {}",
            self.components.len(),
            self.series.len(),
            self.parallel.len(),
            self.next_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one() {
        let mut ledger = ComponentLedger::new();
        assert_eq!(ledger.next_id(), ComponentId(1));
        let id = ledger.add(ComponentKind::Resistor, 1.0, Group::Series).unwrap();
        assert_eq!(id, ComponentId(1));
        assert_eq!(ledger.next_id(), ComponentId(2));
    }

    #[test]
    fn add_labels_activity() {
        let mut ledger = ComponentLedger::new();
        ledger.add(ComponentKind::Resistor, 100.0, Group::Series).unwrap();
        ledger.add(ComponentKind::Capacitor, 1e-6, Group::Parallel).unwrap();
        ledger.remove(ComponentId(2));

        assert_eq!(
            ledger.history().activity().collect::<Vec<_>>(),
            vec![
                "added Resistor R1 100Ω to series group",
                "added Capacitor C2 1µF to parallel group",
                "removed C2 1µF from parallel group",
            ]
        );
    }

    #[test]
    fn config_rejects_bad_frequency() {
        let config = AnalysisConfig::default().with_frequency(0.0);
        assert_eq!(
            ComponentLedger::with_config(config).unwrap_err(),
            LedgerError::InvalidFrequency(0.0)
        );
    }

    #[test]
    fn config_sets_log_capacity() {
        let config = AnalysisConfig::default().with_activity_log_capacity(2);
        let mut ledger = ComponentLedger::with_config(config).unwrap();
        for _ in 0..4 {
            ledger.add(ComponentKind::Inductor, 1.0, Group::Series).unwrap();
        }
        assert_eq!(ledger.history().log_capacity(), 2);
        assert_eq!(ledger.history().activity().count(), 2);
        assert_eq!(ledger.history().depth(), 4);
    }

    #[test]
    fn describes_groups_in_member_order() {
        let mut ledger = ComponentLedger::new();
        ledger.add(ComponentKind::Resistor, 100.0, Group::Series).unwrap();
        ledger.add(ComponentKind::Resistor, 1000.0, Group::Parallel).unwrap();
        ledger.add(ComponentKind::Inductor, 1.0, Group::Series).unwrap();
        ledger.add(ComponentKind::Capacitor, 1e-6, Group::Parallel).unwrap();

        assert_eq!(ledger.describe(Group::Series), "R1 100Ω -- L3 1H");
        assert_eq!(ledger.describe(Group::Parallel), "R2 1kΩ || C4 1µF");
        assert_eq!(ComponentLedger::new().describe(Group::Series), "");
    }

    #[test]
    fn impedance_at_bad_frequency_is_zero() {
        let mut ledger = ComponentLedger::new();
        let l = ledger.add(ComponentKind::Inductor, 1.0, Group::Series).unwrap();
        let r = ledger.add(ComponentKind::Resistor, 10.0, Group::Parallel).unwrap();

        for &f in [std::f64::NAN, std::f64::INFINITY, -50.0].iter() {
            assert_eq!(ledger.calc_impedance_magnitude(&[l], f, Group::Series), 0.0);
            assert_eq!(ledger.calc_impedance_magnitude(&[r], f, Group::Parallel), 0.0);
        }
        assert_eq!(ledger.calc_impedance_magnitude(&[r], 0.0, Group::Series), 10.0);
    }

    #[test]
    fn counts_line() {
        let mut ledger = ComponentLedger::new();
        ledger.add(ComponentKind::Resistor, 1.0, Group::Series).unwrap();
        ledger.add(ComponentKind::Resistor, 1.0, Group::Parallel).unwrap();
        ledger.remove(ComponentId(1));
        assert_eq!(
            ledger.to_string(),
            "total: 1 | series: 0 | parallel: 1 | next id: 3"
        );
    }
}

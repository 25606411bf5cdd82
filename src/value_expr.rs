extern crate meval;

use std::iter;

use crate::{ComponentId, ComponentKind, ComponentLedger, Group, LedgerError, Result, SI_PREFIXES};

lazy_static!(
    static ref SUFFIXES: Vec<(&'static str, f64)> = SI_PREFIXES
        .iter()
        .cloned()
        .filter(|&(prefix, _)| !prefix.is_empty())
        .chain(iter::once(("u", 1e-6)))
        .collect();
);

fn invalid(text: &str, reason: impl ToString) -> LedgerError {
    LedgerError::InvalidExpression {
        text: text.to_string(),
        reason: reason.to_string(),
    }
}

fn with_suffix(text: &str) -> Option<f64> {
    SUFFIXES.iter().find_map(|&(suffix, scale)| {
        text.strip_suffix(suffix)
            .and_then(|num| num.trim_end().parse::<f64>().ok())
            .map(|num| num * scale)
    })
}

/// Parses a component value typed by a user.
///
/// Accepts a plain number, a number followed by an SI prefix (`G`, `M`, `k`, `m`, `u` or `µ`,
/// `n`, `p`), or an arithmetic expression in the syntax of
/// [meval](https://docs.rs/meval/#supported-expressions). The sign of the result is not checked.
/// # Examples
/// ```
///     # use circuit_ledger::parse_value;
///     assert_eq!(parse_value("470").unwrap(), 470.0);
///     assert_eq!(parse_value("4.7k").unwrap(), 4700.0);
///     assert!((parse_value("1/(2*pi*50)").unwrap() - 0.003_183).abs() < 1e-6);
///     assert!(parse_value("ten").is_err());
/// ```
pub fn parse_value(text: &str) -> Result<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(invalid(text, "no value given"));
    }
    let value = match text.parse::<f64>().ok().or_else(|| with_suffix(text)) {
        Some(value) => value,
        None => meval::eval_str(text).map_err(|e| invalid(text, e))?,
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid(text, "value is not finite"))
    }
}

impl ComponentLedger {
    /// Parses `text` with `parse_value` and adds the result as a new component.
    pub fn add_parsed(&mut self, kind: ComponentKind, text: &str, group: Group) -> Result<ComponentId> {
        let value = parse_value(text)?;
        self.add(kind, value, group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= b.abs() * 1e-12
    }

    #[test]
    fn prefixes() {
        assert_eq!(parse_value("2M").unwrap(), 2e6);
        assert!(close(parse_value("3m").unwrap(), 3e-3));
        assert!(close(parse_value("10u").unwrap(), 10e-6));
        assert!(close(parse_value("10µ").unwrap(), 10e-6));
        assert!(close(parse_value("100n").unwrap(), 100e-9));
        assert!(close(parse_value(" 22 p ").unwrap(), 22e-12));
    }

    #[test]
    fn expressions() {
        assert_eq!(parse_value("2*2.2e3").unwrap(), 4400.0);
        assert_eq!(parse_value("-5").unwrap(), -5.0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_value("").is_err());
        assert!(parse_value("   ").is_err());
        assert!(parse_value("4.7q").is_err());
        assert!(parse_value("1/0").is_err());
        match parse_value("k") {
            Err(LedgerError::InvalidExpression { text, .. }) => assert_eq!(text, "k"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn parsed_values_still_need_to_be_positive() {
        let mut ledger = ComponentLedger::new();
        assert_eq!(
            ledger.add_parsed(ComponentKind::Resistor, "-5", Group::Series),
            Err(LedgerError::InvalidValue(-5.0))
        );
        assert!(ledger.is_empty());
        assert!(ledger.history().is_empty());

        let id = ledger
            .add_parsed(ComponentKind::Capacitor, "100n", Group::Parallel)
            .unwrap();
        assert!(close(ledger.find(id).unwrap().value, 100e-9));
    }
}

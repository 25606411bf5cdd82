extern crate circuit_ledger;
extern crate env_logger;
extern crate itertools;
#[macro_use]
extern crate log;

use circuit_ledger::*;
use itertools::Itertools;

fn main() {
    env_logger::init();

    let mut ledger = ComponentLedger::new();

    let entries = [
        (ComponentKind::Resistor, "100", Group::Series),
        (ComponentKind::Inductor, "1", Group::Series),
        (ComponentKind::Resistor, "4.7k", Group::Parallel),
        (ComponentKind::Capacitor, "1/(2*pi*50*1e3)", Group::Parallel),
        (ComponentKind::Resistor, "-10", Group::Parallel),
        (ComponentKind::Capacitor, "10u", Group::Series),
    ];
    for &(kind, text, group) in entries.iter() {
        match ledger.add_parsed(kind, text, group) {
            Ok(id) => info!("added {} as id {}", text, id),
            Err(e) => println!("Skipped {} {:?}: {}", kind, text, e),
        }
    }

    let last = ComponentId(ledger.next_id().0 - 1);
    for &id in [last, ComponentId(42)].iter() {
        if ledger.remove(id) {
            println!("Removed component {}", id);
        } else {
            println!("No component with id {}", id);
        }
    }
    if ledger.undo() {
        println!("Undid the last change");
    } else {
        println!("Nothing to undo");
    }

    println!("Components:\n{}", ledger.components().iter().join("\n"));
    println!();
    println!("Series:   {}", ledger.describe(Group::Series));
    println!("Parallel: {}", ledger.describe(Group::Parallel));
    println!();
    println!("Activity:\n{}", ledger.history().activity().join("\n"));
    println!();
    println!("{}", ledger);
    println!("{}", ledger.report());
}

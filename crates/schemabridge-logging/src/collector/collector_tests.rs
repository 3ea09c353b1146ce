#![allow(non_snake_case)]

use super::*;

#[test]
fn WarningCollector___new___is_empty() {
    let collector = WarningCollector::new();

    assert_eq!(collector.count(), 0);
    assert!(collector.messages().is_empty());
}

#[test]
fn WarningCollector___record___keeps_emission_order() {
    let collector = WarningCollector::new();

    collector.record("first");
    collector.record(String::from("second"));

    assert_eq!(collector.messages(), vec!["first", "second"]);
    assert_eq!(collector.count(), 2);
}

#[test]
fn WarningCollector___take___drains_messages() {
    let collector = WarningCollector::new();
    collector.record("only");

    let taken = collector.take();

    assert_eq!(taken, vec!["only"]);
    assert_eq!(collector.count(), 0);
}

#[test]
fn WarningCollector___global___returns_same_instance() {
    let first = WarningCollector::global() as *const WarningCollector;
    let second = WarningCollector::global() as *const WarningCollector;

    assert_eq!(first, second);
}

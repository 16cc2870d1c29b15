//! Resolver feeding the solver feeding the display, as the panel wires them.

use rc_sizing::{
    BackupPolicy, DisplaySlots, LoadReading, LoadReadings, LoadSource, OutputSlot, SolveInput,
    UnitCapacity, resolve, solve,
};

fn sized_slots(readings: &LoadReadings, unit: UnitCapacity, backup: BackupPolicy) -> DisplaySlots {
    let load = resolve(readings).map(|r| r.tons);
    let outcome = solve(&SolveInput {
        estimated_load: load,
        safety_factor_percent: 10.0,
        unit_capacity: unit.tons(),
        backup_policy: backup,
    });
    DisplaySlots::render(&outcome)
}

#[test]
fn watts_only_room_is_sized_from_converted_load() {
    // 32 708.1 W / 3517 = 9.3 TR
    let readings = LoadReadings {
        approx_tons: None,
        exact_tons: Some(LoadReading::Text(String::new())),
        total_watts: Some(LoadReading::Value(32_708.1)),
    };
    let resolved = resolve(&readings).unwrap();
    assert_eq!(resolved.source, LoadSource::Watts);
    assert!((resolved.tons - 9.3).abs() < 1e-9);

    let slots = sized_slots(&readings, UnitCapacity::Tr5, BackupPolicy::NPlus2);
    assert_eq!(slots.get(OutputSlot::OperationalUnits), "3");
    assert_eq!(slots.get(OutputSlot::TotalUnits), "5");
    assert_eq!(slots.get(OutputSlot::Margin), "61.3%");
}

#[test]
fn unresolved_room_stays_idle() {
    let readings = LoadReadings {
        approx_tons: Some(LoadReading::Text("N/A".into())),
        exact_tons: Some(LoadReading::Value(0.0)),
        total_watts: None,
    };
    assert!(resolve(&readings).is_none());
    let slots = sized_slots(&readings, UnitCapacity::Tr10, BackupPolicy::NPlus1);
    assert!(slots.is_idle());
}

#[test]
fn larger_units_reduce_count_and_raise_margin() {
    let readings = LoadReadings {
        approx_tons: Some(LoadReading::Value(22.0)),
        ..LoadReadings::default()
    };
    let small = sized_slots(&readings, UnitCapacity::Tr5, BackupPolicy::N);
    let large = sized_slots(&readings, UnitCapacity::Tr15, BackupPolicy::N);
    // 22 * 1.1 = 24.2 TR required
    assert_eq!(small.get(OutputSlot::OperationalUnits), "5");
    assert_eq!(small.get(OutputSlot::TotalCapacity), "25.0");
    assert_eq!(large.get(OutputSlot::OperationalUnits), "2");
    assert_eq!(large.get(OutputSlot::TotalCapacity), "30.0");
}

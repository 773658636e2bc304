//! Manual device commands routed through the supervisor.

use incubator::app::commands::{
    Action, CommandError, CommandResponse, Device, DeviceCommand, DeviceSnapshot,
};
use incubator::app::events::AppEvent;
use incubator::control::heater::HeaterPhase;
use incubator::drivers::fan::{FanSnapshot, FanSpeed};
use incubator::pins::{FAN_GPIO, FAN_MODE_GPIO, HEATER_GPIO};

use crate::mock_hw::Rig;

#[test]
fn bare_device_returns_snapshot() {
    let mut rig = Rig::started();
    assert_eq!(
        rig.command("fan"),
        Ok(CommandResponse::Snapshot(DeviceSnapshot::Fan(FanSnapshot {
            pin: FAN_GPIO,
            on: false,
        })))
    );

    match rig.command("heater") {
        Ok(CommandResponse::Snapshot(DeviceSnapshot::Heater(h))) => {
            assert_eq!(h.phase, HeaterPhase::Off);
            assert_eq!((h.on_secs, h.off_secs), (30, 30));
            assert_eq!(h.target_temp_c, 30.0);
        }
        other => panic!("unexpected response {other:?}"),
    }
}

#[test]
fn vent_commands_move_the_hatch() {
    let mut rig = Rig::started();
    rig.board.clear();

    assert_eq!(rig.command("vent open"), Ok(CommandResponse::Done));
    assert!(rig.sup.cooler().vent().is_open());
    assert_eq!(rig.board.servo_angle(), Some(0));

    assert_eq!(rig.command("hatch close"), Ok(CommandResponse::Done));
    assert!(!rig.sup.cooler().vent().is_open());
    assert_eq!(rig.board.servo_angle(), Some(95));
    assert_eq!(rig.board.delays(), 2);
}

#[test]
fn fan_mode_commands() {
    let mut rig = Rig::started();
    rig.command("fan-mode fast").unwrap();
    assert_eq!(rig.sup.fans().speed.speed(), FanSpeed::Fast);
    assert!(rig.board.energized(FAN_MODE_GPIO));

    rig.command("fan-mode slow").unwrap();
    assert_eq!(rig.sup.fans().speed.speed(), FanSpeed::Slow);
    assert!(!rig.board.energized(FAN_MODE_GPIO));
}

#[test]
fn heater_on_then_check_cuts_off_at_target() {
    let mut rig = Rig::started();
    rig.command("heater on").unwrap();
    assert!(rig.sup.heater().is_heating());
    assert!(rig.board.energized(HEATER_GPIO));

    rig.chamber.temperature_c = 31.0;
    rig.command("heater check").unwrap();
    assert!(!rig.sup.heater().is_active());
    assert!(!rig.board.energized(FAN_GPIO));

    let changes: Vec<_> = rig
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::HeaterPhaseChanged { .. }))
        .collect();
    assert_eq!(changes.len(), 2);
}

#[test]
fn heater_on_takes_over_from_cooler() {
    let mut rig = Rig::started();
    rig.command("cooler on").unwrap();
    assert!(rig.sup.cooler().vent().is_open());

    rig.command("heater on").unwrap();
    assert!(rig.sup.heater().is_heating());
    assert!(!rig.sup.cooler().is_active());
    assert!(!rig.sup.cooler().vent().is_open());
    assert_eq!(rig.sup.fans().speed.speed(), FanSpeed::Slow);
    assert!(rig.board.energized(FAN_GPIO));
    assert!(rig.sink.faults().is_empty());

    // The hot-chamber poll cuts the heater and starts a working cooler.
    for _ in 0..2 {
        let t = rig.poll(33.0);
        assert_eq!(t.heater, HeaterPhase::Off);
        assert!(t.cooler_active);
        assert!(rig.board.energized(FAN_GPIO));
    }
}

#[test]
fn cooler_on_takes_over_from_heater() {
    let mut rig = Rig::started();
    rig.command("heater on").unwrap();

    rig.command("cooler on").unwrap();
    assert!(!rig.sup.heater().is_active());
    assert!(!rig.board.energized(HEATER_GPIO));
    assert!(rig.sup.cooler().is_active());
    assert!(rig.sup.cooler().vent().is_open());
    assert_eq!(rig.sup.fans().speed.speed(), FanSpeed::Fast);
    assert!(rig.board.energized(FAN_GPIO));
}

#[test]
fn repeated_off_is_harmless() {
    let mut rig = Rig::started();
    rig.command("cooler on").unwrap();
    rig.command("cooler off").unwrap();
    let before = rig.sup.snapshot();
    rig.board.clear();

    rig.command("cooler off").unwrap();
    rig.command("heater off").unwrap();
    rig.command("heater off").unwrap();

    assert_eq!(rig.sup.snapshot(), before);
    // Only the heater relay is re-released; no vent travel, no fan change.
    assert_eq!(rig.board.delays(), 0);
    assert!(rig.board.level(FAN_GPIO).is_none());
}

#[test]
fn unsupported_actions_change_nothing() {
    let mut rig = Rig::started();
    let before = rig.sup.snapshot();
    let events = rig.sink.events.len();
    rig.board.clear();

    for (text, device, action) in [
        ("vent slow", Device::Vent, Action::Slow),
        ("cooler init", Device::Cooler, Action::Init),
        ("fan open", Device::Fan, Action::Open),
        ("fan-mode on", Device::FanMode, Action::On),
        ("heater fast", Device::Heater, Action::Fast),
    ] {
        assert_eq!(
            rig.command(text),
            Err(CommandError::Unsupported(DeviceCommand::new(device, action))),
            "{text}"
        );
    }

    assert!(rig.board.calls().is_empty());
    assert_eq!(rig.sink.events.len(), events);
    assert_eq!(rig.sup.snapshot(), before);
}

#[test]
fn unknown_words_fail_to_parse() {
    let mut rig = Rig::started();
    assert_eq!(rig.command("oven on"), Err(CommandError::UnknownDevice));
    assert_eq!(rig.command("vent wiggle"), Err(CommandError::UnknownAction));
    assert_eq!(rig.command("   "), Err(CommandError::Empty));
}

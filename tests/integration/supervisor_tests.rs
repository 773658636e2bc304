//! Supervisor poll-loop scenarios against mock hardware.

use incubator::app::events::AppEvent;
use incubator::app::service::TickOutcome;
use incubator::config::IncubatorConfig;
use incubator::control::heater::HeaterPhase;
use incubator::drivers::fan::FanSpeed;
use incubator::error::{ActuatorError, Error, StorageError};
use incubator::pins::{FAN_GPIO, FAN_MODE_GPIO, HEATER_GPIO, VENT_RELAY_GPIO, VENT_SERVO_GPIO};

use crate::mock_hw::{HwCall, Rig};

fn logging_config() -> IncubatorConfig {
    IncubatorConfig {
        logging_enabled: true,
        ..IncubatorConfig::default()
    }
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn start_drives_every_relay_safe_and_closes_vent() {
    let rig = Rig::started();

    assert_eq!(
        rig.board.calls(),
        vec![
            HwCall::Pin { gpio: FAN_MODE_GPIO, high: true },
            HwCall::Pin { gpio: FAN_GPIO, high: true },
            HwCall::Pin { gpio: VENT_RELAY_GPIO, high: true },
            HwCall::Attach { channel: 1, pin: VENT_SERVO_GPIO },
            HwCall::Angle { channel: 1, angle: 95 },
            HwCall::Pin { gpio: VENT_RELAY_GPIO, high: false },
            HwCall::DelayMs(500),
            HwCall::Pin { gpio: VENT_RELAY_GPIO, high: true },
            HwCall::Pin { gpio: HEATER_GPIO, high: true },
        ]
    );
    assert!(!rig.sup.cooler().vent().is_open());
    assert!(matches!(
        rig.sink.events.last(),
        Some(AppEvent::Started { poll_interval_ms: 5000, .. })
    ));
}

#[test]
fn start_draws_idle_screen() {
    let rig = Rig::started();
    assert_eq!(rig.display.row(16), Some("TMP: 29 C"));
    assert_eq!(rig.display.row(37), Some("HUM: 50 %"));
    assert_eq!(rig.display.row(49), Some("HEATER off"));
    assert_eq!(rig.display.row(62), Some("COOLING off"));
}

#[test]
fn start_writes_log_header_only_when_enabled() {
    let rig = Rig::started();
    assert!(rig.store.files.is_empty());

    let mut rig = Rig::new(logging_config());
    rig.start();
    assert_eq!(rig.store.lines("log.csv"), ["TMP,HUM,Heater,Cooler"]);
}

// ── Poll gate ─────────────────────────────────────────────────

#[test]
fn first_poll_runs_one_interval_after_start() {
    let mut rig = Rig::started();

    assert_eq!(rig.tick(), TickOutcome::Waiting { remaining_ms: 5000 });
    rig.chamber.now_ms = 4999;
    assert_eq!(rig.tick(), TickOutcome::Waiting { remaining_ms: 1 });
    rig.chamber.now_ms = 5000;
    assert!(matches!(rig.tick(), TickOutcome::Polled(t) if t.poll == 1));
    assert_eq!(rig.tick(), TickOutcome::Waiting { remaining_ms: 5000 });
}

#[test]
fn poll_gate_survives_clock_rollover() {
    let mut rig = Rig::new(IncubatorConfig::default());
    rig.chamber.now_ms = u32::MAX - 999;
    rig.start();

    rig.chamber.now_ms = 3000; // 4000 ms after start, across the wrap
    assert_eq!(rig.tick(), TickOutcome::Waiting { remaining_ms: 1000 });
    rig.chamber.now_ms = 4000;
    assert!(matches!(rig.tick(), TickOutcome::Polled(_)));
}

// ── Heating ───────────────────────────────────────────────────

#[test]
fn cold_chamber_starts_heater() {
    let mut rig = Rig::started();
    let t = rig.poll(27.0);

    assert_eq!(t.heater, HeaterPhase::Heating);
    assert!(!t.cooler_active);
    assert!(rig.board.energized(HEATER_GPIO));
    assert!(rig.board.energized(FAN_GPIO));
    assert_eq!(rig.board.level(FAN_MODE_GPIO), Some(true));
    assert_eq!(rig.sup.fans().speed.speed(), FanSpeed::Slow);
    assert_eq!(rig.sink.heater_transitions(), [(HeaterPhase::Off, HeaterPhase::Heating)]);
    assert_eq!(rig.display.row(49), Some("HEATER"));
}

#[test]
fn band_temperature_leaves_everything_idle() {
    let mut rig = Rig::started();
    rig.board.clear();
    for temp in [28.0, 29.0, 30.0, 31.0, 32.0] {
        let t = rig.poll(temp);
        assert_eq!(t.heater, HeaterPhase::Off);
        assert!(!t.cooler_active);
    }
    assert!(rig.board.calls().is_empty());
}

#[test]
fn heater_duty_cycles_every_thirty_seconds() {
    let mut rig = Rig::started();
    // Heating starts at t = 5 s; each poll is 5 s.
    let phases: Vec<HeaterPhase> = (0..14).map(|_| rig.poll(27.0).heater).collect();

    use HeaterPhase::{Heating as H, Waiting as W};
    assert_eq!(phases, [H, H, H, H, H, H, W, W, W, W, W, W, H, H]);
    assert_eq!(
        rig.sink.heater_transitions(),
        [
            (HeaterPhase::Off, H),
            (H, W),
            (W, H),
        ]
    );
    assert!(rig.board.energized(HEATER_GPIO));
    // The fan keeps running through the waiting phase.
    assert!(rig.board.energized(FAN_GPIO));
}

#[test]
fn heater_cuts_off_at_target() {
    let mut rig = Rig::started();
    rig.poll(27.0);
    let t = rig.poll(30.0);

    assert_eq!(t.heater, HeaterPhase::Off);
    assert!(!rig.board.energized(HEATER_GPIO));
    assert!(!rig.board.energized(FAN_GPIO));
    assert_eq!(rig.display.row(49), Some("HEATER off"));
}

#[test]
fn heater_cutoff_applies_while_waiting() {
    let mut rig = Rig::started();
    for _ in 0..7 {
        rig.poll(27.0);
    }
    assert!(rig.sup.heater().is_waiting());
    assert_eq!(rig.poll(30.5).heater, HeaterPhase::Off);
}

#[test]
fn unreadable_sensor_cuts_heater_off() {
    let mut rig = Rig::started();
    rig.poll(27.0);
    let t = rig.poll(f32::NAN);

    assert_eq!(t.heater, HeaterPhase::Off);
    assert!(!t.cooler_active);
    assert!(!rig.board.energized(HEATER_GPIO));
    assert!(!rig.board.energized(FAN_GPIO));

    // Still NaN: nothing restarts.
    assert_eq!(rig.poll(f32::NAN).heater, HeaterPhase::Off);
    assert_eq!(rig.display.row(16), Some("TMP: 0  C"));
}

#[test]
fn active_heater_ignores_band_until_target() {
    let mut rig = Rig::started();
    rig.poll(27.0);
    // Above min but below target: heater keeps going.
    assert_eq!(rig.poll(29.0).heater, HeaterPhase::Heating);
}

// ── Cooling ───────────────────────────────────────────────────

#[test]
fn hot_chamber_opens_vent_and_runs_fan_fast() {
    let mut rig = Rig::started();
    rig.board.clear();
    let t = rig.poll(33.0);

    assert!(t.cooler_active);
    assert_eq!(t.heater, HeaterPhase::Off);
    assert!(rig.sup.cooler().vent().is_open());
    assert_eq!(rig.board.servo_angle(), Some(0));
    assert!(rig.board.energized(FAN_MODE_GPIO));
    assert!(rig.board.energized(FAN_GPIO));
    assert!(!rig.board.energized(VENT_RELAY_GPIO));
    assert_eq!(rig.board.delays(), 1);
    assert_eq!(rig.sink.cooler_edges(), [true]);
    assert_eq!(rig.display.row(62), Some("COOLING"));
}

#[test]
fn cooler_stays_active_above_target() {
    let mut rig = Rig::started();
    rig.poll(33.0);
    rig.board.clear();

    assert!(rig.poll(33.0).cooler_active);
    assert!(rig.poll(30.5).cooler_active);
    // No second vent move while already cooling.
    assert_eq!(rig.board.delays(), 0);
}

#[test]
fn cooler_releases_at_target() {
    let mut rig = Rig::started();
    rig.poll(33.0);
    let t = rig.poll(30.0);

    assert!(!t.cooler_active);
    assert!(!rig.sup.cooler().vent().is_open());
    assert_eq!(rig.board.servo_angle(), Some(95));
    assert!(!rig.board.energized(FAN_GPIO));
    assert_eq!(rig.sink.cooler_edges(), [true, false]);
}

#[test]
fn sudden_cold_swaps_cooler_for_heater() {
    let mut rig = Rig::started();
    rig.poll(33.0);
    let t = rig.poll(27.0);

    assert!(!t.cooler_active);
    assert_eq!(t.heater, HeaterPhase::Heating);
    assert!(!rig.sup.cooler().vent().is_open());
    assert_eq!(rig.sup.fans().speed.speed(), FanSpeed::Slow);
    assert!(rig.board.energized(FAN_GPIO));
}

#[test]
fn sudden_heat_swaps_heater_for_cooler() {
    let mut rig = Rig::started();
    rig.poll(27.0);
    // Heater cut-off fires first, then the cooler branch takes over.
    let t = rig.poll(33.0);

    assert_eq!(t.heater, HeaterPhase::Off);
    assert!(t.cooler_active);
    assert!(!rig.board.energized(HEATER_GPIO));
    assert_eq!(rig.sup.fans().speed.speed(), FanSpeed::Fast);
}

// ── Data log ──────────────────────────────────────────────────

#[test]
fn each_poll_appends_one_row() {
    let mut rig = Rig::new(logging_config());
    rig.start();
    rig.poll(27.0);
    rig.chamber.humidity_pct = 48.5;
    rig.poll(33.0);
    rig.poll(31.25);

    assert_eq!(
        rig.store.lines("log.csv"),
        [
            "TMP,HUM,Heater,Cooler",
            "27.0,50.0,10,0",
            "33.0,48.5,0,15",
            "31.25,48.5,0,15",
        ]
    );
}

// ── Fault reporting ───────────────────────────────────────────

#[test]
fn relay_fault_is_reported_without_changing_control() {
    let mut rig = Rig::started();
    rig.board.break_gpio(HEATER_GPIO);
    let t = rig.poll(27.0);

    assert_eq!(t.heater, HeaterPhase::Heating);
    assert_eq!(t.faults, 1);
    assert_eq!(rig.sink.faults(), [Error::Actuator(ActuatorError::GpioWriteFailed)]);
}

#[test]
fn display_fault_does_not_stop_the_loop() {
    let mut rig = Rig::started();
    rig.display.fail = true;
    let t = rig.poll(27.0);

    assert_eq!(t.heater, HeaterPhase::Heating);
    assert_eq!(rig.sink.faults(), [Error::Display]);
    assert!(matches!(rig.sink.events.last(), Some(AppEvent::Telemetry(_))));
}

#[test]
fn storage_fault_does_not_stop_the_loop() {
    let mut rig = Rig::new(logging_config());
    rig.start();
    rig.store.fail = true;
    rig.poll(29.0);
    rig.poll(29.0);

    assert_eq!(
        rig.sink.faults(),
        [
            Error::Storage(StorageError::IoError),
            Error::Storage(StorageError::IoError),
        ]
    );
    assert_eq!(rig.sup.polls(), 2);
}

// ── Introspection ─────────────────────────────────────────────

#[test]
fn snapshot_serialises_every_device() {
    let mut rig = Rig::started();
    rig.poll(27.0);
    let json = serde_json::to_value(rig.sup.snapshot()).unwrap();

    assert_eq!(json["heater"]["phase"], "heating");
    assert_eq!(json["heater"]["pin"], 3);
    assert_eq!(json["fan"]["on"], true);
    assert_eq!(json["fan_mode"]["speed"], "slow");
    assert_eq!(json["vent"]["servo_pin"], 28);
    assert_eq!(json["vent"]["is_open"], false);
    assert_eq!(json["cooler"]["is_active"], false);
    assert_eq!(json["polls"], 1);
    assert_eq!(json["last_poll_ms"], 5000);
}

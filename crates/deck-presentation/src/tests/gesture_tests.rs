use super::*;

fn tracking() -> DragStateMachine {
    let mut machine = DragStateMachine::new(DeckConfig::default());
    assert!(machine.begin());
    machine
}

#[test]
fn drag_sequence_maps_through_curve_and_dismisses() {
    let mut machine = tracking();

    assert_eq!(machine.update(0.0, true).offset, Some(0.0));
    assert_eq!(machine.update(50.0, true).offset, Some(25.0));
    let near = machine.update(130.0, true);
    assert!((near.offset.unwrap() - 63.4).abs() < 0.1);
    assert!(!near.dismiss);

    let last = machine.update(250.0, true);
    assert!(last.dismiss);
    assert_eq!(machine.phase(), GesturePhase::DismissRequested);
}

#[test]
fn dismiss_fires_once_per_crossing() {
    let mut machine = tracking();
    let fired = [240.0, 260.0, 300.0, 250.0]
        .into_iter()
        .filter(|raw| machine.update(*raw, true).dismiss)
        .count();
    assert_eq!(fired, 1);

    machine.dismissal_began();
    assert!(!machine.begin());
    assert!(!machine.update(400.0, true).dismiss);
}

#[test]
fn new_crossing_after_reset_dismisses_again() {
    let mut machine = tracking();
    assert!(machine.update(245.0, true).dismiss);
    machine.reset();
    assert!(machine.begin());
    assert!(machine.update(245.0, true).dismiss);
}

#[test]
fn upward_drag_leaves_transform_alone() {
    let mut machine = tracking();
    let update = machine.update(-40.0, true);
    assert_eq!(update.offset, None);
    assert!(!update.dismiss);
    assert_eq!(machine.phase(), GesturePhase::Tracking);
}

#[test]
fn disabled_dismissal_resets_translation() {
    let mut machine = tracking();
    for raw in [10.0, 150.0, 500.0] {
        let update = machine.update(raw, false);
        assert_eq!(update.offset, None);
        assert!(update.reset_translation);
        assert!(!update.dismiss);
    }
}

#[test]
fn ending_below_threshold_settles() {
    let mut machine = tracking();
    machine.update(100.0, true);
    assert!(machine.end());
    assert_eq!(machine.phase(), GesturePhase::Settling);

    machine.settled();
    assert_eq!(machine.phase(), GesturePhase::Idle);
}

#[test]
fn ending_after_dismissal_began_does_not_settle() {
    let mut machine = tracking();
    machine.update(300.0, true);
    machine.dismissal_began();
    assert!(!machine.end());
    assert_eq!(machine.phase(), GesturePhase::Dismissing);
}

#[test]
fn unanswered_dismiss_request_settles_on_release() {
    let mut machine = tracking();
    assert!(machine.update(300.0, true).dismiss);

    assert!(machine.end());
    assert_eq!(machine.phase(), GesturePhase::Settling);
    machine.settled();
    assert!(machine.begin());
    assert_eq!(machine.update(40.0, true).offset, Some(20.0));
}

#[test]
fn regrab_while_settling_tracks_again() {
    let mut machine = tracking();
    machine.update(60.0, true);
    machine.end();
    assert!(machine.begin());
    machine.settled();
    assert_eq!(machine.phase(), GesturePhase::Tracking);
}

#[test]
fn updates_outside_tracking_are_ignored() {
    let mut machine = DragStateMachine::new(DeckConfig::default());
    assert_eq!(machine.update(300.0, true), DragUpdate::default());
}

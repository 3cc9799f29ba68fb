use std::cell::Cell;
use std::rc::Rc;

use deck_foundation::{PointerEvent, PointerEventKind, SimultaneousRecognitionPolicy, RecognizerId};
use deck_presentation::GesturePhase;
use deck_testing::prelude::*;
use deck_ui_graphics::Point;

fn presented_host() -> TestHost {
    let host = TestHost::new(375.0, 667.0);
    host.present();
    host
}

#[test]
fn drag_sequence_follows_elastic_curve_then_dismisses() {
    let host = presented_host();

    let offsets = host.drag_through(&[0.0, 50.0, 130.0]);
    assert_eq!(offsets[0], 0.0);
    assert_eq!(offsets[1], 25.0);
    assert!((offsets[2] - 63.4).abs() < 0.1, "got {}", offsets[2]);
    assert_eq!(host.dismissals(), 0);

    host.drag_to(250.0);
    assert_eq!(host.dismissals(), 1);
    assert_eq!(host.presentation().gesture_phase(), GesturePhase::DismissRequested);
}

#[test]
fn dismissal_is_requested_once_per_crossing() {
    let host = presented_host();

    host.drag_through(&[0.0, 240.0, 260.0, 300.0, 245.0]);
    assert_eq!(host.dismissals(), 1);
}

#[test]
fn declined_dismissal_settles_and_accepts_a_new_drag() {
    let host = presented_host();
    host.set_dismiss_response(DismissResponse::Record);

    host.drag_through(&[0.0, 250.0]);
    assert_eq!(host.dismissals(), 1);
    host.release_at(250.0);
    assert_eq!(host.presentation().gesture_phase(), GesturePhase::Settling);
    host.settle();

    assert_eq!(host.presentation().gesture_phase(), GesturePhase::Idle);
    assert_eq!(host.presented_offset(), 0.0);

    let offsets = host.drag_through(&[0.0, 40.0]);
    assert_eq!(offsets, vec![0.0, 20.0]);
    assert_eq!(host.presentation().gesture_phase(), GesturePhase::Tracking);

    host.drag_to(250.0);
    assert_eq!(host.dismissals(), 2);
}

#[test]
fn short_drag_settles_back_over_a_quarter_second() {
    let host = presented_host();
    host.drag_through(&[0.0, 100.0]);
    assert_eq!(host.presented_offset(), 50.0);

    host.release_at(100.0);
    assert_eq!(host.presentation().gesture_phase(), GesturePhase::Settling);

    host.frame();
    assert_eq!(host.presented_offset(), 50.0);
    host.advance_millis(192);
    let midway = host.presented_offset();
    assert!(midway > 0.0 && midway < 50.0, "offset {midway}");
    assert_eq!(host.presentation().gesture_phase(), GesturePhase::Settling);

    host.advance_millis(64);
    assert!(host.transform_of(host.views().presented).is_identity());
    assert_eq!(host.presentation().gesture_phase(), GesturePhase::Idle);
    assert_eq!(host.dismissals(), 0);
}

#[test]
fn cancelled_drag_settles_like_a_release() {
    let host = presented_host();
    host.drag_through(&[0.0, 80.0]);
    host.cancel_at(80.0);
    host.settle();

    assert_eq!(host.presented_offset(), 0.0);
    assert_eq!(host.presentation().gesture_phase(), GesturePhase::Idle);
}

#[test]
fn disabled_policy_keeps_card_in_place() {
    let host = presented_host();
    host.presentation().set_dismiss_policy(Rc::new(|| false));

    let offsets = host.drag_through(&[0.0, 50.0, 130.0, 300.0]);
    assert!(offsets.iter().all(|offset| *offset == 0.0), "{offsets:?}");
    assert_eq!(host.dismissals(), 0);
}

#[test]
fn translation_restarts_from_zero_when_policy_allows_again() {
    let host = presented_host();
    let allowed = Rc::new(Cell::new(false));
    let policy_flag = Rc::clone(&allowed);
    host.presentation()
        .set_dismiss_policy(Rc::new(move || policy_flag.get()));

    host.drag_through(&[0.0, 100.0]);
    assert_eq!(host.presented_offset(), 0.0);

    allowed.set(true);
    host.drag_to(140.0);
    assert_eq!(host.presented_offset(), 20.0);
}

#[test]
fn upward_drag_is_ignored() {
    let host = presented_host();
    let offsets = host.drag_through(&[0.0, -30.0, -200.0]);
    assert_eq!(offsets, vec![0.0, 0.0, 0.0]);

    host.drag_to(40.0);
    host.drag_to(-10.0);
    assert_eq!(host.presented_offset(), 20.0);
}

#[test]
fn regrab_during_settle_takes_over() {
    let host = presented_host();
    host.drag_through(&[0.0, 100.0]);
    host.release_at(100.0);
    host.frame();
    host.advance_millis(64);

    host.drag_through(&[0.0, 60.0]);
    assert_eq!(host.presentation().gesture_phase(), GesturePhase::Tracking);
    assert_eq!(host.presented_offset(), 30.0);

    host.advance_millis(400);
    assert_eq!(host.presented_offset(), 30.0);
    assert_eq!(host.presentation().gesture_phase(), GesturePhase::Tracking);
}

#[test]
fn host_may_begin_dismissal_synchronously() {
    let host = presented_host();
    host.set_dismiss_response(DismissResponse::BeginTransition);

    host.drag_through(&[0.0, 250.0, 300.0]);
    assert_eq!(host.dismissals(), 1);

    let presenting = host.transform_of(host.views().presenting);
    assert!((presenting.scale - (1.0 - 40.0 / 667.0)).abs() < 1e-5);
    let offset = host.presented_offset();
    assert!(!host.release_at(300.0));
    assert_eq!(host.presentation().gesture_phase(), GesturePhase::Dismissing);

    host.settle();
    assert_eq!(host.presented_offset(), offset);
    assert_eq!(host.presentation().gesture_phase(), GesturePhase::Dismissing);
}

#[test]
fn second_pointer_is_ignored() {
    let host = presented_host();
    host.drag_through(&[0.0, 60.0]);

    let intruder = PointerEvent::new(PointerEventKind::Down, Point::new(10.0, 10.0)).with_pointer(999);
    assert!(!host.presentation().handle_pointer_event(&intruder));
    let intruder_move =
        PointerEvent::new(PointerEventKind::Move, Point::new(10.0, 400.0)).with_pointer(999);
    assert!(!host.presentation().handle_pointer_event(&intruder_move));

    assert_eq!(host.presented_offset(), 30.0);
}

#[test]
fn pointer_events_before_presentation_are_ignored() {
    let host = TestHost::new(320.0, 480.0);
    assert!(!host.press());
    assert!(!host.drag_to(300.0));
    assert_eq!(host.dismissals(), 0);
}

#[test]
fn own_recognizer_is_simultaneous_with_others() {
    let host = presented_host();
    let presentation = host.presentation();
    let own = presentation.recognizer_id();
    let other = RecognizerId::next();

    assert!(presentation.should_recognize_simultaneously(own, own));
    assert!(presentation.should_recognize_simultaneously(own, other));
    assert!(!presentation.should_recognize_simultaneously(other, own));
    assert!(!presentation.should_recognize_simultaneously(other, other));
}

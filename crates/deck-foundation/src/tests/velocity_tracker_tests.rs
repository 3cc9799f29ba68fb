use super::*;

#[test]
fn empty_and_single_sample_trackers_report_zero() {
    let mut tracker = VelocityTracker1D::new();
    assert_eq!(tracker.calculate_velocity(), 0.0);
    tracker.add_data_point(0, 100.0);
    assert_eq!(tracker.calculate_velocity(), 0.0);
}

#[test]
fn steady_motion_reports_its_speed() {
    let mut tracker = VelocityTracker1D::new();
    for step in 0..4 {
        tracker.add_data_point(step * 10, step as f32 * 100.0);
    }
    let velocity = tracker.calculate_velocity();
    assert!(
        (velocity - 10_000.0).abs() < 1_000.0,
        "expected ~10000, got {velocity}"
    );
}

#[test]
fn upward_motion_is_negative() {
    let mut tracker = VelocityTracker1D::new();
    tracker.add_data_point(0, 300.0);
    tracker.add_data_point(10, 200.0);
    tracker.add_data_point(20, 100.0);
    assert!(tracker.calculate_velocity() < 0.0);
}

#[test]
fn pause_before_release_discards_old_samples() {
    let mut tracker = VelocityTracker1D::new();
    tracker.add_data_point(0, 0.0);
    tracker.add_data_point(10, 100.0);
    tracker.add_data_point(200, 100.0);
    assert_eq!(tracker.calculate_velocity(), 0.0);
}

#[test]
fn velocity_is_capped() {
    let mut tracker = VelocityTracker1D::new();
    tracker.add_data_point(0, 0.0);
    tracker.add_data_point(1, 1_000.0);
    tracker.add_data_point(2, 2_000.0);
    assert_eq!(tracker.calculate_velocity_with_max(500.0), 500.0);
    assert_eq!(tracker.calculate_velocity_with_max(0.0), 0.0);
}

#[test]
fn two_axis_tracker_reports_each_axis() {
    let mut tracker = VelocityTracker::default();
    for step in 0..4 {
        tracker.add_position(step * 10, Point::new(0.0, step as f32 * 10.0));
    }
    let velocity = tracker.velocity(f32::MAX);
    assert_eq!(velocity.x, 0.0);
    assert!(velocity.y > 500.0);

    tracker.reset();
    assert_eq!(tracker.velocity(f32::MAX), Point::ZERO);
}

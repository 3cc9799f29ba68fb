use super::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const RESIZED: NotificationName = NotificationName("test.resized");
const OTHER: NotificationName = NotificationName("test.other");

#[test]
fn observers_receive_payloads_for_their_name_only() {
    let center = NotificationCenter::<f32>::new();
    let received = Rc::new(RefCell::new(Vec::new()));

    let _subscription = {
        let received = Rc::clone(&received);
        center.subscribe(RESIZED, move |value| received.borrow_mut().push(*value))
    };

    assert_eq!(center.post(RESIZED, &40.0), 1);
    assert_eq!(center.post(OTHER, &99.0), 0);
    assert_eq!(received.borrow().as_slice(), &[40.0]);
}

#[test]
fn dropping_subscription_unregisters_observer() {
    let center = NotificationCenter::<()>::new();
    let hits = Rc::new(Cell::new(0));

    let subscription = {
        let hits = Rc::clone(&hits);
        center.subscribe(RESIZED, move |_| hits.set(hits.get() + 1))
    };
    assert_eq!(center.post(RESIZED, &()), 1);
    drop(subscription);
    assert_eq!(center.post(RESIZED, &()), 0);

    assert_eq!(hits.get(), 1);
}

#[test]
fn observer_may_unsubscribe_itself_while_notified() {
    let center = NotificationCenter::<()>::new();
    let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
    let hits = Rc::new(Cell::new(0));

    let subscription = {
        let slot = Rc::clone(&slot);
        let hits = Rc::clone(&hits);
        center.subscribe(RESIZED, move |_| {
            hits.set(hits.get() + 1);
            slot.borrow_mut().take();
        })
    };
    slot.borrow_mut().replace(subscription);

    center.post(RESIZED, &());
    center.post(RESIZED, &());
    assert_eq!(hits.get(), 1);
}

#[test]
fn subscription_outliving_center_drops_cleanly() {
    let center = NotificationCenter::<()>::new();
    let subscription = center.subscribe(RESIZED, |_| {});
    assert_eq!(subscription.name(), RESIZED);
    drop(center);
    subscription.cancel();
}

#[test]
fn cancel_unregisters_immediately() {
    let center = NotificationCenter::<()>::new();
    let subscription = center.subscribe(RESIZED, |_| {});
    assert_eq!(center.post(RESIZED, &()), 1);

    subscription.cancel();

    assert_eq!(center.post(RESIZED, &()), 0);
}

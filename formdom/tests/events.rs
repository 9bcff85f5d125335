use formdom::event::{BLUR, CLICK, FOCUS};
use formdom::{Document, Element, EventBus, EventName, NodeId};

fn tree() -> (Document, NodeId, NodeId, NodeId) {
    let mut doc = Document::new();
    let root = doc.root();
    let container = doc.mount(root, Element::div()).unwrap();
    let input = doc.mount(container, Element::new("input")).unwrap();
    let other = doc.mount(root, Element::div()).unwrap();
    (doc, container, input, other)
}

fn listeners(matches: Vec<(formdom::SubscriptionId, &'static str)>) -> Vec<&'static str> {
    matches.into_iter().map(|(_, l)| l).collect()
}

#[test]
fn test_unscoped_receives_everything() {
    let (doc, _, input, _) = tree();
    let mut bus = EventBus::new();
    bus.subscribe(FOCUS, None, "global");

    assert_eq!(listeners(bus.matching(&doc, &FOCUS, Some(input))), vec!["global"]);
    assert_eq!(listeners(bus.matching(&doc, &FOCUS, None)), vec!["global"]);
    assert!(bus.matching(&doc, &BLUR, None).is_empty());
}

#[test]
fn test_scope_covers_descendants() {
    let (doc, container, input, other) = tree();
    let mut bus = EventBus::new();
    bus.subscribe(CLICK, Some(container), "container");
    bus.subscribe(CLICK, Some(input), "input");

    assert_eq!(
        listeners(bus.matching(&doc, &CLICK, Some(input))),
        vec!["container", "input"]
    );
    assert_eq!(
        listeners(bus.matching(&doc, &CLICK, Some(container))),
        vec!["container"]
    );
    assert!(bus.matching(&doc, &CLICK, Some(other)).is_empty());
    // A broadcast never reaches scoped subscriptions
    assert!(bus.matching(&doc, &CLICK, None).is_empty());
}

#[test]
fn test_subscription_order_is_preserved() {
    let (doc, _, input, _) = tree();
    let mut bus = EventBus::new();
    bus.subscribe(FOCUS, Some(input), "first");
    bus.subscribe(FOCUS, None, "second");
    bus.subscribe(FOCUS, Some(input), "third");

    assert_eq!(
        listeners(bus.matching(&doc, &FOCUS, Some(input))),
        vec!["first", "second", "third"]
    );
}

#[test]
fn test_unsubscribe_and_clear() {
    let (doc, _, input, _) = tree();
    let mut bus = EventBus::new();
    let first = bus.subscribe(FOCUS, None, "first");
    bus.subscribe(EventName::from("custom:event".to_string()), None, "custom");

    assert!(bus.is_subscribed(first));
    assert!(bus.unsubscribe(first));
    assert!(!bus.unsubscribe(first));
    assert!(!bus.is_subscribed(first));
    assert!(bus.matching(&doc, &FOCUS, Some(input)).is_empty());
    assert_eq!(
        listeners(bus.matching(&doc, &EventName::from("custom:event"), None)),
        vec!["custom"]
    );

    bus.clear();
    assert!(bus.is_empty());
}

#[test]
fn test_removed_scope_stops_matching() {
    let (mut doc, container, input, _) = tree();
    let mut bus = EventBus::new();
    bus.subscribe(FOCUS, Some(container), "container");
    doc.remove(container);
    assert!(bus.matching(&doc, &FOCUS, Some(input)).is_empty());
    assert_eq!(bus.len(), 1);
}

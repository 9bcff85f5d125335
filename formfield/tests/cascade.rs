use std::cell::RefCell;
use std::rc::Rc;

use formdom::event::FOCUS;
use formdom::{Document, Element, EventName, NodeId, Selector};
use formfield::{FIELD_DISABLE, FIELD_ENABLE, FieldEvent, FormHost};

fn field(label: &str, id: &str, value: &str) -> Element {
    Element::div()
        .class("field-container")
        .child(Element::span(label))
        .child(Element::new("input").id(id).value(value))
        .child(Element::button("Clear").class("field-reset"))
}

/// City and street containers, linked when `linked` is set.
fn address_form(linked: bool, city: &str, street: &str) -> FormHost {
    let mut wrapper = Element::div()
        .child(field("City", "city", city))
        .child(field("Street", "street", street));
    if linked {
        wrapper = wrapper.class("linked-fields");
    }
    let mut dom = Document::new();
    let root = dom.root();
    dom.mount(root, Element::form().child(wrapper));
    FormHost::new(dom)
}

fn node(host: &FormHost, id: &str) -> NodeId {
    host.dom().by_id(id).unwrap()
}

fn container_of(host: &FormHost, id: &str) -> NodeId {
    host.dom()
        .closest(node(host, id), &Selector::class("field-container"))
        .unwrap()
}

fn record(host: &mut FormHost, names: &[EventName]) -> Rc<RefCell<Vec<(String, Option<NodeId>)>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    for name in names {
        let sink = Rc::clone(&seen);
        host.add_listener(name.clone(), None, move |event: &FieldEvent| {
            sink.borrow_mut().push((event.name.to_string(), event.target));
        });
    }
    seen
}

#[test]
fn test_link_is_declared_at_bind_time() {
    let mut host = address_form(true, "", "");
    let id = host.register("input", "address").unwrap();
    let registry = host.registry(id).unwrap();

    let city = &registry.bindings()[0];
    let street = &registry.bindings()[1];
    assert_eq!(city.linked_container(), Some(container_of(&host, "street")));
    // The last container of the pair has nothing to drive
    assert_eq!(street.linked_container(), None);
}

#[test]
fn test_value_toggles_linked_container() {
    let mut host = address_form(true, "", "");
    host.register("input", "address").unwrap();
    let events = record(&mut host, &[FIELD_ENABLE, FIELD_DISABLE]);
    let city = node(&host, "city");
    let street_container = container_of(&host, "street");

    host.set_focus(city);
    host.input(city, "Nantes");
    host.input(city, "");

    let events = events.borrow();
    assert_eq!(
        *events,
        vec![
            ("field:enable".to_string(), Some(street_container)),
            ("field:disable".to_string(), Some(street_container)),
        ]
    );
    assert!(host.dom().get(node(&host, "street")).unwrap().disabled);
}

#[test]
fn test_enable_restores_linked_field() {
    let mut host = address_form(true, "", "");
    host.register("input", "address").unwrap();
    let city = node(&host, "city");
    let street = node(&host, "street");

    host.set_focus(city);
    host.input(city, "");
    assert!(host.dom().get(street).unwrap().disabled);

    host.input(city, "Nantes");
    assert!(!host.dom().get(street).unwrap().disabled);
}

#[test]
fn test_no_cascade_without_linked_wrapper() {
    let mut host = address_form(false, "", "kept");
    host.register("input", "address").unwrap();
    let events = record(&mut host, &[FIELD_ENABLE, FIELD_DISABLE]);
    let city = node(&host, "city");

    host.set_focus(city);
    host.input(city, "Nantes");
    host.input(city, "");

    assert!(events.borrow().is_empty());
    let street = host.dom().get(node(&host, "street")).unwrap();
    assert!(!street.disabled);
    assert_eq!(street.value, "kept");
}

#[test]
fn test_reset_disables_filled_linked_field() {
    let mut host = address_form(true, "Nantes", "");
    let id = host.register("input", "address").unwrap();
    let registry = host.registry(id).unwrap();
    let street = node(&host, "street");
    let street_reset = registry.bindings()[1].reset_control().unwrap();
    let city_reset = registry.bindings()[0].reset_control().unwrap();

    host.set_focus(street);
    host.input(street, "Rue de Strasbourg");
    assert!(host.dom().is_visible(street_reset));

    host.click(city_reset);

    let street_node = host.dom().get(street).unwrap();
    assert_eq!(street_node.value, "");
    assert!(street_node.disabled);
    assert!(!host.dom().is_visible(street_reset));
    assert_eq!(host.focus_state().focused(), Some(node(&host, "city")));
}

#[test]
fn test_disable_cascades_down_a_chain() {
    let mut dom = Document::new();
    let root = dom.root();
    dom.mount(
        root,
        Element::form().child(
            Element::div()
                .class("linked-fields")
                .child(field("Country", "country", "France"))
                .child(field("City", "city", "Nantes"))
                .child(field("Street", "street", "Rue de Strasbourg")),
        ),
    );
    let mut host = FormHost::new(dom);
    host.register("input", "address").unwrap();
    let country = node(&host, "country");

    host.set_focus(country);
    host.input(country, "");

    for id in ["city", "street"] {
        let input = host.dom().get(node(&host, id)).unwrap();
        assert!(input.disabled, "{id} should be disabled");
        assert_eq!(input.value, "");
    }
}

#[test]
fn test_cascade_crosses_registries() {
    let mut host = address_form(true, "", "Rue de Strasbourg");
    host.register("#city", "city").unwrap();
    host.register("#street", "street").unwrap();
    let city = node(&host, "city");

    host.set_focus(city);
    host.input(city, "");

    let street = host.dom().get(node(&host, "street")).unwrap();
    assert!(street.disabled);
    assert_eq!(street.value, "");
}

#[test]
fn test_removed_linked_container_is_ignored() {
    let mut host = address_form(true, "", "");
    host.register("input", "address").unwrap();
    let events = record(&mut host, &[FIELD_ENABLE, FIELD_DISABLE]);
    let street_container = container_of(&host, "street");
    host.dom_mut().remove(street_container);
    let city = node(&host, "city");

    host.set_focus(city);
    host.input(city, "Nantes");

    assert!(events.borrow().is_empty());
}

#[test]
fn test_cascade_runs_before_reset_refocuses() {
    let mut host = address_form(true, "Nantes", "Rue de Strasbourg");
    let id = host.register("input", "address").unwrap();
    let city_reset = host.registry(id).unwrap().bindings()[0]
        .reset_control()
        .unwrap();
    let events = record(&mut host, &[FIELD_DISABLE, FOCUS]);

    host.click(city_reset);

    let names: Vec<String> = events.borrow().iter().map(|(n, _)| n.clone()).collect();
    assert_eq!(names, vec!["field:disable", "focus"]);
}

#[test]
fn test_disabled_linked_field_refuses_focus() {
    let mut host = address_form(true, "", "");
    let id = host.register("input", "address").unwrap();
    let registry = host.registry(id).unwrap();
    let street_label = registry.bindings()[1].label().unwrap();
    let street_reset = registry.bindings()[1].reset_control().unwrap();
    let city = node(&host, "city");
    let street = node(&host, "street");

    host.set_focus(city);
    host.input(city, "");
    assert!(host.dom().get(street).unwrap().disabled);

    host.click(street_label);
    host.click(street_reset);
    host.set_focus(street);

    assert_eq!(host.focus_state().focused(), Some(city));
    assert!(!host.dom().has_class(street_label, "field-label--active"));
}

use formdom::{Display, Document, Element, NodeId, Selector};
use formfield::{FieldSource, FormError, FormHost, RegistryId};

const ACTIVE: &str = "field-label--active";

fn field(label: &str, id: &str) -> Element {
    Element::div()
        .class("field-container")
        .child(Element::span(label).class(ACTIVE))
        .child(Element::new("input").id(id))
        .child(Element::button("Clear").class("field-reset"))
}

fn contact_form() -> (FormHost, NodeId) {
    let mut dom = Document::new();
    let root = dom.root();
    let form = dom
        .mount(
            root,
            Element::form()
                .id("contact")
                .child(field("Email *", "email"))
                .child(field("Phone", "phone")),
        )
        .unwrap();
    (FormHost::new(dom), form)
}

fn node(host: &FormHost, id: &str) -> NodeId {
    host.dom().by_id(id).unwrap()
}

fn label_of(host: &FormHost, registry: RegistryId, name: &str) -> NodeId {
    let registry = host.registry(registry).unwrap();
    let handle = registry.handle_by_name(name).unwrap();
    registry.binding(handle).unwrap().label().unwrap()
}

fn reset_of(host: &FormHost, registry: RegistryId, name: &str) -> NodeId {
    let registry = host.registry(registry).unwrap();
    let handle = registry.handle_by_name(name).unwrap();
    registry.binding(handle).unwrap().reset_control().unwrap()
}

// ============================================================================
// Binding
// ============================================================================

#[test]
fn test_register_by_selector_binds_in_document_order() {
    let (mut host, form) = contact_form();
    let id = host.register("input", "contact").unwrap();
    let registry = host.registry(id).unwrap();

    let names: Vec<&str> = registry.bindings().iter().map(|b| b.name()).collect();
    assert_eq!(names, vec!["email", "phone"]);
    assert_eq!(registry.category(), "contact");

    let email = &registry.bindings()[0];
    assert_eq!(email.input(), Some(node(&host, "email")));
    assert!(email.label().is_some());
    assert!(email.reset_control().is_some());
    let container = email.container().unwrap();
    assert!(host.dom().contains(form, container));
    assert_eq!(email.linked_container(), None);
    assert_ne!(registry.bindings()[0].id(), registry.bindings()[1].id());
}

#[test]
fn test_register_explicit_nodes() {
    let (mut host, _) = contact_form();
    let phone = node(&host, "phone");
    let id = host.register(vec![phone], "contact").unwrap();
    let registry = host.registry(id).unwrap();
    assert_eq!(registry.bindings().len(), 1);
    assert_eq!(registry.bindings()[0].name(), "phone");
}

#[test]
fn test_register_without_matches_is_empty() {
    let (mut host, form) = contact_form();
    let id = host.register("textarea", "contact").unwrap();
    assert!(host.registry(id).unwrap().bindings().is_empty());

    // Dispatches into an empty registry are harmless
    host.request_validation(form);
}

#[test]
fn test_register_rejects_bad_selector() {
    let (mut host, _) = contact_form();
    let result = host.register("form input", "contact");
    assert!(matches!(result, Err(FormError::Selector(_))));
}

#[test]
fn test_label_starts_collapsed() {
    let (mut host, _) = contact_form();
    let id = host.register("input", "contact").unwrap();
    let label = label_of(&host, id, "email");
    assert!(!host.dom().has_class(label, ACTIVE));
}

// ============================================================================
// Focus / blur / label
// ============================================================================

#[test]
fn test_focus_raises_label_and_empty_blur_lowers_it() {
    let (mut host, _) = contact_form();
    let id = host.register("input", "contact").unwrap();
    let email = node(&host, "email");
    let label = label_of(&host, id, "email");

    host.set_focus(email);
    assert!(host.dom().has_class(label, ACTIVE));

    host.blur();
    assert!(!host.dom().has_class(label, ACTIVE));
}

#[test]
fn test_blur_with_value_keeps_label_raised() {
    let (mut host, _) = contact_form();
    let id = host.register("input", "contact").unwrap();
    let email = node(&host, "email");
    let label = label_of(&host, id, "email");

    host.set_focus(email);
    host.input(email, "ada@example.com");
    host.blur();
    assert!(host.dom().has_class(label, ACTIVE));
}

#[test]
fn test_moving_focus_blurs_previous_field() {
    let (mut host, _) = contact_form();
    let id = host.register("input", "contact").unwrap();
    let email = node(&host, "email");
    let phone = node(&host, "phone");

    host.set_focus(email);
    host.set_focus(phone);
    assert!(!host.dom().has_class(label_of(&host, id, "email"), ACTIVE));
    assert!(host.dom().has_class(label_of(&host, id, "phone"), ACTIVE));
}

#[test]
fn test_label_click_focuses_input() {
    let (mut host, _) = contact_form();
    let id = host.register("input", "contact").unwrap();
    let email = node(&host, "email");
    let label = label_of(&host, id, "email");

    host.click(label);
    assert_eq!(host.focus_state().focused(), Some(email));
    assert!(host.dom().has_class(label, ACTIVE));
}

// ============================================================================
// Reset control
// ============================================================================

#[test]
fn test_reset_visibility_follows_value() {
    let (mut host, _) = contact_form();
    let id = host.register("input", "contact").unwrap();
    let email = node(&host, "email");
    let reset = reset_of(&host, id, "email");

    host.set_focus(email);
    host.input(email, "a");
    assert_eq!(host.dom().get(reset).unwrap().display, Display::Block);
    assert!(host.dom().is_visible(reset));

    host.input(email, "");
    assert_eq!(host.dom().get(reset).unwrap().display, Display::None);
    assert!(!host.dom().is_visible(reset));
}

#[test]
fn test_input_without_focus_does_not_recompute() {
    let (mut host, _) = contact_form();
    let id = host.register("input", "contact").unwrap();
    let email = node(&host, "email");
    let reset = reset_of(&host, id, "email");

    assert!(host.input(email, "a"));
    assert_eq!(host.dom().get(reset).unwrap().display, Display::Unset);
}

#[test]
fn test_reset_clears_value_and_refocuses() {
    let (mut host, _) = contact_form();
    let id = host.register("input", "contact").unwrap();
    let email = node(&host, "email");
    let reset = reset_of(&host, id, "email");
    let label = label_of(&host, id, "email");

    host.set_focus(email);
    host.input(email, "ada@example.com");
    host.blur();

    host.click(reset);
    assert_eq!(host.dom().value(email), Some(""));
    assert!(!host.dom().is_visible(reset));
    assert_eq!(host.focus_state().focused(), Some(email));
    assert!(host.dom().has_class(label, ACTIVE));
}

// ============================================================================
// Enable / disable
// ============================================================================

#[test]
fn test_disable_then_enable() {
    let (mut host, _) = contact_form();
    let id = host.register("input", "contact").unwrap();
    let registry = host.registry(id).unwrap();
    let handle = registry.handle_by_name("phone").unwrap();
    let phone = node(&host, "phone");
    let label = label_of(&host, id, "phone");
    let reset = reset_of(&host, id, "phone");

    host.set_focus(phone);
    host.input(phone, "0612345678");
    registry.disable(handle, &mut host);

    let input = host.dom().get(phone).unwrap();
    assert!(input.disabled);
    assert_eq!(input.value, "");
    assert!(!host.dom().has_class(label, ACTIVE));
    assert!(!host.dom().is_visible(reset));

    // Disabled controls ignore input
    assert!(!host.input(phone, "x"));

    registry.enable(handle, &mut host);
    let input = host.dom().get(phone).unwrap();
    assert!(!input.disabled);
    assert_eq!(input.value, "");
}

#[test]
fn test_disable_without_label_is_noop() {
    let mut dom = Document::new();
    let root = dom.root();
    dom.mount(
        root,
        Element::div()
            .class("field-container")
            .child(Element::new("input").id("bare").value("kept")),
    );
    let mut host = FormHost::new(dom);
    let id = host.register("#bare", "misc").unwrap();
    let registry = host.registry(id).unwrap();
    let bare = node(&host, "bare");

    registry.disable(registry.handle_by_name("bare").unwrap(), &mut host);
    let input = host.dom().get(bare).unwrap();
    assert!(!input.disabled);
    assert_eq!(input.value, "kept");
}

// ============================================================================
// Absent input
// ============================================================================

#[test]
fn test_operations_on_absent_input_are_noops() {
    let (mut host, form) = contact_form();
    let stale = host
        .dom_mut()
        .mount(form, Element::new("input").id("gone"))
        .unwrap();
    host.dom_mut().remove(stale);

    let id = host
        .register(FieldSource::Nodes(vec![stale]), "contact")
        .unwrap();
    let registry = host.registry(id).unwrap();
    assert_eq!(registry.bindings().len(), 1);
    let binding = &registry.bindings()[0];
    assert_eq!(binding.input(), None);
    assert_eq!(binding.label(), None);
    assert_eq!(binding.container(), None);

    let before = host.dom().descendants(host.dom().root());
    let handle = registry.handles().next().unwrap();
    registry.write(handle, &mut host);
    registry.reset(handle, &mut host);
    registry.enable(handle, &mut host);
    registry.disable(handle, &mut host);
    registry.focus(handle, &mut host);
    registry.blur(handle, &mut host);
    registry.invalid(handle, &mut host);
    registry.show_hide_reset_button(handle, &mut host);
    registry.enable_disable_linked_field(handle, &mut host);
    assert_eq!(registry.check_validity(handle, &mut host), None);
    assert_eq!(host.dom().descendants(host.dom().root()), before);
    assert_eq!(host.focus_state().focused(), None);

    // Only the registry-wide validate subscription exists
    assert_eq!(host.subscription_count(), 1);
    assert!(host.dom().query_selector(form, &Selector::class("field-error")).is_none());
}

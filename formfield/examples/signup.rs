use std::fs::File;

use formfield::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

fn field(label: &str, input: Element) -> Element {
    Element::div()
        .class("field-container")
        .child(Element::span(label))
        .child(input)
        .child(Element::button("Clear").class("field-reset"))
}

fn signup_form() -> Element {
    Element::form()
        .id("signup")
        .child(field(
            "Email *",
            Element::input().id("email").input_type(InputType::Email).required(),
        ))
        .child(field(
            "Postcode",
            Element::input().id("postcode").pattern("[0-9]{5}"),
        ))
        .child(
            Element::div()
                .class("linked-fields")
                .child(field("City", Element::input().id("city")))
                .child(field("Street", Element::input().id("street"))),
        )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up file logging
    let log_file = File::create("signup.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut dom = Document::new();
    let root = dom.root();
    let form = dom
        .mount(root, signup_form())
        .ok_or("document root is missing")?;

    let mut host = FormHost::new(dom);
    host.register("input", "signup")?;

    host.add_listener(FORM_VALIDATION, Some(form), |event: &FieldEvent| {
        if let Detail::Validation(outcome) = &event.detail {
            match serde_json::to_string_pretty(outcome) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("could not serialize outcome: {e}"),
            }
        }
    });

    let node = |host: &FormHost, id: &str| host.dom().by_id(id).ok_or(format!("no #{id}"));

    // First attempt: email missing
    let email = node(&host, "email")?;
    host.set_focus(email);
    host.blur();
    host.request_validation(form);
    print_errors(&host);

    // Second attempt: filled in, street enabled by its city
    host.set_focus(email);
    host.input(email, "ada@example.com");
    let postcode = node(&host, "postcode")?;
    host.set_focus(postcode);
    host.input(postcode, "44000");
    let city = node(&host, "city")?;
    host.set_focus(city);
    host.input(city, "Nantes");
    let street = node(&host, "street")?;
    host.set_focus(street);
    host.input(street, "Rue de Strasbourg");
    host.blur();
    host.request_validation(form);
    print_errors(&host);

    host.teardown();
    Ok(())
}

fn print_errors(host: &FormHost) {
    let dom = host.dom();
    for error in dom.query_selector_all(&Selector::class("field-error")) {
        println!("error: {}", dom.inner_text(error));
    }
}

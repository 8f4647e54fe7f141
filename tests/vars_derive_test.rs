use serde::Serialize;
use utpl::{ToVars, Vars, render, to_vars};

#[derive(Debug, Vars)]
struct Invoice {
    pub number: u32,
    pub customer: String,
    #[var("due")]
    pub due_date: Option<String>,
    #[var(rename = "paid")]
    pub is_paid: bool,
    #[var(ignore)]
    pub internal_note: String,
    pub r#type: &'static str,
}

#[test]
fn test_derive_to_vars() {
    let invoice = Invoice {
        number: 7,
        customer: "ACME".to_string(),
        due_date: None,
        is_paid: false,
        internal_note: "secret".to_string(),
        r#type: "net30",
    };

    let vars = invoice.to_vars();
    assert_eq!(vars.get("number"), Some("7"));
    assert_eq!(vars.get("customer"), Some("ACME"));
    assert_eq!(vars.get("paid"), Some("false"));
    assert_eq!(vars.get("type"), Some("net30"));
    // `None` leaves the variable unset, ignored fields never appear.
    assert!(!vars.contains("due"));
    assert!(!vars.contains("due_date"));
    assert!(!vars.contains("internal_note"));
}

#[test]
fn test_render_derived_vars() {
    let invoice = Invoice {
        number: 12,
        customer: "Initech".to_string(),
        due_date: Some("2026-11-01".to_string()),
        is_paid: true,
        internal_note: String::new(),
        r#type: "prepaid",
    };

    let tpl = "#{{number}} {{customer}}{{#due?}} due {{due}}{{/}}{{#paid=true?}} [paid]{{/}}";
    assert_eq!(
        render(tpl, &invoice.to_vars()).unwrap(),
        "#12 Initech due 2026-11-01 [paid]"
    );
}

#[derive(Serialize)]
struct Author {
    name: String,
    email: Option<String>,
}

#[derive(Serialize)]
struct Post {
    title: String,
    comments: u32,
    author: Author,
}

#[test]
fn test_render_serialized_vars() {
    let post = Post {
        title: "Hello".to_string(),
        comments: 1,
        author: Author {
            name: "Ada".to_string(),
            email: None,
        },
    };

    let vars: Vars = to_vars(&post).unwrap();
    let tpl = "{{title}} by {{author_name}}{{#author_email?}} <{{author_email}}>{{/}}: {{comments}} comment{{comments=1?:s}}";
    assert_eq!(render(tpl, &vars).unwrap(), "Hello by Ada: 1 comment");
}

//! Bean Validation
//!
//! This example demonstrates collecting every fault of a bean before
//! reporting, and presenting the faults in two languages.
//!
//! Key concepts:
//! - Property tables via the introspect! macro
//! - Accumulating checks with Stillwater's Validation
//! - Single faults vs compound faults
//! - Setter vetoes that keep the refused value
//! - Localized messages with locale fallback
//!
//! Run with: cargo run --example bean_validation

use rousseau::core::Value;
use rousseau::fault::{FaultCheck, FaultReport};
use rousseau::i18n::{BundleError, BundleRegistry, Locale, MessageResolver};
use rousseau::{introspect, Fault, FaultAggregate, FaultBuilder, RousseauBean};
use std::sync::Arc;
use stillwater::validation::Validation;

#[derive(Debug, Clone)]
struct Member {
    name: String,
    email: String,
    age: u32,
    tags: Vec<String>,
}

introspect! {
    Member { name, email, age, tags }
    bundles: ["Party"]
}

// Pure checks - one rule each
fn check(member: &Arc<Member>, property: &str, message: &str, ok: bool) -> FaultCheck {
    if ok {
        return Validation::success(());
    }
    match FaultBuilder::for_origin(member)
        .property(property)
        .message(message)
        .build_value()
    {
        Ok(fault) => Validation::fail(fault),
        Err(violation) => panic!("rule names a property Member does not have: {violation}"),
    }
}

impl RousseauBean for Member {
    fn wild_faults(self: &Arc<Self>) -> FaultAggregate {
        let mut faults = FaultAggregate::for_origin(self);
        let checks = vec![
            check(self, "name", "required", !self.name.trim().is_empty()),
            check(self, "email", "malformed", self.email.contains('@')),
            check(self, "age", "too young", self.age >= 18),
        ];
        if let Err(violation) = faults.absorb_all(checks) {
            panic!("member checks produced a foreign fault: {violation}");
        }
        faults
    }

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.tags.sort();
        self.tags.dedup();
    }

    fn has_same_values(&self, other: &Self) -> bool {
        let mut mine = self.tags.clone();
        let mut theirs = other.tags.clone();
        mine.sort();
        mine.dedup();
        theirs.sort();
        theirs.dedup();
        self.name.trim() == other.name.trim()
            && self.email == other.email
            && self.age == other.age
            && mine == theirs
    }
}

fn registry() -> Result<BundleRegistry, BundleError> {
    let mut registry = BundleRegistry::new();
    registry.register_json(
        "Member",
        Locale::root(),
        r#"{
            "type": "member",
            "propertyName.email": "e-mail address",
            "ValueFault.name.required": "A {type} needs a {property}",
            "ValueFault.email": "'{value}' is not a valid {property}",
            "ValueFault.age.too young": "A {type} must be 18 or older, not {value}",
            "SetterFault.age": "Age cannot change from {value} to {vetoed}"
        }"#,
    )?;
    registry.register_json(
        "Member",
        Locale::language("nl"),
        r#"{
            "type": "lid",
            "propertyName.name": "naam",
            "propertyName.email": "e-mailadres",
            "ValueFault.name.required": "Een {type} heeft een {property} nodig",
            "ValueFault.email": "'{value}' is geen geldig {property}"
        }"#,
    )?;
    registry.register_json(
        "rousseau",
        Locale::root(),
        r#"{ "default": "{type}.{property} is invalid" }"#,
    )?;
    Ok(registry)
}

fn print_fault(resolver: &MessageResolver, fault: &Fault, locale: &Locale) {
    for element in fault.faults() {
        println!(
            "  [{}] {}",
            element.property_name().unwrap_or("*"),
            resolver.localized_message(element, locale)
        );
    }
}

fn main() -> Result<(), BundleError> {
    println!("=== Bean Validation Example ===\n");

    let resolver = MessageResolver::builder().strategy(registry()?).build();
    let english = Locale::root();
    let flemish = Locale::parse("nl_BE")?;

    // A civilized member
    let alice = Arc::new(Member {
        name: "Alice".to_string(),
        email: "alice@example.org".to_string(),
        age: 34,
        tags: vec!["board".to_string()],
    });
    println!("Alice is {:?}", alice.civility());

    // One broken rule: thrown as the fault itself
    let bob = Arc::new(Member {
        name: "Bob".to_string(),
        email: "bob.example.org".to_string(),
        age: 40,
        tags: Vec::new(),
    });
    match bob.wild_faults().throw_if_not_empty() {
        Err(fault @ Fault::Property(_)) => {
            println!("\nBob has one fault ({}):", fault.kind_name());
            print_fault(&resolver, &fault, &english);
            print_fault(&resolver, &fault, &flemish);
        }
        other => println!("\nunexpected outcome for Bob: {:?}", other),
    }

    // Every broken rule at once: check_civility always reports a compound
    let wild = Arc::new(Member {
        name: "  ".to_string(),
        email: "nowhere".to_string(),
        age: 12,
        tags: Vec::new(),
    });
    if let Err(compound) = wild.check_civility() {
        println!("\n{}", compound);
        let fault = Fault::from(compound);
        println!("English:");
        print_fault(&resolver, &fault, &english);
        println!("Nederlands (nl_BE falls back to nl, then root):");
        print_fault(&resolver, &fault, &flemish);
    }

    // A setter veto keeps both the current and the refused value
    let veto = FaultBuilder::for_origin(&alice)
        .property("age")
        .message("immutable")
        .build_setter(Some(Value::shared(20u32)));
    match veto {
        Ok(veto) => println!("\nVeto: {}", resolver.localized_message(&veto, &english)),
        Err(violation) => println!("\nveto could not be built: {violation}"),
    }

    // Normalizing changes representation, not value
    let mut messy = (*alice).clone();
    messy.name = "  Alice ".to_string();
    messy.tags = vec!["board".to_string(), "board".to_string()];
    let before = messy.clone();
    messy.normalize();
    println!(
        "\nNormalized {:?} -> {:?}, same values: {}",
        before.name,
        messy.name,
        messy.has_same_values(&before)
    );

    println!("\n=== Example Complete ===");
    Ok(())
}

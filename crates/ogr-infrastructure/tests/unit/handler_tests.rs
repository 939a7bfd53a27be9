//! Type handler tests

use std::sync::Arc;

use ogr_domain::{Error, ServiceKey};
use ogr_infrastructure::di::{FactorySlot, Registration, RegistrationKind, TypeHandler};

struct Mailer;

fn registration(kind: RegistrationKind, description: &str) -> Registration {
    Registration::new(kind, description, |_| Ok(Arc::new(Mailer)))
}

fn key() -> ServiceKey {
    ServiceKey::of::<Mailer>()
}

#[test]
fn test_second_primary_is_rejected_with_both_descriptions() {
    let mut handler = TypeHandler::default();
    handler
        .add(registration(RegistrationKind::Primary, "smtp"))
        .unwrap();

    let error = handler
        .add(registration(RegistrationKind::Primary, "sendmail"))
        .unwrap_err();

    match error {
        Error::DuplicatePrimaryRegistration {
            service,
            existing,
            attempted,
        } => {
            assert_eq!(service, key());
            assert_eq!(existing, "smtp");
            assert_eq!(attempted, "sendmail");
        }
        other => panic!("Expected DuplicatePrimaryRegistration, got {other}"),
    }
    assert_eq!(handler.primary().unwrap().description(), "smtp");
}

#[test]
fn test_decorators_are_prepended() {
    let mut handler = TypeHandler::default();
    handler
        .add(registration(RegistrationKind::Decorator, "first"))
        .unwrap();
    handler
        .add(registration(RegistrationKind::Decorator, "second"))
        .unwrap();

    let order: Vec<&str> = handler
        .decorators()
        .iter()
        .map(Registration::description)
        .collect();
    assert_eq!(order, vec!["second", "first"]);
}

#[test]
fn test_select_walks_decorators_then_primary() {
    let mut handler = TypeHandler::default();
    handler
        .add(registration(RegistrationKind::Primary, "base"))
        .unwrap();
    handler
        .add(registration(RegistrationKind::Decorator, "d1"))
        .unwrap();
    handler
        .add(registration(RegistrationKind::Decorator, "d2"))
        .unwrap();

    let (slot, reg) = handler.select(0).unwrap();
    assert_eq!(slot, FactorySlot::Decorator(0));
    assert_eq!(reg.description(), "d2");

    let (slot, reg) = handler.select(1).unwrap();
    assert_eq!(slot, FactorySlot::Decorator(1));
    assert_eq!(reg.description(), "d1");

    let (slot, reg) = handler.select(2).unwrap();
    assert_eq!(slot, FactorySlot::Primary);
    assert_eq!(reg.description(), "base");

    assert_eq!(handler.select(5).unwrap().0, FactorySlot::Primary);
}

#[test]
fn test_select_without_primary_runs_out() {
    let mut handler = TypeHandler::default();
    handler
        .add(registration(RegistrationKind::Decorator, "only"))
        .unwrap();

    assert!(handler.select(0).is_some());
    assert!(handler.select(1).is_none());
}

#[test]
fn test_has_primary_only() {
    let mut handler = TypeHandler::default();
    handler
        .add(registration(RegistrationKind::Decorator, "d"))
        .unwrap();

    assert!(!handler.has(true));
    assert!(handler.has(false));

    handler
        .add(registration(RegistrationKind::Primary, "p"))
        .unwrap();
    assert!(handler.has(true));
}

#[test]
fn test_describe_lists_in_invocation_order() {
    let mut handler = TypeHandler::default();
    handler
        .add(registration(RegistrationKind::Primary, "base"))
        .unwrap();
    handler
        .add(registration(RegistrationKind::Decorator, "retrying"))
        .unwrap();

    let listing = handler.describe();
    let decorator_at = listing.find("retrying").unwrap();
    let primary_at = listing.find("base").unwrap();
    assert!(decorator_at < primary_at);
    assert!(listing.contains("decorator[0]"));
}

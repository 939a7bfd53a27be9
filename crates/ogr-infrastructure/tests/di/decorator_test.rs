//! Decorator chain ordering, depth handling and contract checking

use std::sync::{Arc, Mutex};

use ogr_domain::{Error, ServiceKey};
use ogr_infrastructure::config::{DecoratorPolicy, ResolverConfig};
use ogr_infrastructure::di::ResolverRegistry;

trait Render: Send + Sync {
    fn render(&self) -> String;
}

struct Base;

impl Render for Base {
    fn render(&self) -> String {
        "P".to_string()
    }
}

struct Wrap {
    name: &'static str,
    inner: Arc<dyn Render>,
}

impl Render for Wrap {
    fn render(&self) -> String {
        format!("{}({})", self.name, self.inner.render())
    }
}

struct Page {
    header: Arc<dyn Render>,
    body: Arc<dyn Render>,
}

fn wrap(registry: &mut ResolverRegistry, name: &'static str) {
    registry
        .decorate_described(name, move |session| {
            let inner = session.resolve::<dyn Render>()?;
            Ok(Arc::new(Wrap { name, inner }) as Arc<dyn Render>)
        })
        .unwrap();
}

fn base(registry: &mut ResolverRegistry) {
    registry
        .register_described("base", |_| Ok(Arc::new(Base) as Arc<dyn Render>))
        .unwrap();
}

#[test]
fn test_last_registered_decorator_is_outermost() {
    let mut registry = ResolverRegistry::new();
    base(&mut registry);
    wrap(&mut registry, "D1");
    wrap(&mut registry, "D2");

    let result = registry.get::<dyn Render>().unwrap();

    assert_eq!(result.instance().render(), "D2(D1(P))");
    assert_eq!(result.factory_invocations(), 3);
}

#[test]
fn test_decorators_may_be_registered_before_primary() {
    let mut registry = ResolverRegistry::new();
    wrap(&mut registry, "D1");
    wrap(&mut registry, "D2");
    base(&mut registry);

    let result = registry.get::<dyn Render>().unwrap();
    assert_eq!(result.instance().render(), "D2(D1(P))");
}

#[test]
fn test_every_layer_is_tracked() {
    let mut registry = ResolverRegistry::new();
    base(&mut registry);
    wrap(&mut registry, "D1");
    wrap(&mut registry, "D2");

    let result = registry.get::<dyn Render>().unwrap();
    let layers: Vec<String> = result
        .tracked()
        .of_type::<dyn Render>()
        .iter()
        .map(|layer| layer.render())
        .collect();

    assert_eq!(layers, vec!["P", "D1(P)", "D2(D1(P))"]);
}

#[test]
fn test_unrelated_resolutions_inside_decorators_do_not_shift_depth() {
    struct Theme(&'static str);

    let mut registry = ResolverRegistry::new();
    base(&mut registry);
    registry
        .register(|_| Ok(Arc::new(Theme("dark"))))
        .unwrap();
    registry
        .decorate(|session| {
            let theme = session.resolve::<Theme>()?;
            // Runs inside "outer", one layer in
            assert_eq!(session.depth_of::<dyn Render>(), 2);
            let inner = session.resolve::<dyn Render>()?;
            let _again = session.resolve::<Theme>()?;
            Ok(Arc::new(Wrap {
                name: theme.0,
                inner,
            }) as Arc<dyn Render>)
        })
        .unwrap();
    wrap(&mut registry, "outer");

    let result = registry.get::<dyn Render>().unwrap();
    assert_eq!(result.instance().render(), "outer(dark(P))");
}

#[test]
fn test_same_type_requests_from_other_factories_do_not_count_against_decorator() {
    struct Audit(Arc<dyn Render>);

    let mut registry = ResolverRegistry::new();
    base(&mut registry);
    registry
        .register(|session| Ok(Arc::new(Audit(session.resolve::<dyn Render>()?))))
        .unwrap();
    registry
        .decorate_described("audited", |session| {
            let inner = session.resolve::<dyn Render>()?;
            let audit = session.resolve::<Audit>()?;
            assert_eq!(audit.0.render(), "P");
            Ok(Arc::new(Wrap {
                name: "audited",
                inner,
            }) as Arc<dyn Render>)
        })
        .unwrap();

    let result = registry.get::<dyn Render>().unwrap();

    assert_eq!(result.instance().render(), "audited(P)");
    // Decorator, its inner primary, Audit, and Audit's own primary
    assert_eq!(result.factory_invocations(), 4);
}

#[test]
fn test_siblings_get_the_cached_outer_instance() {
    let mut registry = ResolverRegistry::new();
    base(&mut registry);
    wrap(&mut registry, "D1");
    registry
        .register(|session| {
            Ok(Arc::new(Page {
                header: session.resolve::<dyn Render>()?,
                body: session.resolve::<dyn Render>()?,
            }))
        })
        .unwrap();

    let result = registry.get::<Page>().unwrap();
    let page = result.instance();

    assert!(Arc::ptr_eq(&page.header, &page.body));
    assert_eq!(page.header.render(), "D1(P)");
    // P, D1(P), Page
    assert_eq!(result.tracked().len(), 3);
}

#[test]
fn test_depth_is_restored_between_roots() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();

    let mut registry = ResolverRegistry::new();
    base(&mut registry);
    registry
        .decorate(move |session| {
            log.lock().unwrap().push(session.depth_of::<dyn Render>());
            let inner = session.resolve::<dyn Render>()?;
            Ok(Arc::new(Wrap { name: "D", inner }) as Arc<dyn Render>)
        })
        .unwrap();

    registry.get::<dyn Render>().unwrap();
    registry.get::<dyn Render>().unwrap();

    // The depth counter has already been bumped when the factory runs
    assert_eq!(*seen.lock().unwrap(), vec![1, 1]);
}

#[test]
fn test_decorator_without_primary_exhausts_chain() {
    let mut registry = ResolverRegistry::new();
    wrap(&mut registry, "lonely");

    let error = registry.get::<dyn Render>().unwrap_err();

    assert!(matches!(error, Error::ResolutionFailure { depth: 0, .. }));
    assert!(matches!(
        error.root_cause(),
        Error::UnresolvedType { service, .. } if *service == ServiceKey::of::<dyn Render>()
    ));
}

#[test]
fn test_strict_policy_rejects_decorator_skipping_inner() {
    let mut registry = ResolverRegistry::new();
    base(&mut registry);
    registry
        .decorate_described("replacer", |_| Ok(Arc::new(Base) as Arc<dyn Render>))
        .unwrap();

    let error = registry.get::<dyn Render>().unwrap_err();

    match error {
        Error::DecoratorContract {
            description,
            depth,
            inner_calls,
            ..
        } => {
            assert_eq!(description, "replacer");
            assert_eq!(depth, 0);
            assert_eq!(inner_calls, 0);
        }
        other => panic!("Expected DecoratorContract, got {other}"),
    }
}

#[test]
fn test_strict_policy_rejects_decorator_calling_inner_twice() {
    let mut registry = ResolverRegistry::new();
    base(&mut registry);
    registry
        .decorate(|session| {
            let first = session.resolve::<dyn Render>()?;
            let _second = session.resolve::<dyn Render>()?;
            Ok(Arc::new(Wrap {
                name: "greedy",
                inner: first,
            }) as Arc<dyn Render>)
        })
        .unwrap();

    let error = registry.get::<dyn Render>().unwrap_err();
    assert!(matches!(error, Error::DecoratorContract { inner_calls: 2, .. }));
}

#[test]
fn test_lenient_policy_keeps_instance() {
    let mut registry = ResolverRegistry::with_config(ResolverConfig {
        decorator_policy: DecoratorPolicy::Lenient,
        ..ResolverConfig::default()
    })
    .unwrap();
    base(&mut registry);
    registry
        .decorate(|_| Ok(Arc::new(Base) as Arc<dyn Render>))
        .unwrap();

    let result = registry.get::<dyn Render>().unwrap();
    assert_eq!(result.instance().render(), "P");
    assert_eq!(result.factory_invocations(), 1);
}

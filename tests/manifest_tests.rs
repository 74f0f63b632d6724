use frontctl::dispatcher::{Body, Request};
use frontctl::manifest::{Registry, RouteManifest};
use frontctl::middleware::{CookieSession, MiddlewareRef, RequireSession};
use frontctl::router::RouteError;
use std::sync::Arc;

mod common;
use common::temp_files::create_temp_manifest;

const YAML: &str = r#"
routes:
  - method: GET
    path: /
    handler: HomeController.index
  - method: GET
    path: /products/{productId}/categories/{categoryId}
    handler: ProductController.categories
  - method: GET
    path: /users/profile
    handler: UserController.profile
    middleware: [must_login]
"#;

const TOML: &str = r#"
[[routes]]
method = "GET"
path = "/"
handler = "HomeController.index"

[[routes]]
method = "GET"
path = "/products/{productId}/categories/{categoryId}"
handler = "ProductController.categories"

[[routes]]
method = "GET"
path = "/users/profile"
handler = "UserController.profile"
middleware = ["must_login"]
"#;

const JSON: &str = r#"{
  "routes": [
    { "method": "GET", "path": "/", "handler": "HomeController.index" },
    { "method": "GET", "path": "/products/{productId}/categories/{categoryId}",
      "handler": "ProductController.categories" },
    { "method": "GET", "path": "/users/profile", "handler": "UserController.profile",
      "middleware": ["must_login"] }
  ]
}"#;

fn registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .handler("HomeController.index", |_: &Request| "home")
        .handler(
            "ProductController.categories",
            |_: &Request, product: u32, category: String| format!("{product}:{category}"),
        )
        .handler("UserController.profile", |_: &Request| "profile")
        .middleware(
            "must_login",
            MiddlewareRef::shared(RequireSession::new(Arc::new(CookieSession::default()))),
        );
    registry
}

#[test]
fn test_all_formats_load_the_same_table() {
    let yaml = create_temp_manifest(YAML, "yaml");
    let toml = create_temp_manifest(TOML, "toml");
    let json = create_temp_manifest(JSON, "json");

    let from_yaml = RouteManifest::from_path(yaml.path()).unwrap();
    let from_toml = RouteManifest::from_path(toml.path()).unwrap();
    let from_json = RouteManifest::from_path(json.path()).unwrap();

    assert_eq!(from_yaml, from_toml);
    assert_eq!(from_yaml, from_json);
    assert_eq!(from_yaml.routes.len(), 3);
    assert_eq!(from_yaml.routes[2].middleware, ["must_login"]);
}

#[test]
fn test_yml_extension_is_yaml() {
    let file = create_temp_manifest(YAML, "yml");
    assert_eq!(RouteManifest::from_path(file.path()).unwrap().routes.len(), 3);
}

#[test]
fn test_built_router_dispatches_in_manifest_order() {
    let manifest = RouteManifest::from_yaml_str(YAML).unwrap();
    let router = registry().build_router(&manifest).unwrap();

    assert_eq!(router.len(), 3);
    let done = router.dispatch("GET", "/products/12/categories/shoes").unwrap();
    assert_eq!(done.route_index(), 1);
    assert_eq!(done.response().body, Body::Text("12:shoes".into()));

    let guarded = router.dispatch("GET", "/users/profile").unwrap();
    assert!(guarded.is_aborted());
}

#[test]
fn test_unknown_handler_fails_the_build() {
    let manifest = RouteManifest::from_yaml_str(
        "routes:\n  - method: GET\n    path: /x\n    handler: Missing.action\n",
    )
    .unwrap();

    match registry().build_router(&manifest) {
        Err(RouteError::UnknownHandler { name, pattern, .. }) => {
            assert_eq!(name, "Missing.action");
            assert_eq!(pattern, "/x");
        }
        other => panic!("expected UnknownHandler, got {other:?}"),
    }
}

#[test]
fn test_unknown_middleware_fails_the_build() {
    let manifest = RouteManifest::from_yaml_str(
        "routes:\n  - method: GET\n    path: /\n    handler: HomeController.index\n    middleware: [must_be_admin]\n",
    )
    .unwrap();

    let err = registry().build_router(&manifest).unwrap_err();
    assert!(matches!(err, RouteError::UnknownMiddleware { ref name, .. } if name == "must_be_admin"));
    assert!(err.to_string().contains("must_be_admin"));
}

#[test]
fn test_malformed_pattern_in_manifest_fails_the_build() {
    let manifest = RouteManifest::from_yaml_str(
        "routes:\n  - method: GET\n    path: /a/{id}{page}\n    handler: HomeController.index\n",
    )
    .unwrap();

    let err = registry().build_router(&manifest).unwrap_err();
    assert!(matches!(err, RouteError::InvalidPattern { .. }));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = RouteManifest::from_path(dir.path().join("nope.yaml")).unwrap_err();
    assert!(err.to_string().contains("failed to read route manifest"));
}

#[test]
fn test_invalid_document_names_the_file() {
    let file = create_temp_manifest("routes: [ {method: GET", "yaml");
    let err = RouteManifest::from_path(file.path()).unwrap_err();
    assert!(err.to_string().contains("failed to parse route manifest"));
}

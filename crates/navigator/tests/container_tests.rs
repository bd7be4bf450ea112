//! Integration tests for the navigation container
//!
//! Covers mounting, apply-once scheduling on route-name changes, and incoming
//! link capture.

use nav_core::{LinkingConfig, LinkingOptions, NavigationState, NestedScreen, RouteRecord};
use navigator::{NavigationContainer, NavigatorError, OpenOutcome, RouteNamesChange};

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn linking() -> LinkingOptions {
    LinkingOptions::new(
        vec!["rn://".into()],
        LinkingConfig::default()
            .screen("Home", "home")
            .screen("Profile", "profile")
            .screen("SignIn", "sign-in"),
    )
}

#[test]
fn test_mount_root_once() {
    let container = NavigationContainer::new(None);
    let root = container.mount_root(names(&["SignIn"])).unwrap();

    assert_eq!(container.root(), Some(root));
    assert_eq!(container.active_route_names(), ["SignIn"]);
    assert_eq!(
        container.mount_root(names(&["Home"])),
        Err(NavigatorError::RootAlreadyMounted)
    );
}

#[test]
fn test_scheduled_state_waits_for_route_names_change() {
    let container = NavigationContainer::new(None);
    let root = container.mount_root(names(&["SignIn"])).unwrap();
    let navigation = container.navigation(root).unwrap();

    let scheduled = NavigationState::single(RouteRecord::new("Profile"));
    navigation
        .set_state_for_next_route_names_change(scheduled)
        .unwrap();

    // Not visible before the topology changes
    assert_eq!(container.active_route_names(), ["SignIn"]);
    assert!(container.pending_state(root).unwrap().is_some());

    // Same names: still nothing
    assert_eq!(
        container.set_route_names(root, names(&["SignIn"])).unwrap(),
        RouteNamesChange::Unchanged
    );
    assert!(container.pending_state(root).unwrap().is_some());

    let change = container
        .set_route_names(root, names(&["Home", "Profile"]))
        .unwrap();
    assert!(matches!(change, RouteNamesChange::Applied(ref s) if s.active_route_name() == "Profile"));
    assert_eq!(container.active_route_names(), ["Profile"]);
    assert!(container.pending_state(root).unwrap().is_none());

    // Applied once only
    container.set_route_names(root, names(&["SignIn"])).unwrap();
    let change = container
        .set_route_names(root, names(&["Home", "Profile"]))
        .unwrap();
    assert!(matches!(change, RouteNamesChange::Reconciled(_)));
    assert_eq!(container.active_route_names(), ["Home"]);
}

#[test]
fn test_later_schedule_replaces_earlier() {
    let container = NavigationContainer::new(None);
    let root = container.mount_root(names(&["SignIn"])).unwrap();
    let navigation = container.navigation(root).unwrap();

    navigation
        .set_state_for_next_route_names_change(NavigationState::single(RouteRecord::new("Home")))
        .unwrap();
    navigation
        .set_state_for_next_route_names_change(NavigationState::single(RouteRecord::new("Profile")))
        .unwrap();

    container
        .set_route_names(root, names(&["Home", "Profile"]))
        .unwrap();
    assert_eq!(container.active_route_names(), ["Profile"]);
}

#[test]
fn test_reconcile_keeps_surviving_routes() {
    let container = NavigationContainer::new(None);
    let root = container.mount_root(names(&["Home", "Profile"])).unwrap();

    let change = container
        .set_route_names(root, names(&["Home", "Profile", "Settings"]))
        .unwrap();
    let RouteNamesChange::Reconciled(state) = change else {
        panic!("expected reconcile, got {:?}", change);
    };
    assert_eq!(state.active_route_name(), "Home");
    assert_eq!(state.route_names(), ["Home", "Profile", "Settings"]);
}

#[test]
fn test_child_mounts_from_nested_state_and_is_pruned() {
    let container = NavigationContainer::new(None);
    let root = container.mount_root(names(&["SignIn"])).unwrap();

    let nested = NavigationState::single(RouteRecord::new("Profile"));
    container
        .navigation(root)
        .unwrap()
        .set_state_for_next_route_names_change(NavigationState::single(
            RouteRecord::new("Home").with_state(nested),
        ))
        .unwrap();
    container.set_route_names(root, names(&["Home"])).unwrap();

    let child = container
        .mount_child(root, "Home", names(&["Details", "Profile"]))
        .unwrap();
    assert_eq!(container.active_route_names(), ["Home", "Profile"]);

    let parent = container.navigation(child).unwrap().get_parent().unwrap();
    assert_eq!(parent.map(|p| p.id()), Some(root));

    // Signing out removes Home and its navigator
    container.set_route_names(root, names(&["SignIn"])).unwrap();
    assert!(matches!(
        container.navigation(child),
        Err(NavigatorError::NotFound(_))
    ));

    // A fresh Home starts from its first screen
    container.set_route_names(root, names(&["Home"])).unwrap();
    container
        .mount_child(root, "Home", names(&["Details", "Profile"]))
        .unwrap();
    assert_eq!(container.active_route_names(), ["Home", "Details"]);
}

#[test]
fn test_mount_child_errors() {
    let container = NavigationContainer::new(None);
    let root = container.mount_root(names(&["Outer"])).unwrap();

    assert!(matches!(
        container.mount_child(root, "Missing", names(&["Home"])),
        Err(NavigatorError::RouteNotFound { .. })
    ));

    container.mount_child(root, "Outer", names(&["Home"])).unwrap();
    assert!(matches!(
        container.mount_child(root, "Outer", names(&["Home"])),
        Err(NavigatorError::ChildAlreadyMounted { .. })
    ));
}

#[test]
fn test_root_state_folds_children() {
    let container = NavigationContainer::new(None);
    let root = container.mount_root(names(&["Outer"])).unwrap();
    let child = container.mount_child(root, "Outer", names(&["Home", "Profile"])).unwrap();

    let state = container.root_state().unwrap();
    let nested = state.first_route().child.state().unwrap();
    assert_eq!(nested.active_route_name(), "Home");

    container.unmount(child).unwrap();
    let state = container.root_state().unwrap();
    assert!(state.first_route().child.is_leaf());
    assert_eq!(container.active_route_names(), ["Outer"]);
}

#[test]
fn test_open_url_without_linking_is_ignored() {
    let container = NavigationContainer::new(None);
    container.mount_root(names(&["Home"])).unwrap();

    assert_eq!(container.open_url("rn://home").unwrap(), OpenOutcome::Ignored);
    assert!(!container.linking().last_unhandled().is_pending());
}

#[test]
fn test_open_url_handles_showable_link() {
    let container = NavigationContainer::new(Some(linking()));
    container.mount_root(names(&["Home", "Profile"])).unwrap();

    let outcome = container.open_url("rn://profile").unwrap();
    assert!(matches!(outcome, OpenOutcome::Handled(ref s) if s.active_route_name() == "Profile"));
    assert_eq!(container.active_route_names(), ["Profile"]);
    assert!(!container.linking().last_unhandled().is_pending());
}

#[test]
fn test_open_url_defers_link_behind_gate() {
    let container = NavigationContainer::new(Some(linking()));
    container.mount_root(names(&["SignIn"])).unwrap();

    assert_eq!(container.open_url("rn://home").unwrap(), OpenOutcome::Deferred);
    assert_eq!(container.open_url("rn://profile").unwrap(), OpenOutcome::Deferred);

    // Last writer wins
    assert_eq!(
        container.linking().last_unhandled().peek().as_deref(),
        Some("rn://profile")
    );
    assert_eq!(container.active_route_names(), ["SignIn"]);
}

#[test]
fn test_open_url_unresolvable() {
    let container = NavigationContainer::new(Some(linking()));
    container.mount_root(names(&["SignIn"])).unwrap();

    assert_eq!(
        container.open_url("other://profile").unwrap(),
        OpenOutcome::Unresolvable
    );
    assert_eq!(
        container.open_url("rn://nowhere").unwrap(),
        OpenOutcome::Unresolvable
    );
    assert!(!container.linking().last_unhandled().is_pending());
}

#[test]
fn test_open_url_before_mount_defers() {
    let options = LinkingOptions::new(
        vec!["rn://".into()],
        LinkingConfig::default().nested("Outer", NestedScreen::new("outer").screen("Home", "home")),
    );
    let container = NavigationContainer::new(Some(options));

    assert_eq!(container.open_url("rn://outer/home").unwrap(), OpenOutcome::Deferred);
    assert!(container.linking().last_unhandled().is_pending());
}

#[test]
fn test_open_url_defers_when_mounted_child_lacks_screen() {
    let options = LinkingOptions::new(
        vec!["rn://".into()],
        LinkingConfig::default().nested(
            "Outer",
            NestedScreen::new("outer")
                .screen("SignIn", "sign-in")
                .screen("Profile", "profile"),
        ),
    );
    let container = NavigationContainer::new(Some(options));
    let root = container.mount_root(names(&["Outer"])).unwrap();
    let outer = container.mount_child(root, "Outer", names(&["SignIn"])).unwrap();

    assert_eq!(
        container.open_url("rn://outer/profile").unwrap(),
        OpenOutcome::Deferred
    );
    assert!(container.navigation(outer).is_ok());

    // Once the child can show it, the link goes through
    container.set_route_names(outer, names(&["SignIn", "Profile"])).unwrap();
    let outcome = container.open_url("rn://outer/profile").unwrap();
    let OpenOutcome::Handled(state) = outcome else {
        panic!("expected the link to be handled, got {:?}", outcome);
    };
    let nested = state.first_route().child.state().unwrap();
    assert_eq!(nested.active_route_name(), "Profile");

    // The child that made the link showable stays mounted and shows it
    assert!(container.navigation(outer).is_ok());
    assert_eq!(container.active_route_names(), ["Outer", "Profile"]);
    assert_eq!(container.state(outer).unwrap().route_names(), ["SignIn", "Profile"]);
    assert!(!container.linking().last_unhandled().is_pending());
}

#[test]
fn test_open_url_keeps_nested_level_for_unmounted_child() {
    let options = LinkingOptions::new(
        vec!["rn://".into()],
        LinkingConfig::default().nested(
            "Outer",
            NestedScreen::new("outer").screen("Home", "home").screen("Profile", "profile"),
        ),
    );
    let container = NavigationContainer::new(Some(options));
    let root = container.mount_root(names(&["Outer"])).unwrap();

    assert!(matches!(
        container.open_url("rn://outer/profile").unwrap(),
        OpenOutcome::Handled(_)
    ));
    container.mount_child(root, "Outer", names(&["Home", "Profile"])).unwrap();
    assert_eq!(container.active_route_names(), ["Outer", "Profile"]);
}

#[test]
fn test_failed_route_change_keeps_scheduled_state() {
    let container = NavigationContainer::new(None);
    let root = container.mount_root(names(&["SignIn"])).unwrap();
    let scheduled = NavigationState::single(RouteRecord::new("Profile"));
    container
        .navigation(root)
        .unwrap()
        .set_state_for_next_route_names_change(scheduled.clone())
        .unwrap();

    assert!(matches!(
        container.set_route_names(root, Vec::new()),
        Err(NavigatorError::InvalidState(_))
    ));
    assert_eq!(container.pending_state(root).unwrap(), Some(scheduled));
    assert_eq!(container.active_route_names(), ["SignIn"]);

    // Still applied on the next real change
    let change = container
        .set_route_names(root, names(&["Home", "Profile"]))
        .unwrap();
    assert!(matches!(change, RouteNamesChange::Applied(_)));
    assert_eq!(container.active_route_names(), ["Profile"]);
}

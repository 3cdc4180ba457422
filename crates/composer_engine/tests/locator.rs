mod common;

use std::time::{Duration, Instant};

use common::{FakeSurface, FieldScript};
use composer_engine::{locate_visible, LocatorSettings, SurfaceError};
use pretty_assertions::assert_eq;

fn fast_poll() -> LocatorSettings {
    LocatorSettings {
        poll_interval: Duration::from_millis(20),
    }
}

#[tokio::test]
async fn finds_a_visible_element_immediately() {
    let surface = FakeSurface::new();
    surface.install("#title", FieldScript::visible());

    let located = locate_visible(&surface, &["#title"], Duration::from_secs(1), &fast_poll())
        .await
        .expect("no driver fault")
        .expect("element should be found");

    assert_eq!(located.selector, "#title");
    located.handle.dispose().await;
    assert_eq!(surface.disposed_count("#title"), 1);
}

#[tokio::test]
async fn prefers_the_first_qualifying_candidate() {
    let surface = FakeSurface::new();
    surface.install("#primary", FieldScript::visible());
    surface.install("#fallback", FieldScript::visible());

    let located = locate_visible(
        &surface,
        &["#primary", "#fallback"],
        Duration::from_secs(1),
        &fast_poll(),
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(located.selector, "#primary");
    assert_eq!(surface.query_count("#fallback"), 0);
    located.handle.dispose().await;
}

#[tokio::test]
async fn falls_through_to_a_later_candidate() {
    let surface = FakeSurface::new();
    surface.install("#fallback", FieldScript::visible());

    let located = locate_visible(
        &surface,
        &["#primary", "#fallback"],
        Duration::from_secs(1),
        &fast_poll(),
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(located.selector, "#fallback");
    located.handle.dispose().await;
}

#[tokio::test]
async fn waits_for_an_element_that_appears_later() {
    let surface = FakeSurface::new();
    surface.install("#slow", FieldScript::visible_after(2));

    let located = locate_visible(&surface, &["#slow"], Duration::from_secs(2), &fast_poll())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(located.selector, "#slow");
    assert_eq!(surface.query_count("#slow"), 3);
    located.handle.dispose().await;
}

#[tokio::test]
async fn zero_box_elements_never_qualify_and_are_disposed() {
    let surface = FakeSurface::new();
    surface.install("#hidden", FieldScript::zero_box());

    let outcome = locate_visible(
        &surface,
        &["#hidden"],
        Duration::from_millis(120),
        &fast_poll(),
    )
    .await
    .unwrap();

    assert!(outcome.is_none());
    let polls = surface.query_count("#hidden");
    assert!(polls > 1);
    // Every inspected handle was released again.
    assert_eq!(surface.disposed_count("#hidden"), polls);
}

#[tokio::test]
async fn timeout_is_not_found_within_one_poll_interval() {
    let surface = FakeSurface::new();
    let timeout = Duration::from_millis(250);
    let interval = Duration::from_millis(50);
    let settings = LocatorSettings {
        poll_interval: interval,
    };

    let started = Instant::now();
    let outcome = locate_visible(&surface, &["#never"], timeout, &settings)
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert!(outcome.is_none());
    assert!(elapsed >= timeout, "returned early after {elapsed:?}");
    assert!(
        elapsed < timeout + interval + Duration::from_millis(400),
        "returned late after {elapsed:?}"
    );
}

#[tokio::test]
async fn zero_timeout_still_scans_once() {
    let surface = FakeSurface::new();
    surface.install("#title", FieldScript::visible());

    let located = locate_visible(&surface, &["#title"], Duration::ZERO, &fast_poll())
        .await
        .unwrap();

    assert!(located.is_some());
}

#[tokio::test]
async fn detached_bounds_read_counts_as_not_yet_visible() {
    let surface = FakeSurface::new();
    surface.install(
        "#flaky",
        FieldScript {
            detached_bounds_first: 1,
            ..FieldScript::default()
        },
    );

    let located = locate_visible(&surface, &["#flaky"], Duration::from_secs(2), &fast_poll())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(located.selector, "#flaky");
    // The first handle hit the detached race and was released.
    assert_eq!(surface.disposed_count("#flaky"), 1);
    located.handle.dispose().await;
}

#[tokio::test]
async fn driver_fault_from_query_propagates() {
    let surface = FakeSurface::new();
    surface.fail_queries("page crashed");

    let err = locate_visible(&surface, &["#title"], Duration::from_secs(1), &fast_poll())
        .await
        .unwrap_err();

    assert_eq!(err, SurfaceError::Driver("page crashed".to_string()));
}

#[tokio::test]
async fn driver_fault_from_bounds_propagates_and_disposes() {
    let surface = FakeSurface::new();
    surface.install(
        "#title",
        FieldScript {
            bounds_fault: true,
            ..FieldScript::default()
        },
    );

    let err = locate_visible(&surface, &["#title"], Duration::from_secs(1), &fast_poll())
        .await
        .unwrap_err();

    assert!(matches!(err, SurfaceError::Driver(_)));
    assert_eq!(surface.disposed_count("#title"), 1);
}

//! Integration tests for the connector registry over the headless scene host.

use std::time::Duration;

use float_cmp::assert_approx_eq;

use tether::{
    ConnectOptions, ConnectorState, Connectors, TetherError,
    anchor::Attachment,
    config::AppConfig,
    geometry::{Bounds, Point, Size},
    host::Host,
    scene::{ElementId, SceneHost},
};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Two 10x10 boxes, `upper` at the origin and `lower` 50 units below it.
fn stacked_scene() -> (SceneHost, ElementId, ElementId) {
    let mut host = SceneHost::new(Size::new(200.0, 200.0));
    let upper = host.add_element("upper", Bounds::from_rect(0.0, 0.0, 10.0, 10.0));
    let lower = host.add_element("lower", Bounds::from_rect(50.0, 0.0, 10.0, 10.0));
    (host, upper, lower)
}

fn vertical_options() -> ConnectOptions {
    ConnectOptions::new(Attachment::BOTTOM_MIDDLE, Attachment::TOP_MIDDLE)
}

#[test]
fn test_connect_renders_once_synchronously() {
    let (host, upper, lower) = stacked_scene();
    let mut connectors = Connectors::new(host);

    let id = connectors.connect(upper, lower, vertical_options()).unwrap();
    let connector = connectors.get(id).unwrap();
    let overlay = *connector.overlay();

    assert_eq!(connector.state(), ConnectorState::Attached);
    assert!(connectors.host().contains_overlay(&overlay));
    assert_eq!(connectors.host_mut().take_journal(), vec![overlay]);

    let frame = connectors
        .host()
        .overlay(overlay)
        .and_then(|node| node.frame())
        .cloned()
        .unwrap();
    assert_eq!(frame.origin(), Point::new(5.0, 10.0));
    assert_approx_eq!(f32, frame.viewport().width(), 2.0);
    assert_approx_eq!(f32, frame.viewport().height(), 40.0);
    assert_eq!(frame.end(), Point::new(0.0, 40.0));
    assert_eq!(frame.z_index(), 10);
}

#[test]
fn test_geometry_of_vertical_connector() {
    let (host, upper, lower) = stacked_scene();
    let mut connectors = Connectors::new(host);
    let id = connectors.connect(upper, lower, vertical_options()).unwrap();

    let line = connectors.geometry(id).unwrap();
    assert_eq!(line.from(), Point::new(5.0, 10.0));
    assert_eq!(line.to(), Point::new(5.0, 50.0));
    assert_approx_eq!(f32, line.width(), 0.0);
    assert_approx_eq!(f32, line.height(), 40.0);
}

#[test]
fn test_unknown_position_names_fall_back_to_top_left() {
    let (host, upper, lower) = stacked_scene();
    let mut connectors = Connectors::new(host);

    let lenient = connectors
        .connect(
            upper.clone(),
            lower.clone(),
            ConnectOptions::from_names("center-center", "center-center"),
        )
        .unwrap();
    let explicit = connectors
        .connect(
            upper,
            lower,
            ConnectOptions::new(Attachment::TOP_LEFT, Attachment::TOP_LEFT),
        )
        .unwrap();

    assert_eq!(
        connectors.geometry(lenient).unwrap(),
        connectors.geometry(explicit).unwrap()
    );
}

#[test]
fn test_update_is_idempotent() {
    let (host, upper, lower) = stacked_scene();
    let mut connectors = Connectors::new(host);
    let id = connectors.connect(upper, lower, vertical_options()).unwrap();
    let overlay = *connectors.get(id).unwrap().overlay();

    let before = connectors.host().overlay(overlay).unwrap().frame().cloned();
    connectors.update(id).unwrap();
    connectors.update(id).unwrap();
    let after = connectors.host().overlay(overlay).unwrap().frame().cloned();

    assert_eq!(before, after);
}

#[test]
fn test_update_follows_moved_elements() {
    let (host, upper, lower) = stacked_scene();
    let mut connectors = Connectors::new(host);
    let id = connectors
        .connect(upper, lower.clone(), vertical_options())
        .unwrap();

    connectors
        .host_mut()
        .move_element(&lower, Bounds::from_rect(50.0, 40.0, 10.0, 10.0))
        .unwrap();
    connectors.update(id).unwrap();

    let line = connectors.geometry(id).unwrap();
    assert_eq!(line.to(), Point::new(45.0, 50.0));
    assert_approx_eq!(f32, line.width(), 40.0);
}

#[test]
fn test_destroy_removes_artifact_and_keeps_registration() {
    let (host, upper, lower) = stacked_scene();
    let mut connectors = Connectors::new(host);
    let id = connectors.connect(upper, lower, vertical_options()).unwrap();
    let overlay = *connectors.get(id).unwrap().overlay();

    connectors.destroy(id).unwrap();

    assert!(!connectors.host().contains_overlay(&overlay));
    assert_eq!(connectors.host().attached_overlay_count(), 0);
    assert!(!connectors.host().render_svg().contains("<line"));
    assert_eq!(connectors.len(), 1);
    assert!(connectors.get(id).unwrap().is_destroyed());

    // Updating and destroying again must not fail
    connectors.update(id).unwrap();
    connectors.destroy(id).unwrap();
    assert!(!connectors.host().contains_overlay(&overlay));
}

#[test]
fn test_resize_settle_updates_all_in_creation_order() {
    let (mut host, upper, lower) = stacked_scene();
    let side = host.add_element("side", Bounds::from_rect(0.0, 100.0, 10.0, 10.0));
    let mut connectors = Connectors::new(host);

    let ids = [
        connectors
            .connect(upper.clone(), lower.clone(), vertical_options())
            .unwrap(),
        connectors
            .connect(
                side.clone(),
                upper,
                ConnectOptions::from_names("middle-left", "middle-right"),
            )
            .unwrap(),
        connectors
            .connect(lower, side, ConnectOptions::from_names("top-right", "bottom-left"))
            .unwrap(),
    ];
    let expected: Vec<_> = ids
        .iter()
        .map(|id| *connectors.get(*id).unwrap().overlay())
        .collect();
    connectors.host_mut().take_journal();

    connectors.notify_resize(ms(0));
    connectors.notify_resize(ms(1));
    connectors.notify_resize(ms(2));
    assert!(connectors.resize_pending());

    assert_eq!(connectors.poll(ms(2)).unwrap(), None);
    assert_eq!(connectors.poll(ms(3)).unwrap(), Some(3));
    assert_eq!(connectors.poll(ms(50)).unwrap(), None);

    assert_eq!(connectors.host_mut().take_journal(), expected);
}

#[test]
fn test_resize_pass_includes_destroyed_connectors() {
    let (host, upper, lower) = stacked_scene();
    let mut connectors = Connectors::new(host);
    let first = connectors
        .connect(upper.clone(), lower.clone(), vertical_options())
        .unwrap();
    connectors.connect(lower, upper, vertical_options()).unwrap();

    connectors.destroy(first).unwrap();
    assert_eq!(connectors.update_all().unwrap(), 2);
    assert_eq!(connectors.host().attached_overlay_count(), 1);
}

#[test]
fn test_failing_connector_does_not_block_resize_pass() {
    let (mut host, upper, lower) = stacked_scene();
    let side = host.add_element("side", Bounds::from_rect(50.0, 100.0, 10.0, 10.0));
    let mut connectors = Connectors::new(host);

    connectors
        .connect(upper.clone(), lower.clone(), vertical_options())
        .unwrap();
    let healthy = connectors
        .connect(lower, side.clone(), ConnectOptions::from_names("middle-right", "middle-left"))
        .unwrap();
    let healthy_overlay = *connectors.get(healthy).unwrap().overlay();

    connectors.host_mut().remove_element(&upper);
    connectors
        .host_mut()
        .move_element(&side, Bounds::from_rect(50.0, 60.0, 10.0, 10.0))
        .unwrap();
    connectors.host_mut().take_journal();

    connectors.notify_resize(ms(0));
    let result = connectors.poll(ms(5));

    assert!(matches!(result, Err(TetherError::UnknownElement(name)) if name == "upper"));
    assert!(!connectors.resize_pending());
    assert_eq!(connectors.host_mut().take_journal(), vec![healthy_overlay]);

    let frame = connectors
        .host()
        .overlay(healthy_overlay)
        .and_then(|node| node.frame())
        .cloned()
        .unwrap();
    assert_eq!(frame.origin(), Point::new(10.0, 55.0));
    assert_approx_eq!(f32, frame.end().x(), 50.0);

    // Later passes keep redrawing the healthy connector
    connectors
        .host_mut()
        .move_element(&side, Bounds::from_rect(50.0, 80.0, 10.0, 10.0))
        .unwrap();
    connectors.notify_resize(ms(10));
    assert!(connectors.poll(ms(20)).is_err());
    assert_eq!(connectors.geometry(healthy).unwrap().to(), Point::new(80.0, 55.0));
    assert_eq!(connectors.host_mut().take_journal(), vec![healthy_overlay]);
}

#[test]
fn test_remove_and_prune() {
    let (host, upper, lower) = stacked_scene();
    let mut connectors = Connectors::new(host);
    let a = connectors
        .connect(upper.clone(), lower.clone(), vertical_options())
        .unwrap();
    let b = connectors
        .connect(upper.clone(), lower.clone(), vertical_options())
        .unwrap();
    let c = connectors.connect(upper, lower, vertical_options()).unwrap();

    connectors.remove(a).unwrap();
    assert_eq!(connectors.len(), 2);
    assert_eq!(connectors.host().attached_overlay_count(), 2);

    connectors.destroy(b).unwrap();
    assert_eq!(connectors.prune_destroyed(), 1);

    let remaining: Vec<_> = connectors.iter().map(|connector| connector.id()).collect();
    assert_eq!(remaining, vec![c]);
    assert!(matches!(
        connectors.update(a),
        Err(TetherError::UnknownConnector(id)) if id == a
    ));
}

#[test]
fn test_connect_to_missing_element_registers_nothing() {
    let (host, upper, _) = stacked_scene();
    let mut connectors = Connectors::new(host);

    let result = connectors.connect(upper, ElementId::from("missing"), vertical_options());

    assert!(matches!(result, Err(TetherError::UnknownElement(name)) if name == "missing"));
    assert!(connectors.is_empty());
    assert_eq!(connectors.host().attached_overlay_count(), 0);
}

#[test]
fn test_configured_default_stroke_and_delay() {
    let config: AppConfig = toml::from_str(
        r#"
        [overlay]
        z_index = 3

        [resize]
        debounce_ms = 100

        [style]
        stroke_color = "red"
        stroke_width = 2.0
        "#,
    )
    .unwrap();

    let (host, upper, lower) = stacked_scene();
    let mut connectors = Connectors::with_config(host, &config).unwrap();
    let id = connectors.connect(upper, lower, vertical_options()).unwrap();

    let stroke = connectors.get(id).unwrap().options().stroke().cloned().unwrap();
    assert_eq!(stroke.color().to_string(), "red");
    assert_eq!(stroke.width(), 2.0);

    let svg = connectors.host().render_svg();
    assert!(svg.contains("stroke=\"red\""));

    connectors.notify_resize(ms(0));
    assert_eq!(connectors.poll(ms(99)).unwrap(), None);
    assert_eq!(connectors.poll(ms(100)).unwrap(), Some(1));
}

#[test]
fn test_invalid_configured_stroke_is_rejected() {
    let config: AppConfig = toml::from_str(
        r#"
        [style]
        stroke_color = "nope"
        "#,
    )
    .unwrap();

    let (host, _, _) = stacked_scene();
    let result = Connectors::with_config(host, &config);
    assert!(matches!(result, Err(TetherError::Config(_))));
}

#[test]
fn test_strict_option_parsing() {
    let options = ConnectOptions::parse("bottom-middle", "top-middle").unwrap();
    assert_eq!(options, vertical_options());

    let err = ConnectOptions::parse("bottom-middle", "center-center").unwrap_err();
    assert!(matches!(err, TetherError::Attachment(_)));
    assert!(err.to_string().contains("center-center"));
}

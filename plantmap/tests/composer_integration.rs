//! Integration tests for scene composition.
//!
//! Covers the full flow: boundaries arriving independently, record
//! filtering, the density surface lifecycle and location selection.
//!
//! Run with: `cargo test --test composer_integration`

mod common;

use serde_json::json;

use common::{districts, error_payload, villages, GatedSource};
use plantmap::composer::{ComposerOptions, LayerComposer, LayerKind, MapContext};
use plantmap::interaction::{FeatureHit, GestureId, LocationForm};
use plantmap::model::{decode_records, FilterState, LatLng, LayerToggle, Tier};

const RECORDS: &str = r#"[
    {"id": 1, "tree_name": "Pradu", "quantity": 5, "lat": "6.6238", "lng": "99.9500",
     "district_name": "Mueang Satun", "tambon_name": "Phiman", "village_name": "Ban X",
     "planter_name": "Somchai", "image_paths": "[\"/uploads/a.jpg\"]",
     "created_at": "2025-01-15 08:30:00"},
    {"id": 2, "tree_name": "Yang", "quantity": 3, "lat": 6.8712, "lng": 99.7321,
     "district_name": "La-ngu", "tambon_name": "Kamphaeng",
     "planter_name": "Malee"},
    {"id": 3, "tree_name": "Pradu", "quantity": 0, "lat": 6.61, "lng": 99.97,
     "district_name": "Mueang Satun", "tambon_name": "Khlong Khut",
     "planter_name": "Somchai"},
    {"id": 4, "tree_name": "Takhian", "quantity": 2, "lat": 6.65, "lng": 99.90}
]"#;

fn composer(source: GatedSource) -> LayerComposer<GatedSource> {
    LayerComposer::new(source, MapContext::default(), ComposerOptions::default()).0
}

#[tokio::test]
async fn test_partial_boundaries_render_while_others_pending() {
    let source = GatedSource::new();
    let districts_gate = source.gate(Tier::District);
    let tambons_gate = source.gate(Tier::Tambon);
    let villages_gate = source.gate(Tier::Village);
    let composer = composer(source);
    let mut revisions = composer.boundaries().subscribe();

    let (report, ()) = tokio::join!(composer.load_boundaries(), async {
        assert_eq!(composer.scene().kinds(), vec![LayerKind::Base]);

        districts_gate.send(districts()).unwrap();
        revisions.changed().await.unwrap();
        assert_eq!(
            composer.scene().kinds(),
            vec![LayerKind::Base, LayerKind::Boundary(Tier::District)]
        );

        tambons_gate.send(error_payload("query failed")).unwrap();
        revisions.changed().await.unwrap();
        villages_gate.send(villages(&["Ban X"])).unwrap();
    });

    assert_eq!(report.failed().len(), 1);
    assert_eq!(
        composer.scene().boundary_tiers(),
        vec![Tier::District, Tier::Village]
    );
}

#[tokio::test]
async fn test_full_composition() {
    let source = GatedSource::new();
    source.gate(Tier::District).send(districts()).unwrap();
    source
        .gate(Tier::Tambon)
        .send(common::collection(vec![
            json!({ "name": "Phiman", "districtName": "Mueang Satun" }),
            json!({ "name": "Khlong Khut", "districtName": "Mueang Satun" }),
            json!({ "name": "Kamphaeng", "districtName": "La-ngu" }),
        ]))
        .unwrap();
    source.gate(Tier::Village).send(villages(&["Ban X"])).unwrap();

    let mut composer = composer(source);
    composer.load_boundaries().await;
    composer.set_records(decode_records(RECORDS.as_bytes()).unwrap());
    composer.attach();

    // Focusing a district centres the view on its bounding box
    assert!(composer.focus_region(Tier::District, "Mueang Satun"));
    let center = composer.context().center();
    assert!((center.lat - 6.6).abs() < 1e-9);
    assert!((center.lng - 99.95).abs() < 1e-9);
    assert!(!composer.focus_region(Tier::District, "Nowhere"));

    // Everything visible, heatmap off by default
    let scene = composer.scene();
    assert_eq!(
        scene.kinds(),
        vec![
            LayerKind::Base,
            LayerKind::Boundary(Tier::District),
            LayerKind::Boundary(Tier::Tambon),
            LayerKind::Boundary(Tier::Village),
            LayerKind::Markers,
        ]
    );
    assert_eq!(scene.markers().len(), 4);

    // Heatmap sits between boundaries and markers
    composer.toggle(LayerToggle::Heatmap);
    let kinds = composer.scene().kinds();
    let density = kinds.iter().position(|k| *k == LayerKind::Density).unwrap();
    let markers = kinds.iter().position(|k| *k == LayerKind::Markers).unwrap();
    assert_eq!(density + 1, markers);
    assert_eq!(composer.density().unwrap().total_weight(), 5 + 3 + 1 + 2);

    // Hiding tambons removes only that layer
    composer.toggle(LayerToggle::Boundary(Tier::Tambon));
    assert_eq!(
        composer.scene().boundary_tiers(),
        vec![Tier::District, Tier::Village]
    );

    // Location filter with cascading tambon options
    assert_eq!(composer.district_options(), vec!["La-ngu", "Mueang Satun"]);
    composer.update_filter(|f| f.select_district(Some("Mueang Satun".to_string())));
    assert_eq!(composer.tambon_options(), vec!["Khlong Khut", "Phiman"]);
    let ids: Vec<String> = composer.filtered_records().iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert_eq!(composer.density().unwrap().total_weight(), 6);

    composer.update_filter(|f| f.select_tambon(Some("Phiman".to_string())));
    assert_eq!(composer.scene().markers().len(), 1);

    // Changing district resets the tambon
    composer.update_filter(|f| f.select_district(Some("La-ngu".to_string())));
    assert!(composer.filter().selected_tambon.is_none());
    assert_eq!(composer.scene().markers()[0].record_id, "2");

    // Species stats follow the filter
    composer.set_filter(FilterState::new());
    let stats = composer.species_stats();
    assert_eq!(stats[0].name, "Pradu");
    assert_eq!(stats[0].quantity, 6);
    assert_eq!(composer.summary().unique_planters, 2);

    // Heatmap off tears the surface down
    composer.toggle(LayerToggle::Heatmap);
    assert!(composer.density().is_none());
}

#[tokio::test]
async fn test_selection_flow_fills_form() {
    let source = GatedSource::new();
    let (mut composer, mut events) =
        LayerComposer::new(source, MapContext::default(), ComposerOptions::default());
    composer.attach();
    composer.router_mut().start_selection().unwrap();
    let preview = composer
        .router_mut()
        .attach_preview("seedling.jpg", vec![0xFF, 0xD8])
        .unwrap();
    assert_eq!(composer.router().previews().name(preview), Some("seedling.jpg"));

    let position = LatLng::new(6.6238, 99.95);
    let hit = |tier, props: serde_json::Value| match props {
        serde_json::Value::Object(map) => FeatureHit::new(tier, map),
        _ => unreachable!(),
    };

    // Clicking a village fills all three names and no position
    composer.handle_gesture(
        GestureId(1),
        position,
        vec![
            hit(Tier::District, json!({ "name": "D1" })),
            hit(
                Tier::Village,
                json!({ "name": "Ban X", "tambonName": "T1", "districtName": "D1" }),
            ),
        ],
    );
    // Then a bare map click picks the position
    composer.handle_gesture(GestureId(2), position, Vec::new());

    let mut form = LocationForm::new();
    form.set_village("Typed village");
    while let Ok(event) = events.try_recv() {
        form.apply(&event);
    }
    assert_eq!(form.district_name, "D1");
    assert_eq!(form.tambon_name, "T1");
    assert_eq!(form.village_name, "Typed village");
    assert_eq!(form.position, Some(position));

    composer.router_mut().commit_selection().unwrap();
    assert!(composer.router().previews().is_empty());

    // Idle again: clicks are ignored
    composer.handle_gesture(GestureId(3), position, Vec::new());
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_unmount_mid_selection_releases_resources() {
    let (mut composer, mut events) = LayerComposer::new(
        GatedSource::new(),
        MapContext::default(),
        ComposerOptions::default(),
    );
    composer.attach();
    composer.set_records(decode_records(RECORDS.as_bytes()).unwrap());
    composer.set_visible(LayerToggle::Heatmap, true);
    composer.router_mut().start_selection().unwrap();
    composer.router_mut().attach_preview("a.jpg", vec![1]).unwrap();
    composer.router_mut().attach_preview("b.jpg", vec![2]).unwrap();

    composer.unmount();

    assert!(composer.router().previews().is_empty());
    assert!(composer.density().is_none());
    composer.handle_gesture(GestureId(1), LatLng::new(6.6, 100.0), Vec::new());
    assert!(events.try_recv().is_err());
}

// Construction, callbacks, frame loops and destruction on the headless host.

use cube_panorama::headless::HeadlessHost;
use cube_panorama::host::WRAPPER_CLASS;
use cube_panorama::{
    Argument, Container, ContainerId, CreateCallback, EventKind, Host, PanoramaError,
    PanoramaId, Panoramas, Side, Target,
};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;

fn museum() -> Value {
    json!({
        "panoramaCode": "museum",
        "imgPathMask": "/p/#PANORAMA_CODE#/#SIDE#.jpg",
    })
}

fn page() -> (Panoramas<HeadlessHost>, ContainerId) {
    let mut host = HeadlessHost::new();
    let id = host.add_element(&["#pano", ".viewer"], 200, 200);
    (Panoramas::new(host), id)
}

type Outcome = Rc<RefCell<Vec<Result<PanoramaId, PanoramaError>>>>;

fn recording_callback(outcome: &Outcome) -> CreateCallback<HeadlessHost> {
    let outcome = outcome.clone();
    Box::new(move |_panoramas: &mut Panoramas<HeadlessHost>, result| {
        outcome.borrow_mut().push(result)
    })
}

#[test]
fn example_scenario_builds_six_faces() {
    let (mut panoramas, container) = page();

    let id = panoramas
        .create("#pano", &museum(), None)
        .unwrap()
        .expect("created");

    let widget = panoramas.get(&id).unwrap();
    assert_eq!(widget.container(), container);
    assert_eq!(
        widget.texture_paths(),
        vec![
            "/p/museum/right.jpg",
            "/p/museum/left.jpg",
            "/p/museum/top.jpg",
            "/p/museum/bottom.jpg",
            "/p/museum/back.jpg",
            "/p/museum/front.jpg",
        ]
    );
    assert!(widget.textures().iter().all(|t| !t.is_loaded()));

    // one frame was drawn during construction
    assert_eq!(widget.renderer().frames, 1);
    assert_eq!(widget.renderer().uploads, 6);
    assert_eq!(widget.renderer().size, (200, 200));
    assert!((widget.orientation().longitude() - 90.1).abs() < 1e-9);
    assert_eq!(widget.orientation().latitude(), 0.0);
    assert_eq!(widget.camera().fov, 75.0);
    assert_eq!(widget.camera().aspect, 1.0);

    assert_eq!(panoramas.host().occupant(container), Some(id.clone()));
    assert_eq!(panoramas.host().children(container), [WRAPPER_CLASS]);
}

#[test]
fn container_forms_resolve_to_same_element() {
    for container in [
        Container::from(".viewer"),
        Container::Element(ContainerId(0)),
        Container::Handle(vec![ContainerId(0)]),
    ] {
        let (mut panoramas, element) = page();
        let id = panoramas.create(container, &museum(), None).unwrap().unwrap();
        assert_eq!(panoramas.get(&id).unwrap().container(), element);
    }
}

#[test]
fn handlers_are_bound_under_the_id() {
    let (mut panoramas, container) = page();
    let id = panoramas.create("#pano", &museum(), None).unwrap().unwrap();

    let bindings = panoramas.host().bindings();
    assert_eq!(bindings.count(&id), 8);
    assert_eq!(bindings.matching(Target::Window, EventKind::Resize).len(), 1);
    for kind in EventKind::CONTAINER {
        let bound = bindings.matching(Target::Container(container), kind);
        assert_eq!(bound.len(), 1);
        assert_eq!(bound[0].namespace, id);
    }
}

#[test]
fn validation_errors_are_returned_without_callback() {
    let (mut panoramas, _) = page();

    assert_eq!(
        panoramas.create("#pano", &json!([1, 2, 3]), None),
        Err(PanoramaError::IncorrectArgument)
    );
    assert_eq!(
        panoramas.create("#pano", &json!({ "panoramaCode": "museum" }), None),
        Err(PanoramaError::RequiredParameter)
    );
    assert_eq!(
        panoramas.create(
            "#pano",
            &json!({ "sideTextures": { "right": "r", "left": "l" } }),
            None
        ),
        Err(PanoramaError::RequiredSideTexture(Side::Top))
    );
    assert_eq!(
        panoramas.create("#missing", &museum(), None),
        Err(PanoramaError::NoContainer)
    );
    assert_eq!(
        panoramas.create(Container::Handle(vec![]), &museum(), None),
        Err(PanoramaError::NoContainer)
    );
    assert!(panoramas.is_empty());
    assert!(panoramas.host().bindings().is_empty());
}

#[test]
fn zero_sized_container_is_rejected() {
    let mut host = HeadlessHost::new();
    let flat = host.add_element(&["#flat"], 300, 0);
    let thin = host.add_element(&["#thin"], 0, 300);
    let mut panoramas = Panoramas::new(host);

    for selector in ["#flat", "#thin"] {
        assert_eq!(
            panoramas.create(selector, &museum(), None),
            Err(PanoramaError::ContainerZeroSize)
        );
    }
    assert_eq!(panoramas.host().occupant(flat), None);
    assert_eq!(panoramas.host().occupant(thin), None);
}

#[test]
fn one_panorama_per_container() {
    let (mut panoramas, container) = page();
    let first = panoramas.create("#pano", &museum(), None).unwrap().unwrap();

    assert_eq!(
        panoramas.create("#pano", &museum(), None),
        Err(PanoramaError::SinglePanoramaPerContainer)
    );
    // the second config is irrelevant once the container is taken
    assert_eq!(
        panoramas.create(
            ".viewer",
            &json!({ "sideTextures": {
                "right": "r", "left": "l", "top": "t",
                "bottom": "b", "back": "k", "front": "f"
            } }),
            None
        ),
        Err(PanoramaError::SinglePanoramaPerContainer)
    );

    assert_eq!(panoramas.len(), 1);
    assert_eq!(panoramas.host().occupant(container), Some(first));
}

#[test]
fn success_callback_runs_on_next_tick() {
    let (mut panoramas, _) = page();
    let outcome: Outcome = Rc::default();

    let id = panoramas
        .create("#pano", &museum(), Some(recording_callback(&outcome)))
        .unwrap()
        .unwrap();
    assert!(outcome.borrow().is_empty());

    assert_eq!(panoramas.run_deferred(), 1);
    assert_eq!(*outcome.borrow(), vec![Ok(id)]);
    assert_eq!(panoramas.run_deferred(), 0);
}

#[test]
fn errors_go_to_callback_when_given() {
    let (mut panoramas, _) = page();
    let outcome: Outcome = Rc::default();

    let created = panoramas.create(
        "#pano",
        &json!({ "imgPathMask": "/p/#SIDE#.jpg" }),
        Some(recording_callback(&outcome)),
    );
    assert_eq!(created, Ok(None));
    assert!(outcome.borrow().is_empty());
    assert!(panoramas.has_deferred());

    panoramas.run_deferred();
    assert_eq!(*outcome.borrow(), vec![Err(PanoramaError::RequiredParameter)]);
    assert!(panoramas.is_empty());
}

#[test]
fn extra_arguments_are_incorrect() {
    let (mut panoramas, _) = page();
    let outcome: Outcome = Rc::default();

    assert_eq!(
        panoramas.construct("#pano", &museum(), vec![Argument::Value(json!(1))]),
        Err(PanoramaError::IncorrectArgument)
    );

    let created = panoramas.construct(
        "#pano",
        &museum(),
        vec![
            Argument::Callback(recording_callback(&outcome)),
            Argument::Value(json!("surplus")),
        ],
    );
    assert_eq!(created, Ok(None));
    panoramas.run_deferred();
    assert_eq!(*outcome.borrow(), vec![Err(PanoramaError::IncorrectArgument)]);
    assert!(panoramas.is_empty());
}

#[test]
fn callback_can_start_the_loop() {
    let (mut panoramas, _) = page();
    let start: CreateCallback<HeadlessHost> = Box::new(
        |panoramas: &mut Panoramas<HeadlessHost>, result: Result<PanoramaId, PanoramaError>| {
            let id = result.unwrap();
            assert!(panoramas.animate(&id));
        },
    );
    let id = panoramas
        .create("#pano", &museum(), Some(start))
        .unwrap()
        .unwrap();

    panoramas.frame();
    assert_eq!(panoramas.get(&id).unwrap().renderer().frames, 1);

    panoramas.run_deferred();
    panoramas.frame();
    panoramas.frame();
    assert_eq!(panoramas.get(&id).unwrap().renderer().frames, 3);
}

#[test]
fn idle_frames_advance_longitude() {
    let (mut panoramas, _) = page();
    let id = panoramas.create("#pano", &museum(), None).unwrap().unwrap();
    panoramas.animate(&id);

    for _ in 0..99 {
        panoramas.frame();
    }
    let widget = panoramas.get(&id).unwrap();
    assert!((widget.orientation().longitude() - 100.0).abs() < 1e-9);

    let target = widget.renderer().last_target.unwrap();
    assert!((target.length() - 500.0).abs() < 1e-6);
}

#[test]
fn animating_twice_runs_two_loops() {
    let (mut panoramas, _) = page();
    let id = panoramas.create("#pano", &museum(), None).unwrap().unwrap();
    panoramas.animate(&id);
    panoramas.animate(&id);

    panoramas.frame();
    let widget = panoramas.get(&id).unwrap();
    assert_eq!(widget.loops(), 2);
    assert_eq!(widget.renderer().frames, 3);
}

#[test]
fn destroy_releases_the_container() {
    let (mut panoramas, container) = page();
    let id = panoramas.create("#pano", &museum(), None).unwrap().unwrap();
    panoramas.animate(&id);

    assert!(panoramas.destroy(&id));
    assert!(!panoramas.is_alive(&id));
    assert!(!panoramas.destroy(&id));
    assert!(!panoramas.animate(&id));

    assert_eq!(panoramas.host().occupant(container), None);
    assert!(panoramas.host().children(container).is_empty());
    assert_eq!(panoramas.host().bindings().count(&id), 0);

    // the loop stops with the panorama
    panoramas.frame();

    let again = panoramas.create("#pano", &museum(), None).unwrap().unwrap();
    assert_ne!(again, id);
    assert_eq!(panoramas.host().occupant(container), Some(again));
}

#[test]
fn panoramas_in_different_containers_are_independent() {
    let mut host = HeadlessHost::new();
    let a = host.add_element(&["#a"], 400, 200);
    let b = host.add_element(&["#b"], 100, 100);
    let mut panoramas = Panoramas::new(host);

    let first = panoramas.create("#a", &museum(), None).unwrap().unwrap();
    let second = panoramas.create("#b", &museum(), None).unwrap().unwrap();
    panoramas.animate(&first);

    for _ in 0..10 {
        panoramas.frame();
    }
    assert_eq!(panoramas.get(&first).unwrap().renderer().frames, 11);
    assert_eq!(panoramas.get(&second).unwrap().renderer().frames, 1);
    assert_eq!(panoramas.get(&first).unwrap().camera().aspect, 2.0);

    panoramas.destroy(&first);
    assert_eq!(panoramas.host().occupant(a), None);
    assert_eq!(panoramas.host().occupant(b), Some(second.clone()));
    assert_eq!(panoramas.host().bindings().count(&second), 8);
}

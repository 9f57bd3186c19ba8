use std::cell::{Cell, RefCell};
use std::rc::Rc;

use fux_core::headless::HeadlessRenderer;
use fux_core::*;
use fux_ui::tree::NodeState;
use fux_ui::*;

fn counter(count: &StateCell<i32>) -> View {
    Column(Modifier::new()).child((
        Obx({
            let count = count.clone();
            move |cx| Text(format!("Count: {}", count.watch(cx)))
        }),
        Button("+", {
            let count = count.clone();
            move |_| count.update(|c| *c += 1)
        }),
    ))
}

fn click(x: f32, y: f32) -> [InputEvent; 2] {
    [InputEvent::pointer_down(x, y), InputEvent::pointer_up(x, y)]
}

#[test]
fn test_counter_end_to_end() {
    let count = state(0);
    let mut rt = Runtime::new(counter(&count), Size::new(200.0, 100.0));
    let mut r = HeadlessRenderer::new();

    let first = rt.frame([], &mut r);
    assert!(first.layout_ran);
    assert_eq!(r.scene.texts(), vec!["Count: 0", "+"]);

    // "+" sits below the 14px label.
    let plus = rt.tree().find_button(rt.root(), "+").unwrap();
    assert_eq!(rt.screen_rect(plus), Some(Rect::new(0.0, 14.0, 31.0, 30.0)));

    let report = rt.frame(click(10.0, 20.0), &mut r);
    assert_eq!(report.events_routed, 2);
    assert_eq!(report.remounted, 1);
    assert_eq!(r.scene.texts(), vec!["Count: 1", "+"]);

    rt.frame(click(10.0, 20.0), &mut r);
    assert_eq!(count.get(), 2);
    assert_eq!(rt.tree().texts(rt.root()), vec!["Count: 2"]);
    assert_eq!(count.subscriber_count(), 1);
}

#[test]
fn test_hello_counter_rebuilds_once_per_click() {
    let count = state(0);
    let builds = Rc::new(Cell::new(0));
    let root = Column(Modifier::new()).child((
        Text("Hello"),
        Obx({
            let count = count.clone();
            let builds = builds.clone();
            move |cx| {
                builds.set(builds.get() + 1);
                Text(format!("Count: {}", count.watch(cx)))
            }
        }),
        Button("Click", {
            let count = count.clone();
            move |_| count.update(|c| *c += 1)
        }),
    ));
    let mut rt = Runtime::new(root, Size::new(200.0, 100.0));
    let mut r = HeadlessRenderer::new();
    rt.frame([], &mut r);
    assert_eq!(builds.get(), 1);
    assert_eq!(r.scene.texts(), vec!["Hello", "Count: 0", "Click"]);

    let button = rt.tree().find_button(rt.root(), "Click").unwrap();
    let at = rt.screen_rect(button).unwrap().center();
    assert_eq!(rt.screen_rect(button).unwrap().y, 28.0);

    rt.frame(click(at.x, at.y), &mut r);
    assert_eq!(builds.get(), 2);
    assert_eq!(r.scene.texts(), vec!["Hello", "Count: 1", "Click"]);

    rt.frame(click(at.x, at.y), &mut r);
    assert_eq!(builds.get(), 3);
    assert_eq!(r.scene.texts(), vec!["Hello", "Count: 2", "Click"]);
    assert_eq!(count.subscriber_count(), 1);
}

#[test]
fn test_events_dropped_while_layout_is_stale() {
    let count = state(0);
    let mut rt = Runtime::new(counter(&count), Size::new(200.0, 100.0));
    let mut r = HeadlessRenderer::new();

    // Nothing has been laid out yet.
    let report = rt.frame(click(10.0, 20.0), &mut r);
    assert_eq!(report.events_dropped, 2);
    assert_eq!(count.get(), 0);

    // The first click invalidates layout; the second is not replayed.
    let events: Vec<_> = click(10.0, 20.0).into_iter().chain(click(10.0, 20.0)).collect();
    let report = rt.frame(events, &mut r);
    assert_eq!(report.events_routed, 2);
    assert_eq!(report.events_dropped, 2);
    assert_eq!(count.get(), 1);
    assert!(!rt.layout_dirty());
}

#[test]
fn test_equal_write_does_not_relayout() {
    let count = state(0);
    let mut rt = Runtime::new(counter(&count), Size::new(200.0, 100.0));
    let mut r = HeadlessRenderer::new();
    rt.frame([], &mut r);

    count.set(0);
    let report = rt.frame([], &mut r);
    assert!(!report.layout_ran);
    assert_eq!(report.remounted, 0);

    count.set(5);
    let report = rt.frame([], &mut r);
    assert!(report.layout_ran);
    assert_eq!(r.scene.texts()[0], "Count: 5");
}

#[test]
fn test_click_requires_press_and_release_on_same_button() {
    let hits = Rc::new(Cell::new(0));
    let root = Row(Modifier::new()).child((
        Button("a", {
            let hits = hits.clone();
            move |_| hits.set(hits.get() + 1)
        }),
        Button("b", |_| {}),
    ));
    let mut rt = Runtime::new(root, Size::new(200.0, 100.0));
    let mut r = HeadlessRenderer::new();
    rt.frame([], &mut r);

    // "a" spans x 0..31, "b" 31..62.
    rt.frame(
        [
            InputEvent::pointer_down(5.0, 5.0),
            InputEvent::pointer_up(40.0, 5.0),
        ],
        &mut r,
    );
    assert_eq!(hits.get(), 0);

    rt.frame(click(5.0, 5.0), &mut r);
    assert_eq!(hits.get(), 1);
}

#[test]
fn test_hover_highlights_button() {
    let root = Button("go", |_| {});
    let mut rt = Runtime::new(root, Size::new(200.0, 100.0));
    let mut r = HeadlessRenderer::new();
    rt.frame([], &mut r);
    let plain = r.scene.nodes[0].clone();

    rt.frame([InputEvent::pointer_moved(3.0, 3.0)], &mut r);
    assert_eq!(rt.hovered(), Some(rt.root()));
    assert_ne!(r.scene.nodes[0], plain);

    rt.frame([InputEvent::pointer_moved(150.0, 90.0)], &mut r);
    assert_eq!(rt.hovered(), None);
    assert_eq!(r.scene.nodes[0], plain);
}

#[test]
fn test_focus_transfer_runs_blur_once() {
    let a = state(String::new());
    let b = state(String::new());
    let log = Rc::new(RefCell::new(Vec::<String>::new()));
    let submitted = Rc::new(RefCell::new(None::<String>));

    let root = Column(Modifier::new()).child((
        TextField(a.clone(), "first")
            .on_blur({
                let log = log.clone();
                move |_| log.borrow_mut().push("blur a".into())
            })
            .on_submit({
                let submitted = submitted.clone();
                move |_, text| *submitted.borrow_mut() = Some(text.to_string())
            }),
        TextField(b.clone(), "second").on_blur({
            let log = log.clone();
            move |_| log.borrow_mut().push("blur b".into())
        }),
    ));
    let mut rt = Runtime::new(root, Size::new(300.0, 200.0));
    let mut r = HeadlessRenderer::new();
    rt.frame([], &mut r);

    let fields: Vec<NodeId> = rt.tree().children(rt.root()).to_vec();
    // Each field is 30px tall: 14px text plus 8px padding above and below.
    rt.frame(click(10.0, 10.0), &mut r);
    assert_eq!(rt.focused(), Some(fields[0]));
    assert!(rt.text_input_active());

    rt.frame(
        [
            InputEvent::text("hix"),
            InputEvent::key(Key::Backspace),
            InputEvent::key(Key::Enter),
        ],
        &mut r,
    );
    assert_eq!(a.get(), "hi");
    assert_eq!(submitted.borrow().as_deref(), Some("hi"));

    rt.frame(click(10.0, 40.0), &mut r);
    assert_eq!(rt.focused(), Some(fields[1]));
    assert_eq!(*log.borrow(), vec!["blur a"]);

    // Refocusing the owner is a no-op.
    rt.frame(click(10.0, 40.0), &mut r);
    assert_eq!(*log.borrow(), vec!["blur a"]);

    rt.frame([InputEvent::text("yo")], &mut r);
    assert_eq!(b.get(), "yo");
    assert_eq!(a.get(), "hi");

    // Clicking empty space clears focus.
    rt.frame(click(280.0, 180.0), &mut r);
    assert_eq!(rt.focused(), None);
    assert!(!rt.text_input_active());
    assert_eq!(*log.borrow(), vec!["blur a", "blur b"]);

    rt.frame([InputEvent::text("lost")], &mut r);
    assert_eq!(b.get(), "yo");
}

#[test]
fn test_wheel_scroll_clamps_to_content() {
    let root = Scroll(Modifier::new().height(100.0)).child(SizedBox(Some(50.0), Some(400.0)));
    let mut rt = Runtime::new(root, Size::new(200.0, 300.0));
    let mut r = HeadlessRenderer::new();
    rt.frame([], &mut r);

    let offset = |rt: &Runtime| match &rt.tree().get(rt.root()).unwrap().state {
        NodeState::Scroll(s) => s.offset(),
        other => panic!("not a scroll node: {other:?}"),
    };

    rt.frame(
        [
            InputEvent::pointer_moved(10.0, 10.0),
            InputEvent::Wheel { delta_y: 120.0 },
        ],
        &mut r,
    );
    assert_eq!(offset(&rt), 120.0);
    let child = rt.tree().children(rt.root())[0];
    assert_eq!(rt.screen_rect(child).map(|r| r.y), Some(-120.0));

    rt.frame([InputEvent::Wheel { delta_y: 1000.0 }], &mut r);
    assert_eq!(offset(&rt), 300.0);

    rt.frame([InputEvent::Wheel { delta_y: -5000.0 }], &mut r);
    assert_eq!(offset(&rt), 0.0);

    // Outside the scroll region the wheel does nothing.
    rt.frame(
        [
            InputEvent::pointer_moved(150.0, 250.0),
            InputEvent::Wheel { delta_y: 50.0 },
        ],
        &mut r,
    );
    assert_eq!(offset(&rt), 0.0);
}

#[test]
fn test_resize_relayouts_and_quit_is_reported() {
    let root = Surface(Modifier::new().background(Color::WHITE), Empty());
    let mut rt = Runtime::new(root, Size::new(100.0, 100.0));
    let mut r = HeadlessRenderer::new();
    rt.frame([], &mut r);

    let report = rt.frame(
        [InputEvent::WindowResized {
            width: 320.0,
            height: 240.0,
        }],
        &mut r,
    );
    assert!(report.layout_ran);
    assert_eq!(rt.screen_rect(rt.root()), Some(Rect::new(0.0, 0.0, 320.0, 240.0)));

    let report = rt.frame([InputEvent::Quit], &mut r);
    assert!(report.quit);
    assert!(rt.quit_requested());
}

#[test]
fn test_rederive_drops_unread_cells_accumulate_keeps_them() {
    for (policy, stale_subs) in [
        (DependencyPolicy::Accumulate, 1),
        (DependencyPolicy::Rederive, 0),
    ] {
        let use_a = state(true);
        let a = state("a".to_string());
        let b = state("b".to_string());
        let root = ObxWith(policy, {
            let (use_a, a, b) = (use_a.clone(), a.clone(), b.clone());
            move |cx| {
                if use_a.watch(cx) {
                    Text(a.watch(cx))
                } else {
                    Text(b.watch(cx))
                }
            }
        });
        let mut rt = Runtime::new(root, Size::new(100.0, 100.0));
        let mut r = HeadlessRenderer::new();
        rt.frame([], &mut r);

        use_a.set(false);
        rt.frame([], &mut r);
        assert_eq!(r.scene.texts(), vec!["b"]);
        assert_eq!(a.subscriber_count(), stale_subs, "{policy:?}");
        assert_eq!(b.subscriber_count(), 1);

        // A write to the stale cell must not change what is shown.
        a.set("a2".to_string());
        rt.frame([], &mut r);
        assert_eq!(r.scene.texts(), vec!["b"]);
    }
}

#[test]
fn test_if_shows_content_while_true() {
    let open = state(false);
    let root = Column(Modifier::new()).child((
        Text("always"),
        If(open.clone(), || Text("details")),
    ));
    let mut rt = Runtime::new(root, Size::new(200.0, 200.0));
    let mut r = HeadlessRenderer::new();
    rt.frame([], &mut r);
    assert_eq!(r.scene.texts(), vec!["always"]);

    open.set(true);
    rt.frame([], &mut r);
    assert_eq!(r.scene.texts(), vec!["always", "details"]);

    open.set(false);
    rt.frame([], &mut r);
    assert_eq!(r.scene.texts(), vec!["always"]);
}

#[test]
fn test_small_scene_draw_list() {
    let root = Surface(
        Modifier::new().background(Color::WHITE),
        Column(Modifier::new().padding(10.0)).child((Text("Hello"), Button("OK", |_| {}))),
    );
    let mut rt = Runtime::new(root, Size::new(200.0, 100.0));
    let mut r = HeadlessRenderer::new();
    rt.frame([], &mut r);

    insta::assert_snapshot!(r.scene.to_string(), @r#"
    rect 0,0 200x100 #ffffffff
    text "Hello" at 10,10 size 14 #000000ff
    rect 10,24 38x30 #007bffff
    text "OK" at 22,32 size 14 #ffffffff
    "#);
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::{Rc, Weak};

    use crate::headless::{HeadlessRenderer, SceneNode};
    use crate::*;

    struct CountingSub(Cell<u32>);

    impl Subscriber for CountingSub {
        fn rebuild(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn counting() -> (Rc<CountingSub>, Weak<dyn Subscriber>) {
        let s = Rc::new(CountingSub(Cell::new(0)));
        let weak: Weak<dyn Subscriber> = Rc::downgrade(&s) as Weak<dyn Subscriber>;
        (s, weak)
    }

    fn label(text: String) -> View {
        View::new(ViewKind::Text {
            text,
            style: TextStyle::default(),
        })
    }

    #[test]
    fn test_state_basic() {
        let s = state(42);
        assert_eq!(s.get(), 42);
        s.set(100);
        assert_eq!(s.get(), 100);
        s.update(|v| *v += 1);
        assert_eq!(s.get(), 101);
        assert_eq!(s.with(|v| *v * 2), 202);
    }

    #[test]
    fn test_equal_set_notifies_once() {
        let s = state(0);
        let (sub, weak) = counting();
        s.subscribe(1, weak);

        s.set(7);
        s.set(7);
        assert_eq!(sub.0.get(), 1);

        s.update(|_| {});
        assert_eq!(sub.0.get(), 1);
    }

    #[test]
    fn test_duplicate_subscription_notified_once() {
        let s = state(0);
        let (sub, weak) = counting();
        s.subscribe(5, weak.clone());
        s.subscribe(5, weak);
        assert_eq!(s.subscriber_count(), 1);

        s.set(1);
        assert_eq!(sub.0.get(), 1);
    }

    #[test]
    fn test_dead_subscriber_is_dropped_silently() {
        let s = state(0);
        {
            let (_sub, weak) = counting();
            s.subscribe(9, weak);
        }
        assert_eq!(s.subscriber_count(), 0);
        s.set(1);
        assert_eq!(s.get(), 1);
    }

    #[test]
    fn test_get_does_not_subscribe() {
        let s = state(3);
        let r = Reactive::new(DependencyPolicy::Accumulate, {
            let s = s.clone();
            move |_cx| label(s.get().to_string())
        });
        assert_eq!(s.subscriber_count(), 0);
        s.set(4);
        assert_eq!(r.generation(), 1);
    }

    #[test]
    fn test_reactive_builds_eagerly() {
        let s = state(1);
        let r = Reactive::new(DependencyPolicy::default(), {
            let s = s.clone();
            move |cx| label(format!("v{}", s.watch(cx)))
        });
        assert_eq!(r.generation(), 1);
        assert!(r.has_pending_child());
        assert_eq!(r.take_child().map(|v| v.texts()), Some(vec!["v1".into()]));
        assert!(r.take_child().is_none());

        s.set(2);
        assert_eq!(r.generation(), 2);
        assert_eq!(r.take_child().map(|v| v.texts()), Some(vec!["v2".into()]));
    }

    #[test]
    fn test_on_rebuilt_hook_runs_per_rebuild() {
        let s = state(0);
        let r = Reactive::new(DependencyPolicy::Accumulate, {
            let s = s.clone();
            move |cx| label(s.watch(cx).to_string())
        });
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        r.set_on_rebuilt(Some(Rc::new(move || h.set(h.get() + 1))));

        s.set(1);
        s.set(1);
        s.set(2);
        assert_eq!(hits.get(), 2);
    }

    fn switching(policy: DependencyPolicy) -> (Rc<Reactive>, StateCell<bool>, StateCell<i32>, StateCell<i32>) {
        let use_b = state(false);
        let a = state(1);
        let b = state(10);
        let r = Reactive::new(policy, {
            let (use_b, a, b) = (use_b.clone(), a.clone(), b.clone());
            move |cx| {
                let v = if use_b.watch(cx) { b.watch(cx) } else { a.watch(cx) };
                label(v.to_string())
            }
        });
        (r, use_b, a, b)
    }

    #[test]
    fn test_accumulate_keeps_stale_dependency() {
        let (r, use_b, a, b) = switching(DependencyPolicy::Accumulate);
        use_b.set(true);
        assert_eq!(r.generation(), 2);

        b.set(11);
        assert_eq!(r.generation(), 3);

        // Still subscribed to `a`, but notified exactly once per set.
        assert_eq!(a.subscriber_count(), 1);
        a.set(2);
        assert_eq!(r.generation(), 4);
        assert_eq!(r.dependency_ids().len(), 3);
    }

    #[test]
    fn test_rederive_drops_stale_dependency() {
        let (r, use_b, a, b) = switching(DependencyPolicy::Rederive);
        use_b.set(true);
        assert_eq!(r.generation(), 2);
        assert_eq!(a.subscriber_count(), 0);

        b.set(11);
        assert_eq!(r.generation(), 3);

        a.set(2);
        assert_eq!(r.generation(), 3);
        assert_eq!(r.dependency_ids(), vec![use_b.id(), b.id()]);
    }

    #[test]
    fn test_nested_builds_track_separately() {
        let outer_cell = state(0);
        let inner_cell = state(0);
        let outer = Reactive::new(DependencyPolicy::Accumulate, {
            let (outer_cell, inner_cell) = (outer_cell.clone(), inner_cell.clone());
            move |cx| {
                let n = outer_cell.watch(cx);
                let inner = Reactive::new(DependencyPolicy::Accumulate, {
                    let inner_cell = inner_cell.clone();
                    move |cx| label(inner_cell.watch(cx).to_string())
                });
                View::new(ViewKind::Column { spacing: 0.0 }).with_children(vec![
                    label(n.to_string()),
                    View::new(ViewKind::Reactive(inner)),
                ])
            }
        });
        assert_eq!(outer.dependency_ids(), vec![outer_cell.id()]);
        assert_eq!(inner_cell.subscriber_count(), 1);

        inner_cell.set(5);
        assert_eq!(outer.generation(), 1);
    }

    #[test]
    fn test_self_write_during_build_does_not_loop() {
        let s = state(0);
        let r = Reactive::new(DependencyPolicy::Accumulate, {
            let s = s.clone();
            move |cx| {
                let v = s.watch(cx);
                s.set(v + 1);
                label(v.to_string())
            }
        });
        assert_eq!(r.generation(), 1);
        assert_eq!(s.get(), 1);
    }

    #[test]
    fn test_dropped_reactive_unsubscribes() {
        let s = state(0);
        let r = Reactive::new(DependencyPolicy::Accumulate, {
            let s = s.clone();
            move |cx| label(s.watch(cx).to_string())
        });
        assert_eq!(s.subscriber_count(), 1);
        drop(r);
        assert_eq!(s.subscriber_count(), 0);
        s.set(1);
    }

    #[test]
    fn test_constraints_helpers() {
        let c = Constraints::loose(Size::new(200.0, 100.0));
        assert_eq!(c.constrain(Size::new(300.0, 50.0)), Size::new(200.0, 50.0));
        assert!(c.has_bounded_width());
        assert!(!Constraints::unbounded().is_bounded(Axis::Vertical));

        let d = c.deflate(EdgeInsets::all(150.0));
        assert_eq!(d.max(), Size::ZERO);

        let t = c.tighten_width(50.0);
        assert_eq!((t.min_width, t.max_width), (50.0, 50.0));
        let r = c.with_axis(Axis::Vertical, 0.0, UNBOUNDED);
        assert!(!r.has_bounded_height());
        assert_eq!(r.max_width, 200.0);
    }

    #[test]
    fn test_rect_translate_and_contains() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(Vec2::new(15.0, 15.0)));
        assert!(!r.contains(Vec2::new(35.0, 15.0)));
        let moved = r.translate(Vec2::new(5.0, -5.0));
        assert_eq!(moved.origin(), Vec2::new(15.0, 5.0));
        assert_eq!(moved.size(), r.size());
    }

    #[test]
    fn test_color_helpers() {
        assert_eq!(Color::from_hex("#ff0000"), Color(255, 0, 0, 255));
        assert_eq!(Color::from_hex("00000080"), Color(0, 0, 0, 128));
        assert_eq!(Color::BLACK.lighten(1.0), Color(255, 255, 255, 255));
        assert!(!Color::TRANSPARENT.is_visible());
    }

    #[test]
    fn test_modifier_builder() {
        let m = Modifier::new()
            .padding(4.0)
            .width(10.0)
            .background(Color::RED)
            .flex_grow(2.0)
            .absolute()
            .offset_left(3.0);
        assert_eq!(m.padding, EdgeInsets::all(4.0));
        assert_eq!(m.width, Some(10.0));
        assert_eq!(m.background, Some(Color::RED));
        assert_eq!(m.flex_weight(), 2.0);
        assert!(m.is_positioned());
        assert_eq!(m.offset_left, Some(3.0));
    }

    #[test]
    fn test_headless_text_metrics() {
        let mut r = HeadlessRenderer::new();
        let s = r.measure_text("Hello", &TextStyle::sized(16.0));
        assert_eq!(s, Size::new(40.0, 16.0));
        // Pure: measuring twice draws nothing and returns the same size.
        assert_eq!(r.measure_text("Hello", &TextStyle::sized(16.0)), s);
        assert!(r.scene.nodes.is_empty());
    }

    #[test]
    fn test_headless_unknown_font_falls_back() {
        let mut r = HeadlessRenderer::new();
        let style = TextStyle {
            font_family: Some("Nope".into()),
            ..TextStyle::sized(10.0)
        };
        assert_eq!(r.measure_text("ab", &style), Size::new(10.0, 10.0));
        r.draw_text("ab", &style, 0.0, 0.0);
        assert_eq!(r.scene.texts(), vec!["ab"]);
    }

    #[test]
    fn test_headless_without_fonts_degrades() {
        let mut r = HeadlessRenderer::without_fonts();
        let style = TextStyle::sized(10.0);
        assert_eq!(r.measure_text("ab", &style), Size::ZERO);
        r.draw_text("ab", &style, 0.0, 0.0);
        assert!(r.scene.nodes.is_empty());
    }

    #[test]
    fn test_headless_images_cached_with_fallback() {
        let mut r = HeadlessRenderer::new()
            .with_image("logo.png", Size::new(32.0, 16.0))
            .with_image("missing.png", Size::new(8.0, 8.0))
            .with_fallback_image("missing.png");
        let a = r.load_image("logo.png");
        let b = r.load_image("logo.png");
        assert_eq!(a, b);
        assert_eq!(r.images_loaded(), 1);
        let h = a.unwrap();
        assert_eq!(r.measure_image(h), Size::new(32.0, 16.0));

        let f = r.load_image("nowhere.png").unwrap();
        assert_eq!(r.measure_image(f), Size::new(8.0, 8.0));

        let mut bare = HeadlessRenderer::new();
        assert!(bare.load_image("nowhere.png").is_none());
    }

    #[test]
    fn test_headless_clip_stack() {
        let mut r = HeadlessRenderer::new();
        r.begin_frame(Size::new(10.0, 10.0));
        r.push_clip(Rect::new(0.0, 0.0, 5.0, 5.0));
        r.pop_clip();
        r.pop_clip();
        r.end_frame();
        assert_eq!(
            r.scene.nodes,
            vec![
                SceneNode::PushClip {
                    rect: Rect::new(0.0, 0.0, 5.0, 5.0)
                },
                SceneNode::PopClip
            ]
        );
        assert_eq!(r.frames(), 1);
    }

    #[test]
    fn test_headless_scene_listing() {
        let mut r = HeadlessRenderer::new().with_image("logo.png", Size::new(16.0, 16.0));
        r.begin_frame(Size::new(100.0, 50.0));
        r.draw_rect(Rect::new(0.0, 0.0, 100.0, 50.0), Color::WHITE, CornerRadius::all(4.0));
        r.push_clip(Rect::new(10.0, 10.0, 80.0, 30.0));
        r.draw_text("Hi", &TextStyle::sized(12.0), 12.0, 14.0);
        let logo = r.load_image("logo.png").unwrap();
        r.draw_image(logo, Rect::new(70.0, 15.0, 16.0, 16.0));
        r.pop_clip();
        r.draw_line(0.0, 49.0, 100.0, 49.0, Color::GREY);
        r.end_frame();

        insta::assert_snapshot!(r.scene.to_string(), @r#"
        rect 0,0 100x50 #ffffffff
        clip 10,10 80x30
        text "Hi" at 12,14 size 12 #000000ff
        image 0 70,15 16x16
        unclip
        line 0,49 -> 100,49 #808080ff
        "#);
    }

    #[test]
    fn test_handoff_across_threads() {
        let (tx, inbox) = handoff::<u32>();
        let workers: Vec<_> = (0..4)
            .map(|i| {
                let tx = tx.clone();
                std::thread::spawn(move || tx.send(i))
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }
        let mut got = inbox.drain();
        got.sort();
        assert_eq!(got, vec![0, 1, 2, 3]);
        assert!(inbox.is_empty());
    }
}

use std::thread;

use fux_core::headless::HeadlessRenderer;
use fux_core::*;
use fux_platform::{App, AppConfig, ScriptedEvents};
use fux_ui::*;
use web_time::Duration;

fn greeting(name: &str) -> View {
    Column(Modifier::new()).child((
        Text(format!("Hello, {name}")),
        Button("Close", |cx| {
            cx.pop_overlay();
        }),
    ))
}

fn app(name: &StateCell<String>, status: &StateCell<String>) -> View {
    Column(Modifier::new().padding(16.0)).spacing(8.0).child((
        TextField(name.clone(), "Your name").on_submit(|cx, text| {
            show_snackbar(cx, format!("Submitted {text}"), SnackBarStyle::default());
        }),
        Row(Modifier::new()).spacing(8.0).child((
            Button("Greet", {
                let name = name.clone();
                move |cx| {
                    show_dialog(cx, greeting(&name.get()));
                }
            }),
            Button("Save", |cx| {
                let style = SnackBarStyle {
                    position: SnackBarPosition::Top,
                    ..SnackBarStyle::default()
                };
                show_snackbar(cx, "Saved", style);
            }),
        )),
        Obx({
            let status = status.clone();
            move |cx| Text(status.watch(cx)).color(Color::GREY)
        }),
    ))
}

fn click(x: f32, y: f32) -> [InputEvent; 2] {
    [InputEvent::pointer_down(x, y), InputEvent::pointer_up(x, y)]
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let name = state(String::new());
    let status = state("working...".to_string());

    let (producer, inbox) = handoff::<String>();
    let worker = thread::spawn(move || {
        thread::sleep(std::time::Duration::from_millis(30));
        producer.send("worker finished".to_string());
    });

    // Field at y 16..46, buttons at 54..84; the dialog's Close button lands
    // at (145, 112) in a 360x240 window.
    let mut events = ScriptedEvents::default()
        .idle(1)
        .then(click(30.0, 30.0))
        .then([InputEvent::text("Ada")])
        .then([InputEvent::key(Key::Enter)])
        .then(click(40.0, 65.0))
        .idle(1)
        .then(click(170.0, 125.0))
        .idle(12);
    let mut renderer = HeadlessRenderer::new();

    let code = App::new(app(&name, &status))
        .config(
            AppConfig::default()
                .title("Dialogs")
                .size(360.0, 240.0)
                .snackbar_duration(Duration::from_millis(150)),
        )
        .on_start({
            let status = status.clone();
            move |cx| {
                poll_inbox(cx, inbox, Duration::from_millis(16), move |_, msg| status.set(msg));
            }
        })
        .run(&mut events, &mut renderer)?;

    if worker.join().is_err() {
        log::error!("worker thread panicked");
    }
    log::info!("name {:?}, status {:?}", name.get(), status.get());
    println!("{}", renderer.scene.texts().join(" | "));
    std::process::exit(code)
}

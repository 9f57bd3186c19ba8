use fux_core::headless::HeadlessRenderer;
use fux_core::*;
use fux_platform::{App, AppConfig, ScriptedEvents};
use fux_ui::*;

fn app(count: &StateCell<i32>) -> View {
    Surface(
        Modifier::new()
            .fill_max_size()
            .background(Color::from_hex("#221628")),
        Column(Modifier::new().padding(24.0)).spacing(4.0).child((
            Obx({
                let count = count.clone();
                move |cx| Text(format!("Count: {}", count.watch(cx))).color(Color::WHITE)
            }),
            Button("Increment", {
                let count = count.clone();
                move |_| count.update(|c| *c += 1)
            }),
            Button("Decrement", {
                let count = count.clone();
                move |_| count.update(|c| *c -= 1)
            }),
        )),
    )
}

fn click(x: f32, y: f32) -> [InputEvent; 2] {
    [InputEvent::pointer_down(x, y), InputEvent::pointer_up(x, y)]
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let count = state(0);
    // Label at y 24..38, "Increment" at 42..72, "Decrement" at 76..106.
    let mut events = ScriptedEvents::default()
        .idle(1)
        .then(click(40.0, 50.0))
        .then(click(40.0, 50.0))
        .then(click(40.0, 90.0));
    let mut renderer = HeadlessRenderer::new();

    let code = App::new(app(&count))
        .config(AppConfig::default().title("Counter").size(320.0, 240.0))
        .run(&mut events, &mut renderer)?;

    log::info!("final count {}", count.get());
    println!("{}", renderer.scene.texts().join(" | "));
    std::process::exit(code)
}

//! Application entry: opens a window through an [`EventSource`] and drives
//! the fux frame loop until the user quits.
//!
//! ```rust
//! use fux_core::headless::HeadlessRenderer;
//! use fux_platform::{App, AppConfig, ScriptedEvents};
//! use fux_ui::Text;
//!
//! let mut events = ScriptedEvents::default().idle(2);
//! let mut renderer = HeadlessRenderer::new();
//! let code = App::new(Text("hello"))
//!     .config(AppConfig::default().frame_interval(std::time::Duration::ZERO))
//!     .run(&mut events, &mut renderer)
//!     .unwrap();
//! assert_eq!(code, 0);
//! assert_eq!(renderer.scene.texts(), vec!["hello"]);
//! ```

pub mod source;

pub use source::{EventSource, ScriptedEvents};

use anyhow::Context;
use fux_core::{AppCx, Renderer, Size, View};
use fux_ui::Runtime;
use fux_ui::runtime::DEFAULT_SNACKBAR_DURATION;
use web_time::{Duration, Instant};

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub title: String,
    /// Initial viewport size in pixels.
    pub size: Size,
    /// Target time between frame starts. Zero runs frames back to back.
    pub frame_interval: Duration,
    /// How long `show_snackbar` keeps a message up unless its style says otherwise.
    pub snackbar_duration: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "fux".to_string(),
            size: Size::new(800.0, 600.0),
            frame_interval: Duration::from_millis(16),
            snackbar_duration: DEFAULT_SNACKBAR_DURATION,
        }
    }
}

impl AppConfig {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = Size::new(width, height);
        self
    }
    pub fn frame_interval(mut self, d: Duration) -> Self {
        self.frame_interval = d;
        self
    }
    pub fn snackbar_duration(mut self, d: Duration) -> Self {
        self.snackbar_duration = d;
        self
    }
}

type StartHook = Box<dyn FnOnce(&mut dyn AppCx)>;

pub struct App {
    root: View,
    config: AppConfig,
    on_start: Option<StartHook>,
}

impl App {
    pub fn new(root: View) -> Self {
        Self {
            root,
            config: AppConfig::default(),
            on_start: None,
        }
    }

    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs once after the root is mounted, before the first frame. Use it to
    /// register timers or inbox polling.
    pub fn on_start(mut self, f: impl FnOnce(&mut dyn AppCx) + 'static) -> Self {
        self.on_start = Some(Box::new(f));
        self
    }

    /// Runs frames until a `Quit` event arrives. Returns the process exit code.
    pub fn run(
        self,
        source: &mut dyn EventSource,
        renderer: &mut dyn Renderer,
    ) -> anyhow::Result<i32> {
        let App {
            root,
            config,
            on_start,
        } = self;

        source
            .open(&config.title, config.size)
            .with_context(|| format!("failed to open window \"{}\"", config.title))?;

        let mut rt = Runtime::new(root, config.size);
        rt.set_snackbar_duration(config.snackbar_duration);
        if let Some(f) = on_start {
            f(&mut rt);
        }

        log::info!(
            "running \"{}\" at {}x{}",
            config.title,
            config.size.width,
            config.size.height
        );

        let mut events = Vec::new();
        let mut frames: u64 = 0;
        loop {
            let started = Instant::now();
            source.poll(&mut events).context("event source failed")?;
            let report = rt.frame(events.drain(..), renderer);
            frames += 1;
            if report.quit {
                break;
            }
            pace(started, config.frame_interval);
        }

        log::info!("stopped after {frames} frame(s)");
        Ok(0)
    }
}

fn pace(started: Instant, interval: Duration) {
    let elapsed = started.elapsed();
    if elapsed < interval {
        std::thread::sleep(interval - elapsed);
    }
}

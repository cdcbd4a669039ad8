//! Brick Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use brick_breaker::audio::AudioManager;
    use brick_breaker::config::{GameConfig, Viewport};
    use brick_breaker::persistence::LocalStorage;
    use brick_breaker::renderer::vertex::Vertex;
    use brick_breaker::renderer::{RenderState, startup_notice};
    use brick_breaker::sim::Key;
    use brick_breaker::Game;

    /// Everything the frame callback and the key listener share
    struct App {
        game: Game<LocalStorage>,
        render_state: RenderState,
        audio: AudioManager,
    }

    impl App {
        fn frame(&mut self) {
            let scene = self.game.frame();
            self.audio.play_events(self.game.drain_events());
            draw(&mut self.render_state, &scene.tessellate());
        }
    }

    fn draw(render_state: &mut RenderState, vertices: &[Vertex]) {
        match render_state.render(vertices) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                render_state.reconfigure();
            }
            Err(e) => log::error!("Render error: {e:?}"),
        }
    }

    fn js_error(message: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&message.to_string())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&js_error(format!("Logger unavailable: {e}")));
        }

        log::info!("Brick Breaker starting...");

        let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
        let document = window.document().ok_or_else(|| js_error("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_error("no canvas"))?
            .dyn_into()
            .map_err(|_| js_error("not a canvas"))?;

        let viewport = Viewport::new(
            window.inner_width()?.as_f64().unwrap_or_default() as f32,
            window.inner_height()?.as_f64().unwrap_or_default() as f32,
        );
        let (canvas_w, canvas_h) = viewport.canvas_size();
        let width = canvas_w.max(1.0) as u32;
        let height = canvas_h.max(1.0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_error)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_error)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let mut render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(js_error)?;

        let seed = js_sys::Date::now() as u64;
        let config = match GameConfig::from_viewport(viewport, seed) {
            Ok(config) => config,
            Err(e) => {
                // Drawn once; the loop never starts
                draw(&mut render_state, &startup_notice(viewport, &e).tessellate());
                return Ok(());
            }
        };
        log::info!("Game initialized with seed: {seed}");

        let app = Rc::new(RefCell::new(App {
            game: Game::new(config, LocalStorage::open()),
            render_state,
            audio: AudioManager::new(),
        }));

        setup_keyboard(&window, app.clone());
        request_animation_frame(app);

        log::info!("Brick Breaker running!");
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut app = app.borrow_mut();
            // Browsers only allow audio after a user gesture
            app.audio.resume();
            let key = Key::from_key_name(&event.key());
            let outcome = app.game.handle_key(key);
            log::debug!("{key:?} -> {outcome:?}");
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Window gone, stopping loop");
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        app.borrow_mut().frame();
        // Re-armed every frame, whatever the phase
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {e:?}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Brick Breaker (native) starting...");
    log::info!("Native mode runs a headless autopilot - build for wasm32 to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(brick_breaker::consts::DEFAULT_SEED);

    autopilot::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use brick_breaker::audio::AudioManager;
    use brick_breaker::config::{GameConfig, Viewport};
    use brick_breaker::persistence::MemoryStorage;
    use brick_breaker::Game;
    use brick_breaker::sim::{GameState, Key};

    /// Give up after this many frames (about half an hour at 60 Hz)
    const MAX_FRAMES: u32 = 100_000;

    /// Play one game with a paddle that chases the ball
    pub fn run(seed: u64) {
        let viewport = Viewport::new(1280.0, 720.0);
        let config = match GameConfig::from_viewport(viewport, seed) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}");
                return;
            }
        };
        log::info!(
            "Seed {seed}: launch velocity ({:.2}, {:.2})",
            config.ball.launch_velocity.x,
            config.ball.launch_velocity.y
        );

        let mut audio = AudioManager::new();
        let mut game = Game::new(config, MemoryStorage::new());
        game.handle_key(Key::Other);

        let mut frames = 0;
        while frames < MAX_FRAMES && !game.state().phase.is_terminal() {
            let key = steer(game.state(), game.config());
            if key != Key::Other {
                game.handle_key(key);
            }
            game.frame();
            audio.play_events(game.drain_events());
            frames += 1;
        }

        let scene = game.frame();
        let state = game.state();
        log::info!(
            "{:?} after {frames} frames: score {} ({} of {} bricks left), {} cues",
            state.phase,
            state.current_score,
            state.bricks.remaining(),
            state.bricks.len(),
            audio.played()
        );
        for line in scene.texts() {
            log::info!("> {line}");
        }
    }

    /// Move the paddle centre toward the ball centre
    fn steer(state: &GameState, config: &GameConfig) -> Key {
        let ball = state.ball.center(config).x;
        let paddle = state.paddle.bounds(config).center().x;
        let slack = config.paddle.step / 2.0;
        if ball > paddle + slack {
            Key::Right
        } else if ball < paddle - slack {
            Key::Left
        } else {
            Key::Other
        }
    }
}

//! Ocean Cleanup Defender entry point
//!
//! Browser: wires the canvas, HUD and keyboard to the game loop.
//! Native: runs a few headless autopilot games and prints the results.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent};

    use ocean_cleanup_defender::driver::FrameCallback;
    use ocean_cleanup_defender::input::{KeyAction, map_key};
    use ocean_cleanup_defender::renderer::{RenderState, scene_vertices};
    use ocean_cleanup_defender::sim::{GameEvent, GameSession};
    use ocean_cleanup_defender::highscores::RunRecord;
    use ocean_cleanup_defender::{FrameHandle, FrameScheduler, GameConfig, GameLoop, HighScores};

    type Game = GameLoop<AnimationFrameScheduler>;

    /// `requestAnimationFrame` behind the driver's scheduler trait
    struct AnimationFrameScheduler {
        window: web_sys::Window,
    }

    impl FrameScheduler for AnimationFrameScheduler {
        fn request_frame(&mut self, callback: FrameCallback) -> FrameHandle {
            let closure = Closure::once_into_js(move |time: f64| callback(time));
            let id = self
                .window
                .request_animation_frame(closure.unchecked_ref())
                .unwrap_or_else(|e| {
                    log::error!("requestAnimationFrame failed: {:?}", e);
                    0
                });
            FrameHandle(id as u64)
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            let _ = self.window.cancel_animation_frame(handle.0 as i32);
        }
    }

    /// Everything drawn or shown to the player
    struct Presenter {
        document: Document,
        render_state: Option<RenderState>,
        high_scores: HighScores,
    }

    impl Presenter {
        fn present(&mut self, session: &GameSession, events: &[GameEvent]) {
            self.render(session);
            self.update_hud(session);

            for event in events {
                if let GameEvent::GameOver { final_score } = *event {
                    self.show_game_over(session, final_score);
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, session: &GameSession) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&scene_vertices(session)) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, session: &GameSession) {
            set_text(&self.document, "score", &session.score.to_string());
            set_text(&self.document, "lives", &session.lives.to_string());
        }

        fn show_game_over(&mut self, session: &GameSession, final_score: u64) {
            let rank = self.high_scores.record(RunRecord {
                score: final_score,
                frames: session.frame,
                seed: session.seed,
            });
            let text = self.high_scores.final_score_text(final_score, rank);
            set_text(&self.document, "finalScore", &text);
            set_hidden(self.document.get_element_by_id("gameOverScreen"), false);
        }

        /// Page load: zeroed HUD, start button showing
        fn show_idle(&self, session: &GameSession) {
            self.update_hud(session);
            set_hidden(self.document.get_element_by_id("gameOverScreen"), true);
            set_hidden(self.document.get_element_by_id("startButton"), false);
        }

        fn reset_hud(&self, session: &GameSession) {
            self.update_hud(session);
            set_hidden(self.document.get_element_by_id("gameOverScreen"), true);
            set_hidden(self.document.get_element_by_id("startButton"), true);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(el: Option<Element>, hidden: bool) {
        if let Some(el) = el {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Ocean Cleanup Defender starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let config = GameConfig::builtin();
        let width = config.canvas_width() as u32;
        let height = config.canvas_height() as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let canvas_size = config.canvas_size;
        let game: Game = GameLoop::new(
            GameSession::new(config, seed),
            AnimationFrameScheduler {
                window: window.clone(),
            },
        );
        let presenter = Rc::new(RefCell::new(Presenter {
            document: document.clone(),
            render_state: None,
            high_scores: HighScores::new(),
        }));
        game.with_session(|session| presenter.borrow().show_idle(session));
        {
            let presenter = presenter.clone();
            game.set_present_hook(Box::new(move |session, events| {
                presenter.borrow_mut().present(session, events);
            }));
        }

        setup_buttons(&document, game.clone(), presenter.clone());
        setup_keyboard(&window, game.clone());
        setup_auto_pause(&window, game.clone());

        // WebGPU first, WebGL2 as fallback
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas)) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {:?}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("No graphics adapter: {:?}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            match RenderState::new(surface, &adapter, width, height, canvas_size).await {
                Ok(render_state) => render_state,
                Err(e) => {
                    log::error!("Rendering disabled: {}", e);
                    return;
                }
            };
        {
            let mut p = presenter.borrow_mut();
            p.render_state = Some(render_state);
            // Draw the idle board behind the start button
            game.with_session(|session| p.render(session));
        }

        log::info!("Ocean Cleanup Defender ready (seed {})", seed);
    }

    fn setup_buttons(document: &Document, game: Game, presenter: Rc<RefCell<Presenter>>) {
        for id in ["startButton", "restartButton"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let presenter = presenter.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    let seed = js_sys::Date::now() as u64;
                    game.start_with_seed(seed);
                    game.with_session(|session| presenter.borrow().reset_hud(session));
                    log::info!("Game started with seed: {}", seed);
                });
                let _ = btn
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_keyboard(window: &web_sys::Window, game: Game) {
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(action) = map_key(&event.key(), pressed) else {
                    return;
                };
                // Keep arrow keys from scrolling the page
                event.prevent_default();
                match action {
                    KeyAction::Move(direction) => game.set_intent(direction),
                    KeyAction::ToggleAutopilot => {
                        game.toggle_autopilot();
                    }
                    KeyAction::TogglePause => game.toggle_pause(),
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(window: &web_sys::Window, game: Game) {
        let document = window.document().expect("no document");

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.auto_pause();
                } else {
                    game.auto_resume();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside) / focus
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.auto_pause();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.auto_resume();
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Ocean Cleanup Defender (native) starting...");
    log::info!("Native mode runs headless autopilot games - run with `trunk serve` for the web version");

    run_headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo() {
    use ocean_cleanup_defender::consts::SIM_DT;
    use ocean_cleanup_defender::highscores::RunRecord;
    use ocean_cleanup_defender::sim::GameSession;
    use ocean_cleanup_defender::{GameConfig, GameLoop, HighScores, ManualScheduler};

    const DEMO_RUNS: u64 = 3;
    /// Five minutes of 60 Hz frames per run
    const MAX_FRAMES: usize = 60 * 60 * 5;

    let scheduler = ManualScheduler::new();
    let game = GameLoop::new(GameSession::new(GameConfig::builtin(), 0), scheduler.clone());
    game.set_autopilot(true);

    let mut high_scores = HighScores::new();
    let frame_ms = SIM_DT as f64 * 1000.0;

    for seed in 1..=DEMO_RUNS {
        game.start_with_seed(seed);
        scheduler.run(0.0, frame_ms, MAX_FRAMES);
        game.stop();

        let (run, lives, over) = game.with_session(|s| {
            let run = RunRecord {
                score: s.score,
                frames: s.frame,
                seed: s.seed,
            };
            (run, s.lives, s.is_over())
        });
        let rank = high_scores.record(run);

        println!(
            "Run {} (seed {}): {} with {} lives after {} frames, {}",
            seed,
            run.seed,
            high_scores.final_score_text(run.score, rank),
            lives,
            run.frames,
            if over { "game over" } else { "time up" },
        );
    }

    if let Some(best) = high_scores.best() {
        println!("Best score: {} (seed {})", best.score, best.seed);
    }
}

//! Astro Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::KeyboardEvent;

    use astro_dodge::persistence::LocalStorageStore;
    use astro_dodge::sim::Snapshot;
    use astro_dodge::{KeyCode, KeySignal, Session, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        /// Last HUD text written, to skip redundant DOM writes
        last_hud: (u64, u64, &'static str),
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            Self {
                session: Session::new(seed, settings, Box::new(LocalStorageStore::default())),
                last_hud: (u64::MAX, u64::MAX, ""),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, snapshot: &Snapshot) {
            let hud = (snapshot.score, snapshot.best, snapshot.status);
            if hud == self.last_hud {
                return;
            }
            self.last_hud = hud;

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&snapshot.score_label()));
            }
            if let Some(el) = document.get_element_by_id("best") {
                el.set_text_content(Some(&snapshot.best_label()));
            }
            if let Some(el) = document.get_element_by_id("status") {
                el.set_text_content(Some(snapshot.status));
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Astro Dodge starting...");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Astro Dodge running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window available");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let code = KeyCode::from_code(&event.code());
            if code == KeyCode::Space {
                event.prevent_default();
            }
            let signal = KeySignal {
                code,
                repeat: event.repeat(),
            };
            game.borrow_mut().session.key_down(signal);
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.session.frame(time / 1000.0);
            let snapshot = g.session.snapshot();
            g.update_hud(&snapshot);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Astro Dodge (native) starting...");
    log::info!("Native mode plays headless autopilot runs - serve the web build to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(rand::random);

    native::play_demo(seed, native::DEMO_RUNS);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use astro_dodge::persistence::FileStore;
    use astro_dodge::sim::{GameEvent, autopilot_input};
    use astro_dodge::{Session, Settings};

    /// Runs played per invocation
    pub const DEMO_RUNS: u32 = 3;
    /// Fixed frame for headless play
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up on a run after this many simulated minutes
    const MAX_FRAMES_PER_RUN: u32 = 60 * 60 * 5;
    const BEST_FILE: &str = "astro_dodge_best.json";

    pub fn play_demo(seed: u64, runs: u32) {
        let settings = Settings::load();
        let mut session = Session::new(seed, settings, Box::new(FileStore::new(BEST_FILE)));

        for run in 1..=runs {
            let mut frames = 0;
            let outcome = loop {
                for intent in autopilot_input(session.state()).intents {
                    session.push_intent(intent);
                }
                let events = session.step(FRAME_DT);
                frames += 1;

                let over = events.iter().find_map(|e| match e {
                    GameEvent::GameOver { score, best, new_best } => Some((*score, *best, *new_best)),
                    _ => None,
                });
                if let Some(over) = over {
                    break Some(over);
                }
                if frames >= MAX_FRAMES_PER_RUN {
                    break None;
                }
            };

            match outcome {
                Some((score, best, new_best)) => log::info!(
                    "Run {}: score {} after {:.1}s (best {}{})",
                    run,
                    score,
                    frames as f32 * FRAME_DT,
                    best,
                    if new_best { ", new best!" } else { "" }
                ),
                None => {
                    log::info!(
                        "Run {}: still alive at score {}, stopping",
                        run,
                        session.snapshot().score
                    );
                    break;
                }
            }
        }
    }
}

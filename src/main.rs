//! Cyber Nexus entry point
//!
//! On the web this wires DOM input into the session and drives it from
//! `requestAnimationFrame`; the JS renderer reads `window.cyberNexus`.
//! Natively it runs a headless autopilot session and prints the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, TouchEvent};

    use cyber_nexus::sim::autopilot;
    use cyber_nexus::{InputCollector, MoveKey, Session, SessionPhase, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        input: InputCollector,
        last_time: f64,
        /// Idle/demo mode - autopilot plays
        autopilot: bool,
        last_phase: SessionPhase,
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> Self {
            let input = InputCollector::new(settings.swipe_threshold);
            Self {
                session: Session::new(settings, seed),
                input,
                last_time: 0.0,
                autopilot: false,
                last_phase: SessionPhase::Start,
            }
        }

        fn start(&mut self) {
            self.session.set_seed(js_sys::Date::now() as u64);
            self.input.reset();
            self.session.start_session();
        }

        /// Run one simulation frame
        fn update(&mut self, dt: f32) {
            let mut input = self.input.take_frame();
            if self.autopilot {
                input = autopilot::drive(self.session.arena());
            }
            let report = self.session.frame(&input, dt);
            if let Some(outcome) = report.game_over {
                log::info!("Session ended: {:?}", outcome);
            }
        }

        /// Hand the latest snapshot to the JS presentation layer
        fn publish(&self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            match serde_json::to_string(&self.session.snapshot()) {
                Ok(json) => {
                    let _ = js_sys::Reflect::set(
                        &window,
                        &JsValue::from_str("cyberNexus"),
                        &JsValue::from_str(&json),
                    );
                }
                Err(e) => log::warn!("Snapshot serialization failed: {}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let data = self.session.data();

            let set_text = |selector: &str, text: &str| {
                if let Some(el) = document.query_selector(selector).ok().flatten() {
                    el.set_text_content(Some(text));
                }
            };
            set_text("#hud-health .hud-value", &format!("{}/{}", data.health, data.max_health));
            set_text("#hud-score .hud-value", &format!("{:06}", data.score));
            set_text(
                "#hud-crystals .hud-value",
                &format!("{}/{}", data.collectibles, data.total_collectibles),
            );
            set_text("#hud-kills .hud-value", &data.enemies_defeated.to_string());

            if let Some(bar) = document.get_element_by_id("hud-health-bar") {
                let pct = data.health_fraction() * 100.0;
                let _ = bar.set_attribute("style", &format!("width: {:.0}%", pct));
            }

            // Screen visibility only changes on phase transitions
            let phase = self.session.phase();
            if phase == self.last_phase {
                return;
            }
            self.last_phase = phase;

            let show = |id: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
                }
            };
            show("start-screen", phase == SessionPhase::Start);
            show("hud", phase == SessionPhase::Playing);
            show("game-over", phase == SessionPhase::GameOver);

            if phase == SessionPhase::GameOver {
                let victory = self.session.data().all_collected();
                set_text("#game-over-title", if victory { "VICTORY" } else { "SYSTEM FAILURE" });
            }
        }
    }

    fn touch_points(event: &TouchEvent) -> Vec<Vec2> {
        let touches = event.touches();
        (0..touches.length())
            .filter_map(|i| touches.get(i))
            .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
            .collect()
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Cyber Nexus starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(settings, seed)));

        setup_input_handlers(&window, game.clone());
        setup_buttons(game.clone());

        request_animation_frame(game);

        log::info!("Cyber Nexus running!");
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if key == "i" || key == "I" {
                    g.autopilot = !g.autopilot;
                    log::info!("Autopilot: {}", g.autopilot);
                    return;
                }
                // Keep Space and the arrows from scrolling the page
                if event.code() == "Space" {
                    event.prevent_default();
                    g.input.key_down("Space");
                } else {
                    if MoveKey::from_key(&key).is_some() {
                        event.prevent_default();
                    }
                    g.input.key_down(&key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (swipe anchor, two fingers attack)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                game.borrow_mut().input.touch_start(&touch_points(&event));
            });
            let _ = window
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                game.borrow_mut().input.touch_move(&touch_points(&event));
            });
            let _ = window
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().input.touch_end();
            });
            let _ = window
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().start();
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
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

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt);
            g.publish();
            g.update_hud();
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
    use cyber_nexus::sim::autopilot;
    use cyber_nexus::{Session, Settings};

    env_logger::init();
    log::info!("Cyber Nexus (native) starting...");
    log::info!("Native mode runs a headless autopilot session - use `trunk serve` to play");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut session = Session::new(Settings::load(), seed);
    session.start_session();

    let dt = 1.0 / 60.0;
    let max_frames = 60 * 120;
    let mut outcome = None;
    for _ in 0..max_frames {
        let input = autopilot::drive(session.arena());
        if let Some(o) = session.frame(&input, dt).game_over {
            outcome = Some(o);
            break;
        }
    }

    let data = session.data();
    let elapsed = session.arena().elapsed;
    match outcome {
        Some(o) => println!("Session ended after {:.1}s: {:?}", elapsed, o),
        None => println!("Session still running after {:.1}s", elapsed),
    }
    println!(
        "score {:06}  health {}/{}  crystals {}/{}  drones {}/{}",
        data.score,
        data.health,
        data.max_health,
        data.collectibles,
        data.total_collectibles,
        data.enemies_defeated,
        data.total_enemies
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

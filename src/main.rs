//! Flap Gap entry point
//!
//! Browser build: wires the canvas, input, the countdown interval and the
//! animation-frame loop into a `GameSession`.
//! Native build: plays one headless session with the autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlButtonElement, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use flap_gap::Settings;
    use flap_gap::consts::COUNTDOWN_INTERVAL_MS;
    use flap_gap::platform::FrameClock;
    use flap_gap::platform::web::Interval;
    use flap_gap::renderer::{CanvasRenderer, render_session};
    use flap_gap::sim::{
        CountdownStep, CountdownTicket, FrameStep, GameEvent, GamePhase, GameSession, autopilot,
    };

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        renderer: CanvasRenderer,
        clock: FrameClock,
        /// Live countdown timer; replacing it cancels the previous one
        countdown: Option<Interval>,
        /// A requestAnimationFrame callback is queued
        frame_pending: bool,
        /// Autopilot flaps for the player
        demo_mode: bool,
    }

    impl Game {
        /// Run simulation frames for this display frame
        fn update(&mut self, time: f64) {
            if self.session.phase() != GamePhase::Running {
                self.clock.reset();
                return;
            }

            for _ in 0..self.clock.advance(time) {
                if self.demo_mode && autopilot::should_flap(&self.session) {
                    self.session.flap();
                }
                if self.session.frame_tick() == FrameStep::Ended {
                    break;
                }
            }
        }

        /// Push queued session events into the HUD
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            for event in self.session.drain_events() {
                match event {
                    GameEvent::CountdownStarted { .. } => {
                        if let Some(el) = document.get_element_by_id("final-score") {
                            let _ = el.set_attribute("class", "hidden");
                        }
                        if let Some(el) = document.get_element_by_id("score") {
                            el.set_text_content(Some("Score: 0"));
                        }
                        set_start_enabled(false);
                    }
                    GameEvent::CountdownTick { .. } => {}
                    GameEvent::Launched => log::info!("Go!"),
                    GameEvent::ScoreChanged { score } => {
                        if let Some(el) = document.get_element_by_id("score") {
                            el.set_text_content(Some(&format!("Score: {score}")));
                        }
                    }
                    GameEvent::Ended { final_score } => {
                        if let Some(el) = document.get_element_by_id("final-score") {
                            el.set_text_content(Some(&format!("Final Score: {final_score}")));
                            let _ = el.set_attribute("class", "");
                        }
                        set_start_enabled(true);
                    }
                }
            }
        }
    }

    fn set_start_enabled(enabled: bool) {
        let button = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("start-button"))
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        if let Some(button) = button {
            button.set_disabled(!enabled);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Flap Gap starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        // Backing store at device resolution; the field keeps its own units
        let dpr = window.device_pixel_ratio();
        canvas.set_width((canvas.client_width() as f64 * dpr) as u32);
        canvas.set_height((canvas.client_height() as f64 * dpr) as u32);

        let seed = js_sys::Date::now() as u64;
        let session = GameSession::new(Settings::default(), seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Session created with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            session,
            renderer: CanvasRenderer::new(canvas.clone())?,
            clock: FrameClock::default(),
            countdown: None,
            frame_pending: false,
            demo_mode: false,
        }));

        {
            let mut g = game.borrow_mut();
            let g = &mut *g;
            render_session(&g.session, &mut g.renderer);
        }

        setup_input_handlers(&canvas, game.clone());
        setup_start_button(game);

        log::info!("Flap Gap ready!");
        Ok(())
    }

    fn start_game(game: &Rc<RefCell<Game>>) {
        let ticket = match game.borrow_mut().session.start() {
            Ok(ticket) => ticket,
            Err(e) => {
                log::warn!("{}", e);
                return;
            }
        };

        let timer_game = game.clone();
        let interval = Interval::new(COUNTDOWN_INTERVAL_MS, move || {
            countdown_tick(&timer_game, ticket);
        });

        let mut g = game.borrow_mut();
        match interval {
            // Dropping the previous handle clears its timer
            Ok(interval) => g.countdown = Some(interval),
            Err(e) => log::error!("Failed to start countdown: {:?}", e),
        }
        g.clock.reset();
        g.update_hud();

        if !g.frame_pending {
            g.frame_pending = true;
            drop(g);
            request_animation_frame(game.clone());
        }
    }

    fn countdown_tick(game: &Rc<RefCell<Game>>, ticket: CountdownTicket) {
        let mut g = game.borrow_mut();
        match g.session.countdown_tick(ticket) {
            CountdownStep::Remaining(_) => {}
            CountdownStep::Launched | CountdownStep::Stale => {
                // Still inside the interval callback: stop it, drop it later
                if let Some(interval) = g.countdown.as_mut() {
                    interval.cancel();
                }
            }
        }
        g.update_hud();
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("start-button") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                start_game(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer press flaps
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().session.flap();
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                // Held keys must not auto-repeat flaps
                if event.repeat() {
                    return;
                }
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "Space" => {
                        event.prevent_default();
                        g.session.flap();
                    }
                    "KeyD" => {
                        g.demo_mode = !g.demo_mode;
                        log::info!("Demo mode: {}", g.demo_mode);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
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
        let keep_going = {
            let mut g = game.borrow_mut();
            let g = &mut *g;

            // Safe to free a cancelled countdown now that its callback has returned
            if g.countdown.as_ref().is_some_and(|i| i.is_cancelled()) {
                g.countdown = None;
            }

            g.update(time);
            render_session(&g.session, &mut g.renderer);
            g.update_hud();

            g.frame_pending = g.session.phase().wants_frames();
            g.frame_pending
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use flap_gap::Settings;
    use flap_gap::renderer::{AsciiCanvas, render_session};
    use flap_gap::sim::{CountdownStep, FrameStep, GameEvent, GameSession, autopilot};

    const USAGE: &str = "usage: flap-gap [--settings FILE] [--seed N] [--frames N] [--manual]";

    /// Command-line options for the headless run
    #[derive(Debug)]
    pub struct Options {
        pub settings: Option<PathBuf>,
        pub seed: Option<u64>,
        pub max_frames: u64,
        /// Never flap: the sprite just falls
        pub manual: bool,
    }

    impl Options {
        pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
            let mut options = Options {
                settings: None,
                seed: None,
                max_frames: 100_000,
                manual: false,
            };

            let mut args = args.into_iter();
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--settings" => {
                        let path = args.next().ok_or("--settings needs a path")?;
                        options.settings = Some(PathBuf::from(path));
                    }
                    "--seed" => {
                        let value = args.next().ok_or("--seed needs a value")?;
                        options.seed = Some(value.parse().map_err(|e| format!("--seed: {e}"))?);
                    }
                    "--frames" => {
                        let value = args.next().ok_or("--frames needs a value")?;
                        options.max_frames = value.parse().map_err(|e| format!("--frames: {e}"))?;
                    }
                    "--manual" => options.manual = true,
                    "-h" | "--help" => return Err(USAGE.to_string()),
                    other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
                }
            }
            Ok(options)
        }
    }

    pub fn run(options: Options) -> Result<u32, Box<dyn std::error::Error>> {
        let settings = match &options.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        let seed = options.seed.unwrap_or_else(clock_seed);

        let mut session = GameSession::new(settings, seed)?;
        let ticket = session.start()?;
        while let CountdownStep::Remaining(n) = session.countdown_tick(ticket) {
            log::info!("{}...", n);
        }

        for _ in 0..options.max_frames {
            if !options.manual && autopilot::should_flap(&session) {
                session.flap();
            }
            let step = session.frame_tick();

            for event in session.drain_events() {
                if let GameEvent::ScoreChanged { score } = event {
                    log::info!("Score: {}", score);
                }
            }
            if step != FrameStep::Continue {
                break;
            }
        }

        let mut canvas = AsciiCanvas::new(80, 24);
        render_session(&session, &mut canvas);
        println!("{canvas}");
        log::debug!("Final state: {}", serde_json::to_string(&session.snapshot())?);

        println!(
            "Final score: {} ({} frames, seed {})",
            session.score(),
            session.frame(),
            seed
        );
        Ok(session.score())
    }

    fn clock_seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn args(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        #[test]
        fn test_parse_options() {
            let options = Options::parse(args(&["--seed", "12", "--frames", "500", "--manual"])).unwrap();
            assert_eq!(options.seed, Some(12));
            assert_eq!(options.max_frames, 500);
            assert!(options.manual);
            assert!(options.settings.is_none());

            assert!(Options::parse(args(&["--seed"])).is_err());
            assert!(Options::parse(args(&["--bogus"])).is_err());
        }

        #[test]
        fn test_manual_run_falls_out() {
            let options = Options {
                settings: None,
                seed: Some(4),
                max_frames: 1000,
                manual: true,
            };
            assert_eq!(run(options).unwrap(), 0);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();
    log::info!("Flap Gap (native, headless) starting...");

    let options = match native::Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("{msg}");
            return std::process::ExitCode::from(2);
        }
    };

    match native::run(options) {
        Ok(_) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}

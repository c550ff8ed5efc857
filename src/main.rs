//! Toddler Games entry point
//!
//! In the browser this wires one game to the page's canvas, pointer events
//! and toggle buttons. Natively it plays a game headlessly with random taps,
//! which is handy for eyeballing the logs.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, PointerEvent, Window};

    use toddler_games::audio::Synthesizer;
    use toddler_games::games::{self, GameKind, Playable};
    use toddler_games::platform::web::{drive, pointer_position};
    use toddler_games::platform::FrameClock;
    use toddler_games::renderer::CanvasRenderer;
    use toddler_games::settings::{LocalStorage, Preferences};
    use toddler_games::sim::Feedback;
    use toddler_games::speech::Announcer;
    use toddler_games::strings::StringTable;

    /// Canvas element id the page must provide
    const CANVAS_ID: &str = "play";
    const SOUND_TOGGLE_ID: &str = "sound-toggle";
    const SPEECH_TOGGLE_ID: &str = "speech-toggle";

    /// Page state shared by the frame loop and event handlers
    struct App {
        game: Box<dyn Playable>,
        renderer: CanvasRenderer,
        clock: FrameClock,
        pressed: bool,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Some(canvas) = document
            .get_element_by_id(CANVAS_ID)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::warn!("No <canvas id=\"{}\"> on this page", CANVAS_ID);
            return;
        };
        let Some(mut renderer) = CanvasRenderer::new(canvas.clone()) else {
            return;
        };

        let kind = select_game(&window, &document);
        let prefs = Rc::new(Preferences::load(Box::new(LocalStorage::open())));
        let strings = Rc::new(StringTable::builtin());
        document.set_title(strings.text(kind.title_key()));

        let feedback = Feedback {
            audio: Rc::new(Synthesizer::for_browser(prefs.clone())),
            speech: Rc::new(Announcer::for_browser(prefs.clone(), &strings.lang)),
            strings,
        };
        let audio = feedback.audio.clone();

        let area = renderer.fit();
        let seed = js_sys::Date::now() as u64;
        log::info!("Starting {} with seed {}", kind.as_str(), seed);

        let app = Rc::new(RefCell::new(App {
            game: games::build(kind, area, feedback, seed),
            renderer,
            clock: FrameClock::new(),
            pressed: false,
        }));

        setup_pointer(&canvas, app.clone(), audio);
        setup_toggles(&document, prefs);
        setup_resize(&window, app.clone());
        setup_lifecycle(&window, app.clone());

        start_loop(app);
    }

    /// `data-game` on `<body>`, else the URL hash, else balloons
    fn select_game(window: &Window, document: &Document) -> GameKind {
        let from_body = document
            .body()
            .and_then(|body| body.get_attribute("data-game"))
            .and_then(|name| GameKind::from_str(&name));
        let from_hash = || {
            window
                .location()
                .hash()
                .ok()
                .and_then(|hash| GameKind::from_str(&hash))
        };
        from_body.or_else(from_hash).unwrap_or_else(|| {
            log::info!("No game selected - defaulting to balloons");
            GameKind::default()
        })
    }

    fn start_loop(app: Rc<RefCell<App>>) {
        let handle = {
            let mut a = app.borrow_mut();
            a.clock.reset();
            a.game.start()
        };
        drive(handle, move |time| {
            let mut a = app.borrow_mut();
            let dt = a.clock.delta(time);
            a.game.frame(dt);
            let scene = a.game.scene();
            a.renderer.draw(&scene);
        });
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>, audio: Rc<Synthesizer>) {
        // Pointer down - tap, and unlock audio on the first gesture
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                audio.resume();
                let _ = canvas_clone.set_pointer_capture(event.pointer_id());
                let (x, y) = pointer_position(&event);
                let mut a = app.borrow_mut();
                a.pressed = true;
                a.game.handle_pointer(x, y);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer move - only counts while pressed
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut a = app.borrow_mut();
                if a.pressed {
                    let (x, y) = pointer_position(&event);
                    a.game.handle_drag(x, y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up / cancel
        for name in ["pointerup", "pointercancel"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                app.borrow_mut().pressed = false;
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Wire the optional sound/speech buttons to the preferences
    fn setup_toggles(document: &Document, prefs: Rc<Preferences>) {
        let toggles: [(&str, fn(&Preferences) -> bool, fn(&Preferences) -> bool); 2] = [
            (SOUND_TOGGLE_ID, Preferences::sound_enabled, Preferences::toggle_sound),
            (SPEECH_TOGGLE_ID, Preferences::speech_enabled, Preferences::toggle_speech),
        ];

        for (id, current, toggle) in toggles {
            let Some(button) = document.get_element_by_id(id) else {
                continue;
            };
            show_toggle(&button, current(&prefs));

            let prefs = prefs.clone();
            let button_clone = button.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let enabled = toggle(&prefs);
                show_toggle(&button_clone, enabled);
            });
            let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn show_toggle(button: &web_sys::Element, enabled: bool) {
        let _ = button.set_attribute("aria-pressed", if enabled { "true" } else { "false" });
        let _ = button.class_list().toggle_with_force("off", !enabled);
    }

    fn setup_resize(window: &Window, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut a = app.borrow_mut();
            let area = a.renderer.fit();
            a.game.resize(area);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Stop on `pagehide`; restart if the page comes back from the cache
    fn setup_lifecycle(window: &Window, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().game.stop();
            });
            let _ =
                window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let running = app.borrow().game.is_running();
                if !running {
                    log::info!("Page restored - restarting");
                    start_loop(app.clone());
                }
            });
            let _ =
                window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulated seconds of headless play
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_SECONDS: u32 = 30;
/// Headless frame rate
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_FPS: u32 = 60;
/// Frames between simulated taps
#[cfg(not(target_arch = "wasm32"))]
const TAP_EVERY: u32 = 20;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::rc::Rc;

    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use toddler_games::games::{self, GameKind};
    use toddler_games::sim::{Feedback, PointerOutcome};
    use toddler_games::{PlayArea, Preferences};

    env_logger::init();

    let arg = std::env::args().nth(1);
    let kind = match arg.as_deref() {
        Some(name) => match GameKind::from_str(name) {
            Some(kind) => kind,
            None => {
                eprintln!("Unknown game '{}'. Try one of:", name);
                for kind in GameKind::ALL {
                    eprintln!("  {}", kind.as_str());
                }
                std::process::exit(2);
            }
        },
        None => GameKind::default(),
    };

    log::info!("Toddler Games (native) - headless {}", kind.as_str());
    log::info!("The browser build is the real thing - run with `trunk serve`");

    let prefs = Rc::new(Preferences::in_memory());
    let area = PlayArea::default();
    let mut game = games::build(kind, area, Feedback::silent(prefs), 1);
    let mut taps = Pcg32::seed_from_u64(2);

    let (mut hits, mut painted, mut misses) = (0u32, 0u32, 0u32);
    let mut peak = 0usize;
    game.start();
    for frame in 0..HEADLESS_SECONDS * HEADLESS_FPS {
        game.frame(1000.0 / HEADLESS_FPS as f64);
        peak = peak.max(game.live_count());
        if frame % TAP_EVERY == 0 {
            let x = taps.random_range(0.0..area.width);
            let y = taps.random_range(0.0..area.height);
            match game.handle_pointer(x, y) {
                PointerOutcome::Hit(_) => hits += 1,
                PointerOutcome::Painted(_) => painted += 1,
                PointerOutcome::Miss => misses += 1,
            }
        }
    }
    game.stop();

    println!(
        "{}: {} hits, {} painted, {} misses, peak {} live",
        kind.as_str(),
        hits,
        painted,
        misses,
        peak
    );
}

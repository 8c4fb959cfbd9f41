//! Bouncy Balls entry point
//!
//! On the web: draws into `#canvas` at the display's frame rate.
//! Natively: runs a headless session against a recording surface.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use bouncy_balls::platform::WallClock;
    use bouncy_balls::platform::web::AnimationFrameScheduler;
    use bouncy_balls::renderer::CanvasSurface;
    use bouncy_balls::sim::BallWorld;
    use bouncy_balls::{LifecycleController, Settings};

    type App = LifecycleController<BallWorld<WallClock>, CanvasSurface, AnimationFrameScheduler>;

    fn window_size(window: &web_sys::Window) -> (u32, u32) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (w as u32, h as u32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bouncy Balls starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let mut settings = Settings::load();
        // Persist before seeding so the stored copy keeps picking fresh seeds.
        settings.save();
        let seed = *settings.seed.get_or_insert(js_sys::Date::now() as u64);
        log::info!("Scatter seed: {}", seed);

        let surface = CanvasSurface::new(canvas, &settings).expect("no 2d context");
        let engine = BallWorld::new(settings.clone(), WallClock::new());
        let scheduler = AnimationFrameScheduler::new();
        let app: Rc<RefCell<App>> = Rc::new(RefCell::new(LifecycleController::new(
            engine,
            surface,
            scheduler.clone(),
        )));

        {
            let app = app.clone();
            scheduler.set_callback(move |_time: f64| {
                // Faults are logged by the controller; the loop just ends.
                let _ = app.borrow_mut().render_frame();
            });
        }

        setup_resize(app.clone());
        if settings.pause_on_blur {
            setup_focus(app.clone());
        }

        let (width, height) = window_size(&window);
        if let Err(e) = app.borrow_mut().initialize(width, height) {
            log::error!("Failed to start frame loop: {}", e);
            return;
        }

        log::info!("Bouncy Balls running!");
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = window_size(&window);
            if let Err(e) = app.borrow_mut().on_resize(width, height) {
                log::error!("Resize failed: {}", e);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_focus(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        // Window blur (click outside, tab switch)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                if let Err(e) = app.borrow_mut().on_focus_lost() {
                    log::error!("Pausing failed: {}", e);
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window focus
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                if let Err(e) = app.borrow_mut().on_focus_regained() {
                    log::error!("Resuming failed: {}", e);
                }
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use bouncy_balls::platform::{ManualScheduler, ManualTime};
    use bouncy_balls::renderer::RecordingSurface;
    use bouncy_balls::sim::BallWorld;
    use bouncy_balls::{IntegrationFault, LifecycleController, Settings, with_ball_set};

    const FRAME_DT: f64 = 1.0 / 60.0;
    const FRAMES: u32 = 600;

    /// Host events injected at fixed frames
    fn host_event(
        app: &mut LifecycleController<BallWorld<ManualTime>, RecordingSurface, ManualScheduler>,
        frame: u32,
    ) -> Result<(), IntegrationFault> {
        match frame {
            200 => app.on_resize(640, 480),
            300 => app.on_focus_lost(),
            400 => app.on_focus_regained(),
            _ => Ok(()),
        }
    }

    pub fn run() {
        let mut settings = Settings::load();
        settings.seed.get_or_insert(1);

        let time = ManualTime::new(0.0);
        let engine = BallWorld::new(settings, time.clone());
        let mut app =
            LifecycleController::new(engine, RecordingSurface::new(), ManualScheduler::new());

        if let Err(e) = app.initialize(800, 600) {
            log::error!("Failed to start frame loop: {}", e);
            return;
        }

        for frame in 0..FRAMES {
            if let Err(e) = host_event(&mut app, frame) {
                log::error!("Host event failed: {}", e);
                return;
            }

            time.advance(FRAME_DT);
            app.surface_mut().reset();
            match app.pump() {
                Some(Ok(_)) => {}
                Some(Err(_)) => return,
                None => break,
            }

            if frame % 60 == 0 {
                let stats = with_ball_set(app.engine(), |balls| {
                    let total: f32 = balls.iter().map(|b| b.velocity.length()).sum();
                    (balls.count(), total / balls.count().max(1) as f32)
                });
                if let Ok((count, mean_speed)) = stats {
                    log::info!(
                        "frame {:>3}: {} balls, mean speed {:.1} px/s, focused: {}",
                        frame,
                        count,
                        mean_speed,
                        app.is_focused()
                    );
                }
            }
        }

        let (width, height) = app.surface().size();
        println!(
            "Rendered {} frames at {}x{}, {} circles in the last frame",
            app.frames(),
            width,
            height,
            app.surface().last_frame_circles().len()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bouncy Balls (native) starting...");
    log::info!("Native mode runs headless - build for wasm32 to draw in a browser");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

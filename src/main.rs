//! Rail shooter entry point
//!
//! On the web this wires the three canvases, loads the sprites and drives the
//! loop from `requestAnimationFrame`. Natively it runs a headless round
//! against recording surfaces and logs the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlImageElement, KeyboardEvent};

    use rail_shooter::assets::{ImageAsset, ImageStore, SpriteId};
    use rail_shooter::renderer::{CanvasSurface, Layers, SpriteImages};
    use rail_shooter::sim::InputEvent;
    use rail_shooter::{GameError, GameLoop, Settings};

    const FIELD_CANVAS: &str = "foregroundCanvas";
    const RAIL_CANVAS: &str = "playerCanvas";
    const STATUS_CANVAS: &str = "statsCanvas";

    struct App {
        game: GameLoop,
        assets: ImageStore,
        layers: Layers<CanvasSurface>,
    }

    fn to_js(e: GameError) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Rail shooter starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let settings = Settings::default();

        let mut elements = HashMap::new();
        for id in SpriteId::ALL {
            elements.insert(id, HtmlImageElement::new()?);
        }
        let images: SpriteImages = Rc::new(elements);

        let layers = Layers {
            field: CanvasSurface::from_element_id(
                &document,
                FIELD_CANVAS,
                settings.field,
                images.clone(),
            )
            .map_err(to_js)?,
            rail: CanvasSurface::from_element_id(
                &document,
                RAIL_CANVAS,
                settings.rail,
                images.clone(),
            )
            .map_err(to_js)?,
            status: CanvasSurface::from_element_id(
                &document,
                STATUS_CANVAS,
                settings.status,
                images.clone(),
            )
            .map_err(to_js)?,
        };

        let assets = ImageStore::new();
        let seed = js_sys::Date::now() as u64;
        let game = GameLoop::new(settings, &assets, seed).map_err(to_js)?;
        log::info!("Seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            assets,
            layers,
        }));

        setup_input_handlers(&window, app.clone())?;
        load_images(&images, app);
        Ok(())
    }

    /// Start the loop once the last image has arrived
    fn load_images(images: &SpriteImages, app: Rc<RefCell<App>>) {
        for (&id, image) in images.iter() {
            let app = app.clone();
            let closure = Closure::<dyn FnMut()>::new(move || {
                let ready = {
                    let mut a = app.borrow_mut();
                    let App {
                        game,
                        assets,
                        layers,
                    } = &mut *a;
                    if !assets.mark_loaded(id) {
                        return;
                    }
                    match game.start(assets, layers) {
                        Ok(()) => true,
                        Err(e) => {
                            log::error!("Failed to start: {}", e);
                            false
                        }
                    }
                };
                if ready {
                    request_animation_frame(app.clone());
                }
            });
            image.set_onload(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
            image.set_src(ImageAsset::for_id(id).path);
        }
    }

    fn setup_input_handlers(window: &web_sys::Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(input) = InputEvent::key_down(&event.key()) {
                    event.prevent_default();
                    app.borrow_mut().game.queue_input(input);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(input) = InputEvent::key_up(&event.key()) {
                    event.prevent_default();
                    app.borrow_mut().game.queue_input(input);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        let again = {
            let mut a = app.borrow_mut();
            let App { game, layers, .. } = &mut *a;
            game.frame(layers)
        };

        if again {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use rail_shooter::assets::ImageStore;
    use rail_shooter::renderer::{Layers, RecordingSurface};
    use rail_shooter::sim::{Action, InputEvent};
    use rail_shooter::{FixedTicker, GameLoop, Settings, Ticker};

    /// Frames in one headless round, ten seconds at 60 Hz
    const HEADLESS_FRAMES: u64 = 600;

    env_logger::init();
    log::info!("Rail shooter (native) starting...");
    log::info!("Native mode runs headless - build for wasm32 to play in a browser");

    let settings = match std::env::var_os("RAIL_SHOOTER_SETTINGS") {
        Some(path) => {
            log::info!("Loading settings from {}", path.to_string_lossy());
            Settings::from_json(&std::fs::read_to_string(&path)?)?
        }
        None => Settings::default(),
    };

    let mut layers = Layers {
        field: RecordingSurface::new(settings.field.width, settings.field.height),
        rail: RecordingSurface::new(settings.rail.width, settings.rail.height),
        status: RecordingSurface::new(settings.status.width, settings.status.height),
    };

    let assets = ImageStore::preloaded();
    let mut game = GameLoop::new(settings, &assets, 0x5eed)?;
    game.start(&assets, &mut layers)?;
    game.queue_input(InputEvent::Pressed(Action::Fire));

    // Drop each frame's recorded commands so memory stays flat
    let mut ticker = FixedTicker::new(HEADLESS_FRAMES);
    let mut frames = 0u64;
    let mut commands = 0usize;
    while ticker.next_frame() && game.frame(&mut layers) {
        frames += 1;
        for layer in [&mut layers.field, &mut layers.rail, &mut layers.status] {
            commands += layer.commands.len();
            layer.reset();
        }
    }
    game.stop();

    let field = game.field();
    let shots = field.player_bullets().stats();
    let enemy = field.enemy_bullets().stats();
    log::info!(
        "Ran {} frames ({} draw calls): score {}, life {}, shots {} fired / {} dropped, enemy shots {}",
        frames,
        commands,
        field.score(),
        field.player().life,
        shots.accepted,
        shots.dropped,
        enemy.accepted
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

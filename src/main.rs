//! Chaos Blender entry point
//!
//! Browser bootstrap plus a native stub. The page provides the DOM; this
//! binary owns the game, exposes the player commands to JS, and projects
//! the current state into a few well-known element ids each frame.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;

    use chaos_blender::api::{DEFAULT_API_BASE, GameApi, HttpApi};
    use chaos_blender::audio::{AudioManager, SoundEffect};
    use chaos_blender::color;
    use chaos_blender::consts::{JAR_OUTLINE_DARKEN, OBJECT_CHOICES, PARTICLE_GRADIENT_STEPS};
    use chaos_blender::game::{BlendController, BlendOutcome, SelectionChange};
    use chaos_blender::leaderboard::{self, LEADERBOARD_LIMIT, LeaderboardView};
    use chaos_blender::session::{self, LocalStorageStore};
    use chaos_blender::types::BlendRequest;

    /// Game instance holding all state
    struct Game {
        controller: BlendController,
        leaderboard: LeaderboardView,
        api: Rc<HttpApi>,
        audio: AudioManager,
    }

    thread_local! {
        static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    fn with_game(f: impl FnOnce(Rc<RefCell<Game>>)) {
        let game = GAME.with(|slot| slot.borrow().clone());
        match game {
            Some(game) => f(game),
            None => log::warn!("Game not initialized yet"),
        }
    }

    fn alert(message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    /// Backend base URL, overridable via `<body data-api-url="...">`
    fn api_base_url() -> String {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
            .and_then(|b| b.get_attribute("data-api-url"))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Chaos Blender starting...");

        let mut store = LocalStorageStore;
        let session_id =
            session::get_or_create_session_id(&mut store, js_sys::Date::now() as u64);
        let api = Rc::new(HttpApi::new(api_base_url()));
        let mut controller = BlendController::new(session_id.clone());

        // Load failures leave the empty default state; the game stays
        // interactive and the first blend creates the session server-side
        match api.fetch_session(&session_id).await {
            Ok(response) => controller.apply_session(response),
            Err(e) => log::error!("Error loading session: {e}"),
        }
        match api
            .random_objects(controller.state().blend_count, OBJECT_CHOICES)
            .await
        {
            Ok(objects) => controller.set_available(objects),
            Err(e) => log::error!("Error loading objects: {e}"),
        }

        let game = Rc::new(RefCell::new(Game {
            controller,
            leaderboard: LeaderboardView::new(),
            api,
            audio: AudioManager::new(),
        }));
        GAME.with(|slot| *slot.borrow_mut() = Some(game.clone()));

        // Hide loading indicator
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            if let Some(loading) = document.get_element_by_id("loading") {
                let _ = loading.set_attribute("class", "hidden");
            }
        }

        start_frame_loop(game);
    }

    fn request_animation_frame(f: &Closure<dyn FnMut()>) {
        web_sys::window()
            .expect("no window")
            .request_animation_frame(f.as_ref().unchecked_ref())
            .expect("requestAnimationFrame failed");
    }

    /// Drive the settle timer and re-render every frame
    fn start_frame_loop(game: Rc<RefCell<Game>>) {
        let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(Closure::new(move || {
            {
                let mut game = game.borrow_mut();
                game.controller.tick();
                render(&game);
            }
            if let Some(f) = f.borrow().as_ref() {
                request_animation_frame(f);
            }
        }));
        if let Some(f) = g.borrow().as_ref() {
            request_animation_frame(f);
        }
    }

    fn set_text(document: &web_sys::Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Pure projection of game state into the page
    fn render(game: &Game) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let controller = &game.controller;

        set_text(
            &document,
            "blend-count",
            &controller.state().blend_count.to_string(),
        );

        let scores: Vec<String> = controller
            .state()
            .scores
            .iter()
            .map(|(system, total)| {
                format!("{}: {total:.1}", leaderboard::format_system_name(system))
            })
            .collect();
        set_text(&document, "scores", &scores.join("\n"));

        let names: Vec<&str> = controller
            .selection()
            .objects()
            .iter()
            .map(|o| o.name.as_str())
            .collect();
        set_text(&document, "selection", &names.join(" + "));

        match controller.feedback() {
            Some(feedback) => {
                let mut lines = feedback.score_lines();
                for system in &feedback.new_systems {
                    lines.push(format!(
                        "NEW SYSTEM: {}",
                        leaderboard::format_system_name(system)
                    ));
                }
                for object in &feedback.new_objects {
                    lines.push(format!("NEW OBJECT: {}", object.name));
                }
                set_text(&document, "feedback", &lines.join("\n"));
            }
            None => set_text(&document, "feedback", ""),
        }

        if let Some(button) = document.get_element_by_id("blend-button") {
            button.set_text_content(Some(if controller.is_blending() {
                "BLENDING..."
            } else {
                "BLEND IT!"
            }));
            if controller.can_blend() {
                let _ = button.remove_attribute("disabled");
            } else {
                let _ = button.set_attribute("disabled", "disabled");
            }
        }

        if let Some(jar) = document.get_element_by_id("jar") {
            let mixed = controller.mixed_color();
            let outline = color::adjust_brightness(&mixed, JAR_OUTLINE_DARKEN);
            let ramp =
                color::color_gradient(&controller.selection().colors(), PARTICLE_GRADIENT_STEPS);
            let fill = if ramp.len() > 1 {
                format!("linear-gradient({})", ramp.join(", "))
            } else {
                mixed
            };
            let _ = jar.set_attribute(
                "style",
                &format!("background: {fill}; border-color: {outline};"),
            );
        }
    }

    /// Refresh the object tray for the current blend count
    fn reload_objects(game: Rc<RefCell<Game>>) {
        let (api, blend_count) = {
            let g = game.borrow();
            (g.api.clone(), g.controller.state().blend_count)
        };
        spawn_local(async move {
            match api.random_objects(blend_count, OBJECT_CHOICES).await {
                Ok(objects) => game.borrow_mut().controller.set_available(objects),
                Err(e) => log::error!("Error loading objects: {e}"),
            }
        });
    }

    fn load_entries(game: Rc<RefCell<Game>>) {
        let (api, system) = {
            let g = game.borrow();
            match g.leaderboard.selected() {
                Some(system) => (g.api.clone(), system.to_string()),
                None => return,
            }
        };
        spawn_local(async move {
            match api.leaderboard(&system, LEADERBOARD_LIMIT).await {
                Ok(board) => game.borrow_mut().leaderboard.apply_entries(board.entries),
                Err(e) => {
                    log::error!("Error loading leaderboard: {e}");
                    game.borrow_mut().leaderboard.apply_entries(Vec::new());
                }
            }
        });
    }

    // === Player commands, called from the page ===

    /// Toggle an object in or out of the selection
    #[wasm_bindgen]
    pub fn select_object(id: u32) {
        with_game(|game| {
            let mut g = game.borrow_mut();
            let Some(object) = g.controller.find_available(id).cloned() else {
                log::warn!("select_object: unknown object {id}");
                return;
            };
            if g.controller.toggle_select(&object) == SelectionChange::Added {
                g.audio.resume();
                g.audio.play(SoundEffect::Select);
            }
        });
    }

    /// Blend the current selection
    #[wasm_bindgen]
    pub fn blend() {
        with_game(|game| {
            let ticket = match game.borrow_mut().controller.start_blend() {
                Ok(ticket) => ticket,
                Err(e) => {
                    log::warn!("Blend refused: {e}");
                    return;
                }
            };

            {
                let g = game.borrow();
                g.audio.resume();
                g.audio.play(SoundEffect::Blend);
            }

            let api = game.borrow().api.clone();
            spawn_local(async move {
                let request = BlendRequest {
                    session_id: ticket.session_id.clone(),
                    object_ids: ticket.object_ids.clone(),
                };
                let result = api.blend(&request).await;
                let outcome = game.borrow_mut().controller.finish_blend(&ticket, result);
                match outcome {
                    BlendOutcome::Applied { unlocked } => {
                        if unlocked {
                            game.borrow().audio.play(SoundEffect::Unlock);
                        }
                        reload_objects(game.clone());
                    }
                    BlendOutcome::Failed(_) => {
                        alert("Failed to blend objects. Please try again.");
                    }
                    BlendOutcome::Stale => {}
                }
            });
        });
    }

    /// Start a fresh session, discarding all progress
    #[wasm_bindgen]
    pub fn reset_game() {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message("Are you sure you want to reset your game?")
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        with_game(|game| {
            let mut store = LocalStorageStore;
            game.borrow_mut()
                .controller
                .reset(&mut store, js_sys::Date::now() as u64);
            reload_objects(game);
        });
    }

    /// Load board tabs (falling back to the session's own systems) and the
    /// first board's entries
    #[wasm_bindgen]
    pub fn open_leaderboard() {
        with_game(|game| {
            let api = game.borrow().api.clone();
            spawn_local(async move {
                let systems = match api.available_leaderboards().await {
                    Ok(systems) => systems,
                    Err(e) => {
                        // Expected early on, before anyone has submitted
                        log::warn!("Error loading leaderboards: {e}");
                        Vec::new()
                    }
                };
                {
                    let mut guard = game.borrow_mut();
                    let g = &mut *guard;
                    g.leaderboard.apply_systems(systems, &g.controller.state().scores);
                }
                load_entries(game.clone());
            });
        });
    }

    /// Switch the visible board
    #[wasm_bindgen]
    pub fn choose_board(system: String) {
        with_game(|game| {
            if game.borrow_mut().leaderboard.select_system(&system) {
                load_entries(game);
            }
        });
    }

    /// Submit the session's scores under the given player name
    #[wasm_bindgen]
    pub fn submit_score(name: String) {
        with_game(|game| {
            let player_name = match leaderboard::validate_player_name(&name) {
                Ok(trimmed) => trimmed.to_string(),
                Err(e) => {
                    alert(&e.to_string());
                    return;
                }
            };
            let (api, session_id) = {
                let g = game.borrow();
                (g.api.clone(), g.controller.session_id().to_string())
            };
            spawn_local(async move {
                match api.submit_score(&session_id, &player_name).await {
                    Ok(()) => {
                        game.borrow_mut().leaderboard.mark_submitted(&player_name);
                        alert("Scores submitted successfully!");
                        load_entries(game.clone());
                    }
                    Err(e) => {
                        log::error!("Error submitting scores: {e}");
                        alert("Failed to submit scores. Please try again.");
                    }
                }
            });
        });
    }

    // === JSON views for page-side rendering ===

    /// Object tray as JSON, for the page to draw selection buttons from
    #[wasm_bindgen]
    pub fn objects_json() -> String {
        let mut out = "[]".to_string();
        with_game(|game| {
            let g = game.borrow();
            if let Ok(json) = serde_json::to_string(g.controller.available_objects()) {
                out = json;
            }
        });
        out
    }

    /// Leaderboard modal state as JSON
    #[wasm_bindgen]
    pub fn leaderboard_json() -> String {
        let mut out = "{}".to_string();
        with_game(|game| {
            let g = game.borrow();
            let lb = &g.leaderboard;
            let value = serde_json::json!({
                "systems": lb.systems(),
                "selected": lb.selected(),
                "entries": lb.entries(),
                "submitted_as": lb.submitted_as(),
            });
            out = value.to_string();
        });
        out
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Chaos Blender (native) starting...");
    log::info!("The game targets the browser - run with `trunk serve` for the web version");

    println!("\nRunning color mixing smoke test...");
    smoke_test_color_mixing();
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_test_color_mixing() {
    use chaos_blender::color::{color_gradient, mix_colors};

    assert_eq!(mix_colors(&["#000000", "#ffffff"]), "#808080");
    let ramp = color_gradient(&["#000000", "#ffffff"], 2);
    assert_eq!(ramp, vec!["#000000", "#808080", "#ffffff"]);
    println!("✓ Color mixing smoke test passed!");
}

mod audio;
mod input;
mod kitchen;
mod logging;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use audio::CueSound;
use input::{ClickState, InputEvent};
use kitchen::config::KitchenConfig;
use kitchen::KitchenGame;
use time::FrameClock;

/// localStorage key holding an optional JSON override of [`KitchenConfig`].
const CONFIG_STORAGE_KEY: &str = "hellish_kitchen_config";

fn load_config() -> KitchenConfig {
    let Some(raw) = read_config_override() else {
        return KitchenConfig::default();
    };
    match KitchenConfig::from_json(&raw) {
        Ok(config) => {
            tracing::info!(?config, "loaded kitchen config override");
            config
        }
        Err(err) => {
            tracing::warn!(%err, "ignoring kitchen config override");
            KitchenConfig::default()
        }
    }
}

fn read_config_override() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(CONFIG_STORAGE_KEY).ok()?
}

/// Query the grid container's bounding rect and find the action under the pointer.
fn dom_pixel_to_action(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<u16> {
    let document = web_sys::window()?.document()?;
    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();
    cs.hit_test_pixel(
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
    )
}

fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    logging::init();

    let seed = js_sys::Date::now() as u64;
    let game = Rc::new(RefCell::new(KitchenGame::new(load_config(), seed)));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }
            let action = dom_pixel_to_action(mouse_event.x, mouse_event.y, &click_state.borrow());
            if let Some(id) = action {
                game.borrow_mut().handle_input(&InputEvent::Click(id));
            }
        }
    });

    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let event = match key_event.code {
                KeyCode::Char(c) => InputEvent::Key(c),
                KeyCode::Enter => InputEvent::Key('\n'),
                _ => return,
            };
            game.borrow_mut().handle_input(&event);
        }
    });

    let sound = CueSound::new();
    let mut clock = FrameClock::new();
    terminal.draw_web(move |f| {
        let mut game = game.borrow_mut();
        game.tick(clock.update(performance_now()));

        let cues = game.take_cues();
        if !game.state.muted {
            for cue in cues {
                sound.play(cue);
            }
        }

        let area = f.area();
        click_state.borrow_mut().begin_frame(area.width, area.height);
        game.render(f, area, &click_state);
    });

    Ok(())
}

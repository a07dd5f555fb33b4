//! Host glue for the falling-food game: canvas acquisition, keyboard /
//! reset / resize listeners, the requestAnimationFrame loop and the per-frame
//! tick. All gameplay rules live in [`sim`]; all drawing lives in `render`.
//!
//! The loop deliberately separates "is the game over" from "request another
//! frame": each pass asks the session [`sim::Session::should_continue`] and
//! only then re-registers the callback. Reset restarts scheduling when the
//! loop has stopped.
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, window};

use rand::SeedableRng;
use rand_pcg::Pcg32;

mod render;
pub mod sim;

use sim::{Dir, Session};

const CANVAS_ID: &str = "game-canvas";
const DEFAULT_WIDTH: u32 = 480;
const DEFAULT_HEIGHT: u32 = 640;

/// Runtime state: the session plus the host handles needed each frame.
struct GameState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    session: Session,
    rng: Pcg32,
    // True while a frame callback is registered; reset uses this to know
    // whether scheduling must be restarted.
    loop_active: bool,
}

// RefCell::new isn't const on this toolchain; allow Clippy lint until a const initializer is feasible.
thread_local! {
    static GAME_STATE: std::cell::RefCell<Option<GameState>> = std::cell::RefCell::new(None);
}

type FrameCallback = std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub fn start() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Reuse the host's canvas when present, otherwise create one.
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(CANVAS_ID);
        c.set_width(DEFAULT_WIDTH);
        c.set_height(DEFAULT_HEIGHT);
        c.set_attribute("style", "position:fixed; left:50%; top:50%; transform:translate(-50%,-50%); box-shadow:0 0 32px 0 rgba(0,0,0,0.18); border-radius:12px; border:2px solid #222; background:#181818;").ok();
        doc.body().unwrap().append_child(&c)?;
        c
    };
    let ctx: CanvasRenderingContext2d = canvas.get_context("2d")?.unwrap().dyn_into()?;

    let now = win.performance().map(|p| p.now()).unwrap_or(0.0);
    let state = GameState {
        canvas: canvas.clone(),
        ctx,
        session: Session::new(canvas.width() as f64, canvas.height() as f64),
        rng: Pcg32::seed_from_u64(now as u64),
        loop_active: false,
    };
    GAME_STATE.with(|cell| cell.replace(Some(state)));

    // Ensure score overlay exists (top-left)
    if doc.get_element_by_id("score-display").is_none() {
        if let Some(body) = doc.body() {
            let div = doc.create_element("div")?;
            div.set_id("score-display");
            div.set_text_content(Some("Score: 0"));
            div.set_attribute("style", "position:fixed; top:10px; left:12px; font-family:'Fira Code', monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#ffd166; z-index:45; letter-spacing:0.5px;").ok();
            body.append_child(&div)?;
        }
    }

    // Keyboard listener: ArrowLeft / ArrowRight steer the paddle, anything
    // else is silently ignored. Input applies between frames.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            GAME_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    match evt.key().as_str() {
                        "ArrowLeft" => state.session.steer(Dir::Left),
                        "ArrowRight" => state.session.steer(Dir::Right),
                        _ => {}
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Reset button (optional host element): reinitialize the session and, if
    // the loop has stopped on game over, resume scheduling.
    if let Some(btn) = doc.get_element_by_id("reset-button") {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            let resume = GAME_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    state.session.reset();
                    !state.loop_active
                } else {
                    false
                }
            });
            if resume {
                start_frame_loop();
            }
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Resize listener: re-clamp the paddle into the new bounds right away.
    {
        let closure = Closure::wrap(Box::new(move || {
            GAME_STATE.with(|cell| {
                if let Some(state) = cell.borrow_mut().as_mut() {
                    let w = state.canvas.width() as f64;
                    let h = state.canvas.height() as f64;
                    state.session.resize(w, h);
                }
            });
        }) as Box<dyn FnMut()>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_frame_loop();
    Ok(())
}

fn start_frame_loop() {
    let f: FrameCallback = std::rc::Rc::new(std::cell::RefCell::new(None));
    let g = f.clone();
    GAME_STATE.with(|cell| {
        if let Some(state) = cell.borrow_mut().as_mut() {
            state.loop_active = true;
        }
    });
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        let keep_going = GAME_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                frame_tick(state, ts);
                let cont = state.session.should_continue();
                state.loop_active = cont;
                cont
            } else {
                false
            }
        });
        if keep_going {
            if let Some(w) = window() {
                let _ =
                    w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

fn frame_tick(state: &mut GameState, _ts: f64) {
    // Re-read canvas dimensions every frame; a resize between frames must be
    // seen before this frame's spawn / clamp computations.
    let w = state.canvas.width() as f64;
    let h = state.canvas.height() as f64;
    if w != state.session.width || h != state.session.height {
        state.session.resize(w, h);
    }

    state.session.frame(&mut state.rng);
    render::draw(&state.ctx, &state.session);

    // Keep the DOM score overlay updated each frame
    if let Some(doc) = window().and_then(|w| w.document()) {
        if let Some(el) = doc.get_element_by_id("score-display") {
            el.set_text_content(Some(&format!("Score: {}", state.session.score)));
        }
    }
}

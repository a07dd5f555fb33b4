//! Canvas renderer: background gradient, paddle, food circles, timer bar,
//! score text and the game-over overlay. Side effects are confined to the 2d
//! context; nothing here mutates the session.

use web_sys::CanvasRenderingContext2d;

use super::sim::{PLAYER_COLOR, Phase, Session, TIME_MAX};

const TIMER_BAR_COLOR: &str = "#00C853";
const TIMER_BAR_HEIGHT: f64 = 20.0;
const BG_TOP: &str = "#90CAF9";
const BG_BOTTOM: &str = "#64B5F6";

pub fn draw(ctx: &CanvasRenderingContext2d, session: &Session) {
    let w = session.width;
    let h = session.height;
    ctx.clear_rect(0.0, 0.0, w, h);

    draw_background(ctx, w, h);

    // Paddle
    ctx.set_fill_style_str(PLAYER_COLOR);
    ctx.fill_rect(session.player.x, session.player.y, session.player.w, session.player.h);

    // Food items
    for item in &session.items {
        let (cx, cy) = item.center();
        ctx.begin_path();
        ctx.arc(cx, cy, item.radius, 0.0, std::f64::consts::TAU).ok();
        ctx.set_fill_style_str(item.color);
        ctx.fill();
    }

    // Timer bar along the bottom, proportional to remaining time
    let bar_w = session.time / TIME_MAX * w;
    ctx.set_fill_style_str(TIMER_BAR_COLOR);
    ctx.fill_rect(0.0, h - TIMER_BAR_HEIGHT, bar_w, TIMER_BAR_HEIGHT);

    // Score readout
    ctx.set_fill_style_str("#FFFFFF");
    ctx.set_font("20px Arial");
    ctx.set_text_align("left");
    ctx.fill_text(&format!("Score: {}", session.score), 12.0, 28.0).ok();

    if session.phase == Phase::Over {
        draw_game_over(ctx, session.score, w, h);
    }
}

fn draw_background(ctx: &CanvasRenderingContext2d, w: f64, h: f64) {
    let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
    gradient.add_color_stop(0.0, BG_TOP).ok();
    gradient.add_color_stop(1.0, BG_BOTTOM).ok();
    ctx.set_fill_style_canvas_gradient(&gradient);
    ctx.fill_rect(0.0, 0.0, w, h);
}

fn draw_game_over(ctx: &CanvasRenderingContext2d, score: u32, w: f64, h: f64) {
    ctx.set_fill_style_str("rgba(0, 0, 0, 0.5)");
    ctx.fill_rect(0.0, 0.0, w, h);

    ctx.set_fill_style_str("#FFFFFF");
    ctx.set_font("40px Arial");
    ctx.set_text_align("center");
    ctx.fill_text("Game Over", w / 2.0, h / 2.0).ok();
    ctx.fill_text(&format!("Final Score: {score}"), w / 2.0, h / 2.0 + 50.0)
        .ok();
}

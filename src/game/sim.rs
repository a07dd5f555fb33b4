//! Falling-food simulation core: session state, spawning, movement,
//! collision / scoring and the Running/Over state machine.
//!
//! Everything in this module is pure Rust with no browser types, so the whole
//! simulation runs under plain `cargo test` on the host. Randomness (spawn
//! decisions, kind and position selection) is injected via `rand::Rng`; the
//! wasm layer passes a `Pcg32` seeded from `performance.now()`, tests pass a
//! fixed-seed generator.

use rand::Rng;

// Gameplay constants.
pub const PLAYER_SIZE: f64 = 40.0;
pub const PLAYER_SPEED: f64 = 10.0;
pub const PLAYER_BOTTOM_MARGIN: f64 = 10.0;
pub const PLAYER_COLOR: &str = "#1E88E5";
pub const FOOD_RADIUS: f64 = 15.0;
pub const FOOD_FALL_SPEED: f64 = 3.0;
/// Per-frame probability of introducing one new food item.
pub const SPAWN_CHANCE: f64 = 0.05;
pub const TIME_MAX: f64 = 100.0;
/// Per-frame countdown decrement, applied independently of catches.
pub const TIME_DECAY: f64 = 0.1;

/// Immutable catalog entry: what a food looks like and how much countdown
/// time catching it restores.
#[derive(Debug)]
pub struct FoodKind {
    pub label: &'static str,
    pub color: &'static str,
    pub time_gain: f64,
}

/// The fixed catalog. Kinds are chosen uniformly at spawn time.
pub const FOOD_KINDS: &[FoodKind] = &[
    FoodKind { label: "apple", color: "#E53935", time_gain: 5.0 },
    FoodKind { label: "banana", color: "#FFD54F", time_gain: 10.0 },
    FoodKind { label: "cake", color: "#795548", time_gain: 15.0 },
    FoodKind { label: "pizza", color: "#FF9800", time_gain: 8.0 },
    FoodKind { label: "burger", color: "#4CAF50", time_gain: 7.0 },
    FoodKind { label: "ice cream", color: "#1976D2", time_gain: 12.0 },
];

/// Horizontal steering input. Unrecognized host keys never reach the sim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dir {
    Left,
    Right,
}

/// The paddle. `x`/`y` is the top-left corner of its rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Player {
    fn new(field_w: f64, field_h: f64) -> Self {
        Self {
            x: (field_w - PLAYER_SIZE) / 2.0,
            y: field_h - PLAYER_SIZE - PLAYER_BOTTOM_MARGIN,
            w: PLAYER_SIZE,
            h: PLAYER_SIZE,
        }
    }

    fn steer(&mut self, dir: Dir, field_w: f64) {
        match dir {
            Dir::Left => self.x -= PLAYER_SPEED,
            Dir::Right => self.x += PLAYER_SPEED,
        }
        self.clamp_x(field_w);
    }

    /// Keep the paddle fully inside `[0, field_w - w]`.
    fn clamp_x(&mut self, field_w: f64) {
        self.x = self.x.clamp(0.0, (field_w - self.w).max(0.0));
    }
}

/// A live falling item. `x`/`y` is the top-left corner of its bounding
/// square; the drawn / collided circle is inscribed in that square. Color and
/// time gain are copied from the chosen [`FoodKind`] at spawn.
#[derive(Clone, Debug, PartialEq)]
pub struct FoodInstance {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: &'static str,
    pub time_gain: f64,
}

impl FoodInstance {
    /// Fresh spawn: uniform kind, uniform x such that the full width fits,
    /// y just above the top edge so the item falls into view.
    fn spawn<R: Rng + ?Sized>(rng: &mut R, field_w: f64) -> Self {
        let kind = &FOOD_KINDS[rng.gen_range(0..FOOD_KINDS.len())];
        let max_x = (field_w - FOOD_RADIUS * 2.0).max(0.0);
        Self {
            x: rng.gen_range(0.0..=max_x),
            y: -FOOD_RADIUS * 2.0,
            radius: FOOD_RADIUS,
            color: kind.color,
            time_gain: kind.time_gain,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.radius, self.y + self.radius)
    }
}

/// Loop state machine. `Running -> Over` fires once, the first frame the
/// countdown is observed at zero; `Over -> Running` only via [`Session::reset`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Over,
}

/// Circle-vs-rectangle overlap test. The circle is tested against the
/// rectangle's extended bands first, then against its nearest corner. This is
/// the exact (non-AABB) predicate, so a circle near a corner only collides
/// when the corner actually falls inside it.
pub fn rect_circle_overlap(
    rx: f64,
    ry: f64,
    rw: f64,
    rh: f64,
    cx: f64,
    cy: f64,
    r: f64,
) -> bool {
    let half_w = rw / 2.0;
    let half_h = rh / 2.0;
    let dist_x = (cx - (rx + half_w)).abs();
    let dist_y = (cy - (ry + half_h)).abs();
    if dist_x > half_w + r || dist_y > half_h + r {
        return false;
    }
    if dist_x <= half_w || dist_y <= half_h {
        return true;
    }
    let dx = dist_x - half_w;
    let dy = dist_y - half_h;
    dx * dx + dy * dy <= r * r
}

/// Does the paddle catch this item right now?
pub fn paddle_catches(player: &Player, item: &FoodInstance) -> bool {
    let (cx, cy) = item.center();
    rect_circle_overlap(player.x, player.y, player.w, player.h, cx, cy, item.radius)
}

/// All mutable per-session state, owned by the loop driver. No ambient
/// globals: reset and tests stay deterministic.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub score: u32,
    pub time: f64,
    pub phase: Phase,
    pub items: Vec<FoodInstance>,
    pub player: Player,
    pub width: f64,
    pub height: f64,
}

impl Session {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            score: 0,
            time: TIME_MAX,
            phase: Phase::Running,
            items: Vec::new(),
            player: Player::new(width, height),
            width,
            height,
        }
    }

    /// Full restart: score, countdown, on-screen items and paddle position
    /// all return to their initial values. Idempotent.
    pub fn reset(&mut self) {
        *self = Session::new(self.width, self.height);
    }

    /// Adopt new playfield dimensions, re-clamping the paddle into bounds.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.player.y = height - PLAYER_SIZE - PLAYER_BOTTOM_MARGIN;
        self.player.clamp_x(width);
    }

    /// Apply one steering input. Host input lands between frames only.
    pub fn steer(&mut self, dir: Dir) {
        let field_w = self.width;
        self.player.steer(dir, field_w);
    }

    /// Scheduler-facing query: request another frame?
    pub fn should_continue(&self) -> bool {
        self.phase == Phase::Running
    }

    fn award_catch(&mut self, gain: f64) {
        self.score += 1;
        self.time = (self.time + gain).clamp(0.0, TIME_MAX);
    }

    /// Advance one frame: spawn, fall, collide & score, countdown decay,
    /// terminal check. The caller renders afterwards.
    pub fn frame<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.phase == Phase::Over {
            return;
        }

        if rng.gen_bool(SPAWN_CHANCE) {
            self.items.push(FoodInstance::spawn(rng, self.width));
        }

        for item in &mut self.items {
            item.y += FOOD_FALL_SPEED;
        }

        // Reverse index order so removal never skips a neighbour.
        for i in (0..self.items.len()).rev() {
            if paddle_catches(&self.player, &self.items[i]) {
                let gain = self.items[i].time_gain;
                self.award_catch(gain);
                self.items.remove(i);
            } else if self.items[i].y > self.height {
                // Fell past the bottom edge: dropped silently, no replacement.
                self.items.remove(i);
            }
        }

        self.time = (self.time - TIME_DECAY).max(0.0);
        if self.time <= 0.0 {
            self.phase = Phase::Over;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn predicate_center_inside_rect() {
        // Player rect {100,100,40,40}, item circle center (120,120) r=15.
        assert!(rect_circle_overlap(100.0, 100.0, 40.0, 40.0, 120.0, 120.0, 15.0));
    }

    #[test]
    fn predicate_far_apart() {
        // Player rect {0,0,40,40}, item square at (100,100) side 30.
        assert!(!rect_circle_overlap(0.0, 0.0, 40.0, 40.0, 115.0, 115.0, 15.0));
    }

    #[test]
    fn predicate_corner_miss_vs_hit() {
        // Circle diagonally off the corner at (40,40): corner distance just
        // over the radius misses, just under hits.
        let r: f64 = 10.0;
        let just_out = 40.0 + (r * r / 2.0).sqrt() + 0.1;
        assert!(!rect_circle_overlap(0.0, 0.0, 40.0, 40.0, just_out, just_out, r));
        let just_in = 40.0 + (r * r / 2.0).sqrt() - 0.1;
        assert!(rect_circle_overlap(0.0, 0.0, 40.0, 40.0, just_in, just_in, r));
    }

    #[test]
    fn catch_clamps_time_to_max() {
        let mut s = Session::new(480.0, 640.0);
        s.score = 5;
        s.time = 50.0;
        s.award_catch(60.0);
        assert_eq!(s.score, 6);
        assert_eq!(s.time, TIME_MAX);
    }

    #[test]
    fn spawn_fits_inside_playfield() {
        let mut r = rng();
        for _ in 0..200 {
            let item = FoodInstance::spawn(&mut r, 480.0);
            assert!(item.x >= 0.0);
            assert!(item.x + item.radius * 2.0 <= 480.0);
            assert_eq!(item.y, -FOOD_RADIUS * 2.0);
            assert!(FOOD_KINDS.iter().any(|k| k.color == item.color));
        }
    }

    #[test]
    fn steer_clamps_both_edges() {
        let mut s = Session::new(480.0, 640.0);
        for _ in 0..200 {
            s.steer(Dir::Left);
        }
        assert_eq!(s.player.x, 0.0);
        for _ in 0..200 {
            s.steer(Dir::Right);
        }
        assert_eq!(s.player.x, 480.0 - PLAYER_SIZE);
    }

    #[test]
    fn mover_does_not_clamp() {
        let mut s = Session::new(480.0, 640.0);
        s.player.y = 10_000.0; // out of reach
        s.items.push(FoodInstance {
            x: 100.0,
            y: 630.0,
            radius: FOOD_RADIUS,
            color: "#E53935",
            time_gain: 5.0,
        });
        let mut r = rng();
        s.frame(&mut r);
        // 630 + 3 < 640: still falling, untouched by scoring.
        assert!(s.items.iter().any(|i| (i.y - 633.0).abs() < 1e-9));
        s.frame(&mut r);
        s.frame(&mut r);
        s.frame(&mut r);
        // 642 > 640: gone, and the miss never scored.
        assert!(s.items.iter().all(|i| i.y < 0.0));
        assert_eq!(s.score, 0);
    }
}

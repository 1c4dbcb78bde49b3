use anyhow::Result;
use egui::{Color32, Pos2};

use crate::environment::pong::algebra_2d::AaBB;
use crate::environment::pong::mechanics::{Assert, PongMechanics, FIELD_HEIGHT, FIELD_WIDTH};
use crate::simulation::Score;

const BACKGROUND: Color32 = Color32::BLACK;
const FOREGROUND: Color32 = Color32::WHITE;
const SCORE_POS_Y: f32 = 20.0;

/// Drawing surface of the presentation layer; coordinates are model grid coordinates
pub trait Canvas {
    fn fill(&mut self, color: Color32);
    fn fill_rect(&mut self, rect: &AaBB, color: Color32);
    /// ellipse inscribed into `bounds`
    fn fill_ellipse(&mut self, bounds: &AaBB, color: Color32);
    fn aa_line(&mut self, from: Pos2, to: Pos2, color: Color32);
    /// text horizontally centered at `anchor`, top aligned
    fn text(&mut self, text: &str, anchor: Pos2, color: Color32);
    /// show everything drawn since the last call
    fn present(&mut self) -> Result<()>;
}

pub fn score_text(score: &Score) -> String {
    format!("Player: {}  Opponent: {}", score.player, score.opponent)
}

/// Draws one frame of the game onto a [Canvas]
pub fn draw_frame(canvas: &mut dyn Canvas, mechanics: &PongMechanics, score: &Score) -> Result<()> {
    mechanics.player.assert();
    mechanics.opponent.assert();

    canvas.fill(BACKGROUND);
    canvas.fill_rect(&mechanics.player.shape, FOREGROUND);
    canvas.fill_rect(&mechanics.opponent.shape, FOREGROUND);
    canvas.fill_ellipse(&mechanics.ball.shape, FOREGROUND);
    let center_x = (FIELD_WIDTH / 2) as f32;
    canvas.aa_line(Pos2::new(center_x, 0.0), Pos2::new(center_x, FIELD_HEIGHT as f32), FOREGROUND);
    canvas.text(&score_text(score), Pos2::new(center_x, SCORE_POS_Y), FOREGROUND);
    canvas.present()
}

//! Draw pass: translates a `GameState` into canvas calls and picking-buffer
//! fills.  No game logic is performed here.

use crate::entities::GameState;
use crate::picking::PickingBuffer;
use crate::surface::{Align, Canvas, Rect, Shade, Sprite, TextStyle};

const SCORE_X: f32 = 150.0;
const SCORE_Y: f32 = 75.0;
/// Offset of the white text from its black shadow.
const HIGHLIGHT_OFFSET: (f32, f32) = (2.0, 5.0);

/// Render one complete frame to both surfaces and publish the picking buffer.
pub fn draw_frame<C: Canvas>(canvas: &mut C, picking: &mut PickingBuffer, state: &GameState) {
    canvas.clear();
    picking.clear();

    draw_score(canvas, state.score);

    for raven in state.ravens.iter().filter(|r| !r.marked_for_deletion) {
        picking.fill_rect(raven.x, raven.y, raven.width, raven.height, raven.color);
        canvas.draw_sprite(
            Sprite::Raven,
            raven.frame,
            Rect { x: raven.x, y: raven.y, w: raven.width, h: raven.height },
        );
    }
    for explosion in state.explosions.iter().filter(|e| !e.marked_for_deletion) {
        canvas.draw_sprite(
            Sprite::Boom,
            explosion.frame,
            Rect { x: explosion.x, y: explosion.y, w: explosion.size, h: explosion.size },
        );
    }

    if state.is_over() {
        draw_game_over(canvas, state);
    }

    picking.present();
}

pub fn draw_score<C: Canvas>(canvas: &mut C, score: u32) {
    draw_shadowed(canvas, &format!("Score: {score}"), SCORE_X, SCORE_Y, Align::Left);
}

pub fn draw_game_over<C: Canvas>(canvas: &mut C, state: &GameState) {
    let message = format!("GAME OVER, your score is {}", state.score);
    draw_shadowed(canvas, &message, state.width / 2.0, state.height / 2.0, Align::Center);
}

fn draw_shadowed<C: Canvas>(canvas: &mut C, text: &str, x: f32, y: f32, align: Align) {
    canvas.draw_text(text, x, y, TextStyle { shade: Shade::Black, align });
    canvas.draw_text(
        text,
        x + HIGHLIGHT_OFFSET.0,
        y + HIGHLIGHT_OFFSET.1,
        TextStyle { shade: Shade::White, align },
    );
}

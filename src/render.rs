use macroquad::prelude::*;

use crate::grid::Cell;
use crate::snapshot::Snapshot;

const HUD_TEXT_SIZE: f32 = 16.0;
const HUD_LINE_HEIGHT: f32 = 20.0;
const AGENT_COLORS: [Color; 4] = [BLUE, GREEN, ORANGE, PURPLE];

/// Draws a snapshot filling the whole window, one square per cell.
pub fn draw_snapshot(snapshot: &Snapshot) {
    clear_background(BLACK);

    let rows = snapshot.rows();
    let cols = snapshot.cols();
    if rows == 0 || cols == 0 {
        return;
    }

    let cell_w = screen_width() / cols as f32;
    let cell_h = screen_height() / rows as f32;
    let cell = cell_w.min(cell_h);

    // board
    for (r, row) in snapshot.grid.iter().enumerate() {
        for (c, kind) in row.iter().enumerate() {
            let x = c as f32 * cell_w;
            let y = r as f32 * cell_h;
            match kind {
                Cell::Destructible => draw_rectangle(x, y, cell_w, cell_h, RED),
                Cell::Indestructible => draw_rectangle(x, y, cell_w, cell_h, GRAY),
                Cell::Empty => draw_rectangle_lines(x, y, cell_w, cell_h, 1.0, WHITE),
            }
        }
    }

    // agents, eliminated ones are hidden
    for agent in snapshot.agents.iter().filter(|a| a.alive) {
        let x = agent.pos.col as f32 * cell_w + cell_w / 2.0;
        let y = agent.pos.row as f32 * cell_h + cell_h / 2.0;
        let color = AGENT_COLORS[agent.id % AGENT_COLORS.len()];
        draw_circle(x, y, cell / 3.0, color);
    }

    // bombs
    for bomb in &snapshot.bombs {
        let x = bomb.pos.col as f32 * cell_w + cell_w / 2.0;
        let y = bomb.pos.row as f32 * cell_h + cell_h / 2.0;
        draw_circle(x, y, cell / 4.0, YELLOW);
    }

    // hud
    for (i, agent) in snapshot.agents.iter().enumerate() {
        let text = format!("Agent {} - Score: {}, Lives: {}", agent.id + 1, agent.score, agent.lives);
        draw_text(&text, 10.0, HUD_LINE_HEIGHT * (i + 1) as f32, HUD_TEXT_SIZE, WHITE);
    }
    let episode_text = format!("Episode {}", snapshot.episode + 1);
    let dims = measure_text(&episode_text, None, HUD_TEXT_SIZE as u16, 1.0);
    draw_text(
        &episode_text,
        screen_width() - dims.width - 10.0,
        HUD_LINE_HEIGHT,
        HUD_TEXT_SIZE,
        WHITE,
    );
}

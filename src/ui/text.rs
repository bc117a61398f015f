//! Line-based front end: a plain-text board renderer and a prompt loop that
//! reads column numbers from any `BufRead`.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};

use crate::config::DisplayConfig;
use crate::game::{Board, Cell, GameOutcome, GameSession};

/// Render the board as a bordered text grid with column numbers on top.
pub fn render_board(board: &Board, glyphs: &DisplayConfig) -> String {
    let columns = board.dimensions().columns;
    let border = format!("+{}", "---+".repeat(columns));

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');

    out.push('|');
    for column in 0..columns {
        out.push_str(&format!("{column:^3}|"));
    }
    out.push('\n');
    out.push_str(&border);
    out.push('\n');

    for row in board.rows() {
        out.push('|');
        for &cell in row {
            out.push(' ');
            out.push(cell_glyph(cell, glyphs));
            out.push_str(" |");
        }
        out.push('\n');
        out.push_str(&border);
        out.push('\n');
    }

    out
}

/// Play a full game over `input`/`output`.
///
/// Returns `None` if the input ends before the game does.
pub fn run<R: BufRead, W: Write>(
    session: &mut GameSession,
    glyphs: &DisplayConfig,
    mut input: R,
    mut output: W,
) -> io::Result<Option<GameOutcome>> {
    let columns = session.board().dimensions().columns;
    write!(output, "{}", render_board(session.board(), glyphs))?;

    let mut line = String::new();
    while !session.is_over() {
        let player = session.current_player();
        write!(output, "Player {}, make your move: ", player.number())?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("input closed before the game ended");
            writeln!(output)?;
            return Ok(None);
        }

        let Ok(column) = line.trim().parse::<usize>() else {
            writeln!(
                output,
                "Please enter a column number between 0 and {}.",
                columns.saturating_sub(1)
            )?;
            continue;
        };

        match session.play(column) {
            Ok(_) => write!(output, "{}", render_board(session.board(), glyphs))?,
            Err(e) => {
                warn!(player = player.number(), column, error = %e, "move rejected");
                writeln!(output, "Invalid move: {e}. Try again.")?;
            }
        }
    }

    match session.outcome() {
        Some(GameOutcome::Winner(player)) => writeln!(output, "Player {} wins!", player.number())?,
        Some(GameOutcome::Draw) => writeln!(output, "It's a draw!")?,
        None => {}
    }

    Ok(session.outcome())
}

/// Glyph for a single cell, blank when empty
pub fn cell_glyph(cell: Cell, glyphs: &DisplayConfig) -> char {
    cell.player().map_or(' ', |player| glyphs.glyph(player))
}

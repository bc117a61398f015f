use serde::{Deserialize, Serialize};

use super::player::Player;

/// Number of aligned pieces needed to win.
pub const WIN_LENGTH: usize = 4;

/// Cells scanned on each side of the last drop along an axis.
const SCAN_REACH: isize = WIN_LENGTH as isize - 1;

/// Board size as (columns, rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub columns: usize,
    pub rows: usize,
}

impl Dimensions {
    pub const fn new(columns: usize, rows: usize) -> Self {
        Dimensions { columns, rows }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Dimensions::new(7, 6)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Player1,
    Player2,
}

impl Cell {
    /// The player owning this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Player1 => Some(Player::Player1),
            Cell::Player2 => Some(Player::Player2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is out of range (board has {columns} columns)")]
    InvalidColumn { column: usize, columns: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },
}

/// The four directions a winning line can run along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
    /// Down-right / up-left, `\`
    Diagonal,
    /// Down-left / up-right, `/`
    AntiDiagonal,
}

impl Axis {
    const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::Diagonal,
        Axis::AntiDiagonal,
    ];

    /// (row, column) step, with rows growing downward
    fn step(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (1, -1),
        }
    }
}

/// Grid of dropped pieces plus per-column fill levels and turn state.
///
/// Moves, win checks and turn switches are separate calls so the caller
/// decides how to sequence them. A typical turn is
/// `drop_piece → is_winning_move → is_full → switch_player`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    dimensions: Dimensions,
    /// Row-major, row 0 is the top
    cells: Vec<Vec<Cell>>,
    heights: Vec<usize>,
    current_player: Player,
}

impl Board {
    /// Create an empty board. Both dimensions should be at least 1.
    pub fn new(dimensions: Dimensions, first_player: Player) -> Self {
        Board {
            dimensions,
            cells: vec![vec![Cell::Empty; dimensions.columns]; dimensions.rows],
            heights: vec![0; dimensions.columns],
            current_player: first_player,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get the cell at a specific position, `None` when out of bounds.
    /// Row 0 is the top.
    pub fn get(&self, row: usize, column: usize) -> Option<Cell> {
        self.cells.get(row)?.get(column).copied()
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.iter().map(Vec::as_slice)
    }

    pub fn heights(&self) -> &[usize] {
        &self.heights
    }

    /// Number of pieces in a column, 0 for out-of-range columns
    pub fn height(&self, column: usize) -> usize {
        self.heights.get(column).copied().unwrap_or(0)
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, column: usize) -> bool {
        match self.heights.get(column) {
            Some(&h) => h >= self.dimensions.rows,
            None => true,
        }
    }

    /// Columns that can still take a piece
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.dimensions.columns)
            .filter(|&column| !self.is_column_full(column))
            .collect()
    }

    pub fn piece_count(&self) -> usize {
        self.heights.iter().sum()
    }

    /// Drop a piece for the current player, returns the row where it landed.
    ///
    /// Neither switches the player nor checks for a win. On error the board
    /// is left untouched.
    pub fn drop_piece(&mut self, column: usize) -> Result<usize, MoveError> {
        let rows = self.dimensions.rows;
        let height = self
            .heights
            .get_mut(column)
            .ok_or(MoveError::InvalidColumn {
                column,
                columns: self.dimensions.columns,
            })?;

        if *height >= rows {
            return Err(MoveError::ColumnFull { column });
        }

        *height += 1;
        let row = rows - *height;
        self.cells[row][column] = self.current_player.to_cell();
        Ok(row)
    }

    pub fn switch_player(&mut self) {
        self.current_player = self.current_player.other();
    }

    /// Check if the piece last dropped in `column` completes a line of
    /// `WIN_LENGTH` for the current player.
    ///
    /// Must be called before `switch_player`. Empty or out-of-range columns
    /// never win.
    pub fn is_winning_move(&self, column: usize) -> bool {
        let Some(row) = self.last_row(column) else {
            return false;
        };
        let piece = self.current_player.to_cell();

        Axis::ALL
            .iter()
            .any(|&axis| self.has_streak(row, column, axis, piece))
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h == self.dimensions.rows)
    }

    /// Row of the topmost piece in `column`
    fn last_row(&self, column: usize) -> Option<usize> {
        match self.heights.get(column) {
            Some(&h) if h > 0 => Some(self.dimensions.rows - h),
            _ => None,
        }
    }

    /// Scan up to `SCAN_REACH` cells either side of (row, column) along `axis`.
    fn has_streak(&self, row: usize, column: usize, axis: Axis, piece: Cell) -> bool {
        let (dr, dc) = axis.step();
        let mut streak = 0;

        for offset in -SCAN_REACH..=SCAN_REACH {
            if self.offset_cell(row, column, dr * offset, dc * offset) == Some(piece) {
                streak += 1;
                if streak == WIN_LENGTH {
                    return true;
                }
            } else {
                streak = 0;
            }
        }

        false
    }

    fn offset_cell(&self, row: usize, column: usize, dr: isize, dc: isize) -> Option<Cell> {
        let r = row.checked_add_signed(dr)?;
        let c = column.checked_add_signed(dc)?;
        self.get(r, c)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(Dimensions::default(), Player::Player1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Board {
        Board::default()
    }

    /// Drop pieces for the current player without switching turns.
    fn drop_all(board: &mut Board, columns: &[usize]) {
        for &column in columns {
            board.drop_piece(column).unwrap();
        }
    }

    /// Drop one piece for `player` and restore the previous turn.
    fn drop_as(board: &mut Board, player: Player, column: usize) -> usize {
        let saved = board.current_player();
        if saved != player {
            board.switch_player();
        }
        let row = board.drop_piece(column).unwrap();
        if board.current_player() != saved {
            board.switch_player();
        }
        row
    }

    fn assert_gravity(board: &Board) {
        let Dimensions { columns, rows } = board.dimensions();
        for column in 0..columns {
            let h = board.height(column);
            for row in 0..rows {
                let cell = board.get(row, column).unwrap();
                if row < rows - h {
                    assert_eq!(cell, Cell::Empty, "row {row} col {column} should be empty");
                } else {
                    assert_ne!(cell, Cell::Empty, "row {row} col {column} should be filled");
                }
            }
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(Dimensions::new(5, 4), Player::Player2);
        assert_eq!(board.current_player(), Player::Player2);
        assert_eq!(board.heights(), &[0, 0, 0, 0, 0]);
        assert_eq!(board.rows().count(), 4);
        assert!(board.rows().all(|row| row.len() == 5));
        assert!(board.rows().flatten().all(|&c| c == Cell::Empty));
        assert!(!board.is_full());
    }

    #[test]
    fn test_drop_piece() {
        let mut board = standard();

        let row = board.drop_piece(3).unwrap();
        assert_eq!(row, 5);
        assert_eq!(board.get(5, 3), Some(Cell::Player1));

        board.switch_player();
        let row = board.drop_piece(3).unwrap();
        assert_eq!(row, 4);
        assert_eq!(board.get(4, 3), Some(Cell::Player2));
        assert_eq!(board.height(3), 2);
    }

    #[test]
    fn test_drop_does_not_switch_player() {
        let mut board = standard();
        board.drop_piece(0).unwrap();
        assert_eq!(board.current_player(), Player::Player1);
    }

    #[test]
    fn test_drop_uses_row_dimension_on_non_square_board() {
        let mut board = Board::new(Dimensions::new(4, 9), Player::Player1);
        assert_eq!(board.drop_piece(2).unwrap(), 8);
        assert_eq!(board.get(8, 2), Some(Cell::Player1));

        let mut board = Board::new(Dimensions::new(9, 4), Player::Player1);
        assert_eq!(board.drop_piece(8).unwrap(), 3);
        assert_eq!(board.get(3, 8), Some(Cell::Player1));
    }

    #[test]
    fn test_column_full() {
        let mut board = standard();
        drop_all(&mut board, &[0; 6]);

        assert!(board.is_column_full(0));
        let before = board.clone();
        assert_eq!(board.drop_piece(0), Err(MoveError::ColumnFull { column: 0 }));
        assert_eq!(board, before);
    }

    #[test]
    fn test_invalid_column() {
        let mut board = standard();
        board.drop_piece(1).unwrap();
        let before = board.clone();

        assert_eq!(
            board.drop_piece(7),
            Err(MoveError::InvalidColumn { column: 7, columns: 7 })
        );
        assert_eq!(
            board.drop_piece(usize::MAX),
            Err(MoveError::InvalidColumn { column: usize::MAX, columns: 7 })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_move_error_display() {
        assert_eq!(
            MoveError::InvalidColumn { column: 9, columns: 7 }.to_string(),
            "column 9 is out of range (board has 7 columns)"
        );
        assert_eq!(MoveError::ColumnFull { column: 2 }.to_string(), "column 2 is full");
    }

    #[test]
    fn test_gravity_invariant_holds_after_every_drop() {
        let mut board = Board::new(Dimensions::new(5, 4), Player::Player1);
        let sequence = [2, 2, 0, 4, 2, 1, 2, 3, 3, 0, 4, 4, 1];
        for column in sequence {
            board.drop_piece(column).unwrap();
            board.switch_player();
            assert_gravity(&board);
        }
        assert_eq!(board.piece_count(), sequence.len());
        assert!(board.is_column_full(2));
        assert_eq!(board.legal_columns(), vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_switch_player_twice_is_identity() {
        let mut board = standard();
        board.switch_player();
        assert_eq!(board.current_player(), Player::Player2);
        board.switch_player();
        assert_eq!(board.current_player(), Player::Player1);
    }

    #[test]
    fn test_full_board() {
        let mut board = standard();
        for column in 0..7 {
            assert!(!board.is_full());
            drop_all(&mut board, &[column; 6]);
        }
        assert!(board.is_full());
        assert!(board.legal_columns().is_empty());
    }

    #[test]
    fn test_not_full_with_one_open_slot() {
        let mut board = Board::new(Dimensions::new(3, 2), Player::Player1);
        drop_all(&mut board, &[0, 0, 1, 1, 2]);
        assert!(!board.is_full());
        board.drop_piece(2).unwrap();
        assert!(board.is_full());
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = standard();
        for column in 0..3 {
            board.drop_piece(column).unwrap();
            board.switch_player();
            board.drop_piece(6).unwrap();
            board.switch_player();
        }
        board.drop_piece(3).unwrap();
        assert!(board.is_winning_move(3));
    }

    #[test]
    fn test_horizontal_win_completed_in_the_middle() {
        let mut board = standard();
        drop_all(&mut board, &[0, 1, 3]);
        assert!(!board.is_winning_move(3));
        board.drop_piece(2).unwrap();
        assert!(board.is_winning_move(2));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = standard();
        for _ in 0..3 {
            board.drop_piece(0).unwrap();
            assert!(!board.is_winning_move(0));
        }
        board.drop_piece(0).unwrap();
        assert!(board.is_winning_move(0));
    }

    #[test]
    fn test_vertical_win_on_tall_board() {
        let mut board = Board::new(Dimensions::new(4, 10), Player::Player1);
        drop_as(&mut board, Player::Player2, 1);
        drop_all(&mut board, &[1, 1, 1, 1]);
        assert!(board.is_winning_move(1));
    }

    #[test]
    fn test_anti_diagonal_win() {
        // `/` line: Player1 on (5,0) (4,1) (3,2) (2,3), Player2 filler underneath
        let mut board = standard();
        drop_as(&mut board, Player::Player2, 1);
        drop_as(&mut board, Player::Player2, 2);
        drop_as(&mut board, Player::Player2, 2);
        drop_as(&mut board, Player::Player2, 3);
        drop_as(&mut board, Player::Player2, 3);
        drop_as(&mut board, Player::Player2, 3);

        drop_all(&mut board, &[0, 1, 2]);
        assert!(!board.is_winning_move(2));
        let row = board.drop_piece(3).unwrap();
        assert_eq!(row, 2);
        assert!(board.is_winning_move(3));
    }

    #[test]
    fn test_diagonal_win() {
        // `\` line: Player1 on (5,6) (4,5) (3,4) (2,3)
        let mut board = standard();
        drop_as(&mut board, Player::Player2, 5);
        drop_as(&mut board, Player::Player2, 4);
        drop_as(&mut board, Player::Player2, 4);
        drop_as(&mut board, Player::Player2, 3);
        drop_as(&mut board, Player::Player2, 3);
        drop_as(&mut board, Player::Player2, 3);

        drop_all(&mut board, &[6, 5, 4]);
        assert!(!board.is_winning_move(4));
        board.drop_piece(3).unwrap();
        assert!(board.is_winning_move(3));
    }

    #[test]
    fn test_anti_diagonal_win_detected_from_any_position_in_line() {
        // Same diagonal as above, but the bottom piece is placed last
        let mut board = standard();
        drop_as(&mut board, Player::Player2, 1);
        drop_as(&mut board, Player::Player2, 2);
        drop_as(&mut board, Player::Player2, 2);
        drop_as(&mut board, Player::Player2, 3);
        drop_as(&mut board, Player::Player2, 3);
        drop_as(&mut board, Player::Player2, 3);

        drop_all(&mut board, &[1, 2, 3]);
        board.drop_piece(0).unwrap();
        assert!(board.is_winning_move(0));
    }

    #[test]
    fn test_anti_diagonal_near_edges_does_not_wrap() {
        // Player1 at (5,5) (4,6) would continue at (3,7) off the board
        let mut board = standard();
        drop_as(&mut board, Player::Player2, 6);
        drop_all(&mut board, &[5, 6]);
        drop_as(&mut board, Player::Player1, 0);
        assert!(!board.is_winning_move(6));
        assert!(!board.is_winning_move(0));
    }

    #[test]
    fn test_anti_diagonal_win_on_non_square_board() {
        let mut board = Board::new(Dimensions::new(4, 8), Player::Player1);
        drop_as(&mut board, Player::Player2, 1);
        drop_as(&mut board, Player::Player2, 2);
        drop_as(&mut board, Player::Player2, 2);
        drop_as(&mut board, Player::Player2, 3);
        drop_as(&mut board, Player::Player2, 3);
        drop_as(&mut board, Player::Player2, 3);

        drop_all(&mut board, &[0, 1, 2, 3]);
        assert!(board.is_winning_move(3));
    }

    #[test]
    fn test_no_winning_move() {
        let mut board = standard();
        board.drop_piece(0).unwrap();
        assert!(!board.is_winning_move(0));
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = standard();
        drop_all(&mut board, &[0, 1, 2]);
        for column in 0..3 {
            assert!(!board.is_winning_move(column));
        }
    }

    #[test]
    fn test_broken_line_is_not_a_win() {
        let mut board = standard();
        drop_all(&mut board, &[0, 1, 3, 4]);
        drop_as(&mut board, Player::Player2, 2);
        assert!(!board.is_winning_move(4));
        assert!(!board.is_winning_move(1));
    }

    #[test]
    fn test_opponent_run_does_not_count() {
        let mut board = standard();
        for column in 1..5 {
            drop_as(&mut board, Player::Player2, column);
        }
        board.drop_piece(0).unwrap();
        assert!(!board.is_winning_move(0));

        board.switch_player();
        assert!(board.is_winning_move(4));
    }

    #[test]
    fn test_win_check_is_for_current_player() {
        let mut board = standard();
        drop_all(&mut board, &[2, 2, 2, 2]);
        assert!(board.is_winning_move(2));
        board.switch_player();
        assert!(!board.is_winning_move(2));
    }

    #[test]
    fn test_win_check_on_empty_or_invalid_column() {
        let board = standard();
        assert!(!board.is_winning_move(0));
        assert!(!board.is_winning_move(42));
    }

    #[test]
    fn test_tiny_board() {
        let mut board = Board::new(Dimensions::new(1, 1), Player::Player1);
        board.drop_piece(0).unwrap();
        assert!(!board.is_winning_move(0));
        assert!(board.is_full());
        assert_eq!(board.drop_piece(0), Err(MoveError::ColumnFull { column: 0 }));
    }

    #[test]
    fn test_cell_player() {
        assert_eq!(Cell::Empty.player(), None);
        assert_eq!(Cell::Player1.player(), Some(Player::Player1));
        assert_eq!(Cell::Player2.player(), Some(Player::Player2));
    }
}

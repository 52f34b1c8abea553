//! The 8x8 board: one optional piece per square.

use crate::{Color, Move, Piece, PieceKind, Square};
use std::fmt;

/// An 8x8 grid holding at most one piece per square.
///
/// The board is plain storage. It knows nothing about whose turn it is or
/// which moves are legal; [`Board::apply`] relocates a piece without any
/// validation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// Back-rank piece order from the a-file to the h-file.
    const BACK_RANK: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            let back = color.back_rank() as usize;
            let pawns = color.pawn_start_rank() as usize;
            for (file, kind) in Self::BACK_RANK.iter().enumerate() {
                board.squares[back * 8 + file] = Some(Piece::new(*kind, color));
                board.squares[pawns * 8 + file] = Some(Piece::new(PieceKind::Pawn, color));
            }
        }
        board
    }

    /// Returns the piece on a square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize]
    }

    /// Returns true if no piece stands on the square.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Places a piece on (or clears) a square, returning what was there.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.squares[sq.index() as usize], piece)
    }

    /// Removes and returns the piece on a square.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.set(sq, None)
    }

    /// Relocates whatever stands on the origin to the destination.
    ///
    /// Performs no validation: callers check legality first. Returns the
    /// piece that was on the destination, if any. Moving from an empty
    /// square clears the destination.
    pub fn apply(&mut self, mov: Move) -> Option<Piece> {
        let piece = self.take(mov.from());
        self.set(mov.to(), piece)
    }

    /// Returns a copy of the board with the move applied.
    pub fn with_move(&self, mov: Move) -> Board {
        let mut scratch = *self;
        scratch.apply(mov);
        scratch
    }

    /// Iterates over `(square, piece)` for every occupied square, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Iterates over the squares and pieces of one color, row-major.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, p)| p.color == color)
    }

    /// Finds the first king of the given color in row-major order.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Counts the pieces of one color.
    pub fn count(&self, color: Color) -> usize {
        self.pieces(color).count()
    }

    /// Returns the rows of the board, row 0 first.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Piece>]> {
        self.squares.chunks(8)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_placement())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (rank, row) in self.rows().enumerate() {
            write!(f, "{} ", 8 - rank)?;
            for cell in row {
                match cell {
                    Some(piece) => write!(f, "{}", piece.to_fen_char())?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}

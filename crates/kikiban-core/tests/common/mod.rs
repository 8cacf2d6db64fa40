//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::OnceLock;

use kikiban_core::bitboard::{AttackTables, Bitboard};
use kikiban_core::mate::{
    MateInput, MateTables, PlacedPiece, compute_effects, mate_1ply, occupancy, occupancy_of,
};
use kikiban_core::types::{Color, Hand, Move, PieceType, Square};

pub fn tables() -> &'static AttackTables {
    static TABLES: OnceLock<Box<AttackTables>> = OnceLock::new();
    TABLES.get_or_init(AttackTables::build)
}

pub fn mate_tables() -> &'static MateTables {
    static TABLES: OnceLock<Box<MateTables>> = OnceLock::new();
    TABLES.get_or_init(|| MateTables::build(tables()))
}

/// 0-based file/rank (file 0 = 1筋, rank 0 = 一段)
pub fn sq(file: u8, rank: u8) -> Square {
    Square::from_u8(file * 9 + rank).expect("on board")
}

/// Naive ray cast used as the reference for sliding attacks
pub fn ray_attack(from: Square, dirs: &[(i32, i32)], occupied: Bitboard) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    for &(df, dr) in dirs {
        let mut cur = from;
        while let Some(next) = cur.offset(df, dr) {
            bb.set(next);
            if occupied.contains(next) {
                break;
            }
            cur = next;
        }
    }
    bb
}

pub const ROOK_DIRS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
pub const BISHOP_DIRS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Piece list plus the side-to-move inputs the position layer would supply
pub struct Scenario {
    pub pieces: Vec<PlacedPiece>,
    pub hand: Hand,
    pub pinned: Bitboard,
}

impl Scenario {
    pub fn new() -> Self {
        Self {
            pieces: Vec::new(),
            hand: Hand::EMPTY,
            pinned: Bitboard::EMPTY,
        }
    }

    pub fn piece(mut self, color: Color, pt: PieceType, file: u8, rank: u8) -> Self {
        self.pieces.push(PlacedPiece::new(sq(file, rank), color, pt));
        self
    }

    pub fn hand(mut self, pt: PieceType) -> Self {
        self.hand = self.hand.add(pt);
        self
    }

    pub fn pinned(mut self, file: u8, rank: u8) -> Self {
        self.pinned.set(sq(file, rank));
        self
    }

    fn king(&self, color: Color) -> Square {
        self.pieces
            .iter()
            .find(|pc| pc.color == color && pc.piece_type == PieceType::King)
            .map(|pc| pc.sq)
            .expect("both kings placed")
    }

    pub fn mate(&self, us: Color) -> Option<Move> {
        let (effects, long_effects) = compute_effects(tables(), &self.pieces);
        let our_knights = self
            .pieces
            .iter()
            .filter(|pc| pc.color == us && pc.piece_type == PieceType::Knight)
            .fold(Bitboard::EMPTY, |bb, pc| bb | Bitboard::from_square(pc.sq));
        let input = MateInput {
            us,
            our_king: self.king(us),
            their_king: self.king(!us),
            occupied: occupancy(&self.pieces),
            their_pieces: occupancy_of(&self.pieces, !us),
            our_knights,
            pinned: self.pinned,
            hand: self.hand,
            effects: &effects,
            long_effects: &long_effects,
        };
        mate_1ply(mate_tables(), tables(), &input)
    }
}

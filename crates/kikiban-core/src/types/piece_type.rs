//! 駒種

/// 先後を区別しない駒種。値は 1..=14（0 は指し手の「駒なし」に使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceType {
    Pawn = 1,
    Lance = 2,
    Knight = 3,
    Silver = 4,
    Bishop = 5,
    Rook = 6,
    Gold = 7,
    King = 8,
    ProPawn = 9,
    ProLance = 10,
    ProKnight = 11,
    ProSilver = 12,
    Horse = 13,
    Dragon = 14,
}

use PieceType::*;

/// 値の順（値 - 1 が添字）
const BY_VALUE: [PieceType; 14] = [
    Pawn, Lance, Knight, Silver, Bishop, Rook, Gold, King, ProPawn, ProLance, ProKnight,
    ProSilver, Horse, Dragon,
];

impl PieceType {
    pub const HAND_NUM: usize = 7;

    /// 手駒の並び。`Hand` のビット配置と `HandKind` のビット位置はこの順
    pub const HAND_PIECES: [PieceType; PieceType::HAND_NUM] =
        [Pawn, Lance, Knight, Silver, Gold, Bishop, Rook];

    /// 成る前の駒種。生駒・金・玉はそのまま
    #[inline]
    pub const fn unpromote(self) -> PieceType {
        match self {
            ProPawn => Pawn,
            ProLance => Lance,
            ProKnight => Knight,
            ProSilver => Silver,
            Horse => Bishop,
            Dragon => Rook,
            _ => self,
        }
    }

    /// 長い利きを持つか（香・角・飛とその成駒のうち馬・龍）
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, Lance | Bishop | Rook | Horse | Dragon)
    }

    /// `HAND_PIECES` 内の位置
    #[inline]
    pub const fn hand_index(self) -> Option<usize> {
        let mut i = 0;
        while i < Self::HAND_NUM {
            if Self::HAND_PIECES[i] as u8 == self as u8 {
                return Some(i);
            }
            i += 1;
        }
        None
    }

    #[inline]
    pub const fn from_u8(n: u8) -> Option<PieceType> {
        match n {
            1..=14 => Some(BY_VALUE[n as usize - 1]),
            _ => None,
        }
    }

    /// USIの駒打ち表記に使う大文字（成駒は生駒の文字）
    pub const fn to_usi_char(self) -> char {
        b"PLNSBRGK"[self.unpromote() as usize - 1] as char
    }
}

//! 遠方駒（香・角・飛）の利きをpextによる完全ハッシュ表で引く
//!
//! 各升について「その升の駒の利きを変えうる升」のマスク（盤端で止まる升は除く）を作り、
//! マスク内の占有状態をpextで密な整数に写して表を引く。
//! 表の中身は構築時にマスクの全部分集合についてレイを伸ばして求める。

use crate::types::{Color, Square};

use super::Bitboard;
use super::pext::{deposit, extract};
use super::step::{BISHOP_RAYS, ROOK_RAYS};

/// 遠方駒の種類
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slider {
    /// 香（前方の筋のみ、手番で向きが変わる）
    Lance(Color),
    /// 角（斜め4方向）
    Bishop,
    /// 飛（縦横4方向）
    Rook,
}

impl Slider {
    /// 先手から見たレイの向き
    fn rays(self) -> &'static [(i32, i32)] {
        match self {
            Slider::Lance(Color::Black) => &[(0, -1)],
            Slider::Lance(Color::White) => &[(0, 1)],
            Slider::Bishop => BISHOP_RAYS,
            Slider::Rook => ROOK_RAYS,
        }
    }
}

/// 1種類の遠方駒の完全ハッシュ表
pub(crate) struct SlidingTable {
    /// 各升の占有マスク
    mask: [Bitboard; Square::NUM],
    /// mask を merge したもの
    merged: [u64; Square::NUM],
    /// 各升の表内の開始位置
    offset: [usize; Square::NUM],
    attacks: Box<[Bitboard]>,
}

impl SlidingTable {
    pub(crate) fn build(slider: Slider) -> SlidingTable {
        let rays = slider.rays();
        let mut mask = [Bitboard::EMPTY; Square::NUM];
        let mut merged = [0u64; Square::NUM];
        let mut offset = [0usize; Square::NUM];
        let mut attacks = Vec::new();

        for sq in Square::all() {
            let m = occupancy_mask(sq, rays);
            assert_lv!(!m.cross_over(), "occupancy mask overlaps after merge: {sq:?}");

            mask[sq.index()] = m;
            merged[sq.index()] = m.merge();
            offset[sq.index()] = attacks.len();

            let bits = m.count();
            for index in 0..(1u64 << bits) {
                let occ = deposit(index, m.merge());
                // 重なりがないのでワードごとにマスクを掛ければ元の升に戻る
                let occupied = Bitboard::new(occ & m.p0(), occ & m.p1());
                attacks.push(ray_cast(sq, occupied, rays));
            }
        }

        SlidingTable {
            mask,
            merged,
            offset,
            attacks: attacks.into_boxed_slice(),
        }
    }

    /// 利きを引く
    #[inline]
    pub(crate) fn attack(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let i = sq.index();
        let index = extract((occupied & self.mask[i]).merge(), self.merged[i]);
        self.attacks[self.offset[i] + index as usize]
    }

    /// 占有マスク
    #[inline]
    pub(crate) fn mask(&self, sq: Square) -> Bitboard {
        self.mask[sq.index()]
    }

    /// 表のエントリ数
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.attacks.len()
    }
}

/// 各レイの途中の升（盤端の最後の1升は利きの有無に関係しないので除く）
fn occupancy_mask(sq: Square, rays: &[(i32, i32)]) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    for &(df, dr) in rays {
        let mut cur = sq.offset(df, dr);
        while let Some(to) = cur {
            let next = to.offset(df, dr);
            if next.is_some() {
                bb.set(to);
            }
            cur = next;
        }
    }
    bb
}

/// 占有升にぶつかる（その升を含む）か盤端までレイを伸ばす
pub(crate) fn ray_cast(sq: Square, occupied: Bitboard, rays: &[(i32, i32)]) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    for &(df, dr) in rays {
        let mut cur = sq.offset(df, dr);
        while let Some(to) = cur {
            bb.set(to);
            if occupied.contains(to) {
                break;
            }
            cur = to.offset(df, dr);
        }
    }
    bb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};

    #[test]
    fn test_table_sizes() {
        assert_eq!(SlidingTable::build(Slider::Bishop).len(), 20224);
        assert_eq!(SlidingTable::build(Slider::Lance(Color::Black)).len(), 2304);
        assert_eq!(SlidingTable::build(Slider::Lance(Color::White)).len(), 2304);
    }

    #[test]
    fn test_masks_exclude_edges() {
        let bishop = SlidingTable::build(Slider::Bishop);
        // 5五の角: 各斜めの端の升を除いた 3 * 4 = 12 升
        assert_eq!(bishop.mask(Square::SQ_55).count(), 12);
        assert!(!bishop.mask(Square::SQ_55).contains(Square::SQ_11));
        // 1筋と9筋の升はどの角マスクにも入らない
        for sq in Square::all() {
            let m = bishop.mask(sq);
            assert!(!m.cross_over(), "{sq:?}");
            for rank in Rank::ALL {
                assert!(!m.contains(Square::new(File::File1, rank)));
                assert!(!m.contains(Square::new(File::File9, rank)));
            }
        }
    }

    #[test]
    fn test_lance_lookup() {
        let lance = SlidingTable::build(Slider::Lance(Color::Black));
        let sq55 = Square::SQ_55;
        let sq53 = Square::new(File::File5, Rank::Rank3);
        let bb = lance.attack(sq55, Bitboard::from_square(sq53));
        assert_eq!(bb.count(), 2);
        assert!(bb.contains(Square::new(File::File5, Rank::Rank4)));
        assert!(bb.contains(sq53));
        // 利きの外の駒は無関係
        let far = Bitboard::from_square(Square::new(File::File4, Rank::Rank4));
        assert_eq!(lance.attack(sq55, far).count(), 4);
    }

    #[test]
    fn test_ray_cast_stops_at_blocker() {
        let occ = Bitboard::from_square(Square::new(File::File5, Rank::Rank7));
        let bb = ray_cast(Square::SQ_55, occ, &[(0, 1)]);
        assert_eq!(bb.count(), 2);
        assert!(bb.contains(Square::new(File::File5, Rank::Rank7)));
        assert!(!bb.contains(Square::new(File::File5, Rank::Rank8)));
    }
}

//! One-ply mate detection scenarios

mod common;

use common::{Scenario, sq};
use kikiban_core::types::{Color, Move, PieceType};

use Color::{Black, White};
use PieceType::*;

/// 後手玉5a、先手玉5i
fn kings() -> Scenario {
    Scenario::new().piece(White, King, 4, 0).piece(Black, King, 4, 8)
}

#[test]
fn head_gold_drop_mates() {
    let s = kings().piece(Black, Pawn, 4, 2).hand(Gold);
    let mv = s.mate(Black).expect("mate expected");
    assert_eq!(mv, Move::new_drop(Gold, sq(4, 1)));
    assert_eq!(mv.to_usi(), "G*5b");
}

#[test]
fn no_hand_no_mate() {
    let s = kings().piece(Black, Pawn, 4, 2);
    assert_eq!(s.mate(Black), None);
}

#[test]
fn pawn_in_hand_is_never_dropped() {
    let s = kings().piece(Black, Pawn, 4, 2).hand(Pawn);
    assert_eq!(s.mate(Black), None);
}

#[test]
fn rook_drop_cutting_bishop_line_is_rejected() {
    // 3d角が5bを通って6aに利いている。5bに飛車を打つと6aが空く
    let s = kings().piece(Black, Bishop, 2, 3).piece(Black, Rook, 0, 0).hand(Rook);
    assert_eq!(s.mate(Black), None);
}

#[test]
fn gold_covers_the_cut_square_itself() {
    // 同じ形でも金なら6aに自分で利くので詰み
    let s = kings().piece(Black, Bishop, 2, 3).piece(Black, Rook, 0, 0).hand(Gold);
    assert_eq!(s.mate(Black), Some(Move::new_drop(Gold, sq(4, 1))));
}

#[test]
fn silver_drop_cutting_rook_line() {
    // 1b飛車の横利きが5bを通って6bに届いている
    let s = kings().piece(Black, Rook, 0, 1).hand(Silver);
    assert_eq!(s.mate(Black), None);

    // 6bに別の利き（6c歩）があれば遮っても詰み
    let s = kings().piece(Black, Rook, 0, 1).piece(Black, Pawn, 5, 2).hand(Silver);
    assert_eq!(s.mate(Black), Some(Move::new_drop(Silver, sq(4, 1))));
}

/// 1a玉が自分の駒で囲まれた形（2c に後手の利きなし）
fn smothered() -> Scenario {
    Scenario::new()
        .piece(White, King, 0, 0)
        .piece(White, Gold, 1, 0)
        .piece(White, Pawn, 0, 1)
        .piece(White, Knight, 1, 1)
        .piece(Black, King, 4, 8)
}

#[test]
fn knight_drop_mates_smothered_king() {
    let s = smothered().hand(Knight);
    let mv = s.mate(Black).expect("mate expected");
    assert_eq!(mv, Move::new_drop(Knight, sq(1, 2)));
    assert_eq!(mv.to_usi(), "N*2c");
}

#[test]
fn knight_jump_mates_smothered_king() {
    let s = smothered().piece(Black, Knight, 2, 4);
    assert_eq!(s.mate(Black), Some(Move::new_move(sq(2, 4), sq(1, 2), false)));
}

#[test]
fn pinned_knight_cannot_jump() {
    let s = smothered().piece(Black, Knight, 2, 4).pinned(2, 4);
    assert_eq!(s.mate(Black), None);
}

#[test]
fn no_knight_no_mate() {
    // 逃げ道はないが桂がどこにもない
    let s = smothered().hand(Gold).hand(Silver);
    assert_eq!(s.mate(Black), None);
}

#[test]
fn knight_needs_every_flight_covered() {
    // 2bが空いていれば桂では詰まない
    let s = Scenario::new()
        .piece(White, King, 0, 0)
        .piece(White, Gold, 1, 0)
        .piece(White, Pawn, 0, 1)
        .piece(Black, King, 4, 8)
        .hand(Knight);
    assert_eq!(s.mate(Black), None);
}

#[test]
fn white_side_gold_drop() {
    let s = Scenario::new()
        .piece(Black, King, 4, 8)
        .piece(White, King, 4, 0)
        .piece(White, Pawn, 4, 6)
        .hand(Gold);
    assert_eq!(s.mate(White), Some(Move::new_drop(Gold, sq(4, 7))));
}

/// 5a玉の両隣が後手の歩、4c金と6c銀で5bと周囲を押さえた形
fn lance_net() -> Scenario {
    kings()
        .piece(White, Pawn, 3, 0)
        .piece(White, Pawn, 5, 0)
        .piece(Black, Gold, 3, 2)
        .piece(Black, Silver, 5, 2)
}

#[test]
fn lance_drop_mates_when_no_rook_in_hand() {
    let mv = lance_net().hand(Lance).mate(Black).expect("mate expected");
    assert_eq!(mv, Move::new_drop(Lance, sq(4, 1)));
    assert_eq!(mv.to_usi(), "L*5b");
}

#[test]
fn rook_is_preferred_over_lance() {
    let s = lance_net().hand(Lance).hand(Rook);
    assert_eq!(s.mate(Black), Some(Move::new_drop(Rook, sq(4, 1))));
}

#[test]
fn lance_leaves_side_flight_open() {
    // 6c銀がないと6bが空き、香は横に利かない
    let s = kings()
        .piece(White, Pawn, 3, 0)
        .piece(White, Pawn, 5, 0)
        .piece(Black, Gold, 3, 2)
        .hand(Lance);
    assert_eq!(s.mate(Black), None);
}

#[test]
fn bishop_drop_mates_diagonally() {
    // 4aは3b銀、4bは3d桂が押さえ、残りは後手の駒で埋まっている
    let s = kings()
        .piece(Black, Knight, 2, 3)
        .piece(Black, Silver, 2, 1)
        .piece(White, Gold, 5, 0)
        .piece(White, Pawn, 4, 1)
        .piece(White, Pawn, 5, 1)
        .hand(Bishop);
    let mv = s.mate(Black).expect("mate expected");
    assert_eq!(mv, Move::new_drop(Bishop, sq(3, 1)));
    assert_eq!(mv.to_usi(), "B*4b");
}

/// 9a玉、2b飛車の横利きが8bと9bを通っている
fn corner_with_rook_line() -> Scenario {
    Scenario::new()
        .piece(White, King, 8, 0)
        .piece(Black, King, 4, 8)
        .piece(Black, Rook, 1, 1)
}

#[test]
fn cut_direction_is_skipped_for_later_one() {
    // 8bに銀を打つと飛車の利きが9bに届かなくなるので、次の候補の9bで詰む
    let mv = corner_with_rook_line().hand(Silver).mate(Black).expect("mate expected");
    assert_eq!(mv, Move::new_drop(Silver, sq(8, 1)));
    assert_eq!(mv.to_usi(), "S*9b");
}

#[test]
fn first_direction_kept_when_piece_covers_cut_square() {
    // 金は8bから9bに利くので最初の候補で詰む
    let s = corner_with_rook_line().hand(Gold);
    assert_eq!(s.mate(Black), Some(Move::new_drop(Gold, sq(7, 1))));
}

/// 1a玉を自駒で囲み、2bだけを2i飛車の縦利きで押さえた形
fn rook_guarded_corner() -> Scenario {
    Scenario::new()
        .piece(White, King, 0, 0)
        .piece(White, Gold, 1, 0)
        .piece(White, Pawn, 0, 1)
        .piece(Black, Rook, 1, 8)
        .piece(Black, King, 4, 8)
}

#[test]
fn knight_drop_blocking_only_guard_is_rejected() {
    // 2cの桂が飛車の利きを止めて2bが逃げ道になる
    let s = rook_guarded_corner().hand(Knight);
    assert_eq!(s.mate(Black), None);

    let s = rook_guarded_corner().piece(Black, Knight, 2, 4);
    assert_eq!(s.mate(Black), None);
}

#[test]
fn knight_drop_with_second_guard_mates() {
    // 3c銀も2bに利いていれば遮っても詰み
    let s = rook_guarded_corner().piece(Black, Silver, 2, 2).hand(Knight);
    assert_eq!(s.mate(Black), Some(Move::new_drop(Knight, sq(1, 2))));
}

#[test]
fn unpinned_knight_jumps_when_other_is_pinned() {
    let both = smothered().piece(Black, Knight, 2, 4).piece(Black, Knight, 0, 4);
    assert_eq!(both.mate(Black), Some(Move::new_move(sq(0, 4), sq(1, 2), false)));

    let mv = both.pinned(0, 4).mate(Black).expect("mate expected");
    assert_eq!(mv, Move::new_move(sq(2, 4), sq(1, 2), false));
    assert_eq!(mv.to_usi(), "3e2c");
}

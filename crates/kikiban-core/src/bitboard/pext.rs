//! pext / pdep（ビット抽出・配置）
//!
//! 遠方駒テーブルの完全ハッシュに使う。`mask` で選ばれた `value` のビットを
//! 下位から順に詰めて返す。BMI2 が有効なビルドではハードウェア命令を使い、
//! それ以外では1bitずつ走査する実装で同じ値を返す。

/// `value` のうち `mask` の立っている位置のビットを下位から詰める
#[inline]
pub fn extract(value: u64, mask: u64) -> u64 {
    #[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
    {
        // SAFETY: target_feature = "bmi2" でコンパイルされている
        unsafe { std::arch::x86_64::_pext_u64(value, mask) }
    }

    #[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
    {
        extract_soft(value, mask)
    }
}

/// pext のソフトウェア実装
#[inline]
pub fn extract_soft(value: u64, mut mask: u64) -> u64 {
    let mut res = 0u64;
    let mut bb = 1u64;
    while mask != 0 {
        if value & mask & mask.wrapping_neg() != 0 {
            res |= bb;
        }
        mask &= mask - 1;
        bb <<= 1;
    }
    res
}

/// `extract` の逆写像（pdep）。`index` の下位ビットを `mask` の立っている位置へ配る
///
/// テーブル構築時にしか使わないのでソフトウェア実装のみ。
pub fn deposit(index: u64, mut mask: u64) -> u64 {
    let mut res = 0u64;
    let mut bb = 1u64;
    while mask != 0 {
        let lowest = mask & mask.wrapping_neg();
        if index & bb != 0 {
            res |= lowest;
        }
        mask &= mask - 1;
        bb <<= 1;
    }
    res
}

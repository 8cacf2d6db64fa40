//! サービスオブジェクト一式
//!
//! 利きテーブル・1手詰めテーブル・置換表と設定をまとめて所有する。
//! テーブルは構築後は読み取り専用なので、探索スレッドへは参照で渡す。

use crate::bitboard::AttackTables;
use crate::config::CoreConfig;
use crate::error::CoreResult;
use crate::mate::MateTables;
use crate::tt::TranspositionTable;

pub struct CoreServices {
    config: CoreConfig,
    tables: Box<AttackTables>,
    mate_tables: Box<MateTables>,
    tt: TranspositionTable,
}

impl CoreServices {
    /// 全テーブルを構築し、置換表を確保する
    pub fn new(config: CoreConfig) -> CoreResult<Self> {
        config.validate()?;

        let tables = AttackTables::build();
        let mate_tables = MateTables::build(&tables);
        let tt = TranspositionTable::new(config.hash_mb);

        Ok(Self {
            config,
            tables,
            mate_tables,
            tt,
        })
    }

    #[inline]
    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    #[inline]
    pub fn tables(&self) -> &AttackTables {
        &self.tables
    }

    #[inline]
    pub fn mate_tables(&self) -> &MateTables {
        &self.mate_tables
    }

    #[inline]
    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    #[inline]
    pub fn tt_mut(&mut self) -> &mut TranspositionTable {
        &mut self.tt
    }

    /// 置換表サイズの設定だけを変える（反映は `apply_hash_size`）
    pub fn set_hash_mb(&mut self, mb: usize) -> CoreResult<()> {
        let config = CoreConfig { hash_mb: mb };
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// 設定中のサイズで置換表を確保し直す
    pub fn apply_hash_size(&mut self) {
        self.tt.resize(self.config.hash_mb);
    }
}

//! コア設定
//!
//! 置換表サイズなど、実行時に変更できる設定値。
//! 変更は `CoreServices::apply_hash_size()` で反映される。

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// 置換表サイズの既定値（MB）
pub const DEFAULT_HASH_MB: usize = 16;

/// 置換表サイズの上限（MB）
pub const MAX_HASH_MB: usize = 32 * 1024 * 1024;

/// 置換表サイズを指定する環境変数
pub const HASH_MB_ENV: &str = "KIKIBAN_HASH_MB";

/// コア設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// 置換表サイズ（MB）
    pub hash_mb: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            hash_mb: DEFAULT_HASH_MB,
        }
    }
}

impl CoreConfig {
    /// 値の範囲を検査する
    pub fn validate(&self) -> CoreResult<()> {
        if (1..=MAX_HASH_MB).contains(&self.hash_mb) {
            Ok(())
        } else {
            Err(CoreError::InvalidHashSize {
                mb: self.hash_mb,
                max: MAX_HASH_MB,
            })
        }
    }

    /// 既定値に環境変数 `KIKIBAN_HASH_MB` を上書きした設定
    pub fn from_env() -> CoreResult<Self> {
        Self::from_env_value(std::env::var(HASH_MB_ENV).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> CoreResult<Self> {
        let mut config = Self::default();
        if let Some(raw) = value {
            config.hash_mb = raw.trim().parse().map_err(|_| CoreError::InvalidEnv {
                var: HASH_MB_ENV,
                value: raw.to_string(),
            })?;
        }
        config.validate()?;
        Ok(config)
    }
}

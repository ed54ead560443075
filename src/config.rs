use std::path::Path;

use tracing::{warn, Level};

use crate::error::ConfigError;
use crate::game::simulation::Policy;

/// 演示程序配置，从 TOML 读取
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// 随机种子；不设置时使用系统熵
    pub seed: Option<u64>,
    /// 连续进行的局数
    pub games: u32,
    /// 选步策略
    pub policy: Policy,
    /// 日志级别（trace / debug / info / warn / error）
    pub log_level: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            games: 1,
            policy: Policy::Greedy,
            log_level: "info".to_string(),
        }
    }
}

impl SimulationConfig {
    /// 从 TOML 文件读取配置
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: SimulationConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件读取配置，文件不存在时使用默认值
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.games == 0 {
            return Err(ConfigError::Validation("games must be > 0".into()));
        }
        self.level()?;
        Ok(())
    }

    /// 解析日志级别
    pub fn level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse::<Level>()
            .map_err(|_| ConfigError::Validation(format!("unknown log_level {:?}", self.log_level)))
    }
}

//! # Search Configuration
//!
//! 체인 탐색 파라미터를 한 곳에서 관리한다.
//!
//! ## 사용법
//! ```rust
//! use chain_core::config::{SearchConfig, StrategyKind};
//!
//! let config = SearchConfig::default();
//! assert_eq!(config.strategy, StrategyKind::BestFirst);
//!
//! let fast = SearchConfig::fast();
//! assert!(fast.max_traversal < config.max_traversal);
//! ```

use crate::error::{ChainError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Which search algorithm the chain graph runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    #[default]
    BestFirst,
    DepthFirst,
    MonteCarlo,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [StrategyKind::BestFirst, StrategyKind::DepthFirst, StrategyKind::MonteCarlo];

    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::BestFirst => "best-first",
            StrategyKind::DepthFirst => "depth-first",
            StrategyKind::MonteCarlo => "monte-carlo",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "best-first" | "bfs" | "best_first" => Ok(StrategyKind::BestFirst),
            "depth-first" | "dfs" | "depth_first" => Ok(StrategyKind::DepthFirst),
            "monte-carlo" | "mcts" | "monte_carlo" => Ok(StrategyKind::MonteCarlo),
            _ => Err(ChainError::UnknownStrategy(s.to_string())),
        }
    }
}

/// MCTS 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// 노드 확장 방문 횟수 임계값 (root는 즉시 확장)
    pub expansion_count: u32,
    /// UCB1 탐색 상수 (기본: sqrt(2))
    pub exploration: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self { expansion_count: 2, exploration: std::f64::consts::SQRT_2 }
    }
}

/// Penalise switching the pass receiver between consecutive cycles.
///
/// Off by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LastDecisionConfig {
    pub enabled: bool,
    /// 이전 사이클과 다른 패스 대상 선택 시 감점
    pub switch_penalty: f64,
}

impl Default for LastDecisionConfig {
    fn default() -> Self {
        Self { enabled: false, switch_penalty: 5.0 }
    }
}

/// 체인 탐색 전체 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub strategy: StrategyKind,
    /// 체인 최대 길이
    pub max_depth: usize,
    /// 탐색 노드 예산 (MCTS: playout 횟수)
    pub max_traversal: usize,
    pub mcts: MctsConfig,
    pub last_decision: LastDecisionConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::BestFirst,
            max_depth: 4,
            max_traversal: 500,
            mcts: MctsConfig::default(),
            last_decision: LastDecisionConfig::default(),
        }
    }
}

impl SearchConfig {
    /// 실전 설정 (기본)
    pub fn realistic() -> Self {
        Self::default()
    }

    /// Tight cycle budget.
    pub fn fast() -> Self {
        Self { max_depth: 3, max_traversal: 150, ..Self::default() }
    }

    /// Longer chains and a bigger budget, for offline analysis.
    pub fn deep() -> Self {
        Self { max_depth: 5, max_traversal: 3000, ..Self::default() }
    }

    /// Exhaustive depth-first search as a ground-truth reference.
    pub fn reference() -> Self {
        Self { strategy: StrategyKind::DepthFirst, max_depth: 3, max_traversal: 20_000, ..Self::default() }
    }

    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(ChainError::InvalidConfig("max_depth must be at least 1".into()));
        }
        if self.mcts.expansion_count == 0 {
            return Err(ChainError::InvalidConfig("mcts.expansion_count must be at least 1".into()));
        }
        if !self.mcts.exploration.is_finite() || self.mcts.exploration < 0.0 {
            return Err(ChainError::InvalidConfig(format!(
                "mcts.exploration must be finite and non-negative, got {}",
                self.mcts.exploration
            )));
        }
        if !self.last_decision.switch_penalty.is_finite() || self.last_decision.switch_penalty < 0.0 {
            return Err(ChainError::InvalidConfig(format!(
                "last_decision.switch_penalty must be finite and non-negative, got {}",
                self.last_decision.switch_penalty
            )));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: SearchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.yaml`/`.yml` or JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
        let config = if is_yaml { Self::from_yaml_str(&text)? } else { Self::from_json_str(&text)? };
        log::info!(
            "loaded search config from {}: strategy={} max_depth={} max_traversal={}",
            path.display(),
            config.strategy,
            config.max_depth,
            config.max_traversal
        );
        Ok(config)
    }
}

// ========== Tests ==========

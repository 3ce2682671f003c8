//! # chain_core - Action Chain Search for a 2D Soccer Agent
//!
//! Plans short chains of cooperative actions (pass, dribble, hold, shoot)
//! for the team in possession and picks the action to execute this cycle.
//!
//! ## Features
//! - Best-first, depth-first and Monte Carlo tree search behind one graph type
//! - Hard node budget and chain depth on every strategy
//! - Pluggable action generator and field evaluator
//! - Per-cycle chain holder with timestamp de-duplication
//!
//! ## Example
//! ```rust
//! use chain_core::{scenario, ChainHolder, CompositeGenerator, DefaultFieldEvaluator, SearchConfig};
//! use std::rc::Rc;
//!
//! let mut holder = ChainHolder::new(SearchConfig::fast());
//! holder
//!     .init(Rc::new(DefaultFieldEvaluator::new()), Rc::new(CompositeGenerator::standard()))
//!     .unwrap();
//!
//! let wm = scenario::edge_of_box();
//! holder.update(&wm).unwrap();
//! let action = holder.decision(&wm).unwrap().unwrap();
//! println!("{}", action);
//! ```

// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]
#![allow(clippy::large_enum_variant)]

pub mod chain;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod geom;
pub mod holder;
pub mod scenario;
pub mod search;
pub mod world;

pub use chain::{ActionCategory, ActionStatePair, CooperativeAction, PredictState, SafetyLevel, Sequence};
pub use config::{SearchConfig, StrategyKind};
pub use error::{ChainError, Result};
pub use evaluator::{DefaultFieldEvaluator, FieldEvaluator};
pub use generator::{ActionGenerator, CompositeGenerator};
pub use holder::ChainHolder;
pub use search::{ActionChainGraph, SearchStats};
pub use world::{BallObject, GameTime, PlayerObject, WorldSnapshot};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

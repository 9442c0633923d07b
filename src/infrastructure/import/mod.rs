// ============================================================
// IMPORT INFRASTRUCTURE LAYER
// ============================================================
// Encoding fallback, header location, delimiter trials,
// column normalization and report classification

mod classifier;
mod decoder;
mod header_locator;
mod normalizer;
mod resolver;
mod strategy;

pub use classifier::classify;
pub use normalizer::{ColumnNormalizer, ColumnPlan};
pub use resolver::TabularImportResolver;
pub use strategy::{ParseStrategy, StrategyChain};

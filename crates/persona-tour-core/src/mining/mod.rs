//! Frequent pattern mining over category-preference transactions.
//!
//! # Module Structure
//!
//! - `rule`: itemsets and association rules
//! - `miner`: the level-wise miner

mod miner;
mod rule;

pub use miner::FrequentPatternMiner;
pub use rule::{AssociationRule, FrequentItemset, Itemset};

//! Itemsets and association rules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::profile::CategoryCode;

/// A set of category codes. Sorted, so itemsets compare and print stably.
pub type Itemset = BTreeSet<CategoryCode>;

/// An itemset whose support met the miner's threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequentItemset {
    pub items: Itemset,
    pub support: f64,
}

impl FrequentItemset {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// `antecedent => consequent`, with the support of their union and the
/// confidence `support(union) / support(antecedent)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRule {
    pub antecedent: Itemset,
    pub consequent: Itemset,
    pub support: f64,
    pub confidence: f64,
}

impl fmt::Display for AssociationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_set(f, &self.antecedent)?;
        f.write_str(" => ")?;
        write_set(f, &self.consequent)
    }
}

fn write_set(f: &mut fmt::Formatter<'_>, items: &Itemset) -> fmt::Result {
    f.write_str("{")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_display() {
        let rule = AssociationRule {
            antecedent: ["F2", "F1"].into_iter().map(CategoryCode::from).collect(),
            consequent: ["F3"].into_iter().map(CategoryCode::from).collect(),
            support: 0.5,
            confidence: 1.0,
        };
        assert_eq!(rule.to_string(), "{F1, F2} => {F3}");
    }
}

//! Level-wise frequent itemset and association rule mining.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::MiningSettings;
use crate::profile::CategoryCode;

use super::rule::{AssociationRule, FrequentItemset, Itemset};

/// Mines frequent category combinations out of preference transactions.
///
/// A miner is cheap to build; the pipeline constructs a fresh one for every
/// subgroup so no itemsets or rules leak between subgroups.
#[derive(Debug, Clone)]
pub struct FrequentPatternMiner {
    settings: MiningSettings,
    transactions: Vec<Itemset>,
    itemsets: Vec<FrequentItemset>,
    supports: BTreeMap<Itemset, f64>,
    rules: Vec<AssociationRule>,
}

impl FrequentPatternMiner {
    pub fn new(settings: MiningSettings) -> Self {
        Self {
            settings,
            transactions: Vec::new(),
            itemsets: Vec::new(),
            supports: BTreeMap::new(),
            rules: Vec::new(),
        }
    }

    /// Replaces any previous result with itemsets and rules mined from
    /// `transactions`.
    pub fn fit<T, I>(&mut self, transactions: T)
    where
        T: IntoIterator<Item = I>,
        I: IntoIterator<Item = CategoryCode>,
    {
        self.transactions = transactions
            .into_iter()
            .map(|t| t.into_iter().collect())
            .collect();
        self.itemsets.clear();
        self.supports.clear();
        self.rules.clear();

        if self.transactions.is_empty() {
            return;
        }

        self.find_frequent_itemsets();
        self.derive_rules();

        tracing::debug!(
            transactions = self.transactions.len(),
            itemsets = self.itemsets.len(),
            rules = self.rules.len(),
            "mined preference patterns"
        );
    }

    pub fn settings(&self) -> &MiningSettings {
        &self.settings
    }

    /// Frequent itemsets grouped by size, smallest first.
    pub fn itemsets(&self) -> &[FrequentItemset] {
        &self.itemsets
    }

    pub fn rules(&self) -> &[AssociationRule] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<AssociationRule> {
        self.rules
    }

    /// Fraction of the fitted transactions that contain every item of `itemset`.
    pub fn support(&self, itemset: &Itemset) -> f64 {
        if let Some(&support) = self.supports.get(itemset) {
            return support;
        }
        if self.transactions.is_empty() {
            return 0.0;
        }
        self.count(itemset) as f64 / self.transactions.len() as f64
    }

    fn count(&self, itemset: &Itemset) -> usize {
        self.transactions
            .iter()
            .filter(|transaction| itemset.is_subset(transaction))
            .count()
    }

    fn find_frequent_itemsets(&mut self) {
        let total = self.transactions.len() as f64;
        let mut candidates: Vec<Itemset> = self
            .transactions
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|item| Itemset::from([item]))
            .collect();
        let mut level = 1;

        while !candidates.is_empty() {
            let candidate_count = candidates.len();
            let mut frequent = Vec::new();
            for items in candidates {
                let count = self.count(&items);
                let support = count as f64 / total;
                // Unseen itemsets are never frequent, even with a zero threshold.
                if count > 0 && support >= self.settings.min_support {
                    frequent.push(FrequentItemset { items, support });
                }
            }

            tracing::debug!(
                level,
                candidates = candidate_count,
                frequent = frequent.len(),
                "itemset level evaluated"
            );

            if frequent.is_empty() {
                break;
            }

            candidates = join(&frequent, level);
            for itemset in &frequent {
                self.supports.insert(itemset.items.clone(), itemset.support);
            }
            self.itemsets.extend(frequent);
            level += 1;
        }
    }

    fn derive_rules(&mut self) {
        let mut rules = Vec::new();

        for itemset in self.itemsets.iter().filter(|set| set.len() >= 2) {
            for item in &itemset.items {
                let mut antecedent = itemset.items.clone();
                antecedent.remove(item);

                let antecedent_support = self.support(&antecedent);
                if antecedent_support == 0.0 {
                    continue;
                }

                let confidence = itemset.support / antecedent_support;
                if confidence >= self.settings.min_confidence {
                    rules.push(AssociationRule {
                        antecedent,
                        consequent: Itemset::from([item.clone()]),
                        support: itemset.support,
                        confidence,
                    });
                }
            }
        }

        self.rules = rules;
    }
}

/// Pairwise unions of level-`size` itemsets that have exactly `size + 1` items.
fn join(frequent: &[FrequentItemset], size: usize) -> Vec<Itemset> {
    let mut candidates = BTreeSet::new();
    for (i, left) in frequent.iter().enumerate() {
        for right in &frequent[i + 1..] {
            let union: Itemset = left.items.union(&right.items).cloned().collect();
            if union.len() == size + 1 {
                candidates.insert(union);
            }
        }
    }
    candidates.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> Itemset {
        items.iter().map(|&item| CategoryCode::from(item)).collect()
    }

    fn transactions(rows: &[&[&str]]) -> Vec<Vec<CategoryCode>> {
        rows.iter()
            .map(|row| row.iter().map(|&item| CategoryCode::from(item)).collect())
            .collect()
    }

    fn fitted(rows: &[&[&str]], min_support: f64, min_confidence: f64) -> FrequentPatternMiner {
        let mut miner = FrequentPatternMiner::new(MiningSettings {
            min_support,
            min_confidence,
        });
        miner.fit(transactions(rows));
        miner
    }

    const BASKETS: &[&[&str]] = &[&["F1", "F2"], &["F1", "F2"], &["F1"], &["F2", "F3"]];

    #[test]
    fn test_pair_support_and_rule_confidence() {
        let miner = fitted(BASKETS, 0.5, 0.6);

        let pair = miner
            .itemsets()
            .iter()
            .find(|s| s.items == set(&["F1", "F2"]))
            .expect("{F1, F2} should be frequent");
        assert!((pair.support - 0.5).abs() < 1e-12);

        let rule = miner
            .rules()
            .iter()
            .find(|r| r.antecedent == set(&["F1"]) && r.consequent == set(&["F2"]))
            .expect("{F1} => {F2} should be kept");
        assert!((rule.support - 0.5).abs() < 1e-12);
        assert!((rule.confidence - 0.5 / 0.75).abs() < 1e-12);

        // F3 appears in a single basket, below 0.5 support.
        assert!(miner.itemsets().iter().all(|s| !s.items.contains(&"F3".into())));
    }

    #[test]
    fn test_itemsets_are_grouped_by_level() {
        let miner = fitted(BASKETS, 0.25, 0.0);
        let sizes: Vec<usize> = miner.itemsets().iter().map(|s| s.len()).collect();
        let mut sorted = sizes.clone();
        sorted.sort_unstable();
        assert_eq!(sizes, sorted);
    }

    #[test]
    fn test_consequent_is_single_item() {
        let miner = fitted(
            &[&["A", "B", "C"], &["A", "B", "C"], &["A", "B"], &["C"]],
            0.5,
            0.0,
        );
        assert!(miner.itemsets().iter().any(|s| s.items == set(&["A", "B", "C"])));
        for rule in miner.rules() {
            assert_eq!(rule.consequent.len(), 1);
            assert!(rule.antecedent.is_disjoint(&rule.consequent));
            let union: Itemset = rule.antecedent.union(&rule.consequent).cloned().collect();
            assert!(miner.itemsets().iter().any(|s| s.items == union));
        }
        // Three two-item antecedents for {A, B, C} plus two for each frequent pair.
        let triple_rules = miner.rules().iter().filter(|r| r.antecedent.len() == 2).count();
        assert_eq!(triple_rules, 3);
    }

    #[test]
    fn test_empty_input() {
        let miner = fitted(&[], 0.3, 0.6);
        assert!(miner.itemsets().is_empty());
        assert!(miner.rules().is_empty());
        assert_eq!(miner.support(&set(&["F1"])), 0.0);

        let miner = fitted(&[&[], &[]], 0.0, 0.0);
        assert!(miner.itemsets().is_empty());
    }

    #[test]
    fn test_refit_is_idempotent() {
        let mut miner = FrequentPatternMiner::new(MiningSettings::REDUCED);
        miner.fit(transactions(BASKETS));
        let first_itemsets = miner.itemsets().to_vec();
        let first_rules = miner.rules().to_vec();

        miner.fit(transactions(BASKETS));
        assert_eq!(miner.itemsets(), first_itemsets.as_slice());
        assert_eq!(miner.rules(), first_rules.as_slice());
    }

    #[test]
    fn test_refit_discards_previous_result() {
        let mut miner = FrequentPatternMiner::new(MiningSettings::REDUCED);
        miner.fit(transactions(BASKETS));
        assert!(!miner.rules().is_empty());

        miner.fit(transactions(&[&["X"], &["Y"]]));
        assert!(miner.rules().is_empty());
        assert_eq!(miner.itemsets().len(), 2);
    }

    #[test]
    fn test_lower_thresholds_never_shrink_results() {
        let rows: &[&[&str]] = &[
            &["F1", "F2", "F5"],
            &["F1", "F2"],
            &["F2", "F5"],
            &["F1", "F5", "F7"],
            &["F1", "F2", "F5", "F7"],
            &["F3"],
        ];

        let supports = [0.8, 0.6, 0.4, 0.3, 0.2, 0.1];
        for pair in supports.windows(2) {
            let strict = fitted(rows, pair[0], 0.5);
            let loose = fitted(rows, pair[1], 0.5);
            for itemset in strict.itemsets() {
                assert!(
                    loose.itemsets().iter().any(|s| s.items == itemset.items),
                    "lowering min_support dropped {:?}",
                    itemset.items
                );
            }
        }

        let confidences = [1.0, 0.8, 0.6, 0.4, 0.0];
        for pair in confidences.windows(2) {
            let strict = fitted(rows, 0.3, pair[0]);
            let loose = fitted(rows, 0.3, pair[1]);
            for rule in strict.rules() {
                assert!(
                    loose.rules().contains(rule),
                    "lowering min_confidence dropped {rule}"
                );
            }
        }
    }

    #[test]
    fn test_duplicate_items_in_a_transaction_count_once() {
        let miner = fitted(&[&["F1", "F1"], &["F2"]], 0.5, 0.0);
        let single = miner
            .itemsets()
            .iter()
            .find(|s| s.items == set(&["F1"]))
            .unwrap();
        assert!((single.support - 0.5).abs() < 1e-12);
    }
}

mod rules;

pub use rules::{
    BestCustomerSeller, CustomerRetention, HighestAverageProfit, LargestSingleSale, StableGrowth,
};

use super::domain::{Batch, Customer, Item, Product, PurchaseRecord, Seller};
use super::grouping::{group_by, OrderedMap};
use super::metrics::{aggregate, MetricsError, MissingSkuPolicy, SalesMetrics};
use super::profit::ProfitModel;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Read-only view handed to every bonus rule: the aggregated statistics,
/// the grouped raw data, the catalogs, and the profit model in force.
/// Rules never mutate it, so they can run in any order.
pub struct BonusContext<'a> {
    pub metrics: &'a SalesMetrics,
    pub records_by_seller: &'a OrderedMap<String, Vec<&'a PurchaseRecord>>,
    pub records_by_customer: &'a OrderedMap<String, Vec<&'a PurchaseRecord>>,
    pub items_by_sku: &'a OrderedMap<String, Vec<&'a Item>>,
    pub sellers: &'a [Seller],
    pub customers: &'a [Customer],
    pub catalog: &'a HashMap<&'a str, &'a Product>,
    pub profit_model: &'a dyn ProfitModel,
}

/// One discretionary reward attributed to at most one seller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BonusAward {
    pub category: &'static str,
    /// Absent when no seller qualified, e.g. on an empty batch.
    pub seller_id: Option<String>,
    pub bonus: f64,
}

impl BonusAward {
    pub(crate) fn won(category: &'static str, seller_id: String, bonus: f64) -> Self {
        Self {
            category,
            seller_id: Some(seller_id),
            bonus: round_to_cents(bonus),
        }
    }

    pub(crate) fn no_winner(category: &'static str) -> Self {
        Self {
            category,
            seller_id: None,
            bonus: 0.0,
        }
    }
}

/// An independent bonus policy: selects a winning seller from the shared
/// context and prices the reward. Implementations must be pure over the
/// context they receive.
pub trait BonusRule: Send + Sync {
    fn category(&self) -> &'static str;
    fn evaluate(&self, ctx: &BonusContext<'_>) -> BonusAward;
}

/// Builds the shared context once per batch and evaluates every registered
/// rule against it. Adding a rule never requires touching the aggregation.
pub struct BonusEngine {
    rules: Vec<Box<dyn BonusRule>>,
}

impl BonusEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Engine preloaded with the five reference rules.
    pub fn standard() -> Self {
        let mut engine = Self::new();
        engine.register(Box::new(BestCustomerSeller));
        engine.register(Box::new(CustomerRetention));
        engine.register(Box::new(LargestSingleSale));
        engine.register(Box::new(HighestAverageProfit));
        engine.register(Box::new(StableGrowth::default()));
        engine
    }

    pub fn register(&mut self, rule: Box<dyn BonusRule>) {
        self.rules.push(rule);
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Runs the full pipeline: groupings, aggregation, then every rule in
    /// registration order.
    pub fn run(
        &self,
        batch: &Batch,
        profit_model: &dyn ProfitModel,
        policy: MissingSkuPolicy,
    ) -> Result<Vec<BonusAward>, MetricsError> {
        let records_by_seller = records_by_seller(batch);
        let records_by_customer = records_by_customer(batch);
        let items_by_sku = items_by_sku(batch);
        let metrics = aggregate(&batch.purchase_records, profit_model, &batch.products, policy)?;
        let catalog = batch.product_catalog();

        let ctx = BonusContext {
            metrics: &metrics,
            records_by_seller: &records_by_seller,
            records_by_customer: &records_by_customer,
            items_by_sku: &items_by_sku,
            sellers: &batch.sellers,
            customers: &batch.customers,
            catalog: &catalog,
            profit_model,
        };

        let awards = self
            .rules
            .iter()
            .map(|rule| {
                debug!(category = rule.category(), "evaluating bonus rule");
                rule.evaluate(&ctx)
            })
            .collect();

        Ok(awards)
    }
}

impl Default for BonusEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Purchase records keyed by seller, keys in first-appearance order.
pub fn records_by_seller(batch: &Batch) -> OrderedMap<String, Vec<&PurchaseRecord>> {
    group_by(batch.purchase_records.iter(), |record| {
        record.seller_id.clone()
    })
}

/// Purchase records keyed by customer, keys in first-appearance order.
pub fn records_by_customer(batch: &Batch) -> OrderedMap<String, Vec<&PurchaseRecord>> {
    group_by(batch.purchase_records.iter(), |record| {
        record.customer_id.clone()
    })
}

/// Every sold item, flattened across records and keyed by sku.
pub fn items_by_sku(batch: &Batch) -> OrderedMap<String, Vec<&Item>> {
    group_by(
        batch
            .purchase_records
            .iter()
            .flat_map(|record| record.items.iter()),
        |item| item.sku.clone(),
    )
}

pub(crate) fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

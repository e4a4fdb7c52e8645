use super::domain::{Item, Product, PurchaseRecord};
use super::grouping::OrderedMap;
use super::profit::ProfitModel;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::warn;

/// How the aggregator reacts when an item references a sku absent from the
/// product catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingSkuPolicy {
    /// Count the item's revenue and quantity but contribute no profit.
    /// A warning is logged for each skipped lookup.
    #[default]
    SkipProfit,
    /// Abort the aggregation with [`MetricsError::UnknownSku`].
    Fail,
}

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("item references sku '{sku}' missing from the product catalog")]
    UnknownSku { sku: String },
}

/// Accumulated performance of one seller across the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SellerStats {
    pub revenue: f64,
    pub profit: f64,
    pub items: Vec<Item>,
    pub customers: BTreeSet<String>,
}

/// Accumulated spend of one customer across the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomerStats {
    pub revenue: f64,
    pub profit: f64,
    pub sellers: BTreeSet<String>,
}

/// Units moved and revenue taken per catalog sku.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ProductStats {
    pub quantity: u32,
    pub revenue: f64,
}

/// The three cross-referenced statistic maps produced by one aggregation
/// pass. Each map iterates in the order its keys first appeared in the
/// input batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SalesMetrics {
    pub sellers: OrderedMap<String, SellerStats>,
    pub customers: OrderedMap<String, CustomerStats>,
    pub products: OrderedMap<String, ProductStats>,
}

/// Folds every record into [`SalesMetrics`] in a single pass.
///
/// Per item, the net-of-discount revenue is computed once and reused for the
/// seller, customer, and product accumulations so the three views cannot
/// diverge. Totals do not depend on record or item order; only
/// `SellerStats::items` and map key order follow input order.
pub fn aggregate(
    records: &[PurchaseRecord],
    profit_model: &dyn ProfitModel,
    products: &[Product],
    policy: MissingSkuPolicy,
) -> Result<SalesMetrics, MetricsError> {
    let mut catalog = std::collections::HashMap::with_capacity(products.len());
    for product in products {
        catalog.entry(product.sku.as_str()).or_insert(product);
    }

    let mut metrics = SalesMetrics::default();

    for record in records {
        metrics
            .sellers
            .entry_or_insert_with(record.seller_id.clone(), SellerStats::default);
        metrics
            .customers
            .entry_or_insert_with(record.customer_id.clone(), CustomerStats::default);

        for item in &record.items {
            let profit = match catalog.get(item.sku.as_str()) {
                Some(product) => profit_model.compute(item, product),
                None => match policy {
                    MissingSkuPolicy::Fail => {
                        return Err(MetricsError::UnknownSku {
                            sku: item.sku.clone(),
                        })
                    }
                    MissingSkuPolicy::SkipProfit => {
                        warn!(sku = %item.sku, seller = %record.seller_id, "sku missing from catalog; profit contribution skipped");
                        0.0
                    }
                },
            };

            let revenue = item.net_revenue();

            let seller = metrics
                .sellers
                .entry_or_insert_with(record.seller_id.clone(), SellerStats::default);
            seller.revenue += revenue;
            seller.profit += profit;
            seller.items.push(item.clone());
            seller.customers.insert(record.customer_id.clone());

            let customer = metrics
                .customers
                .entry_or_insert_with(record.customer_id.clone(), CustomerStats::default);
            customer.revenue += revenue;
            customer.profit += profit;
            customer.sellers.insert(record.seller_id.clone());

            let product = metrics
                .products
                .entry_or_insert_with(item.sku.clone(), ProductStats::default);
            product.quantity += item.quantity;
            product.revenue += revenue;
        }
    }

    Ok(metrics)
}

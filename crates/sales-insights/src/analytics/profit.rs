use super::domain::{Item, Product};

/// Strategy for computing the net profit of one sold line item.
///
/// Passed into the aggregator and the bonus context so the formula can be
/// swapped without touching aggregation or rule code. Implementations are
/// only called with a product that was resolved from the catalog; missing
/// skus are handled by the aggregator's lookup policy.
pub trait ProfitModel {
    fn compute(&self, item: &Item, product: &Product) -> f64;
}

/// Default model: net-of-discount sale value minus acquisition cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleMargin;

impl ProfitModel for SimpleMargin {
    fn compute(&self, item: &Item, product: &Product) -> f64 {
        item.net_revenue() - product.purchase_price * f64::from(item.quantity)
    }
}

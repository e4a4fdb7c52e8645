use super::{BonusAward, BonusContext, BonusRule};
use crate::analytics::grouping::group_by;
use crate::analytics::trend::{analyze_sequence, DEFAULT_TOLERANCE};

/// Rewards the seller who captured the highest-spending customer with 5% of
/// that customer's total revenue.
pub struct BestCustomerSeller;

impl BonusRule for BestCustomerSeller {
    fn category(&self) -> &'static str {
        "Best Customer Seller"
    }

    fn evaluate(&self, ctx: &BonusContext<'_>) -> BonusAward {
        let best_customer = pick_max(ctx.metrics.customers.iter(), |(_, stats)| stats.revenue);
        let Some(((_, customer_stats), customer_revenue)) = best_customer else {
            return BonusAward::no_winner(self.category());
        };

        let winner = pick_max(customer_stats.sellers.iter(), |seller_id| {
            ctx.metrics
                .sellers
                .get(*seller_id)
                .map(|stats| stats.revenue)
                .unwrap_or(0.0)
        });

        match winner {
            Some((seller_id, _)) => {
                BonusAward::won(self.category(), seller_id.clone(), customer_revenue * 0.05)
            }
            None => BonusAward::no_winner(self.category()),
        }
    }
}

/// Rewards the seller whose single best customer out-spends every other
/// seller's best customer. Flat 1000 payout.
pub struct CustomerRetention;

impl BonusRule for CustomerRetention {
    fn category(&self) -> &'static str {
        "Best Customer Retention"
    }

    fn evaluate(&self, ctx: &BonusContext<'_>) -> BonusAward {
        let candidates = ctx.metrics.sellers.iter().filter_map(|(seller_id, stats)| {
            let best_customer_revenue = stats
                .customers
                .iter()
                .map(|customer_id| {
                    ctx.metrics
                        .customers
                        .get(customer_id)
                        .map(|customer| customer.revenue)
                        .unwrap_or(0.0)
                })
                .fold(None::<f64>, |best, revenue| {
                    Some(best.map_or(revenue, |value| value.max(revenue)))
                })?;
            Some((seller_id, best_customer_revenue))
        });

        match pick_max(candidates, |(_, revenue)| *revenue) {
            Some(((seller_id, _), _)) => {
                BonusAward::won(self.category(), seller_id.clone(), 1000.0)
            }
            None => BonusAward::no_winner(self.category()),
        }
    }
}

/// Rewards the seller who owns the single largest transaction with 10% of
/// that transaction's total amount.
pub struct LargestSingleSale;

impl BonusRule for LargestSingleSale {
    fn category(&self) -> &'static str {
        "Largest Single Sale"
    }

    fn evaluate(&self, ctx: &BonusContext<'_>) -> BonusAward {
        let records = ctx
            .records_by_seller
            .values()
            .flat_map(|records| records.iter().copied());

        match pick_max(records, |record| record.total_amount) {
            Some((record, total_amount)) => BonusAward::won(
                self.category(),
                record.seller_id.clone(),
                total_amount * 0.1,
            ),
            None => BonusAward::no_winner(self.category()),
        }
    }
}

/// Rewards the seller with the highest per-item profit with 10% of that
/// average.
pub struct HighestAverageProfit;

impl BonusRule for HighestAverageProfit {
    fn category(&self) -> &'static str {
        "Highest Average Profit"
    }

    fn evaluate(&self, ctx: &BonusContext<'_>) -> BonusAward {
        let candidates = ctx.metrics.sellers.iter().map(|(seller_id, stats)| {
            let item_count = stats.items.len().max(1);
            (seller_id, stats.profit / item_count as f64)
        });

        match pick_max(candidates, |(_, average)| *average) {
            Some(((seller_id, average), _)) => {
                BonusAward::won(self.category(), seller_id.clone(), average * 0.1)
            }
            None => BonusAward::no_winner(self.category()),
        }
    }
}

/// Rewards the seller whose monthly average profit grows steadily: the
/// chronological sequence of monthly averages must be both stable and
/// increasing. Pays 15% of the overall average of those monthly averages.
pub struct StableGrowth {
    pub tolerance: f64,
}

impl Default for StableGrowth {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl BonusRule for StableGrowth {
    fn category(&self) -> &'static str {
        "Stable Growth"
    }

    fn evaluate(&self, ctx: &BonusContext<'_>) -> BonusAward {
        let candidates = ctx
            .records_by_seller
            .iter()
            .filter_map(|(seller_id, records)| {
                let monthly = group_by(records.iter().copied(), |record| record.month_key());
                let mut months: Vec<&String> = monthly.keys().collect();
                // "%Y-%m" keys sort lexicographically into calendar order.
                months.sort();

                let monthly_averages: Vec<f64> = months
                    .into_iter()
                    .map(|month| {
                        let profits: Vec<f64> = monthly
                            .get(month)
                            .into_iter()
                            .flatten()
                            .flat_map(|record| record.items.iter())
                            .filter_map(|item| {
                                let product = ctx.catalog.get(item.sku.as_str())?;
                                Some(ctx.profit_model.compute(item, *product))
                            })
                            .collect();
                        average(&profits)
                    })
                    .collect();

                let trends = analyze_sequence(&monthly_averages, self.tolerance);
                if trends.is_stable && trends.is_increasing {
                    Some((seller_id, average(&monthly_averages)))
                } else {
                    None
                }
            });

        match pick_max(candidates, |(_, average)| *average) {
            Some(((seller_id, average), _)) => {
                BonusAward::won(self.category(), seller_id.clone(), average * 0.15)
            }
            None => BonusAward::no_winner(self.category()),
        }
    }
}

/// First-past-the-post maximum: a later candidate replaces the running best
/// only on a strictly greater metric, so ties resolve to the candidate
/// encountered first. Returns `None` only for an empty iterator.
fn pick_max<T, I, F>(candidates: I, mut metric: F) -> Option<(T, f64)>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> f64,
{
    let mut best: Option<(T, f64)> = None;
    for candidate in candidates {
        let value = metric(&candidate);
        match &best {
            Some((_, best_value)) if value <= *best_value => {}
            _ => best = Some((candidate, value)),
        }
    }
    best
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

use chrono::NaiveDate;
use sales_insights::analytics::bonus::{items_by_sku, records_by_customer, records_by_seller};
use sales_insights::analytics::domain::{Batch, Item, Product, PurchaseRecord};
use sales_insights::analytics::{BonusEngine, MissingSkuPolicy, SimpleMargin};

fn item(sku: &str, quantity: u32, sale_price: f64, discount: f64) -> Item {
    Item {
        sku: sku.to_string(),
        quantity,
        sale_price,
        discount,
    }
}

fn record(
    seller: &str,
    customer: &str,
    date: (i32, u32, u32),
    total_amount: f64,
    items: Vec<Item>,
) -> PurchaseRecord {
    PurchaseRecord {
        seller_id: seller.to_string(),
        customer_id: customer.to_string(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid record date"),
        total_amount,
        items,
    }
}

/// S1 sells steadily to C1 with profits 30, 31, 32 across three months;
/// S2 owns the largest single sale and the better per-item profit. The two
/// sellers tie on best-customer revenue (both serve C1).
fn sample_batch() -> Batch {
    Batch {
        purchase_records: vec![
            record("S1", "C1", (2025, 1, 15), 100.0, vec![item("A", 2, 25.0, 0.0)]),
            record("S1", "C1", (2025, 2, 15), 102.0, vec![item("A", 2, 25.5, 0.0)]),
            record("S1", "C1", (2025, 3, 15), 104.0, vec![item("A", 2, 26.0, 0.0)]),
            record("S2", "C2", (2025, 1, 20), 500.0, vec![item("B", 10, 20.0, 50.0)]),
            record("S2", "C1", (2025, 2, 20), 90.0, vec![item("B", 2, 30.0, 0.0)]),
        ],
        products: vec![
            Product {
                sku: "A".to_string(),
                purchase_price: 10.0,
            },
            Product {
                sku: "B".to_string(),
                purchase_price: 5.0,
            },
        ],
        sellers: Vec::new(),
        customers: Vec::new(),
    }
}

fn run_standard(batch: &Batch) -> Vec<sales_insights::analytics::BonusAward> {
    BonusEngine::standard()
        .run(batch, &SimpleMargin, MissingSkuPolicy::Fail)
        .expect("engine run succeeds")
}

#[test]
fn awards_come_back_in_registration_order() {
    let awards = run_standard(&sample_batch());
    let categories: Vec<&str> = awards.iter().map(|award| award.category).collect();
    assert_eq!(
        categories,
        vec![
            "Best Customer Seller",
            "Best Customer Retention",
            "Largest Single Sale",
            "Highest Average Profit",
            "Stable Growth",
        ]
    );
}

#[test]
fn best_customer_seller_takes_five_percent_of_customer_revenue() {
    let awards = run_standard(&sample_batch());
    let award = &awards[0];

    // C1 spent 213 in total; among C1's sellers, S2's overall revenue (160)
    // beats S1's (153).
    assert_eq!(award.seller_id.as_deref(), Some("S2"));
    assert_eq!(award.bonus, 10.65);
}

#[test]
fn customer_retention_tie_goes_to_first_seen_seller() {
    let awards = run_standard(&sample_batch());
    let award = &awards[1];

    // Both sellers' best customer is C1 (213). S1 entered the stats first.
    assert_eq!(award.seller_id.as_deref(), Some("S1"));
    assert_eq!(award.bonus, 1000.0);
}

#[test]
fn largest_single_sale_pays_ten_percent_of_the_record() {
    let awards = run_standard(&sample_batch());
    let award = &awards[2];

    assert_eq!(award.seller_id.as_deref(), Some("S2"));
    assert_eq!(award.bonus, 50.0);
}

#[test]
fn highest_average_profit_pays_ten_percent_of_the_average() {
    let awards = run_standard(&sample_batch());
    let award = &awards[3];

    // S1 averages 31 per item, S2 averages 50.
    assert_eq!(award.seller_id.as_deref(), Some("S2"));
    assert_eq!(award.bonus, 5.0);
}

#[test]
fn stable_growth_requires_stable_and_increasing_months() {
    let awards = run_standard(&sample_batch());
    let award = &awards[4];

    // S1's monthly averages [30, 31, 32] are within 5% step to step and
    // rising; S2's [50, 50] is flat, so it does not qualify.
    assert_eq!(award.seller_id.as_deref(), Some("S1"));
    assert_eq!(award.bonus, 4.65);
}

#[test]
fn single_record_scenario_awards_largest_single_sale() {
    let batch = Batch {
        purchase_records: vec![record(
            "S1",
            "C1",
            (2025, 3, 14),
            100.0,
            vec![item("A", 2, 25.0, 0.0)],
        )],
        products: vec![Product {
            sku: "A".to_string(),
            purchase_price: 10.0,
        }],
        sellers: Vec::new(),
        customers: Vec::new(),
    };

    let awards = run_standard(&batch);
    let award = awards
        .iter()
        .find(|award| award.category == "Largest Single Sale")
        .expect("rule registered");

    assert_eq!(award.seller_id.as_deref(), Some("S1"));
    assert_eq!(award.bonus, 10.0);
}

#[test]
fn empty_batch_yields_absent_winners_without_panicking() {
    let awards = run_standard(&Batch::default());

    assert_eq!(awards.len(), 5);
    for award in &awards {
        assert!(
            award.seller_id.is_none(),
            "no winner expected for '{}' on an empty batch",
            award.category
        );
        assert_eq!(award.bonus, 0.0);
    }
}

#[test]
fn engine_runs_are_deterministic() {
    let batch = sample_batch();
    assert_eq!(run_standard(&batch), run_standard(&batch));
}

#[test]
fn groupings_partition_the_batch_completely() {
    let batch = sample_batch();

    let by_seller = records_by_seller(&batch);
    let by_customer = records_by_customer(&batch);

    let seller_total: usize = by_seller.values().map(Vec::len).sum();
    let customer_total: usize = by_customer.values().map(Vec::len).sum();
    assert_eq!(seller_total, batch.purchase_records.len());
    assert_eq!(customer_total, batch.purchase_records.len());

    assert_eq!(
        by_seller.keys().cloned().collect::<Vec<_>>(),
        vec!["S1".to_string(), "S2".to_string()]
    );
    assert_eq!(
        by_seller.get("S1").map(Vec::len),
        Some(3),
        "group order follows the input records"
    );

    let by_sku = items_by_sku(&batch);
    let item_total: usize = by_sku.values().map(Vec::len).sum();
    let flattened: usize = batch
        .purchase_records
        .iter()
        .map(|record| record.items.len())
        .sum();
    assert_eq!(item_total, flattened);
    assert_eq!(
        by_sku.keys().cloned().collect::<Vec<_>>(),
        vec!["A".to_string(), "B".to_string()]
    );
}

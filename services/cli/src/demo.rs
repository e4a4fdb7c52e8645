use chrono::NaiveDate;
use clap::Args;
use sales_insights::analytics::bonus::{
    BestCustomerSeller, CustomerRetention, HighestAverageProfit, LargestSingleSale, StableGrowth,
};
use sales_insights::analytics::domain::{Batch, Customer, Item, Product, PurchaseRecord, Seller};
use sales_insights::analytics::{aggregate, BonusEngine, SalesMetrics, SimpleMargin};
use sales_insights::config::AppConfig;
use sales_insights::error::AppError;
use sales_insights::imports::{BatchImporter, ProductCatalogImporter};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Batch JSON file (purchase_records, products, sellers, customers)
    #[arg(long)]
    pub(crate) batch: PathBuf,
    /// Optional product catalog CSV (sku,purchase_price) merged into the batch
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Emit machine-readable JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Emit machine-readable JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_report(args: ReportArgs, config: &AppConfig) -> Result<(), AppError> {
    let mut batch = BatchImporter::from_path(&args.batch)?;
    if let Some(path) = args.catalog {
        let products = ProductCatalogImporter::from_path(&path)?;
        ProductCatalogImporter::merge_into(&mut batch, products);
    }

    info!(
        records = batch.purchase_records.len(),
        products = batch.products.len(),
        "batch loaded"
    );

    render(&batch, config, args.json)
}

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let batch = sample_batch();
    if !args.json {
        println!("Sales insights demo (synthetic batch)\n");
    }
    render(&batch, config, args.json)
}

fn render(batch: &Batch, config: &AppConfig, as_json: bool) -> Result<(), AppError> {
    let policy = config.analytics.missing_sku_policy;
    let metrics = aggregate(&batch.purchase_records, &SimpleMargin, &batch.products, policy)?;

    let mut engine = BonusEngine::new();
    engine.register(Box::new(BestCustomerSeller));
    engine.register(Box::new(CustomerRetention));
    engine.register(Box::new(LargestSingleSale));
    engine.register(Box::new(HighestAverageProfit));
    engine.register(Box::new(StableGrowth {
        tolerance: config.analytics.trend_tolerance,
    }));

    let awards = engine.run(batch, &SimpleMargin, policy)?;

    if as_json {
        let payload = json!({
            "sellers": metrics.sellers,
            "customers": metrics.customers,
            "products": metrics.products,
            "awards": awards,
        });
        println!("{}", serde_json::to_string_pretty(&payload).expect("metrics serialize"));
        return Ok(());
    }

    render_metrics(&metrics);

    println!("\nBonus awards");
    for award in &awards {
        match &award.seller_id {
            Some(seller_id) => {
                println!("  {:<24} -> {:<8} {:>10.2}", award.category, seller_id, award.bonus)
            }
            None => println!("  {:<24} -> no qualifying seller", award.category),
        }
    }

    Ok(())
}

fn render_metrics(metrics: &SalesMetrics) {
    println!("Seller performance");
    for (seller_id, stats) in metrics.sellers.iter() {
        println!(
            "  {:<8} revenue {:>10.2}  profit {:>10.2}  items {:>4}  customers {:>3}",
            seller_id,
            stats.revenue,
            stats.profit,
            stats.items.len(),
            stats.customers.len()
        );
    }

    println!("\nCustomer spend");
    for (customer_id, stats) in metrics.customers.iter() {
        println!(
            "  {:<8} revenue {:>10.2}  profit {:>10.2}  sellers {:>3}",
            customer_id,
            stats.revenue,
            stats.profit,
            stats.sellers.len()
        );
    }

    println!("\nProduct movement");
    for (sku, stats) in metrics.products.iter() {
        println!(
            "  {:<8} quantity {:>6}  revenue {:>10.2}",
            sku, stats.quantity, stats.revenue
        );
    }
}

fn sample_batch() -> Batch {
    let item = |sku: &str, quantity: u32, sale_price: f64, discount: f64| Item {
        sku: sku.to_string(),
        quantity,
        sale_price,
        discount,
    };
    let record = |seller: &str, customer: &str, date: &str, total_amount: f64, items: Vec<Item>| {
        PurchaseRecord {
            seller_id: seller.to_string(),
            customer_id: customer.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid demo date"),
            total_amount,
            items,
        }
    };

    Batch {
        purchase_records: vec![
            record("S1", "C1", "2025-01-12", 100.0, vec![item("KB-01", 2, 25.0, 0.0)]),
            record("S1", "C1", "2025-02-10", 102.0, vec![item("KB-01", 2, 25.5, 0.0)]),
            record("S1", "C2", "2025-03-18", 104.0, vec![item("KB-01", 2, 26.0, 0.0)]),
            record("S2", "C2", "2025-01-25", 500.0, vec![item("MN-27", 10, 20.0, 50.0)]),
            record("S2", "C1", "2025-02-07", 90.0, vec![item("MN-27", 2, 30.0, 0.0)]),
            record(
                "S3",
                "C3",
                "2025-03-02",
                180.0,
                vec![item("KB-01", 1, 30.0, 10.0), item("MN-27", 3, 28.0, 0.0)],
            ),
        ],
        products: vec![
            Product {
                sku: "KB-01".to_string(),
                purchase_price: 10.0,
            },
            Product {
                sku: "MN-27".to_string(),
                purchase_price: 5.0,
            },
        ],
        sellers: vec![
            Seller {
                id: "S1".to_string(),
                name: "Ada".to_string(),
            },
            Seller {
                id: "S2".to_string(),
                name: "Bram".to_string(),
            },
            Seller {
                id: "S3".to_string(),
                name: "Cleo".to_string(),
            },
        ],
        customers: vec![
            Customer {
                id: "C1".to_string(),
                name: "Northwind".to_string(),
            },
            Customer {
                id: "C2".to_string(),
                name: "Initech".to_string(),
            },
            Customer {
                id: "C3".to_string(),
                name: "Globex".to_string(),
            },
        ],
    }
}

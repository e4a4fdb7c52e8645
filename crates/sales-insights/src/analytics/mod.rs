pub mod bonus;
pub mod domain;
pub mod grouping;
pub mod metrics;
pub mod profit;
pub mod trend;

pub use bonus::{BonusAward, BonusContext, BonusEngine, BonusRule};
pub use grouping::{group_by, OrderedMap};
pub use metrics::{aggregate, MetricsError, MissingSkuPolicy, SalesMetrics};
pub use profit::{ProfitModel, SimpleMargin};
pub use trend::{analyze_sequence, TrendSummary, DEFAULT_TOLERANCE};

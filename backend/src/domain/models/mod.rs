pub mod daily_record;
pub mod monthly_record;
pub mod publisher;
pub mod service_month;

pub use daily_record::{DailyActivity, DailyRecord};
pub use monthly_record::{MonthTotals, MonthlyRecord};
pub use publisher::Publisher;
pub use service_month::{parse_service_date, ServiceMonth};

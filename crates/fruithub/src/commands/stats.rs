//! Statistics command handler.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use fruithub_core::model::QuickStat;
use fruithub_core::{DataStore, StatBundle};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct QuickStatRow {
    #[tabled(rename = "Metric")]
    title: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Change")]
    change: String,
    #[tabled(rename = "Trend")]
    trend: String,
}

impl From<&QuickStat> for QuickStatRow {
    fn from(q: &QuickStat) -> Self {
        Self {
            title: q.title.clone(),
            value: q.value.to_string(),
            change: q.change.clone(),
            trend: q.change_type.to_string(),
        }
    }
}

fn summary(stats: &StatBundle) -> String {
    let orders = &stats.order_stats;
    let categories = &stats.category_stats;
    let mut out = output::detail_lines(&[
        ("Customers", stats.total_customers.to_string()),
        ("Active users", stats.active_users.to_string()),
        ("VIP customers", stats.vip_customers.to_string()),
        ("Avg customer value", format!("{:.2}", stats.avg_customer_value)),
        (
            "Orders",
            format!(
                "{} total ({} pending, {} processing, {} delivered, {} cancelled)",
                orders.total(),
                orders.pending,
                orders.processing,
                orders.delivered,
                orders.cancelled
            ),
        ),
        (
            "Catalog",
            format!(
                "{} products in {} categories ({:.1} avg)",
                categories.total_products,
                categories.total_categories,
                categories.average_per_category
            ),
        ),
        (
            "Largest category",
            format!(
                "{} ({})",
                categories.largest_category.name, categories.largest_category.product_count
            ),
        ),
    ]);

    if !stats.quick_stats.is_empty() {
        let rows: Vec<QuickStatRow> = stats.quick_stats.iter().map(QuickStatRow::from).collect();
        out.push_str("\n\n");
        out.push_str(&Table::new(rows).with(Style::rounded()).to_string());
    }
    out
}

pub async fn handle(store: &DataStore, global: &GlobalOpts) -> Result<(), CliError> {
    store.stats().load().await?;
    let stats = store.stats().data();

    let out = output::render_single(&global.output, stats.as_ref(), summary, |s| {
        s.total_customers.to_string()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

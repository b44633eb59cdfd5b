// CSV export of filtered orders
use crate::domain::order::Order;
use crate::domain::restaurant::{Restaurant, RestaurantIndex};
use chrono::NaiveDate;

pub const CSV_HEADER: [&str; 5] = ["Date", "Restaurant", "Amount", "Hour", "Customer"];

/// Quotes a field only when it carries a delimiter, quote or line break.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_row(out: &mut String, fields: &[&str]) {
    let row: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
    out.push_str(&row.join(","));
}

/// One header row plus one row per order, rows separated by `\n`.
///
/// Restaurant names resolve by id; an unknown id yields an empty name.
pub fn orders_to_csv(orders: &[&Order], restaurants: &[Restaurant]) -> String {
    let index = RestaurantIndex::new(restaurants);
    let mut out = String::new();
    write_row(&mut out, &CSV_HEADER);

    for order in orders {
        let date = order.date.to_string();
        let amount = order.amount.to_string();
        let hour = order.hour.to_string();
        out.push('\n');
        write_row(
            &mut out,
            &[
                date.as_str(),
                index.name_of(&order.restaurant_id),
                amount.as_str(),
                hour.as_str(),
                order.customer_name.as_str(),
            ],
        );
    }

    out
}

/// Download name for an export produced on `day`
pub fn export_file_name(day: NaiveDate) -> String {
    format!("filtered-orders-{}.csv", day.format("%Y-%m-%d"))
}

// Mock restaurants and generated orders standing in for a real data source
use crate::domain::analytics::round_cents;
use crate::domain::order::Order;
use crate::domain::restaurant::Restaurant;
use chrono::{Days, NaiveDate};
use rand::{Rng, SeedableRng};

const MIN_ORDERS_PER_DAY: u32 = 20;
const MAX_ORDERS_PER_DAY: u32 = 40;
const FIRST_HOUR: u8 = 10;
const LAST_HOUR: u8 = 23;
const AMOUNT_SPREAD: f64 = 20.0;

pub fn mock_restaurants() -> Vec<Restaurant> {
    vec![
        Restaurant::new(
            "1",
            "Bella Italia",
            "Italian",
            "Downtown",
            4.8,
            "/italian-restaurant-interior.png",
            1250,
            45600.0,
            36.48,
        ),
        Restaurant::new(
            "2",
            "Dragon Palace",
            "Chinese",
            "Chinatown",
            4.6,
            "/chinese-restaurant-interior.png",
            980,
            38200.0,
            38.98,
        ),
        Restaurant::new(
            "3",
            "Spice Garden",
            "Indian",
            "Little India",
            4.7,
            "/indian-restaurant-interior.png",
            1100,
            42800.0,
            38.91,
        ),
        Restaurant::new(
            "4",
            "Sakura Sushi",
            "Japanese",
            "Midtown",
            4.9,
            "/japanese-sushi-restaurant.png",
            850,
            51200.0,
            60.24,
        ),
    ]
}

// Random order for one restaurant on one day
fn random_order(rng: &mut impl Rng, restaurant: &Restaurant, date: NaiveDate, i: u32) -> Order {
    let hour = rng.gen_range(FIRST_HOUR..=LAST_HOUR);
    let minute = rng.gen_range(0..60);
    let jitter = (rng.gen_range(0.0..1.0) - 0.5) * AMOUNT_SPREAD;
    let amount = round_cents(restaurant.average_order_value + jitter).max(0.0);

    Order::new(
        format!("{}-{}-{}", restaurant.id, date, i),
        restaurant.id.clone(),
        amount,
        date,
        hour,
        minute,
        format!("Customer {}", rng.gen_range(0..1000)),
        vec![format!("Item {}", rng.gen_range(1..=10))],
    )
}

/// Orders for `days` days ending at `anchor`, newest day first.
pub fn generate_orders(
    restaurants: &[Restaurant],
    anchor: NaiveDate,
    days: u32,
    rng: &mut impl Rng,
) -> Vec<Order> {
    let mut orders = Vec::new();

    for day in 0..days {
        let Some(date) = anchor.checked_sub_days(Days::new(u64::from(day))) else {
            break;
        };
        for restaurant in restaurants {
            let per_day = rng.gen_range(MIN_ORDERS_PER_DAY..MAX_ORDERS_PER_DAY);
            for i in 0..per_day {
                orders.push(random_order(rng, restaurant, date, i));
            }
        }
    }

    // stable, so generation order is kept within a day
    orders.sort_by(|a, b| b.date.cmp(&a.date));
    orders
}

/// Reproducible when `seed` is set, entropy-seeded otherwise
pub fn generate_seeded(
    restaurants: &[Restaurant],
    anchor: NaiveDate,
    days: u32,
    seed: Option<u64>,
) -> Vec<Order> {
    let mut rng = match seed {
        Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
        None => rand::rngs::StdRng::from_entropy(),
    };
    generate_orders(restaurants, anchor, days, &mut rng)
}

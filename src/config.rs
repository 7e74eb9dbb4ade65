use chrono_tz::Tz;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Business timezone. Day boundaries and minute-of-day math happen here;
    /// persisted timestamps stay UTC.
    pub timezone: Tz,
    pub slot_interval_min: i32,
    pub buffer_min: i32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            timezone: env::var("BUSINESS_TIMEZONE")
                .unwrap_or_else(|_| "UTC".to_string())
                .parse()
                .expect("BUSINESS_TIMEZONE must be a valid IANA timezone name"),
            slot_interval_min: env::var("SLOT_INTERVAL_MIN").unwrap_or_else(|_| "15".to_string()).parse().expect("SLOT_INTERVAL_MIN must be a number"),
            buffer_min: env::var("BUFFER_MIN").unwrap_or_else(|_| "15".to_string()).parse().expect("BUFFER_MIN must be a number"),
        }
    }
}

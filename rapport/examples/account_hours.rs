use rapport::domain::ReportGranularity;
use rapport::ports::ReportSource;
use rapport::RapportClient;
use std::collections::HashMap;
use std::env;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::from_filename("./rapport/.env.local").ok();
    let base_url = env::var("RAPPORT_URL").expect("RAPPORT_URL must be set");
    let session_id = env::var("RAPPORT_SESSION").expect("RAPPORT_SESSION must be set");

    let client = RapportClient::new(&base_url, &session_id)?;
    let report = client
        .fetch_report(ReportGranularity::Month, None)
        .await?;

    // Sum up hours per account
    let mut account_hours: HashMap<String, f64> = HashMap::new();
    for row in &report.tasks {
        *account_hours
            .entry(row.task.account.name.clone())
            .or_insert(0.0) += row.total_hours();
    }

    let mut accounts: Vec<_> = account_hours.into_iter().collect();
    accounts.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    println!("Hours per account this month:");
    for (name, hours) in accounts {
        println!("{} | {}", name, format_hours_minutes(hours));
    }

    Ok(())
}

fn format_hours_minutes(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round() as i32;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    format!("{hours:02}:{minutes:02}")
}

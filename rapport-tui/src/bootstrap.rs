use rapport::ports::Backend;

use crate::app::App;

/// Initial load before the event loop starts. Failures degrade to a status
/// warning; the user can retry with `r`.
pub async fn initialize_app_state<B: Backend>(app: &mut App, client: &B) {
    app.is_loading = true;

    match client.fetch_report(app.granularity, Some(app.anchor)).await {
        Ok(report) => app.apply_report(report),
        Err(e) => app.set_status(format!("Warning: could not load report: {}", e)),
    }

    app.is_loading = false;
}

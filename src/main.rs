/// The service entry-point.
///
/// Loads the season schedule once, then runs the countdown loop until
/// the process is stopped. When the schedule cannot be loaded, there is
/// nothing to count down to, and the service exits instead.
#[tokio::main]
async fn main() {
    use std::sync::Arc;

    use chrono::Local;
    use dotenv::dotenv;

    use pitwall::calendar::{RaceFilter, ScheduleIndex};
    use pitwall::config::Config;
    use pitwall::controller::CountdownController;
    use pitwall::network;
    use pitwall::widget::{LogRenderer, Renderer};

    // Read environment variables from an '.env' file in the working directory.
    // We use these env vars:
    //  - RUST_LOG
    //  - PITWALL_CONFIG
    let using_env_file = dotenv().is_ok();

    env_logger::init(); // Use log::* to write to stderr

    if using_env_file {
        log::info!("using .env file")
    }

    let config = Config::load();

    log::info!("loading race schedule...");
    let (races, broadcasts) = match network::load(&config).await {
        Ok(data) => data,
        Err(err) => {
            log::error!("failed to load race schedule: {}", err);
            std::process::exit(1);
        }
    };
    log::info!("got race schedule");

    let index = Arc::new(ScheduleIndex::new(races, broadcasts));

    let now = Local::now().naive_local();
    log::info!(
        "{} of {} races still upcoming",
        index.filtered(RaceFilter::Upcoming, now).len(),
        index.nb_races()
    );
    if index.nb_broadcasts() > 0 {
        log::info!("tv info available for {} rounds", index.nb_broadcasts());
    }

    let controller = CountdownController::new(index);
    let renderer = Arc::new(LogRenderer) as Arc<dyn Renderer>;

    log::info!("running countdown loop...");
    controller.run(renderer).await;
}

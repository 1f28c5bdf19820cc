use crate::components::data::selectors;
use crate::environment::{AppConfig, Environment};
use crate::store::Store;
use crate::view_model::{HeaderViewModel, MainPageViewModel, SortOption};

fn init_logging() {
    use env_logger::Env;
    use std::io::Write;
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("debug"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}:{} {} [{}] - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Stdout)
        .try_init();
}

/// Boot the client: check the session, load the offers and log what the
/// main page would show.
pub fn run() -> Result<(), String> {
    init_logging();

    let config = AppConfig::from_env()?;
    log::info!("Using backend {}", config.base_url);
    let environment = Environment::new(config)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Could not start runtime: {e:?}"))?;

    runtime.block_on(async move {
        let mut store = Store::new(environment);
        store.bootstrap().await;

        let state = store.state();
        let header = HeaderViewModel::new(&state.data, &state.user);
        let page = MainPageViewModel::new(&state.data, SortOption::default());
        if header.signed_in {
            log::info!("Signed in as {}, {} favorites", header.email, header.favorite_count);
        } else {
            log::info!("{:?}", state.user.authorization_status);
        }
        if selectors::offers_error(&state.data) {
            log::error!("Offers could not be loaded");
        }
        if page.is_empty {
            log::info!("{}", page.empty_description());
        } else {
            log::info!("{}", page.places_found);
            for card in page.cards() {
                log::debug!("{} {} {}", card.title, card.price, card.rating_width);
            }
        }
        for toast in store.environment().notifications.drain() {
            log::info!("{:?}: {}", toast.kind, toast.message);
        }
        Ok(())
    })
}

use std::sync::Arc;

use cupid_core::{config::Config, matching::Matchmaker, store::Store};

#[tokio::main]
async fn main() -> Result<(), cupid_core::Error> {
    cupid_core::logging::init("cupid")?;

    let cfg = Arc::new(Config::load()?);
    let store = Arc::new(Store::open(&cfg.database_path)?);
    let engine = Arc::new(Matchmaker::new(store, cfg.photos_per_card));

    cupid_telegram::router::run_polling(cfg, engine)
        .await
        .map_err(|e| cupid_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}

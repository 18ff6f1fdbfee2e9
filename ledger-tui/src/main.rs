use anyhow::Result;
use ledger_db::{Database, MemoryStore};
use std::rc::Rc;

use ledger_tui::config::Settings;
use ledger_tui::log_buffer::LogBuffer;
use ledger_tui::logging;
use ledger_tui::App;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let settings = Settings::new()?;

    let log_buffer = LogBuffer::new(1000);
    let (log_path, _guard) = logging::init_logging(log_buffer.clone())?;
    tracing::info!("Logging to {}", log_path.display());

    let store = MemoryStore::open(&settings.data_file)?;
    tracing::info!("Loaded data file {}", settings.data_file.display());
    let store: Rc<dyn Database> = Rc::new(store);

    App::new(settings, store, log_buffer).run().await?;

    Ok(())
}

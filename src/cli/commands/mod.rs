pub mod add;
pub mod catalog;
pub mod config;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod session;

use crate::config::Config;
use crate::core::catalog::Catalog;
use crate::errors::AppResult;
use crate::store::SheetClient;

/// Open the store client and load the reference catalog.
pub(crate) async fn connect(cfg: &Config) -> AppResult<(SheetClient, Catalog)> {
    let client = SheetClient::new(&cfg.store_url, &cfg.api_key)?;
    let catalog = Catalog::load(&client).await?;
    Ok((client, catalog))
}

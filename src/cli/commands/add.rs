use crate::cli::commands::connect;
use crate::cli::commands::session::{
    open_journal_or_warn, print_draft, set_worker, submit_entry, work_date_or_today,
};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::scan::{LineScanner, scan_once};
use crate::core::session::{Input, Session};
use crate::errors::AppResult;
use crate::ui::messages::info;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Resolve, price and submit one entry.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        worker,
        job,
        scan,
        product,
        process,
        part,
        date,
        qty,
    } = cmd
    {
        let tz = cfg.tz()?;
        let work_date = work_date_or_today(date.as_deref(), tz)?;

        //
        // 1. Catalog (blocks everything else on failure)
        //
        let (client, catalog) = connect(cfg).await?;
        let mut session = Session::new(catalog, work_date);

        //
        // 2. Worker
        //
        let worker = worker
            .clone()
            .or_else(|| cfg.default_worker.clone())
            .unwrap_or_default();
        set_worker(&mut session, worker)?;

        //
        // 3. Job: scanned, typed, or picked by product/process/part
        //
        if *scan {
            info("Scan the job code now…");
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            let mut scanner = LineScanner::new(&mut lines);
            let code = scan_once(&mut scanner).await?;
            session.apply(Input::Scanned(code))?;
        } else if let Some(code) = job {
            session.apply(Input::JobCode(code.clone()))?;
        } else {
            // Part first: once product and process match, the job code is
            // adopted and the part can no longer change.
            if let Some(p) = part {
                session.apply(Input::PartNo(p.clone()))?;
            }
            if let Some(p) = product {
                session.apply(Input::Product(p.clone()))?;
            }
            if let Some(p) = process {
                session.apply(Input::Process(p.clone()))?;
            }
        }

        //
        // 4. Quantity → amount
        //
        session.apply(Input::Quantity(qty.clone()))?;
        print_draft(&session, tz);

        //
        // 5. Submit
        //
        let journal = open_journal_or_warn(cfg);
        submit_entry(&mut session, &client, journal.as_ref(), tz).await?;
    }

    Ok(())
}

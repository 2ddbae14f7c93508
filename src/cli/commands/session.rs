use crate::cli::commands::connect;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::scan::{LineScanner, scan_once};
use crate::core::session::{Input, Session};
use crate::db::journal::insert_record;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::store::RecordSink;
use crate::ui::messages::{error, info, toast, warning};
use crate::utils::date::{parse_date, today_in};
use crate::utils::formatting::{bold, money, or_dash, part_label};
use crate::utils::time::registered_now;
use chrono::NaiveDate;
use chrono_tz::Tz;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  worker <code>     set the worker (kept between entries)
  date <YYYY-MM-DD> set the work date (kept between entries)
  job <code>        type a job code
  scan              read the next line as a scanned job code
  clear             clear the job code (product/process pick again)
  product <name>    pick a product     (only while no job code)
  part <no>         pick a part number (only while no job code; before process)
  process <name>    pick a process     (only while no job code)
  qty <n>           quantity (decimals allowed)
  show              show the current entry
  choices           show the products/processes/parts that can be picked
  submit            register the entry and start the next one
  next              discard the entry and start the next one
  quit              leave";

/// Interactive entry loop. One draft, many submissions.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Session { worker, date } = cmd {
        let tz = cfg.tz()?;
        let work_date = work_date_or_today(date.as_deref(), tz)?;

        let (client, catalog) = connect(cfg).await?;
        let mut session = Session::new(catalog, work_date);

        if let Some(w) = worker.clone().or_else(|| cfg.default_worker.clone()) {
            set_worker(&mut session, w)?;
        }

        let journal = open_journal_or_warn(cfg);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        println!("{}", HELP);
        print_draft(&session, tz);

        loop {
            print!("> ");
            std::io::stdout().flush().ok();

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let line = line.trim();
            let (verb, arg) = line.split_once(' ').unwrap_or((line, ""));
            let arg = arg.trim().to_string();

            let result = match verb {
                "" => continue,
                "quit" | "exit" | "q" => break,
                "help" | "?" => {
                    println!("{}", HELP);
                    Ok(())
                }
                "show" => {
                    print_draft(&session, tz);
                    Ok(())
                }
                "choices" => {
                    print_choices(&session);
                    Ok(())
                }
                "worker" => set_worker(&mut session, arg),
                "date" => match arg.as_str() {
                    "" => session.apply(Input::WorkDate(None)),
                    d => match parse_date(d) {
                        Some(parsed) => session.apply(Input::WorkDate(Some(parsed))),
                        None => Err(AppError::InvalidDate(d.to_string())),
                    },
                },
                "job" => session.apply(Input::JobCode(arg)),
                "scan" => {
                    info("Scan the job code now…");
                    let mut scanner = LineScanner::new(&mut lines);
                    match scan_once(&mut scanner).await {
                        Ok(code) => session.apply(Input::Scanned(code)),
                        Err(e) => Err(e),
                    }
                }
                "clear" => session.apply(Input::ClearJobCode),
                "product" => session.apply(Input::Product(arg)),
                "process" => session.apply(Input::Process(arg)),
                "part" => session.apply(Input::PartNo(arg)),
                "qty" => session.apply(Input::Quantity(arg)),
                "next" => session.apply(Input::Reset),
                "submit" => submit_entry(&mut session, &client, journal.as_ref(), tz).await,
                other => Err(AppError::Other(format!(
                    "unknown command '{}' (type 'help')",
                    other
                ))),
            };

            match result {
                Ok(()) => print_status(&session),
                Err(e) => error(e),
            }
        }
    }

    Ok(())
}

pub(crate) fn work_date_or_today(date: Option<&str>, tz: Tz) -> AppResult<NaiveDate> {
    match date {
        Some(d) => parse_date(d).ok_or_else(|| AppError::InvalidDate(d.to_string())),
        None => Ok(today_in(tz)),
    }
}

/// Unknown workers are accepted, the store has the final say.
pub(crate) fn set_worker(session: &mut Session, code: String) -> AppResult<()> {
    let code = code.trim().to_string();
    if !code.is_empty() && session.catalog().find_worker(&code).is_none() {
        warning(format!("Worker code '{}' is not in the worker list.", code));
    }
    session.apply(Input::Worker(code))
}

pub(crate) fn open_journal_or_warn(cfg: &Config) -> Option<DbPool> {
    match DbPool::open_journal(&cfg.journal) {
        Ok(pool) => Some(pool),
        Err(e) => {
            warning(format!("Journal unavailable, records will not be kept locally: {}", e));
            None
        }
    }
}

/// Submit, announce, and keep a local copy of what the store accepted.
pub(crate) async fn submit_entry<S: RecordSink>(
    session: &mut Session,
    store: &S,
    journal: Option<&DbPool>,
    tz: Tz,
) -> AppResult<()> {
    let registered_at = registered_now(tz);

    let Some(record) = session.submit(store).await? else {
        info("A submission is already in progress.");
        return Ok(());
    };

    if let Some(notice) = session.notice() {
        toast(notice);
    }

    if let Some(pool) = journal {
        let kept = insert_record(&pool.conn, &record, &registered_at).and_then(|_| {
            ttlog(
                &pool.conn,
                "submit",
                &record.job_code,
                &format!("{} x{} = {}", record.record_id, record.quantity, money(record.amount)),
            )
        });
        if let Err(e) = kept {
            warning(format!("Record was registered but not journalled: {}", e));
        }
    }

    Ok(())
}

pub(crate) fn print_draft(session: &Session, tz: Tz) {
    let d = session.draft();
    let worker = if d.worker_code.is_empty() {
        "--".to_string()
    } else {
        session.catalog().worker_label(&d.worker_code)
    };

    println!("{}", bold("Current entry"));
    println!("  Record ID   : {}", d.record_id);
    println!("  Worker      : {}", worker);
    println!("  Job code    : {}", or_dash(&d.job_code));
    println!("  Product     : {}", or_dash(&d.product));
    println!("  Process     : {}", or_dash(&d.process));
    println!("  Part        : {}", part_label(&d.part_no));
    println!("  Work date   : {}", or_dash(&d.work_date_str()));
    println!("  Quantity    : {}", or_dash(&d.quantity));
    println!("  Unit price  : {}", money(d.unit_price));
    println!("  Amount      : {}", money(d.amount));
    println!("  Registered  : {}", registered_now(tz));

    if let Some(e) = session.error() {
        error(e);
    }
}

fn print_status(session: &Session) {
    let d = session.draft();
    println!(
        "  [{}] {} / {} / {} | price {} | qty {} | amount {}",
        or_dash(&d.job_code),
        or_dash(&d.product),
        or_dash(&d.process),
        part_label(&d.part_no),
        money(d.unit_price),
        or_dash(&d.quantity),
        money(d.amount),
    );
}

fn print_choices(session: &Session) {
    let d = session.draft();
    let c = session.catalog();
    println!("  Products : {}", c.product_choices().join(", "));
    println!("  Processes: {}", c.process_choices(&d.product).join(", "));
    let part_values = c.part_choices(&d.product, &d.process);
    let parts: Vec<&str> = part_values.iter().map(|p| part_label(p)).collect();
    println!("  Parts    : {}", parts.join(", "));
}

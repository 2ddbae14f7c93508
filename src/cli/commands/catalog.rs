use crate::cli::commands::connect;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::catalog::Catalog;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::formatting::{money, part_label};
use crate::utils::table::{Column, Table};

/// Handle the `catalog` subcommand. Without a list flag, print the work items.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Catalog {
        workers,
        products,
        processes,
        parts,
        product,
        process,
    } = cmd
    {
        let (_client, catalog) = connect(cfg).await?;
        let product = product.as_deref().unwrap_or("");
        let process = process.as_deref().unwrap_or("");

        let any_list = *workers || *products || *processes || *parts;

        if *workers {
            print_workers(&catalog);
        }
        if *products {
            print_choices("Products", &catalog.product_choices());
        }
        if *processes {
            print_choices("Processes", &catalog.process_choices(product));
        }
        if *parts {
            let labelled: Vec<String> = catalog
                .part_choices(product, process)
                .iter()
                .map(|p| part_label(p).to_string())
                .collect();
            print_choices("Part numbers", &labelled);
        }
        if !any_list {
            print_works(&catalog, product, process);
        }
    }

    Ok(())
}

fn print_workers(catalog: &Catalog) {
    header("Workers");
    let mut table = Table::new(vec![Column::new("Code"), Column::new("Name")]);
    for w in catalog.workers() {
        table.add_row(vec![w.worker_code.clone(), w.worker_name.clone()]);
    }
    print!("{}", table.render());
}

fn print_works(catalog: &Catalog, product: &str, process: &str) {
    header("Work items");
    let mut table = Table::new(vec![
        Column::new("Job code"),
        Column::new("Product"),
        Column::new("Process"),
        Column::new("Part"),
        Column::new("Unit price"),
    ]);

    for w in catalog
        .works()
        .iter()
        .filter(|w| product.is_empty() || w.product == product)
        .filter(|w| process.is_empty() || w.process == process)
    {
        table.add_row(vec![
            w.job_code.clone(),
            w.product.clone(),
            w.process.clone(),
            part_label(&w.part_no).to_string(),
            money(w.unit_price),
        ]);
    }

    if table.rows.is_empty() {
        info("No work items match.");
    } else {
        print!("{}", table.render());
    }
}

fn print_choices(title: &str, values: &[String]) {
    header(title);
    if values.is_empty() {
        info("(no choices)");
    }
    for v in values {
        println!("  {}", v);
    }
}

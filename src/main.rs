//! # POS Terminal
//!
//! Interactive self-checkout terminal. Reads one command per line from stdin
//! and redraws the page whenever its state changes.
//!
//! Lookups, checkouts and catalog screens run on their own tasks so the
//! prompt stays responsive while a request is in flight.

use std::error::Error;

use pos_terminal::clients::{CatalogApi, CheckoutApi};
use pos_terminal::command::{Command, HELP};
use pos_terminal::config::PosConfig;
use pos_terminal::lifecycle::{setup_tracing, PosSystem};
use pos_terminal::page::{ControllerError, PageHandle, PageState};
use pos_terminal::render::{render_page, render_products, render_receipt};
use rusty_money::iso::Currency;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = PosConfig::load().unwrap_or_else(|e| e.exit());
    setup_tracing(&config.log_level);

    let currency = config.currency()?;
    let system = PosSystem::new(&config)?;
    info!(cashier = %config.cashier_code, currency = %currency.iso_alpha_code, "Starting terminal");

    let mut updates = system.page.subscribe();
    let (notices, mut notice_rx) = mpsc::unbounded_channel::<String>();
    let mut tasks = JoinSet::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}\n");
    print!("{}", render_page(&updates.borrow_and_update(), currency));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => dispatch(command, &system, currency, &notices, &mut tasks).await,
                    Err(e) => println!("{e}"),
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                print!("{}", render_page(&updates.borrow_and_update(), currency));
            }
            Some(notice) = notice_rx.recv() => print!("{notice}"),
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                if let Err(e) = joined {
                    error!("Background task failed: {:?}", e);
                }
            }
        }
    }

    tasks.shutdown().await;
    system.shutdown().await?;
    Ok(())
}

/// Runs one command. Page edits are awaited inline; anything that waits on
/// the network goes to `tasks`.
async fn dispatch(
    command: Command,
    system: &PosSystem,
    currency: &'static Currency,
    notices: &mpsc::UnboundedSender<String>,
    tasks: &mut JoinSet<()>,
) {
    let page = &system.page;
    let result = match command {
        Command::Scan(code) => {
            spawn_page(tasks, page, notices, move |page| async move { page.scan(code).await });
            return;
        }
        Command::Load => {
            spawn_page(tasks, page, notices, |page| async move { page.load_product().await });
            return;
        }
        Command::Checkout => {
            spawn_page(tasks, page, notices, |page| async move { page.checkout().await });
            return;
        }
        Command::SetCode(code) => page.set_code(code).await,
        Command::Add => page.add_to_cart().await,
        Command::SetQuantity { index, quantity } => page.set_quantity(index, quantity).await,
        Command::Increment(index) => page.increment(index).await,
        Command::Decrement(index) => page.decrement(index).await,
        Command::Remove(index) => page.remove_line(index).await,
        Command::Dismiss => page.dismiss_receipt().await,
        Command::Show => page.snapshot().await.map(|state| {
            print!("{}", render_page(&state, currency));
            state
        }),
        Command::Help => {
            println!("{HELP}");
            return;
        }
        Command::List => {
            let catalog = system.catalog.clone();
            let notices = notices.clone();
            tasks.spawn(async move {
                let text = match catalog.list_products().await {
                    Ok(products) => render_products(&products, currency),
                    Err(e) => format!("! {e}\n"),
                };
                _ = notices.send(text);
            });
            return;
        }
        Command::Search(keyword) => {
            let catalog = system.catalog.clone();
            let notices = notices.clone();
            tasks.spawn(async move {
                let text = match catalog.search_products(&keyword).await {
                    Ok(products) => render_products(&products, currency),
                    Err(e) => format!("! {e}\n"),
                };
                _ = notices.send(text);
            });
            return;
        }
        Command::Receipt(id) => {
            let checkout = system.checkout.clone();
            let notices = notices.clone();
            tasks.spawn(async move {
                let text = match checkout.get_purchase(id).await {
                    Ok(receipt) => render_receipt(&receipt, currency),
                    Err(e) => format!("! {e}\n"),
                };
                _ = notices.send(text);
            });
            return;
        }
        Command::Quit => return,
    };

    if let Err(e) = result {
        println!("! {e}");
    }
}

fn spawn_page<F, Fut>(tasks: &mut JoinSet<()>, page: &PageHandle, notices: &mpsc::UnboundedSender<String>, call: F)
where
    F: FnOnce(PageHandle) -> Fut,
    Fut: std::future::Future<Output = Result<PageState, ControllerError>> + Send + 'static,
{
    let notices = notices.clone();
    let call = call(page.clone());
    tasks.spawn(async move {
        if let Err(e) = call.await {
            _ = notices.send(format!("! {e}\n"));
        }
    });
}

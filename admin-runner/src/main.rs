mod cli;
mod render;

use admin_api::ApiClient;
use admin_core::{AdminContext, Config};
use admin_notify::{NotificationBoard, RecipientPicker};
use anyhow::Result;
use chrono::Local;
use clap::Parser;

use crate::cli::{remote_id, Cli, Command, ViewArgs};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env();
    let (ctx, mut toasts) = AdminContext::new(config);
    let client = ApiClient::from_context(&ctx)?;

    tracing::info!("Admin context initialized");

    let outcome = run(cli.command, &ctx, client).await;

    while let Ok(toast) = toasts.try_recv() {
        eprintln!("{}", render::toast(&toast));
    }

    outcome
}

async fn run(command: Command, ctx: &AdminContext, client: ApiClient) -> Result<()> {
    match command {
        Command::List(view) => {
            let board = load_board(ctx, client, &view).await?;
            print_board(&board);
        }
        Command::Send(args) => {
            let mut draft = args.draft()?;
            draft.submit(&client, &ctx.toasts, &Local::now()).await?;

            // Show the refreshed listing the way the page does after a send.
            let board = load_board(ctx, client, &ViewArgs::first_page()).await?;
            print_board(&board);
        }
        Command::Cancel { id, view } => {
            let mut board = load_board(ctx, client, &view).await?;
            board.cancel_scheduled(&remote_id(&id)).await?;
            print_board(&board);
        }
        Command::Delete { id, view } => {
            let mut board = load_board(ctx, client, &view).await?;
            board.delete_notification(&remote_id(&id)).await?;
            print_board(&board);
        }
        Command::BulkDelete { ids, all, view } => {
            let mut board = load_board(ctx, client, &view).await?;
            if all {
                board.toggle_select_all();
            } else {
                for id in &ids {
                    let id = remote_id(id);
                    if board.find(&id).is_none() {
                        tracing::warn!("Notification {} is not on page {}", id, board.page());
                        continue;
                    }
                    board.toggle_selection(&id);
                }
            }
            board.bulk_delete().await?;
            print_board(&board);
        }
        Command::Users { search } => {
            let mut picker = RecipientPicker::default();
            picker.load(&client, &ctx.toasts).await?;
            if let Some(search) = search {
                picker.set_search(search);
            }
            println!("{}", render::users(&picker));
        }
    }
    Ok(())
}

async fn load_board(ctx: &AdminContext, client: ApiClient, view: &ViewArgs) -> Result<NotificationBoard> {
    let mut board = NotificationBoard::from_context(ctx, client).with_filters(view.filters()?);
    board.fetch_notifications(view.page).await?;
    Ok(board)
}

fn print_board(board: &NotificationBoard) {
    let now = Local::now();
    let groups = board.groups(&now);
    println!("{}", render::groups(&groups, board, &Local));
    println!(
        "{}",
        render::pagination(board.page(), board.total_count(), board.has_prev(), board.has_next())
    );
}

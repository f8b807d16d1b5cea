//! Migration CLI for the ticketing schema.
//!
//! Reads `DATABASE_URL`; `cargo run -p migration -- up` applies pending migrations.

use migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}

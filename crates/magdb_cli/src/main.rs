//! Demo entry point: seed a store once, then print its contents.
//!
//! # Responsibility
//! - Open the store selected by `MAGDB_DATABASE`.
//! - Optionally start file logging from `MAGDB_LOG_DIR` / `MAGDB_LOG_LEVEL`.
//! - Report every author, magazine and article with resolved names.

use log::info;
use magdb_core::{
    core_version, default_log_level, init_logging, ArticleRepository, Author, AuthorRepository,
    MagazineRepository, SqliteArticleRepository, SqliteAuthorRepository,
    SqliteMagazineRepository, StorageGateway, StoreConfig,
};
use std::error::Error;
use std::process::ExitCode;

const LOG_DIR_ENV_VAR: &str = "MAGDB_LOG_DIR";
const LOG_LEVEL_ENV_VAR: &str = "MAGDB_LOG_LEVEL";

const SEED_AUTHOR_NAME: &str = "Milton Ngeno";
const SEED_AUTHOR_EMAIL: &str = "milton@example.com";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("magdb: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV_VAR) {
        let level =
            std::env::var(LOG_LEVEL_ENV_VAR).unwrap_or_else(|_| default_log_level().to_string());
        init_logging(&level, log_dir)?;
    }

    let config = StoreConfig::from_env();
    let gateway = StorageGateway::open(&config)?;
    info!(
        "event=cli_start module=cli status=ok mode={} version={}",
        gateway.location().mode(),
        core_version()
    );
    println!("magdb_core version={}", core_version());

    seed_if_empty(&gateway)?;
    report(&gateway)?;
    Ok(())
}

/// Returns `true` when the sample rows were written.
fn seed_if_empty(gateway: &StorageGateway) -> Result<bool, Box<dyn Error>> {
    let authors = SqliteAuthorRepository::new(gateway);
    if !authors.list()?.is_empty() {
        return Ok(false);
    }

    let mut author = Author::with_email(SEED_AUTHOR_NAME, SEED_AUTHOR_EMAIL)?;
    authors.save(&mut author)?;
    let magazine = SqliteMagazineRepository::new(gateway).create("Tech Weekly", "Technology")?;
    SqliteArticleRepository::new(gateway).create(&author, "The Future of AI", &magazine)?;
    info!("event=cli_seed module=cli status=ok authors=1 magazines=1 articles=1");
    Ok(true)
}

fn report(gateway: &StorageGateway) -> Result<(), Box<dyn Error>> {
    let authors = SqliteAuthorRepository::new(gateway);
    let magazines = SqliteMagazineRepository::new(gateway);
    let articles = SqliteArticleRepository::new(gateway);

    println!("Authors:");
    for author in authors.list()? {
        match author.email() {
            Some(email) => println!("  {} <{email}>", author.name()),
            None => println!("  {}", author.name()),
        }
    }

    println!("Magazines:");
    for magazine in magazines.list()? {
        println!("  {} ({})", magazine.name(), magazine.category());
    }

    println!("Articles:");
    for article in articles.list()? {
        let author = articles.author_of(&article)?;
        let magazine = articles.magazine_of(&article)?;
        println!(
            "  {} by {} in {}",
            article.title(),
            author.name(),
            magazine.name()
        );
    }

    Ok(())
}

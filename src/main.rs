use anyhow::Context;
use salvare::config::{CliArgs, CliCommand, Options, USAGE};
use salvare::error::{self, StoreError};
use salvare::logging::Logger;
use salvare::metadata::{load_bookmark, HttpFetcher};
use salvare::search::{filter_records, sort_by_recent};
use salvare::{App, JsonFileStore, RecordStore, TuiApplication};

fn main() -> anyhow::Result<()> {
    error::setup_panic_handler();

    let args = CliArgs::parse(std::env::args().skip(1)).context("invalid command line")?;
    if args.command == CliCommand::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let options = args.resolve_options().context("failed to load configuration")?;
    install_logger(&options, args.command == CliCommand::Tui)?;

    let store_path = options.resolve_store_path()?;
    log::debug!("using bookmark store {}", store_path.display());
    let mut store = JsonFileStore::open(store_path);

    match args.command {
        CliCommand::Tui => run_tui(store)?,
        CliCommand::Add(url) => {
            let fetcher = HttpFetcher::new()?;
            let mut record = load_bookmark(&fetcher, &url).with_context(|| format!("could not load {}", url))?;
            if let Some(existing) = store.get(&record.url)? {
                record.tags = existing.tags;
            }
            let saved = store.save(record)?;
            println!("{}\t{}", saved.url, saved.display_title());
        }
        CliCommand::List(terms) => {
            let mut records = store.list_all()?;
            sort_by_recent(&mut records);
            for record in filter_records(&records, &terms.join(" ")) {
                let tags = record
                    .tags
                    .iter()
                    .map(|tag| format!("#{}", tag))
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("{}\t{}\t{}", record.url, record.display_title(), tags);
            }
        }
        CliCommand::Delete(url) => {
            if !store.delete(&url)? {
                return Err(StoreError::NotFound { url }.into());
            }
            println!("deleted {}", url);
        }
        CliCommand::Help => {}
    }

    Ok(())
}

/// TUI実行中は stderr に書くと画面が崩れるため、ファイル出力だけにする
fn install_logger(options: &Options, tui: bool) -> anyhow::Result<()> {
    let mut logger = Logger::new(options.log_level()?);
    if let Some(path) = options.resolve_log_path()? {
        logger = logger.with_file_output(path);
    }
    if tui {
        logger = logger.without_stderr();
    }
    logger.install()?;
    Ok(())
}

fn run_tui(store: JsonFileStore) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::new()?;
    let app = App::new(Box::new(store), Box::new(fetcher)).context("failed to load bookmarks")?;
    let mut tui = TuiApplication::new(app);
    tui.run()?;
    Ok(())
}

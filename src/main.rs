use clap::Parser;
use randomizer_rs::picker::{Store, DEFAULT_SHOW_LIMIT, DEFAULT_STATE_FILE};
use randomizer_rs::session::Session;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// State file holding the items, pick history and seed
    #[arg(short, long, default_value = DEFAULT_STATE_FILE)]
    file: PathBuf,

    /// How many recent picks "Show history" lists
    #[arg(long, default_value_t = DEFAULT_SHOW_LIMIT)]
    history_limit: usize,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let mut session = match Session::open(Store::new(&args.file), args.history_limit) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Fix or move {} and try again.", args.file.display());
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    if let Err(err) = session.run(stdin.lock(), io::stdout()) {
        log::error!("Session ended with an error: {}", err);
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::{path::PathBuf, process, sync::Arc};

mod server;
mod settings;

use bookcache::{Origin, Resolver};
use server::IsbnResponse;
use settings::StoreSettings;

use clap::{Args, Parser, Subcommand};
use eyre::WrapErr;
use log::trace;

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        process::exit(2);
    }
}

fn try_main() -> eyre::Result<()> {
    let Cli {
        command,
        global_opts:
            GlobalOpts {
                config,
                sources,
                verbosity,
                quiet,
            },
        store,
    } = Cli::parse();

    setup_errlog(verbosity as usize, quiet)?;

    let settings = match config {
        Some(path) => StoreSettings::from_file(&path)
            .wrap_err_with(|| format!("Unable to read settings from '{}'", path.display()))?,
        None => {
            trace!("'config' option not used - settings come from flags and environment only");
            StoreSettings::default()
        }
    };
    let config = settings.merge(store).into_config()?;
    trace!("Using cache store {config:?}");

    // The resolver owns blocking clients, it has to be built and dropped outside the runtime.
    let resolver = Arc::new(bookcache::resolver(config, &enabled_sources(sources)));

    match command {
        Commands::Serve { bind } => serve(&resolver, &bind),
        Commands::Resolve { title } => resolve_once(&resolver, &title),
    }
}

fn serve(resolver: &Arc<Resolver>, bind: &str) -> eyre::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::run(Arc::clone(resolver), bind))
}

fn resolve_once(resolver: &Resolver, title: &str) -> eyre::Result<()> {
    let book = resolver.resolve(title)?;
    let body = serde_json::to_string(&IsbnResponse::from(book))?;
    println!("{body}");
    Ok(())
}

fn setup_errlog(verbosity: usize, quiet: bool) -> eyre::Result<()> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 0 } else { verbosity + 2 };

    stderrlog::new().verbosity(verbosity).init()?;
    Ok(())
}

fn enabled_sources(sources: Vec<Origin>) -> Vec<Origin> {
    if sources.is_empty() {
        vec![Origin::OpenLibrary, Origin::GoogleBooks]
    } else {
        sources
    }
}

fn parse_origin(value: &str) -> Result<Origin, String> {
    match value.trim() {
        "openlibrary" => Ok(Origin::OpenLibrary),
        "googlebooks" => Ok(Origin::GoogleBooks),
        other => Err(format!(
            "unknown source '{other}', expected 'openlibrary' or 'googlebooks'"
        )),
    }
}

#[derive(Parser)]
#[clap(name = "bookcache")]
#[clap(about = "Resolve book titles to a canonical ISBN, caching every answer")]
#[clap(version, author)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(flatten)]
    global_opts: GlobalOpts,

    #[clap(flatten)]
    store: StoreSettings,
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// TOML file with the cache store settings
    ///
    /// Values given as flags or environment variables take precedence over the file.
    #[clap(short, long, parse(from_os_str), global = true)]
    config: Option<PathBuf>,

    /// Comma separated list of sources to search on a cache miss
    ///
    /// Both `openlibrary` and `googlebooks` are searched when this option is not used.
    #[clap(
        long,
        global = true,
        use_value_delimiter = true,
        parse(try_from_str = parse_origin)
    )]
    sources: Vec<Origin>,

    /// How chatty the program is when performing commands
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbosity: u8,

    /// Only errors will be logged.
    #[clap(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
#[non_exhaustive]
enum Commands {
    /// Serve `GET /isbn?title=<title>` over HTTP
    Serve {
        /// Address to listen on
        #[clap(long, env = "BOOKCACHE_BIND", default_value = "127.0.0.1:3000")]
        bind: String,
    },
    /// Resolve a single title and print the result as JSON
    #[clap(arg_required_else_help = true)]
    Resolve {
        /// The title to resolve, used exactly as given
        title: String,
    },
}

#[cfg(test)]
mod tests {
    use super::{enabled_sources, parse_origin, Cli, Commands};
    use bookcache::Origin;
    use clap::Parser;

    #[test]
    fn sources_default_to_both_apis() {
        let cli = Cli::try_parse_from(["bookcache", "resolve", "Dune"]).unwrap();
        assert_eq!(
            vec![Origin::OpenLibrary, Origin::GoogleBooks],
            enabled_sources(cli.global_opts.sources)
        );
    }

    #[test]
    fn sources_can_be_narrowed() {
        let cli = Cli::try_parse_from(["bookcache", "--sources", "googlebooks", "resolve", "Dune"])
            .unwrap();
        assert_eq!(vec![Origin::GoogleBooks], enabled_sources(cli.global_opts.sources));

        let cli = Cli::try_parse_from([
            "bookcache",
            "--sources",
            "googlebooks,openlibrary",
            "resolve",
            "Dune",
        ])
        .unwrap();
        assert_eq!(
            vec![Origin::GoogleBooks, Origin::OpenLibrary],
            cli.global_opts.sources
        );
    }

    #[test]
    fn title_is_kept_verbatim() {
        let cli = Cli::try_parse_from(["bookcache", "resolve", "  the HOBBIT "]).unwrap();
        assert!(matches!(cli.command, Commands::Resolve { title } if title == "  the HOBBIT "));
    }

    #[test]
    fn unknown_source_is_rejected() {
        assert!(parse_origin("crossref").is_err());
        assert_eq!(Ok(Origin::OpenLibrary), parse_origin(" openlibrary"));
    }
}

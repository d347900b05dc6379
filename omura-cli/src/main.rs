//! Command-line interface for omura
//!
//! Fetches Gemini resources and inspects gemtext documents.
//!
//! Usage:
//!   omura fetch <destination> [--format <format>] [--links]
//!   omura search <query> [--format <format>] [--links]
//!   omura checkout <destination> <number> [--format <format>] [--links]
//!   omura inspect <path> [--format <format>]
//!
//! `checkout` fetches a page, takes link number `<number>` from its numbered link list
//! (the one `--links` prints), resolves it against the page and fetches that.
//!
//! Global options:
//!   --config <file>       Load configuration from a TOML file (after ~/.omura/omura.toml)
//!   --known-hosts <file>  Pin certificates in this file instead of the configured one
//!   --verbose             Log connection and trust events to stderr
//!
//! Formats: gemtext (raw body), tree, tokens, ast-json.

mod render;

use std::error::Error;
use std::io::Write;

use clap::{Arg, ArgAction, ArgMatches, Command};
use omura_client::{Client, ClientOptions, FileStorage, Request, Response};
use omura_config::{Loader, OmuraConfig};
use omura_parser::gemtext::loader::DocumentLoader;
use tracing_subscriber::EnvFilter;

const FORMATS: [&str; 4] = ["gemtext", "tree", "tokens", "ast-json"];

fn build_cli() -> Command {
    Command::new("omura")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A Gemini protocol client and gemtext inspector")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("FILE")
                .help("Load configuration from a TOML file"),
        )
        .arg(
            Arg::new("known-hosts")
                .long("known-hosts")
                .global(true)
                .value_name("FILE")
                .help("Known hosts file used for certificate pinning"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug output to stderr"),
        )
        .subcommand(
            Command::new("fetch")
                .about("Request a Gemini URI and print the response")
                .arg(
                    Arg::new("destination")
                        .help("gemini:// URI, or a host and path")
                        .required(true)
                        .index(1),
                )
                .arg(format_arg())
                .arg(links_arg()),
        )
        .subcommand(
            Command::new("search")
                .about("Send a query to the configured search endpoint")
                .arg(
                    Arg::new("query")
                        .help("Search terms")
                        .required(true)
                        .num_args(1..)
                        .index(1),
                )
                .arg(format_arg())
                .arg(links_arg()),
        )
        .subcommand(
            Command::new("checkout")
                .about("Fetch a page and follow one of its numbered links")
                .arg(
                    Arg::new("destination")
                        .help("Page whose links are numbered")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("number")
                        .help("Link number, as printed by --links (starting at 1)")
                        .required(true)
                        .value_parser(clap::value_parser!(usize))
                        .index(2),
                )
                .arg(format_arg())
                .arg(links_arg()),
        )
        .subcommand(
            Command::new("inspect")
                .about("Parse a local gemtext file and print its structure")
                .arg(
                    Arg::new("path")
                        .help("Path to a gemtext file")
                        .required(true)
                        .index(1),
                )
                .arg(format_arg().default_value("tree")),
        )
}

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .short('f')
        .value_parser(FORMATS)
        .help("Output format for gemtext documents")
}

fn links_arg() -> Arg {
    Arg::new("links")
        .long("links")
        .short('l')
        .action(ArgAction::SetTrue)
        .help("Print a numbered list of the document's links")
}

fn main() {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    if let Err(err) = run(&matches) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    match matches.subcommand() {
        Some(("fetch", sub)) => {
            let config = load_config(matches, sub)?;
            let destination = required(sub, "destination")?;
            let request = Request::parse(destination)?;
            handle_request(&config, &request)
        }
        Some(("checkout", sub)) => {
            let config = load_config(matches, sub)?;
            let page = Request::parse(required(sub, "destination")?)?;
            let number = sub
                .get_one::<usize>("number")
                .copied()
                .ok_or("missing argument <number>")?;
            handle_checkout(&config, &page, number)
        }
        Some(("search", sub)) => {
            let config = load_config(matches, sub)?;
            let query = sub
                .get_many::<String>("query")
                .map(|terms| terms.map(String::as_str).collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            let request = Request::search(&config.search.endpoint, &query)?;
            handle_request(&config, &request)
        }
        Some(("inspect", sub)) => {
            let config = load_config(matches, sub)?;
            handle_inspect(&config, required(sub, "path")?)
        }
        _ => Err("unknown command".into()),
    }
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a str, Box<dyn Error>> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .ok_or_else(|| format!("missing argument <{}>", id).into())
}

/// Defaults, then `~/.omura/omura.toml`, then `--config`, then flags given on the command
/// line.
fn load_config(global: &ArgMatches, sub: &ArgMatches) -> Result<OmuraConfig, Box<dyn Error>> {
    let mut loader = Loader::new();
    if let Some(path) = omura_config::user_config_path() {
        loader = loader.with_optional_file(path);
    }
    if let Some(path) = global.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(path) = global.get_one::<String>("known-hosts") {
        loader = loader.set_override("client.known_hosts", path.as_str())?;
    }
    if let Some(format) = sub.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if sub.try_get_one::<bool>("links").ok().flatten() == Some(&true) {
        loader = loader.set_override("output.links", true)?;
    }
    Ok(loader.build()?)
}

fn build_client(config: &OmuraConfig) -> Result<Client, Box<dyn Error>> {
    let options = ClientOptions {
        port: config.client.port,
        idle_timeout: config.client.idle_timeout(),
    };
    let known_hosts = config.client.known_hosts_path()?;
    tracing::debug!(path = %known_hosts.display(), "using known hosts file");
    Ok(Client::with_storage(FileStorage::new(known_hosts), options)?)
}

fn handle_request(config: &OmuraConfig, request: &Request) -> Result<(), Box<dyn Error>> {
    let mut client = build_client(config)?;
    let response = client.send(request)?;
    print_response(config, request, &response)
}

/// Fetch `page`, then the link numbered `number` on it.
fn handle_checkout(
    config: &OmuraConfig,
    page: &Request,
    number: usize,
) -> Result<(), Box<dyn Error>> {
    let mut client = build_client(config)?;
    let response = client.send(page)?;
    if !response.is_success() || !response.is_gemtext() {
        return Err(format!(
            "{} has no links to follow: {}",
            page.url(),
            render::status_line(&response)
        )
        .into());
    }

    let root = DocumentLoader::from_bytes(response.body()).parse();
    let target = render::checkout_target(page, &root, number)?;
    tracing::debug!(number, url = %target.url(), "following link");
    let response = client.send(&target)?;
    print_response(config, &target, &response)
}

fn print_response(
    config: &OmuraConfig,
    request: &Request,
    response: &Response,
) -> Result<(), Box<dyn Error>> {
    if !response.is_success() {
        eprintln!("{}", render::status_line(response));
        if let Some(target) = redirect_target(request, response) {
            eprintln!("=> {}", target);
        }
        return Ok(());
    }

    let mut stdout = std::io::stdout().lock();
    if !response.is_gemtext() {
        stdout.write_all(response.body())?;
        return Ok(stdout.flush()?);
    }

    let loader = DocumentLoader::from_bytes(response.body());
    let rendered = render::render_document(&loader, config.output.format)?;
    write_block(&mut stdout, &rendered)?;
    if config.output.links {
        writeln!(stdout)?;
        write_block(&mut stdout, &render::link_list(request, &loader.parse()))?;
    }
    Ok(stdout.flush()?)
}

/// Where a redirect points, resolved against the request.
fn redirect_target(request: &Request, response: &Response) -> Option<String> {
    if response.group() != omura_client::StatusGroup::Redirect {
        return None;
    }
    let target = request.resolve(response.meta()).ok()?;
    Some(target.url().to_string())
}

fn handle_inspect(config: &OmuraConfig, path: &str) -> Result<(), Box<dyn Error>> {
    let loader = DocumentLoader::from_path(path)
        .map_err(|err| format!("cannot read {}: {}", path, err))?;
    let rendered = render::render_document(&loader, config.output.format)?;
    let mut stdout = std::io::stdout().lock();
    write_block(&mut stdout, &rendered)?;
    Ok(stdout.flush()?)
}

/// Write `text`, adding a final newline when it lacks one.
fn write_block(out: &mut impl Write, text: &str) -> std::io::Result<()> {
    out.write_all(text.as_bytes())?;
    if !text.is_empty() && !text.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    Ok(())
}

use clap::Parser;
use log::info;
use std::fs::File;
use std::io::Write;
use tabprove::error::Kind;
use tabprove::{parse, Cli, Error, Report};

fn main() {
    use env_logger::Env;
    // log warnings and errors by default, do not print timestamps
    env_logger::Builder::from_env(Env::default().filter_or("LOG", "warn"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("{:?}", e.get_kind());
        if let Some(e) = e.get_error() {
            eprintln!("{}", e)
        };
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let arg = match &cli.file {
        Some(file) => parse::parse_file(file)?,
        None => parse::interactive(std::io::stdin().lock(), std::io::stdout())?,
    };
    info!("premises: {}", arg.premises.len());
    info!("conclusion: {}", arg.conclusion);

    let (tree, report) = Report::generate(arg, cli.limit);
    print!("{}", report);

    if let Some(stats_file) = &cli.stats {
        let json = serde_json::to_string(&report).map_err(|e| Error::new(Kind::OsError, e.into()))?;
        writeln!(File::create(stats_file)?, "{}", json)?;
    }

    if !cli.no_tree {
        println!();
        cli.output(tree.render(cli.infix))?;
    }
    Ok(())
}

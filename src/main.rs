use std::{
    error::Error,
    io::{self, Read},
    process::ExitCode,
};

use clap::{Arg, ArgMatches, Command};
use curlreq::{CurlParser, Request};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RequestPart {
    Method,
    Url,
    Header,
    Body,
    SkipTls,
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
    Debug,
}

fn cli() -> Command {
    Command::new("curlreq")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A CLI tool to turn curl commands into request descriptors")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("parse")
                .about("Parses a curl command")
                .arg(
                    Arg::new("command")
                        .help("The input curl command string, read from stdin when omitted")
                        .required(false)
                        .index(1),
                )
                .arg(
                    Arg::new("part")
                        .short('p')
                        .long("part")
                        .value_name("PART")
                        .help("Prints only one field of the request (method, url, header, body, skip-tls, timeout)")
                        .required(false)
                        .value_parser(clap::value_parser!(RequestPart)),
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .value_name("FORMAT")
                        .help("Output format (json, pretty, debug)")
                        .default_value("json")
                        .value_parser(clap::value_parser!(OutputFormat)),
                ),
        )
}

fn render(
    req: &Request,
    part: Option<RequestPart>,
    format: OutputFormat,
) -> serde_json::Result<String> {
    let text = match part {
        Some(RequestPart::Method) => req.method.clone(),
        Some(RequestPart::Url) => req.url.clone(),
        Some(RequestPart::Body) => req.body.clone(),
        Some(RequestPart::SkipTls) => req.skip_tls.to_string(),
        Some(RequestPart::Timeout) => req.timeout.clone(),
        Some(RequestPart::Header) => match format {
            OutputFormat::Json => serde_json::to_string(&req.header)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(&req.header)?,
            OutputFormat::Debug => format!("{:#?}", req.header),
        },
        None => match format {
            OutputFormat::Json => serde_json::to_string(req)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(req)?,
            OutputFormat::Debug => format!("{:#?}", req),
        },
    };
    Ok(text)
}

fn run_parse(matches: &ArgMatches) -> Result<String, Box<dyn Error>> {
    let command = match matches.get_one::<String>("command") {
        Some(command) => command.clone(),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf.trim_end().to_string()
        }
    };
    let part = matches.get_one::<RequestPart>("part").copied();
    let format = matches
        .get_one::<OutputFormat>("format")
        .copied()
        .unwrap_or(OutputFormat::Json);

    debug!("parsing {command:?}, part {part:?}, format {format:?}");
    let req = CurlParser::new().parse(&command)?;
    Ok(render(&req, part, format)?)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("parse", sub_matches)) => match run_parse(sub_matches) {
            Ok(output) => {
                println!("{output}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error parsing curl command: {e}");
                ExitCode::FAILURE
            }
        },
        _ => {
            let _ = cli().print_help();
            println!();
            ExitCode::FAILURE
        }
    }
}

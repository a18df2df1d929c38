use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use parley_cli::cli::commands::{chat, config, providers, translate};
use parley_cli::cli::{Args, Command};
use parley_cli::config::ConfigError;
use parley_cli::http::ApiStatusError;
use parley_cli::output::{self, OutputConfig};
use parley_cli::ui::Style;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.global.quiet,
        verbose: args.global.verbose,
        no_color: args.global.no_color || std::env::var_os("NO_COLOR").is_some(),
    });

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", Style::error("Error:"));
            ExitCode::from(exit_code_for(&e))
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let Args {
        chat: chat_args,
        global,
        command,
    } = args;

    match command {
        None => chat::run_chat(&chat_args, &global).await,
        Some(Command::Chat(sub_args)) => {
            chat::run_chat(&chat_args.merge(sub_args), &global).await
        }
        Some(Command::Translate {
            text,
            file,
            id_file_path,
            offline,
            no_cache,
        }) => {
            let options = translate::TranslateOptions {
                text,
                file,
                id_file_path,
                offline,
                no_cache,
            };
            translate::run_translate(options, &global).await
        }
        Some(Command::Providers { name }) => providers::print_providers(name.as_deref(), &global),
        Some(Command::Config { init }) => config::run_config(init, &global),
    }
}

fn exit_code_for(error: &anyhow::Error) -> u8 {
    let code = if error
        .chain()
        .any(|cause| cause.downcast_ref::<ConfigError>().is_some())
    {
        exitcode::CONFIG
    } else if error
        .chain()
        .any(|cause| cause.is::<reqwest::Error>() || cause.is::<ApiStatusError>())
    {
        exitcode::UNAVAILABLE
    } else {
        exitcode::SOFTWARE
    };
    u8::try_from(code).unwrap_or(1)
}

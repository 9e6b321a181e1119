mod config;
mod exec;
mod menu;
mod runner;
mod tasks;

use std::collections::BTreeSet;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "srvkit", version, about = "SrvKit CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    List,
    Run(RunArgs),
    Menu,
}

#[derive(Debug, Args)]
struct RunArgs {
    #[arg(required = true)]
    tasks: Vec<String>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List) => {
            tasks::print_list();
        }
        Some(Commands::Run(args)) => {
            let config = config::load_or_init()?;
            let selection = tasks::resolve_names(&args.tasks)?;
            run_selection(&selection, &config);
        }
        Some(Commands::Menu) | None => {
            let config = config::load_or_init()?;
            let selection = menu::select_tasks(tasks::all())?;
            if selection.is_empty() {
                println!("Nothing selected; exiting.");
                return Ok(());
            }
            run_selection(&selection, &config);
        }
    }

    Ok(())
}

fn run_selection(selection: &BTreeSet<usize>, config: &config::SrvkitConfig) {
    let report = runner::execute(tasks::all(), selection, config);
    runner::refresh_login_environment();
    runner::print_summary(&report);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list() {
        let cli = Cli::try_parse_from(["srvkit", "list"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn parses_run_with_task_names() {
        let cli = Cli::try_parse_from(["srvkit", "run", "base", "nginx"]).unwrap();
        match cli.command {
            Some(Commands::Run(args)) => assert_eq!(args.tasks, ["base", "nginx"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_run_without_task_names() {
        assert!(Cli::try_parse_from(["srvkit", "run"]).is_err());
    }

    #[test]
    fn bare_invocation_opens_the_menu() {
        let cli = Cli::try_parse_from(["srvkit"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_the_explicit_menu_subcommand() {
        let cli = Cli::try_parse_from(["srvkit", "menu"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Menu)));
    }
}

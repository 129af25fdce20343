use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "jscs",
    about = "A fast and configurable JavaScript code style checker"
)]
pub(crate) struct Options {
    /// A glob pattern of files to check, or `-` for stdin.
    #[structopt(default_value = "./")]
    files: String,
    /// Path to a .jscsrc configuration file.
    #[structopt(short, long)]
    config: Option<PathBuf>,
    /// Automatically fix any issues which can be fixed.
    #[structopt(short, long)]
    fix: bool,
    /// Stop reporting after this many errors across the whole run.
    #[structopt(short = "m", long)]
    max_errors: Option<usize>,
    /// Disable colored output.
    #[structopt(long)]
    no_colors: bool,
    #[structopt(subcommand)]
    cmd: Option<SubCommand>,
}

#[derive(Debug, StructOpt, PartialEq, Eq)]
pub(crate) enum SubCommand {
    /// Show all of the available rules.
    Rules,
}

fn main() {
    let opt = Options::from_args();
    let colorize = !opt.no_colors;

    let code = match opt.cmd {
        Some(SubCommand::Rules) => {
            jscs_cli::show_all_rules();
            0
        }
        None => {
            let config = jscs_cli::load_config(opt.config.as_deref());
            if opt.files == "-" {
                jscs_cli::run_stdin(config, colorize)
            } else {
                jscs_cli::run(opt.files, config, opt.fix, opt.max_errors, colorize)
            }
        }
    };
    std::process::exit(code);
}

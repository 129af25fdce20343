//! The CLI wiring around `jscs_core`: file traversal, config discovery,
//! and console reporting. The core never depends on anything here.

mod config;
mod files;

pub use self::{config::*, files::*};
pub use jscs_core::{Checker, Diagnostic, Errors};

use colored::Colorize;
use rayon::prelude::*;
use serde_json::{Map, Value};
use std::io::Read;
use std::sync::Mutex;

/// Print a simple CLI error to stderr.
#[macro_export]
macro_rules! lint_err {
    ($($format_args:tt)*) => {{
        eprintln!("{}: {}", ::colored::Colorize::red("error"), format!($($format_args)*));
    }};
}

/// Print a simple CLI warning to stderr.
#[macro_export]
macro_rules! lint_warn {
    ($($format_args:tt)*) => {{
        eprintln!("{}: {}", ::colored::Colorize::yellow("warning"), format!($($format_args)*));
    }};
}

/// Run the checker over a glob of files. Returns the process exit code.
pub fn run(
    glob_pattern: String,
    config: Option<Map<String, Value>>,
    fix: bool,
    max_errors: Option<usize>,
    colorize: bool,
) -> i32 {
    let config = match config {
        Some(config) => config,
        None => {
            lint_err!("no configuration found; create a {} file", CONFIG_NAME);
            return 2;
        }
    };

    let paths = match glob::glob(&glob_pattern) {
        Ok(paths) => paths,
        Err(err) => {
            lint_err!("invalid glob pattern: {}", err);
            return 2;
        }
    };
    let walker = FileWalker::from_glob(paths);
    if walker.files.is_empty() {
        lint_err!("no matching files found");
        return 2;
    }

    let mut checker = Checker::new();
    if let Err(err) = checker.configure(&config) {
        lint_err!("{}", err);
        return 2;
    }
    if max_errors.is_some() {
        checker.set_max_errors(max_errors);
    }

    let mut files: Vec<&JsFile> = walker.files.values().collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));

    // The max-errors budget is cumulative across files on one checker, so a
    // budgeted run stays sequential; otherwise files fan out, each file's
    // check itself remaining sequential.
    let results: Vec<(JsFile, Errors)> = if checker.max_errors().is_some() {
        files
            .into_iter()
            .map(|file| (file.clone(), check_one(&mut checker, file, fix)))
            .collect()
    } else {
        let collected = Mutex::new(Vec::new());
        files.par_iter().for_each(|file| {
            let mut checker = checker.clone();
            let errors = check_one(&mut checker, file, fix);
            collected.lock().unwrap().push(((*file).clone(), errors));
        });
        let mut results = collected.into_inner().unwrap();
        results.sort_by(|a, b| a.0.path.cmp(&b.0.path));
        results
    };

    report(&results, colorize)
}

fn check_one(checker: &mut Checker, file: &JsFile, fix: bool) -> Errors {
    let filename = file.path.to_string_lossy().to_string();
    if fix {
        let fixed = checker.fix_string(&file.source, &filename);
        if fixed.output != file.source {
            if let Err(err) = std::fs::write(&file.path, &fixed.output) {
                lint_err!("failed to write `{}`: {}", file.path.display(), err);
            }
        }
        fixed.errors
    } else {
        checker.check_string(&file.source, &filename)
    }
}

/// Check source piped through stdin.
pub fn run_stdin(config: Option<Map<String, Value>>, colorize: bool) -> i32 {
    let config = match config {
        Some(config) => config,
        None => {
            lint_err!("no configuration found; create a {} file", CONFIG_NAME);
            return 2;
        }
    };
    let mut source = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut source) {
        lint_err!("failed to read stdin: {}", err);
        return 2;
    }
    let mut checker = Checker::new();
    if let Err(err) = checker.configure(&config) {
        lint_err!("{}", err);
        return 2;
    }
    let errors = checker.check_string(&source, "<stdin>");
    let results = vec![(
        JsFile {
            source,
            path: "<stdin>".into(),
        },
        errors,
    )];
    report(&results, colorize)
}

/// Print every diagnostic with its source context and a summary line.
fn report(results: &[(JsFile, Errors)], colorize: bool) -> i32 {
    let mut total = 0usize;
    for (file, errors) in results {
        for diagnostic in errors.get_error_list() {
            total += 1;
            let rule = diagnostic.rule.as_deref().unwrap_or("unknown");
            let header = format!(
                "{} at {}:{}:{} ({})",
                diagnostic.message,
                file.path.display(),
                diagnostic.line,
                diagnostic.column,
                rule
            );
            if colorize {
                println!("{}", header.red());
            } else {
                println!("{}", header);
            }
            print!("{}", errors.explain_error(diagnostic, colorize));
            println!();
        }
    }

    let summary = format!(
        "{} code style {} found.",
        total,
        if total == 1 { "error" } else { "errors" }
    );
    if colorize {
        println!("{}", if total == 0 { summary.green() } else { summary.red() });
    } else {
        println!("{}", summary);
    }

    if total == 0 {
        0
    } else {
        1
    }
}

/// Print the option names of every registered rule.
pub fn show_all_rules() {
    for name in jscs_core::rule_names() {
        println!("{}", name);
    }
}

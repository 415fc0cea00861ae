//! `cmdtree` binary entry point.

use cmdtree::ui::output;

fn main() {
    let code = match cmdtree::cli::run() {
        Ok(code) => code,
        Err(err) => {
            output::error(format!("{err:#}"));
            2
        }
    };
    std::process::exit(code);
}

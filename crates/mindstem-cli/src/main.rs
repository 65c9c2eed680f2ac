//! Mindstem CLI - Turn indented outlines into mind map images

mod cli;
mod clipboard;
mod colorizer;

use clap::Parser;
use mindstem::DiagramError;

fn main() {
    let cli_args = cli::Cli::parse();

    let mut app = cli::MindstemApp::new();
    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        if e
            .downcast_ref::<DiagramError>()
            .is_some_and(DiagramError::needs_user_action)
        {
            eprintln!("Check the values in the --config file.");
        }
        std::process::exit(1);
    }
}

//! Terminal output formatting.

use colored::Colorize;

use cna_core::{Event, Reporter};

/// Prints pipeline events to stdout in color.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&self, event: Event) {
        print_event(&event);
    }
}

/// Print a single event.
pub fn print_event(event: &Event) {
    match event {
        Event::MissingProjectName { usage } => {
            println!("{}", "\nNo app name was provided.".red());
            println!("\nProvide an app name in the following format: ");
            println!("\n{} {}", usage, "<your-app-name>\n".cyan());
        }
        Event::InstallingPackages => {
            println!(
                "{}",
                "\nInstalling packages. This might take a couple of minutes.\n\
                 Installing react, react-dom, and react-scripts..."
                    .yellow()
            );
        }
        Event::ProcessFailed { program, stderr } => {
            println!("{}", format!("{} produced the following error:", program).red());
            println!("Program stderr: {}", stderr);
        }
        Event::GeneratorFinished => {
            println!("{}", "Create React App template created successfully.\n".green());
        }
        Event::GeneratorAborted => {
            println!(
                "{}",
                "Something went wrong while trying to create a new React app using create-react-app"
                    .red()
            );
        }
        Event::NavigationFailed { path, error } => {
            println!(
                "{}",
                format!("Could not enter {}: {}", path.display(), error).red()
            );
        }
        Event::InstallingDependencies => {
            println!("{}", "Installing Next and Apollo...".yellow());
        }
        Event::InstallerAborted => {
            println!(
                "{}",
                "Dependency installation failed; templates were not written.".red()
            );
        }
        Event::ReplacingTemplates => {
            println!("{}", "Replacing templates...".yellow());
        }
        Event::StepFailed { step, error } => {
            println!("{}", format!("Failed to {}: {}", step, error).red());
        }
        Event::CreatingFile { name } => {
            println!("Creating {}", name);
        }
        Event::FileFailed { path, error } => {
            println!("{}", format!("Failed to write {}: {}", path.display(), error).red());
        }
        Event::Done { project_name } => print_banner(project_name),
    }
}

/// Completion banner with next steps.
fn print_banner(project_name: &str) {
    println!("{}", "\nDone! 🎊".green());
    println!("{}", "Start by typing:\n".green());
    println!("{}", format!("cd {}", project_name).cyan());
    println!("{}", "npm run dev\n".cyan());
    println!("{}", "Happy hacking! 💻".green());
}

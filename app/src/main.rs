//! FILENAME: app/src/main.rs
// PURPOSE: Command-line entry point for the transaction report.
// FORMAT: seq|level|category|message

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = app_lib::run(&args) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

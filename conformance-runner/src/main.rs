mod app;
mod cli;
mod execution;
mod logging;
mod panic_message;
mod report;
mod runner;
mod suite;

fn main() {
    logging::init();
    std::process::exit(app::run());
}

//! Travel planner server binary for deployments that expect an explicit name.
//! Run with: cargo run --bin travel-planner-server

use std::process::ExitCode;

use travel_planner::start_travel_planner;

fn main() -> ExitCode {
    start_travel_planner::run()
}

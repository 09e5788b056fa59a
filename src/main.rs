//! Binary entrypoint that launches the travel planner server.

use std::process::ExitCode;

use travel_planner::start_travel_planner;

/// Serve the itinerary API and web UI until Ctrl+C.
fn main() -> ExitCode {
    start_travel_planner::run()
}

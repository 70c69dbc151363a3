//! Integration tests: the simulator and the dashboard driven together
//! through the public library API.

mod dashboard_flow;
mod simulation;

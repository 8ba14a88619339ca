#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_runtime;
mod app_types;
mod backend_config;
mod backend_launch;
mod backend_output;
mod backend_process_lifecycle;
mod backend_readiness;
mod exit_events;
mod exit_state;
mod launch_plan;
mod logging;
mod main_window;
mod process_control;
mod runtime_paths;
mod startup_task;

pub(crate) use app_constants::*;
pub(crate) use app_types::{BackendState, LaunchPlan};
pub(crate) use logging::{
    append_backend_error_log, append_backend_log, append_desktop_log, append_shutdown_log,
    append_startup_log,
};

fn main() {
    app_runtime::run();
}

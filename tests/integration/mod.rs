//! Integration tests driving the router, the date cache and the CLI surface

mod cli_commands;
mod date_cache;
mod router_flow;
mod support;

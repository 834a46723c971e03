//! Integration tests for the BAKURA library surface.

mod dashboard_api;
mod shoe_replay;

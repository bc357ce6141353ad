//! Todo tracking backend: todo search with assignee and comment counts, todo
//! listing and user nickname lookup over HTTP.

pub mod actions;
pub mod bootstrap;
pub mod config;
pub mod controllers;
pub mod middleware;
pub mod migrations;
pub mod models;
pub mod requests;
pub mod routes;
pub mod search;

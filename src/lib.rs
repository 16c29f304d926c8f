#![doc = "The `tasklist` library crate."]
#![doc = ""]
#![doc = "This crate contains the authentication layer (token issuance/verification,"]
#![doc = "bearer-token middleware, password hashing), the user account and task"]
#![doc = "ownership services, the domain models, routing configuration, and error"]
#![doc = "handling for the tasklist application. The main binary (`main.rs`) uses it"]
#![doc = "to construct and run the HTTP server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

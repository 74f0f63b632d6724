//! # CLI Module
//!
//! Command-line tooling for route manifests.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! Print the compiled route table, one line per route in match order:
//!
//! ```bash
//! frontctl routes --manifest routes.yaml
//! ```
//!
//! ### `check`
//!
//! Compile every route and resolve every name, exiting non-zero on the first
//! problem. Useful in CI before a deploy:
//!
//! ```bash
//! frontctl check --manifest routes.toml
//! ```
//!
//! ### `dispatch`
//!
//! Push one request through the table and print what happened. Handlers are
//! replaced by an echo handler; `must_login` and `must_not_login` are the
//! cookie-based session guards.
//!
//! ```bash
//! frontctl dispatch --manifest routes.yaml GET '/products/12/categories/7?sort=asc'
//! frontctl dispatch --manifest routes.yaml GET /users/profile --cookie X-PZN-SESSION=alice
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use clap::Parser;
//! use frontctl::cli::{run_cli, Cli};
//!
//! let cli = Cli::parse();
//! run_cli(cli)?;
//! ```

mod commands;


pub use commands::{run_cli, Cli, Commands};

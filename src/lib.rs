//! Vox - Spanish-keyword Lua dialect translator
//!
//! Vox translates a Spanish-keyword scripting dialect into Roblox Lua. The
//! engine rewrites code line by line through a fixed pipeline of regex passes
//! and never touches the contents of string literals. Documents containing
//! sandbox-escaping identifiers are rejected before any rewriting.
//!
//! ```
//! use vox::core::Translator;
//!
//! let translator = Translator::with_default_rules().unwrap();
//! let lua = translator
//!     .translate(r#"si x > 5 entonces imprimir("alto") fin"#, "main.vox")
//!     .unwrap();
//! assert_eq!(lua, r#"if x > 5 then print("alto") end"#);
//! ```
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (`translate`, `check`, `init`)
//! - `config`: Configuration file loading and parsing
//! - `core`: Translation engine (rule table, literal scanner, passes, driver)

pub mod cli;
pub mod config;
pub mod core;

//! xcsettings - Layered build setting resolution
//!
//! This crate implements the build-settings engine for Xcode-style project
//! builds: named string settings declared in ordered levels (command line,
//! target, project, SDK defaults, process environment), scoped by
//! `[key=pattern]` conditions, and expanded on demand with `$(NAME)`
//! references, `$(inherited)` chaining and `:`-suffix value operations.

pub mod condition;
pub mod environment;
pub mod level;
pub mod setting;
pub mod types;
pub mod value;

mod operations;
mod wildcard;

pub use condition::Condition;
pub use environment::Environment;
pub use level::Level;
pub use setting::{Setting, SettingParseError};
pub use value::{Entry, ObjectError, Value};

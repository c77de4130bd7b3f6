pub mod environment;
mod tree;

use crate::{analyzer::Analyzer, error::Error, parser::Parser};
pub use environment::{Environment, Variable};
pub use tree::TreeWalkInterpreter;

/// Parses, checks and executes `source` as a complete program.
pub fn run_program(source: &str) -> Result<Environment, Error> {
    let program = Parser::new(source)?.parse()?;
    Analyzer::new().check(&program)?;
    Ok(TreeWalkInterpreter::new().run(&program)?)
}

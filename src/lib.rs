pub mod analyzer;
pub mod calculator;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod string;
pub mod value;

pub use calculator::{evaluate, Calculator};
pub use error::Error;
pub use interpreter::{run_program, Environment};
pub use value::{Number, VariableType};

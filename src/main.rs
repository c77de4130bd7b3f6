use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{eyre, Result};
use log::info;
use pascalette::Error;
use std::path::{Path, PathBuf};
use std::{fs::read_to_string, process::ExitCode};

const STATIC_ERROR_EXIT: u8 = 65;
const RUNTIME_ERROR_EXIT: u8 = 70;

#[derive(Debug, Parser)]
#[clap(name = "pascalette", version)]
pub struct CLArgs {
    #[clap(subcommand)]
    pub routine: PascaletteCommand,
    #[clap(long = "format", value_enum, default_value = "basic", global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Subcommand)]
pub enum PascaletteCommand {
    Tokenize(Input),
    Parse {
        #[clap(flatten)]
        input: Input,
        /// Parse the input as a single expression instead of a program.
        #[clap(long = "expression")]
        expression: bool,
    },
    Check(Input),
    Evaluate(Input),
    Run(Input),
}

#[derive(Debug, Args)]
pub struct Input {
    #[clap(required_unless_present = "expr", conflicts_with = "expr")]
    path: Option<PathBuf>,
    /// Source text given inline instead of a file.
    #[clap(long = "expr")]
    expr: Option<String>,
}

impl Input {
    fn load(&self) -> Result<(String, PathBuf)> {
        match (&self.path, &self.expr) {
            (Some(path), _) => Ok((read_to_string(path)?, path.clone())),
            (None, Some(text)) => Ok((text.clone(), PathBuf::from("<expr>"))),
            (None, None) => Err(eyre!("Either a path or --expr must be given.")),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Debug,
    Basic,
    Pretty,
}

fn main() -> ExitCode {
    pascalette_main().expect("Encountered an error!")
}

fn pascalette_main() -> Result<ExitCode> {
    color_eyre::install().expect("Can't fail at first call!");
    env_logger::init();
    let args = CLArgs::parse();
    let format = args.format;
    let status = match args.routine {
        PascaletteCommand::Tokenize(input) => {
            let (src, path) = input.load()?;
            info!("Tokenizing {:?}...", path);
            tokenize(&src, &path, format)
        }
        PascaletteCommand::Parse { input, expression } => {
            let (src, path) = input.load()?;
            info!("Parsing {:?}...", path);
            parse(&src, &path, format, expression)
        }
        PascaletteCommand::Check(input) => {
            let (src, path) = input.load()?;
            info!("Checking {:?}...", path);
            check(&src, &path, format)
        }
        PascaletteCommand::Evaluate(input) => {
            let (src, path) = input.load()?;
            info!("Evaluating {:?}...", path);
            evaluate(&src, &path, format)
        }
        PascaletteCommand::Run(input) => {
            let (src, path) = input.load()?;
            info!("Running {:?}...", path);
            run(&src, &path, format)
        }
    };
    Ok(status)
}

fn tokenize(src: &str, path: &Path, format: OutputFormat) -> ExitCode {
    use pascalette::lexer::formatter::{
        BasicFormatter, DebugFormatter, PrettyFormatter, TokenFormatter,
    };
    use pascalette::lexer::{Lexer, TokenKind};

    let mut lexer = Lexer::new(src);
    let formatter: Box<dyn TokenFormatter> = match format {
        OutputFormat::Debug => Box::new(DebugFormatter),
        OutputFormat::Basic => Box::new(BasicFormatter::new(src)),
        OutputFormat::Pretty => Box::new(PrettyFormatter::new(src, path)),
    };
    loop {
        match lexer.next_token() {
            Ok(token) => {
                println!("{}", formatter.format(&token));
                if matches!(token.kind, TokenKind::Eof) {
                    return ExitCode::SUCCESS;
                }
            }
            Err(error) => {
                eprintln!("{}", formatter.format_lexical_error(&error));
                return ExitCode::from(STATIC_ERROR_EXIT);
            }
        }
    }
}

fn parse(src: &str, path: &Path, format: OutputFormat, expression: bool) -> ExitCode {
    use pascalette::parser::formatter::SExpressionFormatter;
    use pascalette::parser::Parser;

    let result = Parser::new(src).and_then(|parser| {
        if expression {
            parser
                .parse_expression()
                .map(|tree| SExpressionFormatter::format_expression(&tree))
        } else {
            parser
                .parse()
                .map(|program| SExpressionFormatter::format_program(&program))
        }
    });
    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => report(&Error::from(error), src, path, format),
    }
}

fn check(src: &str, path: &Path, format: OutputFormat) -> ExitCode {
    use pascalette::analyzer::{formatter::format_symbol_table, Analyzer};
    use pascalette::parser::Parser;

    let result = Parser::new(src)
        .and_then(|parser| parser.parse())
        .map_err(Error::from)
        .and_then(|program| Analyzer::new().check(&program).map_err(Error::from));
    match result {
        Ok(symbols) => {
            println!("{}", format_symbol_table(&symbols));
            ExitCode::SUCCESS
        }
        Err(error) => report(&error, src, path, format),
    }
}

fn evaluate(src: &str, path: &Path, format: OutputFormat) -> ExitCode {
    use pascalette::value::formatter::{
        BasicFormatter, DebugFormatter, PrettyFormatter, ValueFormatter,
    };

    match pascalette::evaluate(src) {
        Ok(value) => {
            let formatter: Box<dyn ValueFormatter> = match format {
                OutputFormat::Debug => Box::new(DebugFormatter),
                OutputFormat::Basic => Box::new(BasicFormatter::new(src)),
                OutputFormat::Pretty => Box::new(PrettyFormatter::new(src, path)),
            };
            println!("{}", formatter.format(&value));
            ExitCode::SUCCESS
        }
        Err(error) => report(&error, src, path, format),
    }
}

fn run(src: &str, path: &Path, format: OutputFormat) -> ExitCode {
    use pascalette::value::formatter::{
        BasicFormatter, DebugFormatter, PrettyFormatter, ValueFormatter,
    };

    match pascalette::run_program(src) {
        Ok(environment) => {
            let formatter: Box<dyn ValueFormatter> = match format {
                OutputFormat::Debug => Box::new(DebugFormatter),
                OutputFormat::Basic => Box::new(BasicFormatter::new(src)),
                OutputFormat::Pretty => Box::new(PrettyFormatter::new(src, path)),
            };
            println!("{}", formatter.format_environment(&environment));
            ExitCode::SUCCESS
        }
        Err(error) => report(&error, src, path, format),
    }
}

/// Prints `error` with the formatter of the stage that raised it and picks the exit code.
fn report(error: &Error, src: &str, path: &Path, format: OutputFormat) -> ExitCode {
    use pascalette::analyzer::formatter::{
        AnalyzerFormatter, BasicAnalyzerFormatter, DebugAnalyzerFormatter,
        PrettyAnalyzerFormatter,
    };
    use pascalette::parser::formatter::{
        BasicParserFormatter, DebugParserFormatter, ParserFormatter, PrettyParserFormatter,
    };
    use pascalette::value::formatter::{
        BasicFormatter, DebugFormatter, PrettyFormatter, ValueFormatter,
    };

    let message = match (error, format) {
        (Error::Parser(e), OutputFormat::Debug) => DebugParserFormatter.format_error(e),
        (Error::Parser(e), OutputFormat::Basic) => BasicParserFormatter::new(src).format_error(e),
        (Error::Parser(e), OutputFormat::Pretty) => {
            PrettyParserFormatter::new(src, path).format_error(e)
        }
        (Error::Semantic(e), OutputFormat::Debug) => DebugAnalyzerFormatter.format_error(e),
        (Error::Semantic(e), OutputFormat::Basic) => {
            BasicAnalyzerFormatter::new(src).format_error(e)
        }
        (Error::Semantic(e), OutputFormat::Pretty) => {
            PrettyAnalyzerFormatter::new(src, path).format_error(e)
        }
        (Error::Runtime(e), OutputFormat::Debug) => DebugFormatter.format_error(e),
        (Error::Runtime(e), OutputFormat::Basic) => BasicFormatter::new(src).format_error(e),
        (Error::Runtime(e), OutputFormat::Pretty) => {
            PrettyFormatter::new(src, path).format_error(e)
        }
    };
    eprintln!("{message}");
    if error.is_static() {
        ExitCode::from(STATIC_ERROR_EXIT)
    } else {
        ExitCode::from(RUNTIME_ERROR_EXIT)
    }
}

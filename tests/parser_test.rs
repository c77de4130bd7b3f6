use color_eyre::eyre::Result;

use pascalette::parser::{
    formatter::{BasicParserFormatter, ParserFormatter, SExpressionFormatter},
    statement::Statement,
    Parser, MAX_NESTING_DEPTH,
};

fn check_expression(input: &str, expected: &str) {
    let result = Parser::new(input).and_then(|parser| parser.parse_expression());
    let actual = match result {
        Ok(ref tree) => SExpressionFormatter::format_expression(tree),
        Err(ref e) => BasicParserFormatter::new(input).format_error(e),
    };
    assert_eq!(actual, expected, "Failed to parse {input:?}");
}

fn check_program(input: &str, expected: &str) {
    let result = Parser::new(input).and_then(|parser| parser.parse());
    let actual = match result {
        Ok(ref program) => SExpressionFormatter::format_program(program),
        Err(ref e) => BasicParserFormatter::new(input).format_error(e),
    };
    assert_eq!(actual, expected, "Failed to parse {input:?}");
}

#[test]
fn smoke_test() {
    check_expression("1", "1");
}

#[test]
fn test_expression_precedence() {
    check_expression("1 + 2 * 3", "(+ 1 (* 2 3))");
    check_expression("1 - 2 - 3", "(- (- 1 2) 3)");
    check_expression("-(1 - 2) DIV x", "(DIV (- (group (- 1 2))) x)");
    check_expression("1.5 / 2", "(/ 1.5 2)");
}

#[test]
fn test_expression_errors() {
    check_expression("", "(1:1) Syntax error: Expected an expression but got END_OF_INPUT.");
    check_expression("1 +\n*", "(2:1) Syntax error: Expected an expression but got MUL.");
    check_expression("(1", "(1:3) Syntax error: Expected RPAREN but got END_OF_INPUT.");
}

#[test]
fn test_sign_chains() {
    check_expression("--+1", "(- (- (+ 1)))");
    check_expression("2 * -+x", "(* 2 (- (+ x)))");
}

#[test]
fn test_long_sign_chain() -> Result<()> {
    let depth = 200_000;
    let source = format!("{}7", "-".repeat(depth));
    let tree = Parser::new(&source)?.parse_expression()?;
    let formatted = SExpressionFormatter::format_expression(&tree);
    assert_eq!(formatted, format!("{}7{}", "(- ".repeat(depth), ")".repeat(depth)));
    assert_eq!(tree.get_span().range(), 0..source.len());
    Ok(())
}

#[test]
fn test_nesting_limit() {
    let depth = MAX_NESTING_DEPTH;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let expected = format!("{}1{}", "(group ".repeat(depth), ")".repeat(depth));
    check_expression(&source, &expected);

    let source = format!("{}1{}", "(".repeat(depth + 1), ")".repeat(depth + 1));
    check_expression(
        &source,
        "(1:129) Syntax error: Nesting deeper than 128 levels at LPAREN.",
    );

    let blocks = 10_000;
    let source = format!(
        "PROGRAM p; {} {} .",
        "BEGIN ".repeat(blocks),
        "END ".repeat(blocks)
    );
    check_program(
        &source,
        "(1:780) Syntax error: Nesting deeper than 128 levels at BEGIN.",
    );
}

#[test]
fn test_program() {
    check_program(
        "PROGRAM Demo;
VAR
   a, b : INTEGER;
   y    : REAL;
BEGIN
   BEGIN a := 2 END;
   b := a * (3 + -1);
   y := b / 4;
END.",
        "(program Demo
  (var a INTEGER)
  (var b INTEGER)
  (var y REAL)
  (begin
    (begin
      (:= a 2))
    (:= b (* a (group (+ 3 (- 1)))))
    (:= y (/ b 4))
    (noop)))",
    );
}

#[test]
fn test_program_without_declarations() {
    check_program(
        "PROGRAM Empty; BEGIN END.",
        "(program Empty
  (begin
    (noop)))",
    );
}

#[test]
fn test_program_errors() {
    check_program(
        "PROGRAM p; BEGIN END. x",
        "(1:23) Syntax error: Expected end of input but got IDENTIFIER.",
    );
    check_program(
        "PROGRAM p; BEGIN END",
        "(1:21) Syntax error: Expected DOT but got END_OF_INPUT.",
    );
    check_program(
        "PROGRAM ; BEGIN END.",
        "(1:9) Syntax error: Expected IDENTIFIER but got SEMI.",
    );
    check_program(
        "PROGRAM p;\nVAR a : INTEGER\n    b : REAL;\nBEGIN END.",
        "(3:5) Syntax error: Expected SEMI but got IDENTIFIER.",
    );
    check_program(
        "PROGRAM p; VAR a : BOOLEAN; BEGIN END.",
        "(1:20) Syntax error: Expected a type (INTEGER or REAL) but got IDENTIFIER.",
    );
    check_program(
        "PROGRAM p;\nBEGIN\n",
        "(3:1) Syntax error: Expected END but got END_OF_INPUT.",
    );
    check_program(
        "PROGRAM p; BEGIN a := 1 ? END.",
        "(1:25) Error: Unexpected character: ?",
    );
}

#[test]
fn test_assignment_spans_cover_target_and_value() -> Result<()> {
    let source = "PROGRAM p; VAR a : INTEGER; BEGIN a := 1 + (2) END.";
    let program = Parser::new(source)?.parse()?;
    let Some(Statement::Assignment(assignment)) = program.block.body.statements.first() else {
        panic!("Expected an assignment");
    };
    assert_eq!(&source[assignment.span.range()], "a := 1 + (2)");
    Ok(())
}

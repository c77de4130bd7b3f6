use color_eyre::eyre::Result;
use proptest::prelude::*;

use pascalette::lexer::{
    formatter::{BasicFormatter, ToFormatter, TokenFormatter},
    Lexer, LexicalErrorKind, Token, TokenKind, TokenValue,
};

fn check(input: &str, expected: &str, test_name: &str) {
    let mut lexer = Lexer::new(input);
    let formatter: BasicFormatter = lexer.create_formatter();
    let mut buffer = String::new();
    loop {
        match lexer.next_token() {
            Ok(token) => {
                buffer.push_str(&formatter.format(&token));
                if matches!(token.kind, TokenKind::Eof) {
                    break;
                }
            }
            Err(error) => {
                buffer.push_str(&formatter.format_lexical_error(&error));
            }
        }
        buffer.push('\n');
    }

    assert_eq!(buffer, expected, "Failed the test {test_name}");
}

#[test]
fn smoke_test() {
    check("", "END_OF_INPUT  null", "smoke");
}

#[test]
fn test_additive_sequence() {
    check(
        "12 + 32 - 3 + 321",
        "INTEGER_CONST 12 12
PLUS + null
INTEGER_CONST 32 32
MINUS - null
INTEGER_CONST 3 3
PLUS + null
INTEGER_CONST 321 321
END_OF_INPUT  null",
        "additive",
    );
}

#[test]
fn test_keywords_and_literals() {
    check(
        "PROGRAM p; VAR x : REAL; BEGIN x := 3.14 DIV 2 / (1) END.",
        "PROGRAM PROGRAM null
IDENTIFIER p p
SEMI ; null
VAR VAR null
IDENTIFIER x x
COLON : null
REAL REAL null
SEMI ; null
BEGIN BEGIN null
IDENTIFIER x x
ASSIGN := null
REAL_CONST 3.14 3.14
INTEGER_DIV DIV null
INTEGER_CONST 2 2
FLOAT_DIV / null
LPAREN ( null
INTEGER_CONST 1 1
RPAREN ) null
END END null
DOT . null
END_OF_INPUT  null",
        "keywords",
    );
}

#[test]
fn test_keywords_are_case_sensitive() {
    check(
        "begin Begin BEGIN",
        "IDENTIFIER begin begin
IDENTIFIER Begin Begin
BEGIN BEGIN null
END_OF_INPUT  null",
        "case",
    );
}

#[test]
fn test_comments_are_skipped() {
    check(
        "{ leading } 1 {inner}{adjacent} * 2 { trailing }",
        "INTEGER_CONST 1 1
MUL * null
INTEGER_CONST 2 2
END_OF_INPUT  null",
        "comments",
    );
}

#[test]
fn test_unexpected_character() {
    check(
        "1 ?\n 2",
        "INTEGER_CONST 1 1
(1:3) Error: Unexpected character: ?
INTEGER_CONST 2 2
END_OF_INPUT  null",
        "unexpected",
    );
}

#[test]
fn test_columns_count_characters() {
    check(
        "{ 注释 } ?",
        "(1:8) Error: Unexpected character: ?
END_OF_INPUT  null",
        "multibyte comment",
    );
    check(
        "1\n{ café } ?",
        "INTEGER_CONST 1 1
(2:10) Error: Unexpected character: ?
END_OF_INPUT  null",
        "multibyte second line",
    );
}

#[test]
fn test_end_of_input_is_repeated() -> Result<()> {
    let mut lexer = Lexer::new("7");
    assert_eq!(lexer.next_token()?.value, TokenValue::Integer(7));
    for _ in 0..3 {
        assert_eq!(lexer.next_token()?.kind, TokenKind::Eof);
    }
    Ok(())
}

#[test]
fn test_unclosed_comment() -> Result<()> {
    let mut lexer = Lexer::new("BEGIN { never closed");
    assert_eq!(lexer.next_token()?.kind, TokenKind::KeywordBegin);
    let error = lexer.next_token().unwrap_err();
    assert_eq!(error.kind, LexicalErrorKind::UnclosedComment);
    assert_eq!(error.span.range(), 6..20);
    Ok(())
}

#[test]
fn test_integer_out_of_range() {
    let mut lexer = Lexer::new("99999999999999999999");
    let error = lexer.next_token().unwrap_err();
    assert_eq!(
        error.kind,
        LexicalErrorKind::InvalidNumber("99999999999999999999".into())
    );
}

// Property-based tests

fn symbol_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("(".to_string()),
        Just(")".to_string()),
        Just(",".to_string()),
        Just(":".to_string()),
        Just(":=".to_string()),
        Just(".".to_string()),
        Just(";".to_string()),
        Just("-".to_string()),
        Just("+".to_string()),
        Just("*".to_string()),
        Just("/".to_string()),
    ]
}

fn numeric_literal_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,18}".prop_map(|s| s),            // Integer literals
        "[0-9]{1,9}\\.[0-9]{1,9}".prop_map(|s| s)  // Real literals
    ]
}

fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-zA-Z0-9_]*".prop_map(|s: String| s)
}

fn keyword_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("PROGRAM".to_string()),
        Just("VAR".to_string()),
        Just("BEGIN".to_string()),
        Just("END".to_string()),
        Just("INTEGER".to_string()),
        Just("REAL".to_string()),
        Just("DIV".to_string()),
    ]
}

fn comment_strategy() -> impl Strategy<Value = String> {
    "[^}]*".prop_map(|s: String| format!("{{{}}}", s))
}

fn token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        symbol_strategy(),
        numeric_literal_strategy(),
        identifier_strategy(),
        keyword_strategy(),
    ]
}

fn count_tokens(input: &str) -> Result<usize, TestCaseError> {
    let mut lexer = Lexer::new(input);
    let mut num_tokens = 0;
    loop {
        num_tokens += 1;
        match lexer.next_token() {
            Ok(Token {
                kind: TokenKind::Eof,
                ..
            }) => return Ok(num_tokens),
            token => {
                prop_assert!(token.is_ok(), "{input:?} produced {token:?}");
            }
        }
    }
}

proptest! {
    #[test]
    fn lexer_handles_valid_tokens_without_comments(
        input in prop::collection::vec(token_strategy(), 1..100)
    ) {
        // Add 1 to include EOF token
        let expected_num_tokens = input.len() + 1;
        let num_tokens = count_tokens(&input.join(" "))?;
        prop_assert_eq!(num_tokens, expected_num_tokens);
    }

    #[test]
    fn lexer_skips_comments(
        input in prop::collection::vec(
            prop_oneof![
                token_strategy().prop_map(|token| (token, true)),
                comment_strategy().prop_map(|comment| (comment, false)),
            ],
            1..100,
        )
    ) {
        let expected_num_tokens = input.iter().filter(|(_, is_token)| *is_token).count() + 1;
        let source = input
            .iter()
            .map(|(text, _)| text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let num_tokens = count_tokens(&source)?;
        prop_assert_eq!(num_tokens, expected_num_tokens);
    }

    #[test]
    fn lexer_never_panics(input in "\\PC*") {
        let mut lexer = Lexer::new(&input);
        for _ in 0..input.len() + 1 {
            if let Ok(Token { kind: TokenKind::Eof, .. }) = lexer.next_token() {
                break;
            }
        }
    }
}

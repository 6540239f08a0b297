//! Calculator tool.
//!
//! The chat model translates a natural-language question into a plain
//! arithmetic expression, and the expression is evaluated locally. The model
//! never produces the numeric answer itself.

use std::sync::Arc;

use pcommon::{BoxFuture, GenerationOptions};
use pprovider::{ChatModel, Message, ModelRequest, Role};

use crate::blocking::run_blocking;
use crate::{Tool, ToolError, ToolSpec};

pub const CALCULATOR_TOOL_NAME: &str = "calculator";

const CALCULATOR_DESCRIPTION: &str = "Useful for getting the result of a math expression. The \
     input to this tool should be a valid mathematical expression that could be executed by a \
     simple calculator.";

const TRANSLATE_PROMPT: &str = "Translate the user's question into a single arithmetic \
     expression using only numbers, parentheses and the operators + - * / ^. Respond with the \
     expression alone, without explanation or formatting.";

pub struct CalculatorTool {
    model: Arc<dyn ChatModel>,
}

impl CalculatorTool {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    async fn answer(&self, input: &str) -> Result<String, ToolError> {
        if input.trim().is_empty() {
            return Err(ToolError::invalid_arguments("calculator input must not be empty")
                .with_tool_name(CALCULATOR_TOOL_NAME));
        }

        let request = ModelRequest::new(vec![
            Message::new(Role::System, TRANSLATE_PROMPT),
            Message::new(Role::User, input),
        ])
        .with_options(GenerationOptions::default().with_temperature(0.0));

        let response = self
            .model
            .complete(request)
            .await
            .map_err(|err| ToolError::from(err).with_tool_name(CALCULATOR_TOOL_NAME))?;

        let expression = response.content.trim();
        let value = evaluate(expression)
            .map_err(|err| err.with_tool_name(CALCULATOR_TOOL_NAME))?;
        Ok(format_value(value))
    }
}

impl Tool for CalculatorTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec::new(CALCULATOR_TOOL_NAME, CALCULATOR_DESCRIPTION)
    }

    fn invoke(&self, input: &str) -> Result<String, ToolError> {
        run_blocking(self.answer(input))
    }

    fn invoke_async<'a>(
        &'a self,
        input: &'a str,
    ) -> Option<BoxFuture<'a, Result<String, ToolError>>> {
        Some(Box::pin(self.answer(input)))
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Evaluates an arithmetic expression with + - * / ^, parentheses and unary
/// minus. `^` is right-associative and binds tighter than multiplication.
pub fn evaluate(expression: &str) -> Result<f64, ToolError> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser { tokens, index: 0 };
    let value = parser.expression()?;
    if parser.index != parser.tokens.len() {
        return Err(ToolError::invalid_arguments(format!(
            "unexpected trailing input in expression: {expression}"
        )));
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Open,
    Close,
}

fn tokenize(expression: &str) -> Result<Vec<Token>, ToolError> {
    let mut tokens = Vec::new();
    let mut chars = expression.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            ' ' | '\t' | '\n' => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '^' => {
                chars.next();
                tokens.push(Token::Caret);
            }
            '(' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ')' => {
                chars.next();
                tokens.push(Token::Close);
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&digit) = chars.peek() {
                    if digit.is_ascii_digit() || digit == '.' {
                        literal.push(digit);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = literal.parse::<f64>().map_err(|_| {
                    ToolError::invalid_arguments(format!("invalid number literal: {literal}"))
                })?;
                tokens.push(Token::Number(value));
            }
            other => {
                return Err(ToolError::invalid_arguments(format!(
                    "unexpected character in expression: {other}"
                )));
            }
        }
    }

    if tokens.is_empty() {
        return Err(ToolError::invalid_arguments("empty expression"));
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    index: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.index).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    fn expression(&mut self) -> Result<f64, ToolError> {
        let mut value = self.term()?;
        while let Some(token) = self.peek() {
            match token {
                Token::Plus => {
                    self.advance();
                    value += self.term()?;
                }
                Token::Minus => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, ToolError> {
        let mut value = self.power()?;
        while let Some(token) = self.peek() {
            match token {
                Token::Star => {
                    self.advance();
                    value *= self.power()?;
                }
                Token::Slash => {
                    self.advance();
                    let divisor = self.power()?;
                    if divisor == 0.0 {
                        return Err(ToolError::invalid_arguments("division by zero"));
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn power(&mut self) -> Result<f64, ToolError> {
        let base = self.unary()?;
        if self.peek() == Some(Token::Caret) {
            self.advance();
            let exponent = self.power()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn unary(&mut self) -> Result<f64, ToolError> {
        if self.peek() == Some(Token::Minus) {
            self.advance();
            return Ok(-self.unary()?);
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<f64, ToolError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::Open) => {
                let value = self.expression()?;
                match self.advance() {
                    Some(Token::Close) => Ok(value),
                    _ => Err(ToolError::invalid_arguments("missing closing parenthesis")),
                }
            }
            other => Err(ToolError::invalid_arguments(format!(
                "expected a number or parenthesized expression, found {other:?}"
            ))),
        }
    }
}

//! # Command Templates / 命令模板
//!
//! A narrow text template renderer for the newman run command. Literal text
//! is copied as is; every `{{ ... }}` action holds exactly one field chain
//! that is looked up in a [`TemplateContext`]:
//!
//! - `.CollectionDisplayName` - the display name of the current collection
//! - `.NewmanCollection` - the path of the current collection
//! - `.Config.<Field>` - any [`StepConfig`] field by its PascalCase name
//!
//! Parsing and execution fail separately, so a broken template is reported
//! before any field is resolved.
//!
//! 一个用于 newman 运行命令的精简文本模板渲染器。字面文本原样复制；
//! 每个 `{{ ... }}` 动作只包含一个字段链，并在 [`TemplateContext`] 中查找。
//! 解析与执行分别失败，因此损坏的模板会在解析任何字段之前被报告。

use std::fmt;
use thiserror::Error;

use crate::core::config::StepConfig;

const TEMPLATE_NAME: &str = "template";
const LEFT_DELIM: &str = "{{";
const RIGHT_DELIM: &str = "}}";

/// Failure of [`resolve_template`].
/// [`resolve_template`] 的失败。
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("could not parse newman command template: {0}")]
    Parse(#[source] ParseError),

    #[error("error on executing template: {0}")]
    Execution(#[source] ExecError),
}

/// The template text is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("template: {name}:{line}: {message}")]
pub struct ParseError {
    pub name: String,
    pub line: usize,
    pub message: String,
}

/// A well-formed action could not be evaluated against the context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("template: {name}:{line}:{column}: executing \"{name}\" at <{field}>: {message}")]
pub struct ExecError {
    pub name: String,
    pub line: usize,
    /// Byte offset of the field within its line.
    pub column: usize,
    pub field: String,
    pub message: String,
}

/// The values a command template can reach.
/// 命令模板可以访问的值。
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    pub collection_display_name: &'a str,
    pub newman_collection: &'a str,
    pub config: &'a StepConfig,
}

impl TemplateContext<'_> {
    fn lookup(&self, chain: &[String]) -> Result<String, String> {
        let Some((first, rest)) = chain.split_first() else {
            return Err("can't print value of type TemplateContext".to_string());
        };

        let (value, value_type) = match first.as_str() {
            "CollectionDisplayName" => (self.collection_display_name.to_string(), "string"),
            "NewmanCollection" => (self.newman_collection.to_string(), "string"),
            "Config" => return self.lookup_config(rest),
            other => {
                return Err(format!(
                    "can't evaluate field {other} in type TemplateContext"
                ));
            }
        };

        match rest.first() {
            Some(field) => Err(format!("can't evaluate field {field} in type {value_type}")),
            None => Ok(value),
        }
    }

    fn lookup_config(&self, chain: &[String]) -> Result<String, String> {
        let Some((field, rest)) = chain.split_first() else {
            return Err("can't print value of type StepConfig".to_string());
        };
        let value = self
            .config
            .template_field(field)
            .ok_or_else(|| format!("can't evaluate field {field} in type StepConfig"))?;

        match rest.first() {
            Some(next) => {
                let value_type = match field.as_str() {
                    "FailOnError" | "Verbose" => "bool",
                    _ => "string",
                };
                Err(format!("can't evaluate field {next} in type {value_type}"))
            }
            None => Ok(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Field(FieldNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldNode {
    chain: Vec<String>,
    line: usize,
    column: usize,
}

impl fmt::Display for FieldNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.chain.join("."))
    }
}

/// A parsed command template.
/// 已解析的命令模板。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    nodes: Vec<Node>,
}

impl Template {
    /// Parses `source`. `name` only appears in error messages.
    ///
    /// 解析 `source`。`name` 仅出现在错误消息中。
    pub fn parse(name: &str, source: &str) -> Result<Self, ParseError> {
        let mut parser = Parser {
            name,
            source,
            pos: 0,
        };
        let nodes = parser.parse_nodes()?;
        Ok(Self {
            name: name.to_string(),
            nodes,
        })
    }

    /// Renders the template against `context`.
    ///
    /// 针对 `context` 渲染模板。
    pub fn execute(&self, context: &TemplateContext<'_>) -> Result<String, ExecError> {
        let mut output = String::new();
        for node in &self.nodes {
            match node {
                Node::Text(text) => output.push_str(text),
                Node::Field(field) => {
                    let value = context.lookup(&field.chain).map_err(|message| ExecError {
                        name: self.name.clone(),
                        line: field.line,
                        column: field.column,
                        field: field.to_string(),
                        message,
                    })?;
                    output.push_str(&value);
                }
            }
        }
        Ok(output)
    }
}

struct Parser<'a> {
    name: &'a str,
    source: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn parse_nodes(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();
        while self.pos < self.source.len() {
            let rest = &self.source[self.pos..];
            match rest.find(LEFT_DELIM) {
                Some(start) => {
                    if start > 0 {
                        nodes.push(Node::Text(rest[..start].to_string()));
                    }
                    self.pos += start + LEFT_DELIM.len();
                    nodes.push(Node::Field(self.parse_action()?));
                }
                None => {
                    nodes.push(Node::Text(rest.to_string()));
                    self.pos = self.source.len();
                }
            }
        }
        Ok(nodes)
    }

    fn parse_action(&mut self) -> Result<FieldNode, ParseError> {
        self.skip_whitespace();
        let field_start = self.pos;

        let field = match self.peek() {
            None => return Err(self.error("unclosed action")),
            Some(_) if self.rest().starts_with(RIGHT_DELIM) => {
                return Err(self.error("missing value for command"));
            }
            Some('.') => FieldNode {
                chain: self.parse_chain()?,
                line: self.line_at(field_start),
                column: self.column_at(field_start),
            },
            Some(c) if is_ident_char(c) => {
                let ident = self.take_ident();
                return Err(self.error(&format!("function \"{ident}\" not defined")));
            }
            Some(c) => return Err(self.error(&format!("unexpected \"{c}\" in command"))),
        };

        // A stray character right after the operand belongs to the operand.
        let operand_end = self.pos;
        self.skip_whitespace();
        if self.rest().starts_with(RIGHT_DELIM) {
            self.pos += RIGHT_DELIM.len();
            return Ok(field);
        }
        match self.peek() {
            None => Err(self.error("unclosed action")),
            Some(c) if self.pos == operand_end => {
                Err(self.error(&format!("unexpected \"{c}\" in operand")))
            }
            Some(c) => Err(self.error(&format!("unexpected \"{c}\" in command"))),
        }
    }

    /// A lone `.` is the context itself; a `.` ending a chain is malformed.
    fn parse_chain(&mut self) -> Result<Vec<String>, ParseError> {
        let mut chain = Vec::new();
        while self.peek() == Some('.') {
            self.pos += 1;
            let ident = self.take_ident();
            if ident.is_empty() {
                if !chain.is_empty() {
                    return Err(self.error("unexpected \".\" in operand"));
                }
                break;
            }
            chain.push(ident);
        }
        Ok(chain)
    }

    fn take_ident(&mut self) -> String {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|(_, c)| !is_ident_char(*c))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let ident = rest[..len].to_string();
        self.pos += len;
        ident
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let skipped = rest.len() - rest.trim_start().len();
        self.pos += skipped;
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn rest(&self) -> &str {
        &self.source[self.pos..]
    }

    fn line_at(&self, pos: usize) -> usize {
        1 + self.source[..pos].matches('\n').count()
    }

    fn column_at(&self, pos: usize) -> usize {
        match self.source[..pos].rfind('\n') {
            Some(newline) => pos - newline - 1,
            None => pos,
        }
    }

    fn error(&self, message: &str) -> ParseError {
        ParseError {
            name: self.name.to_string(),
            line: self.line_at(self.pos.min(self.source.len())),
            message: message.to_string(),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Renders the configured run command for one collection.
///
/// # Arguments
/// * `config` - The step configuration holding the run command template
/// * `collection` - The path of the collection being run
/// * `display_name` - The display name derived from `collection`
///
/// # Returns
/// The rendered command, untrimmed.
///
/// 为一个集合渲染配置的运行命令。
pub fn resolve_template(
    config: &StepConfig,
    collection: &str,
    display_name: &str,
) -> Result<String, TemplateError> {
    let template =
        Template::parse(TEMPLATE_NAME, &config.newman_run_command).map_err(TemplateError::Parse)?;

    let context = TemplateContext {
        collection_display_name: display_name,
        newman_collection: collection,
        config,
    };
    template.execute(&context).map_err(TemplateError::Execution)
}

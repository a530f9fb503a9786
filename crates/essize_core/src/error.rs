use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    /// The snippet could not be parsed under the selected dialect. Carries
    /// the parser's first diagnostic, including its byte offset when known.
    #[error("syntax error: {message}")]
    Syntax { message: String },

    /// A `require(...)` or dynamic `import(...)` whose package-name argument
    /// is missing, empty, or neither a string nor a template literal.
    #[error("unsupported require/import argument: expected a string or template literal")]
    UnsupportedArgument,
}

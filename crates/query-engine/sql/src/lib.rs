//! SQL types and the conversion of a SQL AST into parameterised SQL text.

pub mod sql;

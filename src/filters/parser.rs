//! Filter expression parser for theme tables.
//!
//! # Syntax
//!
//! ```text
//! filter_expr  := field_filter (operator? field_filter)*
//! field_filter := field_name:value | field_name:"quoted value"
//! operator     := AND | OR (case-insensitive)
//! field_name   := country | region | income (case-insensitive)
//! ```
//!
//! Without an explicit operator, two filters on the same field are OR'd and filters on
//! different fields are AND'd, so `region:Africa region:Asia income:"Low income"` keeps
//! low-income rows from either region. Explicit operators always win.
//!
//! # Examples
//!
//! ```rust
//! # use peer_portal::filters::parser::parse_filter;
//! let expr = parse_filter("region:\"Sub-Saharan Africa\" income:\"Low income\"").unwrap();
//! assert_eq!(expr.len(), 2);
//!
//! let expr = parse_filter("country:Kenya OR country:Peru").unwrap();
//! assert_eq!(expr.len(), 2);
//! ```

use anyhow::{Context, Result, anyhow, bail};

use super::ast::{FieldFilter, FilterExpr, FilterField, FilterOperator};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    FieldValue { field: String, value: String },
    And,
    Or,
}

/// Split input into field:value pairs and operator keywords
fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        // Field name, or a bare operator keyword
        let mut head = String::new();
        while let Some(ch) = chars.next_if(|c| !c.is_whitespace() && *c != ':') {
            head.push(ch);
        }

        if chars.next_if_eq(&':').is_none() {
            match head.to_uppercase().as_str() {
                "AND" => tokens.push(Token::And),
                "OR" => tokens.push(Token::Or),
                _ => bail!("Invalid token: '{}' (expected field:value or AND/OR)", head),
            }
            continue;
        }

        let value = if chars.next_if_eq(&'"').is_some() {
            let mut value = String::new();
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == '"' {
                    closed = true;
                    break;
                }
                value.push(ch);
            }
            if !closed {
                bail!("Unterminated quoted value for field '{}'", head);
            }
            value
        } else {
            let mut value = String::new();
            while let Some(ch) = chars.next_if(|c| !c.is_whitespace()) {
                value.push(ch);
            }
            value
        };

        if head.is_empty() || value.trim().is_empty() {
            bail!("Invalid field:value format: '{}:{}'", head, value);
        }
        tokens.push(Token::FieldValue { field: head, value });
    }

    Ok(tokens)
}

fn parse_field(field: &str) -> Result<FilterField> {
    FilterField::ALL
        .into_iter()
        .find(|f| f.keyword().eq_ignore_ascii_case(field))
        .ok_or_else(|| anyhow!("Unknown field: '{}' (valid fields: country, region, income)", field))
}

/// Parse a filter expression; blank input gives an empty (match-all) expression
pub fn parse_filter(input: &str) -> Result<FilterExpr> {
    let tokens = tokenize(input).context("Failed to tokenize filter")?;

    let mut expr = FilterExpr::new();
    let mut pending: Option<FilterOperator> = None;
    let mut last_field: Option<FilterField> = None;

    for token in tokens {
        match token {
            Token::FieldValue { field, value } => {
                let field = parse_field(&field)?;
                let operator = pending.take().unwrap_or(match last_field {
                    Some(prev) if prev == field => FilterOperator::Or,
                    _ => FilterOperator::And,
                });
                expr.push(operator, FieldFilter::new(field, value));
                last_field = Some(field);
            }
            Token::And | Token::Or => {
                if expr.is_empty() || pending.is_some() {
                    bail!("Unexpected operator (expected field:value)");
                }
                pending =
                    Some(if token == Token::And { FilterOperator::And } else { FilterOperator::Or });
            }
        }
    }

    if pending.is_some() {
        bail!("Filter ended with operator (expected field:value)");
    }

    Ok(expr)
}

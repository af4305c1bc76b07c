//! This module provides the parser for machine descriptions, utilizing the `pest` crate.
//! It defines the grammar for the comma separated description format and functions to turn
//! the input into a `MachineDescription`.

use crate::types::{Direction, MachineDescription, Transition, TraceError};
use pest::{
    error::{Error, ErrorVariant},
    iterators::Pair,
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;
use std::collections::HashMap;

/// The number of fields in a transition row.
const TRANSITION_FIELDS: usize = 5;

/// Derives a `PestParser` for the description grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct DescriptionParser;

/// A non-empty row of the description with the span of each field kept for error reporting.
struct Row<'i> {
    span: Span<'i>,
    fields: Vec<Field<'i>>,
}

struct Field<'i> {
    value: String,
    span: Span<'i>,
}

/// Parses the given input string into a `MachineDescription`.
///
/// The first seven non-blank rows are the header: name, states, input alphabet, tape alphabet,
/// start state, accept state and reject state. Every following row with five fields is a
/// transition `state,read,next_state,write,move`; shorter rows are ignored. Rows made only of
/// empty fields count as blank, and empty cells padding a header row are dropped.
///
/// # Arguments
///
/// * `input` - A string slice containing the machine description.
///
/// # Returns
///
/// * `Ok(MachineDescription)` if the input is successfully parsed.
/// * `Err(TraceError::ParseError)` if there are syntax errors or malformed transition rows.
/// * `Err(TraceError::ValidationError)` if a header row is missing.
pub fn parse(input: &str) -> Result<MachineDescription, TraceError> {
    let root = DescriptionParser::parse(Rule::description, input.trim_start_matches('\u{feff}'))
        .map_err(|e| TraceError::ParseError(e.into()))?
        .next()
        .ok_or_else(|| TraceError::ValidationError("Empty machine description".to_string()))?;

    parse_description(root)
}

/// Builds the description from the rows of a `Pair<Rule::description>`.
fn parse_description(pair: Pair<Rule>) -> Result<MachineDescription, TraceError> {
    let mut rows = pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::row)
        .map(parse_row)
        .filter(|row| !row.fields.is_empty());

    let name = parse_header_value(rows.next(), "name")?;
    let states = parse_header_values(rows.next(), "states")?;
    let input_alphabet = parse_header_symbols(rows.next(), "input alphabet")?;
    let tape_alphabet = parse_header_symbols(rows.next(), "tape alphabet")?;
    let start_state = parse_header_value(rows.next(), "start state")?;
    let accept_state = parse_header_value(rows.next(), "accept state")?;
    let reject_state = parse_header_value(rows.next(), "reject state")?;

    Ok(MachineDescription {
        name,
        states,
        input_alphabet,
        tape_alphabet,
        start_state,
        accept_state,
        reject_state,
        rules: parse_transitions(rows)?,
    })
}

/// Collects the transition rows into rules keyed by source state, keeping row order.
fn parse_transitions<'i>(
    rows: impl Iterator<Item = Row<'i>>,
) -> Result<HashMap<String, Vec<Transition>>, TraceError> {
    let mut rules: HashMap<String, Vec<Transition>> = HashMap::new();

    for row in rows {
        if row.fields.len() < TRANSITION_FIELDS {
            continue;
        }

        if let Some((state, transition)) = parse_transition(row)? {
            rules.entry(state).or_default().push(transition);
        }
    }

    Ok(rules)
}

/// Parses a single `state,read,next_state,write,move` row.
///
/// A row with an empty `read` cell can never match a head symbol and yields `None`.
fn parse_transition(row: Row) -> Result<Option<(String, Transition)>, TraceError> {
    if row.fields.len() > TRANSITION_FIELDS {
        return Err(parse_error(
            &format!(
                "Transition has {} fields, expected {}",
                row.fields.len(),
                TRANSITION_FIELDS
            ),
            row.span,
        ));
    }

    let mut fields = row.fields.into_iter();
    let mut next = || {
        fields.next().ok_or_else(|| {
            TraceError::ValidationError("Truncated transition row".to_string())
        })
    };

    let state = next()?.value;
    let read = next()?;
    if read.value.is_empty() {
        return Ok(None);
    }
    let read = parse_symbol(read)?;
    let next_state = next()?.value;
    let write = parse_symbol(next()?)?;
    let direction = parse_direction(next()?)?;

    Ok(Some((
        state,
        Transition {
            read,
            write,
            direction,
            next_state,
        },
    )))
}

/// Parses a move field.
///
/// Supports 'L' for Left and 'R' for Right.
fn parse_direction(field: Field) -> Result<Direction, TraceError> {
    match field.value.as_str() {
        "L" => Ok(Direction::Left),
        "R" => Ok(Direction::Right),
        other => Err(parse_error(
            &format!("Unsupported direction: {other}"),
            field.span,
        )),
    }
}

/// Parses a field holding exactly one tape symbol.
fn parse_symbol(field: Field) -> Result<char, TraceError> {
    let mut chars = field.value.chars();

    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(parse_error(
            &format!("Expected a single symbol, found \"{}\"", field.value),
            field.span,
        )),
    }
}

/// Returns the first field of a required header row.
fn parse_header_value(row: Option<Row>, name: &str) -> Result<String, TraceError> {
    let row = check_required_row(row, name)?;

    Ok(row
        .fields
        .into_iter()
        .next()
        .map(|field| field.value)
        .unwrap_or_default())
}

/// Returns every non-empty field of a required header row.
fn parse_header_values(row: Option<Row>, name: &str) -> Result<Vec<String>, TraceError> {
    let row = check_required_row(row, name)?;

    Ok(row
        .fields
        .into_iter()
        .filter(|field| !field.value.is_empty())
        .map(|field| field.value)
        .collect())
}

/// Returns every non-empty field of a required header row as single symbols.
fn parse_header_symbols(row: Option<Row>, name: &str) -> Result<Vec<char>, TraceError> {
    let row = check_required_row(row, name)?;

    row.fields
        .into_iter()
        .filter(|field| !field.value.is_empty())
        .map(parse_symbol)
        .collect()
}

/// Extracts the fields of a `Pair<Rule::row>`.
///
/// Bare fields are trimmed, quoted fields are unescaped and kept verbatim. A row made only
/// of empty bare fields (a blank line, or `,,,,`) yields no fields.
fn parse_row(pair: Pair<Rule>) -> Row {
    let span = pair.as_span();
    let mut fields = Vec::new();

    for p in pair.into_inner() {
        let span = p.as_span();
        let value = match p.as_rule() {
            Rule::quoted => p
                .into_inner()
                .next()
                .map(|inner| inner.as_str().replace("\"\"", "\""))
                .unwrap_or_default(),
            Rule::bare => p.as_str().trim().to_string(),
            _ => continue,
        };

        fields.push(Field { value, span });
    }

    let blank = fields
        .iter()
        .all(|field| field.value.is_empty() && field.span.as_str().trim().is_empty());
    if blank {
        fields.clear();
    }

    Row { span, fields }
}

/// Creates a `TraceError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> TraceError {
    TraceError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}

/// Checks if a required header row is present, returning an `Err` if it's missing.
fn check_required_row<'i>(row: Option<Row<'i>>, name: &str) -> Result<Row<'i>, TraceError> {
    row.ok_or_else(|| TraceError::ValidationError(format!("Missing '{name}' row")))
}

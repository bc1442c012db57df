//! Text framing of the turn protocol.
//!
//! ```text
//! width height self-id            (once)
//! <height grid rows>              (every turn)
//! entity-count
//! type owner x y param1 param2    (entity-count times)
//! ```
//!
//! Only framing and numbers are checked here. Symbols, bounds and parameter
//! ranges are validated when the runtime builds its world model.
use std::io::BufRead;
use std::str::FromStr;

use game_core::{AgentId, EntityRecord, Handshake, Position, TurnSnapshot};

use crate::error::ProtocolError;

/// Reads the session handshake.
pub fn read_handshake<R: BufRead>(reader: &mut R) -> Result<Handshake, ProtocolError> {
    let line = next_line(reader)?.ok_or(ProtocolError::Truncated {
        expected: "handshake",
    })?;
    let [width, height, self_id] = fields(&line, "handshake")?;

    Ok(Handshake::new(
        parse(width, "width")?,
        parse(height, "height")?,
        AgentId(parse(self_id, "self id")?),
    ))
}

/// Reads one turn, or `None` when the input ends cleanly between turns.
pub fn read_turn<R: BufRead>(
    reader: &mut R,
    handshake: &Handshake,
) -> Result<Option<TurnSnapshot>, ProtocolError> {
    let Some(first) = next_line(reader)? else {
        return Ok(None);
    };

    let mut rows = Vec::with_capacity(handshake.height as usize);
    rows.push(first);
    while rows.len() < handshake.height as usize {
        rows.push(expect_line(reader, "grid row")?);
    }

    let line = expect_line(reader, "entity count")?;
    let [count] = fields(&line, "entity count")?;
    let count: usize = parse(count, "entity count")?;

    let mut entities = Vec::with_capacity(count);
    for _ in 0..count {
        let line = expect_line(reader, "entity record")?;
        entities.push(parse_record(&line)?);
    }

    Ok(Some(TurnSnapshot::new(rows, entities)))
}

fn parse_record(line: &str) -> Result<EntityRecord, ProtocolError> {
    let [kind, owner, x, y, param1, param2] = fields(line, "entity record")?;
    Ok(EntityRecord {
        kind: parse(kind, "entity type")?,
        owner: AgentId(parse(owner, "entity owner")?),
        position: Position::new(parse(x, "entity x")?, parse(y, "entity y")?),
        param1: parse(param1, "entity param1")?,
        param2: parse(param2, "entity param2")?,
    })
}

/// Next line without its terminator; `None` at end of input.
fn next_line<R: BufRead>(reader: &mut R) -> Result<Option<String>, ProtocolError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

fn expect_line<R: BufRead>(reader: &mut R, expected: &'static str) -> Result<String, ProtocolError> {
    next_line(reader)?.ok_or(ProtocolError::Truncated { expected })
}

fn fields<'a, const N: usize>(line: &'a str, what: &'static str) -> Result<[&'a str; N], ProtocolError> {
    let found: Vec<&str> = line.split_whitespace().collect();
    let actual = found.len();
    found.try_into().map_err(|_| ProtocolError::FieldCount {
        what,
        line: line.to_owned(),
        expected: N,
        actual,
    })
}

fn parse<T: FromStr>(value: &str, field: &'static str) -> Result<T, ProtocolError> {
    value.parse().map_err(|_| ProtocolError::InvalidNumber {
        field,
        value: value.to_owned(),
    })
}

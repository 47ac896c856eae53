//! World description files.
//!
//! One room per line, fields separated by whitespace:
//!
//! ```text
//! # root room
//! 7 0 0
//! # stage block room side [offset [anchor]]
//! 7 0 1 R
//! 7 1 0 U -4
//! 7 1 1 D 0 1
//! ```
//!
//! `side` is one of U/D/L/R, `offset` is in 16-pixel steps and `anchor` is the
//! index of an earlier room (the root is 0). Blank lines and `#` comments are
//! skipped.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use super::{Directive, Side, WorldPlan};
use crate::error::{MapError, Result};
use crate::room::RoomId;

fn field<T: FromStr>(line_no: usize, fields: &[&str], i: usize, name: &str) -> Result<T> {
    let raw = fields
        .get(i)
        .ok_or_else(|| MapError::directive(line_no, format!("missing {}", name)))?;
    raw.parse()
        .map_err(|_| MapError::directive(line_no, format!("invalid {} '{}'", name, raw)))
}

fn room_id(line_no: usize, fields: &[&str]) -> Result<RoomId> {
    Ok(RoomId::new(
        field(line_no, fields, 0, "stage")?,
        field(line_no, fields, 1, "block")?,
        field(line_no, fields, 2, "room")?,
    ))
}

pub fn parse_world(text: &str) -> Result<WorldPlan> {
    let mut root = None;
    let mut directives = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let content = line.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let fields: Vec<&str> = content.split_whitespace().collect();

        if root.is_none() {
            if fields.len() != 3 {
                return Err(MapError::directive(
                    line_no,
                    format!("root room takes 3 fields, found {}", fields.len()),
                ));
            }
            root = Some(room_id(line_no, &fields)?);
            continue;
        }

        if !(4..=6).contains(&fields.len()) {
            return Err(MapError::directive(
                line_no,
                format!("expected 4 to 6 fields, found {}", fields.len()),
            ));
        }
        let room = room_id(line_no, &fields)?;
        let side = fields[3]
            .parse::<Side>()
            .map_err(|reason| MapError::directive(line_no, reason))?;
        let offset = if fields.len() > 4 {
            field(line_no, &fields, 4, "offset")?
        } else {
            0
        };
        let anchor = if fields.len() > 5 {
            Some(field(line_no, &fields, 5, "anchor")?)
        } else {
            None
        };

        directives.push(Directive {
            room,
            side,
            offset,
            anchor,
        });
    }

    let root = root.ok_or_else(|| MapError::directive(0, "world description has no rooms"))?;
    Ok(WorldPlan { root, directives })
}

pub fn read_world<P: AsRef<Path>>(path: P) -> Result<WorldPlan> {
    let text = fs::read_to_string(path.as_ref())?;
    parse_world(&text)
}

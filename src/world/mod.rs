//! # World Assembly
//!
//! Places rooms in a shared coordinate space. The root room sits at the origin;
//! every later room is attached to one side of an earlier room (the previous
//! one unless an anchor is given). Once everything is placed, coordinates are
//! shifted so the top-left-most room edge lands on zero.

pub mod description;
pub mod render;

use std::str::FromStr;

use serde::Serialize;

use crate::error::{MapError, Result};
use crate::room::{RoomDescriptor, RoomId, RoomSource};

pub use description::parse_world;
pub use render::render_world;

/// Attachment offsets are given in 16-pixel steps
pub const OFFSET_UNIT: i64 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Side {
    Up,
    Down,
    Left,
    Right,
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "u" | "up" => Ok(Side::Up),
            "d" | "down" => Ok(Side::Down),
            "l" | "left" => Ok(Side::Left),
            "r" | "right" => Ok(Side::Right),
            _ => Err(format!("unknown attachment side '{}'", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Directive {
    pub room: RoomId,
    pub side: Side,
    /// Perpendicular shift in 16-pixel steps
    pub offset: i32,
    /// Index of an already placed room; the previous room when `None`
    pub anchor: Option<usize>,
}

impl Directive {
    pub fn new(room: RoomId, side: Side) -> Self {
        Self {
            room,
            side,
            offset: 0,
            anchor: None,
        }
    }

    pub fn offset_pixels(&self) -> i64 {
        i64::from(self.offset) * OFFSET_UNIT
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldPlan {
    pub root: RoomId,
    pub directives: Vec<Directive>,
}

/// A room with its final, non-negative position in the world
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlacedRoom {
    pub descriptor: RoomDescriptor,
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct World {
    pub rooms: Vec<PlacedRoom>,
    pub width: usize,
    pub height: usize,
}

/// Position during the placement pass, before normalisation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Rect {
    x: i64,
    y: i64,
    w: i64,
    h: i64,
}

impl Rect {
    fn sized(room: &RoomDescriptor) -> Self {
        Self {
            x: 0,
            y: 0,
            w: room.width() as i64,
            h: room.height() as i64,
        }
    }

    fn attach(self, anchor: &Rect, side: Side, offset: i64) -> Self {
        let (x, y) = match side {
            Side::Up => (anchor.x + offset, anchor.y - self.h),
            Side::Down => (anchor.x + offset, anchor.y + anchor.h),
            Side::Left => (anchor.x - self.w, anchor.y + offset),
            Side::Right => (anchor.x + anchor.w, anchor.y + offset),
        };
        Self { x, y, ..self }
    }
}

impl World {
    /// Place every room of a plan, in order, and normalise the result
    pub fn assemble<S: RoomSource + ?Sized>(source: &S, plan: &WorldPlan) -> Result<Self> {
        let root = source.describe(plan.root)?;
        let mut rects = vec![Rect::sized(&root)];
        let mut descriptors = vec![root];

        for (i, directive) in plan.directives.iter().enumerate() {
            let anchor_index = directive.anchor.unwrap_or(rects.len() - 1);
            let anchor = *rects.get(anchor_index).ok_or_else(|| {
                MapError::directive(
                    i + 1,
                    format!(
                        "anchor {} does not name one of the {} rooms placed so far",
                        anchor_index,
                        rects.len()
                    ),
                )
            })?;

            let room = source.describe(directive.room)?;
            let rect =
                Rect::sized(&room).attach(&anchor, directive.side, directive.offset_pixels());
            log::debug!(
                "room {} attached {:?} of #{} at ({}, {})",
                directive.room,
                directive.side,
                anchor_index,
                rect.x,
                rect.y
            );
            rects.push(rect);
            descriptors.push(room);
        }

        let min_x = rects.iter().map(|r| r.x).min().unwrap_or(0).min(0);
        let min_y = rects.iter().map(|r| r.y).min().unwrap_or(0).min(0);
        let max_x = rects.iter().map(|r| r.x + r.w).max().unwrap_or(0).max(0);
        let max_y = rects.iter().map(|r| r.y + r.h).max().unwrap_or(0).max(0);

        let rooms = descriptors
            .into_iter()
            .zip(rects)
            .map(|(descriptor, rect)| PlacedRoom {
                descriptor,
                x: (rect.x - min_x) as usize,
                y: (rect.y - min_y) as usize,
                width: rect.w as usize,
                height: rect.h as usize,
            })
            .collect::<Vec<_>>();

        let world = World {
            rooms,
            width: (max_x - min_x) as usize,
            height: (max_y - min_y) as usize,
        };
        log::info!(
            "Assembled {} rooms into a {}x{} world",
            world.rooms.len(),
            world.width,
            world.height
        );
        Ok(world)
    }
}

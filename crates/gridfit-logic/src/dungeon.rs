//! Abstract dungeon graph: rooms, corridors, and their ordering.
//!
//! This is the input contract for the fitter. Rooms and corridors are created
//! once by a generator and never mutated by the fitting pass. Corridors refer
//! to rooms by id only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_ROOM_ID: AtomicU32 = AtomicU32::new(1);

/// Shape tag of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomShape {
    Starter,
    CorridorEnd,
    Square,
    Rectangular,
    Circular,
    Unusual,
}

impl RoomShape {
    pub fn description(self) -> &'static str {
        match self {
            RoomShape::Starter => "Starter",
            RoomShape::CorridorEnd => "Corridor End",
            RoomShape::Square => "Square",
            RoomShape::Rectangular => "Rectangular",
            RoomShape::Circular => "Circular",
            RoomShape::Unusual => "Unusual",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    id: u32,
    shape: RoomShape,
    dimensions: String,
}

impl Room {
    /// Create a room with the next process-wide id (ids start at 1).
    pub fn new(shape: RoomShape, dimensions: impl Into<String>) -> Self {
        let id = NEXT_ROOM_ID.fetch_add(1, Ordering::Relaxed);
        Self::with_id(id, shape, dimensions)
    }

    /// Create a room with an explicit id, e.g. when rebuilding from a snapshot.
    /// Does not advance the id counter.
    pub fn with_id(id: u32, shape: RoomShape, dimensions: impl Into<String>) -> Self {
        Self {
            id,
            shape,
            dimensions: dimensions.into(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn shape(&self) -> RoomShape {
        self.shape
    }

    /// Free-form size descriptor such as `"20' x 30'"`.
    pub fn dimensions(&self) -> &str {
        &self.dimensions
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Room #{} [{} | {}]",
            self.id,
            self.shape.description(),
            self.dimensions
        )
    }
}

/// An edge between two rooms. Either endpoint may be absent (dead ends,
/// trap continuations, unresolved branches).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corridor {
    pub from: Option<u32>,
    pub to: Option<u32>,
    /// Flavor only; not used for fitting.
    pub length_feet: u32,
    /// Flavor only; not used for fitting.
    pub description: String,
}

impl Corridor {
    pub fn new(
        from: Option<&Room>,
        to: Option<&Room>,
        length_feet: u32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            from: from.map(Room::id),
            to: to.map(Room::id),
            length_feet,
            description: description.into(),
        }
    }

    /// Both endpoint ids, if both are present.
    pub fn endpoints(&self) -> Option<(u32, u32)> {
        Some((self.from?, self.to?))
    }
}

impl fmt::Display for Corridor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = |id: Option<u32>| id.map_or("None".to_string(), |id| format!("Room#{}", id));
        write!(
            f,
            "Corridor [{} -> {}, length={} ft, {}]",
            end(self.from),
            end(self.to),
            self.length_feet,
            self.description
        )
    }
}

/// Ordered rooms and corridors. Corridor order is routing order: later
/// corridors see the cells carved by earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Dungeon {
    rooms: Vec<Room>,
    corridors: Vec<Corridor>,
}

impl Dungeon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_room(&mut self, room: Room) {
        self.rooms.push(room);
    }

    pub fn add_corridor(&mut self, corridor: Corridor) {
        self.corridors.push(corridor);
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    pub fn room(&self, id: u32) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn last_room(&self) -> Option<&Room> {
        self.rooms.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_ids_increase() {
        let a = Room::new(RoomShape::Square, "10' x 10'");
        let b = Room::new(RoomShape::Square, "10' x 10'");
        assert!(a.id() >= 1);
        assert!(b.id() > a.id());
    }

    #[test]
    fn test_with_id_keeps_id() {
        let r = Room::with_id(42, RoomShape::Circular, "30' diameter");
        assert_eq!(r.id(), 42);
        assert_eq!(r.shape(), RoomShape::Circular);
        assert_eq!(r.dimensions(), "30' diameter");
    }

    #[test]
    fn test_corridor_endpoints() {
        let a = Room::with_id(1, RoomShape::Starter, "20' x 20'");
        let b = Room::with_id(2, RoomShape::Square, "10' x 10'");
        assert_eq!(Corridor::new(Some(&a), Some(&b), 30, "").endpoints(), Some((1, 2)));
        assert_eq!(Corridor::new(Some(&a), None, 10, "Dead end").endpoints(), None);
        assert_eq!(Corridor::new(None, Some(&b), 0, "").endpoints(), None);
    }

    #[test]
    fn test_display() {
        let a = Room::with_id(7, RoomShape::Starter, "20' x 20'");
        assert_eq!(a.to_string(), "Room #7 [Starter | 20' x 20']");
        let c = Corridor::new(Some(&a), None, 10, "Dead end here");
        assert_eq!(
            c.to_string(),
            "Corridor [Room#7 -> None, length=10 ft, Dead end here]"
        );
    }

    #[test]
    fn test_dungeon_preserves_order() {
        let mut d = Dungeon::new();
        let a = Room::with_id(3, RoomShape::Starter, "20' x 20'");
        let b = Room::with_id(1, RoomShape::Square, "10' x 10'");
        d.add_corridor(Corridor::new(Some(&a), Some(&b), 30, "first"));
        d.add_corridor(Corridor::new(Some(&b), Some(&a), 30, "second"));
        d.add_room(a);
        d.add_room(b);
        assert_eq!(d.rooms()[0].id(), 3);
        assert_eq!(d.corridors()[1].description, "second");
        assert_eq!(d.room(1).map(Room::dimensions), Some("10' x 10'"));
        assert_eq!(d.last_room().map(Room::id), Some(1));
    }
}

//! Random dungeon graphs from classic d20 passage tables.
//!
//! Starts from a 20' x 20' starter room and expands passages recursively
//! until the room cap or depth cap is reached. Each table is a pure
//! `from_roll(1..=20)` mapping so it can be tested without an RNG.

use rand::Rng;

use crate::dungeon::{Corridor, Dungeon, Room, RoomShape};

pub const DEFAULT_MAX_ROOMS: usize = 10;

fn d20<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(1..=20)
}

/// Table I: what happens next along a passage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassageResult {
    ContinueStraight,
    Door,
    SidePassage,
    PassageTurns,
    Chamber,
    Stairs,
    DeadEnd,
    TrickTrap,
    WanderingMonster,
}

impl PassageResult {
    pub fn from_roll(roll: u8) -> Self {
        match roll {
            0..=2 => Self::ContinueStraight,
            3..=5 => Self::Door,
            6..=10 => Self::SidePassage,
            11..=13 => Self::PassageTurns,
            14..=16 => Self::Chamber,
            17 => Self::Stairs,
            18 => Self::DeadEnd,
            19 => Self::TrickTrap,
            _ => Self::WanderingMonster,
        }
    }
}

/// Table II, first roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorLocation {
    Left,
    Right,
    Ahead,
}

impl DoorLocation {
    pub fn from_roll(roll: u8) -> Self {
        match roll {
            0..=6 => Self::Left,
            7..=12 => Self::Right,
            _ => Self::Ahead,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Ahead => "AHEAD",
        }
    }
}

/// Table II, second roll: the space beyond a door.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorBeyond {
    ParallelOrSmallRoom,
    PassageStraight,
    PassageAngled,
    Room,
    Chamber,
}

impl DoorBeyond {
    pub fn from_roll(roll: u8) -> Self {
        match roll {
            0..=4 => Self::ParallelOrSmallRoom,
            5..=8 => Self::PassageStraight,
            9..=10 => Self::PassageAngled,
            11..=18 => Self::Room,
            _ => Self::Chamber,
        }
    }
}

/// Table III: side passage direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideDirection {
    Left90,
    Right90,
    Left45,
    Right45,
    Left135,
    Right135,
    LeftCurve45,
    RightCurve45,
    TIntersection,
    YIntersection,
    FourWay,
    XIntersection,
}

impl SideDirection {
    pub fn from_roll(roll: u8) -> Self {
        match roll {
            0..=2 => Self::Left90,
            3..=4 => Self::Right90,
            5 => Self::Left45,
            6 => Self::Right45,
            7 => Self::Left135,
            8 => Self::Right135,
            9 => Self::LeftCurve45,
            10 => Self::RightCurve45,
            11..=13 => Self::TIntersection,
            14..=15 => Self::YIntersection,
            16..=19 => Self::FourWay,
            _ => Self::XIntersection,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Left90 => "LEFT_90",
            Self::Right90 => "RIGHT_90",
            Self::Left45 => "LEFT_45",
            Self::Right45 => "RIGHT_45",
            Self::Left135 => "LEFT_135",
            Self::Right135 => "RIGHT_135",
            Self::LeftCurve45 => "LEFT_CURVE_45",
            Self::RightCurve45 => "RIGHT_CURVE_45",
            Self::TIntersection => "T_INTERSECTION",
            Self::YIntersection => "Y_INTERSECTION",
            Self::FourWay => "FOUR_WAY",
            Self::XIntersection => "X_INTERSECTION",
        }
    }
}

/// Passage width in feet. 19-20 is "special" on the table; treated as 40'.
pub fn passage_width_from_roll(roll: u8) -> u32 {
    match roll {
        0..=4 => 5,
        5..=13 => 10,
        14..=17 => 20,
        18 => 30,
        _ => 40,
    }
}

/// Table IV: passage turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left90,
    Left45Ahead,
    Left135,
    Right90,
    Right45Ahead,
    Right135,
}

impl Turn {
    pub fn from_roll(roll: u8) -> Self {
        match roll {
            0..=8 => Self::Left90,
            9 => Self::Left45Ahead,
            10 => Self::Left135,
            11..=18 => Self::Right90,
            19 => Self::Right45Ahead,
            _ => Self::Right135,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Left90 => "Left 90°",
            Self::Left45Ahead => "Left 45° ahead",
            Self::Left135 => "Left 135°",
            Self::Right90 => "Right 90°",
            Self::Right45Ahead => "Right 45° ahead",
            Self::Right135 => "Right 135°",
        }
    }
}

/// Table V: chamber shape and size.
pub fn chamber_from_roll(roll: u8) -> (RoomShape, &'static str) {
    match roll {
        0..=4 => (RoomShape::Square, "20' x 20'"),
        5..=6 => (RoomShape::Square, "30' x 30'"),
        7..=8 => (RoomShape::Square, "40' x 40'"),
        9..=10 => (RoomShape::Rectangular, "20' x 30'"),
        11..=13 => (RoomShape::Rectangular, "30' x 50'"),
        14..=15 => (RoomShape::Rectangular, "40' x 60'"),
        16..=17 => (RoomShape::Circular, "30' diameter"),
        _ => (RoomShape::Unusual, "about 500+ sq. ft"),
    }
}

/// Table VIII: stairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stairs {
    Down1,
    Down2,
    Down3,
    Up1,
    UpToDeadEnd,
    DownToDeadEnd,
    ChimneyUp1,
    ChimneyUp2,
    ChimneyDown2,
    TrapDoorDown1,
    TrapDoorDown2,
    UpOneDownTwoChamber,
}

impl Stairs {
    pub fn from_roll(roll: u8) -> Self {
        match roll {
            0..=5 => Self::Down1,
            6 => Self::Down2,
            7 => Self::Down3,
            8 => Self::Up1,
            9 => Self::UpToDeadEnd,
            10 => Self::DownToDeadEnd,
            11 => Self::ChimneyUp1,
            12 => Self::ChimneyUp2,
            13 => Self::ChimneyDown2,
            14..=16 => Self::TrapDoorDown1,
            17 => Self::TrapDoorDown2,
            _ => Self::UpOneDownTwoChamber,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Down1 => "Down 1 level",
            Self::Down2 => "Down 2 levels",
            Self::Down3 => "Down 3 levels",
            Self::Up1 => "Up 1 level",
            Self::UpToDeadEnd => "Up to dead end (possible chute trap)",
            Self::DownToDeadEnd => "Down to dead end (possible chute trap)",
            Self::ChimneyUp1 => "Chimney up 1 level, passage continues",
            Self::ChimneyUp2 => "Chimney up 2 levels, passage continues",
            Self::ChimneyDown2 => "Chimney down 2 levels, passage continues",
            Self::TrapDoorDown1 => "Trap door down 1 level, passage continues",
            Self::TrapDoorDown2 => "Trap door down 2 levels, passage continues",
            Self::UpOneDownTwoChamber => "Up 1 level, then down 2 levels, ends in chamber",
        }
    }
}

/// Builds a [`Dungeon`] by rolling the passage tables.
#[derive(Debug, Clone, Copy)]
pub struct DungeonGenerator {
    pub max_rooms: usize,
}

impl Default for DungeonGenerator {
    fn default() -> Self {
        Self {
            max_rooms: DEFAULT_MAX_ROOMS,
        }
    }
}

impl DungeonGenerator {
    pub fn new(max_rooms: usize) -> Self {
        Self { max_rooms }
    }

    /// The room cap is checked before each expansion, so a single step may
    /// push the count a little past `max_rooms`.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Dungeon {
        let mut dungeon = Dungeon::new();
        let start = Room::new(RoomShape::Starter, "20' x 20'");
        dungeon.add_room(start.clone());
        self.expand(&mut dungeon, &start, 0, rng);
        log::debug!(
            "Generated dungeon: {} rooms, {} corridors",
            dungeon.rooms().len(),
            dungeon.corridors().len()
        );
        dungeon
    }

    fn expand<R: Rng + ?Sized>(&self, dungeon: &mut Dungeon, from: &Room, depth: usize, rng: &mut R) {
        if dungeon.rooms().len() >= self.max_rooms || depth > self.max_rooms * 2 {
            return;
        }
        match PassageResult::from_roll(d20(rng)) {
            PassageResult::ContinueStraight => {
                let end = linear_corridor(dungeon, from, 60, "Continue straight");
                self.expand(dungeon, &end, depth + 1, rng);
            }
            PassageResult::Door => {
                let location = DoorLocation::from_roll(d20(rng));
                let beyond = DoorBeyond::from_roll(d20(rng));
                self.door(dungeon, from, location, beyond, depth, rng);
            }
            PassageResult::SidePassage => {
                let direction = SideDirection::from_roll(d20(rng));
                let width = passage_width_from_roll(d20(rng));
                let desc = format!("Side passage {}, {} ft wide", direction.label(), width);
                let end = linear_corridor(dungeon, from, 30, desc);
                self.expand(dungeon, &end, depth + 1, rng);
            }
            PassageResult::PassageTurns => {
                let turn = Turn::from_roll(d20(rng));
                let width = passage_width_from_roll(d20(rng));
                let desc = format!("{} ft wide, {}", width, turn.description());
                let end = linear_corridor(dungeon, from, 60, desc);
                self.expand(dungeon, &end, depth + 1, rng);
            }
            PassageResult::Chamber => {
                let chamber = random_chamber(rng);
                dungeon.add_room(chamber.clone());
                dungeon.add_corridor(Corridor::new(Some(from), Some(&chamber), 30, "To Chamber"));
                self.expand(dungeon, &chamber, depth + 1, rng);
            }
            PassageResult::Stairs => {
                let stairs = Stairs::from_roll(d20(rng));
                let desc = format!("Stairs: {}", stairs.description());
                let landing = linear_corridor(dungeon, from, 20, desc);
                if stairs == Stairs::UpOneDownTwoChamber {
                    let chamber = random_chamber(rng);
                    dungeon.add_room(chamber.clone());
                    dungeon.add_corridor(Corridor::new(
                        Some(&landing),
                        Some(&chamber),
                        10,
                        "End of stairs -> Chamber",
                    ));
                    self.expand(dungeon, &chamber, depth + 1, rng);
                } else {
                    self.expand(dungeon, &landing, depth + 1, rng);
                }
            }
            PassageResult::DeadEnd => {
                dungeon.add_corridor(Corridor::new(Some(from), None, 10, "Dead end here"));
            }
            PassageResult::TrickTrap => {
                dungeon.add_corridor(Corridor::new(
                    Some(from),
                    None,
                    30,
                    "Trap in passage - continues",
                ));
                if dungeon.rooms().len() < self.max_rooms {
                    let trap_end = Room::new(RoomShape::CorridorEnd, "End after trap");
                    dungeon.add_room(trap_end.clone());
                    dungeon.add_corridor(Corridor::new(
                        None,
                        Some(&trap_end),
                        0,
                        "Trap corridor ends here",
                    ));
                    self.expand(dungeon, &trap_end, depth + 1, rng);
                }
            }
            PassageResult::WanderingMonster => {
                dungeon.add_corridor(Corridor::new(
                    Some(from),
                    None,
                    10,
                    "Wandering monster encountered",
                ));
                // roll again from the same spot
                self.expand(dungeon, from, depth + 1, rng);
            }
        }
    }

    fn door<R: Rng + ?Sized>(
        &self,
        dungeon: &mut Dungeon,
        from: &Room,
        location: DoorLocation,
        beyond: DoorBeyond,
        depth: usize,
        rng: &mut R,
    ) {
        let door = format!("Door at {}", location.label());
        let next = match beyond {
            DoorBeyond::ParallelOrSmallRoom if rng.gen_bool(0.5) => {
                linear_corridor(dungeon, from, 30, format!("{} -> parallel passage", door))
            }
            DoorBeyond::ParallelOrSmallRoom => {
                let room = Room::new(RoomShape::Square, "10' x 10'");
                dungeon.add_room(room.clone());
                dungeon.add_corridor(Corridor::new(
                    Some(from),
                    Some(&room),
                    5,
                    format!("{} -> small 10x10 room", door),
                ));
                room
            }
            DoorBeyond::PassageStraight => {
                linear_corridor(dungeon, from, 30, format!("{} -> passage straight", door))
            }
            DoorBeyond::PassageAngled => {
                let angle = if rng.gen_bool(0.5) { "45°" } else { "135°" };
                linear_corridor(
                    dungeon,
                    from,
                    30,
                    format!("{} -> angled {} passage", door, angle),
                )
            }
            DoorBeyond::Room | DoorBeyond::Chamber => {
                let label = if beyond == DoorBeyond::Room { "Room" } else { "Chamber" };
                let room = random_chamber(rng);
                dungeon.add_room(room.clone());
                dungeon.add_corridor(Corridor::new(
                    Some(from),
                    Some(&room),
                    10,
                    format!("{} -> {}", door, label),
                ));
                room
            }
        };
        self.expand(dungeon, &next, depth + 1, rng);
    }
}

fn random_chamber<R: Rng + ?Sized>(rng: &mut R) -> Room {
    let (shape, dimensions) = chamber_from_roll(d20(rng));
    Room::new(shape, dimensions)
}

/// A passage leading to a fresh corridor-end node, which is returned.
fn linear_corridor(
    dungeon: &mut Dungeon,
    from: &Room,
    length_feet: u32,
    description: impl Into<String>,
) -> Room {
    let end = Room::new(RoomShape::CorridorEnd, "N/A");
    dungeon.add_room(end.clone());
    dungeon.add_corridor(Corridor::new(Some(from), Some(&end), length_feet, description));
    end
}

//! Row-flow room placement.
//!
//! Rooms are laid left to right in creation order. When the next room would
//! run past `max_row_width` the cursor wraps to a new row below the tallest
//! room of the current one. There is no packing and, under the default
//! [`CollisionPolicy::Overwrite`], no collision check: a jittered room may
//! land on a neighbour and take over its cells.

use rand::Rng;

use crate::config::{CollisionPolicy, FitConfig};
use crate::dungeon::Room;
use crate::grid::{Coord, Grid};

/// Where a room ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub room_id: u32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// False if the collision policy refused the footprint.
    pub placed: bool,
}

impl Placement {
    pub fn contains(&self, c: Coord) -> bool {
        c.x >= self.x && c.x < self.x + self.width && c.y >= self.y && c.y < self.y + self.height
    }

    pub fn overlaps(&self, other: &Placement) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    /// Every coordinate in the footprint.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| Coord::new(x, y)))
    }
}

/// Largest room side accepted from a dimension string.
pub const MAX_ROOM_SIDE: i32 = 1000;

/// Parse a descriptor like `"20' x 30'"` or `"20x30"` into `(width, height)`.
///
/// The string must split on `x` into exactly two parts; each part keeps only
/// its digits. Returns `None` for free text, missing digits, overflow, or a
/// side that is zero or larger than [`MAX_ROOM_SIDE`].
pub fn parse_dimensions(dims: &str) -> Option<(i32, i32)> {
    let mut parts = dims.split('x');
    let (left, right) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let side = |s: &str| -> Option<i32> {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();
        digits
            .parse::<i32>()
            .ok()
            .filter(|&n| n > 0 && n <= MAX_ROOM_SIDE)
    };
    Some((side(left)?, side(right)?))
}

/// Fill a `width`×`height` rectangle at `(x, y)` with `room_id`.
pub fn place_rect(grid: &mut Grid, room_id: u32, x: i32, y: i32, width: i32, height: i32) {
    for yy in y..y.saturating_add(height) {
        for xx in x..x.saturating_add(width) {
            grid.set_room(Coord::new(xx, yy), room_id);
        }
    }
}

fn footprint_hits_room(grid: &Grid, p: &Placement) -> bool {
    p.coords().any(|c| grid.is_room(c))
}

pub struct RoomPlacer<'a> {
    config: &'a FitConfig,
}

impl<'a> RoomPlacer<'a> {
    pub fn new(config: &'a FitConfig) -> Self {
        Self { config }
    }

    /// Size of a room after parsing, fallback, and clamping.
    pub fn room_size(&self, room: &Room) -> (i32, i32) {
        let fallback = self.config.default_room_size.clamp(1, MAX_ROOM_SIDE);
        let (w, h) = parse_dimensions(room.dimensions()).unwrap_or_else(|| {
            log::trace!(
                "Room#{}: unparseable dimensions {:?}, using {}x{}",
                room.id(),
                room.dimensions(),
                fallback,
                fallback
            );
            (fallback, fallback)
        });
        match self.config.max_dimension {
            Some(max) if max > 0 => (w.min(max), h.min(max)),
            _ => (w, h),
        }
    }

    /// Place every room in order, writing room cells into `grid`.
    pub fn place_all<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        rooms: &[Room],
        rng: &mut R,
    ) -> Vec<Placement> {
        log::info!("Placing {} rooms...", rooms.len());
        let jitter = self.config.jitter.max(0);
        let mut cursor_x: i32 = 0;
        let mut cursor_y: i32 = 0;
        let mut tallest: i32 = 0;
        let mut placements = Vec::with_capacity(rooms.len());

        for (i, room) in rooms.iter().enumerate() {
            let (width, height) = self.room_size(room);

            if cursor_x > 0 && cursor_x.saturating_add(width) > self.config.max_row_width {
                cursor_x = 0;
                cursor_y = cursor_y.saturating_add(tallest.saturating_add(self.config.row_gap));
                tallest = 0;
            }

            let (dx, dy) = if jitter > 0 {
                (
                    rng.gen_range(-jitter..=jitter),
                    rng.gen_range(-jitter..=jitter),
                )
            } else {
                (0, 0)
            };

            let mut placement = Placement {
                room_id: room.id(),
                x: cursor_x.saturating_add(dx),
                y: cursor_y.saturating_add(dy),
                width,
                height,
                placed: true,
            };

            if self.config.collision == CollisionPolicy::Reject
                && footprint_hits_room(grid, &placement)
            {
                log::warn!(
                    "Room#{} rejected: {}x{} at ({},{}) overlaps an existing room",
                    room.id(),
                    width,
                    height,
                    placement.x,
                    placement.y
                );
                placement.placed = false;
            } else {
                place_rect(grid, room.id(), placement.x, placement.y, width, height);
                log::debug!(
                    "Placed room#{} at ({},{}), size {}x{}",
                    room.id(),
                    placement.x,
                    placement.y,
                    width,
                    height
                );
            }
            placements.push(placement);

            cursor_x = cursor_x.saturating_add(width.saturating_add(self.config.column_gap));
            tallest = tallest.max(height);

            if (i + 1) % 5 == 0 {
                log::info!("  ...placed {} rooms so far", i + 1);
            }
        }
        log::info!("All rooms placed.");
        placements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::RoomShape;
    use crate::grid::CellType;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn room(id: u32, dims: &str) -> Room {
        Room::with_id(id, RoomShape::Square, dims)
    }

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(parse_dimensions("20' x 30'"), Some((20, 30)));
        assert_eq!(parse_dimensions("20x30"), Some((20, 30)));
        assert_eq!(parse_dimensions("30' diameter"), None);
        assert_eq!(parse_dimensions("about 500+ sq. ft"), None);
        assert_eq!(parse_dimensions("N/A"), None);
        assert_eq!(parse_dimensions("End after trap"), None);
        assert_eq!(parse_dimensions("0x5"), None);
        assert_eq!(parse_dimensions("1x2x3"), None);
        assert_eq!(parse_dimensions("99999999999x2"), None);
        assert_eq!(parse_dimensions("1000x1000"), Some((1000, 1000)));
        assert_eq!(parse_dimensions("1001x2"), None);
    }

    #[test]
    fn test_huge_dimensions_fall_back() {
        let config = FitConfig::breadth_first();
        let mut grid = Grid::new();
        let rooms = vec![
            room(1, "2x2"),
            room(2, "2147483647x1"),
            room(3, "2147483000' x 1'"),
        ];
        let mut rng = StdRng::seed_from_u64(0);
        let p = RoomPlacer::new(&config).place_all(&mut grid, &rooms, &mut rng);
        assert_eq!((p[1].width, p[1].height), (5, 5));
        assert_eq!((p[2].width, p[2].height), (5, 5));
        assert_eq!(grid.len(), 4 + 25 + 25);
        assert_eq!((p[2].x, p[2].y), (11, 0));
    }

    #[test]
    fn test_room_size_fallback_and_clamp() {
        let config = FitConfig::weighted();
        let placer = RoomPlacer::new(&config);
        assert_eq!(placer.room_size(&room(1, "N/A")), (5, 5));
        assert_eq!(placer.room_size(&room(2, "40' x 60'")), (30, 30));
        assert_eq!(placer.room_size(&room(3, "20' x 30'")), (20, 30));

        let config = FitConfig::breadth_first();
        let placer = RoomPlacer::new(&config);
        assert_eq!(placer.room_size(&room(2, "40' x 60'")), (40, 60));
    }

    #[test]
    fn test_row_flow_and_wrap() {
        let config = FitConfig::breadth_first();
        let mut grid = Grid::new();
        let rooms = vec![
            room(1, "30x10"),
            room(2, "30x20"),
            room(3, "30x5"), // 64 + 30 > 80, wraps
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let p = RoomPlacer::new(&config).place_all(&mut grid, &rooms, &mut rng);

        assert_eq!((p[0].x, p[0].y), (0, 0));
        assert_eq!((p[1].x, p[1].y), (32, 0));
        assert_eq!((p[2].x, p[2].y), (0, 23));
        assert_eq!(grid.len(), 30 * 10 + 30 * 20 + 30 * 5);
        let cell = grid.get(Coord::new(29, 27)).unwrap();
        assert_eq!(cell.cell_type, CellType::Room);
        assert_eq!(cell.room_id, 3);
    }

    #[test]
    fn test_oversized_room_at_row_start_does_not_wrap() {
        let config = FitConfig::breadth_first();
        let mut grid = Grid::new();
        let rooms = vec![room(1, "90x2"), room(2, "2x2")];
        let mut rng = StdRng::seed_from_u64(1);
        let p = RoomPlacer::new(&config).place_all(&mut grid, &rooms, &mut rng);
        assert_eq!((p[0].x, p[0].y), (0, 0));
        assert_eq!((p[1].x, p[1].y), (0, 5));
    }

    #[test]
    fn test_jitter_is_bounded_and_seeded() {
        let config = FitConfig::weighted();
        let rooms: Vec<Room> = (1..=12).map(|i| room(i, "10x10")).collect();

        let run = |seed| {
            let mut grid = Grid::new();
            let mut rng = StdRng::seed_from_u64(seed);
            RoomPlacer::new(&config).place_all(&mut grid, &rooms, &mut rng)
        };
        let a = run(9);
        let b = run(9);
        assert_eq!(a, b);

        let mut cursor_x = 0;
        let mut cursor_y = 0;
        for p in &a {
            if cursor_x > 0 && cursor_x + 10 > config.max_row_width {
                cursor_x = 0;
                cursor_y += 10 + config.row_gap;
            }
            assert!((p.x - cursor_x).abs() <= config.jitter);
            assert!((p.y - cursor_y).abs() <= config.jitter);
            cursor_x += 10 + config.column_gap;
        }
    }

    #[test]
    fn test_overwrite_policy_replaces_cells() {
        let config = FitConfig::breadth_first();
        let mut grid = Grid::new();
        place_rect(&mut grid, 1, 0, 0, 3, 3);
        place_rect(&mut grid, 2, 2, 2, 3, 3);
        assert_eq!(grid.get(Coord::new(2, 2)).unwrap().room_id, 2);
        assert_eq!(grid.get(Coord::new(1, 1)).unwrap().room_id, 1);
        // default policy never rejects
        let rooms = vec![room(3, "2x2")];
        let mut rng = StdRng::seed_from_u64(0);
        let p = RoomPlacer::new(&config).place_all(&mut grid, &rooms, &mut rng);
        assert!(p[0].placed);
        assert_eq!(grid.get(Coord::new(0, 0)).unwrap().room_id, 3);
    }

    #[test]
    fn test_reject_policy_skips_overlap() {
        let config = FitConfig::breadth_first().with_collision(CollisionPolicy::Reject);
        let mut grid = Grid::new();
        place_rect(&mut grid, 99, 0, 0, 1, 1);
        let rooms = vec![room(1, "2x2"), room(2, "2x2")];
        let mut rng = StdRng::seed_from_u64(0);
        let p = RoomPlacer::new(&config).place_all(&mut grid, &rooms, &mut rng);
        assert!(!p[0].placed);
        assert!(p[1].placed);
        assert_eq!(grid.get(Coord::new(0, 0)).unwrap().room_id, 99);
        assert!(grid.get(Coord::new(1, 1)).is_none());
        assert_eq!(grid.get(Coord::new(4, 0)).unwrap().room_id, 2);
    }

    #[test]
    fn test_placement_geometry() {
        let a = Placement { room_id: 1, x: 0, y: 0, width: 2, height: 3, placed: true };
        let b = Placement { room_id: 2, x: 2, y: 0, width: 2, height: 2, placed: true };
        assert!(!a.overlaps(&b));
        assert!(a.contains(Coord::new(1, 2)));
        assert!(!a.contains(Coord::new(2, 0)));
        assert_eq!(a.coords().count(), 6);
    }
}

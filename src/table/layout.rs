//! Static table layout
//!
//! Positions and dimensions for every entity instance, in meters. The table
//! lies in the XZ plane with Y up; -Z points up-table, +Z toward the player
//! and the drain. Pure data, no behavior beyond containment checks.

use glam::{Vec2, Vec3};

use crate::consts::{FLIPPER_Y, LAUNCH_LANE_WIDTH, LAUNCH_LANE_X, TABLE_LENGTH, TABLE_WIDTH};

const HW: f32 = TABLE_WIDTH / 2.0;
const HL: f32 = TABLE_LENGTH / 2.0;

/// A fixed cuboid: cabinet walls, lane rails, guides.
#[derive(Debug, Clone, Copy)]
pub struct WallSpec {
    pub position: Vec3,
    pub half_extents: Vec3,
    pub rotation_y: f32,
}

impl WallSpec {
    fn new(position: Vec3, half_extents: Vec3) -> Self {
        Self {
            position,
            half_extents,
            rotation_y: 0.0,
        }
    }

    fn rotated(position: Vec3, half_extents: Vec3, rotation_y: f32) -> Self {
        Self {
            position,
            half_extents,
            rotation_y,
        }
    }
}

/// An axis-aligned volume: the playfield slab and the drain sensor.
#[derive(Debug, Clone, Copy)]
pub struct SlabSpec {
    pub position: Vec3,
    pub half_extents: Vec3,
}

/// The ramp's footprint and climb.
#[derive(Debug, Clone, Copy)]
pub struct RampSpec {
    pub start: Vec2,
    pub end: Vec2,
    pub height: f32,
}

/// A wedge deflector's seat and orientation.
#[derive(Debug, Clone, Copy)]
pub struct WedgeSpec {
    pub position: Vec2,
    pub is_left: bool,
}

/// A pocket where collider normals can cancel out and strand the ball.
///
/// If the ball's planar (XZ) speed drops below `max_planar_speed` while its
/// position is inside the XZ bounds, the simulation imposes
/// `escape_velocity` directly instead of waiting for contact forces to
/// resolve the wedge. Each zone is tuned to its geometry; the velocities
/// point toward the table center and down toward the flippers.
#[derive(Debug, Clone, Copy)]
pub struct TrapZone {
    pub label: &'static str,
    /// XZ lower corner.
    pub min: Vec2,
    /// XZ upper corner.
    pub max: Vec2,
    pub max_planar_speed: f32,
    pub escape_velocity: Vec3,
}

impl TrapZone {
    pub fn contains(&self, position: Vec3) -> bool {
        position.x >= self.min.x
            && position.x <= self.max.x
            && position.z >= self.min.y
            && position.z <= self.max.y
    }
}

/// Every entity instance on the table.
#[derive(Debug, Clone)]
pub struct TableLayout {
    pub playfield: SlabSpec,
    pub walls: Vec<WallSpec>,
    pub drain: SlabSpec,
    pub ball_start: Vec3,
    pub flipper_left: Vec3,
    pub flipper_right: Vec3,
    /// Plunger seat in the launch lane (XZ).
    pub plunger: Vec2,
    pub bumpers: Vec<Vec2>,
    pub slingshot_left: [Vec2; 3],
    pub slingshot_right: [Vec2; 3],
    pub drop_targets: Vec<Vec2>,
    pub spinner: Vec2,
    pub rollover_lanes: Vec<Vec2>,
    pub ramp: RampSpec,
    pub triangle_bumpers: Vec<WedgeSpec>,
    pub arches: Vec<Vec2>,
    pub rocket: Vec2,
    pub trap_zones: Vec<TrapZone>,
}

impl TableLayout {
    pub fn standard() -> Self {
        Self {
            playfield: SlabSpec {
                position: Vec3::new(0.0, -0.1, 0.0),
                half_extents: Vec3::new(HW, 0.1, HL),
            },

            walls: vec![
                // Side walls.
                WallSpec::new(Vec3::new(-HW, 0.3, 0.0), Vec3::new(0.075, 0.3, HL)),
                WallSpec::new(Vec3::new(HW, 0.3, 0.0), Vec3::new(0.075, 0.3, HL)),
                // Top wall.
                WallSpec::new(Vec3::new(0.0, 0.3, -HL), Vec3::new(HW, 0.3, 0.075)),
                // Bottom walls, leaving the drain gap in the center.
                WallSpec::new(
                    Vec3::new(-HW / 2.0 - 0.5, 0.3, HL),
                    Vec3::new(HW / 2.0 - 0.5, 0.3, 0.075),
                ),
                WallSpec::new(
                    Vec3::new(HW / 2.0 + 0.5, 0.3, HL),
                    Vec3::new(HW / 2.0 - 0.5, 0.3, 0.075),
                ),
                // Launch lane rails.
                WallSpec::new(
                    Vec3::new(LAUNCH_LANE_X - LAUNCH_LANE_WIDTH / 2.0, 0.3, 0.5),
                    Vec3::new(0.04, 0.3, 4.5),
                ),
                WallSpec::new(
                    Vec3::new(LAUNCH_LANE_X + LAUNCH_LANE_WIDTH / 2.0, 0.3, 0.5),
                    Vec3::new(0.04, 0.3, 4.5),
                ),
                // Lane-top deflector, redirecting the launched ball onto
                // the playfield.
                WallSpec::rotated(
                    Vec3::new(LAUNCH_LANE_X - 0.2, 0.3, -4.0),
                    Vec3::new(0.4, 0.3, 0.04),
                    -0.4,
                ),
                // Outlane guides funneling toward the flippers.
                WallSpec::rotated(
                    Vec3::new(-HW + 0.5, 0.3, HL - 1.2),
                    Vec3::new(0.5, 0.3, 0.04),
                    0.5,
                ),
                WallSpec::rotated(
                    Vec3::new(HW - 0.8, 0.3, HL - 1.2),
                    Vec3::new(0.5, 0.3, 0.04),
                    -0.5,
                ),
            ],

            // Below the bottom opening; a falling ball crosses it.
            drain: SlabSpec {
                position: Vec3::new(0.0, -0.5, HL + 0.5),
                half_extents: Vec3::new(HW, 0.5, 0.5),
            },

            ball_start: Vec3::new(LAUNCH_LANE_X, 0.15, HL - 0.8),
            flipper_left: Vec3::new(-0.6, FLIPPER_Y, HL - 1.0),
            flipper_right: Vec3::new(0.6, FLIPPER_Y, HL - 1.0),
            plunger: Vec2::new(LAUNCH_LANE_X, HL - 0.3),

            bumpers: vec![
                Vec2::new(-0.6, -2.0),
                Vec2::new(0.6, -2.5),
                Vec2::new(0.0, -3.0),
            ],

            slingshot_left: [
                Vec2::new(-1.5, HL - 2.5),
                Vec2::new(-1.5, HL - 1.3),
                Vec2::new(-0.8, HL - 1.3),
            ],
            slingshot_right: [
                Vec2::new(1.5, HL - 2.5),
                Vec2::new(1.5, HL - 1.3),
                Vec2::new(0.8, HL - 1.3),
            ],

            drop_targets: vec![
                Vec2::new(-0.8, -1.0),
                Vec2::new(-0.4, -1.0),
                Vec2::new(0.0, -1.0),
                Vec2::new(0.4, -1.0),
                Vec2::new(0.8, -1.0),
            ],

            spinner: Vec2::new(-0.8, -0.2),

            rollover_lanes: vec![
                Vec2::new(-0.5, -4.0),
                Vec2::new(0.0, -4.0),
                Vec2::new(0.5, -4.0),
            ],

            // Hugs the right side, between the drop-target bank and the
            // launch lane, so its rails cross neither.
            ramp: RampSpec {
                start: Vec2::new(1.6, 0.0),
                end: Vec2::new(1.3, -3.5),
                height: 0.4,
            },

            triangle_bumpers: vec![
                WedgeSpec {
                    position: Vec2::new(-2.4, 1.8),
                    is_left: true,
                },
                // Seated against the launch-lane rail, not the cabinet.
                WedgeSpec {
                    position: Vec2::new(1.86, 1.8),
                    is_left: false,
                },
            ],

            arches: vec![Vec2::new(-1.9, -1.2), Vec2::new(1.1, 1.8)],

            rocket: Vec2::new(-1.5, -3.0),

            trap_zones: vec![
                // Wedge pockets between the triangle bumpers, the side
                // walls, and the slingshot tops. Later zones win when
                // bounds overlap.
                TrapZone {
                    label: "left bumper pocket",
                    min: Vec2::new(-2.4, HL - 4.5),
                    max: Vec2::new(-0.5, HL - 2.0),
                    max_planar_speed: 0.3,
                    escape_velocity: Vec3::new(1.0, 0.1, 1.0),
                },
                TrapZone {
                    label: "right bumper pocket",
                    // Stops short of the launch lane at x = 1.9.
                    min: Vec2::new(0.5, HL - 4.5),
                    max: Vec2::new(1.8, HL - 2.0),
                    max_planar_speed: 0.3,
                    escape_velocity: Vec3::new(-1.0, 0.1, 1.0),
                },
                // Dead spots under the arch feet.
                TrapZone {
                    label: "left arch pocket",
                    min: Vec2::new(-2.4, -2.2),
                    max: Vec2::new(-0.9, -0.2),
                    max_planar_speed: 0.5,
                    escape_velocity: Vec3::new(1.5, 0.1, 1.2),
                },
                TrapZone {
                    label: "right arch pocket",
                    min: Vec2::new(0.1, 0.8),
                    max: Vec2::new(1.8, 2.8),
                    max_planar_speed: 0.5,
                    escape_velocity: Vec3::new(-1.5, 0.1, 1.2),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DROP_TARGET_BANK_SIZE, ROLLOVER_LANE_COUNT};

    #[test]
    fn test_bank_sizes_match_scoring_rules() {
        let layout = TableLayout::standard();
        assert_eq!(layout.drop_targets.len(), DROP_TARGET_BANK_SIZE);
        assert_eq!(layout.rollover_lanes.len(), ROLLOVER_LANE_COUNT);
    }

    #[test]
    fn test_trap_zone_containment() {
        let layout = TableLayout::standard();
        let left_pocket = &layout.trap_zones[0];
        assert!(left_pocket.contains(Vec3::new(-1.5, 0.13, 1.5)));
        assert!(!left_pocket.contains(Vec3::new(0.0, 0.13, 1.5)));
        assert!(!left_pocket.contains(Vec3::new(-1.5, 0.13, -3.0)));
    }

    #[test]
    fn test_trap_zones_stay_out_of_the_launch_lane() {
        let layout = TableLayout::standard();
        let lane_left = LAUNCH_LANE_X - LAUNCH_LANE_WIDTH / 2.0;
        for zone in &layout.trap_zones {
            assert!(
                zone.max.x < lane_left,
                "{} reaches into the launch lane",
                zone.label
            );
        }
    }

    #[test]
    fn test_ball_start_inside_launch_lane() {
        let layout = TableLayout::standard();
        assert!(layout.ball_start.x > LAUNCH_LANE_X - LAUNCH_LANE_WIDTH / 2.0);
        assert!(layout.ball_start.x < LAUNCH_LANE_X + LAUNCH_LANE_WIDTH / 2.0);
        // In front of the plunger, behind the lane top.
        assert!(layout.ball_start.z < layout.plunger.y);
    }
}

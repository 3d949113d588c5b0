use std::f32::consts::{PI, TAU};

use expanse_chunk::{ChunkAccess, ChunkPos};

use super::{FootprintShape, MAX_REACH_CHUNKS};
use crate::context::CarveContext;
use crate::random::{FloatProvider, IntRange, RandomSource};
use crate::writer::CarveWriter;

/// Multipliers a variant applies on top of the baseline ravine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanyonScaling {
    pub thickness: f32,
    pub max_length: f32,
    /// Applied to the sampled y-scale of the path.
    pub vertical_extent: f64,
    /// Start heights are raised to at least this level.
    pub min_floor_y: Option<i32>,
}

impl CanyonScaling {
    pub const IDENTITY: CanyonScaling =
        CanyonScaling { thickness: 1.0, max_length: 1.0, vertical_extent: 1.0, min_floor_y: None };
}

impl Default for CanyonScaling {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A long meandering ravine: a path of ellipsoids whose vertical profile is
/// roughened per level by width factors.
#[derive(Clone, Debug, PartialEq)]
pub struct CanyonShape {
    pub y: IntRange,
    pub y_scale: FloatProvider,
    pub vertical_rotation: FloatProvider,
    pub distance_factor: FloatProvider,
    pub thickness: FloatProvider,
    pub width_smoothness: i32,
    pub horizontal_radius_factor: FloatProvider,
    pub vertical_radius_default_factor: f32,
    pub vertical_radius_center_factor: f32,
    /// Path length in steps before scaling and the distance factor.
    pub base_length: i32,
    pub scaling: CanyonScaling,
}

impl Default for CanyonShape {
    fn default() -> Self {
        Self {
            y: IntRange::new(10, 67),
            y_scale: FloatProvider::constant(3.0),
            vertical_rotation: FloatProvider::uniform(-0.125, 0.125),
            distance_factor: FloatProvider::uniform(0.75, 1.0),
            thickness: FloatProvider::Trapezoid { min: 0.0, max: 6.0, plateau: 2.0 },
            width_smoothness: 3,
            horizontal_radius_factor: FloatProvider::uniform(0.75, 1.0),
            vertical_radius_default_factor: 1.0,
            vertical_radius_center_factor: 0.0,
            base_length: 112,
            scaling: CanyonScaling::IDENTITY,
        }
    }
}

/// Start of a ravine path as drawn from the source chunk's stream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanyonStart {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
    pub y_scale: f64,
    pub thickness: f32,
    pub steps: i32,
}

impl CanyonShape {
    pub fn max_length(&self) -> i32 {
        (self.base_length as f32 * self.scaling.max_length) as i32
    }

    pub fn max_thickness(&self) -> f32 {
        self.thickness.max_value() * self.scaling.thickness
    }

    /// Draws the path start in its fixed order: x, y, z, yaw, pitch,
    /// y-scale, thickness, length.
    pub fn sample_start<R: RandomSource + ?Sized>(&self, source: ChunkPos, rng: &mut R) -> CanyonStart {
        let x = source.min_block_x() + rng.next_int(16);
        let mut y = self.y.sample(rng);
        if let Some(floor) = self.scaling.min_floor_y {
            y = y.max(floor);
        }
        let z = source.min_block_z() + rng.next_int(16);
        let yaw = rng.next_float() * TAU;
        let pitch = self.vertical_rotation.sample(rng);
        let y_scale = f64::from(self.y_scale.sample(rng)) * self.scaling.vertical_extent;
        let thickness = self.thickness.sample(rng) * self.scaling.thickness;
        let steps = (self.max_length() as f32 * self.distance_factor.sample(rng)) as i32;
        CanyonStart {
            x: f64::from(x),
            y: f64::from(y),
            z: f64::from(z),
            yaw,
            pitch,
            y_scale,
            thickness,
            steps,
        }
    }

    /// Squared width multiplier per generated level, changed on average
    /// every `width_smoothness` levels.
    fn width_factors<R: RandomSource + ?Sized>(&self, depth: i32, rng: &mut R) -> Vec<f32> {
        let mut factors = Vec::with_capacity(depth.max(0) as usize);
        let mut f = 1.0f32;
        for j in 0..depth {
            if j == 0 || rng.next_int(self.width_smoothness) == 0 {
                f = 1.0 + rng.next_float() * rng.next_float();
            }
            factors.push(f * f);
        }
        factors
    }

    fn vertical_radius<R: RandomSource + ?Sized>(&self, rng: &mut R, base: f64, steps: f32, step: f32) -> f64 {
        let centre = 1.0 - (0.5 - step / steps).abs() * 2.0;
        let factor = self.vertical_radius_default_factor + self.vertical_radius_center_factor * centre;
        f64::from(factor) * base * f64::from(rng.float_between(0.75, 1.0))
    }

    fn carve_path<R, C>(&self, writer: &mut CarveWriter<'_, C>, start: CanyonStart, rng: &mut R)
    where
        R: RandomSource,
        C: ChunkAccess + ?Sized,
    {
        let ctx = writer.ctx();
        let widths = self.width_factors(ctx.gen_depth, rng);
        let target = writer.pos();
        let CanyonStart { mut x, mut y, mut z, mut yaw, mut pitch, y_scale, thickness, steps } = start;
        let mut yaw_change = 0.0f32;
        let mut pitch_change = 0.0f32;

        for step in 0..steps {
            let mut horizontal = 1.5 + f64::from((step as f32 * PI / steps as f32).sin() * thickness);
            let vertical = horizontal * y_scale;
            horizontal *= f64::from(self.horizontal_radius_factor.sample(rng));
            let vertical = self.vertical_radius(rng, vertical, steps as f32, step as f32);

            let (sin_pitch, cos_pitch) = pitch.sin_cos();
            x += f64::from(yaw.cos() * cos_pitch);
            y += f64::from(sin_pitch);
            z += f64::from(yaw.sin() * cos_pitch);

            pitch *= 0.7;
            pitch += pitch_change * 0.05;
            yaw += yaw_change * 0.05;
            pitch_change *= 0.8;
            yaw_change *= 0.5;
            pitch_change += (rng.next_float() - rng.next_float()) * rng.next_float() * 2.0;
            yaw_change += (rng.next_float() - rng.next_float()) * rng.next_float() * 4.0;

            if rng.next_int(4) == 0 {
                continue;
            }
            if !can_reach(target, x, z, step, steps, thickness) {
                return;
            }
            carve_ellipsoid(writer, ctx, &widths, x, y, z, horizontal, vertical);
        }
    }
}

impl FootprintShape for CanyonShape {
    fn reach_chunks(&self) -> i32 {
        let horizontal = 1.5 + self.max_thickness() * self.horizontal_radius_factor.max_value();
        let blocks = self.max_length() as f32 + 2.0 * horizontal + ChunkPos::SIZE as f32;
        ((blocks / ChunkPos::SIZE as f32) as i32 + 1).clamp(1, MAX_REACH_CHUNKS)
    }

    fn carve<R, C>(&self, writer: &mut CarveWriter<'_, C>, source: ChunkPos, rng: &mut R)
    where
        R: RandomSource,
        C: ChunkAccess + ?Sized,
    {
        let start = self.sample_start(source, rng);
        let mut path_rng = rng.fork();
        self.carve_path(writer, start, &mut path_rng);
    }
}

/// Whether a path at `step` can still get close enough to `target` to carve it.
fn can_reach(target: ChunkPos, x: f64, z: f64, step: i32, steps: i32, thickness: f32) -> bool {
    let dx = x - f64::from(target.middle_block_x());
    let dz = z - f64::from(target.middle_block_z());
    let remaining = f64::from(steps - step);
    let margin = f64::from(thickness + 2.0 + 16.0);
    dx * dx + dz * dz - remaining * remaining <= margin * margin
}

#[allow(clippy::too_many_arguments)]
fn carve_ellipsoid<C: ChunkAccess + ?Sized>(
    writer: &mut CarveWriter<'_, C>,
    ctx: &CarveContext<'_>,
    widths: &[f32],
    x: f64,
    y: f64,
    z: f64,
    horizontal: f64,
    vertical: f64,
) {
    let target = writer.pos();
    let reach = 16.0 + horizontal * 2.0;
    if (x - f64::from(target.middle_block_x())).abs() > reach
        || (z - f64::from(target.middle_block_z())).abs() > reach
    {
        return;
    }

    let min_x = target.min_block_x();
    let min_z = target.min_block_z();
    let x0 = ((x - horizontal).floor() as i32 - min_x - 1).max(0);
    let x1 = ((x + horizontal).floor() as i32 - min_x).min(15);
    let z0 = ((z - horizontal).floor() as i32 - min_z - 1).max(0);
    let z1 = ((z + horizontal).floor() as i32 - min_z).min(15);
    // exclusive floor, inclusive ceiling
    let y_floor = ((y - vertical).floor() as i32 - 1).max(ctx.min_gen_y + 1);
    let y_ceil = ((y + vertical).floor() as i32 + 1).min(ctx.top_y() - CarveContext::TOP_MARGIN);

    for lx in x0..=x1 {
        let bx = min_x + lx;
        let rel_x = (f64::from(bx) + 0.5 - x) / horizontal;
        for lz in z0..=z1 {
            let bz = min_z + lz;
            let rel_z = (f64::from(bz) + 0.5 - z) / horizontal;
            let disc = rel_x * rel_x + rel_z * rel_z;
            if disc >= 1.0 {
                continue;
            }
            for by in (y_floor + 1..=y_ceil).rev() {
                let rel_y = (f64::from(by) - 0.5 - y) / vertical;
                let Some(width) = widths.get((by - ctx.min_gen_y - 1) as usize) else {
                    continue;
                };
                if disc * f64::from(*width) + rel_y * rel_y / 6.0 >= 1.0 {
                    continue;
                }
                writer.try_carve(bx, by, bz);
            }
        }
    }
}

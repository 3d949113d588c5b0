use expanse_chunk::{ChunkAccess, ChunkPos};

use crate::random::RandomSource;
use crate::shapes::{CanyonShape, FootprintShape, PitShape};
use crate::writer::CarveWriter;

/// Progress of one carver run for one source chunk.
///
/// `NotStarted → Evaluating → Skipped | Carving → Done`. `Skipped` and `Done`
/// are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarvePhase {
    NotStarted,
    Evaluating,
    Skipped,
    Carving,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CarveOutcome {
    pub phase: CarvePhase,
    pub edited: usize,
}

/// A start probability paired with the shape carved when a chunk starts one.
#[derive(Clone, Debug, PartialEq)]
pub struct Carver<S> {
    pub probability: f32,
    pub shape: S,
}

impl<S: FootprintShape> Carver<S> {
    pub fn new(probability: f32, shape: S) -> Self {
        Self { probability, shape }
    }

    pub fn reach_chunks(&self) -> i32 {
        self.shape.reach_chunks()
    }

    pub fn run(&self, source: ChunkPos) -> CarveRun<'_, S> {
        CarveRun { carver: self, source, phase: CarvePhase::NotStarted }
    }

    /// Evaluates and, when started, carves the run for `source`.
    pub fn carve_from<R, C>(&self, source: ChunkPos, writer: &mut CarveWriter<'_, C>, rng: &mut R) -> CarveOutcome
    where
        R: RandomSource,
        C: ChunkAccess + ?Sized,
    {
        let mut run = self.run(source);
        run.evaluate(rng);
        run.carve(writer, rng)
    }
}

/// One evaluation of a carver for one source chunk. Consumed by [`carve`](Self::carve).
#[derive(Debug)]
pub struct CarveRun<'c, S> {
    carver: &'c Carver<S>,
    source: ChunkPos,
    phase: CarvePhase,
}

impl<S: FootprintShape> CarveRun<'_, S> {
    pub fn phase(&self) -> CarvePhase {
        self.phase
    }

    pub fn source(&self) -> ChunkPos {
        self.source
    }

    /// Draws exactly one float to decide whether `source` starts this carver.
    /// Later calls return the settled phase without drawing.
    pub fn evaluate<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> CarvePhase {
        if self.phase != CarvePhase::NotStarted {
            return self.phase;
        }
        self.phase = CarvePhase::Evaluating;
        self.phase = if rng.next_float() < self.carver.probability {
            CarvePhase::Carving
        } else {
            CarvePhase::Skipped
        };
        self.phase
    }

    pub fn carve<R, C>(mut self, writer: &mut CarveWriter<'_, C>, rng: &mut R) -> CarveOutcome
    where
        R: RandomSource,
        C: ChunkAccess + ?Sized,
    {
        if self.evaluate(rng) == CarvePhase::Skipped {
            return CarveOutcome { phase: CarvePhase::Skipped, edited: 0 };
        }
        log::trace!("carver started in {:?}, carving {:?}", self.source, writer.pos());
        let before = writer.edited();
        self.carver.shape.carve(writer, self.source, rng);
        self.phase = CarvePhase::Done;
        CarveOutcome { phase: self.phase, edited: writer.edited() - before }
    }
}

/// A carver as built from configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfiguredCarver {
    Pit { name: &'static str, carver: Carver<PitShape> },
    Canyon { name: &'static str, carver: Carver<CanyonShape> },
}

impl ConfiguredCarver {
    pub fn name(&self) -> &'static str {
        match self {
            ConfiguredCarver::Pit { name, .. } | ConfiguredCarver::Canyon { name, .. } => *name,
        }
    }

    pub fn reach_chunks(&self) -> i32 {
        match self {
            ConfiguredCarver::Pit { carver, .. } => carver.reach_chunks(),
            ConfiguredCarver::Canyon { carver, .. } => carver.reach_chunks(),
        }
    }

    pub fn carve_from<R, C>(&self, source: ChunkPos, writer: &mut CarveWriter<'_, C>, rng: &mut R) -> CarveOutcome
    where
        R: RandomSource,
        C: ChunkAccess + ?Sized,
    {
        match self {
            ConfiguredCarver::Pit { carver, .. } => carver.carve_from(source, writer, rng),
            ConfiguredCarver::Canyon { carver, .. } => carver.carve_from(source, writer, rng),
        }
    }
}

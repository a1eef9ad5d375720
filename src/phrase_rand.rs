use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

/// RandMode controls random generator behaviour. May be predictable for testing or truly random for previews
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RandMode {
    Predictable,
    RandomUniform,
}

pub struct PhraseRand {
    rng: Box<dyn RngCore>,
    rand_mode: RandMode,
}

impl PhraseRand {
    pub fn new(rm: RandMode) -> PhraseRand {
        match rm {
            RandMode::Predictable => PhraseRand::new_predictable(0),
            RandMode::RandomUniform => PhraseRand {
                rng: Box::new(rand::thread_rng()),
                rand_mode: rm,
            },
        }
    }

    pub fn new_uniform() -> PhraseRand {
        PhraseRand::new(RandMode::RandomUniform)
    }

    pub fn new_predictable(seed: u64) -> PhraseRand {
        PhraseRand {
            rng: Box::new(StdRng::seed_from_u64(seed)),
            rand_mode: RandMode::Predictable,
        }
    }

    pub fn mode(&self) -> RandMode {
        self.rand_mode
    }

    /// pick returns an index in [0..count), uniformly distributed. count must be non-zero
    pub fn pick(&mut self, count: usize) -> usize {
        self.rng.gen_range(0..count)
    }
}

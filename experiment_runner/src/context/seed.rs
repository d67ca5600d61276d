//!
//! The per-iteration randomization seed.
//!

///
/// The per-iteration randomization seed.
///
/// The same value doubles as the unique identifier of the iteration's run.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct Seed(u32);

impl Seed {
    /// The largest seed value that can be generated.
    pub const MAX: u32 = 0xFF_FFFF;

    ///
    /// A shortcut constructor.
    ///
    pub fn new(value: u32) -> anyhow::Result<Self> {
        if value > Self::MAX {
            anyhow::bail!(
                "Seed `{value}` is out of range. The maximum seed is `{}`",
                Self::MAX
            );
        }
        Ok(Self(value))
    }

    ///
    /// Draws a fresh seed from `0..=Seed::MAX`.
    ///
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: rand::Rng + ?Sized,
    {
        Self(rng.gen_range(0..=Self::MAX))
    }

    ///
    /// Returns the numeric value.
    ///
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl std::str::FromStr for Seed {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let value = string
            .parse::<u32>()
            .map_err(|error| anyhow::anyhow!("Invalid seed `{string}`: {error}"))?;
        Self::new(value)
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::Seed;

    #[test]
    fn random_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            assert!(Seed::random(&mut rng).value() <= Seed::MAX);
        }
    }

    #[test]
    fn random_is_reproducible_from_rng_seed() {
        let mut first = StdRng::seed_from_u64(42);
        let mut second = StdRng::seed_from_u64(42);
        let first: Vec<Seed> = (0..16).map(|_| Seed::random(&mut first)).collect();
        let second: Vec<Seed> = (0..16).map(|_| Seed::random(&mut second)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert!(Seed::new(Seed::MAX).is_ok());
        assert!(Seed::new(Seed::MAX + 1).is_err());
    }

    #[test]
    fn renders_as_decimal() {
        let seed = Seed::new(0xFF).expect("Always valid");
        assert_eq!(seed.to_string(), "255");
        assert_eq!("255".parse::<Seed>().expect("Always valid"), seed);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("0x10".parse::<Seed>().is_err());
        assert!("-1".parse::<Seed>().is_err());
        assert!("16777216".parse::<Seed>().is_err());
    }
}

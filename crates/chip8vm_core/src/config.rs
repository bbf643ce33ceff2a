use typed_builder::TypedBuilder;

/// Instructions per 60Hz frame; about 660 instructions per second.
pub const DEFAULT_CYCLES_PER_FRAME: u32 = 11;

/// Interpreter configuration.
///
/// ```
/// use chip8vm_core::Chip8Config;
///
/// let config = Chip8Config::builder().cycles_per_frame(20).rng_seed(Some(7)).build();
/// assert_eq!(config.cycles_per_frame, 20);
/// ```
#[derive(Clone, Debug, TypedBuilder)]
pub struct Chip8Config {
    #[builder(default = DEFAULT_CYCLES_PER_FRAME)]
    pub cycles_per_frame: u32,
    /// Seed for CXNN. `None` seeds from OS entropy.
    #[builder(default)]
    pub rng_seed: Option<u64>,
}

impl Default for Chip8Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

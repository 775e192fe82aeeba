//! Random default identities for new connections.

use rand::Rng;

use crate::domain::{Color, DisplayName, IdentityGenerator};

/// Exclusive upper bound of the number in `User-<n>`.
const NAME_NUMBER_RANGE: u32 = 1000;

/// Picks `User-<0..999>` and a uniformly random `#rrggbb` color.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdentityGenerator;

impl IdentityGenerator for RandomIdentityGenerator {
    fn display_name(&self) -> DisplayName {
        DisplayName::numbered(rand::thread_rng().gen_range(0..NAME_NUMBER_RANGE))
    }

    fn color(&self) -> Color {
        Color::from_rgb(rand::thread_rng().gen_range(0..=0x00ff_ffff))
    }
}

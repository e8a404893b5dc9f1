use crate::tiles::Level;

/// Opening level: one floating ledge and a short walk to the portal.
pub const MEADOW: &[&str] = &[
    "            ",
    "            ",
    "       $$   ",
    "      ===   ",
    "            ",
    "   ^^  > = @",
    "============",
];

/// A coin column guarding the exit and a pillar to climb.
pub const PILLAR: &[&str] = &[
    "                          $",
    "                          $",
    "                          $",
    "                          $",
    "                          $",
    "           $$         =   $",
    "         ====         =   $",
    "                      =   $",
    "                      =    ",
    "       ^^      = >    =   @",
    "===========================",
];

/// Spike run with enemies between every stretch.
pub const GAUNTLET: &[&str] = &[
    "     $    $    $    $     $",
    "     $    $    $    $     $",
    "                           ",
    "                           ",
    "                           ",
    "                           ",
    "                           ",
    " ^^^^>^^^^>^^^^>^^^^>^^^^^@",
    "===========================",
];

/// Shipped levels in play order.
pub const BUILTIN_LEVELS: &[&[&str]] = &[MEADOW, PILLAR, GAUNTLET];

/// Parse the built-in level at `index`.
pub fn builtin_level(index: usize) -> Option<Level> {
    let rows = *BUILTIN_LEVELS.get(index)?;
    match Level::parse(rows) {
        Ok(level) => Some(level),
        Err(e) => {
            tracing::error!("built-in level {index} is malformed: {e}");
            None
        },
    }
}

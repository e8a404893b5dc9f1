use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::tiles::TileKind;

/// Chunk width in tiles (each procedural section is this wide).
pub const CHUNK_WIDTH: u32 = 10;
/// Generated level height in tiles.
pub const LEVEL_HEIGHT: u32 = 12;
/// Chunks used when the caller does not pick a count.
pub const DEFAULT_CHUNKS: u32 = 8;

/// Row index of the floor (bottom row).
const FLOOR_Y: u32 = LEVEL_HEIGHT - 1;
/// Row index directly above the floor.
const SURFACE_Y: u32 = FLOOR_Y - 1;

struct Canvas {
    width: u32,
    cells: Vec<Vec<char>>,
}

impl Canvas {
    fn new(width: u32) -> Self {
        Self {
            width,
            cells: vec![vec![TileKind::Empty.symbol(); width as usize]; LEVEL_HEIGHT as usize],
        }
    }

    fn set(&mut self, x: u32, y: u32, kind: TileKind) {
        if x < self.width && y < LEVEL_HEIGHT {
            self.cells[y as usize][x as usize] = kind.symbol();
        }
    }

    fn into_rows(self) -> Vec<String> {
        self.cells
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect()
    }
}

/// Generate a deterministic level from a seed.
///
/// The first chunk is a flat spawn area; the last two columns hold the portal.
/// A `chunks` of zero is treated as one.
pub fn generate_level(seed: u64, chunks: u32) -> Vec<String> {
    let chunks = chunks.max(1);
    let width = CHUNK_WIDTH * chunks;
    let mut canvas = Canvas::new(width);
    let mut rng = StdRng::seed_from_u64(seed);

    for x in 0..width {
        canvas.set(x, FLOOR_Y, TileKind::Platform);
    }

    for chunk_idx in 1..chunks {
        let base_x = chunk_idx * CHUNK_WIDTH;
        generate_chunk(&mut canvas, &mut rng, base_x);
    }

    // Exit always sits on solid ground.
    let portal_x = width - 2;
    for x in portal_x - 1..width {
        canvas.set(x, FLOOR_Y, TileKind::Platform);
        canvas.set(x, SURFACE_Y, TileKind::Empty);
    }
    canvas.set(portal_x, SURFACE_Y, TileKind::Portal);

    tracing::debug!(seed, chunks, width, "generated level");
    canvas.into_rows()
}

fn generate_chunk(canvas: &mut Canvas, rng: &mut StdRng, base_x: u32) {
    let pattern = rng.random_range(0u8..5);

    match pattern {
        0 => {
            // Pit in the floor
            let pit_start = base_x + rng.random_range(3..6);
            let pit_width = rng.random_range(2..4);
            for x in pit_start..pit_start + pit_width {
                canvas.set(x, FLOOR_Y, TileKind::Empty);
            }
        },
        1 => {
            // Raised ledge with coins on top
            let ledge_y = FLOOR_Y - rng.random_range(3u32..6);
            let ledge_start = base_x + rng.random_range(1..4);
            let ledge_len = rng.random_range(3..6);
            for x in ledge_start..ledge_start + ledge_len {
                canvas.set(x, ledge_y, TileKind::Platform);
            }
            canvas.set(ledge_start + 1, ledge_y - 1, TileKind::Coin);
            canvas.set(ledge_start + 2, ledge_y - 1, TileKind::Coin);
        },
        2 => {
            // Staircase going up
            for i in 0..4u32 {
                let x = base_x + 1 + i * 2;
                let y = SURFACE_Y - i;
                canvas.set(x, y, TileKind::Platform);
                canvas.set(x + 1, y, TileKind::Platform);
            }
        },
        3 => {
            // Spike strip with a safe platform above
            let hz_start = base_x + rng.random_range(2..5);
            let hz_len = rng.random_range(2..4);
            for x in hz_start..hz_start + hz_len {
                canvas.set(x, SURFACE_Y, TileKind::Hazard);
            }
            for x in hz_start - 1..hz_start + hz_len + 1 {
                canvas.set(x, SURFACE_Y - 3, TileKind::Platform);
            }
        },
        _ => {
            // Enemy lane
            let enemy_x = base_x + rng.random_range(3..8);
            canvas.set(enemy_x, SURFACE_Y, TileKind::Enemy);
            canvas.set(enemy_x, SURFACE_Y - 3, TileKind::Coin);
        },
    }
}

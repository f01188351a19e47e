//! Precomputed attack tables.
//!
//! Leaper tables (knight, king, pawn) are fixed geometric patterns computed at
//! compile time. Slider tables are built once at runtime by enumerating every
//! blocker combination inside each square's relevant mask and ray-walking it.
//!
//! A slider lookup masks the occupied squares, multiplies by the square's
//! magic and shifts the product down to an index into a table of
//! `2^bits(mask)` entries. Magics are searched once while the tables are
//! built and only accepted when no two blocker sets with different attacks
//! share a slot.

use std::sync::OnceLock;

use tessera_core::{Color, Square};
use tracing::debug;

use crate::Bitboard;

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const WHITE_PAWN_CAPTURES: [(i8, i8); 2] = [(1, 1), (1, -1)];
const BLACK_PAWN_CAPTURES: [(i8, i8); 2] = [(-1, 1), (-1, -1)];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

const KNIGHT_ATTACKS: [Bitboard; 64] = leaper_table(&KNIGHT_DELTAS);
const KING_ATTACKS: [Bitboard; 64] = leaper_table(&KING_DELTAS);
const PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    leaper_table(&WHITE_PAWN_CAPTURES),
    leaper_table(&BLACK_PAWN_CAPTURES),
];
const PAWN_PUSHES: [[Bitboard; 64]; 2] = [
    pawn_push_table(Color::White),
    pawn_push_table(Color::Black),
];

/// Builds a per-square table for a piece that jumps by fixed (rank, file) deltas.
const fn leaper_table(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0;
    while sq < 64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;
        let mut bits = 0u64;
        let mut i = 0;
        while i < deltas.len() {
            let r = rank + deltas[i].0;
            let f = file + deltas[i].1;
            if r >= 0 && r < 8 && f >= 0 && f < 8 {
                bits |= 1u64 << (r * 8 + f);
            }
            i += 1;
        }
        table[sq] = Bitboard(bits);
        sq += 1;
    }
    table
}

/// Quiet pawn advances: one step, plus two from the start rank.
const fn pawn_push_table(color: Color) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let step = color.pawn_step() as i16;
    let mut sq = 0;
    while sq < 64 {
        let one = sq as i16 + step;
        if one >= 0 && one < 64 {
            let mut bits = 1u64 << one;
            if sq / 8 == color.pawn_rank() as usize {
                bits |= 1u64 << (one + step);
            }
            table[sq] = Bitboard(bits);
        }
        sq += 1;
    }
    table
}

/// Magic lookup parameters for one square.
#[derive(Clone, Copy)]
struct Magic {
    mask: Bitboard,
    magic: u64,
    shift: u32,
    offset: usize,
}

impl Magic {
    const EMPTY: Magic = Magic {
        mask: Bitboard::EMPTY,
        magic: 0,
        shift: 0,
        offset: 0,
    };

    #[inline]
    fn index(&self, occupied: Bitboard) -> usize {
        self.offset + ((occupied.0 & self.mask.0).wrapping_mul(self.magic) >> self.shift) as usize
    }
}

/// Per-square magics and the flattened attack sets they index.
struct SliderTable {
    magics: [Magic; 64],
    attacks: Vec<Bitboard>,
}

impl SliderTable {
    fn build(directions: &[(i8, i8); 4], rng: &mut MagicRng) -> Self {
        let mut magics = [Magic::EMPTY; 64];
        let mut attacks = Vec::new();

        for index in 0..64u8 {
            let sq = Square::from_index_masked(index);
            let mask = relevant_mask(sq, directions);
            let size = 1usize << mask.count();

            // Carry-Rippler walk over every subset of the mask.
            let mut occupancies = Vec::with_capacity(size);
            let mut references = Vec::with_capacity(size);
            let mut blockers = Bitboard::EMPTY;
            loop {
                occupancies.push(blockers);
                references.push(ray_attacks(sq, blockers, directions));
                blockers = Bitboard(blockers.0.wrapping_sub(mask.0) & mask.0);
                if blockers.is_empty() {
                    break;
                }
            }

            let magic = Magic {
                mask,
                magic: find_magic(mask, &occupancies, &references, rng),
                shift: 64 - mask.count(),
                offset: attacks.len(),
            };
            attacks.resize(magic.offset + size, Bitboard::EMPTY);
            for (&occupied, &reference) in occupancies.iter().zip(&references) {
                attacks[magic.index(occupied)] = reference;
            }
            magics[index as usize] = magic;
        }

        SliderTable { magics, attacks }
    }

    #[inline]
    fn lookup(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.attacks[self.magics[sq.index() as usize].index(occupied)]
    }
}

/// Xorshift64 generator with a fixed seed, so the tables come out the same
/// on every run.
struct MagicRng(u64);

impl MagicRng {
    const SEED: u64 = 0x2545_F491_4F6C_DD1D;

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    /// A candidate with roughly an eighth of its bits set.
    fn sparse(&mut self) -> u64 {
        self.next_u64() & self.next_u64() & self.next_u64()
    }
}

/// Searches for a multiplier that sends every blocker subset of `mask` to a
/// slot holding its attack set. Subsets may share a slot only when their
/// attack sets are equal.
fn find_magic(
    mask: Bitboard,
    occupancies: &[Bitboard],
    references: &[Bitboard],
    rng: &mut MagicRng,
) -> u64 {
    let shift = 64 - mask.count();
    let mut used = vec![Bitboard::EMPTY; occupancies.len()];
    let mut epoch = vec![0u32; occupancies.len()];
    let mut attempt = 0u32;

    loop {
        let magic = rng.sparse();
        if (mask.0.wrapping_mul(magic) >> 56).count_ones() < 6 {
            continue;
        }
        attempt += 1;
        let fits = occupancies.iter().zip(references).all(|(occupied, &reference)| {
            let slot = (occupied.0.wrapping_mul(magic) >> shift) as usize;
            if epoch[slot] != attempt {
                epoch[slot] = attempt;
                used[slot] = reference;
                true
            } else {
                used[slot] == reference
            }
        });
        if fits {
            return magic;
        }
    }
}

/// Squares along `directions` whose occupancy can change the attack set.
/// The last square of each ray is left out since nothing lies behind it.
fn relevant_mask(sq: Square, directions: &[(i8, i8); 4]) -> Bitboard {
    let rank = sq.rank_index() as i8;
    let file = sq.file_index() as i8;
    let mut mask = Bitboard::EMPTY;
    for &(dr, df) in directions {
        let (mut r, mut f) = (rank + dr, file + df);
        while Square::from_coords(f + df, r + dr).is_some() {
            if let Some(cur) = Square::from_coords(f, r) {
                mask.set(cur);
            }
            r += dr;
            f += df;
        }
    }
    mask
}

/// Walks each ray until the edge or the first blocker, which is included.
fn ray_attacks(sq: Square, blockers: Bitboard, directions: &[(i8, i8); 4]) -> Bitboard {
    let rank = sq.rank_index() as i8;
    let file = sq.file_index() as i8;
    let mut attacks = Bitboard::EMPTY;
    for &(dr, df) in directions {
        let (mut r, mut f) = (rank + dr, file + df);
        while let Some(target) = Square::from_coords(f, r) {
            attacks.set(target);
            if blockers.contains(target) {
                break;
            }
            r += dr;
            f += df;
        }
    }
    attacks
}

/// Every attack pattern the move generator and threat detector read.
///
/// Built once and shared read-only. Use [`AttackTables::shared`] for a lazily
/// built process-wide instance or [`AttackTables::new`] to own one.
pub struct AttackTables {
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    pawn_attacks: [[Bitboard; 64]; 2],
    pawn_pushes: [[Bitboard; 64]; 2],
    bishop: SliderTable,
    rook: SliderTable,
}

static SHARED: OnceLock<AttackTables> = OnceLock::new();

impl AttackTables {
    /// Builds all tables.
    pub fn new() -> Self {
        let mut rng = MagicRng(MagicRng::SEED);
        let bishop = SliderTable::build(&BISHOP_DIRECTIONS, &mut rng);
        let rook = SliderTable::build(&ROOK_DIRECTIONS, &mut rng);
        debug!(
            bishop_entries = bishop.attacks.len(),
            rook_entries = rook.attacks.len(),
            "attack tables built"
        );
        AttackTables {
            knight: KNIGHT_ATTACKS,
            king: KING_ATTACKS,
            pawn_attacks: PAWN_ATTACKS,
            pawn_pushes: PAWN_PUSHES,
            bishop,
            rook,
        }
    }

    /// The process-wide tables, built on first use.
    pub fn shared() -> &'static AttackTables {
        SHARED.get_or_init(AttackTables::new)
    }

    #[inline]
    pub fn knight(&self, sq: Square) -> Bitboard {
        self.knight[sq.index() as usize]
    }

    #[inline]
    pub fn king(&self, sq: Square) -> Bitboard {
        self.king[sq.index() as usize]
    }

    /// Diagonal capture squares of a `color` pawn on `sq`.
    #[inline]
    pub fn pawn_attacks(&self, color: Color, sq: Square) -> Bitboard {
        self.pawn_attacks[color.index()][sq.index() as usize]
    }

    /// Quiet advance squares of a `color` pawn on `sq`, ignoring blockers.
    #[inline]
    pub fn pawn_pushes(&self, color: Color, sq: Square) -> Bitboard {
        self.pawn_pushes[color.index()][sq.index() as usize]
    }

    #[inline]
    pub fn bishop_mask(&self, sq: Square) -> Bitboard {
        self.bishop.magics[sq.index() as usize].mask
    }

    #[inline]
    pub fn rook_mask(&self, sq: Square) -> Bitboard {
        self.rook.magics[sq.index() as usize].mask
    }

    #[inline]
    pub fn bishop(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.bishop.lookup(sq, occupied)
    }

    #[inline]
    pub fn rook(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.rook.lookup(sq, occupied)
    }

    #[inline]
    pub fn queen(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.bishop(sq, occupied) | self.rook(sq, occupied)
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        Self::new()
    }
}

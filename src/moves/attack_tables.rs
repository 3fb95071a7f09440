//! Precomputed leaper attacks and occupancy-aware slider rays.
//!
//! Knight, king and pawn tables are built at compile time. Slider attacks walk
//! each ray from the origin and stop on (and include) the first occupied
//! square, which is where both captures and blocking are decided.

use crate::game_state::chess_types::Color;

pub const KNIGHT_ATTACKS: [u64; 64] = leaper_table(&[
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
]);

pub const KING_ATTACKS: [u64; 64] = leaper_table(&[
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
]);

pub const LIGHT_PAWN_ATTACKS: [u64; 64] = leaper_table(&[(-1, 1), (1, 1)]);
pub const DARK_PAWN_ATTACKS: [u64; 64] = leaper_table(&[(-1, -1), (1, -1)]);

const ORTHOGONAL_STEPS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONAL_STEPS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[inline]
pub const fn knight_attacks(square: u8) -> u64 {
    KNIGHT_ATTACKS[square as usize]
}

#[inline]
pub const fn king_attacks(square: u8) -> u64 {
    KING_ATTACKS[square as usize]
}

/// Squares a pawn of `color` standing on `square` captures on.
#[inline]
pub const fn pawn_attacks(color: Color, square: u8) -> u64 {
    match color {
        Color::Light => LIGHT_PAWN_ATTACKS[square as usize],
        Color::Dark => DARK_PAWN_ATTACKS[square as usize],
    }
}

#[inline]
pub fn rook_attacks(square: u8, occupancy: u64) -> u64 {
    ORTHOGONAL_STEPS
        .iter()
        .fold(0, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

#[inline]
pub fn bishop_attacks(square: u8, occupancy: u64) -> u64 {
    DIAGONAL_STEPS
        .iter()
        .fold(0, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

#[inline]
pub fn queen_attacks(square: u8, occupancy: u64) -> u64 {
    rook_attacks(square, occupancy) | bishop_attacks(square, occupancy)
}

fn trace_ray(square: u8, file_step: i32, rank_step: i32, occupancy: u64) -> u64 {
    let mut file = (square % 8) as i32 + file_step;
    let mut rank = (square / 8) as i32 + rank_step;
    let mut attacks = 0u64;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let bit = 1u64 << (rank * 8 + file);
        attacks |= bit;
        if occupancy & bit != 0 {
            break;
        }
        file += file_step;
        rank += rank_step;
    }

    attacks
}

const fn leaper_table(offsets: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0usize;
        while i < offsets.len() {
            let f = file + offsets[i].0;
            let r = rank + offsets[i].1;
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                attacks |= 1u64 << (r * 8 + f);
            }
            i += 1;
        }
        table[sq] = attacks;
        sq += 1;
    }

    table
}

//! Numeric keypad geometry and the key sequences it suggests.
//!
//! ```text
//! 1 2 3
//! 4 5 6
//! 7 8 9
//!   0
//! ```

use std::collections::HashSet;

type Step = (i32, i32);

const LAYOUT: [[Option<char>; 3]; 4] = [
    [Some('1'), Some('2'), Some('3')],
    [Some('4'), Some('5'), Some('6')],
    [Some('7'), Some('8'), Some('9')],
    [None, Some('0'), None],
];

pub const HORIZONTAL: &[Step] = &[(0, 1), (0, -1)];
pub const VERTICAL: &[Step] = &[(1, 0), (-1, 0)];
pub const DIAGONAL: &[Step] = &[(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const KNIGHT: &[Step] = &[
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];

fn key_at(row: i32, col: i32) -> Option<char> {
    let row = usize::try_from(row).ok()?;
    let col = usize::try_from(col).ok()?;
    *LAYOUT.get(row)?.get(col)?
}

fn keys() -> impl Iterator<Item = (i32, i32, char)> {
    LAYOUT.iter().enumerate().flat_map(|(row, line)| {
        line.iter()
            .enumerate()
            .filter_map(move |(col, key)| key.map(|k| (row as i32, col as i32, k)))
    })
}

/// Straight walks of `length` keys, one per start key and direction.
///
/// A walk that reaches the edge of the keypad turns around, so short lines
/// are extended (`1232`, `123212`). Keys with no neighbour in a direction
/// produce nothing.
pub fn line_sequences(directions: &[Step], length: usize) -> HashSet<String> {
    let mut sequences = HashSet::new();
    for (row, col, key) in keys() {
        for &direction in directions {
            if let Some(sequence) = bounce_walk((row, col), key, direction, length) {
                sequences.insert(sequence);
            }
        }
    }
    sequences
}

fn bounce_walk(start: (i32, i32), key: char, direction: Step, length: usize) -> Option<String> {
    let (mut row, mut col) = start;
    let (mut dr, mut dc) = direction;
    let mut sequence = String::with_capacity(length);
    sequence.push(key);

    while sequence.len() < length {
        let next = match key_at(row + dr, col + dc) {
            Some(next) => next,
            None => {
                dr = -dr;
                dc = -dc;
                key_at(row + dr, col + dc)?
            }
        };
        row += dr;
        col += dc;
        sequence.push(next);
    }

    Some(sequence)
}

/// Knight-move walks of `length` keys that never jump straight back to the
/// key they came from.
pub fn knight_sequences(length: usize) -> HashSet<String> {
    let mut sequences = HashSet::new();
    for (row, col, key) in keys() {
        let mut path = String::with_capacity(length);
        path.push(key);
        knight_walk((row, col), None, length, &mut path, &mut sequences);
    }
    sequences
}

fn knight_walk(
    at: (i32, i32),
    came_from: Option<(i32, i32)>,
    length: usize,
    path: &mut String,
    out: &mut HashSet<String>,
) {
    if path.len() == length {
        out.insert(path.clone());
        return;
    }
    for &(dr, dc) in KNIGHT {
        let next = (at.0 + dr, at.1 + dc);
        if Some(next) == came_from {
            continue;
        }
        if let Some(key) = key_at(next.0, next.1) {
            path.push(key);
            knight_walk(next, Some(at), length, path, out);
            path.pop();
        }
    }
}

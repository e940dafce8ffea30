//! Built-in PIN lists and digit runs.

use std::collections::HashSet;

/// Frequently chosen 4-digit PINs.
pub const COMMON_FOUR_DIGIT: &[&str] = &[
    "1234", "1111", "0000", "1212", "7777", "1004", "2000", "4444", "2222", "6969", "9999",
    "3333", "5555", "6666", "1122", "1313", "8888", "4321", "2001", "1010", "2580", "0852",
    "5683", "1230", "2468", "1984", "1357", "0987", "6789", "4545", "1000", "0123",
];

/// Frequently chosen 6-digit PINs.
pub const COMMON_SIX_DIGIT: &[&str] = &[
    "123456", "654321", "111111", "000000", "123123", "666666", "121212", "112233", "789456",
    "159753", "987654", "123321", "696969", "222222", "555555", "888888", "999999", "777777",
    "333333", "444444", "101010", "147258", "258369", "789789", "456789", "102030", "520520",
    "131313", "007007", "112358",
];

pub fn common_pins(length: usize) -> HashSet<String> {
    let list = match length {
        4 => COMMON_FOUR_DIGIT,
        6 => COMMON_SIX_DIGIT,
        _ => &[],
    };
    list.iter().map(|pin| pin.to_string()).collect()
}

fn digit(value: i32) -> char {
    char::from(b'0' + value.rem_euclid(10) as u8)
}

/// Runs stepping by `step` modulo 10 (`7890`, `3210`, `0987`).
pub fn digit_runs(step: i32, length: usize) -> HashSet<String> {
    (0..10)
        .map(|start| (0..length as i32).map(|i| digit(start + i * step)).collect())
        .collect()
}

pub fn repeated_digits(length: usize) -> HashSet<String> {
    (0..10).map(|d| digit(d).to_string().repeat(length)).collect()
}

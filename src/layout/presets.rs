//! Layouts for two common glasses.

use super::{
    Colon, Font, Geometry, Icon, Layout, Packing, SpinnerGating, SpinnerLayout, SpinnerTarget,
};

/// The 4-grid glass found on many DVD players: six small 7-segment style characters, the last
/// four packed two to a grid, a colon between the fourth and fifth, and a ring of six segments
/// in the top-left grid.
pub fn dvd_player() -> Layout {
    Layout {
        geometry: Geometry {
            grids: 4,
            bytes_per_grid: 2,
            displayable: 6,
        },
        packing: Packing::PackedPairs { first: 3, last: 4 },
        font: Font::new(&SEVEN_SEGMENT_FONT),
        icons: &DVD_PLAYER_ICONS,
        colon: Some(Colon {
            segment: 1,
            positions: &[4],
        }),
        spinner: SpinnerLayout {
            // Segments 11-16 of grid 1, clockwise.
            segments: [1 << 2, 1 << 3, 1 << 4, 1 << 5, 1 << 6, 1 << 7],
            target: SpinnerTarget::Byte { address: 1 },
            gating: SpinnerGating::EveryOtherCall,
        },
    }
}

/// A 6-grid glass with one 16-segment character per grid and colons after the third and fourth
/// characters. The spinner runs around the outer segments of the first character.
pub fn sixteen_segment() -> Layout {
    Layout {
        geometry: Geometry {
            grids: 6,
            bytes_per_grid: 2,
            displayable: 6,
        },
        packing: Packing::OneCharPerGrid,
        font: Font::new(&SIXTEEN_SEGMENT_FONT),
        icons: &SIXTEEN_SEGMENT_ICONS,
        colon: Some(Colon {
            segment: 10,
            positions: &[3, 5],
        }),
        spinner: SpinnerLayout {
            // Segments 7, 3, 15, 11, 14, 2: top, right, bottom, left.
            segments: [1 << 6, 1 << 2, 1 << 14, 1 << 10, 1 << 13, 1 << 1],
            target: SpinnerTarget::Grid(1),
            gating: SpinnerGating::EveryCall,
        },
    }
}

/// Indices into the [`dvd_player`] icon table.
pub mod dvd_icons {
    pub const PBC: usize = 0;
    pub const DVD: usize = 1;
    pub const PLAY: usize = 2;
    pub const S: usize = 3;
    pub const SPEAKER_RIGHT: usize = 4;
    pub const SPEAKER_LEFT: usize = 5;
    pub const QUADRATIN: usize = 6;
    pub const ANTENNAS: usize = 7;
    pub const PAUSE: usize = 8;
    pub const CD: usize = 9;
    pub const V: usize = 10;
    pub const DTS: usize = 11;
    pub const DOLBY: usize = 12;
    pub const COLON: usize = 13;
    pub const MP3: usize = 14;
}

/// Indices into the [`sixteen_segment`] icon table.
pub mod sixteen_segment_icons {
    pub const COLON_1: usize = 0;
    pub const COLON_2: usize = 1;
}

static DVD_PLAYER_ICONS: [Icon; 15] = [
    Icon::from_packed(0b1000_0000),
    Icon::from_packed(0b1001_0000),
    Icon::from_packed(0b0000_0001),
    Icon::from_packed(0b1000_0001),
    Icon::from_packed(0b1001_0001),
    Icon::from_packed(0b1010_0001),
    Icon::from_packed(0b1011_0001),
    Icon::from_packed(0b1100_0001),
    Icon::from_packed(0b1101_0001),
    Icon::from_packed(0b1110_0001),
    Icon::from_packed(0b1111_0001),
    Icon::from_packed(0b0000_0010),
    Icon::from_packed(0b1000_0010),
    Icon::from_packed(0b0000_0011),
    Icon::from_packed(0b1000_0011),
];

// Both colons are segment 10 of their grid.
static SIXTEEN_SEGMENT_ICONS: [Icon; 2] = [
    Icon::from_packed(0b1001_0011),
    Icon::from_packed(0b1001_0101),
];

// Segment numbering, lower byte only:
//         8
//     ---------
//    |\        |
//  6 | 1       | 7
//    |  \      |
//    -----5-----
//    |     \   |
//  3 |      1  | 4
//    |       \ |
//     ---------
//         2
#[rustfmt::skip]
static SEVEN_SEGMENT_FONT: [[u8; 2]; 64] = [
    [0, 0b0000_0000], // space
    [0, 0b0000_0000], // !
    [0, 0b0000_0000], // "
    [0, 0b0000_0000], // #
    [0, 0b0000_0000], // $
    [0, 0b0000_0000], // %
    [0, 0b0000_0000], // &
    [0, 0b0000_0000], // '
    [0, 0b1010_0110], // (
    [0, 0b1100_1010], // )
    [0, 0b0000_0000], // *
    [0, 0b0000_0000], // +
    [0, 0b0000_0000], // ,
    [0, 0b0001_0000], // -
    [0, 0b0000_0000], // .
    [0, 0b0000_0000], // /
    [0, 0b1110_1110], // 0
    [0, 0b0100_1000], // 1
    [0, 0b1101_0110], // 2
    [0, 0b1101_1010], // 3
    [0, 0b0111_1000], // 4
    [0, 0b1011_1010], // 5
    [0, 0b1011_1110], // 6
    [0, 0b1100_1000], // 7
    [0, 0b1111_1110], // 8
    [0, 0b1111_1010], // 9
    [0, 0b0000_0001], // : only lit before the fifth character
    [0, 0b0000_0000], // ;
    [0, 0b0000_0000], // <
    [0, 0b0001_0010], // =
    [0, 0b0000_0000], // >
    [0, 0b0000_0000], // ?
    [0, 0b0000_0000], // @
    [0, 0b1111_1100], // A
    [0, 0b1111_1110], // B
    [0, 0b1010_0110], // C
    [0, 0b1110_1110], // D
    [0, 0b1011_0110], // E
    [0, 0b1011_0100], // F
    [0, 0b1011_1110], // G
    [0, 0b0111_1100], // H
    [0, 0b0100_1000], // I
    [0, 0b0100_1010], // J
    [0, 0b0000_0000], // K
    [0, 0b0010_0110], // L
    [0, 0b1110_1100], // M
    [0, 0b1110_1100], // N
    [0, 0b0001_1110], // O
    [0, 0b1110_0100], // P
    [0, 0b0001_1110], // Q
    [0, 0b1101_0110], // R
    [0, 0b1011_1010], // S
    [0, 0b1100_1000], // T
    [0, 0b0110_1110], // U
    [0, 0b0110_1110], // V
    [0, 0b0110_1110], // W
    [0, 0b1111_1110], // X
    [0, 0b0111_1000], // Y
    [0, 0b1101_0110], // Z
    [0, 0b1010_0110], // [
    [0, 0b0000_0001], // \ only lit on the first character
    [0, 0b1100_1010], // ]
    [0, 0b0000_0000], // ^
    [0, 0b0000_0010], // _
];

// Segment numbering:
//         7
//     ---------
//    |\   |   /|
//  2 | 5  6  4 | 3
//    |  \ | /  |
//    -16--9--1--
//    |   /|\   |
// 14 | 13 6 12 | 15
//    | /  |  \ |
//     ---------
//         11
#[rustfmt::skip]
static SIXTEEN_SEGMENT_FONT: [[u8; 2]; 65] = [
    [0b0000_0000, 0b0000_0000], // space
    [0b0000_0000, 0b0000_0000], // !
    [0b0000_0000, 0b0000_0000], // "
    [0b0000_0000, 0b0000_0000], // #
    [0b1100_0101, 0b0110_0011], // $
    [0b0000_0000, 0b0000_0000], // %
    [0b0000_0000, 0b0000_0000], // &
    [0b0000_0000, 0b0000_0000], // '
    [0b0000_1001, 0b0000_1000], // (
    [0b0001_0001, 0b0001_0000], // )
    [0b1001_1001, 0b0011_1001], // *
    [0b1000_0001, 0b0010_0001], // +
    [0b0000_0000, 0b0000_0000], // ,
    [0b1000_0001, 0b0000_0001], // -
    [0b0000_0001, 0b0000_0000], // .
    [0b0001_0001, 0b0000_1000], // /
    [0b0111_0100, 0b0100_1110], // 0
    [0b0100_0000, 0b0000_1100], // 1
    [0b1010_0101, 0b0100_0101], // 2
    [0b1100_0101, 0b0100_0101], // 3
    [0b1100_0001, 0b0000_0111], // 4
    [0b1100_0101, 0b0100_0011], // 5
    [0b1110_0101, 0b0100_0011], // 6
    [0b0001_0001, 0b0100_1000], // 7
    [0b1110_0101, 0b0100_0111], // 8
    [0b1100_0101, 0b0100_0111], // 9
    [0b0000_0010, 0b0000_0000], // : only lit on the third and fifth characters
    [0b0000_0000, 0b0000_0000], // ;
    [0b0000_1000, 0b0000_1000], // <
    [0b1000_0101, 0b0000_0001], // =
    [0b0001_0000, 0b0001_0000], // >
    [0b0000_0000, 0b0000_0000], // ?
    [0b0000_0000, 0b0000_0000], // @
    [0b1110_0001, 0b0100_0111], // A
    [0b0100_0101, 0b0110_0101], // B
    [0b0010_0100, 0b0100_0010], // C
    [0b0100_0101, 0b0110_0100], // D
    [0b1010_0101, 0b0100_0011], // E
    [0b1010_0001, 0b0100_0010], // F
    [0b0110_0100, 0b0100_0011], // G
    [0b1110_0001, 0b0000_0111], // H
    [0b0000_0001, 0b0010_0000], // I
    [0b0110_0100, 0b0000_0100], // J
    [0b1010_1001, 0b0000_1010], // K
    [0b0010_0100, 0b0000_0010], // L
    [0b0110_0000, 0b0001_1110], // M
    [0b0110_1001, 0b0001_0110], // N
    [0b0110_0100, 0b0100_0110], // O
    [0b1010_0001, 0b0100_0111], // P
    [0b0110_1100, 0b0100_0110], // Q
    [0b1010_1001, 0b0100_0111], // R
    [0b1100_0101, 0b0100_0011], // S
    [0b0000_0001, 0b0110_0000], // T
    [0b0110_0100, 0b0000_0110], // U
    [0b0011_0000, 0b0000_1010], // V
    [0b0111_1001, 0b0000_0110], // W
    [0b0001_1001, 0b0001_1000], // X
    [0b0001_0001, 0b0001_1000], // Y
    [0b0001_0101, 0b0100_1000], // Z
    [0b0010_0100, 0b0100_0010], // [
    [0b0000_1001, 0b0001_0000], // \
    [0b0100_0100, 0b0100_0100], // ]
    [0b0000_0000, 0b0000_0000], // ^
    [0b0000_0100, 0b0000_0000], // _
    [0b1000_0001, 0b0100_0111], // degree, on '`'
];

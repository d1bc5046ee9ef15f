use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::Error;

/// Column letters (easting) at the lower-left origin of each set.
const SET_ORIGIN_COLUMN_LETTERS: &[u8] = b"AJSAJS";
/// Row letters (northing) at the lower-left origin of each set.
const SET_ORIGIN_ROW_LETTERS: &[u8] = b"AFAFAF";

const CHAR_A: i32 = 'A' as i32;
const CHAR_I: i32 = 'I' as i32;
const CHAR_O: i32 = 'O' as i32;
const CHAR_V: i32 = 'V' as i32;
const CHAR_Z: i32 = 'Z' as i32;

/// Meters covered by one grid square side.
pub(crate) const SQUARE_SIZE: f64 = 100_000.;
/// Meters covered by one full cycle of the row letters. The cycle repeats
/// every 20 squares, so a row letter alone does not pin the northing.
pub(crate) const ROW_CYCLE: f64 = 2_000_000.;

lazy_static! {
    /// Minimum northing in meters of each latitude band, used to pick the
    /// row letter cycle a decoded northing belongs to.
    static ref MIN_NORTHING: HashMap<char, f64> = HashMap::from([
        ('C', 1_100_000.),
        ('D', 2_000_000.),
        ('E', 2_800_000.),
        ('F', 3_700_000.),
        ('G', 4_600_000.),
        ('H', 5_500_000.),
        ('J', 6_400_000.),
        ('K', 7_300_000.),
        ('L', 8_200_000.),
        ('M', 9_100_000.),
        ('N', 0.),
        ('P', 800_000.),
        ('Q', 1_700_000.),
        ('R', 2_600_000.),
        ('S', 3_500_000.),
        ('T', 4_400_000.),
        ('U', 5_300_000.),
        ('V', 6_200_000.),
        ('W', 7_000_000.),
        ('X', 7_900_000.),
    ]);
}

/// UTM zones cycle through 6 sets of 100 km letter origins.
pub(crate) fn set_for_zone(zone_number: u8) -> usize {
    let set = usize::from(zone_number) % 6;

    if set == 0 { 6 } else { set }
}

/// Two-letter 100 km grid square id for a UTM position.
pub(crate) fn square_id(easting: f64, northing: f64, zone_number: u8) -> String {
    let set = set_for_zone(zone_number);
    let column = (easting / SQUARE_SIZE).floor() as i32;
    let row = (northing / SQUARE_SIZE).floor() as i32 % 20;

    letter_id(column, row, set)
}

// The rollover flag and the origin-relative comparisons below are not
// independent: a wrap past 'Z' ('V' for rows) changes how the comparison
// against the set origin must be read. The chain mirrors the encoding that
// the decoders round-trip against; do not simplify it.
fn letter_id(column: i32, row: i32, set: usize) -> String {
    let col_origin = i32::from(SET_ORIGIN_COLUMN_LETTERS[set - 1]);
    let row_origin = i32::from(SET_ORIGIN_ROW_LETTERS[set - 1]);

    let mut col = col_origin + column - 1;
    let mut row = row_origin + row;
    let mut rollover = false;

    if col > CHAR_Z {
        col = col - CHAR_Z + CHAR_A - 1;
        rollover = true;
    }

    if col == CHAR_I || (col_origin < CHAR_I && col > CHAR_I) || ((col > CHAR_I || col_origin < CHAR_I) && rollover) {
        col += 1;
    }

    if col == CHAR_O || (col_origin < CHAR_O && col > CHAR_O) || ((col > CHAR_O || col_origin < CHAR_O) && rollover) {
        col += 1;

        if col == CHAR_I {
            col += 1;
        }
    }

    if col > CHAR_Z {
        col = col - CHAR_Z + CHAR_A - 1;
    }

    if row > CHAR_V {
        row = row - CHAR_V + CHAR_A - 1;
        rollover = true;
    } else {
        rollover = false;
    }

    if row == CHAR_I || (row_origin < CHAR_I && row > CHAR_I) || ((row > CHAR_I || row_origin < CHAR_I) && rollover) {
        row += 1;
    }

    if row == CHAR_O || (row_origin < CHAR_O && row > CHAR_O) || ((row > CHAR_O || row_origin < CHAR_O) && rollover) {
        row += 1;

        if row == CHAR_I {
            row += 1;
        }
    }

    if row > CHAR_V {
        row = row - CHAR_V + CHAR_A - 1;
    }

    // Both stay within A..=Z by construction
    let mut id = String::with_capacity(2);
    id.push(char::from(col as u8));
    id.push(char::from(row as u8));
    id
}

/// Easting contribution of a grid square column letter. Walks forward from
/// the set origin skipping I and O and wrapping once at 'Z'; needing a
/// second wrap means the letter can never match.
pub(crate) fn easting_for_column(column: u8, set: usize) -> Result<f64, Error> {
    let target = i32::from(column);
    let mut cur = i32::from(SET_ORIGIN_COLUMN_LETTERS[set - 1]);
    let mut easting = SQUARE_SIZE;
    let mut rewound = false;

    while cur != target {
        cur += 1;
        if cur == CHAR_I {
            cur += 1;
        }
        if cur == CHAR_O {
            cur += 1;
        }
        if cur > CHAR_Z {
            if rewound {
                return Err(Error::InvalidGridLetter(char::from(column)));
            }
            cur = CHAR_A;
            rewound = true;
        }
        easting += SQUARE_SIZE;
    }

    Ok(easting)
}

/// Northing contribution of a grid square row letter within its 2,000 km
/// cycle. Row letters are bounded to A..=V; the caller raises the result
/// to the latitude band's minimum northing.
pub(crate) fn northing_for_row(row: u8, set: usize) -> Result<f64, Error> {
    if i32::from(row) > CHAR_V {
        return Err(Error::InvalidNorthingLetter(char::from(row)));
    }

    let target = i32::from(row);
    let mut cur = i32::from(SET_ORIGIN_ROW_LETTERS[set - 1]);
    let mut northing = 0.;
    let mut rewound = false;

    while cur != target {
        cur += 1;
        if cur == CHAR_I {
            cur += 1;
        }
        if cur == CHAR_O {
            cur += 1;
        }
        if cur > CHAR_V {
            if rewound {
                return Err(Error::InvalidNorthingLetter(char::from(row)));
            }
            cur = CHAR_A;
            rewound = true;
        }
        northing += SQUARE_SIZE;
    }

    Ok(northing)
}

/// Minimum northing of a latitude band, keyed by zone letter.
pub(crate) fn min_northing(zone_letter: char) -> Result<f64, Error> {
    MIN_NORTHING
        .get(&zone_letter)
        .copied()
        .ok_or(Error::InvalidZoneLetter(zone_letter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_repeat_every_six_zones() {
        let tests = [(1, 1), (2, 2), (6, 6), (7, 1), (12, 6), (23, 5), (32, 2), (60, 6)];

        for (zone_number, set) in tests {
            assert_eq!(set_for_zone(zone_number), set, "set for zone {zone_number}");
        }
    }

    #[test]
    fn square_ids() {
        let tests = [
            ((398_973.96, 5_756_497.74, 32), "LC"),
            ((611_733.14, 7_800_614.37, 23), "PU"),
            ((594_858., 6_399_060., 32), "NJ"),
            ((767_993., 0., 30), "YF"),
            ((706_832., 4_344_683., 10), "GJ"),
            ((700_373., 5_704_554., 31), "GT"),
        ];

        for ((easting, northing, zone_number), id) in tests {
            assert_eq!(square_id(easting, northing, zone_number), id, "id for zone {zone_number}");
        }
    }

    #[test]
    fn column_walk_skips_i_and_o() {
        let tests = [
            // Set 1 starts at 'A'; columns 1..=8 are A..H with I never used
            (b'A', 1, 100_000.),
            (b'H', 1, 800_000.),
            // Set 5 starts at 'J'; 'P' is 5 steps away once 'O' is skipped
            (b'P', 5, 600_000.),
        ];

        for (column, set, easting) in tests {
            let decoded = easting_for_column(column, set).unwrap();
            assert!((decoded - easting).abs() < 1e-9, "column {} of set {set}", char::from(column));
        }
    }

    #[test]
    fn row_walk_is_bounded() {
        assert!(matches!(northing_for_row(b'W', 1), Err(Error::InvalidNorthingLetter('W'))));
        assert!(matches!(northing_for_row(b'Z', 3), Err(Error::InvalidNorthingLetter('Z'))));
        // I and O are unreachable, so the walk must rewind once and give up
        assert!(matches!(northing_for_row(b'I', 1), Err(Error::InvalidNorthingLetter('I'))));
        assert!(matches!(easting_for_column(b'I', 1), Err(Error::InvalidGridLetter('I'))));
        assert!(matches!(easting_for_column(b'1', 1), Err(Error::InvalidGridLetter('1'))));
    }

    #[test]
    fn min_northing_per_band() {
        let tests = [('N', 0.), ('U', 5_300_000.), ('X', 7_900_000.), ('C', 1_100_000.)];

        for (zone_letter, northing) in tests {
            let min = min_northing(zone_letter).unwrap();
            assert!((min - northing).abs() < 1e-9, "minimum northing of band {zone_letter}");
        }

        assert!(matches!(min_northing('A'), Err(Error::InvalidZoneLetter('A'))));
        assert!(matches!(min_northing('I'), Err(Error::InvalidZoneLetter('I'))));
    }

    // Pins the wrap/skip correction chain in letter_id against the decode
    // walks for every set, column and row.
    #[test]
    fn square_id_round_trips() {
        for zone_number in 1..=60u8 {
            let set = set_for_zone(zone_number);

            for column in 1..=8i32 {
                for row in 0..20i32 {
                    let easting = f64::from(column) * SQUARE_SIZE + 50_000.;
                    let northing = f64::from(row) * SQUARE_SIZE + 50_000.;

                    let id = square_id(easting, northing, zone_number);
                    let id = id.as_bytes();

                    let east = easting_for_column(id[0], set).unwrap();
                    let north = northing_for_row(id[1], set).unwrap();

                    assert!(
                        (east - f64::from(column) * SQUARE_SIZE).abs() < 1e-9,
                        "column {column} of zone {zone_number} decoded to {east}"
                    );
                    assert!(
                        (north - f64::from(row) * SQUARE_SIZE).abs() < 1e-9,
                        "row {row} of zone {zone_number} decoded to {north}"
                    );
                }
            }
        }
    }
}
